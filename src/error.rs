use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{ERR_INTERNAL, ERR_USER_NOT_FOUND};

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Outbound preferences sync failed. Logged and swallowed by the service,
    /// never returned from a handler.
    #[error("Preferences sync error: {0}")]
    Sync(#[from] reqwest::Error),

    #[error("User not found")]
    UserNotFound,

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ERR_INTERNAL.to_string())
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ERR_INTERNAL.to_string())
            }
            AppError::Sync(ref e) => {
                tracing::error!("Preferences sync error reached the API layer: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ERR_INTERNAL.to_string())
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, ERR_USER_NOT_FOUND.to_string()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
