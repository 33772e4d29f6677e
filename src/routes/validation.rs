use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use serde_json::{Map, Value};

use crate::constants::ERR_INVALID_USER_ID;
use crate::error::AppError;
use crate::models::SettingsUpdateRequest;

/// Resolve the `{user_id}` path segment, mapping a non-integer to 422
pub fn user_id_from_path(path: Result<Path<i32>, PathRejection>) -> Result<i32, AppError> {
    match path {
        Ok(Path(user_id)) => Ok(user_id),
        Err(rejection) => {
            tracing::warn!("Rejected user ID path segment: {}", rejection.body_text());
            Err(AppError::Validation(ERR_INVALID_USER_ID.to_string()))
        }
    }
}

/// Unwrap the update body, mapping every JSON rejection to 422
///
/// Covers syntax errors, a missing content type and a `settings` field that
/// is absent or not an object.
pub fn settings_from_body(
    body: Result<Json<SettingsUpdateRequest>, JsonRejection>,
) -> Result<Map<String, Value>, AppError> {
    match body {
        Ok(Json(request)) => Ok(request.settings),
        Err(rejection) => {
            let message = rejection.body_text();
            tracing::warn!("Rejected settings body: {}", message);
            Err(AppError::Validation(message))
        }
    }
}
