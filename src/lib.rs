//! User Settings Server Library
//!
//! Per-user key/value settings over HTTP, persisted in PostgreSQL and
//! mirrored best-effort to an external preferences service.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod preferences;
pub mod routes;
pub mod service;

pub use config::Config;
pub use db::{PgSettingsRepository, SettingsRepository};
pub use error::{AppError, Result};
pub use preferences::{PreferencesClient, SyncReport};
pub use service::SettingsService;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: SettingsService,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given service and configuration
    pub fn new(service: SettingsService, config: Config) -> Self {
        Self { service, config }
    }
}

/// Build the HTTP router with all routes and middleware
pub fn router(state: AppState) -> Router {
    use routes::{get_user_settings, health_check, update_user_settings};

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/user/:user_id/settings",
            get(get_user_settings).post(update_user_settings),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
