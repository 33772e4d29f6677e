use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::error::Result;
use crate::models::{SettingsEnvelope, SettingsUpdateRequest, SettingsUpdateResponse};
use crate::routes::{settings_from_body, user_id_from_path};
use crate::AppState;

/// Get user settings
///
/// GET /api/user/{user_id}/settings
pub async fn get_user_settings(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<SettingsEnvelope>> {
    let user_id = user_id_from_path(path)?;
    let envelope = state.service.get_settings(user_id).await?;

    Ok(Json(envelope))
}

/// Update user settings and sync them to the external preferences service
///
/// POST /api/user/{user_id}/settings with `{"settings": {key: value, ...}}`
///
/// Returns 200 once the database write commits, whatever happens to the
/// sync calls.
pub async fn update_user_settings(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
    body: std::result::Result<Json<SettingsUpdateRequest>, JsonRejection>,
) -> Result<Json<SettingsUpdateResponse>> {
    let user_id = user_id_from_path(path)?;
    let settings = settings_from_body(body)?;

    let response = state.service.update_settings(user_id, settings).await?;

    Ok(Json(response))
}
