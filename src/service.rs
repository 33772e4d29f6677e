use std::sync::Arc;

use serde_json::{Map, Value};

use crate::db::SettingsRepository;
use crate::error::{AppError, Result};
use crate::models::{
    coerce_setting_value, SettingEntry, SettingsEnvelope, SettingsUpdateResponse, User,
};
use crate::preferences::PreferencesClient;

/// Reads and upserts user settings, then mirrors writes to the
/// preferences service
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
    preferences: PreferencesClient,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepository>, preferences: PreferencesClient) -> Self {
        Self { repo, preferences }
    }

    pub fn repository(&self) -> &dyn SettingsRepository {
        self.repo.as_ref()
    }

    async fn require_user(&self, user_id: i32) -> Result<User> {
        self.repo.find_user(user_id).await?.ok_or_else(|| {
            tracing::info!("Settings request for non-existent user {}", user_id);
            AppError::UserNotFound
        })
    }

    /// All settings for a user as a key -> value map
    pub async fn get_settings(&self, user_id: i32) -> Result<SettingsEnvelope> {
        let user = self.require_user(user_id).await?;
        let rows = self.repo.list_settings(user_id).await?;

        Ok(SettingsEnvelope::new(user, rows))
    }

    /// Upsert every setting in one transaction, then notify the preferences
    /// service once per key.
    ///
    /// Sync failures are logged only; they never undo the write or change the
    /// response.
    pub async fn update_settings(
        &self,
        user_id: i32,
        settings: Map<String, Value>,
    ) -> Result<SettingsUpdateResponse> {
        let user = self.require_user(user_id).await?;

        // Phase 1: transactional upsert
        let stored: Vec<(String, String)> = settings
            .iter()
            .map(|(key, value)| (key.clone(), coerce_setting_value(value)))
            .collect();
        self.repo.upsert_settings(user_id, &stored).await?;

        let updated: Vec<SettingEntry> = settings
            .into_iter()
            .map(|(key, value)| SettingEntry { key, value })
            .collect();

        tracing::info!("Stored {} setting(s) for user {}", updated.len(), user_id);

        // Phase 2: best-effort notification, after commit
        let report = self.preferences.notify_all(user_id, &updated).await;
        if report.failed > 0 {
            tracing::warn!(
                "Preferences sync incomplete for user {}: {}/{} succeeded",
                user_id,
                report.succeeded(),
                report.attempted
            );
        }

        Ok(SettingsUpdateResponse::new(user, updated))
    }
}
