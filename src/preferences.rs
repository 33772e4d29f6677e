//! Client for the external preferences service.
//!
//! Sync is best-effort: the database is the source of truth and the remote
//! service may fall behind. Failures are logged here and never propagated.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::constants::PREFERENCES_SYNC_PATH;
use crate::error::Result;
use crate::models::SettingEntry;

#[derive(Debug, Serialize)]
struct SyncPayload<'a> {
    user_id: i32,
    key: &'a str,
    value: &'a Value,
}

/// Outcome of one notification phase
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub attempted: usize,
    pub failed: usize,
}

impl SyncReport {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failed
    }
}

/// Process-wide handle to the preferences service
///
/// Built once at startup. Clones share the underlying connection pool, so
/// handlers never construct their own client.
#[derive(Debug, Clone)]
pub struct PreferencesClient {
    client: reqwest::Client,
    sync_url: String,
}

impl PreferencesClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let sync_url = format!("{}{}", base_url.trim_end_matches('/'), PREFERENCES_SYNC_PATH);

        tracing::info!("Preferences sync target: {} (timeout {:?})", sync_url, timeout);

        Ok(Self { client, sync_url })
    }

    pub fn sync_url(&self) -> &str {
        &self.sync_url
    }

    /// POST a single `{user_id, key, value}` notification
    ///
    /// Transport errors, timeouts and non-2xx statuses are all errors.
    /// The response body is ignored.
    pub async fn sync_setting(&self, user_id: i32, key: &str, value: &Value) -> Result<()> {
        self.client
            .post(&self.sync_url)
            .json(&SyncPayload {
                user_id,
                key,
                value,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Notify every entry in order, isolating each failure
    pub async fn notify_all(&self, user_id: i32, entries: &[SettingEntry]) -> SyncReport {
        let mut report = SyncReport::default();

        for entry in entries {
            report.attempted += 1;

            if let Err(e) = self.sync_setting(user_id, &entry.key, &entry.value).await {
                report.failed += 1;
                tracing::error!(
                    user_id,
                    key = %entry.key,
                    error = %e,
                    "external_sync_failed"
                );
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sync_url_joins_base() {
        let client =
            PreferencesClient::new("https://prefs.example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.sync_url(), "https://prefs.example.com/sync");

        let client =
            PreferencesClient::new("http://localhost:9000", Duration::from_secs(5)).unwrap();
        assert_eq!(client.sync_url(), "http://localhost:9000/sync");
    }

    #[test]
    fn test_payload_shape() {
        let value = json!(5);
        let payload = SyncPayload {
            user_id: 1,
            key: "volume",
            value: &value,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"user_id": 1, "key": "volume", "value": 5})
        );
    }

    #[tokio::test]
    async fn test_notify_all_counts_failures() {
        // Nothing listens on port 1, so every call fails at connect time
        let client = PreferencesClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let entries = vec![
            SettingEntry {
                key: "theme".to_string(),
                value: json!("dark"),
            },
            SettingEntry {
                key: "lang".to_string(),
                value: json!("en"),
            },
        ];

        let report = client.notify_all(1, &entries).await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(report.succeeded(), 0);
    }

    #[tokio::test]
    async fn test_notify_all_empty() {
        let client = PreferencesClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        assert_eq!(client.notify_all(1, &[]).await, SyncReport::default());
    }
}
