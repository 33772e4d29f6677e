use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{User, UserSetting};

const SELECT_USER_SQL: &str = "SELECT id, username, email FROM users WHERE id = $1";

const SELECT_SETTINGS_SQL: &str = "SELECT id, user_id, setting_key, setting_value, updated_at \
     FROM user_settings WHERE user_id = $1 ORDER BY id";

// Relies on the user_settings_user_key_unique constraint from the migration
const UPSERT_SETTING_SQL: &str = "INSERT INTO user_settings \
     (user_id, setting_key, setting_value, updated_at) VALUES ($1, $2, $3, NOW()) \
     ON CONFLICT (user_id, setting_key) \
     DO UPDATE SET setting_value = EXCLUDED.setting_value, updated_at = NOW()";

/// Storage operations needed by the settings service
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Look up a user by primary key
    async fn find_user(&self, user_id: i32) -> Result<Option<User>>;

    /// All settings rows for a user, oldest row first
    async fn list_settings(&self, user_id: i32) -> Result<Vec<UserSetting>>;

    /// Upsert every `(key, value)` pair on (user_id, setting_key).
    ///
    /// Either all pairs are committed or none are.
    async fn upsert_settings(&self, user_id: i32, settings: &[(String, String)]) -> Result<()>;

    /// Cheap connectivity check for the health endpoint
    async fn ping(&self) -> Result<()>;
}

/// PostgreSQL-backed repository
///
/// Each call checks a connection out of the pool for its own duration only.
/// Writes hold a single transaction; sqlx rolls it back if the guard is
/// dropped before `commit`, so every early return releases cleanly.
#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn find_user(&self, user_id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(SELECT_USER_SQL)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list_settings(&self, user_id: i32) -> Result<Vec<UserSetting>> {
        let rows = sqlx::query_as::<_, UserSetting>(SELECT_SETTINGS_SQL)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn upsert_settings(&self, user_id: i32, settings: &[(String, String)]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in settings {
            sqlx::query(UPSERT_SETTING_SQL)
                .bind(user_id)
                .bind(key)
                .bind(value)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!("Committed {} setting(s) for user {}", settings.len(), user_id);

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
