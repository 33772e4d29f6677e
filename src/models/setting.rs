use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::User;

/// One stored setting, unique per (user_id, setting_key)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSetting {
    pub id: i32,
    pub user_id: i32,
    pub setting_key: String,
    /// Always the coerced string form of whatever the client sent
    pub setting_value: String,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/user/{user_id}/settings`
///
/// `settings` keeps the client's key order (serde_json `preserve_order`).
#[derive(Debug, Deserialize)]
pub struct SettingsUpdateRequest {
    pub settings: Map<String, Value>,
}

/// A single applied update, echoing the value exactly as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingEntry {
    pub key: String,
    pub value: Value,
}

/// Response of `GET /api/user/{user_id}/settings`
///
/// Every value in `settings` is a JSON string; keys keep row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsEnvelope {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub settings: Map<String, Value>,
}

impl SettingsEnvelope {
    /// Project rows into a key -> value map. Later rows win on duplicate keys.
    pub fn new(user: User, rows: Vec<UserSetting>) -> Self {
        let settings = rows
            .into_iter()
            .map(|row| (row.setting_key, Value::String(row.setting_value)))
            .collect();

        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
            settings,
        }
    }
}

/// Response of `POST /api/user/{user_id}/settings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsUpdateResponse {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub settings: Vec<SettingEntry>,
    pub total_settings: usize,
}

impl SettingsUpdateResponse {
    pub fn new(user: User, settings: Vec<SettingEntry>) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
            total_settings: settings.len(),
            settings,
        }
    }
}

/// Convert an arbitrary JSON value into the string stored in `setting_value`
///
/// Strings are stored verbatim and numbers as their decimal text. Booleans
/// and null use the `True`/`False`/`None` spelling existing rows were written
/// with. Arrays and objects are stored as compact JSON text.
pub fn coerce_setting_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alice() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    fn row(id: i32, key: &str, value: &str) -> UserSetting {
        UserSetting {
            id,
            user_id: 1,
            setting_key: key.to_string(),
            setting_value: value.to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_coerce_setting_value() {
        assert_eq!(coerce_setting_value(&json!("dark")), "dark");
        assert_eq!(coerce_setting_value(&json!(5)), "5");
        assert_eq!(coerce_setting_value(&json!(1.5)), "1.5");
        assert_eq!(coerce_setting_value(&json!(true)), "True");
        assert_eq!(coerce_setting_value(&json!(false)), "False");
        assert_eq!(coerce_setting_value(&Value::Null), "None");
        assert_eq!(coerce_setting_value(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(coerce_setting_value(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_envelope_last_row_wins() {
        let envelope = SettingsEnvelope::new(
            alice(),
            vec![row(1, "theme", "light"), row(2, "lang", "en"), row(3, "theme", "dark")],
        );

        assert_eq!(envelope.settings.len(), 2);
        assert_eq!(envelope.settings["theme"], "dark");
        assert_eq!(envelope.settings["lang"], "en");
    }

    #[test]
    fn test_envelope_keeps_row_order() {
        let envelope = SettingsEnvelope::new(
            alice(),
            vec![row(1, "theme", "dark"), row(2, "lang", "en")],
        );

        let keys: Vec<&str> = envelope.settings.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["theme", "lang"]);
        assert_eq!(
            serde_json::to_string(&envelope.settings).unwrap(),
            r#"{"theme":"dark","lang":"en"}"#
        );
    }

    #[test]
    fn test_update_request_preserves_order() {
        let request: SettingsUpdateRequest =
            serde_json::from_str(r#"{"settings": {"zeta": 1, "alpha": 2, "mid": 3}}"#).unwrap();

        let keys: Vec<&str> = request.settings.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_update_request_rejects_non_object() {
        assert!(serde_json::from_str::<SettingsUpdateRequest>(r#"{"settings": [1, 2]}"#).is_err());
        assert!(serde_json::from_str::<SettingsUpdateRequest>(r#"{"other": {}}"#).is_err());
    }

    #[test]
    fn test_update_response_counts_entries() {
        let response = SettingsUpdateResponse::new(
            alice(),
            vec![SettingEntry {
                key: "volume".to_string(),
                value: json!(5),
            }],
        );

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["total_settings"], 1);
        assert_eq!(body["settings"][0]["value"], json!(5));
    }
}
