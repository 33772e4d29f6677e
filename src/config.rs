use std::env;
use std::time::Duration;

use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PREFERENCES_BASE_URL};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub preferences_base_url: String,
    pub http_timeout_secs: u64,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let server_host = var_or("SERVER_HOST", "0.0.0.0");
        let server_port = var_or("SERVER_PORT", "8080")
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_url =
            lookup("DATABASE_URL").ok_or("DATABASE_URL must be set to a PostgreSQL DSN")?;

        let database_max_connections = var_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|_| "Invalid DATABASE_MAX_CONNECTIONS")?;

        let preferences_base_url = var_or("PREFERENCES_BASE_URL", DEFAULT_PREFERENCES_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let http_timeout_secs: u64 =
            var_or("HTTP_TIMEOUT_SECONDS", &DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| "Invalid HTTP_TIMEOUT_SECONDS")?;
        if http_timeout_secs == 0 {
            return Err("HTTP_TIMEOUT_SECONDS must be greater than zero".to_string());
        }

        let environment = var_or("ENVIRONMENT", "development");

        Ok(Config {
            server_host,
            server_port,
            database_url,
            database_max_connections,
            preferences_base_url,
            http_timeout_secs,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Timeout applied to every outbound preferences sync call
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/userdb")]).unwrap();

        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.preferences_base_url, "https://preferences.example.com");
        assert_eq!(config.http_timeout(), Duration::from_secs(5));
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_database_url_required() {
        let err = load(&[]).unwrap_err();
        assert!(err.contains("DATABASE_URL"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/settings"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "9000"),
            ("PREFERENCES_BASE_URL", "http://prefs.internal/"),
            ("HTTP_TIMEOUT_SECONDS", "2"),
        ])
        .unwrap();

        assert_eq!(config.server_address(), "127.0.0.1:9000");
        // Trailing slash is stripped so `{base}/sync` never doubles up
        assert_eq!(config.preferences_base_url, "http://prefs.internal");
        assert_eq!(config.http_timeout_secs, 2);
    }

    #[test]
    fn test_invalid_numbers() {
        let err = load(&[("DATABASE_URL", "x"), ("SERVER_PORT", "http")]).unwrap_err();
        assert_eq!(err, "Invalid SERVER_PORT");

        let err = load(&[("DATABASE_URL", "x"), ("HTTP_TIMEOUT_SECONDS", "0")]).unwrap_err();
        assert!(err.contains("greater than zero"));
    }
}
