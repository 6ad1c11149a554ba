//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! `main` loads a `.env` file (if any) before calling [`ApiConfig::load`].

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::StatusPolicy;

/// API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// How long a writer waits for the SQLite lock, in seconds
    pub db_busy_timeout_secs: u64,

    /// Enforce the pending → completed/cancelled table on status changes
    pub strict_status_transitions: bool,

    /// Deployment label (development, staging, production, ...)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: PathBuf::from("./jati.db"),
            db_max_connections: 5,
            db_busy_timeout_secs: 5,
            strict_status_transitions: false,
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: env::var("HOST").unwrap_or(defaults.host),

            port: parse_var("PORT", defaults.port)?,

            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            db_busy_timeout_secs: parse_var("DB_BUSY_TIMEOUT_SECS", defaults.db_busy_timeout_secs)?,

            strict_status_transitions: parse_var(
                "STRICT_STATUS_TRANSITIONS",
                defaults.strict_status_transitions,
            )?,

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.db_busy_timeout_secs)
    }

    pub fn status_policy(&self) -> StatusPolicy {
        if self.strict_status_transitions {
            StatusPolicy::Strict
        } else {
            StatusPolicy::Permissive
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert_eq!(config.status_policy(), StatusPolicy::Permissive);
    }

    #[test]
    fn test_strict_policy_flag() {
        let config = ApiConfig {
            strict_status_transitions: true,
            ..ApiConfig::default()
        };
        assert_eq!(config.status_policy(), StatusPolicy::Strict);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        // Unique name so parallel tests cannot interfere
        let name = "JATI_TEST_PARSE_VAR_PORT";
        env::set_var(name, "eighty");
        let err = parse_var::<u16>(name, 8080).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref n) if n == name));
        env::remove_var(name);

        assert_eq!(parse_var::<u16>(name, 8080).unwrap(), 8080);
    }
}
