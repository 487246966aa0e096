//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, database path,
//! timeouts and the default log filter.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration field {field}: {reason}")]
    InvalidField {
        /// Field name
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// SQLite database file (":memory:" for a throwaway database)
    pub database_path: String,

    /// Per-request time limit in seconds (default: 15)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// How long in-flight requests may drain after a shutdown signal (default: 15)
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_secs: u64,

    /// Default log filter when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_shutdown_grace() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later at startup
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }
        if self.bind_port == 0 {
            return Err(ConfigError::InvalidField {
                field: "bind_port".to_string(),
                reason: "must be nonzero".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidField {
                field: "request_timeout_secs".to_string(),
                reason: "must be nonzero".to_string(),
            });
        }
        Ok(())
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            database_path: ":memory:".to_string(),
            request_timeout_secs: default_request_timeout(),
            shutdown_grace_secs: default_shutdown_grace(),
            log_level: default_log_level(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Per-request time limit
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Shutdown drain limit
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.database_path, ":memory:");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let toml = r#"
            bind_port = 9000
            database_path = "/var/lib/credibility/votes.db"
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.database_path, "/var/lib/credibility/votes.db");
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.shutdown_grace(), Duration::from_secs(15));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_toml_overrides() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 8443
            database_path = "votes.db"
            request_timeout_secs = 5
            shutdown_grace_secs = 30
            log_level = "debug"
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.shutdown_grace_secs, 30);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_validate_rejects_empty_database_path() {
        let mut config = ServerConfig::default_test_config();
        config.database_path = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField(field)) if field == "database_path"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = ServerConfig::default_test_config();
        config.bind_port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let result = ServerConfig::from_file("/nonexistent/credibility.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
