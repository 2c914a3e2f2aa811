//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::Serialize;
use std::env;
use ventas_db::DbConfig;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// REST API configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    /// Address to bind (default: 127.0.0.1)
    pub bind_addr: String,

    /// HTTP port (default: 5000)
    pub port: u16,

    /// Database settings
    #[serde(skip)]
    pub db: DbConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            bind_addr: env::var("VENTAS_API_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("VENTAS_API_PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("VENTAS_API_PORT".to_string()))?,

            db: DbConfig::from_env()?,
        };

        if config.bind_addr.trim().is_empty() {
            return Err(ConfigError::InvalidValue("VENTAS_API_BIND".to_string()));
        }

        Ok(config)
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Database(#[from] ventas_db::ConfigError),
}
