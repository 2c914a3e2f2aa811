//! # Database Configuration
//!
//! Where the sales database lives and how sessions are opened. The
//! configuration is always handed to [`ConnectionProvider::new`]
//! explicitly; nothing here is global.
//!
//! Environment variables read by [`DbConfig::from_env`]:
//! - `VENTAS_DB_PATH` - SQLite file (default: `ventas.db`)
//! - `VENTAS_DB_BUSY_TIMEOUT_MS` - lock wait in milliseconds (default: 5000)
//! - `VENTAS_DB_CREATE` - create the file when missing (default: true)
//!
//! [`ConnectionProvider::new`]: crate::provider::ConnectionProvider::new

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default database file.
pub const DEFAULT_DB_PATH: &str = "ventas.db";

/// Default busy timeout in milliseconds.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/ventas/ventas.db")
///     .busy_timeout(Duration::from_secs(2))
///     .create_if_missing(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// How long a statement waits on a locked database before failing.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether opening a session may create the database file.
    /// Default: true
    pub create_if_missing: bool,
}

impl DbConfig {
    /// Creates a configuration for the given database file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            create_if_missing: true,
        }
    }

    /// Sets the busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether the database file may be created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        DbConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    ///
    /// `lookup` returns `None` for unset keys; the defaults apply then.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup("VENTAS_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let busy_timeout_ms: u64 = lookup("VENTAS_DB_BUSY_TIMEOUT_MS")
            .unwrap_or_else(|| DEFAULT_BUSY_TIMEOUT_MS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("VENTAS_DB_BUSY_TIMEOUT_MS".to_string()))?;

        let create_if_missing: bool = lookup("VENTAS_DB_CREATE")
            .unwrap_or_else(|| "true".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("VENTAS_DB_CREATE".to_string()))?;

        if database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("VENTAS_DB_PATH".to_string()));
        }

        Ok(DbConfig::new(database_path)
            .busy_timeout(Duration::from_millis(busy_timeout_ms))
            .create_if_missing(create_if_missing))
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig::new(DEFAULT_DB_PATH)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
