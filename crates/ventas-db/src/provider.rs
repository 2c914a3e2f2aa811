//! # Connection Provider
//!
//! Opens a fresh SQLite session for every repository operation.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Connection Per Operation                         │
//! │                                                                         │
//! │  DbConfig::new(path)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ConnectionProvider::new(config)  ← builds options, does NOT connect   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repo.fetch_by_id(1)                                                   │
//! │       ├── acquire()   → new SqliteConnection                           │
//! │       ├── SELECT ... WHERE id_venta = ?1                               │
//! │       └── release()   → connection closed                              │
//! │                                                                         │
//! │  repo.list_all()                                                       │
//! │       ├── acquire()   → another new SqliteConnection                   │
//! │       ├── SELECT ... ORDER BY fecha_venta DESC                         │
//! │       └── release()                                                    │
//! │                                                                         │
//! │  Nothing survives between operations.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A connection that is dropped without [`ConnectionProvider::release`]
//! (early return, panic) is still closed by its `Drop` impl.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{Connection, SqliteConnection};
use tracing::{debug, info, warn};

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::repository::sale::SaleRepository;

/// Hands out new database sessions.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: DbConfig,
    options: SqliteConnectOptions,
}

impl ConnectionProvider {
    /// Creates a provider for the configured database.
    ///
    /// No session is opened here; a bad path only surfaces on the first
    /// [`acquire`](Self::acquire).
    pub fn new(config: DbConfig) -> DbResult<Self> {
        if config.database_path.as_os_str().is_empty() {
            return Err(DbError::ConnectionFailed(
                "database path is empty".to_string(),
            ));
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(config.create_if_missing)
            .busy_timeout(config.busy_timeout)
            // WAL: readers don't block the single writer
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        info!(
            path = %config.database_path.display(),
            "Connection provider configured"
        );

        Ok(ConnectionProvider { config, options })
    }

    /// Returns the configuration this provider was built from.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Opens a new session.
    ///
    /// ## Returns
    /// * `Ok(SqliteConnection)` - Exclusively owned by the caller
    /// * `Err(DbError::ConnectionFailed)` - File missing, unreadable, or not a database
    pub async fn acquire(&self) -> DbResult<SqliteConnection> {
        debug!(path = %self.config.database_path.display(), "Opening connection");

        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))
    }

    /// Closes a session obtained from [`acquire`](Self::acquire).
    ///
    /// Close failures are logged; the operation result is already decided
    /// at this point.
    pub async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close connection cleanly");
        } else {
            debug!("Connection closed");
        }
    }

    /// Checks if the database can be opened and queried.
    pub async fn health_check(&self) -> bool {
        let mut conn = match self.acquire().await {
            Ok(conn) => conn,
            Err(_) => return false,
        };

        let ok = sqlx::query("SELECT 1").execute(&mut conn).await.is_ok();
        self.release(conn).await;
        ok
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
