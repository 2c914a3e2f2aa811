//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├── try_* methods: returned to the caller                        │
//! │       │                                                                 │
//! │       └── quiet methods: logged, turned into false / None / []         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row matched an id-targeted operation.
    ///
    /// ## When This Occurs
    /// - `update` or `delete` of an id that does not exist
    /// - `update` of a sale that was never inserted
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Insert of a sale that already carries a storage id.
    #[error("Sale {id} is already persisted")]
    AlreadyPersisted { id: i64 },

    /// The database could not be opened or the session broke.
    ///
    /// ## When This Occurs
    /// - Database file missing and `create_if_missing` is off
    /// - Directory does not exist or is not writable
    /// - I/O failure while talking to the database
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The database rejected a statement.
    ///
    /// ## When This Occurs
    /// - CHECK / NOT NULL constraint violation (e.g. customer name too long)
    /// - Missing table (schema not bootstrapped)
    /// - Write that affected no rows where one was expected
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Internal database error (row decoding and other driver failures).
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True for [`DbError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound                 → DbError::NotFound
/// sqlx::Error::Database                    → DbError::QueryFailed
/// sqlx::Error::Io / Tls / Configuration    → DbError::ConnectionFailed
/// Other                                    → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Sale", "unknown"),

            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
                DbError::ConnectionFailed(err.to_string())
            }

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
