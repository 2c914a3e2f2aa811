//! # Schema Bootstrap
//!
//! Creates the `Ventas` table when it does not exist yet.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Ventas                                                                 │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  id_venta        INTEGER  PRIMARY KEY AUTOINCREMENT                     │
//! │  fecha_venta     DATE     NOT NULL   (ISO text, sorts chronologically)  │
//! │  cliente_nombre  TEXT     NOT NULL   length <= 100                      │
//! │  total_venta     REAL     NOT NULL                                      │
//! │  estado          TEXT     NOT NULL   length <= 50                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is a one-statement bootstrap, not a migration system: there is no
//! version history and an existing table is left untouched.

use tracing::info;

use crate::error::DbResult;
use crate::provider::ConnectionProvider;

/// Name of the sales table.
pub const SALES_TABLE: &str = "Ventas";

/// DDL for the sales table.
const CREATE_SALES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Ventas (
    id_venta        INTEGER PRIMARY KEY AUTOINCREMENT,
    fecha_venta     DATE    NOT NULL,
    cliente_nombre  TEXT    NOT NULL CHECK (length(cliente_nombre) <= 100),
    total_venta     REAL    NOT NULL,
    estado          TEXT    NOT NULL CHECK (length(estado) <= 50)
)
"#;

/// Creates the `Ventas` table if it is missing.
///
/// ## Safety
/// Idempotent: safe to run on every startup.
pub async fn ensure_schema(provider: &ConnectionProvider) -> DbResult<()> {
    info!(table = SALES_TABLE, "Ensuring schema");

    let mut conn = provider.acquire().await?;
    let result = sqlx::query(CREATE_SALES_TABLE).execute(&mut conn).await;
    provider.release(conn).await;
    result?;

    Ok(())
}

/// Returns whether the `Ventas` table exists.
pub async fn schema_exists(provider: &ConnectionProvider) -> DbResult<bool> {
    let mut conn = provider.acquire().await?;
    let count: Result<i64, sqlx::Error> = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
    )
    .bind(SALES_TABLE)
    .fetch_one(&mut conn)
    .await;
    provider.release(conn).await;

    Ok(count? > 0)
}
