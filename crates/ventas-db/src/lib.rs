//! # ventas-db: Database Layer for Ventas
//!
//! SQLite access for the sales module, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ventas Data Flow                                 │
//! │                                                                         │
//! │  REST handler / demo                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     ventas-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐    ┌────────────────┐   ┌──────────┐  │   │
//! │  │   │ ConnectionProvider │    │ SaleRepository │   │  schema  │  │   │
//! │  │   │   (provider.rs)    │◄───│   (sale.rs)    │   │ Ventas   │  │   │
//! │  │   │ one session / call │    │ CRUD + list    │   │ table    │  │   │
//! │  │   └────────────────────┘    └────────────────┘   └──────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (ventas.db)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Connection configuration
//! - [`provider`] - Per-operation connection acquisition
//! - [`schema`] - `Ventas` table bootstrap
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ventas_db::{schema, ConnectionProvider, DbConfig};
//!
//! let provider = ConnectionProvider::new(DbConfig::new("ventas.db"))?;
//! schema::ensure_schema(&provider).await?;
//!
//! let sales = provider.sales();
//! let all = sales.try_list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod provider;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use provider::ConnectionProvider;
pub use repository::sale::SaleRepository;
