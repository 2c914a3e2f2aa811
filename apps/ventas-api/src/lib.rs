//! # Ventas API
//!
//! REST surface for the sales module.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Ventas API                                      │
//! │                                                                         │
//! │  HTTP client ───► axum Router (routes.rs) ───► SaleRepository          │
//! │                        │                            │                   │
//! │                        ▼                            ▼                   │
//! │                   ApiError (error.rs)          SQLite (Ventas)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `VENTAS_API_BIND` - Bind address (default: 127.0.0.1)
//! - `VENTAS_API_PORT` - HTTP port (default: 5000)
//! - `VENTAS_DB_PATH` - SQLite file (default: ventas.db)
//! - `VENTAS_DB_BUSY_TIMEOUT_MS` - Lock wait (default: 5000)

pub mod config;
pub mod error;
pub mod routes;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use routes::{router, AppState};
