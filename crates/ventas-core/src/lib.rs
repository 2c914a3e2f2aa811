//! # ventas-core: The Sale Record
//!
//! Pure types for the sales module. Nothing in this crate touches a
//! database, a socket or the file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ventas Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              ventas-api (REST)  /  demo binary                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ventas-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌───────────┐                 │   │
//! │  │   │   types   │  │ validation  │  │   error   │                 │   │
//! │  │   │   Sale    │  │ input bind  │  │ Validation│                 │   │
//! │  │   └───────────┘  └─────────────┘  └───────────┘                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ventas-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The `Sale` record and `SaleChanges`
//! - [`validation`] - Binding untyped input (JSON) to typed fields
//! - [`error`] - Binding errors
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ventas_core::Sale;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
//! let sale = Sale::new(date, "Sofía Rodríguez", 150.50, "Pendiente");
//!
//! // Not stored yet: the id is assigned by the database on insert
//! assert!(!sale.is_persisted());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::{Sale, SaleChanges};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of `Sale::customer_name`, enforced by the storage schema.
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Maximum length of `Sale::status`, enforced by the storage schema.
pub const MAX_STATUS_LEN: usize = 50;
