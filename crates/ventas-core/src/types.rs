//! # Domain Types
//!
//! The one record of the sales module.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  Sale::new(...)          id = None     (only in memory)                │
//! │       │                                                                 │
//! │       ▼  insert                                                         │
//! │  Sale { id: Some(7) }    id assigned by the database, never changes    │
//! │       │                                                                 │
//! │       ├── fetch_by_id(7)   → fresh snapshot                             │
//! │       ├── mutate + update  → matched by id                              │
//! │       ▼                                                                 │
//! │  delete_by_id(7)         row gone, in-memory copy is stale             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! JSON keys follow the REST contract of the sales module:
//! `id`, `fechaVenta`, `clienteNombre`, `totalVenta`, `estado`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Sale
// =============================================================================

/// One sales transaction (one row of the `Ventas` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Storage-assigned identifier. `None` until the sale is inserted.
    #[serde(default)]
    id: Option<i64>,

    /// Calendar date of the sale.
    #[serde(rename = "fechaVenta")]
    pub date: NaiveDate,

    /// Customer name (at most 100 characters).
    #[serde(rename = "clienteNombre")]
    pub customer_name: String,

    /// Sale amount.
    #[serde(rename = "totalVenta")]
    pub total: f64,

    /// Free-text status label ("Pendiente", "Pagada", "Enviada", ...).
    #[serde(rename = "estado")]
    pub status: String,
}

impl Sale {
    /// Creates a sale that has not been stored yet.
    pub fn new(
        date: NaiveDate,
        customer_name: impl Into<String>,
        total: f64,
        status: impl Into<String>,
    ) -> Self {
        Sale {
            id: None,
            date,
            customer_name: customer_name.into(),
            total,
            status: status.into(),
        }
    }

    /// Creates a sale as read back from storage.
    pub fn with_id(
        id: i64,
        date: NaiveDate,
        customer_name: impl Into<String>,
        total: f64,
        status: impl Into<String>,
    ) -> Self {
        Sale {
            id: Some(id),
            ..Sale::new(date, customer_name, total, status)
        }
    }

    /// Returns the storage identifier, if assigned.
    #[inline]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// True once the sale has been inserted.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Records the identifier handed out by the database.
    ///
    /// Called by the repository right after a successful insert. The id is
    /// immutable afterwards: a second call is ignored and returns `false`.
    pub fn assign_id(&mut self, id: i64) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id);
        true
    }

    /// Overwrites the fields present in `changes`.
    pub fn apply(&mut self, changes: SaleChanges) {
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(customer_name) = changes.customer_name {
            self.customer_name = customer_name;
        }
        if let Some(total) = changes.total {
            self.total = total;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}

impl fmt::Display for Sale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Sale [ID={}", id)?,
            None => write!(f, "Sale [ID=-")?,
        }
        write!(
            f,
            ", Date={}, Customer='{}', Total={:.2}, Status={}]",
            self.date, self.customer_name, self.total, self.status
        )
    }
}

// =============================================================================
// Sale Changes
// =============================================================================

/// Partial update of a sale, as sent by a REST client.
///
/// Only `SaleRepository::try_update_with_date` persists a changed `date`;
/// the plain update keeps the stored one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleChanges {
    pub date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub total: Option<f64>,
    pub status: Option<String>,
}

impl SaleChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.customer_name.is_none()
            && self.total.is_none()
            && self.status.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
