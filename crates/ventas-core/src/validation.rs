//! # Input Binding
//!
//! Converts untyped input (JSON request bodies) into the typed fields of a
//! `Sale`. Only presence and parseability are checked; anything the type
//! system accepts is passed through and the storage schema has the last
//! word.
//!
//! ## Usage
//! ```rust
//! use ventas_core::validation::{parse_sale_date, parse_total};
//!
//! let date = parse_sale_date("2025-10-15").unwrap();
//! let total = parse_total(&serde_json::json!("150.50")).unwrap();
//! assert_eq!(total, 150.5);
//! # let _ = date;
//! ```

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// JSON key of the sale date.
pub const FIELD_DATE: &str = "fechaVenta";
/// JSON key of the customer name.
pub const FIELD_CUSTOMER: &str = "clienteNombre";
/// JSON key of the sale total.
pub const FIELD_TOTAL: &str = "totalVenta";
/// JSON key of the status label.
pub const FIELD_STATUS: &str = "estado";

/// Unwraps a required field.
pub fn require<T>(field: &str, value: Option<T>) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::required(field))
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
///
/// ## Example
/// ```rust
/// use ventas_core::validation::parse_sale_date;
///
/// assert!(parse_sale_date("2025-10-15").is_ok());
/// assert!(parse_sale_date("15/10/2025").is_err());
/// ```
pub fn parse_sale_date(raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::invalid_format(FIELD_DATE, "use YYYY-MM-DD"))
}

/// Reads a sale total from a JSON number or a numeric string.
pub fn parse_total(raw: &Value) -> ValidationResult<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::invalid_format(FIELD_TOTAL, "must be a valid number"))
}

// =============================================================================
// Unit Tests
// =============================================================================
