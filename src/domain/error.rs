//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate inputs
//! at the boundary, before any mining or forecasting work begins.
//!
//! # Examples
//!
//! ```
//! use stocklens::domain::error::DomainError;
//! use stocklens::domain::Threshold;
//! use rust_decimal_macros::dec;
//!
//! let result = Threshold::try_new("min_support", dec!(120));
//! assert!(matches!(result, Err(DomainError::InvalidThreshold { .. })));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Percentage thresholds must lie within `[0, 100]`.
    #[error("{name} must be a percentage between 0 and 100, got {value}")]
    InvalidThreshold {
        /// Which threshold was rejected.
        name: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// Month numbers run from 1 to 12.
    #[error("invalid month {month} (expected 1-12)")]
    InvalidMonth { month: u32 },

    /// Month strings must look like `YYYY-MM`.
    #[error("invalid month '{input}' (expected YYYY-MM)")]
    MalformedMonth { input: String },

    /// Outgoing quantities cannot be negative.
    #[error("negative quantity {quantity} for '{item}' on {date}")]
    NegativeQuantity {
        item: String,
        date: NaiveDate,
        quantity: Decimal,
    },

    /// Lag sequences hold between one and three values.
    #[error("expected 1 to 3 lag values, got {count}")]
    LagCount { count: usize },
}
