//! Percentage thresholds and the rounding rules applied to every metric.
//!
//! Support and confidence are percentages in `[0, 100]` rounded half-up to one
//! decimal place; lift is a plain ratio rounded half-up to two places. All
//! values are computed exactly from integer counts with [`Decimal`], so the
//! rounding step is the only place precision is lost.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::error::DomainError;

/// Decimal places kept for support and confidence percentages.
pub const PERCENT_DP: u32 = 1;

/// Decimal places kept for lift ratios.
pub const RATIO_DP: u32 = 2;

/// Round half-up to `dp` places and pin the scale so `50` renders as `50.0`.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

/// `count / total × 100`, rounded to one decimal place.
///
/// Returns zero when `total` is zero; callers short-circuit the empty case
/// before asking for a support value.
#[must_use]
pub fn support(count: usize, total: usize) -> Decimal {
    if total == 0 {
        return round_half_up(Decimal::ZERO, PERCENT_DP);
    }
    let pct = Decimal::from(count) * Decimal::ONE_HUNDRED / Decimal::from(total);
    round_half_up(pct, PERCENT_DP)
}

/// `numerator / denominator` for lift-style ratios, rounded to two places.
#[must_use]
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return round_half_up(Decimal::ZERO, RATIO_DP);
    }
    round_half_up(numerator / denominator, RATIO_DP)
}

/// A validated percentage threshold (minimum support or minimum confidence).
///
/// Thresholds are expressed on the same 0–100 scale as the metrics they gate;
/// `50` means fifty percent, never `0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Threshold(Decimal);

impl Threshold {
    /// Validate `value` as a percentage in `[0, 100]`.
    pub fn try_new(name: &'static str, value: Decimal) -> Result<Self, DomainError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(DomainError::InvalidThreshold { name, value });
        }
        Ok(Self(value))
    }

    /// The threshold as a percentage.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Whether a rounded metric meets this threshold (inclusive).
    #[must_use]
    pub fn is_met_by(self, metric: Decimal) -> bool {
        metric >= self.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
