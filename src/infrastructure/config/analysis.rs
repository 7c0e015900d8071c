//! Mining thresholds and basket grouping.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::aggregate::Grouping;
use crate::domain::Threshold;
use crate::error::Result;

/// Defaults used when a run does not pass its own thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum support percentage (0 to 100).
    ///
    /// Defaults to 50.
    #[serde(default = "default_min_support")]
    pub min_support: Decimal,

    /// Minimum confidence percentage (0 to 100).
    ///
    /// Defaults to 70.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: Decimal,

    /// How outgoing records are grouped into baskets.
    #[serde(default)]
    pub grouping: Grouping,
}

fn default_min_support() -> Decimal {
    Decimal::from(50)
}

fn default_min_confidence() -> Decimal {
    Decimal::from(70)
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_support: default_min_support(),
            min_confidence: default_min_confidence(),
            grouping: Grouping::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validated minimum support and minimum confidence.
    ///
    /// # Errors
    ///
    /// Returns a domain error if either value is outside `[0, 100]`.
    pub fn thresholds(&self) -> Result<(Threshold, Threshold)> {
        let min_support = Threshold::try_new("min_support", self.min_support)?;
        let min_confidence = Threshold::try_new("min_confidence", self.min_confidence)?;
        Ok((min_support, min_confidence))
    }
}
