//! Prediction accuracy tracking.
//!
//! Stored predictions are compared with the actual quantity once it is known.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::percent::{round_half_up, RATIO_DP};

/// A stored prediction, optionally with the actual outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub item_id: String,
    #[serde(default)]
    pub period: String,
    pub predicted: Decimal,
    #[serde(default)]
    pub actual: Option<Decimal>,
}

impl PredictionRecord {
    /// Accuracy of this prediction, when the actual value is known.
    #[must_use]
    pub fn accuracy(&self) -> Option<Decimal> {
        self.actual.and_then(|actual| accuracy(self.predicted, actual))
    }
}

/// `max(0, (1 - |p - a| / max(p, a)) × 100)` rounded to 2 dp.
///
/// Returns `None` when nothing was predicted.
#[must_use]
pub fn accuracy(predicted: Decimal, actual: Decimal) -> Option<Decimal> {
    if predicted.is_zero() {
        return None;
    }
    let scale = predicted.max(actual);
    if scale <= Decimal::ZERO {
        return Some(round_half_up(Decimal::ZERO, RATIO_DP));
    }
    let error = (predicted - actual).abs() / scale;
    let score = (Decimal::ONE - error) * Decimal::ONE_HUNDRED;
    Some(round_half_up(score.max(Decimal::ZERO), RATIO_DP))
}

/// Aggregate accuracy over a prediction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccuracyStats {
    pub total_predictions: usize,
    pub predictions_with_actual: usize,
    /// Mean accuracy over scored predictions, `None` if nothing was scored.
    pub average_accuracy: Option<Decimal>,
    /// Share of predictions with a known actual, in percent.
    pub completion_rate: Decimal,
}

impl AccuracyStats {
    #[must_use]
    pub fn from_history(history: &[PredictionRecord]) -> Self {
        let total_predictions = history.len();
        let predictions_with_actual = history.iter().filter(|r| r.actual.is_some()).count();

        let scores: Vec<Decimal> = history.iter().filter_map(PredictionRecord::accuracy).collect();
        let average_accuracy = (!scores.is_empty()).then(|| {
            let sum: Decimal = scores.iter().sum();
            round_half_up(sum / Decimal::from(scores.len()), RATIO_DP)
        });

        let completion_rate = if total_predictions == 0 {
            round_half_up(Decimal::ZERO, RATIO_DP)
        } else {
            let pct = Decimal::from(predictions_with_actual * 100) / Decimal::from(total_predictions);
            round_half_up(pct, RATIO_DP)
        };

        Self {
            total_predictions,
            predictions_with_actual,
            average_accuracy,
            completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(predicted: Decimal, actual: Option<Decimal>) -> PredictionRecord {
        PredictionRecord {
            item_id: "Rice".to_string(),
            period: "monthly".to_string(),
            predicted,
            actual,
        }
    }

    #[test]
    fn accuracy_is_relative_to_larger_value() {
        assert_eq!(accuracy(dec!(100), dec!(80)), Some(dec!(80.00)));
        assert_eq!(accuracy(dec!(80), dec!(100)), Some(dec!(80.00)));
        assert_eq!(accuracy(dec!(3), dec!(3)), Some(dec!(100.00)));
        assert_eq!(accuracy(dec!(3), dec!(0)), Some(dec!(0.00)));
    }

    #[test]
    fn zero_prediction_is_unscored() {
        assert_eq!(accuracy(dec!(0), dec!(10)), None);
    }

    #[test]
    fn stats_over_history() {
        let history = vec![
            record(dec!(100), Some(dec!(80))),
            record(dec!(50), Some(dec!(50))),
            record(dec!(10), None),
        ];
        let stats = AccuracyStats::from_history(&history);
        assert_eq!(stats.total_predictions, 3);
        assert_eq!(stats.predictions_with_actual, 2);
        assert_eq!(stats.average_accuracy, Some(dec!(90.00)));
        assert_eq!(stats.completion_rate, dec!(66.67));
    }

    #[test]
    fn empty_history() {
        let stats = AccuracyStats::from_history(&[]);
        assert_eq!(stats.total_predictions, 0);
        assert_eq!(stats.average_accuracy, None);
        assert!(stats.completion_rate.is_zero());
    }
}
