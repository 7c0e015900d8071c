//! Demand forecasting: lag preparation, confidence scoring and model calls.
//!
//! The point estimate comes from an injected [`DemandModel`]. This module
//! only prepares the lag features, bounds the model call with a timeout and
//! scores how much the lags can be trusted.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::{DailyLags, ForecastResult, Lags, OutgoingRecord, Period, YearMonth};
use crate::error::{Insufficiency, ModelError, Result};
use crate::port::outbound::model::{DemandModel, ModelRequest};

/// Number of trailing days a daily forecast needs.
pub const DAILY_WINDOW: u64 = 3;

const CONFIDENCE_FLOOR: f64 = 0.3;
const CONFIDENCE_CEILING: f64 = 0.95;
const CONFIDENCE_WITHOUT_LAGS: f64 = 0.5;

/// Daily totals for the three days before `today`, most recent first.
///
/// Every day from `today - 3` through `today - 1` must carry at least one
/// record; quantities of the same day are summed.
///
/// # Errors
///
/// Returns [`Insufficiency::DailyHistory`] when fewer than three of those
/// days have data. Missing days are never filled with zero.
pub fn prepare_daily_lags(
    history: &[OutgoingRecord],
    today: NaiveDate,
) -> std::result::Result<DailyLags, Insufficiency> {
    let start = today.checked_sub_days(Days::new(DAILY_WINDOW));
    let end = today.checked_sub_days(Days::new(1));
    let (Some(start), Some(end)) = (start, end) else {
        return Err(Insufficiency::DailyHistory { days: 0 });
    };

    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in history.iter().filter(|r| r.date >= start && r.date <= end) {
        *totals.entry(record.date).or_default() += record.quantity;
    }

    let mut recent = totals.values().rev().copied();
    match (recent.next(), recent.next(), recent.next()) {
        (Some(lag1), Some(lag2), Some(lag3)) => Ok(DailyLags { lag1, lag2, lag3 }),
        _ => Err(Insufficiency::DailyHistory { days: totals.len() }),
    }
}

/// Total quantity of the calendar month before `today`.
///
/// # Errors
///
/// Returns [`Insufficiency::PreviousMonth`] when that total is not positive.
pub fn prepare_monthly_lag(
    history: &[OutgoingRecord],
    today: NaiveDate,
) -> std::result::Result<Decimal, Insufficiency> {
    let month = YearMonth::of(today).previous();
    let total: Decimal = history
        .iter()
        .filter(|r| month.contains(r.date))
        .map(|r| r.quantity)
        .sum();

    if total <= Decimal::ZERO {
        return Err(Insufficiency::PreviousMonth {
            month: month.to_string(),
        });
    }
    Ok(total)
}

/// Confidence from the spread of daily lags.
///
/// `clamp(1 - std / (mean + 1), 0.3, 0.95)` with the population standard
/// deviation. An empty slice scores 0.5; a spread that cannot be computed
/// (a non-positive `mean + 1`) scores the floor.
#[must_use]
pub fn daily_confidence(lags: &[Decimal]) -> f64 {
    if lags.is_empty() {
        return CONFIDENCE_WITHOUT_LAGS;
    }
    let values: Vec<f64> = lags.iter().filter_map(ToPrimitive::to_f64).collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let coefficient = variance.sqrt() / (mean + 1.0);
    if !coefficient.is_finite() || mean + 1.0 <= 0.0 {
        return CONFIDENCE_FLOOR;
    }
    (1.0 - coefficient).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}

/// Confidence from the previous month's total.
#[must_use]
pub fn monthly_confidence(prev_month_total: Decimal) -> f64 {
    if prev_month_total > Decimal::from(50) {
        0.85
    } else if prev_month_total > Decimal::from(20) {
        0.75
    } else if prev_month_total > Decimal::from(5) {
        0.65
    } else {
        0.55
    }
}

/// Forecasting service: lags in, model prediction and confidence out.
pub struct Forecaster {
    model: Arc<dyn DemandModel>,
    timeout: Duration,
}

impl Forecaster {
    #[must_use]
    pub fn new(model: Arc<dyn DemandModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Forecast demand for `item_id` from its outgoing history.
    ///
    /// `history` may contain other items; only records whose item name equals
    /// `item_id` are used.
    ///
    /// # Errors
    ///
    /// Returns [`Insufficiency`] when the history cannot support the
    /// requested period (the model is not called), or [`ModelError`] when the
    /// model fails or exceeds the timeout.
    pub async fn forecast(
        &self,
        item_id: &str,
        history: &[OutgoingRecord],
        period: Period,
        today: NaiveDate,
    ) -> Result<ForecastResult> {
        let item_history: Vec<OutgoingRecord> = history
            .iter()
            .filter(|r| r.item_name == item_id)
            .cloned()
            .collect();

        let current = YearMonth::of(today);
        let (lags, confidence, period_start, period_end, target_month) = match period {
            Period::Daily => {
                let daily = prepare_daily_lags(&item_history, today).map_err(|e| {
                    warn!(item = item_id, error = %e, "Daily forecast skipped");
                    e
                })?;
                let lags = daily.to_lags();
                let confidence = daily_confidence(lags.values());
                (lags, confidence, today, today, current)
            }
            Period::Monthly => {
                let total = prepare_monthly_lag(&item_history, today).map_err(|e| {
                    warn!(item = item_id, error = %e, "Monthly forecast skipped");
                    e
                })?;
                (
                    Lags::monthly(total),
                    monthly_confidence(total),
                    current.first_day(),
                    current.last_day(),
                    current.next(),
                )
            }
        };

        let request = ModelRequest {
            item_id: item_id.to_string(),
            period,
            lags,
        };

        let output = tokio::time::timeout(self.timeout, self.model.predict(&request))
            .await
            .map_err(|_| ModelError::Timeout {
                after: self.timeout,
            })??;

        info!(
            item = item_id,
            %period,
            model = self.model.name(),
            prediction = %output.prediction,
            confidence,
            "Forecast complete"
        );

        Ok(ForecastResult {
            item_id: request.item_id,
            period,
            lags: request.lags,
            prediction: output.prediction,
            confidence,
            period_start,
            period_end,
            target_month,
            execution_time_ms: output.execution_time_ms,
            model_time_ms: output.model_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::port::outbound::model::ModelOutput;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn sale(item: &str, m: u32, d: u32, qty: Decimal) -> OutgoingRecord {
        OutgoingRecord::new(item, date(m, d), "Ani", qty)
    }

    struct FixedModel {
        prediction: Decimal,
        calls: AtomicUsize,
    }

    impl FixedModel {
        fn new(prediction: Decimal) -> Arc<Self> {
            Arc::new(Self {
                prediction,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl DemandModel for FixedModel {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn predict(&self, _request: &ModelRequest) -> Result<ModelOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ModelOutput::new(self.prediction))
        }
    }

    struct SlowModel;

    #[async_trait]
    impl DemandModel for SlowModel {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn predict(&self, _request: &ModelRequest) -> Result<ModelOutput> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(ModelOutput::new(dec!(1)))
        }
    }

    #[test]
    fn daily_lags_are_most_recent_first() {
        let history = vec![
            sale("Rice", 1, 7, dec!(4)),
            sale("Rice", 1, 8, dec!(2)),
            sale("Rice", 1, 8, dec!(3)),
            sale("Rice", 1, 9, dec!(6)),
            sale("Rice", 1, 10, dec!(99)),
        ];
        let lags = prepare_daily_lags(&history, date(1, 10)).unwrap();
        assert_eq!(lags.lag1, dec!(6));
        assert_eq!(lags.lag2, dec!(5));
        assert_eq!(lags.lag3, dec!(4));
    }

    #[test]
    fn two_days_of_history_is_insufficient() {
        let history = vec![sale("Rice", 1, 8, dec!(2)), sale("Rice", 1, 9, dec!(6))];
        assert_eq!(
            prepare_daily_lags(&history, date(1, 10)),
            Err(Insufficiency::DailyHistory { days: 2 })
        );
    }

    #[test]
    fn days_outside_the_window_do_not_count() {
        let history = vec![
            sale("Rice", 1, 2, dec!(2)),
            sale("Rice", 1, 8, dec!(2)),
            sale("Rice", 1, 9, dec!(6)),
        ];
        assert!(prepare_daily_lags(&history, date(1, 10)).is_err());
    }

    #[test]
    fn monthly_lag_sums_previous_month() {
        let history = vec![
            sale("Rice", 1, 3, dec!(10)),
            sale("Rice", 1, 31, dec!(20)),
            sale("Rice", 2, 1, dec!(7)),
        ];
        assert_eq!(prepare_monthly_lag(&history, date(2, 14)), Ok(dec!(30)));
    }

    #[test]
    fn empty_previous_month_is_insufficient() {
        let history = vec![sale("Rice", 2, 1, dec!(7))];
        assert_eq!(
            prepare_monthly_lag(&history, date(2, 14)),
            Err(Insufficiency::PreviousMonth {
                month: "2025-01".to_string()
            })
        );
    }

    #[test]
    fn negative_previous_month_total_is_insufficient() {
        let history = vec![sale("Rice", 1, 10, dec!(-8))];
        assert_eq!(
            prepare_monthly_lag(&history, date(2, 14)),
            Err(Insufficiency::PreviousMonth {
                month: "2025-01".to_string()
            })
        );
    }

    #[test]
    fn monthly_confidence_breakpoints() {
        assert_eq!(monthly_confidence(dec!(51)), 0.85);
        assert_eq!(monthly_confidence(dec!(50)), 0.75);
        assert_eq!(monthly_confidence(dec!(30)), 0.75);
        assert_eq!(monthly_confidence(dec!(20)), 0.65);
        assert_eq!(monthly_confidence(dec!(6)), 0.65);
        assert_eq!(monthly_confidence(dec!(5)), 0.55);
    }

    #[test]
    fn daily_confidence_is_clamped() {
        assert_eq!(daily_confidence(&[dec!(5), dec!(5), dec!(5)]), 0.95);
        assert_eq!(daily_confidence(&[dec!(0), dec!(0), dec!(100)]), 0.3);

        // mean 2, population std sqrt(2/3): 1 - 0.8165 / 3 = 0.7278
        let mid = daily_confidence(&[dec!(1), dec!(2), dec!(3)]);
        assert!((mid - 0.7278).abs() < 1e-3);
    }

    #[test]
    fn daily_confidence_without_lags() {
        assert_eq!(daily_confidence(&[]), 0.5);
    }

    #[test]
    fn daily_confidence_is_never_nan() {
        let score = daily_confidence(&[dec!(-1), dec!(-1), dec!(-1)]);
        assert_eq!(score, 0.3);
        let score = daily_confidence(&[dec!(-5), dec!(-2), dec!(-3)]);
        assert_eq!(score, 0.3);
    }

    #[tokio::test]
    async fn monthly_forecast_targets_next_month() {
        let model = FixedModel::new(dec!(42));
        let forecaster = Forecaster::new(model.clone(), Duration::from_secs(5));
        let history = vec![sale("Rice", 1, 3, dec!(30)), sale("Oil", 1, 3, dec!(500))];

        let result = forecaster
            .forecast("Rice", &history, Period::Monthly, date(2, 14))
            .await
            .unwrap();

        assert_eq!(result.prediction, dec!(42));
        assert_eq!(result.lags.values(), [dec!(30)]);
        assert_eq!(result.confidence, 0.75);
        assert_eq!(result.period_start, date(2, 1));
        assert_eq!(result.period_end, date(2, 28));
        assert_eq!(result.target_month.to_string(), "2025-03");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn insufficient_history_skips_the_model() {
        let model = FixedModel::new(dec!(42));
        let forecaster = Forecaster::new(model.clone(), Duration::from_secs(5));
        let history = vec![sale("Rice", 1, 9, dec!(3))];

        let err = forecaster
            .forecast("Rice", &history, Period::Daily, date(1, 10))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Insufficient(Insufficiency::DailyHistory { days: 1 })
        ));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn slow_model_times_out() {
        let forecaster = Forecaster::new(Arc::new(SlowModel), Duration::from_millis(20));
        let history = vec![sale("Rice", 1, 3, dec!(30))];

        let err = forecaster
            .forecast("Rice", &history, Period::Monthly, date(2, 14))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Model(ModelError::Timeout { after }) if after == Duration::from_millis(20)
        ));
        assert_eq!(err.to_string(), "model timed out after 20ms");
    }
}
