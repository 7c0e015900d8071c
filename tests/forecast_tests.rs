use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use stocklens::application::accuracy::{AccuracyStats, PredictionRecord};
use stocklens::application::forecast::{
    daily_confidence, monthly_confidence, prepare_daily_lags, prepare_monthly_lag, Forecaster,
};
use stocklens::domain::{OutgoingRecord, Period, YearMonth};
use stocklens::error::{Error, Insufficiency, ModelError, Result};
use stocklens::port::outbound::model::{DemandModel, ModelOutput, ModelRequest};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn out(item: &str, day: NaiveDate, quantity: Decimal) -> OutgoingRecord {
    OutgoingRecord::new(item, day, "Ani", quantity)
}

/// Records every request and answers with a fixed prediction.
struct RecordingModel {
    prediction: Decimal,
    requests: Mutex<Vec<ModelRequest>>,
}

impl RecordingModel {
    fn new(prediction: Decimal) -> Arc<Self> {
        Arc::new(Self {
            prediction,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DemandModel for RecordingModel {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn predict(&self, request: &ModelRequest) -> Result<ModelOutput> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(ModelOutput::new(self.prediction))
    }
}

struct FailingModel;

#[async_trait]
impl DemandModel for FailingModel {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn predict(&self, _request: &ModelRequest) -> Result<ModelOutput> {
        Err(ModelError::Exit {
            code: Some(1),
            output: "Traceback: model file missing".to_string(),
        }
        .into())
    }
}

fn forecaster(model: Arc<dyn DemandModel>) -> Forecaster {
    Forecaster::new(model, Duration::from_secs(5))
}

#[tokio::test]
async fn two_days_of_history_is_insufficient_for_daily_forecast() {
    let today = date(2025, 3, 10);
    let history = vec![
        out("Rice", date(2025, 3, 9), dec!(4)),
        out("Rice", date(2025, 3, 8), dec!(2)),
    ];
    let model = RecordingModel::new(dec!(7));

    let result = forecaster(model.clone())
        .forecast("Rice", &history, Period::Daily, today)
        .await;

    assert!(matches!(
        result,
        Err(Error::Insufficient(Insufficiency::DailyHistory { days: 2 }))
    ));
    assert!(model.requests().is_empty());
}

#[tokio::test]
async fn monthly_forecast_uses_previous_month_total() {
    let today = date(2025, 3, 10);
    let history = vec![
        out("Rice", date(2025, 2, 3), dec!(12)),
        out("Rice", date(2025, 2, 17), dec!(18)),
        out("Rice", date(2025, 3, 1), dec!(100)),
        out("Oil", date(2025, 2, 5), dec!(40)),
    ];
    let model = RecordingModel::new(dec!(33));

    let result = forecaster(model.clone())
        .forecast("Rice", &history, Period::Monthly, today)
        .await
        .unwrap();

    assert_eq!(result.lags.values(), &[dec!(30)]);
    assert!((result.confidence - 0.75).abs() < f64::EPSILON);
    assert_eq!(result.prediction, dec!(33));
    assert_eq!(result.period_start, date(2025, 3, 1));
    assert_eq!(result.period_end, date(2025, 3, 31));
    assert_eq!(result.target_month, YearMonth::try_new(2025, 4).unwrap());

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].item_id, "Rice");
    assert_eq!(requests[0].period, Period::Monthly);
}

#[tokio::test]
async fn daily_forecast_sends_lags_most_recent_first() {
    let today = date(2025, 3, 10);
    let history = vec![
        out("Rice", date(2025, 3, 7), dec!(3)),
        out("Rice", date(2025, 3, 8), dec!(5)),
        out("Rice", date(2025, 3, 9), dec!(2)),
        out("Rice", date(2025, 3, 9), dec!(2)),
        out("Rice", date(2025, 3, 10), dec!(50)),
    ];
    let model = RecordingModel::new(dec!(4));

    let result = forecaster(model.clone())
        .forecast("Rice", &history, Period::Daily, today)
        .await
        .unwrap();

    assert_eq!(result.lags.values(), &[dec!(4), dec!(5), dec!(3)]);
    assert_eq!(result.period_start, today);
    assert_eq!(result.period_end, today);
    assert!(result.confidence >= 0.3 && result.confidence <= 0.95);
    assert_eq!(model.requests()[0].lags, result.lags);
}

#[tokio::test]
async fn model_failure_is_not_a_zero_prediction() {
    let today = date(2025, 3, 10);
    let history = vec![out("Rice", date(2025, 2, 3), dec!(12))];

    let result = forecaster(Arc::new(FailingModel))
        .forecast("Rice", &history, Period::Monthly, today)
        .await;

    match result {
        Err(Error::Model(err)) => {
            assert_eq!(err.output(), Some("Traceback: model file missing"));
        }
        other => panic!("expected model error, got {other:?}"),
    }
}

#[test]
fn daily_window_ignores_days_outside_it() {
    let today = date(2025, 3, 10);
    let history = vec![
        out("Rice", date(2025, 3, 1), dec!(9)),
        out("Rice", date(2025, 3, 2), dec!(9)),
        out("Rice", date(2025, 3, 9), dec!(1)),
    ];

    assert_eq!(
        prepare_daily_lags(&history, today),
        Err(Insufficiency::DailyHistory { days: 1 })
    );
}

#[test]
fn empty_previous_month_is_insufficient() {
    let history = vec![out("Rice", date(2025, 3, 2), dec!(9))];
    assert_eq!(
        prepare_monthly_lag(&history, date(2025, 3, 10)),
        Err(Insufficiency::PreviousMonth {
            month: "2025-02".to_string()
        })
    );
}

#[tokio::test]
async fn negative_previous_month_total_does_not_reach_the_model() {
    let today = date(2025, 3, 10);
    let history = vec![out("Rice", date(2025, 2, 14), dec!(-8))];
    let model = RecordingModel::new(dec!(7));

    let result = forecaster(model.clone())
        .forecast("Rice", &history, Period::Monthly, today)
        .await;

    assert!(matches!(
        result,
        Err(Error::Insufficient(Insufficiency::PreviousMonth { .. }))
    ));
    assert!(model.requests().is_empty());
}

#[test]
fn previous_month_wraps_the_year() {
    let history = vec![out("Rice", date(2024, 12, 20), dec!(6))];
    assert_eq!(prepare_monthly_lag(&history, date(2025, 1, 5)), Ok(dec!(6)));
}

#[test]
fn confidence_bounds() {
    assert!((daily_confidence(&[dec!(5), dec!(5), dec!(5)]) - 0.95).abs() < f64::EPSILON);
    assert!((daily_confidence(&[dec!(0), dec!(0), dec!(30)]) - 0.3).abs() < f64::EPSILON);
    assert!((daily_confidence(&[dec!(-1), dec!(-1), dec!(-1)]) - 0.3).abs() < f64::EPSILON);
    assert!((daily_confidence(&[]) - 0.5).abs() < f64::EPSILON);

    assert!((monthly_confidence(dec!(51)) - 0.85).abs() < f64::EPSILON);
    assert!((monthly_confidence(dec!(50)) - 0.75).abs() < f64::EPSILON);
    assert!((monthly_confidence(dec!(20)) - 0.65).abs() < f64::EPSILON);
    assert!((monthly_confidence(dec!(5)) - 0.55).abs() < f64::EPSILON);
}

#[test]
fn accuracy_stats_from_history() {
    let history = vec![
        PredictionRecord {
            item_id: "Rice".to_string(),
            period: "monthly".to_string(),
            predicted: dec!(40),
            actual: Some(dec!(50)),
        },
        PredictionRecord {
            item_id: "Oil".to_string(),
            period: "daily".to_string(),
            predicted: dec!(3),
            actual: None,
        },
    ];

    let stats = AccuracyStats::from_history(&history);
    assert_eq!(stats.total_predictions, 2);
    assert_eq!(stats.predictions_with_actual, 1);
    assert_eq!(stats.average_accuracy, Some(dec!(80.00)));
    assert_eq!(stats.completion_rate, dec!(50.00));
}
