//! External demand model port.
//!
//! The point forecast itself comes from a model outside the core (a separate
//! process, a service, or an in-process model). The core prepares lag values
//! and scores confidence; the model turns lags into a number.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Lags, Period};
use crate::error::Result;

/// Input handed to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRequest {
    /// Item identifier understood by the model (item code or name).
    pub item_id: String,
    pub period: Period,
    pub lags: Lags,
}

/// Model answer with optional timing metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOutput {
    pub prediction: Decimal,
    pub execution_time_ms: Option<f64>,
    pub model_time_ms: Option<f64>,
}

impl ModelOutput {
    /// A bare prediction without timing metadata.
    #[must_use]
    pub fn new(prediction: Decimal) -> Self {
        Self {
            prediction,
            execution_time_ms: None,
            model_time_ms: None,
        }
    }
}

/// Point-forecast model.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Errors
///
/// [`predict`](Self::predict) fails with [`crate::error::ModelError`] when the
/// backend cannot be reached, exits abnormally, or returns output that cannot
/// be parsed. A failed call never turns into a zero prediction.
#[async_trait]
pub trait DemandModel: Send + Sync {
    /// Return the model name for logging.
    fn name(&self) -> &'static str;

    /// Produce a point forecast for the given lags.
    async fn predict(&self, request: &ModelRequest) -> Result<ModelOutput>;
}
