//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::process_model::ProcessModel;
use crate::application::forecast::Forecaster;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::model::DemandModel;

/// Build the demand model from configuration.
pub fn build_model(config: &Config) -> Arc<dyn DemandModel> {
    info!(
        program = %config.model.program,
        args = ?config.model.args,
        timeout_secs = config.model.timeout_secs,
        "Using external process model"
    );
    Arc::new(ProcessModel::from_config(&config.model))
}

/// Build the forecaster with the configured model and timeout.
pub fn build_forecaster(config: &Config) -> Forecaster {
    Forecaster::new(build_model(config), config.model.timeout())
}
