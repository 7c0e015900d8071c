//! Handler for the `forecast` command.

use chrono::Local;
use serde_json::json;

use crate::adapter::inbound::cli::command::ForecastArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::csv_files::CsvRecordSource;
use crate::domain::Period;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::build_forecaster;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::source::RecordSource;

/// Execute `forecast`.
///
/// Insufficient history is reported as a warning, not a failure.
pub async fn execute(args: &ForecastArgs, config: &Config) -> Result<()> {
    let records = CsvRecordSource::new(&args.records).load()?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let period: Period = args.period.into();

    let forecaster = build_forecaster(config);
    let result = match forecaster.forecast(&args.item, &records, period, today).await {
        Ok(result) => result,
        Err(Error::Insufficient(reason)) => {
            if output::is_json() {
                output::json_output(json!({
                    "command": "forecast",
                    "item": args.item,
                    "period": period,
                    "insufficient": reason.to_string(),
                }));
            } else {
                output::warning(&format!("{}: {reason}", args.item));
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "forecast",
            "forecast": result,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Forecast");
    output::field("Item", &result.item_id);
    output::field("Period", result.period);
    if result.period_start == result.period_end {
        output::field("Date", result.period_start);
    } else {
        output::field(
            "Range",
            format!("{} to {}", result.period_start, result.period_end),
        );
    }
    let lags: Vec<String> = result.lags.values().iter().map(ToString::to_string).collect();
    output::field("Lags", lags.join(", "));
    output::field("Prediction", output::highlight(result.prediction));
    output::field("Confidence", format!("{:.0}%", result.confidence * 100.0));
    output::field("Target month", result.target_month);
    if let Some(ms) = result.execution_time_ms {
        output::field("Execution", format!("{ms:.1} ms"));
    }
    if let Some(ms) = result.model_time_ms {
        output::field("Model time", format!("{ms:.1} ms"));
    }
    Ok(())
}
