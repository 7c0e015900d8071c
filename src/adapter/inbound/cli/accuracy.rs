//! Handler for the `accuracy` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::AccuracyArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::csv_files::load_prediction_history;
use crate::application::accuracy::AccuracyStats;
use crate::error::Result;

#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Predicted")]
    predicted: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
}

/// Execute `accuracy`.
pub fn execute(args: &AccuracyArgs) -> Result<()> {
    let history = load_prediction_history(&args.history)?;
    let stats = AccuracyStats::from_history(&history);

    if output::is_json() {
        let predictions: Vec<_> = history
            .iter()
            .map(|record| {
                json!({
                    "item_id": record.item_id,
                    "period": record.period,
                    "predicted": record.predicted,
                    "actual": record.actual,
                    "accuracy": record.accuracy(),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "accuracy",
            "stats": stats,
            "predictions": predictions,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));

    if output::verbosity() > 0 && !history.is_empty() {
        let rows = history.iter().map(|record| PredictionRow {
            item: record.item_id.clone(),
            period: record.period.clone(),
            predicted: record.predicted.to_string(),
            actual: record.actual.map_or_else(|| "-".into(), |a| a.to_string()),
            accuracy: record
                .accuracy()
                .map_or_else(|| "-".into(), |a| format!("{a}%")),
        });
        output::section("Predictions");
        output::lines(&Table::new(rows).to_string());
    }

    output::section("Accuracy");
    output::field("Predictions", stats.total_predictions);
    output::field("With actual", stats.predictions_with_actual);
    output::field(
        "Average",
        stats
            .average_accuracy
            .map_or_else(|| "-".into(), |a| format!("{a}%")),
    );
    output::field("Completion", format!("{}%", stats.completion_rate));
    Ok(())
}
