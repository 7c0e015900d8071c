//! Handler for the `mine` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::{Algorithm, MineArgs, MiningArgs};
use crate::adapter::inbound::cli::{output, render};
use crate::adapter::outbound::csv_files::{load_catalog, CsvRecordSource};
use crate::application::aggregate::{
    available_dates, available_months, select, BasketFilter, Selection,
};
use crate::application::analysis::{run_apriori, run_fp_growth, Timed};
use crate::domain::Threshold;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::source::RecordSource;

/// Records, selection and thresholds resolved for one mining run.
pub(crate) struct MiningRun {
    pub selection: Selection,
    /// Filter choices present in the loaded records, for the fallback hint.
    pub available: Vec<String>,
    pub min_support: Threshold,
    pub min_confidence: Threshold,
}

/// Load records and resolve CLI overrides against the configured defaults.
pub(crate) fn prepare(args: &MiningArgs, config: &Config) -> Result<MiningRun> {
    let min_support = Threshold::try_new(
        "min_support",
        args.min_support.unwrap_or(config.analysis.min_support),
    )?;
    let min_confidence = Threshold::try_new(
        "min_confidence",
        args.min_confidence.unwrap_or(config.analysis.min_confidence),
    )?;
    let grouping = args.grouping.map_or(config.analysis.grouping, Into::into);

    let records = CsvRecordSource::new(&args.records).load()?;
    let selection = select(&records, args.filter(), grouping);
    let available = match selection.filter {
        BasketFilter::Month(_) => available_months(&records)
            .into_iter()
            .map(|m| m.to_string())
            .collect(),
        _ => available_dates(&records)
            .into_iter()
            .map(|d| d.to_string())
            .collect(),
    };

    Ok(MiningRun {
        selection,
        available,
        min_support,
        min_confidence,
    })
}

/// Report the selection and any fallback to all dates.
pub(crate) fn selection_summary(run: &MiningRun) {
    output::field("Filter", run.selection.filter);
    output::field("Baskets", run.selection.baskets.len());
    output::field("Min support", run.min_support);
    output::field("Min confidence", run.min_confidence);
    if run.selection.fallback_applied {
        output::warning(&format!(
            "Not enough transactions for {}, showing all dates instead",
            run.selection.filter
        ));
        if !run.available.is_empty() {
            output::hint(&format!("records exist for {}", run.available.join(", ")));
        }
    }
}

/// Execute `mine`.
pub fn execute(args: &MineArgs, config: &Config) -> Result<()> {
    let run = prepare(&args.mining, config)?;
    let catalog = args.catalog.as_deref().map(load_catalog).transpose()?;
    let baskets = &run.selection.baskets;

    match args.algorithm {
        Algorithm::Apriori => {
            let analysis =
                Timed::measure(|| run_apriori(baskets, run.min_support, run.min_confidence));

            if output::is_json() {
                output::json_output(json!({
                    "command": "mine",
                    "algorithm": "apriori",
                    "filter": run.selection.filter,
                    "fallback_applied": run.selection.fallback_applied,
                    "elapsed_ms": analysis.elapsed_ms,
                    "analysis": analysis.value,
                }));
                return Ok(());
            }

            output::header(env!("CARGO_PKG_VERSION"));
            selection_summary(&run);
            render::steps(&analysis.value.steps);
            if analysis.value.no_data {
                return Ok(());
            }
            render::rules(&analysis.value.rules, catalog.as_ref());

            let summary = analysis.value.summary;
            output::section("Summary");
            output::field("Transactions", summary.total_transactions);
            output::field("Frequent 1-sets", summary.frequent_1_itemsets);
            output::field("Frequent 2-sets", summary.frequent_2_itemsets);
            output::field("Frequent 3-sets", summary.frequent_3_itemsets);
            output::field("Strong rules", summary.strong_rules);
            output::field("Time", format!("{:.2} ms", analysis.elapsed_ms));
            if analysis.value.cannot_generate_triplets {
                output::hint("no 3-item combination meets the minimum support");
            }
        }
        Algorithm::FpGrowth => {
            let analysis =
                Timed::measure(|| run_fp_growth(baskets, run.min_support, run.min_confidence));

            if output::is_json() {
                output::json_output(json!({
                    "command": "mine",
                    "algorithm": "fp_growth",
                    "filter": run.selection.filter,
                    "fallback_applied": run.selection.fallback_applied,
                    "elapsed_ms": analysis.elapsed_ms,
                    "analysis": analysis.value,
                }));
                return Ok(());
            }

            output::header(env!("CARGO_PKG_VERSION"));
            selection_summary(&run);
            render::steps(&analysis.value.steps);
            if analysis.value.no_data {
                return Ok(());
            }
            render::rules(&analysis.value.rules, catalog.as_ref());

            let summary = analysis.value.summary;
            output::section("Summary");
            output::field("Transactions", summary.total_transactions);
            output::field("Frequent items", summary.frequent_items);
            output::field("Tree paths", summary.fp_tree_paths);
            output::field("Frequent pairs", summary.frequent_patterns);
            output::field("Strong rules", summary.strong_rules);
            output::field("Time", format!("{:.2} ms", analysis.elapsed_ms));
        }
    }

    Ok(())
}
