//! Handler for the `compare` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::MiningArgs;
use crate::adapter::inbound::cli::mine::{prepare, selection_summary};
use crate::adapter::inbound::cli::output;
use crate::application::analysis::compare;
use crate::error::{Insufficiency, Result};
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct AlgorithmRow {
    #[tabled(rename = "Algorithm")]
    name: &'static str,
    #[tabled(rename = "Frequent items")]
    frequent_items: usize,
    #[tabled(rename = "Frequent pairs")]
    frequent_pairs: usize,
    #[tabled(rename = "Rules")]
    rules: usize,
    #[tabled(rename = "Strong rules")]
    strong_rules: usize,
    #[tabled(rename = "Time (ms)")]
    elapsed_ms: String,
}

/// Execute `compare`.
pub fn execute(args: &MiningArgs, config: &Config) -> Result<()> {
    let run = prepare(args, config)?;
    if run.selection.baskets.is_empty() {
        output::warning(&Insufficiency::NoTransactions.to_string());
        return Ok(());
    }
    let comparison = compare(&run.selection.baskets, run.min_support, run.min_confidence);

    if output::is_json() {
        output::json_output(json!({
            "command": "compare",
            "filter": run.selection.filter,
            "fallback_applied": run.selection.fallback_applied,
            "comparison": comparison,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    selection_summary(&run);

    let apriori = &comparison.apriori;
    let fp_growth = &comparison.fp_growth;
    let rows = vec![
        AlgorithmRow {
            name: "Apriori",
            frequent_items: apriori.value.summary.frequent_1_itemsets,
            frequent_pairs: apriori.value.summary.frequent_2_itemsets,
            rules: apriori.value.rules.len(),
            strong_rules: apriori.value.summary.strong_rules,
            elapsed_ms: format!("{:.2}", apriori.elapsed_ms),
        },
        AlgorithmRow {
            name: "FP-Growth",
            frequent_items: fp_growth.value.summary.frequent_items,
            frequent_pairs: fp_growth.value.summary.frequent_patterns,
            rules: fp_growth.value.rules.len(),
            strong_rules: fp_growth.value.summary.strong_rules,
            elapsed_ms: format!("{:.2}", fp_growth.elapsed_ms),
        },
    ];

    output::section("Comparison");
    output::lines(&Table::new(rows).to_string());

    if comparison.frequent_pairs_agree {
        output::success("Both algorithms found the same frequent pairs");
    } else {
        output::warning("Algorithms disagree on frequent pairs");
    }
    Ok(())
}
