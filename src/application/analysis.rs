//! Step-by-step analysis results for presentation.
//!
//! Wraps the miners and the rule generator and turns their frequency tables
//! into the ordered step breakdown callers display:
//!
//! | Step | Apriori                    | FP-Growth           |
//! |------|----------------------------|---------------------|
//! | A    | Scan & Count Singles       | Scan & Count Items  |
//! | B    | Prune Infrequent Items     | Create F-List       |
//! | C    | Generate 2-Itemsets        | Sort Transactions   |
//! | D    | Count & Prune 2-Itemsets   | Mine Patterns       |
//! | E    | Generate 3-Itemsets        | -                   |
//!
//! Results are deterministic. Wall-clock timings are kept outside the result
//! in [`Timed`].

use std::collections::BTreeSet;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use super::apriori::{AprioriMiner, MiningResult, TripletLevel};
use super::fp_growth::{FpGrowthMiner, FpGrowthResult};
use super::rules::generate_rules;
use crate::domain::{AssociationRule, Basket, Itemset, ItemsetCount, Step, StepCode, StepRow, Threshold};

/// Description of the single step reported for an empty basket list.
pub const NO_DATA: &str = "No transactions available for analysis";

/// Note reported when no 3-itemset candidate can be formed.
pub const NO_TRIPLETS: &str = "No valid 3-itemsets can be generated from frequent 2-itemsets";

/// A value with the wall-clock time it took to compute.
#[derive(Debug, Clone, Serialize)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed_ms: f64,
}

impl<T> Timed<T> {
    /// Run `f` and record its duration in milliseconds (2 dp).
    pub fn measure(f: impl FnOnce() -> T) -> Self {
        let start = Instant::now();
        let value = f();
        let elapsed_ms = (start.elapsed().as_secs_f64() * 100_000.0).round() / 100.0;
        Self { value, elapsed_ms }
    }
}

/// Counters derived from an Apriori run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AprioriSummary {
    pub total_transactions: usize,
    pub frequent_1_itemsets: usize,
    pub frequent_2_itemsets: usize,
    pub frequent_3_itemsets: usize,
    pub strong_rules: usize,
}

/// Full Apriori breakdown: steps, rules and summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AprioriAnalysis {
    pub steps: Vec<Step>,
    pub rules: Vec<AssociationRule>,
    pub summary: AprioriSummary,
    /// True when the basket list was empty and only the "no data" step was produced.
    pub no_data: bool,
    /// True when no 3-itemset candidate could be formed.
    pub cannot_generate_triplets: bool,
}

/// Counters derived from an FP-Growth run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FpGrowthSummary {
    pub total_transactions: usize,
    pub frequent_items: usize,
    pub fp_tree_paths: usize,
    pub frequent_patterns: usize,
    pub strong_rules: usize,
}

/// Full FP-Growth breakdown: steps, rules and summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FpGrowthAnalysis {
    pub steps: Vec<Step>,
    pub rules: Vec<AssociationRule>,
    pub summary: FpGrowthSummary,
    pub no_data: bool,
}

/// Both algorithms over the same baskets.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub apriori: Timed<AprioriAnalysis>,
    pub fp_growth: Timed<FpGrowthAnalysis>,
    /// Whether both algorithms found the same frequent pairs.
    pub frequent_pairs_agree: bool,
}

fn no_data_step() -> Step {
    Step::new(StepCode::A, "Scan & Count Singles", NO_DATA, Vec::new())
}

fn single_count_rows(singles: &[ItemsetCount], total: usize) -> Vec<StepRow> {
    singles
        .iter()
        .map(|c| StepRow::ItemCount {
            item: first_item(&c.itemset),
            count: c.count,
            total,
            support: c.support,
        })
        .collect()
}

fn single_status_rows(singles: &[ItemsetCount]) -> Vec<StepRow> {
    singles
        .iter()
        .map(|c| StepRow::ItemStatus {
            item: first_item(&c.itemset),
            support: c.support,
            status: c.status,
        })
        .collect()
}

fn itemset_rows<'a>(counts: impl IntoIterator<Item = &'a ItemsetCount>, total: usize) -> Vec<StepRow> {
    counts
        .into_iter()
        .map(|c| StepRow::Itemset {
            itemset: c.itemset.clone(),
            count: c.count,
            total,
            support: c.support,
            status: c.status,
        })
        .collect()
}

fn first_item(itemset: &Itemset) -> String {
    itemset.items().first().cloned().unwrap_or_default()
}

/// Run Apriori and rule generation over `baskets` and build the breakdown.
#[must_use]
pub fn run_apriori(
    baskets: &[Basket],
    min_support: Threshold,
    min_confidence: Threshold,
) -> AprioriAnalysis {
    let mining = AprioriMiner::new(min_support).mine(baskets);
    present_apriori(&mining, min_support, min_confidence)
}

/// Build the Apriori breakdown from an existing mining result.
#[must_use]
pub fn present_apriori(
    mining: &MiningResult,
    min_support: Threshold,
    min_confidence: Threshold,
) -> AprioriAnalysis {
    if mining.is_empty() {
        return AprioriAnalysis {
            steps: vec![no_data_step()],
            rules: Vec::new(),
            summary: AprioriSummary::default(),
            no_data: true,
            cannot_generate_triplets: true,
        };
    }

    let total = mining.total;
    let rules = generate_rules(
        mining.frequent_pairs(),
        &mining.item_counts(),
        total,
        min_confidence,
    );

    let triplet_rows = match &mining.triplets {
        TripletLevel::NoCandidates => vec![StepRow::Note {
            note: NO_TRIPLETS.to_string(),
        }],
        TripletLevel::Counted(counts) => itemset_rows(counts, total),
    };

    let steps = vec![
        Step::new(
            StepCode::A,
            "Scan & Count Singles",
            "Count how often each individual item appears",
            single_count_rows(&mining.singles, total),
        ),
        Step::new(
            StepCode::B,
            "Prune Infrequent Items",
            format!("Keep only items whose support ≥ min_sup ({min_support})"),
            single_status_rows(&mining.singles),
        ),
        Step::new(
            StepCode::C,
            "Generate 2-Itemsets",
            "Pair every surviving item with every other surviving item",
            mining
                .pair_candidates
                .iter()
                .map(|itemset| StepRow::Candidate {
                    itemset: itemset.clone(),
                })
                .collect(),
        ),
        Step::new(
            StepCode::D,
            "Count & Prune 2-Itemsets",
            format!("Count support for each pair, keep those ≥ {min_support}"),
            itemset_rows(&mining.pairs, total),
        ),
        Step::new(
            StepCode::E,
            "Generate 3-Itemsets",
            "Build triplets from surviving 2-itemsets",
            triplet_rows,
        ),
    ];

    let summary = AprioriSummary {
        total_transactions: total,
        frequent_1_itemsets: mining.frequent_singles().count(),
        frequent_2_itemsets: mining.frequent_pairs().count(),
        frequent_3_itemsets: mining.frequent_triplets().count(),
        strong_rules: rules.iter().filter(|r| r.is_strong()).count(),
    };

    info!(
        baskets = summary.total_transactions,
        frequent_1 = summary.frequent_1_itemsets,
        frequent_2 = summary.frequent_2_itemsets,
        frequent_3 = summary.frequent_3_itemsets,
        rules = rules.len(),
        strong_rules = summary.strong_rules,
        "Apriori analysis complete"
    );

    AprioriAnalysis {
        steps,
        rules,
        summary,
        no_data: false,
        cannot_generate_triplets: matches!(mining.triplets, TripletLevel::NoCandidates),
    }
}

/// Run FP-Growth and rule generation over `baskets` and build the breakdown.
#[must_use]
pub fn run_fp_growth(
    baskets: &[Basket],
    min_support: Threshold,
    min_confidence: Threshold,
) -> FpGrowthAnalysis {
    let mining = FpGrowthMiner::new(min_support).mine(baskets);
    present_fp_growth(&mining, min_support, min_confidence)
}

/// Build the FP-Growth breakdown from an existing result.
#[must_use]
pub fn present_fp_growth(
    mining: &FpGrowthResult,
    min_support: Threshold,
    min_confidence: Threshold,
) -> FpGrowthAnalysis {
    if mining.is_empty() {
        return FpGrowthAnalysis {
            steps: vec![no_data_step()],
            rules: Vec::new(),
            summary: FpGrowthSummary::default(),
            no_data: true,
        };
    }

    let total = mining.total;
    let rules = generate_rules(
        mining.frequent_patterns(),
        &mining.item_counts(),
        total,
        min_confidence,
    );

    let steps = vec![
        Step::new(
            StepCode::A,
            "Scan & Count Items",
            "Count frequency of each item in database",
            single_count_rows(&mining.singles, total),
        ),
        Step::new(
            StepCode::B,
            "Create F-List",
            format!("Keep frequent items with support ≥ {min_support} (sorted by frequency)"),
            single_status_rows(&mining.singles),
        ),
        Step::new(
            StepCode::C,
            "Sort Transactions",
            "Reorder items in each transaction by F-List order",
            mining
                .sorted_baskets
                .iter()
                .map(|b| StepRow::SortedBasket {
                    original: b.original.clone(),
                    sorted: b.sorted.clone(),
                    count: b.sorted.len(),
                })
                .collect(),
        ),
        Step::new(
            StepCode::D,
            "Mine Patterns",
            "Extract frequent patterns from sorted transactions",
            itemset_rows(&mining.patterns, total),
        ),
    ];

    let summary = FpGrowthSummary {
        total_transactions: total,
        frequent_items: mining.frequent_items().count(),
        fp_tree_paths: mining.paths.len(),
        frequent_patterns: mining.frequent_patterns().count(),
        strong_rules: rules.iter().filter(|r| r.is_strong()).count(),
    };

    info!(
        baskets = summary.total_transactions,
        frequent_items = summary.frequent_items,
        paths = summary.fp_tree_paths,
        frequent_patterns = summary.frequent_patterns,
        strong_rules = summary.strong_rules,
        "FP-Growth analysis complete"
    );

    FpGrowthAnalysis {
        steps,
        rules,
        summary,
        no_data: false,
    }
}

/// Run both algorithms and report whether they agree on frequent pairs.
#[must_use]
pub fn compare(baskets: &[Basket], min_support: Threshold, min_confidence: Threshold) -> Comparison {
    let apriori_mining = Timed::measure(|| AprioriMiner::new(min_support).mine(baskets));
    let fp_mining = Timed::measure(|| FpGrowthMiner::new(min_support).mine(baskets));

    let apriori_pairs: BTreeSet<&Itemset> =
        apriori_mining.value.frequent_pairs().map(|c| &c.itemset).collect();
    let fp_pairs: BTreeSet<&Itemset> = fp_mining.value.frequent_patterns().map(|c| &c.itemset).collect();
    let frequent_pairs_agree = apriori_pairs == fp_pairs;

    let apriori = Timed::measure(|| present_apriori(&apriori_mining.value, min_support, min_confidence));
    let fp_growth = Timed::measure(|| present_fp_growth(&fp_mining.value, min_support, min_confidence));

    Comparison {
        apriori: Timed {
            elapsed_ms: apriori_mining.elapsed_ms + apriori.elapsed_ms,
            value: apriori.value,
        },
        fp_growth: Timed {
            elapsed_ms: fp_mining.elapsed_ms + fp_growth.elapsed_ms,
            value: fp_growth.value,
        },
        frequent_pairs_agree,
    }
}
