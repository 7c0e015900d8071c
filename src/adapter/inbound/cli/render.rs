//! Table rendering for analysis steps and rules.

use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::{AssociationRule, ItemCatalog, Step, StepRow};

#[derive(Tabled)]
struct ItemCountRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Count")]
    count: String,
    #[tabled(rename = "Support")]
    support: String,
}

#[derive(Tabled)]
struct ItemStatusRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Support")]
    support: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Candidate")]
    itemset: String,
}

#[derive(Tabled)]
struct ItemsetRow {
    #[tabled(rename = "Itemset")]
    itemset: String,
    #[tabled(rename = "Count")]
    count: String,
    #[tabled(rename = "Support")]
    support: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct SortedBasketRow {
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "Sorted")]
    sorted: String,
}

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Rule")]
    rule: String,
    #[tabled(rename = "Support")]
    support: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Lift")]
    lift: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub(crate) fn percent(value: Decimal) -> String {
    format!("{value}%")
}

/// Render the rows of one step as a table, `None` for note-only steps.
fn step_table(rows: &[StepRow]) -> Option<String> {
    let table = match rows.first()? {
        StepRow::ItemCount { .. } => Table::new(rows.iter().filter_map(|row| match row {
            StepRow::ItemCount {
                item,
                count,
                total,
                support,
            } => Some(ItemCountRow {
                item: item.clone(),
                count: format!("{count}/{total}"),
                support: percent(*support),
            }),
            _ => None,
        })),
        StepRow::ItemStatus { .. } => Table::new(rows.iter().filter_map(|row| match row {
            StepRow::ItemStatus {
                item,
                support,
                status,
            } => Some(ItemStatusRow {
                item: item.clone(),
                support: percent(*support),
                status: status.to_string(),
            }),
            _ => None,
        })),
        StepRow::Candidate { .. } => Table::new(rows.iter().filter_map(|row| match row {
            StepRow::Candidate { itemset } => Some(CandidateRow {
                itemset: itemset.to_string(),
            }),
            _ => None,
        })),
        StepRow::Itemset { .. } => Table::new(rows.iter().filter_map(|row| match row {
            StepRow::Itemset {
                itemset,
                count,
                total,
                support,
                status,
            } => Some(ItemsetRow {
                itemset: itemset.to_string(),
                count: format!("{count}/{total}"),
                support: percent(*support),
                status: status.to_string(),
            }),
            _ => None,
        })),
        StepRow::SortedBasket { .. } => Table::new(rows.iter().filter_map(|row| match row {
            StepRow::SortedBasket {
                original, sorted, ..
            } => Some(SortedBasketRow {
                original: original.join(", "),
                sorted: sorted.join(", "),
            }),
            _ => None,
        })),
        StepRow::Note { .. } => return None,
    };
    Some(table.to_string())
}

/// Print every step with its title, description and rows.
pub fn steps(steps: &[Step]) {
    for step in steps {
        output::section(&format!("Step {}: {}", step.code, step.title));
        output::note(&step.description);
        if let Some(note) = step.note() {
            output::warning(note);
        }
        if let Some(table) = step_table(&step.rows) {
            output::lines(&table);
        }
    }
}

/// Label an item with its catalog code when one exists.
fn label(item: &str, catalog: Option<&ItemCatalog>) -> String {
    match catalog.map(|c| c.code_or_name(item)) {
        Some(code) if code != item => format!("{item} ({code})"),
        _ => item.to_string(),
    }
}

/// Print the rule table.
pub fn rules(rules: &[AssociationRule], catalog: Option<&ItemCatalog>) {
    output::section("Association Rules");
    if rules.is_empty() {
        output::note("No frequent 2-itemsets, so no rules were generated");
        return;
    }
    let rows = rules.iter().map(|rule| RuleRow {
        rule: format!(
            "{} → {}",
            label(&rule.antecedent, catalog),
            label(&rule.consequent, catalog)
        ),
        support: percent(rule.support),
        confidence: percent(rule.confidence),
        lift: rule.lift.to_string(),
        status: rule.status.to_string(),
    });
    output::lines(&Table::new(rows).to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemInfo, Itemset, PruneStatus};
    use rust_decimal_macros::dec;

    #[test]
    fn note_rows_have_no_table() {
        let rows = vec![StepRow::Note {
            note: "nothing".into(),
        }];
        assert!(step_table(&rows).is_none());
        assert!(step_table(&[]).is_none());
    }

    #[test]
    fn itemset_rows_render_counts_and_status() {
        let rows = vec![StepRow::Itemset {
            itemset: Itemset::new(["Oil", "Rice"]),
            count: 2,
            total: 4,
            support: dec!(50.0),
            status: PruneStatus::Kept,
        }];
        let table = step_table(&rows).unwrap();
        assert!(table.contains("{Oil, Rice}"));
        assert!(table.contains("2/4"));
        assert!(table.contains("50.0%"));
        assert!(table.contains("kept"));
    }

    #[test]
    fn catalog_codes_label_items() {
        let catalog: ItemCatalog = [ItemInfo {
            name: "Rice".into(),
            code: Some("BRS-01".into()),
            image: None,
        }]
        .into_iter()
        .collect();
        assert_eq!(label("Rice", Some(&catalog)), "Rice (BRS-01)");
        assert_eq!(label("Oil", Some(&catalog)), "Oil");
        assert_eq!(label("Rice", None), "Rice");
    }
}
