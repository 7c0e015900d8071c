//! Association rule generation from frequent pairs.
//!
//! Each frequent pair {A, B} yields exactly one rule: whichever direction has
//! the higher confidence, with ties going to the pair's canonical order. Rules
//! are classified strong or weak against the minimum confidence.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::percent::{round_half_up, PERCENT_DP};
use crate::domain::{ratio, support, AssociationRule, ItemsetCount, RuleStatus, Threshold};

/// Confidence and lift of one rule direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Direction {
    confidence: Decimal,
    lift: Decimal,
}

/// `pair_count / antecedent_count × 100` and
/// `(pair/total) / ((antecedent/total) × (consequent/total))`.
fn direction(pair_count: usize, antecedent: usize, consequent: usize, total: usize) -> Direction {
    let pair = Decimal::from(pair_count);
    let antecedent = Decimal::from(antecedent);
    let consequent = Decimal::from(consequent);
    let total = Decimal::from(total);

    let confidence = if antecedent.is_zero() {
        round_half_up(Decimal::ZERO, PERCENT_DP)
    } else {
        round_half_up(pair * Decimal::ONE_HUNDRED / antecedent, PERCENT_DP)
    };
    let lift = ratio(pair * total, antecedent * consequent);

    Direction { confidence, lift }
}

/// Derive one rule per frequent pair.
///
/// `frequent_pairs` carries each pair's basket count; `item_counts` maps every
/// item to its basket count. Pairs that are not 2-itemsets, or whose items are
/// missing from `item_counts`, are skipped.
#[must_use]
pub fn generate_rules<'a, I>(
    frequent_pairs: I,
    item_counts: &BTreeMap<String, usize>,
    total: usize,
    min_confidence: Threshold,
) -> Vec<AssociationRule>
where
    I: IntoIterator<Item = &'a ItemsetCount>,
{
    let mut rules = Vec::new();

    for pair in frequent_pairs {
        let [first, second] = pair.itemset.items() else {
            continue;
        };
        let (Some(&first_count), Some(&second_count)) =
            (item_counts.get(first), item_counts.get(second))
        else {
            continue;
        };

        let forward = direction(pair.count, first_count, second_count, total);
        let backward = direction(pair.count, second_count, first_count, total);

        let (antecedent, consequent, chosen) = if forward.confidence >= backward.confidence {
            (first, second, forward)
        } else {
            (second, first, backward)
        };

        let status = if min_confidence.is_met_by(chosen.confidence) {
            RuleStatus::Strong
        } else {
            RuleStatus::Weak
        };

        rules.push(AssociationRule {
            antecedent: antecedent.clone(),
            consequent: consequent.clone(),
            support: support(pair.count, total),
            confidence: chosen.confidence,
            lift: chosen.lift,
            status,
        });
    }

    debug!(
        rules = rules.len(),
        strong = rules.iter().filter(|r| r.is_strong()).count(),
        min_confidence = %min_confidence,
        "Generated association rules"
    );
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Itemset, PruneStatus};
    use rust_decimal_macros::dec;

    fn pair(a: &str, b: &str, count: usize, total: usize) -> ItemsetCount {
        ItemsetCount {
            itemset: Itemset::new([a, b]),
            count,
            support: support(count, total),
            status: PruneStatus::Kept,
        }
    }

    fn counts(entries: &[(&str, usize)]) -> BTreeMap<String, usize> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn threshold(pct: Decimal) -> Threshold {
        Threshold::try_new("min_confidence", pct).unwrap()
    }

    #[test]
    fn emits_higher_confidence_direction() {
        let pairs = [pair("A", "B", 2, 4)];
        let rules = generate_rules(&pairs, &counts(&[("A", 2), ("B", 3)]), 4, threshold(dec!(70)));

        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.antecedent, "A");
        assert_eq!(rule.consequent, "B");
        assert_eq!(rule.support, dec!(50.0));
        assert_eq!(rule.confidence, dec!(100.0));
        assert_eq!(rule.lift, dec!(1.33));
        assert_eq!(rule.status, RuleStatus::Strong);
    }

    #[test]
    fn reverses_when_second_item_is_rarer() {
        let pairs = [pair("A", "B", 2, 4)];
        let rules = generate_rules(&pairs, &counts(&[("A", 3), ("B", 2)]), 4, threshold(dec!(70)));

        assert_eq!(rules[0].antecedent, "B");
        assert_eq!(rules[0].consequent, "A");
        assert_eq!(rules[0].confidence, dec!(100.0));
    }

    #[test]
    fn ties_keep_canonical_order() {
        let pairs = [pair("Milk", "Bread", 2, 4)];
        let rules = generate_rules(
            &pairs,
            &counts(&[("Bread", 3), ("Milk", 3)]),
            4,
            threshold(dec!(70)),
        );

        assert_eq!(rules[0].antecedent, "Bread");
        assert_eq!(rules[0].consequent, "Milk");
        assert_eq!(rules[0].confidence, dec!(66.7));
        assert_eq!(rules[0].status, RuleStatus::Weak);
    }

    #[test]
    fn confidence_threshold_is_inclusive() {
        let pairs = [pair("A", "B", 2, 4)];
        let rules = generate_rules(&pairs, &counts(&[("A", 3), ("B", 3)]), 4, threshold(dec!(66.7)));
        assert_eq!(rules[0].status, RuleStatus::Strong);
    }

    #[test]
    fn lift_is_symmetric_in_value() {
        let forward = direction(2, 2, 3, 4);
        let backward = direction(2, 3, 2, 4);
        assert_eq!(forward.lift, backward.lift);
        assert_eq!(forward.lift, dec!(1.33));
    }

    #[test]
    fn lift_has_two_decimal_places() {
        let d = direction(1, 1, 1, 1);
        assert_eq!(d.lift.to_string(), "1.00");
        assert_eq!(d.confidence.to_string(), "100.0");
    }

    #[test]
    fn missing_counts_are_skipped() {
        let pairs = [pair("A", "B", 2, 4)];
        let rules = generate_rules(&pairs, &counts(&[("A", 2)]), 4, threshold(dec!(70)));
        assert!(rules.is_empty());
    }
}
