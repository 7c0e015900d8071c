//! Canonical itemsets and their counted support.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// An order-independent set of item names.
///
/// Elements are kept sorted and deduplicated, so `{B, A}` and `{A, B}` are the
/// same key. Keys never rely on joining names with a delimiter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Itemset(Vec<String>);

impl Itemset {
    /// Build a canonical itemset from item names.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
        items.sort();
        items.dedup();
        Self(items)
    }

    /// Elements in canonical (ascending) order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the itemset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Union of two itemsets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.0.iter().chain(other.0.iter()).cloned())
    }

    /// All subsets with one element removed.
    #[must_use]
    pub fn subsets(&self) -> Vec<Self> {
        (0..self.0.len())
            .map(|skip| {
                Self(
                    self.0
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != skip)
                        .map(|(_, item)| item.clone())
                        .collect(),
                )
            })
            .collect()
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.join(", "))
    }
}

/// Outcome of testing a counted itemset against minimum support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PruneStatus {
    Kept,
    Pruned,
}

impl PruneStatus {
    #[must_use]
    pub fn is_kept(self) -> bool {
        matches!(self, Self::Kept)
    }
}

impl fmt::Display for PruneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kept => write!(f, "kept"),
            Self::Pruned => write!(f, "pruned"),
        }
    }
}

/// An itemset with its basket count, support percentage and prune status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemsetCount {
    pub itemset: Itemset,
    pub count: usize,
    pub support: Decimal,
    pub status: PruneStatus,
}

impl ItemsetCount {
    /// Whether this itemset survived pruning.
    #[must_use]
    pub fn is_frequent(&self) -> bool {
        self.status.is_kept()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_ascending() {
        let a = Itemset::new(["Tea", "Coffee", "Tea"]);
        let b = Itemset::new(["Coffee", "Tea"]);
        assert_eq!(a, b);
        assert_eq!(a.items(), ["Coffee", "Tea"]);
    }

    #[test]
    fn display_uses_braces() {
        assert_eq!(Itemset::new(["B", "A"]).to_string(), "{A, B}");
    }

    #[test]
    fn names_containing_separators_do_not_collide() {
        let joined = Itemset::new(["A, B"]);
        let pair = Itemset::new(["A", "B"]);
        assert_ne!(joined, pair);
    }

    #[test]
    fn union_and_subsets() {
        let ab = Itemset::new(["A", "B"]);
        let bc = Itemset::new(["B", "C"]);
        let abc = ab.union(&bc);
        assert_eq!(abc.len(), 3);
        assert_eq!(
            abc.subsets(),
            vec![
                Itemset::new(["B", "C"]),
                Itemset::new(["A", "C"]),
                Itemset::new(["A", "B"]),
            ]
        );
    }
}
