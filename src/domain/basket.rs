//! Market baskets built from grouped outgoing records.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::itemset::Itemset;

/// One market-basket transaction.
///
/// `items` is a set: buying the same item twice within one basket counts once.
/// The `id` is assigned during aggregation and carries no identity beyond the
/// current mining run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Basket {
    pub id: usize,
    pub date: NaiveDate,
    pub customer: String,
    pub items: BTreeSet<String>,
}

impl Basket {
    /// Create a basket from any collection of item names (duplicates collapse).
    pub fn new<I, S>(id: usize, date: NaiveDate, customer: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            date,
            customer: customer.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether every element of `itemset` is in this basket.
    #[must_use]
    pub fn contains_all(&self, itemset: &Itemset) -> bool {
        itemset.items().iter().all(|item| self.items.contains(item))
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the basket has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
