//! Step-by-step breakdown emitted by the mining pipelines.
//!
//! Callers render these steps verbatim and test suites assert against them,
//! so row shapes are part of the output contract.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::itemset::{Itemset, PruneStatus};

/// Step label shown to the user (A through E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum StepCode {
    A,
    B,
    C,
    D,
    E,
}

impl fmt::Display for StepCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        };
        f.write_str(code)
    }
}

/// One row of step data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StepRow {
    /// A single item counted across all baskets.
    ItemCount {
        item: String,
        count: usize,
        total: usize,
        support: Decimal,
    },
    /// A single item tested against minimum support.
    ItemStatus {
        item: String,
        support: Decimal,
        status: PruneStatus,
    },
    /// A generated candidate, not yet counted.
    Candidate { itemset: Itemset },
    /// A counted and pruned itemset.
    Itemset {
        itemset: Itemset,
        count: usize,
        total: usize,
        support: Decimal,
        status: PruneStatus,
    },
    /// A basket reordered by F-list frequency.
    SortedBasket {
        original: Vec<String>,
        sorted: Vec<String>,
        count: usize,
    },
    /// Explanation in place of data.
    Note { note: String },
}

/// A named stage of a mining run with its rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub code: StepCode,
    pub title: String,
    pub description: String,
    pub rows: Vec<StepRow>,
}

impl Step {
    pub fn new(
        code: StepCode,
        title: impl Into<String>,
        description: impl Into<String>,
        rows: Vec<StepRow>,
    ) -> Self {
        Self {
            code,
            title: title.into(),
            description: description.into(),
            rows,
        }
    }

    /// The note text, if this step carries a note row.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.rows.iter().find_map(|row| match row {
            StepRow::Note { note } => Some(note.as_str()),
            _ => None,
        })
    }
}
