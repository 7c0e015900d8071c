//! Level-wise (Apriori) frequent-itemset mining.
//!
//! Levels 1 through 3 are counted and pruned in turn. Candidates at level k
//! are built only from itemsets that survived level k-1, which is what keeps
//! infrequent items out of every larger candidate.
//!
//! # Levels
//!
//! 1. Count every item, prune by minimum support.
//! 2. Pair every kept item with every other kept item, count, prune.
//! 3. Union every two frequent pairs that share exactly one item, count,
//!    prune. If no such union exists the level records that no candidate
//!    could be generated, which is distinct from "all candidates pruned".

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::domain::{support, Basket, Itemset, ItemsetCount, PruneStatus, Threshold};

/// Outcome of the 3-itemset level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripletLevel {
    /// Fewer than two frequent pairs, or no two pairs share exactly one item.
    NoCandidates,
    /// Candidates existed and were counted (possibly all pruned).
    Counted(Vec<ItemsetCount>),
}

impl TripletLevel {
    /// Counted triplets, empty when none could be generated.
    #[must_use]
    pub fn counts(&self) -> &[ItemsetCount] {
        match self {
            Self::NoCandidates => &[],
            Self::Counted(counts) => counts,
        }
    }
}

/// Per-level frequency tables of one mining run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningResult {
    /// Number of baskets mined.
    pub total: usize,
    /// Every item with its support, sorted by count descending.
    pub singles: Vec<ItemsetCount>,
    /// Pair candidates built from kept items, in generation order.
    pub pair_candidates: Vec<Itemset>,
    /// Counted pair candidates.
    pub pairs: Vec<ItemsetCount>,
    pub triplets: TripletLevel,
}

impl MiningResult {
    /// A result for an empty basket list: nothing counted, levels 2-3 not attempted.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total: 0,
            singles: Vec::new(),
            pair_candidates: Vec::new(),
            pairs: Vec::new(),
            triplets: TripletLevel::NoCandidates,
        }
    }

    /// Whether there were no baskets to mine.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Basket count per single item.
    #[must_use]
    pub fn item_counts(&self) -> BTreeMap<String, usize> {
        self.singles
            .iter()
            .filter_map(|c| c.itemset.items().first().map(|item| (item.clone(), c.count)))
            .collect()
    }

    /// Kept 1-itemsets.
    pub fn frequent_singles(&self) -> impl Iterator<Item = &ItemsetCount> {
        self.singles.iter().filter(|c| c.is_frequent())
    }

    /// Kept 2-itemsets.
    pub fn frequent_pairs(&self) -> impl Iterator<Item = &ItemsetCount> {
        self.pairs.iter().filter(|c| c.is_frequent())
    }

    /// Kept 3-itemsets.
    pub fn frequent_triplets(&self) -> impl Iterator<Item = &ItemsetCount> {
        self.triplets.counts().iter().filter(|c| c.is_frequent())
    }
}

/// Apriori miner over in-memory baskets.
#[derive(Debug, Clone, Copy)]
pub struct AprioriMiner {
    min_support: Threshold,
}

impl AprioriMiner {
    /// Create a miner with the given minimum support percentage.
    #[must_use]
    pub const fn new(min_support: Threshold) -> Self {
        Self { min_support }
    }

    #[must_use]
    pub const fn min_support(&self) -> Threshold {
        self.min_support
    }

    /// Mine frequent 1-, 2- and 3-itemsets.
    ///
    /// Deterministic: identical baskets and threshold give identical results.
    #[must_use]
    pub fn mine(&self, baskets: &[Basket]) -> MiningResult {
        let total = baskets.len();
        if total == 0 {
            debug!("No baskets to mine");
            return MiningResult::empty();
        }

        let singles = self.count_singles(baskets);
        let kept_items: Vec<&str> = singles
            .iter()
            .filter(|c| c.is_frequent())
            .filter_map(|c| c.itemset.items().first().map(String::as_str))
            .collect();

        let pair_candidates = pair_candidates(&kept_items);
        let pairs: Vec<ItemsetCount> = pair_candidates
            .iter()
            .map(|pair| self.count(pair, baskets))
            .collect();

        let frequent_pairs: Vec<&Itemset> = pairs
            .iter()
            .filter(|c| c.is_frequent())
            .map(|c| &c.itemset)
            .collect();

        let triplets = match triplet_candidates(&frequent_pairs) {
            candidates if candidates.is_empty() => TripletLevel::NoCandidates,
            candidates => TripletLevel::Counted(
                candidates
                    .iter()
                    .map(|triplet| self.count(triplet, baskets))
                    .collect(),
            ),
        };

        let result = MiningResult {
            total,
            singles,
            pair_candidates,
            pairs,
            triplets,
        };

        debug!(
            baskets = total,
            min_support = %self.min_support,
            frequent_1 = result.frequent_singles().count(),
            frequent_2 = result.frequent_pairs().count(),
            frequent_3 = result.frequent_triplets().count(),
            "Apriori levels counted"
        );
        result
    }

    /// Count every item, then order by count descending (ties keep first-seen order).
    fn count_singles(&self, baskets: &[Basket]) -> Vec<ItemsetCount> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for basket in baskets {
            for item in &basket.items {
                let count = counts.entry(item.as_str()).or_insert_with(|| {
                    order.push(item.as_str());
                    0
                });
                *count += 1;
            }
        }

        let mut singles: Vec<ItemsetCount> = order
            .into_iter()
            .map(|item| self.classify(Itemset::new([item]), counts[item], baskets.len()))
            .collect();
        singles.sort_by(|a, b| b.count.cmp(&a.count));
        singles
    }

    fn count(&self, itemset: &Itemset, baskets: &[Basket]) -> ItemsetCount {
        let count = baskets.iter().filter(|b| b.contains_all(itemset)).count();
        self.classify(itemset.clone(), count, baskets.len())
    }

    fn classify(&self, itemset: Itemset, count: usize, total: usize) -> ItemsetCount {
        let support = support(count, total);
        let status = if self.min_support.is_met_by(support) {
            PruneStatus::Kept
        } else {
            PruneStatus::Pruned
        };
        ItemsetCount {
            itemset,
            count,
            support,
            status,
        }
    }
}

/// Every unordered pair of kept items, canonicalized.
fn pair_candidates(kept_items: &[&str]) -> Vec<Itemset> {
    let mut candidates = Vec::new();
    for (i, first) in kept_items.iter().enumerate() {
        for second in &kept_items[i + 1..] {
            candidates.push(Itemset::new([*first, *second]));
        }
    }
    candidates
}

/// Unions of two frequent pairs with exactly three elements, deduplicated.
fn triplet_candidates(frequent_pairs: &[&Itemset]) -> Vec<Itemset> {
    if frequent_pairs.len() < 2 {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for (i, first) in frequent_pairs.iter().enumerate() {
        for second in &frequent_pairs[i + 1..] {
            let union = first.union(second);
            if union.len() == 3 && seen.insert(union.clone()) {
                candidates.push(union);
            }
        }
    }
    candidates
}
