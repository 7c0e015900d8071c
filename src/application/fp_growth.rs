//! Simplified FP-Growth pass used to cross-check Apriori.
//!
//! Items are counted once to build the F-list (frequent items ordered by
//! count). Each basket is then reduced to its frequent items in F-list order;
//! identical reduced baskets share a prefix path. Pairs are mined directly
//! from the reduced baskets, so no candidate generation is needed.
//!
//! Only 2-item patterns are mined. For pairs of frequent items the counts
//! equal the Apriori pair counts, which [`crate::application::analysis::compare`]
//! relies on.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::{support, Basket, Itemset, ItemsetCount, PruneStatus, Threshold};

/// A basket reduced to its frequent items, ordered by F-list count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedBasket {
    pub basket_id: usize,
    pub original: Vec<String>,
    pub sorted: Vec<String>,
}

/// A distinct reduced basket and how many baskets share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPath {
    pub items: Vec<String>,
    pub count: usize,
}

/// Output of one FP-Growth run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpGrowthResult {
    pub total: usize,
    /// Every item with its support, sorted by count descending.
    pub singles: Vec<ItemsetCount>,
    /// Reduced baskets (baskets with no frequent item are dropped).
    pub sorted_baskets: Vec<SortedBasket>,
    pub paths: Vec<PrefixPath>,
    /// Counted pair patterns in first-seen order.
    pub patterns: Vec<ItemsetCount>,
}

impl FpGrowthResult {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total: 0,
            singles: Vec::new(),
            sorted_baskets: Vec::new(),
            paths: Vec::new(),
            patterns: Vec::new(),
        }
    }

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

    /// Items on the F-list.
    pub fn frequent_items(&self) -> impl Iterator<Item = &ItemsetCount> {
        self.singles.iter().filter(|c| c.is_frequent())
    }

    /// Kept pair patterns.
    pub fn frequent_patterns(&self) -> impl Iterator<Item = &ItemsetCount> {
        self.patterns.iter().filter(|c| c.is_frequent())
    }
}

/// FP-Growth miner over in-memory baskets.
#[derive(Debug, Clone, Copy)]
pub struct FpGrowthMiner {
    min_support: Threshold,
}

impl FpGrowthMiner {
    #[must_use]
    pub const fn new(min_support: Threshold) -> Self {
        Self { min_support }
    }

    #[must_use]
    pub const fn min_support(&self) -> Threshold {
        self.min_support
    }

    /// Build the F-list, reduce baskets, and mine pair patterns.
    #[must_use]
    pub fn mine(&self, baskets: &[Basket]) -> FpGrowthResult {
        let total = baskets.len();
        if total == 0 {
            return FpGrowthResult::empty();
        }

        let singles = self.count_singles(baskets);
        let flist: HashMap<&str, usize> = singles
            .iter()
            .filter(|c| c.is_frequent())
            .filter_map(|c| c.itemset.items().first().map(|item| (item.as_str(), c.count)))
            .collect();

        let sorted_baskets: Vec<SortedBasket> = baskets
            .iter()
            .filter_map(|basket| {
                let mut sorted: Vec<&String> = basket
                    .items
                    .iter()
                    .filter(|item| flist.contains_key(item.as_str()))
                    .collect();
                if sorted.is_empty() {
                    return None;
                }
                sorted.sort_by(|a, b| flist[b.as_str()].cmp(&flist[a.as_str()]));
                Some(SortedBasket {
                    basket_id: basket.id,
                    original: basket.items.iter().cloned().collect(),
                    sorted: sorted.into_iter().cloned().collect(),
                })
            })
            .collect();

        let paths = prefix_paths(&sorted_baskets);
        let patterns = self.mine_pairs(&sorted_baskets, total);

        let result = FpGrowthResult {
            total,
            singles,
            sorted_baskets,
            paths,
            patterns,
        };

        debug!(
            baskets = total,
            min_support = %self.min_support,
            frequent_items = result.frequent_items().count(),
            paths = result.paths.len(),
            frequent_patterns = result.frequent_patterns().count(),
            "FP-Growth patterns mined"
        );
        result
    }

    fn count_singles(&self, baskets: &[Basket]) -> Vec<ItemsetCount> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for basket in baskets {
            for item in &basket.items {
                *counts.entry(item.as_str()).or_insert_with(|| {
                    order.push(item.as_str());
                    0
                }) += 1;
            }
        }

        let mut singles: Vec<ItemsetCount> = order
            .into_iter()
            .map(|item| self.classify(Itemset::new([item]), counts[item], baskets.len()))
            .collect();
        singles.sort_by(|a, b| b.count.cmp(&a.count));
        singles
    }

    fn mine_pairs(&self, sorted_baskets: &[SortedBasket], total: usize) -> Vec<ItemsetCount> {
        let mut order: Vec<Itemset> = Vec::new();
        let mut counts: HashMap<Itemset, usize> = HashMap::new();

        for basket in sorted_baskets {
            for (i, first) in basket.sorted.iter().enumerate() {
                for second in &basket.sorted[i + 1..] {
                    let pair = Itemset::new([first.as_str(), second.as_str()]);
                    let count = counts.entry(pair.clone()).or_insert(0);
                    if *count == 0 {
                        order.push(pair);
                    }
                    *count += 1;
                }
            }
        }

        order
            .into_iter()
            .map(|pair| {
                let count = counts[&pair];
                self.classify(pair, count, total)
            })
            .collect()
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

fn prefix_paths(sorted_baskets: &[SortedBasket]) -> Vec<PrefixPath> {
    let mut paths: Vec<PrefixPath> = Vec::new();
    let mut index: HashMap<&[String], usize> = HashMap::new();

    for basket in sorted_baskets {
        match index.get(basket.sorted.as_slice()) {
            Some(&i) => paths[i].count += 1,
            None => {
                index.insert(basket.sorted.as_slice(), paths.len());
                paths.push(PrefixPath {
                    items: basket.sorted.clone(),
                    count: 1,
                });
            }
        }
    }
    paths
}
