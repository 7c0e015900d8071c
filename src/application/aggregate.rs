//! Transaction aggregation: outgoing records → market baskets.
//!
//! Records sharing a grouping key collapse into one basket whose items are the
//! distinct item names of the group. Single-item baskets are kept because they
//! still count towards 1-itemset frequency.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Basket, OutgoingRecord, YearMonth};

/// Customer label used when baskets are grouped by date only.
pub const DAILY_CUSTOMER: &str = "Daily Transaction";

/// How records are grouped into baskets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// One basket per unique (date, customer) pair.
    #[default]
    DateCustomer,
    /// One basket per calendar day, regardless of customer.
    Date,
}

/// Which records take part in a mining run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum BasketFilter {
    #[default]
    All,
    Date(NaiveDate),
    Month(YearMonth),
}

impl BasketFilter {
    /// Whether a record dated `date` passes the filter.
    #[must_use]
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Date(target) => *target == date,
            Self::Month(month) => month.contains(date),
        }
    }
}

impl fmt::Display for BasketFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all dates"),
            Self::Date(date) => write!(f, "{date}"),
            Self::Month(month) => write!(f, "{month}"),
        }
    }
}

/// Group records into baskets.
///
/// Baskets are produced in ascending key order (date, then customer) and
/// numbered `1..=N` in that order. Empty input yields no baskets.
#[must_use]
pub fn aggregate(records: &[OutgoingRecord], grouping: Grouping) -> Vec<Basket> {
    let mut groups: BTreeMap<(NaiveDate, &str), BTreeSet<&str>> = BTreeMap::new();

    for record in records {
        let customer = match grouping {
            Grouping::DateCustomer => record.customer.as_str(),
            Grouping::Date => DAILY_CUSTOMER,
        };
        groups
            .entry((record.date, customer))
            .or_default()
            .insert(record.item_name.as_str());
    }

    let baskets: Vec<Basket> = groups
        .into_iter()
        .enumerate()
        .map(|(index, ((date, customer), items))| Basket::new(index + 1, date, customer, items))
        .collect();

    debug!(
        records = records.len(),
        baskets = baskets.len(),
        ?grouping,
        "Aggregated baskets"
    );
    baskets
}

/// Baskets chosen for a mining run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub baskets: Vec<Basket>,
    /// The filter the caller asked for.
    pub filter: BasketFilter,
    /// True when the filter matched nothing and all records were used instead.
    pub fallback_applied: bool,
}

/// Apply `filter` and aggregate, falling back to every record when the filter
/// matches nothing.
///
/// A filter never silently produces zero baskets; the fallback is reported in
/// [`Selection::fallback_applied`]. Only an empty record set yields an empty
/// selection.
#[must_use]
pub fn select(records: &[OutgoingRecord], filter: BasketFilter, grouping: Grouping) -> Selection {
    let filtered: Vec<OutgoingRecord> = records
        .iter()
        .filter(|record| filter.matches(record.date))
        .cloned()
        .collect();

    if filtered.is_empty() && !records.is_empty() {
        warn!(
            %filter,
            total_records = records.len(),
            "No transactions for filter, falling back to all dates"
        );
        return Selection {
            baskets: aggregate(records, grouping),
            filter,
            fallback_applied: true,
        };
    }

    Selection {
        baskets: aggregate(&filtered, grouping),
        filter,
        fallback_applied: false,
    }
}

/// Distinct record dates, ascending.
#[must_use]
pub fn available_dates(records: &[OutgoingRecord]) -> Vec<NaiveDate> {
    records
        .iter()
        .map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct record months, ascending.
#[must_use]
pub fn available_months(records: &[OutgoingRecord]) -> Vec<YearMonth> {
    records
        .iter()
        .map(|r| YearMonth::of(r.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn record(item: &str, day: u32, customer: &str) -> OutgoingRecord {
        OutgoingRecord::new(item, date(day), customer, dec!(1))
    }

    #[test]
    fn groups_by_date_and_customer() {
        let records = vec![
            record("Rice", 1, "Ani"),
            record("Oil", 1, "Ani"),
            record("Rice", 1, "Budi"),
            record("Sugar", 2, "Ani"),
        ];

        let baskets = aggregate(&records, Grouping::DateCustomer);

        assert_eq!(baskets.len(), 3);
        assert_eq!(baskets[0].id, 1);
        assert_eq!(baskets[0].customer, "Ani");
        assert_eq!(baskets[0].len(), 2);
        assert_eq!(baskets[1].customer, "Budi");
        assert_eq!(baskets[2].date, date(2));
    }

    #[test]
    fn repeated_items_count_once() {
        let records = vec![record("Rice", 1, "Ani"), record("Rice", 1, "Ani")];
        let baskets = aggregate(&records, Grouping::DateCustomer);
        assert_eq!(baskets.len(), 1);
        assert_eq!(baskets[0].len(), 1);
    }

    #[test]
    fn date_grouping_ignores_customer() {
        let records = vec![record("Rice", 1, "Ani"), record("Oil", 1, "Budi")];
        let baskets = aggregate(&records, Grouping::Date);
        assert_eq!(baskets.len(), 1);
        assert_eq!(baskets[0].customer, DAILY_CUSTOMER);
        assert_eq!(baskets[0].len(), 2);
    }

    #[test]
    fn customer_with_separator_does_not_merge_groups() {
        let records = vec![record("Rice", 1, "A|B"), record("Oil", 1, "A")];
        assert_eq!(aggregate(&records, Grouping::DateCustomer).len(), 2);
    }

    #[test]
    fn empty_input_yields_no_baskets() {
        assert!(aggregate(&[], Grouping::DateCustomer).is_empty());
        let selection = select(&[], BasketFilter::Date(date(1)), Grouping::DateCustomer);
        assert!(selection.baskets.is_empty());
        assert!(!selection.fallback_applied);
    }

    #[test]
    fn date_filter_keeps_matching_records() {
        let records = vec![record("Rice", 1, "Ani"), record("Oil", 2, "Ani")];
        let selection = select(&records, BasketFilter::Date(date(2)), Grouping::DateCustomer);
        assert_eq!(selection.baskets.len(), 1);
        assert!(!selection.fallback_applied);
    }

    #[test]
    fn unmatched_filter_falls_back_to_all_dates() {
        let records = vec![record("Rice", 1, "Ani"), record("Oil", 2, "Ani")];
        let selection = select(&records, BasketFilter::Date(date(3)), Grouping::DateCustomer);
        assert_eq!(selection.baskets.len(), 2);
        assert!(selection.fallback_applied);
    }

    #[test]
    fn month_filter() {
        let mut records = vec![record("Rice", 1, "Ani")];
        records.push(OutgoingRecord::new(
            "Oil",
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            "Ani",
            dec!(1),
        ));
        let feb = YearMonth::try_new(2025, 2).unwrap();
        let selection = select(&records, BasketFilter::Month(feb), Grouping::DateCustomer);
        assert_eq!(selection.baskets.len(), 1);
        assert!(selection.baskets[0].items.contains("Oil"));
    }

    #[test]
    fn available_dates_and_months_are_sorted_and_unique() {
        let records = vec![
            record("Rice", 2, "Ani"),
            record("Oil", 1, "Ani"),
            record("Oil", 2, "Budi"),
        ];
        assert_eq!(available_dates(&records), vec![date(1), date(2)]);
        assert_eq!(
            available_months(&records),
            vec![YearMonth::try_new(2025, 1).unwrap()]
        );
    }
}
