//! Inventory-agnostic domain types.
//!
//! Plain data shared by the mining and forecasting services: outgoing stock
//! records, market baskets, itemsets, association rules, analysis steps and
//! forecast results. Nothing in here performs I/O.

pub mod basket;
pub mod catalog;
pub mod error;
pub mod forecast;
pub mod itemset;
pub mod percent;
pub mod record;
pub mod rule;
pub mod step;

pub use basket::Basket;
pub use catalog::{ItemCatalog, ItemInfo};
pub use error::DomainError;
pub use forecast::{DailyLags, ForecastResult, Lags, Period, YearMonth};
pub use itemset::{Itemset, ItemsetCount, PruneStatus};
pub use percent::{ratio, support, Threshold};
pub use record::OutgoingRecord;
pub use rule::{AssociationRule, RuleStatus};
pub use step::{Step, StepCode, StepRow};
