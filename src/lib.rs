//! Stocklens - market basket analysis and demand forecasting for inventory data.
//!
//! This crate mines frequent itemsets and association rules from outgoing
//! stock records and prepares lag features for an external demand model.
//!
//! # Architecture
//!
//! - **`domain`** - Plain data: records, baskets, itemsets, rules, steps, forecasts
//! - **`port`** - Traits for the transaction source and the demand model
//! - **`application`** - Aggregation, Apriori, FP-Growth, rules, forecasting
//! - **`adapter`** - CSV readers, the external model process and the CLI
//! - **`infrastructure`** - Configuration, logging and wiring
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use stocklens::application::aggregate::{aggregate, Grouping};
//! use stocklens::application::analysis::run_apriori;
//! use stocklens::domain::{OutgoingRecord, Threshold};
//!
//! let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let records = vec![
//!     OutgoingRecord::new("Rice", day, "Ani", dec!(1)),
//!     OutgoingRecord::new("Oil", day, "Ani", dec!(1)),
//! ];
//! let baskets = aggregate(&records, Grouping::DateCustomer);
//! let min_support = Threshold::try_new("min_support", dec!(50)).unwrap();
//! let min_confidence = Threshold::try_new("min_confidence", dec!(70)).unwrap();
//!
//! let analysis = run_apriori(&baskets, min_support, min_confidence);
//! assert_eq!(analysis.rules.len(), 1);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
