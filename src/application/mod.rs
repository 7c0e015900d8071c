//! Application services (use cases).
//!
//! Pure analytical services over in-memory records: basket aggregation,
//! frequent-itemset mining, rule generation, step presentation, demand
//! forecasting and prediction accuracy.

pub mod accuracy;
pub mod aggregate;
pub mod analysis;
pub mod apriori;
pub mod forecast;
pub mod fp_growth;
pub mod rules;
