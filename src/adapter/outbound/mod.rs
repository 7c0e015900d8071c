//! Outbound adapters (driven side).

pub mod csv_files;
pub mod process_model;
