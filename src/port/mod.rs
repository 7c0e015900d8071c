//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the analytical core and its collaborators:
//!
//! ```text
//!   RecordSource ──> aggregate ──> apriori / fp_growth ──> rules ──> caller
//!   RecordSource ──> forecast ──(lags)──> DemandModel ──> caller
//! ```
//!
//! - [`outbound::source::RecordSource`] - supplies outgoing-stock records
//! - [`outbound::model::DemandModel`] - external point-forecast model

pub mod outbound;
