//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the transaction source and the external demand
//! model the core depends on.

pub mod model;
pub mod source;
