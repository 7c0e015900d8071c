//! Infrastructure configuration modules.

pub mod analysis;
pub mod logging;
pub mod model;
pub mod settings;
