//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration loading, logging setup and runtime wiring.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for the forecaster
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
