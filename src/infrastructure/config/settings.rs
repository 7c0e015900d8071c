//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the model program can be
//! overridden with `STOCKLENS_MODEL_PROGRAM`.
//!
//! # Example
//!
//! ```no_run
//! use stocklens::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analysis::AnalysisConfig;
use super::logging::LoggingConfig;
use super::model::{ModelConfig, MODEL_PROGRAM_ENV};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Default mining thresholds and grouping.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// External forecasting model.
    #[serde(default)]
    pub model: ModelConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_model_program(std::env::var(MODEL_PROGRAM_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        debug!(path = %path.display(), "Config file not found, using defaults");
        Self::parse_toml("")
    }

    /// Replace the model program when an override is present and non-empty.
    pub fn apply_model_program(&mut self, program: Option<String>) {
        if let Some(program) = program.filter(|p| !p.trim().is_empty()) {
            self.model.program = program;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for thresholds outside `[0, 100]`
    /// or a zero model timeout, and [`ConfigError::MissingField`] for an empty
    /// model program.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        let hundred = Decimal::ONE_HUNDRED;
        if self.analysis.min_support < Decimal::ZERO || self.analysis.min_support > hundred {
            return Err(ConfigError::InvalidValue {
                field: "min_support",
                reason: "must be between 0 and 100".to_string(),
            }
            .into());
        }
        if self.analysis.min_confidence < Decimal::ZERO || self.analysis.min_confidence > hundred {
            return Err(ConfigError::InvalidValue {
                field: "min_confidence",
                reason: "must be between 0 and 100".to_string(),
            }
            .into());
        }
        if self.model.program.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "program" }.into());
        }
        if self.model.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
