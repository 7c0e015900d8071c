use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Expected, recoverable shortages of input data.
///
/// These are conditions the caller should turn into a friendly message, not
/// faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Insufficiency {
    #[error("no transactions available for analysis")]
    NoTransactions,

    #[error("insufficient daily data for prediction: {days} of 3 days in the trailing window")]
    DailyHistory { days: usize },

    #[error("no prior-month data for {month}")]
    PreviousMonth { month: String },
}

/// Failures of the external forecasting model.
///
/// The raw diagnostic text from the model is preserved for logging. Nothing
/// here is retried.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to start model '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model exited with status {code:?}: {output}")]
    Exit { code: Option<i32>, output: String },

    #[error("model timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },

    #[error("model output has no prediction result: {output}")]
    MissingResult { output: String },

    #[error("model returned unparseable prediction '{value}'")]
    InvalidResult { value: String, output: String },
}

impl ModelError {
    /// Raw model output, when the model produced any.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Exit { output, .. }
            | Self::MissingResult { output }
            | Self::InvalidResult { output, .. } => Some(output),
            Self::Spawn { .. } | Self::Timeout { .. } => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Insufficient(#[from] Insufficiency),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
