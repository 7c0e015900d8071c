//! External demand model configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides [`ModelConfig::program`].
pub const MODEL_PROGRAM_ENV: &str = "STOCKLENS_MODEL_PROGRAM";

/// How to launch the forecasting model process.
///
/// The process is invoked as
/// `<program> <args..> predict <daily|monthly> <item_id> <lag..>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Executable to run. Defaults to "python3".
    #[serde(default = "default_program")]
    pub program: String,

    /// Leading arguments, typically the model script.
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Directory the process runs in.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Seconds before a running model is killed. Defaults to 60.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_program() -> String {
    "python3".into()
}

fn default_args() -> Vec<String> {
    vec!["stock_predictor.py".into()]
}

const fn default_timeout_secs() -> u64 {
    60
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
