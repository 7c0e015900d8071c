//! Demand model backed by an external process.
//!
//! The process is started as
//! `<program> <args..> predict <daily|monthly> <item_id> <lag..>` and must
//! print a `PREDICTION_RESULT:<number>` line on stdout. An optional
//! `PREDICTION_FULL:<json>` line carries timing metadata.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{ModelError, Result};
use crate::infrastructure::config::model::ModelConfig;
use crate::port::outbound::model::{DemandModel, ModelOutput, ModelRequest};

const RESULT_PREFIX: &str = "PREDICTION_RESULT:";
const FULL_PREFIX: &str = "PREDICTION_FULL:";

#[derive(Debug, Default, Deserialize)]
struct FullReport {
    #[serde(default)]
    execution_time_ms: Option<f64>,
    #[serde(default)]
    model_prediction_time_ms: Option<f64>,
}

/// External model process.
///
/// The child is killed if the prediction future is dropped, so a caller-side
/// timeout never leaves a stray process behind.
#[derive(Debug, Clone)]
pub struct ProcessModel {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl ProcessModel {
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>, working_dir: Option<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir,
        }
    }

    #[must_use]
    pub fn from_config(config: &ModelConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            config.working_dir.clone(),
        )
    }

    fn command(&self, request: &ModelRequest) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("predict")
            .arg(request.period.as_str())
            .arg(&request.item_id)
            .args(request.lags.values().iter().map(ToString::to_string))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

/// Extract the prediction and timing metadata from model stdout.
///
/// `output` is the combined diagnostic text attached to errors.
pub(crate) fn parse_output(stdout: &str, output: &str) -> std::result::Result<ModelOutput, ModelError> {
    let mut prediction = None;
    let mut report = FullReport::default();

    for line in stdout.lines().map(str::trim) {
        if let Some(value) = line.strip_prefix(RESULT_PREFIX) {
            let value = value.trim();
            let parsed: Decimal = value.parse().map_err(|_| ModelError::InvalidResult {
                value: value.to_string(),
                output: output.to_string(),
            })?;
            prediction = Some(parsed);
        } else if let Some(json) = line.strip_prefix(FULL_PREFIX) {
            match serde_json::from_str::<FullReport>(json.trim()) {
                Ok(parsed) => report = parsed,
                Err(e) => warn!(error = %e, "Ignoring malformed prediction details"),
            }
        }
    }

    let prediction = prediction.ok_or_else(|| ModelError::MissingResult {
        output: output.to_string(),
    })?;

    Ok(ModelOutput {
        prediction,
        execution_time_ms: report.execution_time_ms,
        model_time_ms: report.model_prediction_time_ms,
    })
}

#[async_trait]
impl DemandModel for ProcessModel {
    fn name(&self) -> &'static str {
        "process"
    }

    async fn predict(&self, request: &ModelRequest) -> Result<ModelOutput> {
        debug!(
            program = %self.program,
            item = %request.item_id,
            period = %request.period,
            lags = ?request.lags.values(),
            "Running model process"
        );

        let result = self
            .command(request)
            .output()
            .await
            .map_err(|source| ModelError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&result.stdout);
        let stderr = String::from_utf8_lossy(&result.stderr);
        let output = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            format!("{}\n{}", stdout.trim(), stderr.trim())
        };

        if !result.status.success() {
            warn!(
                program = %self.program,
                code = ?result.status.code(),
                "Model process failed"
            );
            return Err(ModelError::Exit {
                code: result.status.code(),
                output,
            }
            .into());
        }

        Ok(parse_output(&stdout, &output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lags, Period};
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn request(period: Period, lags: Vec<Decimal>) -> ModelRequest {
        ModelRequest {
            item_id: "Rice".into(),
            period,
            lags: Lags::try_new(lags).unwrap(),
        }
    }

    #[test]
    fn parses_result_and_details() {
        let stdout = "loading model\nPREDICTION_RESULT:42\nPREDICTION_FULL:{\"execution_time_ms\": 12.5, \"model_prediction_time_ms\": 3.0}\n";
        let parsed = parse_output(stdout, stdout).unwrap();
        assert_eq!(parsed.prediction, dec!(42));
        assert_eq!(parsed.execution_time_ms, Some(12.5));
        assert_eq!(parsed.model_time_ms, Some(3.0));
    }

    #[test]
    fn details_are_optional() {
        let parsed = parse_output("PREDICTION_RESULT: 7", "").unwrap();
        assert_eq!(parsed.prediction, dec!(7));
        assert_eq!(parsed.execution_time_ms, None);
    }

    #[test]
    fn missing_result_keeps_output() {
        let err = parse_output("Traceback: boom", "Traceback: boom").unwrap_err();
        assert!(matches!(err, ModelError::MissingResult { .. }));
        assert_eq!(err.output(), Some("Traceback: boom"));
    }

    #[test]
    fn unparseable_result() {
        let err = parse_output("PREDICTION_RESULT:lots", "").unwrap_err();
        assert!(matches!(err, ModelError::InvalidResult { ref value, .. } if value == "lots"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_period_item_and_lags_as_arguments() {
        let model = ProcessModel::new(
            "sh",
            vec![
                "-c".into(),
                "echo \"PREDICTION_RESULT:$(( $4 + $5 + $6 ))\"; echo \"$1 $2 $3\" >&2".into(),
                "model".into(),
            ],
            None,
        );
        let output = model
            .predict(&request(Period::Daily, vec![dec!(1), dec!(2), dec!(3)]))
            .await
            .unwrap();
        assert_eq!(output.prediction, dec!(6));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let model = ProcessModel::new(
            "sh",
            vec!["-c".into(), "echo 'model file missing' >&2; exit 3".into()],
            None,
        );
        let err = model
            .predict(&request(Period::Monthly, vec![dec!(30)]))
            .await
            .unwrap_err();
        match err {
            Error::Model(ModelError::Exit { code, output }) => {
                assert_eq!(code, Some(3));
                assert!(output.contains("model file missing"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let model = ProcessModel::new("/nonexistent/stocklens-model", Vec::new(), None);
        let err = model
            .predict(&request(Period::Monthly, vec![dec!(30)]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Model(ModelError::Spawn { .. })));
    }
}
