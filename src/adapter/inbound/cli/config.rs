//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", format!("{:?}", config.logging.format).to_lowercase());

    output::section("Analysis");
    output::field("Min support", format!("{}%", config.analysis.min_support));
    output::field("Min confidence", format!("{}%", config.analysis.min_confidence));
    output::field("Grouping", format!("{:?}", config.analysis.grouping));

    output::section("Model");
    output::field("Program", &config.model.program);
    output::field("Args", config.model.args.join(" "));
    if let Some(dir) = &config.model.working_dir {
        output::field("Working dir", dir.display());
    }
    output::field("Timeout", format!("{}s", config.model.timeout_secs));
    Ok(())
}

/// Execute `config validate`.
///
/// The configuration has already been loaded and validated by the caller;
/// this reports the outcome.
pub fn execute_validate(path: &Path) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }

    output::success("Configuration is valid");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("File not found, defaults apply");
    }
    Ok(())
}
