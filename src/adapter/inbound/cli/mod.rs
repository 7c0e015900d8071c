//! CLI module graph and command dispatch.

pub mod accuracy;
pub mod command;
pub mod compare;
pub mod config;
pub mod forecast;
pub mod mine;
pub mod output;
pub mod paths;
pub mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use command::{Cli, ColorChoice, Commands, ConfigCommand};

fn color_enabled(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    }
}

/// Configure output and logging, load configuration, and run the command.
///
/// # Errors
///
/// Returns the first error raised by configuration loading or the command.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(
        cli.json,
        cli.quiet,
        cli.verbose,
        color_enabled(cli.color) && !cli.json,
    ));

    let config_path: PathBuf = cli.config.clone().unwrap_or_else(paths::default_config);
    let config = Config::load_or_default(&config_path)?;
    config.logging.with_verbosity(cli.verbose).init();

    match &cli.command {
        Commands::Mine(args) => mine::execute(args, &config),
        Commands::Compare(args) => compare::execute(args, &config),
        Commands::Forecast(args) => forecast::execute(args, &config).await,
        Commands::Accuracy(args) => accuracy::execute(args),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&config_path, &config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&config_path),
    }
}
