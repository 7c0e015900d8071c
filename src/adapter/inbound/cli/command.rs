//! Command-line interface definitions.
//!
//! Defines the CLI structure for the stocklens application using `clap`.
//! Subcommands mine association rules from outgoing-stock records, compare
//! mining algorithms, forecast item demand and report prediction accuracy.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::application::aggregate::{BasketFilter, Grouping};
use crate::domain::{Period, YearMonth};

/// Market basket analysis and demand forecasting for inventory records
#[derive(Parser, Debug)]
#[command(name = "stocklens")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file [default: ~/.stocklens/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the stocklens CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mine frequent itemsets and association rules
    Mine(MineArgs),

    /// Run Apriori and FP-Growth side by side
    Compare(MiningArgs),

    /// Forecast demand for one item
    Forecast(ForecastArgs),

    /// Report accuracy of stored predictions
    Accuracy(AccuracyArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `stocklens config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Mining algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    #[default]
    Apriori,
    FpGrowth,
}

/// Basket grouping policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GroupingArg {
    /// One basket per (date, customer)
    DateCustomer,
    /// One basket per calendar day
    Date,
}

impl From<GroupingArg> for Grouping {
    fn from(arg: GroupingArg) -> Self {
        match arg {
            GroupingArg::DateCustomer => Self::DateCustomer,
            GroupingArg::Date => Self::Date,
        }
    }
}

/// Forecast horizon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Daily,
    Monthly,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Daily => Self::Daily,
            PeriodArg::Monthly => Self::Monthly,
        }
    }
}

/// Record selection and thresholds shared by `mine` and `compare`.
#[derive(Args, Debug)]
pub struct MiningArgs {
    /// CSV file of outgoing records (item_name, date, customer, quantity)
    #[arg(short, long)]
    pub records: PathBuf,

    /// Only mine baskets from this date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "month")]
    pub date: Option<NaiveDate>,

    /// Only mine baskets from this month (YYYY-MM)
    #[arg(long)]
    pub month: Option<YearMonth>,

    /// Minimum support percentage [default: from config]
    #[arg(long)]
    pub min_support: Option<Decimal>,

    /// Minimum confidence percentage [default: from config]
    #[arg(long)]
    pub min_confidence: Option<Decimal>,

    /// Basket grouping [default: from config]
    #[arg(long, value_enum)]
    pub grouping: Option<GroupingArg>,
}

impl MiningArgs {
    /// Basket filter selected by `--date` or `--month`.
    #[must_use]
    pub fn filter(&self) -> BasketFilter {
        match (self.date, self.month) {
            (Some(date), _) => BasketFilter::Date(date),
            (None, Some(month)) => BasketFilter::Month(month),
            (None, None) => BasketFilter::All,
        }
    }
}

/// Arguments for the `mine` subcommand.
#[derive(Args, Debug)]
pub struct MineArgs {
    #[command(flatten)]
    pub mining: MiningArgs,

    /// Mining algorithm
    #[arg(long, value_enum, default_value_t = Algorithm::Apriori)]
    pub algorithm: Algorithm,

    /// CSV item catalog (name, code, image) used to label rules
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Arguments for the `forecast` subcommand.
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// CSV file of outgoing records
    #[arg(short, long)]
    pub records: PathBuf,

    /// Item name to forecast
    #[arg(short, long)]
    pub item: String,

    /// Forecast horizon
    #[arg(long, value_enum, default_value_t = PeriodArg::Monthly)]
    pub period: PeriodArg,

    /// Reference date (YYYY-MM-DD) [default: today]
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Arguments for the `accuracy` subcommand.
#[derive(Args, Debug)]
pub struct AccuracyArgs {
    /// CSV file of predictions (item_id, period, predicted, actual)
    #[arg(long)]
    pub history: PathBuf,
}
