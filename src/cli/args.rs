use crate::strategy::{ConcurrencyConfig, SettleConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Settle shared group expenses: who is owed and who still owes
#[derive(Parser, Debug)]
#[command(name = "tinynotie-settle")]
#[command(about = "Settle shared group expenses: who is owed and who still owes", long_about = None)]
pub struct CliArgs {
    /// Group inputs: directories holding members.csv and trips.csv, or ledger .json files
    #[arg(
        value_name = "INPUT",
        required = true,
        help = "Group directory (members.csv, trips.csv) or ledger snapshot (.json)"
    )]
    pub inputs: Vec<PathBuf>,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' settles groups one by one, 'async' loads them concurrently"
    )]
    pub strategy: StrategyType,

    /// Currency symbol used for every group
    #[arg(
        long = "currency",
        value_name = "SYMBOL",
        help = "Currency symbol (default: the ledger's currency, or '$')"
    )]
    pub currency: Option<String>,

    /// Report format
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "csv",
        help = "Report format: 'csv' or 'json'"
    )]
    pub format: OutputFormat,

    /// Include one column per trip
    #[arg(long = "per-trip", help = "Include each member's share of every trip")]
    pub per_trip: bool,

    /// Maximum number of groups loaded concurrently (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of groups loaded concurrently (default: CPU cores)"
    )]
    pub max_concurrent_groups: Option<usize>,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available report formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl CliArgs {
    /// Settlement options from CLI arguments
    pub fn to_settle_config(&self) -> SettleConfig {
        SettleConfig {
            currency: self.currency.clone(),
            format: self.format,
            per_trip_columns: self.per_trip,
        }
    }

    /// Create a ConcurrencyConfig from CLI arguments
    ///
    /// Falls back to the default when no limit was given; invalid values are
    /// reported and replaced by `ConcurrencyConfig::new`.
    pub fn to_concurrency_config(&self) -> ConcurrencyConfig {
        match self.max_concurrent_groups {
            Some(max) => ConcurrencyConfig::new(max),
            None => ConcurrencyConfig::default(),
        }
    }
}
