// CLI module
// Command-line interface, argument parsing and logging setup

mod args;

pub use args::{CliArgs, OutputFormat, StrategyType};

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "tinynotie_settlement=info";

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Install the tracing subscriber
///
/// Logs go to stderr so stdout only carries the report.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
