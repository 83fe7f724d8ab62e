//! TinyNotie settlement CLI
//!
//! Settles one or more expense groups and prints the reports to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- groups/ski > ski.csv
//! cargo run -- --per-trip groups/ski groups/dinner.json > report.csv
//! cargo run -- --format json --currency € groups/ski > ski.json
//! cargo run -- --strategy async --max-concurrent 8 groups/* > report.csv
//! ```
//!
//! Each input is either a directory holding `members.csv` (and optionally
//! `trips.csv`) or a JSON ledger snapshot. Logs go to stderr; set
//! `RUST_LOG` to change their level.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing input, unreadable file, invalid ledger, etc.)

use std::process;
use tinynotie_settlement::cli;
use tinynotie_settlement::strategy;

fn main() {
    cli::init_logging();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_concurrency_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    let config = args.to_settle_config();
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.inputs, &config, &mut output) {
        tracing::error!(error = %e, "settlement failed");
        process::exit(1);
    }
}
