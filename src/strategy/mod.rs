//! Processing strategy module for group settlement
//!
//! This module defines the Strategy pattern for complete settlement pipelines,
//! from loading each group to writing the report. Different implementations
//! (synchronous, concurrent async loading) are selected at runtime.

use crate::cli::{OutputFormat, StrategyType};
use crate::core::money::DEFAULT_CURRENCY;
use crate::core::report::GroupReport;
use crate::io::csv_format::write_reports_csv;
use crate::io::json_format::write_reports_json;
use crate::types::{GroupData, SettleError};
use std::io::Write;
use std::path::PathBuf;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, ConcurrencyConfig};
pub use sync::SyncProcessingStrategy;

/// Options shared by every strategy
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettleConfig {
    /// Currency symbol overriding the one stored with each group
    pub currency: Option<String>,
    pub format: OutputFormat,
    /// Include one column per trip in the report
    pub per_trip_columns: bool,
}

impl SettleConfig {
    /// Currency for a group: the override, then the group's own, then `$`
    pub fn currency_for(&self, group: &GroupData) -> String {
        self.currency
            .as_deref()
            .or(group.currency.as_deref())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string()
    }
}

/// Processing strategy trait for complete settlement pipelines
///
/// Each strategy loads every input group, settles it and writes one report
/// per group, in input order, to the output.
pub trait ProcessingStrategy: Send + Sync {
    /// Settle the groups found at `inputs` and write the reports to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An input does not exist or cannot be read
    /// - A ledger snapshot is not valid JSON
    /// - Output cannot be written
    ///
    /// Individual malformed CSV records are logged and skipped; they never
    /// fail the run.
    fn process(
        &self,
        inputs: &[PathBuf],
        config: &SettleConfig,
        output: &mut dyn Write,
    ) -> Result<(), SettleError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` only applies to the async strategy.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<ConcurrencyConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

/// Settle a loaded group
pub fn build_report(group: GroupData, config: &SettleConfig) -> GroupReport {
    let currency = config.currency_for(&group);
    tracing::info!(
        group = %group.name,
        members = group.members.len(),
        trips = group.trips.len(),
        "settling group"
    );
    GroupReport::settle(group.name, currency, &group.members, &group.trips)
}

/// Write reports in the configured format
pub fn write_reports(
    reports: &[GroupReport],
    config: &SettleConfig,
    output: &mut dyn Write,
) -> Result<(), SettleError> {
    match config.format {
        OutputFormat::Csv => write_reports_csv(reports, config.per_trip_columns, output),
        OutputFormat::Json => write_reports_json(reports, config.per_trip_columns, output),
    }
}
