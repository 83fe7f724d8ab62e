//! Asynchronous processing strategy
//!
//! Loads and settles several groups concurrently on a tokio multi-threaded
//! runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── ConcurrencyConfig (max_concurrent_groups)
//!     ├── async_reader::load_group (csv-async / tokio fs)
//!     └── build_report (one spawned task per group)
//! ```
//!
//! At most `max_concurrent_groups` groups are in flight at once. Reports are
//! collected in input order, so the output matches the sync strategy byte
//! for byte.

use crate::io::async_reader::load_group;
use crate::strategy::{build_report, write_reports, ProcessingStrategy, SettleConfig};
use crate::types::SettleError;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for concurrent group loading
#[derive(Clone, Debug, PartialEq)]
pub struct ConcurrencyConfig {
    /// Maximum number of groups loaded and settled at the same time
    pub max_concurrent_groups: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_groups: num_cpus::get(),
        }
    }
}

impl ConcurrencyConfig {
    /// Create a new ConcurrencyConfig, replacing a zero limit by the default
    pub fn new(max_concurrent_groups: usize) -> Self {
        if max_concurrent_groups == 0 {
            let default = Self::default();
            tracing::warn!(
                requested = max_concurrent_groups,
                using = default.max_concurrent_groups,
                "invalid max_concurrent_groups, using default"
            );
            return default;
        }

        Self {
            max_concurrent_groups,
        }
    }
}

/// Asynchronous processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: ConcurrencyConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: ConcurrencyConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Load, settle and write every group
    ///
    /// The first failing group aborts the run before anything is written.
    fn process(
        &self,
        inputs: &[PathBuf],
        config: &SettleConfig,
        output: &mut dyn Write,
    ) -> Result<(), SettleError> {
        let limit = self.config.max_concurrent_groups;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(limit)
            .build()?;

        let shared = Arc::new(config.clone());
        let reports = runtime.block_on(async {
            stream::iter(inputs.iter().cloned())
                .map(|input| {
                    let config = Arc::clone(&shared);
                    tokio::spawn(async move {
                        let group = load_group(input).await?;
                        Ok::<_, SettleError>(build_report(group, &config))
                    })
                })
                .buffered(limit)
                .map(|joined| match joined {
                    Ok(report) => report,
                    Err(e) => Err(SettleError::IoError {
                        message: format!("group task failed: {}", e),
                    }),
                })
                .try_collect::<Vec<_>>()
                .await
        })?;

        write_reports(&reports, config, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_format::{MEMBERS_FILE, TRIPS_FILE};
    use crate::strategy::SyncProcessingStrategy;
    use rstest::rstest;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn create_group(members: &str, trips: &str) -> TempDir {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join(MEMBERS_FILE), members).expect("Failed to write members");
        fs::write(dir.path().join(TRIPS_FILE), trips).expect("Failed to write trips");
        dir
    }

    #[rstest]
    #[case::custom(4, 4)]
    #[case::one(1, 1)]
    #[case::zero_falls_back(0, num_cpus::get())]
    fn test_concurrency_config_new(#[case] requested: usize, #[case] expected: usize) {
        assert_eq!(ConcurrencyConfig::new(requested).max_concurrent_groups, expected);
    }

    #[test]
    fn test_async_strategy_settles_group() {
        let dir = create_group(
            "id,name,paid\n1,Alice,30\n2,Bob,0\n",
            "name,spend,participants\nDinner,20,\"[1,2]\"\n",
        );
        let strategy = AsyncProcessingStrategy::new(ConcurrencyConfig::default());

        let mut output = Vec::new();
        strategy
            .process(&[dir.path().to_path_buf()], &SettleConfig::default(), &mut output)
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("2,Bob,"));
        assert!(output.contains("totalRemain,$20.00"));
    }

    #[rstest]
    #[case::serial(1)]
    #[case::concurrent(4)]
    fn test_async_strategy_matches_sync(#[case] limit: usize) {
        let groups: Vec<TempDir> = (1..=6)
            .map(|n| {
                create_group(
                    &format!("id,name,paid\n1,Alice,{n}\n2,Bob,{}\n", n * 2),
                    &format!("name,spend,participants\nTrip {n},{},\"[1,2]\"\n", n * 5),
                )
            })
            .collect();
        let inputs: Vec<PathBuf> = groups.iter().map(|dir| dir.path().to_path_buf()).collect();
        let config = SettleConfig {
            per_trip_columns: true,
            ..SettleConfig::default()
        };

        let mut sync_output = Vec::new();
        SyncProcessingStrategy
            .process(&inputs, &config, &mut sync_output)
            .unwrap();
        let mut async_output = Vec::new();
        AsyncProcessingStrategy::new(ConcurrencyConfig::new(limit))
            .process(&inputs, &config, &mut async_output)
            .unwrap();

        assert_eq!(async_output, sync_output);
    }

    #[test]
    fn test_async_strategy_handles_missing_input() {
        let dir = create_group("id,name,paid\n1,Alice,1\n", "name,spend,participants\n");
        let strategy = AsyncProcessingStrategy::new(ConcurrencyConfig::new(2));

        let mut output = Vec::new();
        let result = strategy.process(
            &[dir.path().to_path_buf(), PathBuf::from("nonexistent")],
            &SettleConfig::default(),
            &mut output,
        );

        assert!(matches!(result, Err(SettleError::FileNotFound { .. })));
        assert!(output.is_empty());
    }
}
