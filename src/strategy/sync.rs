//! Synchronous processing strategy
//!
//! Loads and settles groups one at a time on the calling thread, delegating:
//! - Group loading to `sync_reader::load_group`
//! - Settlement to `build_report`
//! - Output to `write_reports`

use crate::io::sync_reader::load_group;
use crate::strategy::{build_report, write_reports, ProcessingStrategy, SettleConfig};
use crate::types::SettleError;
use std::io::Write;
use std::path::PathBuf;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use tinynotie_settlement::strategy::{ProcessingStrategy, SettleConfig, SyncProcessingStrategy};
/// use std::path::PathBuf;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy
///     .process(&[PathBuf::from("groups/ski")], &SettleConfig::default(), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        inputs: &[PathBuf],
        config: &SettleConfig,
        output: &mut dyn Write,
    ) -> Result<(), SettleError> {
        let mut reports = Vec::with_capacity(inputs.len());
        for input in inputs {
            let group = load_group(input)?;
            reports.push(build_report(group, config));
        }

        write_reports(&reports, config, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_format::{MEMBERS_FILE, TRIPS_FILE};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Helper creating a group directory for testing
    fn create_group(members: &str, trips: &str) -> TempDir {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join(MEMBERS_FILE), members).expect("Failed to write members");
        fs::write(dir.path().join(TRIPS_FILE), trips).expect("Failed to write trips");
        dir
    }

    #[test]
    fn test_sync_strategy_settles_group() {
        let dir = create_group(
            "id,name,paid\n1,Alice,30\n2,Bob,0\n",
            "name,spend,participants\nDinner,20,\"[1,2]\"\n",
        );

        let mut output = Vec::new();
        SyncProcessingStrategy
            .process(&[dir.path().to_path_buf()], &SettleConfig::default(), &mut output)
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("1,Alice,$30.00,$20.00,"));
        assert!(output.contains("totalUnPaid,-$10.00"));
    }

    #[test]
    fn test_sync_strategy_keeps_input_order() {
        let first = create_group("id,name,paid\n1,Alice,1\n", "name,spend,participants\n");
        let second = create_group("id,name,paid\n1,Bob,1\n", "name,spend,participants\n");

        let mut output = Vec::new();
        SyncProcessingStrategy
            .process(
                &[second.path().to_path_buf(), first.path().to_path_buf()],
                &SettleConfig::default(),
                &mut output,
            )
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        let bob = output.find("Bob").unwrap();
        let alice = output.find("Alice").unwrap();
        assert!(bob < alice);
    }

    #[test]
    fn test_sync_strategy_handles_missing_input() {
        let mut output = Vec::new();
        let result = SyncProcessingStrategy.process(
            &[PathBuf::from("nonexistent")],
            &SettleConfig::default(),
            &mut output,
        );

        assert!(matches!(result, Err(SettleError::FileNotFound { .. })));
        assert!(output.is_empty());
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
