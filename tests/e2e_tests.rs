//! End-to-end integration tests
//!
//! These tests validate the complete settlement pipeline using predefined
//! test fixtures. Each test:
//! 1. Loads a group from a fixture directory (or its `ledger.json`)
//! 2. Settles it with the selected strategy
//! 3. Writes the report to a temporary file
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path scenarios
//! - Per-trip columns with dangling participants and repeated trip names
//! - Malformed records and amounts
//! - Thousands separators and rounding
//! - Groups without trips and JSON ledger snapshots
//!
//! Each test is run twice: once with the sync strategy and once with the
//! async strategy.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::NamedTempFile;
    use tinynotie_settlement::cli::{OutputFormat, StrategyType};
    use tinynotie_settlement::strategy::{create_strategy, SettleConfig};

    /// Input of a fixture: its ledger snapshot if it has one, else the directory
    fn fixture_input(fixture_name: &str) -> PathBuf {
        let fixture_dir = Path::new("tests/fixtures").join(fixture_name);
        let ledger = fixture_dir.join("ledger.json");
        if ledger.exists() {
            ledger
        } else {
            fixture_dir
        }
    }

    fn expected_output(fixture_name: &str) -> String {
        let expected_path = format!("tests/fixtures/{}/expected.csv", fixture_name);
        fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e))
    }

    /// Settle `inputs` with the given strategy and return the report
    fn run(inputs: &[PathBuf], config: &SettleConfig, strategy_type: StrategyType) -> String {
        let strategy = create_strategy(strategy_type, None);
        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(inputs, config, &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to settle groups: {}", e));
        temp_output.flush().expect("Failed to flush temp file");

        fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e))
    }

    /// Run a fixture and compare with its expected.csv
    fn run_test_fixture(fixture_name: &str, per_trip: bool, strategy_type: StrategyType) {
        let config = SettleConfig {
            per_trip_columns: per_trip,
            ..SettleConfig::default()
        };

        let actual_output = run(&[fixture_input(fixture_name)], &config, strategy_type.clone());
        let expected_output = expected_output(fixture_name);

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures with both strategies
    #[rstest]
    #[case("happy_path", false)]
    #[case("per_trip_columns", true)]
    #[case("malformed_data", false)]
    #[case("large_amounts", false)]
    #[case("no_trips", false)]
    #[case("ledger_snapshot", false)]
    fn test_fixtures(
        #[case] fixture: &str,
        #[case] per_trip: bool,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, per_trip, strategy);
    }

    #[rstest]
    fn test_multiple_groups_in_input_order(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let fixtures = ["no_trips", "ledger_snapshot", "happy_path"];
        let inputs: Vec<PathBuf> = fixtures.iter().map(|name| fixture_input(name)).collect();

        let actual_output = run(&inputs, &SettleConfig::default(), strategy);

        let expected: String = fixtures.iter().map(|name| expected_output(name)).collect();
        assert_eq!(actual_output, expected);
    }

    #[rstest]
    fn test_currency_override(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let config = SettleConfig {
            currency: Some("W".to_string()),
            ..SettleConfig::default()
        };

        let actual_output = run(&[fixture_input("ledger_snapshot")], &config, strategy);

        assert!(actual_output.contains("1,Jo,W120.00,W80.00,"));
        assert!(actual_output.contains("totalUnPaid,-W90.00"));
        assert!(!actual_output.contains('€'));
    }

    #[rstest]
    fn test_json_report(#[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType) {
        let config = SettleConfig {
            format: OutputFormat::Json,
            per_trip_columns: true,
            ..SettleConfig::default()
        };

        let actual_output = run(&[fixture_input("per_trip_columns")], &config, strategy);
        let reports: serde_json::Value =
            serde_json::from_str(&actual_output).expect("Output is not valid JSON");

        let report = &reports[0];
        assert_eq!(report["group"], "per_trip_columns");
        assert_eq!(report["totals"]["totalMember"], 3);
        assert_eq!(report["totals"]["totalUnPaid"], "-$67.00");
        assert_eq!(report["rows"][2]["name"], "Cid");
        assert_eq!(report["rows"][2]["trips"][0]["share"], "$12.00");
        assert_eq!(report["columns"][3]["header"], "Hotel");
        assert_eq!(report["columns"][4]["header"], "Lunch");
    }

    #[rstest]
    fn test_missing_input_fails(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let strategy = create_strategy(strategy, None);
        let mut output = Vec::new();

        let result = strategy.process(
            &[PathBuf::from("tests/fixtures/does_not_exist")],
            &SettleConfig::default(),
            &mut output,
        );

        assert!(result.is_err());
        assert!(output.is_empty());
    }
}
