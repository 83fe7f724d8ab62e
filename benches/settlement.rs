//! Benchmark suite for settlement
//!
//! Measures the calculator on generated groups of growing size and compares
//! the sync and async strategies on the end-to-end fixtures.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use rust_decimal::Decimal;
use std::path::PathBuf;
use tinynotie_settlement::cli::StrategyType;
use tinynotie_settlement::strategy::{create_strategy, ConcurrencyConfig, SettleConfig};
use tinynotie_settlement::{compute, compute_settlement, infer_columns, Member, MemberId, Trip};

fn main() {
    divan::main();
}

/// A group of `size` members and `size / 2` trips, each shared by a
/// rotating third of the group
fn generate_group(size: u32) -> (Vec<Member>, Vec<Trip>) {
    let members = (1..=size)
        .map(|id| {
            Member::new(id, format!("member-{id}")).with_paid(Decimal::new(i64::from(id) * 1250, 2))
        })
        .collect();

    let trips = (0..size / 2)
        .map(|n| {
            let participants: Vec<MemberId> = (1..=size).filter(|id| (id + n) % 3 == 0).collect();
            let spend = Decimal::new(i64::from(n + 1) * 4999, 2);
            Trip::new(format!("trip-{n}"), spend, participants)
        })
        .collect();

    (members, trips)
}

#[divan::bench(args = [10, 100, 1000])]
fn compute_group(bencher: divan::Bencher, size: u32) {
    let (members, trips) = generate_group(size);
    bencher.bench(|| compute(divan::black_box(&members), divan::black_box(&trips)));
}

#[divan::bench(args = [10, 100, 1000])]
fn compute_and_format(bencher: divan::Bencher, size: u32) {
    let (members, trips) = generate_group(size);
    bencher.bench(|| {
        compute_settlement(divan::black_box(&members), divan::black_box(&trips), "$")
    });
}

#[divan::bench(args = [10, 100])]
fn infer_group_columns(bencher: divan::Bencher, size: u32) {
    let (members, trips) = generate_group(size);
    let settlement = compute(&members, &trips);
    bencher.bench(|| infer_columns(divan::black_box(&settlement.rows)));
}

fn fixture_groups() -> Vec<PathBuf> {
    ["happy_path", "per_trip_columns", "malformed_data", "large_amounts", "no_trips"]
        .iter()
        .map(|name| PathBuf::from("tests/fixtures").join(name))
        .collect()
}

/// Benchmark the synchronous strategy over every fixture group
#[divan::bench]
fn sync_strategy_fixtures() {
    let strategy = create_strategy(StrategyType::Sync, None);
    let mut output = Vec::new();

    strategy
        .process(&fixture_groups(), &SettleConfig::default(), &mut output)
        .expect("Processing failed");
}

/// Benchmark the asynchronous strategy over every fixture group
#[divan::bench]
fn async_strategy_fixtures() {
    let strategy = create_strategy(StrategyType::Async, Some(ConcurrencyConfig::default()));
    let mut output = Vec::new();

    strategy
        .process(&fixture_groups(), &SettleConfig::default(), &mut output)
        .expect("Processing failed");
}
