//! Core business logic module
//!
//! This module contains the settlement components:
//! - `calculator` - Per-member split of trips and group totals
//! - `money` - Currency formatting with explicit format modes
//! - `columns` - Display column metadata inferred from settlement rows
//! - `ledger` - In-memory group state with a JSON load/save boundary
//! - `report` - A settled group bundled with its name and currency

pub mod calculator;
pub mod columns;
pub mod ledger;
pub mod money;
pub mod report;

pub use calculator::{compute, compute_settlement, format_settlement};
pub use columns::{infer_columns, Align, ColumnKind, ColumnMetadata, Width};
pub use ledger::{GroupLedger, LedgerSnapshot, PaidAdjustment};
pub use money::{format_money, MoneyFormat};
pub use report::GroupReport;
