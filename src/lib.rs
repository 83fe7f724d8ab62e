//! TinyNotie Settlement Library
//! # Overview
//!
//! This library settles a group's shared expenses: given the members, what
//! each one paid, and the trips they shared, it computes every member's share
//! of each trip, who is owed money and who still owes, plus group totals.
//! Groups are loaded from CSV directories or JSON ledger snapshots by a sync
//! or an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Member, Trip, Settlement, etc.)
//! - [`cli`] - CLI arguments parsing and logging setup
//! - [`core`] - Business logic components:
//!   - [`core::calculator`] - Per-member split and group totals
//!   - [`core::money`] - Currency formatting
//!   - [`core::columns`] - Display column inference
//!   - [`core::ledger`] - Editable group state
//! - [`io`] - Group loading and report writing
//! - [`strategy`] - Sync and async processing pipelines
//!
//! # Settlement Rules
//!
//! - A trip's spend is divided equally among its distinct, known participants
//! - `remain = paid - shares` when positive, `unpaid = paid - shares` when negative
//! - Participant ids that match no member are ignored
//!
//! ```
//! use rust_decimal::Decimal;
//! use tinynotie_settlement::{compute_settlement, Member, Trip};
//!
//! let members = vec![
//!     Member::new(1, "Alice").with_paid(Decimal::new(30, 0)),
//!     Member::new(2, "Bob"),
//! ];
//! let trips = vec![Trip::new("Dinner", Decimal::new(20, 0), vec![1, 2])];
//!
//! let settlement = compute_settlement(&members, &trips, "$");
//! assert_eq!(settlement.rows[0].remain, "$20.00");
//! assert_eq!(settlement.rows[1].unpaid, "-$10.00");
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    compute, compute_settlement, format_money, infer_columns, ColumnMetadata, GroupLedger,
    GroupReport, MoneyFormat,
};
pub use io::{write_reports_csv, write_reports_json};
pub use types::{
    FormattedSettlement, GroupData, Member, MemberId, SettleError, Settlement, SettlementRow,
    Trip, TripId,
};
