//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `group`: A group's members and trips as read from disk
//! - `member`: Group members and their ids
//! - `trip`: Shared expenses and ledger trip entries
//! - `settlement`: Derived per-member rows and group totals
//! - `error`: Error types for the settlement crate

pub mod error;
pub mod group;
pub mod member;
pub mod settlement;
pub mod trip;

pub use error::SettleError;
pub use group::GroupData;
pub use member::{Member, MemberId};
pub use settlement::{
    FormattedRow, FormattedSettlement, FormattedShare, FormattedTotals, GroupTotals, Settlement,
    SettlementRow, TripShare,
};
pub use trip::{Trip, TripEntry, TripId, TripUpdate};
