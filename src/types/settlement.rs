//! Settlement result types
//!
//! These are derived values: they are recomputed from scratch for every
//! snapshot of members and trips and never persisted.

use super::member::MemberId;
use rust_decimal::Decimal;
use serde::Serialize;

/// A member's share of one trip column
///
/// There is one `TripShare` per distinct trip name, in order of first
/// appearance. `share` is `None` when the member took part in no trip of
/// that name.
#[derive(Debug, Clone, PartialEq)]
pub struct TripShare {
    pub trip: String,
    pub share: Option<Decimal>,
}

/// Per-member settlement values
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementRow {
    /// Position of the member in the input list
    pub member_index: usize,

    pub member_id: MemberId,

    pub name: String,

    /// Amount the member has paid
    pub paid: Decimal,

    /// Per-trip shares for the optional trip columns
    pub trip_shares: Vec<TripShare>,

    /// Amount owed back to the member (zero unless they overpaid)
    pub remain: Decimal,

    /// Amount the member still owes, as a non-positive number
    pub unpaid: Decimal,
}

/// Group-wide totals
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotals {
    pub total_member: usize,
    pub total_paid: Decimal,
    pub total_remain: Decimal,

    /// Reported as `-(total_paid - total_remain)`
    pub total_spend: Decimal,

    pub total_unpaid: Decimal,
}

impl Default for GroupTotals {
    fn default() -> Self {
        GroupTotals {
            total_member: 0,
            total_paid: Decimal::ZERO,
            total_remain: Decimal::ZERO,
            total_spend: Decimal::ZERO,
            total_unpaid: Decimal::ZERO,
        }
    }
}

/// Result of settling one group
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settlement {
    pub totals: GroupTotals,
    pub rows: Vec<SettlementRow>,
}

/// A formatted per-trip share
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedShare {
    pub trip: String,
    pub share: String,
}

/// A settlement row with every money field rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedRow {
    pub member_index: usize,
    pub id: MemberId,
    pub name: String,
    pub paid: String,
    pub trips: Vec<FormattedShare>,
    pub remain: String,
    pub unpaid: String,
}

/// Group totals rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTotals {
    #[serde(rename = "totalMember")]
    pub total_member: usize,
    #[serde(rename = "totalPaid")]
    pub total_paid: String,
    #[serde(rename = "totalRemain")]
    pub total_remain: String,
    #[serde(rename = "totalSpend")]
    pub total_spend: String,
    #[serde(rename = "totalUnPaid")]
    pub total_unpaid: String,
}

/// Settlement with every money field rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSettlement {
    pub totals: FormattedTotals,
    pub rows: Vec<FormattedRow>,
}
