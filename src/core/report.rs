//! Settled groups ready for output
//!
//! A [`GroupReport`] bundles one group's settlement with its name, its
//! currency and the columns it is displayed with. Writers in `io` only ever
//! see reports.

use crate::core::calculator::{compute, format_settlement};
use crate::core::columns::{infer_columns, ColumnKind, ColumnMetadata};
use crate::types::{FormattedRow, FormattedSettlement, Member, Settlement, Trip};

/// One settled group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub group: String,
    pub currency: String,
    pub settlement: Settlement,
}

impl GroupReport {
    /// Settle a group's members and trips
    pub fn settle(
        group: impl Into<String>,
        currency: impl Into<String>,
        members: &[Member],
        trips: &[Trip],
    ) -> Self {
        GroupReport {
            group: group.into(),
            currency: currency.into(),
            settlement: compute(members, trips),
        }
    }

    /// Display columns, with or without the per-trip share columns
    pub fn columns(&self, per_trip_columns: bool) -> Vec<ColumnMetadata> {
        let mut columns = infer_columns(&self.settlement.rows);
        if !per_trip_columns {
            columns.retain(|column| !column.kind.is_trip());
        }
        columns
    }

    /// Settlement with money rendered in the group's currency
    pub fn formatted(&self) -> FormattedSettlement {
        format_settlement(&self.settlement, &self.currency)
    }
}

/// Text shown in a table cell for a column
///
/// A trip column the row has no share entry for renders as an empty cell.
pub fn cell(row: &FormattedRow, column: &ColumnKind) -> String {
    match column {
        ColumnKind::Id => row.id.to_string(),
        ColumnKind::Name => row.name.clone(),
        ColumnKind::Paid => row.paid.clone(),
        ColumnKind::Trip(name) => row
            .trips
            .iter()
            .find(|share| share.trip == *name)
            .map(|share| share.share.clone())
            .unwrap_or_default(),
        ColumnKind::Remain => row.remain.clone(),
        ColumnKind::Unpaid => row.unpaid.clone(),
    }
}
