//! Display column metadata for settlement tables
//!
//! Columns are described by a fixed set of known fields plus one dynamic
//! column per trip name. The key set is taken from the first settlement
//! row, or from the default key set when there are no rows.

use crate::types::SettlementRow;
use serde::Serialize;

/// Header labels of the default key set, in display order
pub const DEFAULT_HEADERS: [&str; 5] = ["ID", "Name", "Paid", "Remain", "Unpaid"];

/// Fixed width of the id column
pub const ID_WIDTH: u16 = 60;

/// Minimum width of the name column
pub const NAME_MIN_WIDTH: u16 = 150;

/// Width given to each character of a column key
pub const WIDTH_PER_CHAR: u16 = 12;

/// Which field a column shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Id,
    Name,
    Paid,
    /// Per-trip share column, keyed by trip name
    Trip(String),
    Remain,
    Unpaid,
}

impl ColumnKind {
    /// Key of the column in a settlement row
    pub fn key(&self) -> &str {
        match self {
            ColumnKind::Id => "id",
            ColumnKind::Name => "name",
            ColumnKind::Paid => "paid",
            ColumnKind::Trip(name) => name,
            ColumnKind::Remain => "remain",
            ColumnKind::Unpaid => "unpaid",
        }
    }

    pub fn is_trip(&self) -> bool {
        matches!(self, ColumnKind::Trip(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Width {
    /// Exactly this many pixels
    Fixed(u16),
    /// At least this many pixels
    Min(u16),
    /// Grows with the key; value is the suggested width
    Flex(u16),
}

/// Display metadata for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    #[serde(skip)]
    pub kind: ColumnKind,
    pub key: String,
    pub header: String,
    pub align: Align,
    pub width: Width,
}

impl ColumnMetadata {
    fn new(kind: ColumnKind) -> Self {
        let key = kind.key().to_string();
        let header = match &kind {
            ColumnKind::Trip(name) => name.clone(),
            _ => header_for_key(&key).map_or_else(|| key.clone(), str::to_string),
        };
        let (align, width) = match &kind {
            ColumnKind::Id => (Align::Center, Width::Fixed(ID_WIDTH)),
            ColumnKind::Name => (Align::Left, Width::Min(NAME_MIN_WIDTH)),
            ColumnKind::Remain | ColumnKind::Unpaid => (Align::Right, flex_width(&key)),
            ColumnKind::Paid | ColumnKind::Trip(_) => (Align::Center, flex_width(&key)),
        };

        ColumnMetadata {
            kind,
            key,
            header,
            align,
            width,
        }
    }
}

/// Infer display columns from computed settlement rows
///
/// Uses the key set of the first row: id, name, paid, one column per trip
/// share, remain and unpaid. Without rows the default key set is used.
pub fn infer_columns(rows: &[SettlementRow]) -> Vec<ColumnMetadata> {
    let trip_columns = rows
        .first()
        .map(|row| {
            row.trip_shares
                .iter()
                .map(|share| ColumnKind::Trip(share.trip.clone()))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    [ColumnKind::Id, ColumnKind::Name, ColumnKind::Paid]
        .into_iter()
        .chain(trip_columns)
        .chain([ColumnKind::Remain, ColumnKind::Unpaid])
        .map(ColumnMetadata::new)
        .collect()
}

/// Find the default header label for a key
///
/// Matches case-insensitively when the key contains a label. The longest
/// matching label wins so that `unpaid` maps to `Unpaid` rather than `Paid`.
pub fn header_for_key(key: &str) -> Option<&'static str> {
    let key = key.to_lowercase();
    DEFAULT_HEADERS
        .iter()
        .copied()
        .filter(|label| key.contains(&label.to_lowercase()))
        .max_by_key(|label| label.len())
}

fn flex_width(key: &str) -> Width {
    let chars = u16::try_from(key.chars().count()).unwrap_or(u16::MAX / WIDTH_PER_CHAR);
    Width::Flex(chars.saturating_mul(WIDTH_PER_CHAR))
}
