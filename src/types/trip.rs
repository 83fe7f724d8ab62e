//! Trip (shared expense) types for TinyNotie settlement

use super::member::MemberId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trip identifier inside a ledger
pub type TripId = u32;

/// One shared expense, split equally between its participants
///
/// `participant_member_ids` is treated as a set. Ids that do not belong to a
/// current member are tolerated and simply do not count as participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Trip name, also used as the key of its per-trip display column
    pub name: String,

    /// Total amount spent on this trip
    #[serde(default)]
    pub spend: Decimal,

    /// Ids of the members who split this trip
    #[serde(default, alias = "participantMemberIds")]
    pub participant_member_ids: Vec<MemberId>,
}

impl Trip {
    /// Create a trip
    pub fn new(
        name: impl Into<String>,
        spend: Decimal,
        participant_member_ids: Vec<MemberId>,
    ) -> Self {
        Trip {
            name: name.into(),
            spend,
            participant_member_ids,
        }
    }
}

/// A trip as stored in a ledger, addressable by a stable id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripEntry {
    /// Stable id used for edits and removal
    pub id: TripId,

    /// The expense itself
    pub trip: Trip,
}

/// Partial update of a trip
///
/// Fields left as `None` are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripUpdate {
    pub name: Option<String>,
    pub spend: Option<Decimal>,
    pub participant_member_ids: Option<Vec<MemberId>>,
}
