//! Member-related types for TinyNotie settlement
//!
//! A member is one participant of a group, tracked by how much they have
//! paid in total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Member identifier
///
/// Matches the serial ids handed out by the backend (0 to 4,294,967,295)
pub type MemberId = u32;

/// One participant in a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique id within the group
    pub id: MemberId,

    /// Display name
    pub name: String,

    /// Total amount this member has paid so far
    ///
    /// Zero when the member is created; adjusted through the ledger.
    #[serde(default)]
    pub paid: Decimal,
}

impl Member {
    /// Create a member who has not paid anything yet
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Member {
            id,
            name: name.into(),
            paid: Decimal::ZERO,
        }
    }

    /// Builder-style setter for the paid amount
    pub fn with_paid(mut self, paid: Decimal) -> Self {
        self.paid = paid;
        self
    }
}
