//! Group input as read from disk

use super::member::Member;
use super::trip::Trip;

/// A group's members and trips, ready to be settled
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupData {
    /// Group name, shown in reports
    pub name: String,

    /// Currency symbol stored with the group, if the source carries one
    pub currency: Option<String>,

    pub members: Vec<Member>,
    pub trips: Vec<Trip>,
}
