//! Group ledger
//!
//! Owns a group's members and trips in memory and applies the mutations a
//! group goes through: adding and removing members, adjusting what a member
//! has paid, and logging, editing and removing trips. The ledger never
//! settles incrementally; [`GroupLedger::settle`] recomputes from the
//! current snapshot every time.
//!
//! Persistence is an explicit boundary: a ledger is loaded from and saved
//! to a JSON snapshot, nothing is cached behind the caller's back.
//!
//! # Validation
//!
//! Writes are strict (unknown participants, negative amounts and duplicate
//! names are rejected) so the ledger never stores data the backend would
//! refuse. Removing a member leaves its id in existing trips; the
//! calculator ignores such dangling ids.

use crate::core::calculator;
use crate::core::money::DEFAULT_CURRENCY;
use crate::types::{
    GroupData, Member, MemberId, SettleError, Settlement, Trip, TripEntry, TripId, TripUpdate,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// How to change a member's paid amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaidAdjustment {
    /// Increase paid by the amount
    Add(Decimal),
    /// Decrease paid by the amount, never below zero
    Reduce(Decimal),
    /// Replace paid with the amount
    Set(Decimal),
}

/// Serialized form of a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub trips: Vec<TripEntry>,
    #[serde(default)]
    pub next_member_id: MemberId,
    #[serde(default)]
    pub next_trip_id: TripId,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// In-memory ledger of one group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLedger {
    name: String,
    currency: String,
    members: Vec<Member>,
    trips: Vec<TripEntry>,
    next_member_id: MemberId,
    next_trip_id: TripId,
}

impl GroupLedger {
    /// Create an empty ledger
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        GroupLedger {
            name: name.into(),
            currency: currency.into(),
            members: Vec::new(),
            trips: Vec::new(),
            next_member_id: 1,
            next_trip_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Members in insertion order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Snapshot of the trips, ready for settlement
    pub fn trips(&self) -> Vec<Trip> {
        self.trips.iter().map(|entry| entry.trip.clone()).collect()
    }

    /// Add a member with nothing paid
    ///
    /// # Errors
    ///
    /// - `EmptyMemberName` if the trimmed name is empty
    /// - `DuplicateMember` if a member with the same name (ignoring case) exists
    /// - `IdsExhausted` if no member id is left
    pub fn add_member(&mut self, name: &str) -> Result<MemberId, SettleError> {
        let name = self.validate_new_member_name(name, &[])?;
        self.reserve_member_ids(1)?;
        Ok(self.insert_member(name))
    }

    /// Add several members at once
    ///
    /// Either every member is added or none is: all names are validated,
    /// against the ledger and against each other, before the first insert.
    pub fn add_members<S: AsRef<str>>(
        &mut self,
        names: &[S],
    ) -> Result<Vec<MemberId>, SettleError> {
        let mut accepted: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = self.validate_new_member_name(name.as_ref(), &accepted)?;
            accepted.push(name);
        }
        self.reserve_member_ids(accepted.len())?;

        Ok(accepted
            .into_iter()
            .map(|name| self.insert_member(name))
            .collect())
    }

    /// Remove a member
    ///
    /// Trips keep referencing the removed id.
    pub fn remove_member(&mut self, id: MemberId) -> Result<Member, SettleError> {
        let position = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| SettleError::member_not_found(id))?;

        let member = self.members.remove(position);
        tracing::debug!(group = %self.name, member = id, "removed member");
        Ok(member)
    }

    /// Change what a member has paid
    ///
    /// Uses checked arithmetic to keep the ledger consistent.
    ///
    /// # Returns
    ///
    /// The member's new paid amount
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if no member has this id
    /// - `InvalidAmount` if the amount is negative
    /// - `InsufficientPaid` if a reduction would take paid below zero
    /// - `ArithmeticOverflow` if an addition overflows
    pub fn adjust_paid(
        &mut self,
        id: MemberId,
        adjustment: PaidAdjustment,
    ) -> Result<Decimal, SettleError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| SettleError::member_not_found(id))?;

        let new_paid = match adjustment {
            PaidAdjustment::Add(amount) => {
                ensure_non_negative(amount, "add_paid")?;
                member
                    .paid
                    .checked_add(amount)
                    .ok_or_else(|| SettleError::arithmetic_overflow("add_paid", id))?
            }
            PaidAdjustment::Reduce(amount) => {
                ensure_non_negative(amount, "reduce_paid")?;
                if member.paid < amount {
                    return Err(SettleError::insufficient_paid(id, member.paid, amount));
                }
                member.paid - amount
            }
            PaidAdjustment::Set(amount) => {
                ensure_non_negative(amount, "update_paid")?;
                amount
            }
        };

        member.paid = new_paid;
        Ok(new_paid)
    }

    /// Log a trip
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the spend is negative
    /// - `UnknownParticipant` if a participant is not a current member
    /// - `IdsExhausted` if no trip id is left
    pub fn add_trip(&mut self, trip: Trip) -> Result<TripId, SettleError> {
        ensure_non_negative(trip.spend, "add_trip")?;
        self.ensure_participants_known(&trip.name, &trip.participant_member_ids)?;

        let id = self.next_trip_id;
        self.next_trip_id = id
            .checked_add(1)
            .ok_or_else(|| SettleError::ids_exhausted("trip"))?;
        self.trips.push(TripEntry { id, trip });
        Ok(id)
    }

    /// Edit a trip
    ///
    /// The update is validated as a whole before anything changes.
    pub fn update_trip(&mut self, id: TripId, update: TripUpdate) -> Result<&Trip, SettleError> {
        let position = self
            .trips
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| SettleError::trip_not_found(id))?;

        if let Some(spend) = update.spend {
            ensure_non_negative(spend, "update_trip")?;
        }
        if let Some(participants) = &update.participant_member_ids {
            let name = update
                .name
                .as_deref()
                .unwrap_or(&self.trips[position].trip.name);
            self.ensure_participants_known(name, participants)?;
        }

        let trip = &mut self.trips[position].trip;
        if let Some(name) = update.name {
            trip.name = name;
        }
        if let Some(spend) = update.spend {
            trip.spend = spend;
        }
        if let Some(participants) = update.participant_member_ids {
            trip.participant_member_ids = participants;
        }
        Ok(trip)
    }

    /// Remove a trip
    pub fn remove_trip(&mut self, id: TripId) -> Result<Trip, SettleError> {
        let position = self
            .trips
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| SettleError::trip_not_found(id))?;

        Ok(self.trips.remove(position).trip)
    }

    /// Settle the current snapshot
    pub fn settle(&self) -> Settlement {
        calculator::compute(&self.members, &self.trips())
    }

    /// Capture the ledger as a serializable snapshot
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            name: self.name.clone(),
            currency: self.currency.clone(),
            members: self.members.clone(),
            trips: self.trips.clone(),
            next_member_id: self.next_member_id,
            next_trip_id: self.next_trip_id,
        }
    }

    /// Rebuild a ledger from a snapshot
    ///
    /// Id counters are raised past every id in use, so snapshots written by
    /// hand (or without counters) never hand out a duplicate id.
    ///
    /// # Errors
    ///
    /// `DuplicateId` if two members or two trips share an id
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, SettleError> {
        ensure_unique_ids("member", snapshot.members.iter().map(|m| m.id))?;
        ensure_unique_ids("trip", snapshot.trips.iter().map(|t| t.id))?;

        let max_member = snapshot.members.iter().map(|m| m.id).max().unwrap_or(0);
        let max_trip = snapshot.trips.iter().map(|t| t.id).max().unwrap_or(0);

        Ok(GroupLedger {
            name: snapshot.name,
            currency: snapshot.currency,
            members: snapshot.members,
            trips: snapshot.trips,
            next_member_id: snapshot.next_member_id.max(max_member.saturating_add(1)),
            next_trip_id: snapshot.next_trip_id.max(max_trip.saturating_add(1)),
        })
    }

    pub fn to_json(&self) -> Result<String, SettleError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Self, SettleError> {
        let snapshot: LedgerSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Load a ledger snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettleError> {
        if !path.exists() {
            return Err(SettleError::file_not_found(path));
        }
        let json = std::fs::read_to_string(path)?;
        let ledger = Self::from_json(&json)?;
        tracing::debug!(
            group = %ledger.name,
            members = ledger.members.len(),
            trips = ledger.trips.len(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    /// Save the ledger as a JSON snapshot
    pub fn save(&self, path: &Path) -> Result<(), SettleError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Check that `count` more member ids fit below `MemberId::MAX`
    fn reserve_member_ids(&self, count: usize) -> Result<(), SettleError> {
        MemberId::try_from(count)
            .ok()
            .and_then(|count| self.next_member_id.checked_add(count))
            .map(|_| ())
            .ok_or_else(|| SettleError::ids_exhausted("member"))
    }

    /// Callers reserve the id first
    fn insert_member(&mut self, name: String) -> MemberId {
        let id = self.next_member_id;
        self.next_member_id += 1;
        self.members.push(Member::new(id, name));
        id
    }

    fn validate_new_member_name(
        &self,
        name: &str,
        pending: &[String],
    ) -> Result<String, SettleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SettleError::EmptyMemberName);
        }

        let folded = name.to_lowercase();
        let taken = self
            .members
            .iter()
            .map(|m| m.name.as_str())
            .chain(pending.iter().map(String::as_str))
            .any(|existing| existing.to_lowercase() == folded);
        if taken {
            return Err(SettleError::duplicate_member(name));
        }

        Ok(name.to_string())
    }

    fn ensure_participants_known(
        &self,
        trip: &str,
        participants: &[MemberId],
    ) -> Result<(), SettleError> {
        match participants.iter().find(|id| self.member(**id).is_none()) {
            Some(&unknown) => Err(SettleError::unknown_participant(trip, unknown)),
            None => Ok(()),
        }
    }
}

impl From<GroupLedger> for GroupData {
    fn from(ledger: GroupLedger) -> Self {
        let trips = ledger.trips();
        GroupData {
            name: ledger.name,
            currency: Some(ledger.currency),
            members: ledger.members,
            trips,
        }
    }
}

fn ensure_unique_ids(kind: &str, ids: impl Iterator<Item = u32>) -> Result<(), SettleError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SettleError::duplicate_id(kind, id));
        }
    }
    Ok(())
}

fn ensure_non_negative(amount: Decimal, operation: &str) -> Result<(), SettleError> {
    if amount < Decimal::ZERO {
        return Err(SettleError::invalid_amount(amount, operation));
    }
    Ok(())
}
