//! CSV format handling for group input and settlement output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Record structures for `members.csv` and `trips.csv`
//! - Lenient conversion from CSV records to domain types
//! - Settlement report serialization
//!
//! All functions are pure (no file access) for easy testing.
//!
//! # Input format
//!
//! ```text
//! members.csv            trips.csv
//! id,name,paid           name,spend,participants
//! 1,Alice,30             Dinner,20,"[1,2]"
//! 2,Bob,                 Taxi,8.50,"[""2""]"
//! ```
//!
//! Missing or unparseable amounts count as zero and a malformed participant
//! list counts as empty. Both are logged and the record is kept.

use crate::core::report::{cell, GroupReport};
use crate::types::{Member, MemberId, SettleError, Trip};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use std::str::FromStr;

/// Name of the members file inside a group directory
pub const MEMBERS_FILE: &str = "members.csv";

/// Name of the trips file inside a group directory
pub const TRIPS_FILE: &str = "trips.csv";

/// Row of `members.csv`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvMemberRecord {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub paid: Option<String>,
}

/// Row of `trips.csv`
///
/// `participants` holds a JSON-encoded list of member ids.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvTripRecord {
    pub name: String,
    #[serde(default)]
    pub spend: Option<String>,
    #[serde(default, alias = "participantMemberIds")]
    pub participants: Option<String>,
}

/// Convert a members.csv record to a Member
pub fn convert_member_record(record: CsvMemberRecord, line: Option<u64>) -> Member {
    let paid = parse_amount(record.paid.as_deref(), "paid", line);
    Member::new(record.id, record.name).with_paid(paid)
}

/// Convert a trips.csv record to a Trip
pub fn convert_trip_record(record: CsvTripRecord, line: Option<u64>) -> Trip {
    let spend = parse_amount(record.spend.as_deref(), "spend", line);
    let participants = parse_participant_ids(record.participants.as_deref(), &record.name, line);
    Trip::new(record.name, spend, participants)
}

/// Drop members whose id was already seen
///
/// The first occurrence of an id wins.
pub fn dedupe_members(members: Vec<Member>) -> Vec<Member> {
    let mut seen: HashSet<MemberId> = HashSet::with_capacity(members.len());
    members
        .into_iter()
        .filter(|member| {
            let first = seen.insert(member.id);
            if !first {
                tracing::warn!(member = member.id, name = %member.name, "ignoring duplicate member id");
            }
            first
        })
        .collect()
}

/// Parse a money amount, treating absent or invalid values as zero
pub fn parse_amount(raw: Option<&str>, field: &str, line: Option<u64>) -> Decimal {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Decimal::ZERO,
    };

    match Decimal::from_str(raw) {
        Ok(amount) => amount,
        Err(e) => {
            tracing::warn!(field, value = raw, ?line, error = %e, "invalid amount, using 0");
            Decimal::ZERO
        }
    }
}

/// Parse a JSON-encoded list of member ids
///
/// Entries may be numbers or numeric strings. Malformed JSON yields an
/// empty list and unusable entries are skipped; both are logged.
pub fn parse_participant_ids(raw: Option<&str>, trip: &str, line: Option<u64>) -> Vec<MemberId> {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Vec::new(),
    };

    let entries: Vec<Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(trip, ?line, error = %e, "malformed participant list, using none");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = match entry {
                Value::Number(n) => n.as_u64().and_then(|n| MemberId::try_from(n).ok()),
                Value::String(s) => s.trim().parse::<MemberId>().ok(),
                _ => None,
            };
            if id.is_none() {
                tracing::warn!(trip, ?line, %entry, "skipping invalid participant id");
            }
            id
        })
        .collect()
}

/// Write settlement reports as CSV
///
/// Each group is written as:
/// - a `group,<name>` record
/// - a header record with the column labels
/// - one record per member
/// - `totalMember`, `totalPaid`, `totalSpend`, `totalRemain` and
///   `totalUnPaid` key/value records
///
/// Records differ in length, so the writer is flexible.
pub fn write_reports_csv(
    reports: &[GroupReport],
    per_trip_columns: bool,
    output: &mut dyn Write,
) -> Result<(), SettleError> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(output);

    for report in reports {
        let columns = report.columns(per_trip_columns);
        let formatted = report.formatted();

        writer.write_record(["group", report.group.as_str()])?;
        writer.write_record(columns.iter().map(|column| column.header.as_str()))?;
        for row in &formatted.rows {
            writer.write_record(columns.iter().map(|column| cell(row, &column.kind)))?;
        }

        let totals = &formatted.totals;
        let total_member = totals.total_member.to_string();
        writer.write_record(["totalMember", total_member.as_str()])?;
        writer.write_record(["totalPaid", totals.total_paid.as_str()])?;
        writer.write_record(["totalSpend", totals.total_spend.as_str()])?;
        writer.write_record(["totalRemain", totals.total_remain.as_str()])?;
        writer.write_record(["totalUnPaid", totals.total_unpaid.as_str()])?;
    }

    writer.flush()?;

    Ok(())
}
