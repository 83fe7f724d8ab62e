//! Settlement calculation
//!
//! Splits every trip equally between its participants and works out, per
//! member, how much they are owed back (`remain`) or still owe (`unpaid`).
//!
//! # Rules
//!
//! - A trip's participant count is the number of distinct members whose id
//!   appears in its participant list. Ids with no matching member are
//!   ignored, so a trip whose participants were all removed charges nobody.
//! - `remain = paid - Σ shares`. A positive value is owed to the member and
//!   `unpaid` is zero; otherwise `remain` is zero and `unpaid` holds the
//!   (non-positive) difference.
//! - `total_spend` is reported as `-(total_paid - total_remain)`.
//! - Trips sharing a name share one display column; the later trip's share
//!   is the one shown, while both are charged.
//!
//! The calculation is pure: it reads its inputs, performs no I/O and never
//! fails.

use crate::core::money::{format_money, MoneyFormat};
use crate::types::{
    FormattedRow, FormattedSettlement, FormattedShare, FormattedTotals, GroupTotals, Member,
    MemberId, Settlement, SettlementRow, Trip, TripShare,
};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// A trip prepared for settlement: its column slot and its participants
struct PreparedTrip<'a> {
    trip: &'a Trip,
    column: usize,
    participants: HashSet<MemberId>,
}

/// Settle a group
///
/// # Arguments
///
/// * `members` - Group members in display order, unique by id
/// * `trips` - Trips in the order they were logged
///
/// # Returns
///
/// Per-member rows in input order and the group totals. Empty input yields
/// no rows and zeroed totals.
pub fn compute(members: &[Member], trips: &[Trip]) -> Settlement {
    let member_ids: HashSet<MemberId> = members.iter().map(|m| m.id).collect();
    let columns = trip_columns(trips);

    let prepared: Vec<PreparedTrip> = trips
        .iter()
        .map(|trip| PreparedTrip {
            trip,
            column: columns
                .iter()
                .position(|name| *name == trip.name)
                .unwrap_or_default(),
            participants: trip
                .participant_member_ids
                .iter()
                .copied()
                .filter(|id| member_ids.contains(id))
                .collect(),
        })
        .collect();

    let mut totals = GroupTotals {
        total_member: members.len(),
        ..GroupTotals::default()
    };
    let mut rows = Vec::with_capacity(members.len());

    for (member_index, member) in members.iter().enumerate() {
        let mut trip_shares: Vec<TripShare> = columns
            .iter()
            .map(|name| TripShare {
                trip: name.to_string(),
                share: None,
            })
            .collect();
        let mut shares_total = Decimal::ZERO;

        for prepared_trip in &prepared {
            if !prepared_trip.participants.contains(&member.id) {
                continue;
            }
            // count >= 1 here since this member is a participant
            let count = Decimal::from(prepared_trip.participants.len());
            let share = prepared_trip.trip.spend / count;
            shares_total = shares_total.saturating_add(share);
            trip_shares[prepared_trip.column].share = Some(share);

            tracing::trace!(
                member = member.id,
                trip = %prepared_trip.trip.name,
                %share,
                "charged trip share"
            );
        }

        let balance = member.paid.saturating_sub(shares_total);
        let (remain, unpaid) = if balance > Decimal::ZERO {
            (balance, Decimal::ZERO)
        } else {
            (Decimal::ZERO, balance)
        };

        totals.total_paid = totals.total_paid.saturating_add(member.paid);
        totals.total_remain = totals.total_remain.saturating_add(remain);
        totals.total_unpaid = totals.total_unpaid.saturating_add(unpaid);

        rows.push(SettlementRow {
            member_index,
            member_id: member.id,
            name: member.name.clone(),
            paid: member.paid,
            trip_shares,
            remain,
            unpaid,
        });
    }

    let spent = totals.total_paid.saturating_sub(totals.total_remain);
    totals.total_spend = -spent;

    Settlement { totals, rows }
}

/// Settle a group and render every money field with `currency_symbol`
pub fn compute_settlement(
    members: &[Member],
    trips: &[Trip],
    currency_symbol: &str,
) -> FormattedSettlement {
    format_settlement(&compute(members, trips), currency_symbol)
}

/// Render a computed settlement for display
///
/// `paid`, `remain`, shares and the paid/remain totals use the plain
/// format; `unpaid`, `total_unpaid` and `total_spend` are always shown with
/// a leading minus, even when negative inputs leave `total_spend` positive.
/// Trip columns a member has no share in and zero amounts become the
/// placeholder.
pub fn format_settlement(settlement: &Settlement, currency_symbol: &str) -> FormattedSettlement {
    let money = |amount: Decimal, format: MoneyFormat| {
        format_money(Some(amount), currency_symbol, format)
    };

    let rows = settlement
        .rows
        .iter()
        .map(|row| FormattedRow {
            member_index: row.member_index,
            id: row.member_id,
            name: row.name.clone(),
            paid: money(row.paid, MoneyFormat::Plain),
            trips: row
                .trip_shares
                .iter()
                .map(|share| FormattedShare {
                    trip: share.trip.clone(),
                    share: match share.share {
                        Some(amount) => money(amount, MoneyFormat::Plain),
                        None => money(Decimal::ZERO, MoneyFormat::Placeholder),
                    },
                })
                .collect(),
            remain: money(row.remain, MoneyFormat::Plain),
            unpaid: money(row.unpaid, MoneyFormat::NegativePrefixed),
        })
        .collect();

    let totals = &settlement.totals;
    FormattedSettlement {
        totals: FormattedTotals {
            total_member: totals.total_member,
            total_paid: money(totals.total_paid, MoneyFormat::Plain),
            total_remain: money(totals.total_remain, MoneyFormat::Plain),
            total_spend: money(totals.total_spend, MoneyFormat::NegativePrefixed),
            total_unpaid: money(totals.total_unpaid, MoneyFormat::NegativePrefixed),
        },
        rows,
    }
}

/// Distinct trip names in order of first appearance
fn trip_columns(trips: &[Trip]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for trip in trips {
        if !columns.contains(&trip.name.as_str()) {
            columns.push(trip.name.as_str());
        }
    }
    columns
}
