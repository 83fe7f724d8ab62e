//! Money formatting
//!
//! All monetary display strings in the crate come from [`format_money`].
//! Amounts are rounded to two decimal places (midpoint away from zero),
//! grouped in thousands and prefixed with the group's currency symbol.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rendered in place of an absent or zero amount
pub const PLACEHOLDER: &str = "-/-  ";

/// Currency symbol used when neither the caller nor the ledger names one
pub const DEFAULT_CURRENCY: &str = "$";

/// How a non-zero amount is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoneyFormat {
    /// `$1,234.50`, negatives as `-$1,234.50`
    #[default]
    Plain,

    /// Always a leading minus before the magnitude: `-$1,234.50`
    ///
    /// The sign of the amount is not shown. Fields rendered this way are
    /// displayed as deductions whatever their sign.
    NegativePrefixed,

    /// Always the placeholder
    Placeholder,
}

/// Format an amount for display
///
/// `None` and amounts that round to zero render as [`PLACEHOLDER`] in
/// every mode.
pub fn format_money(amount: Option<Decimal>, symbol: &str, format: MoneyFormat) -> String {
    let rounded = match amount {
        Some(value) => value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        None => return PLACEHOLDER.to_string(),
    };
    if rounded.is_zero() {
        return PLACEHOLDER.to_string();
    }

    let magnitude = group_thousands(rounded.abs());
    match format {
        MoneyFormat::Plain if rounded.is_sign_negative() => format!("-{}{}", symbol, magnitude),
        MoneyFormat::Plain => format!("{}{}", symbol, magnitude),
        MoneyFormat::NegativePrefixed => format!("-{}{}", symbol, magnitude),
        MoneyFormat::Placeholder => PLACEHOLDER.to_string(),
    }
}

/// Render a non-negative, already rounded amount as `1,234.50`
fn group_thousands(value: Decimal) -> String {
    let fixed = format!("{:.2}", value);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('.');
    grouped.push_str(fraction);
    grouped
}
