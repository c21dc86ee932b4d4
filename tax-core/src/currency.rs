//! Currency display for amounts returned by the backend.
//!
//! Amounts arrive as arbitrary JSON. They are coerced to a number with
//! "missing or invalid means zero" semantics and rendered as US dollars in
//! the en-US convention (`$1,234.50`, `-$1,234.50`). Formatting never fails.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};
use serde_json::Value;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::currency::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A coerced amount.
///
/// `Exact` covers everything a [`Decimal`] can hold. Larger finite numbers
/// keep their `f64` value so they still display instead of collapsing to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Exact(Decimal),
    Float(f64),
}

/// Coerces a JSON value to an amount.
///
/// * numbers are taken as-is
/// * strings are trimmed and parsed (plain or scientific notation); an empty
///   string is zero, digit separators (`1,234`, `1_000`) make it invalid
/// * `true` is one
/// * everything else, including unparseable strings and non-finite values,
///   is zero
pub fn coerce_amount(value: &Value) -> Amount {
    let coerced = match value {
        Value::Number(n) => parse_numeric(&n.to_string()),
        Value::String(s) => parse_numeric(s),
        Value::Bool(true) => Some(Amount::Exact(Decimal::ONE)),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    };

    coerced.unwrap_or_else(|| {
        if !value.is_null() {
            tracing::debug!(%value, "non-numeric amount displayed as zero");
        }
        Amount::Exact(Decimal::ZERO)
    })
}

fn parse_numeric(s: &str) -> Option<Amount> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(Amount::Exact(Decimal::ZERO));
    }
    // `Decimal::from_str` skips underscores.
    if trimmed.contains('_') {
        return None;
    }

    if let Ok(exact) = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        return Some(Amount::Exact(exact));
    }

    let float = trimmed.parse::<f64>().ok().filter(|f| f.is_finite())?;
    Some(match Decimal::from_f64(float) {
        Some(exact) => Amount::Exact(exact),
        None => Amount::Float(float),
    })
}

/// Formats an amount as US dollars with thousands grouping and two
/// fraction digits. A value that rounds to zero never carries a sign.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut magnitude = rounded.abs();
    magnitude.rescale(2);
    let digits = magnitude.to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("{sign}${}.{fraction}", group_thousands(whole))
}

/// Formats a magnitude beyond [`Decimal`] range. Such floats are whole
/// numbers, so the cents are always zero; the digits are the shortest ones
/// that round-trip.
fn format_wide(amount: f64) -> String {
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let whole = format!("{}", amount.abs().trunc());
    format!("{sign}${}.00", group_thousands(&whole))
}

/// Coerces and formats in one step; this is what the page displays.
pub fn format_currency(value: &Value) -> String {
    match coerce_amount(value) {
        Amount::Exact(amount) => format_usd(amount),
        Amount::Float(amount) => format_wide(amount),
    }
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
