use rust_decimal::Decimal;
use thiserror::Error;

/// A form value that is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a number")]
pub struct ParseAmountError {
    input: String,
}

/// Parses an amount typed into a form.
///
/// Surrounding whitespace and comma thousands separators are ignored, an
/// empty value is zero, and scientific notation (`5e4`) is accepted.
/// Underscores are rejected, and so is anything a [`Decimal`] cannot hold.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    if normalized.contains('_') {
        return Err(ParseAmountError {
            input: s.to_string(),
        });
    }

    normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|e| {
            tracing::debug!(input = %s, "invalid amount: {e}");
            ParseAmountError {
                input: s.to_string(),
            }
        })
}
