use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FilingStatus;

/// Body of `POST /api/estimate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Serialized as a decimal string.
    pub gross_annual: Decimal,
    pub filing_status: FilingStatus,
    /// Two-letter region code, forwarded as entered.
    pub state: String,
}

/// The parts of the estimate response the page displays.
///
/// Amounts are kept as raw JSON so that absent or non-numeric values reach
/// the currency formatter untouched; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateResponse {
    pub federal: FederalDetail,
    pub state_detail: StateDetail,
    pub state: Value,
    pub net_annual: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FederalDetail {
    pub federal_tax: Value,
    pub standard_deduction: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateDetail {
    pub state_tax: Value,
}

impl EstimateResponse {
    /// The `state` field rendered verbatim: strings as-is, other scalars in
    /// their JSON form, and an empty string when absent.
    pub fn state_code(&self) -> String {
        match &self.state {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
