use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayFrequency;

/// Body of both `POST /api/net_income` and `PUT /api/net_income/latest`.
///
/// There is no client-side identity; "latest" is resolved by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetIncomeEntry {
    pub label: String,
    pub net_amount: Decimal,
    pub frequency: PayFrequency,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn entry_uses_backend_field_names() {
        let entry = NetIncomeEntry {
            label: "Day job".to_string(),
            net_amount: dec!(4210.55),
            frequency: PayFrequency::BiWeekly,
        };

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"label": "Day job", "net_amount": "4210.55", "frequency": "bi-weekly"})
        );
    }
}
