use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::{EstimateRequest, EstimateResponse, NetIncomeEntry};

/// Failure of a single backend exchange.
///
/// `Display` is the message shown to the user, so `Backend` renders the
/// backend's own text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// A success response whose body could not be understood.
    #[error("Malformed response ({status}): {detail}")]
    MalformedResponse { status: u16, detail: String },
}

impl RequestError {
    /// Builds the error for a non-success status from the parsed body,
    /// preferring the backend-supplied `error` string. A blank one counts as
    /// absent so the user never sees an empty message.
    pub fn from_status(
        status: u16,
        body: &Value,
    ) -> Self {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed ({status})"));

        Self::Backend { status, message }
    }

    /// HTTP status when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(_) => None,
            Self::Backend { status, .. } | Self::MalformedResponse { status, .. } => Some(*status),
        }
    }
}

/// The three backend operations the forms submit to.
#[async_trait]
pub trait TaxApi: Send + Sync {
    /// `POST /api/estimate`
    async fn estimate(
        &self,
        request: &EstimateRequest,
    ) -> Result<EstimateResponse, RequestError>;

    /// `POST /api/net_income`; the body is returned but the page ignores it.
    async fn create_net_income(
        &self,
        entry: &NetIncomeEntry,
    ) -> Result<Value, RequestError>;

    /// `PUT /api/net_income/latest`
    async fn update_latest_net_income(
        &self,
        entry: &NetIncomeEntry,
    ) -> Result<Value, RequestError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn backend_error_field_becomes_the_message() {
        let err = RequestError::from_status(404, &json!({"error": "bad state"}));

        assert_eq!(err.to_string(), "bad state");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn missing_error_field_falls_back_to_status_message() {
        let err = RequestError::from_status(500, &json!({}));

        assert_eq!(err.to_string(), "Request failed (500)");
    }

    #[test]
    fn non_string_error_field_falls_back_to_status_message() {
        let err = RequestError::from_status(400, &json!({"error": {"code": 7}}));

        assert_eq!(err.to_string(), "Request failed (400)");
    }

    #[test]
    fn blank_error_field_falls_back_to_status_message() {
        for body in [json!({"error": ""}), json!({"error": "   "})] {
            let err = RequestError::from_status(422, &body);

            assert_eq!(err.to_string(), "Request failed (422)", "body {body}");
        }
    }

    #[test]
    fn network_error_has_no_status() {
        assert_eq!(RequestError::Network("refused".into()).status(), None);
    }
}
