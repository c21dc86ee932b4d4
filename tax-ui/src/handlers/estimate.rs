use async_trait::async_trait;
use tax_core::{EstimateRequest, FilingStatus, TaxApi};
use tracing::debug;

use super::{Completion, FormHandler};
use crate::{
    error::SubmitError,
    models::{FormId, FormSubmission},
    utils::parse_amount,
};

/// Requests a tax estimate and displays it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimateHandler;

impl EstimateHandler {
    /// Builds the request body from the submitted fields. The state code is
    /// forwarded exactly as entered.
    pub fn request_from(submission: &FormSubmission) -> Result<EstimateRequest, SubmitError> {
        let gross_annual = parse_amount(submission.field("gross_annual"))
            .map_err(|e| SubmitError::invalid(format!("Gross annual income: {e}")))?;

        let raw_status = submission.field("filing_status");
        let filing_status = FilingStatus::parse(raw_status)
            .ok_or_else(|| SubmitError::invalid(format!("Unknown filing status '{raw_status}'")))?;

        Ok(EstimateRequest {
            gross_annual,
            filing_status,
            state: submission.field("state").to_string(),
        })
    }
}

#[async_trait]
impl FormHandler for EstimateHandler {
    fn form(&self) -> FormId {
        FormId::Estimate
    }

    async fn submit(
        &self,
        submission: &FormSubmission,
        api: &dyn TaxApi,
    ) -> Result<Completion, SubmitError> {
        let request = Self::request_from(submission)?;
        debug!(?request, "requesting estimate");

        let estimate = api.estimate(&request).await?;
        Ok(Completion::ShowEstimate(estimate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{Call, StubApi};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{EstimateResponse, RequestError};

    fn submission() -> FormSubmission {
        FormSubmission::new(FormId::Estimate)
            .with_field("gross_annual", "50000")
            .with_field("filing_status", "single")
            .with_field("state", "CA")
    }

    #[test]
    fn request_uses_the_three_fields() {
        assert_eq!(
            EstimateHandler::request_from(&submission()).unwrap(),
            EstimateRequest {
                gross_annual: dec!(50000),
                filing_status: FilingStatus::Single,
                state: "CA".to_string(),
            }
        );
    }

    #[test]
    fn request_carries_the_parsed_decimal() {
        let typed = submission().with_field("gross_annual", "5e4");

        let request = EstimateHandler::request_from(&typed).unwrap();

        assert_eq!(request.gross_annual, dec!(50000));
        assert_eq!(
            serde_json::to_value(&request).unwrap()["gross_annual"],
            serde_json::json!("50000")
        );
    }

    #[tokio::test]
    async fn submit_posts_once_and_returns_estimate() {
        let response = EstimateResponse {
            state: "CA".into(),
            ..Default::default()
        };
        let api = StubApi::with_estimate(Ok(response.clone()));

        let completion = EstimateHandler.submit(&submission(), &api).await.unwrap();

        assert_eq!(completion, Completion::ShowEstimate(response));
        assert_eq!(api.calls().len(), 1);
        assert!(matches!(api.calls()[0], Call::Estimate(_)));
    }

    #[tokio::test]
    async fn submit_propagates_backend_error() {
        let api = StubApi::with_estimate(Err(RequestError::Backend {
            status: 404,
            message: "bad state".into(),
        }));

        let err = EstimateHandler.submit(&submission(), &api).await.unwrap_err();

        assert_eq!(err.to_string(), "bad state");
    }

    #[tokio::test]
    async fn unparseable_filing_status_never_reaches_backend() {
        let api = StubApi::default();
        let bad = submission().with_field("filing_status", "widowed");

        let err = EstimateHandler.submit(&bad, &api).await.unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(_)));
        assert!(api.calls().is_empty());
    }
}
