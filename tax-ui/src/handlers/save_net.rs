use async_trait::async_trait;
use tax_core::TaxApi;
use tracing::debug;

use super::{Completion, FormHandler, net_income_entry};
use crate::{
    error::SubmitError,
    models::{FormId, FormSubmission},
};

/// Creates a net-income entry, then asks dependent views to refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveNetHandler;

#[async_trait]
impl FormHandler for SaveNetHandler {
    fn form(&self) -> FormId {
        FormId::SaveNet
    }

    async fn submit(
        &self,
        submission: &FormSubmission,
        api: &dyn TaxApi,
    ) -> Result<Completion, SubmitError> {
        let entry = net_income_entry(submission)?;
        debug!(?entry, "saving net income entry");

        api.create_net_income(&entry).await?;
        Ok(Completion::RefreshViews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{Call, StubApi};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{NetIncomeEntry, PayFrequency, RequestError};

    fn submission() -> FormSubmission {
        FormSubmission::new(FormId::SaveNet)
            .with_field("label", "Salary")
            .with_field("net_amount", "4000")
            .with_field("frequency", "monthly")
    }

    #[tokio::test]
    async fn success_asks_for_refresh() {
        let api = StubApi::default();

        let completion = SaveNetHandler.submit(&submission(), &api).await.unwrap();

        assert_eq!(completion, Completion::RefreshViews);
        assert_eq!(
            api.calls(),
            vec![Call::Create(NetIncomeEntry {
                label: "Salary".into(),
                net_amount: dec!(4000),
                frequency: PayFrequency::Monthly,
            })]
        );
    }

    #[tokio::test]
    async fn failure_is_returned_not_completed() {
        let api = StubApi::with_net_income(vec![Err(RequestError::Backend {
            status: 500,
            message: "Request failed (500)".into(),
        })]);

        let err = SaveNetHandler.submit(&submission(), &api).await.unwrap_err();

        assert_eq!(err.to_string(), "Request failed (500)");
    }
}
