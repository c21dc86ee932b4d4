use async_trait::async_trait;
use tax_core::TaxApi;
use tracing::debug;

use super::{Completion, FormHandler, net_income_entry};
use crate::{
    error::SubmitError,
    models::{FormId, FormSubmission},
};

/// Overwrites the most recent net-income entry. Which entry that is gets
/// decided by the backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditLatestHandler;

#[async_trait]
impl FormHandler for EditLatestHandler {
    fn form(&self) -> FormId {
        FormId::EditLatest
    }

    async fn submit(
        &self,
        submission: &FormSubmission,
        api: &dyn TaxApi,
    ) -> Result<Completion, SubmitError> {
        let entry = net_income_entry(submission)?;
        debug!(?entry, "updating latest net income entry");

        api.update_latest_net_income(&entry).await?;
        Ok(Completion::RefreshViews)
    }
}
