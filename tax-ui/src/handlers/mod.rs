//! One handler per form.
//!
//! A handler turns a submission into a payload and performs exactly one
//! backend call. What happens next is the bridge's job: a successful call
//! yields a [`Completion`] that the bridge applies to the page, a failed one
//! goes to the form's error presenter.

mod edit_latest;
mod estimate;
mod save_net;

use async_trait::async_trait;
use tax_core::{
    EstimateResponse, NetIncomeEntry, PayFrequency, TaxApi, currency::format_currency,
};

pub use edit_latest::EditLatestHandler;
pub use estimate::EstimateHandler;
pub use save_net::SaveNetHandler;

use crate::{
    error::SubmitError,
    models::{FormId, FormSubmission},
    page::{NodeId, Page},
    utils::parse_amount,
};

/// The success continuation of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Reveal the results panel and fill in the estimate.
    ShowEstimate(EstimateResponse),
    /// Stored entries changed; everything derived from them must re-render.
    RefreshViews,
}

impl Completion {
    pub fn apply(
        self,
        page: &dyn Page,
    ) {
        match self {
            Self::ShowEstimate(estimate) => {
                page.set_visible(NodeId::Results, true);
                page.set_text(
                    NodeId::FederalTax,
                    &format_currency(&estimate.federal.federal_tax),
                );
                page.set_text(
                    NodeId::FederalDeduction,
                    &format_currency(&estimate.federal.standard_deduction),
                );
                page.set_text(
                    NodeId::StateTax,
                    &format_currency(&estimate.state_detail.state_tax),
                );
                page.set_text(NodeId::StateCode, &estimate.state_code());
                page.set_text(NodeId::NetAnnual, &format_currency(&estimate.net_annual));
            }
            Self::RefreshViews => page.refresh_dependent_views(),
        }
    }
}

#[async_trait]
pub trait FormHandler: Send + Sync {
    /// The form this handler is bound to.
    fn form(&self) -> FormId;

    /// Builds the payload and performs the backend call.
    async fn submit(
        &self,
        submission: &FormSubmission,
        api: &dyn TaxApi,
    ) -> Result<Completion, SubmitError>;
}

/// Reads the label / amount / frequency triple shared by both net-income forms.
fn net_income_entry(submission: &FormSubmission) -> Result<NetIncomeEntry, SubmitError> {
    let net_amount = parse_amount(submission.field("net_amount"))
        .map_err(|e| SubmitError::invalid(format!("Net amount: {e}")))?;

    let raw_frequency = submission.field("frequency");
    let frequency = PayFrequency::parse(raw_frequency)
        .ok_or_else(|| SubmitError::invalid(format!("Unknown frequency '{raw_frequency}'")))?;

    Ok(NetIncomeEntry {
        label: submission.field("label").to_string(),
        net_amount,
        frequency,
    })
}
