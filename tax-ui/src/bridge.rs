//! The form-submit bridge.
//!
//! Each submission goes through the same steps: native constraint check,
//! in-flight gate, clear the previous inline error, exactly one backend
//! call through the form's handler, then either the success continuation or
//! the form's error presenter.

use std::sync::Arc;

use tax_core::TaxApi;
use tracing::{info, warn};

use crate::{
    config::FormPresenters,
    error::SubmitError,
    gate::{FormState, SubmitGate},
    models::{FormId, FormSchema, FormSubmission},
    page::Page,
    registry::HandlerRegistry,
};

pub struct Bridge {
    api: Arc<dyn TaxApi>,
    page: Arc<dyn Page>,
    registry: HandlerRegistry,
    presenters: FormPresenters,
    gate: SubmitGate,
}

impl Bridge {
    /// A bridge serving the three stock forms.
    pub fn new(
        api: Arc<dyn TaxApi>,
        page: Arc<dyn Page>,
        presenters: FormPresenters,
    ) -> Self {
        Self::with_registry(api, page, presenters, HandlerRegistry::with_default_handlers())
    }

    pub fn with_registry(
        api: Arc<dyn TaxApi>,
        page: Arc<dyn Page>,
        presenters: FormPresenters,
        registry: HandlerRegistry,
    ) -> Self {
        Self {
            api,
            page,
            registry,
            presenters,
            gate: SubmitGate::new(),
        }
    }

    pub fn page(&self) -> &dyn Page {
        self.page.as_ref()
    }

    pub fn form_state(
        &self,
        form: FormId,
    ) -> FormState {
        self.gate.state(form)
    }

    /// Handles one submit event.
    ///
    /// Constraint violations and a busy form are rejected before anything
    /// is sent and leave the page untouched. A failed request has already
    /// been shown through the form's presenter when the error is returned.
    pub async fn submit(
        &self,
        submission: &FormSubmission,
    ) -> Result<(), SubmitError> {
        let form = submission.form;
        let handler = self
            .registry
            .get(form)
            .ok_or(SubmitError::UnknownForm(form))?;

        if let Err(errors) = FormSchema::for_form(form).validate(submission) {
            for error in &errors {
                warn!(%form, "{error}");
            }
            return Err(SubmitError::Invalid(errors));
        }

        let Some(_in_flight) = self.gate.try_begin(form) else {
            warn!(%form, "submission ignored, previous request still pending");
            return Err(SubmitError::InFlight(form));
        };

        let presenter = self.presenters.for_form(form);
        presenter.clear(self.page());

        match handler.submit(submission, self.api.as_ref()).await {
            Ok(completion) => {
                completion.apply(self.page());
                info!(%form, "submission completed");
                Ok(())
            }
            Err(error) => {
                warn!(%form, %error, "submission failed");
                presenter.present(self.page(), &error.to_string());
                Err(error)
            }
        }
    }
}
