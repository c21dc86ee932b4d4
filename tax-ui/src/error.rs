use tax_core::RequestError;
use thiserror::Error;

use crate::models::FormId;

/// Why a submission did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no handler registered for form '{0}'")]
    UnknownForm(FormId),

    /// The same form is still waiting on its previous request.
    #[error("form '{0}' is already submitting")]
    InFlight(FormId),

    /// Field values the form's constraints (or payload conversion) reject.
    #[error("invalid form input: {}", .0.join(" "))]
    Invalid(Vec<String>),

    /// Displays as the backend's message, unchanged.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl SubmitError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(vec![message.into()])
    }
}
