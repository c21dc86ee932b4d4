use std::collections::HashMap;

use crate::{
    handlers::{EditLatestHandler, EstimateHandler, FormHandler, SaveNetHandler},
    models::FormId,
};

/// Maps each form to the handler that serves its submissions.
///
/// Typical lifetime:
/// 1. Create with `HandlerRegistry::with_default_handlers()` (or `new()`
///    plus `register` for custom wiring).
/// 2. Hand it to the [`Bridge`](crate::bridge::Bridge), which looks the
///    handler up on every submission.
pub struct HandlerRegistry {
    handlers: HashMap<FormId, Box<dyn FormHandler>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The estimate, save-net and edit-latest handlers.
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(EstimateHandler));
        registry.register(Box::new(SaveNetHandler));
        registry.register(Box::new(EditLatestHandler));
        registry
    }

    /// Register a handler under [`FormHandler::form`].
    ///
    /// A handler already registered for that form is silently replaced.
    pub fn register(
        &mut self,
        handler: Box<dyn FormHandler>,
    ) {
        self.handlers.insert(handler.form(), handler);
    }

    /// Forms that have a handler, in declaration order.
    pub fn available_forms(&self) -> Vec<FormId> {
        let mut forms: Vec<_> = self.handlers.keys().copied().collect();
        forms.sort_unstable();
        forms
    }

    pub fn get(
        &self,
        form: FormId,
    ) -> Option<&dyn FormHandler> {
        self.handlers.get(&form).map(Box::as_ref)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tax_core::TaxApi;

    use super::*;
    use crate::{
        error::SubmitError,
        handlers::{Completion, test_support::StubApi},
        models::FormSubmission,
    };

    /// Handler that flips a flag when called, so tests can prove dispatch
    /// reached it.
    struct FlagHandler {
        form: FormId,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl FormHandler for FlagHandler {
        fn form(&self) -> FormId {
            self.form
        }

        async fn submit(
            &self,
            _submission: &FormSubmission,
            _api: &dyn TaxApi,
        ) -> Result<Completion, SubmitError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Completion::RefreshViews)
        }
    }

    fn flag_handler(form: FormId) -> (Box<dyn FormHandler>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(FlagHandler {
                form,
                called: flag.clone(),
            }),
            flag,
        )
    }

    #[test]
    fn new_registry_has_no_forms() {
        assert!(HandlerRegistry::new().available_forms().is_empty());
        assert!(HandlerRegistry::default().get(FormId::Estimate).is_none());
    }

    #[test]
    fn default_handlers_cover_every_form() {
        let registry = HandlerRegistry::with_default_handlers();

        assert_eq!(registry.available_forms(), FormId::all().to_vec());
        for form in FormId::all() {
            assert_eq!(registry.get(*form).map(|h| h.form()), Some(*form));
        }
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut registry = HandlerRegistry::with_default_handlers();
        let (replacement, _) = flag_handler(FormId::SaveNet);

        registry.register(replacement);

        assert_eq!(registry.available_forms().len(), 3);
    }

    #[tokio::test]
    async fn lookup_returns_the_registered_handler() {
        let mut registry = HandlerRegistry::new();
        let (estimate, estimate_called) = flag_handler(FormId::Estimate);
        let (save, save_called) = flag_handler(FormId::SaveNet);
        registry.register(estimate);
        registry.register(save);

        let handler = registry.get(FormId::Estimate).unwrap();
        handler
            .submit(&FormSubmission::new(FormId::Estimate), &StubApi::default())
            .await
            .unwrap();

        assert!(estimate_called.load(Ordering::SeqCst));
        assert!(!save_called.load(Ordering::SeqCst));
    }
}
