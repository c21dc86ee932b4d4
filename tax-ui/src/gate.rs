//! Per-form submission state.
//!
//! A form is `Submitting` from the moment its request is issued until the
//! outcome has been applied to the page. Other forms are never blocked.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::models::FormId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Default)]
pub struct SubmitGate {
    states: Mutex<HashMap<FormId, FormState>>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<FormId, FormState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(
        &self,
        form: FormId,
    ) -> FormState {
        self.lock().get(&form).copied().unwrap_or_default()
    }

    /// Moves `form` to `Submitting`, or returns `None` if it already is.
    ///
    /// The form returns to `Idle` when the returned guard is dropped, so an
    /// early return or a panic cannot leave it stuck.
    pub fn try_begin(
        &self,
        form: FormId,
    ) -> Option<InFlight<'_>> {
        let mut states = self.lock();
        let state = states.entry(form).or_default();
        if *state == FormState::Submitting {
            return None;
        }
        *state = FormState::Submitting;
        Some(InFlight { gate: self, form })
    }
}

/// Held for the duration of one submission.
#[derive(Debug)]
pub struct InFlight<'a> {
    gate: &'a SubmitGate,
    form: FormId,
}

impl InFlight<'_> {
    pub fn form(&self) -> FormId {
        self.form
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.gate.lock().insert(self.form, FormState::Idle);
    }
}
