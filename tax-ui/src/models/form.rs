use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// The three forms the bridge serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormId {
    Estimate,
    SaveNet,
    EditLatest,
}

impl FormId {
    pub fn all() -> &'static [FormId] {
        &[FormId::Estimate, FormId::SaveNet, FormId::EditLatest]
    }

    /// Element id of the form on the HTML page.
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::Estimate => "estimateForm",
            Self::SaveNet => "saveNetForm",
            Self::EditLatest => "editLatestForm",
        }
    }
}

impl fmt::Display for FormId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.element_id())
    }
}

/// A submit event: which form fired and the raw value of each named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form: FormId,
    pub fields: BTreeMap<String, String>,
}

impl FormSubmission {
    pub fn new(form: FormId) -> Self {
        Self {
            form,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Value of `name`; a field that was not submitted reads as empty,
    /// matching an untouched input.
    pub fn field(
        &self,
        name: &str,
    ) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}
