use serde::{Deserialize, Serialize};

use crate::page::{NodeId, Page};

/// How a form shows a failed submission.
///
/// In configuration files this is written `"modal"` or
/// `{ inline = "edit_error" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPresenter {
    /// Blocking alert.
    Modal,
    /// Persistent message written into a node that is shown on error.
    Inline(NodeId),
}

impl ErrorPresenter {
    /// Removes a previously presented error. Modal errors leave nothing
    /// behind, so this only affects inline presenters.
    pub fn clear(
        &self,
        page: &dyn Page,
    ) {
        if let Self::Inline(node) = self {
            page.set_text(*node, "");
            page.set_visible(*node, false);
        }
    }

    pub fn present(
        &self,
        page: &dyn Page,
        message: &str,
    ) {
        match self {
            Self::Modal => page.alert(message),
            Self::Inline(node) => {
                page.set_text(*node, message);
                page.set_visible(*node, true);
            }
        }
    }
}
