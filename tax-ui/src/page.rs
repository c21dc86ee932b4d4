//! The page surface the bridge writes into.
//!
//! Nodes are addressed by logical name rather than by handle; every host
//! (a browser binding, the console host, tests) maps them to its own widgets.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};

/// Display nodes the handlers write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    /// Panel wrapping the estimate results; hidden until the first success.
    Results,
    FederalTax,
    FederalDeduction,
    StateTax,
    StateCode,
    NetAnnual,
    /// Inline error box of the edit-latest form.
    EditError,
}

impl NodeId {
    pub fn all() -> &'static [NodeId] {
        &[
            NodeId::Results,
            NodeId::FederalTax,
            NodeId::FederalDeduction,
            NodeId::StateTax,
            NodeId::StateCode,
            NodeId::NetAnnual,
            NodeId::EditError,
        ]
    }

    /// Element id used by the HTML page.
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::Results => "results",
            Self::FederalTax => "fedTax",
            Self::FederalDeduction => "fedDed",
            Self::StateTax => "stateTax",
            Self::StateCode => "stateCode",
            Self::NetAnnual => "netAnnual",
            Self::EditError => "editError",
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.element_id())
    }
}

/// Mutations a handler may perform on the page.
///
/// Methods take `&self`; implementations synchronise internally so that
/// independent forms can complete concurrently.
pub trait Page: Send + Sync {
    fn set_text(
        &self,
        node: NodeId,
        text: &str,
    );

    fn set_visible(
        &self,
        node: NodeId,
        visible: bool,
    );

    /// Blocking, modal message.
    fn alert(
        &self,
        message: &str,
    );

    /// Re-render everything derived from stored net-income entries.
    fn refresh_dependent_views(&self);
}

/// One recorded page mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SetText(NodeId, String),
    SetVisible(NodeId, bool),
    Alert(String),
    Refresh,
}

impl fmt::Display for PageEvent {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::SetText(node, text) => write!(f, "{node:<10} {text}"),
            Self::SetVisible(node, true) => write!(f, "{node:<10} shown"),
            Self::SetVisible(node, false) => write!(f, "{node:<10} hidden"),
            Self::Alert(message) => write!(f, "alert      {message}"),
            Self::Refresh => f.write_str("refresh    dependent views"),
        }
    }
}

/// Current contents of a [`MemoryPage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub text: BTreeMap<NodeId, String>,
    pub visible: BTreeSet<NodeId>,
    pub alerts: Vec<String>,
    pub refreshes: usize,
}

#[derive(Debug, Default)]
struct Inner {
    state: PageState,
    events: Vec<PageEvent>,
}

/// In-memory page. Every node starts empty and hidden.
///
/// Used by the console host, which prints the recorded events after each
/// submission, and by tests.
#[derive(Debug, Default)]
pub struct MemoryPage {
    inner: Mutex<Inner>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> PageState {
        self.lock().state.clone()
    }

    pub fn text(
        &self,
        node: NodeId,
    ) -> Option<String> {
        self.lock().state.text.get(&node).cloned()
    }

    pub fn is_visible(
        &self,
        node: NodeId,
    ) -> bool {
        self.lock().state.visible.contains(&node)
    }

    pub fn alerts(&self) -> Vec<String> {
        self.lock().state.alerts.clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.lock().state.refreshes
    }

    /// Every event recorded so far, oldest first.
    pub fn events(&self) -> Vec<PageEvent> {
        self.lock().events.clone()
    }

    /// Returns and forgets the events recorded since the last drain.
    pub fn drain_events(&self) -> Vec<PageEvent> {
        std::mem::take(&mut self.lock().events)
    }

    fn record(
        &self,
        event: PageEvent,
    ) {
        let mut inner = self.lock();
        match &event {
            PageEvent::SetText(node, text) => {
                inner.state.text.insert(*node, text.clone());
            }
            PageEvent::SetVisible(node, true) => {
                inner.state.visible.insert(*node);
            }
            PageEvent::SetVisible(node, false) => {
                inner.state.visible.remove(node);
            }
            PageEvent::Alert(message) => inner.state.alerts.push(message.clone()),
            PageEvent::Refresh => inner.state.refreshes += 1,
        }
        inner.events.push(event);
    }
}

impl Page for MemoryPage {
    fn set_text(
        &self,
        node: NodeId,
        text: &str,
    ) {
        self.record(PageEvent::SetText(node, text.to_string()));
    }

    fn set_visible(
        &self,
        node: NodeId,
        visible: bool,
    ) {
        self.record(PageEvent::SetVisible(node, visible));
    }

    fn alert(
        &self,
        message: &str,
    ) {
        self.record(PageEvent::Alert(message.to_string()));
    }

    fn refresh_dependent_views(&self) {
        self.record(PageEvent::Refresh);
    }
}
