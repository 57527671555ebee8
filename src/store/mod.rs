//! Flow record store.
//!
//! Holds the full captured flow sequence in arrival order and applies
//! [`FlowMessage`]s to it. The store never filters; the view layer derives
//! its ordered view from [`FlowStore::flows`] after every change.

use crate::model::{Flow, FlowId, FlowMessage};
use std::collections::HashMap;
use tracing::{debug, trace};

/// What a message did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// A new flow was appended.
    Added,
    /// An existing flow was replaced in place.
    Updated,
    /// A flow was removed.
    Removed,
    /// The whole sequence was replaced.
    Reset,
    /// The message had no effect.
    Unchanged,
}

impl StoreChange {
    /// Whether the flow sequence changed.
    pub fn is_change(&self) -> bool {
        !matches!(self, StoreChange::Unchanged)
    }
}

/// Ordered flow sequence with id lookup.
#[derive(Debug, Clone, Default)]
pub struct FlowStore {
    flows: Vec<Flow>,
    index: HashMap<FlowId, usize>,
}

impl FlowStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `flows`; later duplicates replace earlier ones.
    pub fn from_flows(flows: impl IntoIterator<Item = Flow>) -> Self {
        let mut store = Self::new();
        for flow in flows {
            store.upsert(flow);
        }
        store
    }

    /// All flows in arrival order.
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// Number of stored flows.
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// True when no flow is stored.
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Look up a flow by id.
    pub fn get(&self, id: &FlowId) -> Option<&Flow> {
        self.index.get(id).map(|&i| &self.flows[i])
    }

    /// Whether a flow with this id is stored.
    pub fn contains(&self, id: &FlowId) -> bool {
        self.index.contains_key(id)
    }

    /// Apply one message.
    ///
    /// Adding an id that already exists updates it in place; updating an
    /// unknown id appends it. Removing an unknown id is ignored.
    pub fn apply(&mut self, message: FlowMessage) -> StoreChange {
        let change = match message {
            FlowMessage::Add { flow } | FlowMessage::Update { flow } => self.upsert(flow),
            FlowMessage::Remove { id } => self.remove(&id),
            FlowMessage::Reset { flows } => {
                *self = Self::from_flows(flows);
                StoreChange::Reset
            }
        };
        trace!(?change, len = self.len(), "Applied flow message");
        change
    }

    /// Apply a batch, reporting whether anything changed.
    pub fn apply_all(&mut self, messages: impl IntoIterator<Item = FlowMessage>) -> bool {
        let mut changed = false;
        for message in messages {
            changed |= self.apply(message).is_change();
        }
        changed
    }

    fn upsert(&mut self, flow: Flow) -> StoreChange {
        match self.index.get(&flow.id) {
            Some(&i) => {
                if self.flows[i] == flow {
                    return StoreChange::Unchanged;
                }
                self.flows[i] = flow;
                StoreChange::Updated
            }
            None => {
                self.index.insert(flow.id.clone(), self.flows.len());
                self.flows.push(flow);
                StoreChange::Added
            }
        }
    }

    fn remove(&mut self, id: &FlowId) -> StoreChange {
        let Some(position) = self.index.remove(id) else {
            debug!(%id, "Ignoring removal of unknown flow");
            return StoreChange::Unchanged;
        };
        self.flows.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        StoreChange::Removed
    }
}
