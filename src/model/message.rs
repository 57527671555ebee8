//! Flow update messages consumed by the record store.

use super::flow::Flow;
use super::identifiers::FlowId;
use serde::{Deserialize, Serialize};

/// One change to the captured flow sequence.
///
/// One JSON object per line on the wire, tagged by `cmd`:
///
/// ```json
/// {"cmd":"add","flow":{"id":"a1","type":"http","timestamp":"2025-06-01T10:00:00Z"}}
/// {"cmd":"remove","id":"a1"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum FlowMessage {
    /// A new flow was captured.
    Add {
        /// The captured flow.
        flow: Flow,
    },
    /// An existing flow changed (e.g. its response arrived).
    Update {
        /// The flow's new state.
        flow: Flow,
    },
    /// A flow was deleted.
    Remove {
        /// Id of the deleted flow.
        id: FlowId,
    },
    /// The whole sequence was replaced.
    Reset {
        /// The new sequence, in display order.
        flows: Vec<Flow>,
    },
}
