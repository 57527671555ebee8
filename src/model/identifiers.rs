//! Identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable unique identifier of a flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FlowId(String);

/// Error returned when a flow id is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Flow id must not be empty")]
pub struct InvalidFlowId;

impl FlowId {
    /// Smart constructor: validates non-empty id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidFlowId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidFlowId)
        } else {
            Ok(Self(raw))
        }
    }

    /// Id for the `n`th generated flow; always non-empty.
    pub fn sequential(prefix: &str, n: u64) -> Self {
        Self(format!("{prefix}-{n:06}"))
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FlowId {
    type Error = InvalidFlowId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<FlowId> for String {
    fn from(id: FlowId) -> Self {
        id.0
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
