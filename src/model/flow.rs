//! Captured traffic flows.

use super::identifiers::FlowId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol category of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// HTTP exchange; the only kind with a direction.
    Http,
    /// Raw TCP connection.
    Tcp,
    /// UDP datagram flow.
    Udp,
    /// DNS query.
    Dns,
}

impl FlowKind {
    /// Every kind, in display order.
    pub const ALL: [FlowKind; 4] = [FlowKind::Http, FlowKind::Tcp, FlowKind::Udp, FlowKind::Dns];

    /// Whether request/response completeness is meaningful for this kind.
    pub fn is_directional(&self) -> bool {
        matches!(self, FlowKind::Http)
    }

    /// Short uppercase label.
    pub fn label(&self) -> &'static str {
        match self {
            FlowKind::Http => "HTTP",
            FlowKind::Tcp => "TCP",
            FlowKind::Udp => "UDP",
            FlowKind::Dns => "DNS",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Request half of an HTTP flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Request method, e.g. `GET`.
    pub method: String,
    /// Target host.
    pub host: String,
    /// Request path.
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/".to_string()
}

/// Response half of an HTTP flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body size, when known.
    #[serde(default)]
    pub content_length: Option<u64>,
}

/// One captured flow: a single row of the flow table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    /// Stable identity across updates.
    pub id: FlowId,
    /// Protocol of the flow.
    #[serde(rename = "type")]
    pub kind: FlowKind,
    /// When the flow started.
    pub timestamp: DateTime<Utc>,
    /// Peer address for non-HTTP flows, `host:port`.
    #[serde(default)]
    pub server: Option<String>,
    /// Request half of an HTTP flow.
    #[serde(default)]
    pub request: Option<HttpRequest>,
    /// Response half of an HTTP flow; `None` while pending.
    #[serde(default)]
    pub response: Option<HttpResponse>,
}

impl Flow {
    /// Human-readable one-line summary for the path column.
    pub fn summary(&self) -> String {
        match (&self.request, &self.server) {
            (Some(request), _) => format!("{}{}", request.host, request.path),
            (None, Some(server)) => server.clone(),
            (None, None) => String::new(),
        }
    }
}

/// The view of a record that the windowing core needs.
///
/// Everything else about a record is opaque to the core.
pub trait Record {
    /// Stable identity, unique within the store.
    fn id(&self) -> &FlowId;

    /// Category used by kind filtering.
    fn kind(&self) -> FlowKind;

    /// A request has been captured.
    fn has_request(&self) -> bool;

    /// A response has been captured.
    fn has_response(&self) -> bool;
}

impl Record for Flow {
    fn id(&self) -> &FlowId {
        &self.id
    }

    fn kind(&self) -> FlowKind {
        self.kind
    }

    fn has_request(&self) -> bool {
        self.request.is_some()
    }

    fn has_response(&self) -> bool {
        self.response.is_some()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> &FlowId {
        (**self).id()
    }

    fn kind(&self) -> FlowKind {
        (**self).kind()
    }

    fn has_request(&self) -> bool {
        (**self).has_request()
    }

    fn has_response(&self) -> bool {
        (**self).has_response()
    }
}
