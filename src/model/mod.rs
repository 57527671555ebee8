//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod flow;
pub mod identifiers;
pub mod key_action;
pub mod message;

// Re-export for convenience
pub use error::{AppError, InputError, ParseError};
pub use flow::{Flow, FlowKind, HttpRequest, HttpResponse, Record};
pub use identifiers::{FlowId, InvalidFlowId};
pub use key_action::KeyAction;
pub use message::FlowMessage;
