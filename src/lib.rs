//! flowview
//!
//! Live-tailing TUI table for captured network flows.
//!
//! Pure core / impure shell: `view_state` decides which rows exist and where
//! the viewport sits, without touching a terminal; `view` renders what it
//! commits and owns the event loop.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod store;
pub mod view;
pub mod view_state;
