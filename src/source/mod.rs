//! Flow message sources.
//!
//! This module provides input sources for flow data:
//! - File loading, read once or followed for appended lines
//! - A deterministic synthetic traffic generator
//! - Unified FlowSource enum for both

use crate::model::error::InputError;
use crate::model::FlowMessage;
use std::path::PathBuf;
use std::time::Duration;

pub mod file;
pub mod synthetic;

pub use file::FileSource;
pub use synthetic::SyntheticSource;

/// Unified source of flow messages.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum FlowSource {
    /// JSONL capture file
    File(FileSource),
    /// Generated traffic
    Synthetic(SyntheticSource),
}

impl FlowSource {
    /// Poll for new messages.
    ///
    /// Non-blocking - returns immediately with whatever is available.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn poll(&mut self) -> Result<Vec<FlowMessage>, InputError> {
        match self {
            FlowSource::File(f) => f.poll(),
            FlowSource::Synthetic(s) => Ok(s.poll()),
        }
    }

    /// Whether more messages may still arrive.
    pub fn is_live(&self) -> bool {
        match self {
            FlowSource::File(f) => f.is_live(),
            FlowSource::Synthetic(s) => s.is_live(),
        }
    }
}

/// Where flows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Capture file, optionally followed.
    File { path: PathBuf, follow: bool },
    /// Synthetic stream: initial batch, then one flow per `rate`.
    Synthetic {
        initial: usize,
        rate: Option<Duration>,
    },
}

/// Create the source described by `spec`.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the capture file does not exist.
pub fn open_source(spec: SourceSpec) -> Result<FlowSource, InputError> {
    match spec {
        SourceSpec::File { path, follow } => Ok(FlowSource::File(FileSource::new(path, follow)?)),
        SourceSpec::Synthetic { initial, rate } => {
            Ok(FlowSource::Synthetic(SyntheticSource::new(initial, rate)))
        }
    }
}
