//! Error types for the flowview application.
//!
//! A small hierarchical taxonomy using `thiserror`, composing via `?` and
//! `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error wrapping every fatal failure
//!   - [`InputError`] - flow source failures (file not found, I/O)
//!   - [`ParseError`] - malformed flow message lines
//!   - `std::io::Error` - terminal failures
//!
//! # Recovery Strategy
//!
//! Parse errors are **non-fatal**: a malformed line is logged and skipped so a
//! partially corrupt capture still displays. Input and terminal errors are
//! fatal and propagate to `main`.
//!
//! The windowing core has no error type of its own: malformed geometry is
//! clamped, and the only misconfiguration (a zero row height) is rejected by
//! [`crate::view_state::types::RowHeight::new`] when a table is configured.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Examples
///
/// ```no_run
/// use flowview::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError converts to AppError via From
///     let _input = open_capture()?;
///     Ok(())
/// }
/// # fn open_capture() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read flows from the configured source.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// A flow message could not be parsed.
    ///
    /// Only surfaces here when a caller chooses to treat parse failures as
    /// fatal; sources log and skip them.
    #[error("Failed to parse flow message: {0}")]
    Parse(#[from] ParseError),

    /// Terminal or rendering failure.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading flow messages from a source.
#[derive(Debug, Error)]
pub enum InputError {
    /// The capture file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use flowview::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Generic I/O error reading from the source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing one JSONL flow message.
///
/// All variants carry the 1-based line number so the log points at the
/// offending line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is not valid JSON or does not match the message schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowview::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidMessage {
    ///     line: 42,
    ///     message: "missing field `flow`".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid flow message at line {line}: {message}")]
    InvalidMessage {
        /// 1-based line number in the source.
        line: usize,
        /// The parser's description of the problem.
        message: String,
    },
}

impl ParseError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidMessage { line, .. } => *line,
        }
    }
}
