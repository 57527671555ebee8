//! JSONL parser for flow capture lines.
//!
//! Each non-empty line is either a [`FlowMessage`] (an object with a `cmd`
//! field) or a bare [`Flow`] object, which is shorthand for an `add`.
//! Parsing is pure; sources decide what to do with failures.

use crate::model::{Flow, FlowMessage, ParseError};
use serde_json::Value;

/// Parse one JSONL line.
///
/// Returns `Ok(None)` for blank lines.
///
/// # Arguments
///
/// * `raw` - The raw JSONL line to parse
/// * `line_number` - The line number (1-indexed) for error reporting
///
/// # Errors
///
/// Returns `ParseError::InvalidMessage` if the line is not valid JSON or
/// matches neither a message nor a flow.
pub fn parse_line(raw: &str, line_number: usize) -> Result<Option<FlowMessage>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = |err: serde_json::Error| ParseError::InvalidMessage {
        line: line_number,
        message: err.to_string(),
    };

    let value: Value = serde_json::from_str(trimmed).map_err(invalid)?;
    let message = if value.get("cmd").is_some() {
        serde_json::from_value(value).map_err(invalid)?
    } else {
        FlowMessage::Add {
            flow: serde_json::from_value::<Flow>(value).map_err(invalid)?,
        }
    };
    Ok(Some(message))
}

/// Parse many lines, splitting successes from failures.
///
/// `first_line` is the 1-based number of the first line in `lines`.
pub fn parse_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    first_line: usize,
) -> (Vec<FlowMessage>, Vec<ParseError>) {
    let mut messages = Vec::new();
    let mut errors = Vec::new();
    for (offset, raw) in lines.into_iter().enumerate() {
        match parse_line(raw, first_line + offset) {
            Ok(Some(message)) => messages.push(message),
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }
    (messages, errors)
}
