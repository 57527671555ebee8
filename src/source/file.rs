//! File-based flow source with optional follow mode.
//!
//! Reads JSONL flow lines from a capture file. In follow mode the file is
//! re-read from the last consumed byte offset on every poll, like `tail -f`.

use crate::model::error::InputError;
use crate::model::FlowMessage;
use crate::parser::parse_lines;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Capture file reader.
///
/// Tracks the byte offset of the last complete line so partial writes are
/// picked up whole on a later poll.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    follow: bool,
    position: u64,
    lines_read: usize,
    exhausted: bool,
}

impl FileSource {
    /// Open a capture file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    pub fn new(path: impl AsRef<Path>, follow: bool) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            follow,
            position: 0,
            lines_read: 0,
            exhausted: false,
        })
    }

    /// Path of the capture file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether more data may still arrive.
    pub fn is_live(&self) -> bool {
        self.follow || !self.exhausted
    }

    /// Read complete lines appended since the last call.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if the file cannot be read.
    pub fn read_new_lines(&mut self) -> Result<Vec<String>, InputError> {
        let mut file = BufReader::new(File::open(&self.path)?);
        let len = file.get_ref().metadata()?.len();
        if len < self.position {
            debug!(path = %self.path.display(), "Capture file truncated, rereading");
            self.position = 0;
            self.lines_read = 0;
        }
        file.seek(SeekFrom::Start(self.position))?;

        let mut lines = Vec::new();
        let mut buffer = String::new();
        loop {
            buffer.clear();
            let bytes_read = file.read_line(&mut buffer)?;
            // A partial line stays unconsumed until its newline arrives.
            if bytes_read == 0 || !buffer.ends_with('\n') {
                break;
            }
            lines.push(buffer.trim_end_matches(['\n', '\r']).to_string());
            self.position += bytes_read as u64;
        }
        Ok(lines)
    }

    /// Poll for new flow messages.
    ///
    /// Without follow mode the whole file is returned on the first call and
    /// nothing afterwards. Malformed lines are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if the file cannot be read.
    pub fn poll(&mut self) -> Result<Vec<FlowMessage>, InputError> {
        if self.exhausted && !self.follow {
            return Ok(Vec::new());
        }
        let lines = self.read_new_lines()?;
        self.exhausted = true;

        let first_line = self.lines_read + 1;
        self.lines_read += lines.len();
        let (messages, errors) = parse_lines(lines.iter().map(String::as_str), first_line);
        for err in &errors {
            warn!(path = %self.path.display(), "Skipping malformed line: {err}");
        }
        if !messages.is_empty() {
            debug!(count = messages.len(), "Read flow messages");
        }
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    const ADD_A: &str =
        r#"{"cmd":"add","flow":{"id":"a","type":"tcp","timestamp":"2025-06-01T10:00:00Z"}}"#;
    const ADD_B: &str =
        r#"{"cmd":"add","flow":{"id":"b","type":"dns","timestamp":"2025-06-01T10:00:01Z"}}"#;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("flowview_{name}_{}.jsonl", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn new_returns_file_not_found_for_missing_file() {
        let missing = std::env::temp_dir().join("flowview_nonexistent_12345.jsonl");
        let result = FileSource::new(&missing, false);
        assert!(matches!(result, Err(InputError::FileNotFound { path }) if path == missing));
    }

    #[test]
    fn read_once_returns_everything_then_nothing() {
        let path = temp_file("read_once", &format!("{ADD_A}\n{ADD_B}\n"));
        let mut source = FileSource::new(&path, false).unwrap();

        let first = source.poll().unwrap();
        let second = source.poll().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(first.len(), 2);
        assert!(second.is_empty());
        assert!(!source.is_live());
    }

    #[test]
    fn follow_picks_up_appended_lines() {
        let path = temp_file("follow", &format!("{ADD_A}\n"));
        let mut source = FileSource::new(&path, true).unwrap();
        assert_eq!(source.poll().unwrap().len(), 1);

        let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{ADD_B}").unwrap();
        drop(file);

        let appended = source.poll().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(appended.len(), 1);
        assert!(matches!(&appended[0], FlowMessage::Add { flow } if flow.id.as_str() == "b"));
        assert!(source.is_live());
    }

    #[test]
    fn partial_line_waits_for_newline() {
        let path = temp_file("partial", &format!("{ADD_A}\n{}", &ADD_B[..20]));
        let mut source = FileSource::new(&path, true).unwrap();
        let first = source.poll().unwrap();

        fs::write(&path, format!("{ADD_A}\n{ADD_B}\n")).unwrap();
        let second = source.poll().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let path = temp_file("malformed", &format!("{ADD_A}\nnot json\n{ADD_B}\n"));
        let mut source = FileSource::new(&path, false).unwrap();
        let messages = source.poll().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn truncated_file_is_reread_from_start() {
        let path = temp_file("truncated", &format!("{ADD_A}\n{ADD_B}\n"));
        let mut source = FileSource::new(&path, true).unwrap();
        assert_eq!(source.poll().unwrap().len(), 2);

        fs::write(&path, format!("{ADD_A}\n")).unwrap();
        let reread = source.poll().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(reread.len(), 1);
    }
}
