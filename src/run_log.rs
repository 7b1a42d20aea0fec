//! Append-only run log.
//!
//! Every entry is one line: a local timestamp, a severity tag and a message,
//! e.g. `2024/01/02 15:04:05 [SUCCESS] File a.txt moved to /data/Documents`.
//! Entries are also emitted as `tracing` events so a console subscriber can
//! mirror them.
//!
//! A `RunLog` owns its sink; the file handle is closed when the log is dropped.

use crate::file_organizer::{OrganizeError, OrganizeResult};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File name used when no log path is given.
pub const DEFAULT_LOG_FILE: &str = "organizer.log";

/// Severity tag written in front of every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Success => "[SUCCESS]",
            Severity::Error => "[ERROR]",
            Severity::Info => "[INFO]",
        }
    }
}

/// Line-oriented log sink owned by one organizer run.
pub struct RunLog {
    sink: Box<dyn Write + Send>,
    path: Option<PathBuf>,
}

impl RunLog {
    /// Opens (or creates) `path` for appending.
    pub fn open(path: &Path) -> OrganizeResult<Self> {
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| OrganizeError::LogOpen {
                path: path.to_path_buf(),
                source: e,
            })?;

        // Canonical so the walker can recognise the log inside the tree.
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        Ok(Self {
            sink: Box::new(file),
            path: Some(path),
        })
    }

    /// Wraps an arbitrary writer. The log then has no path on disk.
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Box::new(writer),
            path: None,
        }
    }

    /// A log that discards every entry.
    pub fn discard() -> Self {
        Self::from_writer(io::sink())
    }

    /// Canonical path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn success(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.write_entry(Severity::Success, message);
    }

    pub fn error(&mut self, message: &str) {
        tracing::error!("{}", message);
        self.write_entry(Severity::Error, message);
    }

    pub fn info(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.write_entry(Severity::Info, message);
    }

    fn write_entry(&mut self, severity: Severity, message: &str) {
        let line = format_entry(severity, message);
        // A failing log sink must not abort the sort.
        if let Err(e) = self.sink.write_all(line.as_bytes()) {
            tracing::warn!("could not write to run log: {}", e);
        }
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        let _ = self.sink.flush();
    }
}

impl std::fmt::Debug for RunLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLog").field("path", &self.path).finish()
    }
}

fn format_entry(severity: Severity, message: &str) -> String {
    // Keep one entry per line even if a path contains a newline.
    let message = message.replace('\n', " ");
    format!(
        "{} {} {}\n",
        Local::now().format("%Y/%m/%d %H:%M:%S"),
        severity.tag(),
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_entries_are_tagged_lines() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("organizer.log");

        {
            let mut log = RunLog::open(&log_path).expect("Failed to open log");
            log.success("moved a");
            log.error("broken b");
            log.info("renamed c");
        }

        let contents = fs::read_to_string(&log_path).expect("Failed to read log");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("[SUCCESS] moved a"));
        assert!(lines[1].ends_with("[ERROR] broken b"));
        assert!(lines[2].ends_with("[INFO] renamed c"));

        // "2024/01/02 15:04:05 " prefix
        let stamp = &lines[0][..19];
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y/%m/%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_open_appends() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("organizer.log");

        RunLog::open(&log_path).expect("open").info("first");
        RunLog::open(&log_path).expect("reopen").info("second");

        let contents = fs::read_to_string(&log_path).expect("Failed to read log");
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("first"));
        assert!(contents.contains("second"));
    }

    #[test]
    fn test_open_fails_in_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("missing").join("organizer.log");

        let result = RunLog::open(&log_path);
        assert!(matches!(result, Err(OrganizeError::LogOpen { .. })));
    }

    #[test]
    fn test_multiline_message_stays_on_one_line() {
        let line = format_entry(Severity::Info, "a\nb");
        assert_eq!(line.lines().count(), 1);
        assert!(line.ends_with("[INFO] a b\n"));
    }
}
