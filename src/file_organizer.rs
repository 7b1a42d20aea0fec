//! Relocation of single files into category directories.
//!
//! This module moves one file at a time into its category subdirectory,
//! creating the directory when needed and picking a fresh name when the
//! destination is already taken. It also defines the error type shared by
//! the whole crate.

use crate::run_log::RunLog;
use chrono::Local;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Format of the timestamp inserted into colliding file names.
pub const COLLISION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Errors that can occur while organizing a directory tree.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The source root is missing, unreadable or not a directory.
    #[error("Invalid source directory {}: {reason}", path.display())]
    InvalidSourceRoot { path: PathBuf, reason: String },

    /// A directory entry could not be read during the walk.
    #[error("Cannot access {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Failed to create a category directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    /// Failed to move a file to its category directory.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// The relocated file could not be inspected. Never aborts a run.
    #[error("Failed to read metadata of {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    /// The run log could not be opened.
    #[error("Failed to open log file {}: {source}", path.display())]
    LogOpen { path: PathBuf, source: io::Error },
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Moves files into category directories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves `source_path` into `target_dir` and returns the path it ended up at.
    ///
    /// `target_dir` and any missing parents are created first. When
    /// `target_dir` already holds a file of the same name, a timestamp is
    /// inserted between stem and extension (`report_2024-01-02_15-04-05.txt`);
    /// existing files are never overwritten.
    ///
    /// The existence check and the rename are not atomic. That is fine for a
    /// single mover; concurrent movers into the same directory could race.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_organizer::FileOrganizer;
    /// use dirsort::run_log::RunLog;
    /// use std::path::Path;
    ///
    /// let mut log = RunLog::discard();
    /// let result = FileOrganizer::relocate(
    ///     Path::new("/data/report.txt"),
    ///     Path::new("/data/Documents"),
    ///     &mut log,
    /// );
    ///
    /// match result {
    ///     Ok(path) => println!("Moved to {}", path.display()),
    ///     Err(e) => eprintln!("Relocation failed: {}", e),
    /// }
    /// ```
    pub fn relocate(
        source_path: &Path,
        target_dir: &Path,
        log: &mut RunLog,
    ) -> OrganizeResult<PathBuf> {
        if let Err(e) = fs::create_dir_all(target_dir) {
            log.error(&format!(
                "Failed to create directory {}: {}",
                target_dir.display(),
                e
            ));
            return Err(OrganizeError::DirectoryCreationFailed {
                path: target_dir.to_path_buf(),
                source: e,
            });
        }

        let Some(file_name) = source_path.file_name() else {
            let e = io::Error::new(io::ErrorKind::InvalidInput, "file has no name component");
            log.error(&format!(
                "Failed to move {} to {}: {}",
                source_path.display(),
                target_dir.display(),
                e
            ));
            return Err(OrganizeError::FileMoveFailure {
                from: source_path.to_path_buf(),
                to: target_dir.to_path_buf(),
                source: e,
            });
        };

        let mut destination = target_dir.join(file_name);
        if path_taken(&destination) {
            destination = Self::collision_free_path(target_dir, file_name);
            log.info(&format!(
                "Name conflict for {}, new name: {}",
                source_path.display(),
                destination
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default()
            ));
        }

        if let Err(e) = fs::rename(source_path, &destination) {
            log.error(&format!(
                "Failed to move {} to {}: {}",
                source_path.display(),
                destination.display(),
                e
            ));
            return Err(OrganizeError::FileMoveFailure {
                from: source_path.to_path_buf(),
                to: destination,
                source: e,
            });
        }

        log.success(&format!(
            "File {} moved to {}",
            file_name.to_string_lossy(),
            destination.display()
        ));
        Ok(destination)
    }

    /// Picks a free name for `file_name` inside `dir` using the current time.
    fn collision_free_path(dir: &Path, file_name: &OsStr) -> PathBuf {
        let stamp = Local::now().format(COLLISION_TIMESTAMP_FORMAT).to_string();
        let mut n: u32 = 0;
        loop {
            let candidate = dir.join(stamped_name(file_name, &stamp, n));
            if !path_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Builds `<stem>_<stamp>[_<n>].<ext>`; `n == 0` omits the counter.
///
/// Examples:
/// - "report.txt" -> "report_2024-01-02_15-04-05.txt"
/// - "archive.tar.zip" -> "archive.tar_2024-01-02_15-04-05.zip"
/// - ".bashrc" -> ".bashrc_2024-01-02_15-04-05"
fn stamped_name(file_name: &OsStr, stamp: &str, n: u32) -> OsString {
    let base = Path::new(file_name);
    let mut name: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| file_name.to_os_string());
    name.push("_");
    name.push(stamp);
    if n > 0 {
        name.push(format!("_{}", n));
    }
    if let Some(ext) = base.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

/// True if anything, a dangling symlink included, occupies `path`.
fn path_taken(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
