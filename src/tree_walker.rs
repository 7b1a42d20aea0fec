//! Directory tree traversal and classification.
//!
//! The [`Organizer`] walks the source tree depth-first, pre-order, visiting
//! the entries of every directory in file-name order. Each regular file is
//! classified by extension and relocated into `<source_root>/<category>`.
//! Directories whose name equals a category directory name are not
//! descended, anywhere in the tree, so already sorted files are left alone.
//! This also skips unrelated user folders that happen to be called `Images`
//! and so on.

use crate::file_category::{Category, RuleTable};
use crate::file_organizer::{FileOrganizer, OrganizeError, OrganizeResult};
use crate::run_log::RunLog;
use crate::statistics::Statistics;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// What to do when an entry cannot be read or a file cannot be relocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the run at the first failure.
    #[default]
    Abort,
    /// Record the failure in [`RunState::errors`] and keep going.
    Continue,
}

/// Everything a run has produced so far.
#[derive(Debug)]
pub struct RunState {
    pub source_root: PathBuf,
    /// Regular files relocated, including those whose size could not be read.
    pub processed_count: u64,
    pub statistics: Statistics,
    /// Failures that did not abort the run.
    pub errors: Vec<OrganizeError>,
}

impl RunState {
    fn new(source_root: PathBuf) -> Self {
        Self {
            source_root,
            processed_count: 0,
            statistics: Statistics::new(),
            errors: Vec::new(),
        }
    }

    /// True if a traversal or relocation failure was recorded.
    ///
    /// Metadata failures after a successful move do not count.
    pub fn has_failures(&self) -> bool {
        self.errors
            .iter()
            .any(|e| !matches!(e, OrganizeError::Stat { .. }))
    }
}

/// Sorts one source tree.
///
/// The organizer owns the run log; the log file is closed when the
/// organizer is dropped.
#[derive(Debug)]
pub struct Organizer {
    rules: RuleTable,
    policy: ErrorPolicy,
    log: RunLog,
    state: RunState,
}

impl Organizer {
    /// Creates an organizer for an existing directory.
    ///
    /// # Arguments
    ///
    /// * `source_root` - The directory to sort; category folders are created directly below it
    /// * `log` - The run log; owned by the organizer until it is dropped
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dirsort::{ErrorPolicy, Organizer, RunLog};
    ///
    /// let log = RunLog::open(std::path::Path::new("organizer.log")).expect("log opens");
    /// let organizer = Organizer::new("/home/user/Downloads", log)
    ///     .with_error_policy(ErrorPolicy::Continue);
    /// assert_eq!(organizer.state().processed_count, 0);
    /// ```
    pub fn new(source_root: impl Into<PathBuf>, log: RunLog) -> Self {
        Self {
            rules: RuleTable::default(),
            policy: ErrorPolicy::default(),
            log,
            state: RunState::new(source_root.into()),
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn into_state(self) -> RunState {
        self.state
    }

    /// Walks the source tree and relocates every regular file.
    ///
    /// With [`ErrorPolicy::Abort`] the first traversal or relocation error
    /// is logged and returned; files handled before it stay where they were
    /// moved and remain counted in the run state.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once every entry was visited. Under
    /// [`ErrorPolicy::Continue`] this includes runs with failures; inspect
    /// [`RunState::errors`] through [`Organizer::state`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dirsort::{Organizer, RunLog};
    ///
    /// let mut organizer = Organizer::new("/home/user/Downloads", RunLog::discard());
    /// match organizer.organize() {
    ///     Ok(()) => println!("Sorted {} files", organizer.state().processed_count),
    ///     Err(e) => eprintln!("Sorting stopped: {}", e),
    /// }
    /// ```
    pub fn organize(&mut self) -> OrganizeResult<()> {
        let root = self.state.source_root.clone();
        let mut entries = WalkDir::new(&root).sort_by_file_name().into_iter();

        while let Some(next) = entries.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                    self.log
                        .error(&format!("Cannot access {}: {}", path.display(), e));
                    self.fail(OrganizeError::Traversal { path, source: e })?;
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if entry.depth() > 0 && self.is_category_dir(&entry) {
                    tracing::debug!("skipping category directory {}", entry.path().display());
                    entries.skip_current_dir();
                }
                continue;
            }

            if !file_type.is_file() {
                tracing::debug!("leaving non-regular entry {}", entry.path().display());
                continue;
            }

            if self.is_own_log(&entry) {
                continue;
            }

            if let Err(e) = self.process_file(entry.path()) {
                self.fail(e)?;
            }
        }

        if self.state.errors.is_empty() {
            self.log.success(&format!(
                "Sorting completed successfully. Processed {} files",
                self.state.processed_count
            ));
        } else {
            self.log.info(&format!(
                "Sorting finished with {} errors. Processed {} files",
                self.state.errors.len(),
                self.state.processed_count
            ));
        }
        Ok(())
    }

    fn process_file(&mut self, path: &Path) -> OrganizeResult<()> {
        let category = self.rules.classify_path(path);
        let target_dir = self.state.source_root.join(category.dir_name());

        let final_path = match FileOrganizer::relocate(path, &target_dir, &mut self.log) {
            Ok(final_path) => final_path,
            Err(e) => {
                self.log
                    .error(&format!("Error moving file {}: {}", path.display(), e));
                return Err(e);
            }
        };

        self.record_relocated(category, final_path);
        Ok(())
    }

    /// Counts a relocated file and records its size at `final_path`.
    ///
    /// A file whose size cannot be read is still counted but gets no
    /// statistics; the failure is logged and kept in the run state.
    fn record_relocated(&mut self, category: Category, final_path: PathBuf) {
        match fs::metadata(&final_path) {
            Ok(meta) => self.state.statistics.record(category, meta.len()),
            Err(e) => {
                self.log.error(&format!(
                    "Failed to read file info of {}: {}",
                    final_path.display(),
                    e
                ));
                self.state.errors.push(OrganizeError::Stat {
                    path: final_path,
                    source: e,
                });
            }
        }

        self.state.processed_count += 1;
    }

    /// Returns the error under `Abort`, records it under `Continue`.
    fn fail(&mut self, error: OrganizeError) -> OrganizeResult<()> {
        match self.policy {
            ErrorPolicy::Abort => Err(error),
            ErrorPolicy::Continue => {
                self.state.errors.push(error);
                Ok(())
            }
        }
    }

    fn is_category_dir(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.rules.is_category_dir(name))
    }

    fn is_own_log(&self, entry: &DirEntry) -> bool {
        let Some(log_path) = self.log.path() else {
            return false;
        };
        if log_path.file_name() != Some(entry.file_name()) {
            return false;
        }
        entry
            .path()
            .canonicalize()
            .is_ok_and(|p| p.as_path() == log_path)
    }
}
