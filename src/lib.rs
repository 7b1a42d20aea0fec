//! dirsort - sort a directory tree into category folders
//!
//! This library classifies files by extension, moves them into category
//! subdirectories of the source root (renaming on name collisions), and
//! aggregates per-category statistics for a final report.

pub mod cli;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod run_log;
pub mod statistics;
pub mod tree_walker;

pub use file_category::{Category, RuleTable};
pub use file_organizer::{FileOrganizer, OrganizeError, OrganizeResult};
pub use output::Reporter;
pub use run_log::RunLog;
pub use statistics::{FileStats, Statistics};
pub use tree_walker::{ErrorPolicy, Organizer, RunState};

pub use cli::{Cli, OrganizeOptions, run_cli};
