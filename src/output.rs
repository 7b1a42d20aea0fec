//! Output formatting and styling module.
//!
//! [`Reporter`] renders the statistics of a finished run as plain text or
//! JSON. [`OutputFormatter`] owns the colored console messages used by the
//! command-line front end.

use crate::file_category::Category;
use crate::statistics::FileStats;
use crate::tree_walker::RunState;
use colored::*;
use serde_json::{Value, json};
use std::fmt::Write as _;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Converts a byte count to binary megabytes.
pub fn to_megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Renders run statistics.
pub struct Reporter;

impl Reporter {
    /// Renders a plain-text report of `state`.
    ///
    /// # Example
    ///
    /// ```text
    /// === File Organization Report ===
    /// Total files processed: 2
    /// Total size: 0.00 MB
    /// Statistics by category:
    /// Documents:
    ///   - Files: 1
    ///   - Total size: 0.00 MB
    /// ```
    pub fn render(state: &RunState) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== File Organization Report ===");
        let _ = writeln!(out, "Total files processed: {}", state.processed_count);
        let _ = writeln!(
            out,
            "Total size: {:.2} MB",
            to_megabytes(state.statistics.total_size())
        );
        let _ = writeln!(out, "Statistics by category:");

        for (category, stats) in sorted_categories(state) {
            let _ = writeln!(out, "{}:", category);
            let _ = writeln!(out, "  - Files: {}", stats.count);
            let _ = writeln!(out, "  - Total size: {:.2} MB", to_megabytes(stats.total_size));
        }
        out
    }

    /// Renders `state` as a JSON document.
    ///
    /// # Returns
    ///
    /// An object with `source_root`, `processed_count`, `total_size` in
    /// bytes, `total_size_mb`, a `categories` map keyed by directory name and
    /// the `errors` recorded during the run.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dirsort::{Organizer, Reporter, RunLog};
    ///
    /// let mut organizer = Organizer::new("/home/user/Downloads", RunLog::discard());
    /// organizer.organize()?;
    /// let report = Reporter::render_json(organizer.state());
    /// println!("{}", serde_json::to_string_pretty(&report)?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn render_json(state: &RunState) -> Value {
        let categories: serde_json::Map<String, Value> = sorted_categories(state)
            .into_iter()
            .map(|(category, stats)| {
                (
                    category.dir_name().to_string(),
                    serde_json::to_value(stats).unwrap_or(Value::Null),
                )
            })
            .collect();

        json!({
            "source_root": state.source_root.to_string_lossy().to_string(),
            "processed_count": state.processed_count,
            "total_size": state.statistics.total_size(),
            "total_size_mb": format!("{:.2}", to_megabytes(state.statistics.total_size())),
            "categories": categories,
            "errors": state.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        })
    }
}

// Category order is not part of the contract; sorting keeps output stable.
fn sorted_categories(state: &RunState) -> Vec<(Category, FileStats)> {
    let mut categories: Vec<_> = state
        .statistics
        .iter()
        .map(|(category, stats)| (*category, *stats))
        .collect();
    categories.sort_by_key(|(category, _)| category.dir_name());
    categories
}

/// Console messages with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints `message` unchanged, without appending a newline.
    ///
    /// Rendered reports already end with one.
    pub fn plain(message: &str) {
        print!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::Statistics;
    use std::path::PathBuf;

    fn state_with(stats: Statistics, processed_count: u64) -> RunState {
        RunState {
            source_root: PathBuf::from("/data"),
            processed_count,
            statistics: stats,
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_to_megabytes() {
        assert_eq!(to_megabytes(0), 0.0);
        assert_eq!(to_megabytes(1024 * 1024), 1.0);
        assert_eq!(to_megabytes(3 * 512 * 1024), 1.5);
    }

    #[test]
    fn test_render_report() {
        let mut stats = Statistics::new();
        stats.record(Category::Music, 3 * 1024 * 1024);
        stats.record(Category::Documents, 512 * 1024);
        stats.record(Category::Documents, 512 * 1024);

        let report = Reporter::render(&state_with(stats, 3));

        let expected = "=== File Organization Report ===\n\
                        Total files processed: 3\n\
                        Total size: 4.00 MB\n\
                        Statistics by category:\n\
                        Documents:\n  - Files: 2\n  - Total size: 1.00 MB\n\
                        Music:\n  - Files: 1\n  - Total size: 3.00 MB\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_empty_report() {
        let report = Reporter::render(&state_with(Statistics::new(), 0));
        assert!(report.contains("Total files processed: 0"));
        assert!(report.contains("Total size: 0.00 MB"));
        assert!(report.ends_with("Statistics by category:\n"));
    }

    #[test]
    fn test_render_json() {
        let mut stats = Statistics::new();
        stats.record(Category::Images, 20);
        stats.record(Category::Other, 5);

        let value = Reporter::render_json(&state_with(stats, 2));

        assert_eq!(value["processed_count"], 2);
        assert_eq!(value["total_size"], 25);
        assert_eq!(value["categories"]["Images"]["count"], 1);
        assert_eq!(value["categories"]["Images"]["total_size"], 20);
        assert_eq!(value["categories"]["other"]["count"], 1);
        assert_eq!(value["errors"].as_array().map(Vec::len), Some(0));
    }
}
