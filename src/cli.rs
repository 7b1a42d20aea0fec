//! Command-line interface module for dirsort.
//!
//! This module handles:
//! - Argument parsing
//! - Interactive prompting for the source directory
//! - Source directory validation
//! - Run orchestration and report printing

use crate::file_organizer::{OrganizeError, OrganizeResult};
use crate::output::{OutputFormatter, Reporter};
use crate::run_log::{DEFAULT_LOG_FILE, RunLog};
use crate::tree_walker::{ErrorPolicy, Organizer, RunState};
use clap::{Parser, ValueHint};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Sort the files of a directory tree into category subdirectories.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory to sort. Prompted for on standard input when omitted.
    #[arg(value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub path: Option<PathBuf>,

    /// Record failures and keep sorting instead of stopping at the first one.
    #[arg(long)]
    pub keep_going: bool,

    /// Append log entries to this file.
    #[arg(
        long,
        value_name = "FILE",
        default_value = DEFAULT_LOG_FILE,
        value_hint = ValueHint::FilePath
    )]
    pub log_file: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Mirror log entries on stderr (repeat for debug output).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Settings of one run, validated and ready to use.
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub source_root: PathBuf,
    pub log_file: PathBuf,
    pub error_policy: ErrorPolicy,
    pub json: bool,
}

/// Prints usage instructions and reads the source directory from `input`.
///
/// Only the first line is used; surrounding whitespace is trimmed.
pub fn prompt_source_root<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> io::Result<String> {
    writeln!(output, "Instructions:")?;
    writeln!(output, "1. Enter the path to a directory")?;
    writeln!(output, "2. Its files will be sorted into category folders")?;
    writeln!(output, "3. A report is printed when sorting is done")?;
    writeln!(output, "Directory path (empty for the current directory):")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Checks that `input` names an existing directory.
///
/// An empty input means the current directory.
///
/// # Examples
///
/// ```no_run
/// use dirsort::cli::resolve_source_root;
///
/// let root = resolve_source_root("").expect("current directory is valid");
/// assert_eq!(root, std::path::PathBuf::from("."));
/// ```
pub fn resolve_source_root(input: &str) -> OrganizeResult<PathBuf> {
    let path = if input.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(input)
    };

    let metadata = std::fs::metadata(&path).map_err(|e| OrganizeError::InvalidSourceRoot {
        path: path.clone(),
        reason: format!("not accessible or does not exist: {}", e),
    })?;

    if !metadata.is_dir() {
        return Err(OrganizeError::InvalidSourceRoot {
            path,
            reason: "not a directory".to_string(),
        });
    }

    Ok(path)
}

impl Cli {
    /// Turns parsed arguments into validated options, prompting on stdin when
    /// no path was given.
    pub fn into_options(self) -> anyhow::Result<OrganizeOptions> {
        let raw = match self.path {
            Some(path) => path.to_string_lossy().to_string(),
            None => {
                let stdin = io::stdin();
                prompt_source_root(stdin.lock(), io::stdout())?
            }
        };

        Ok(OrganizeOptions {
            source_root: resolve_source_root(&raw)?,
            log_file: self.log_file,
            error_policy: if self.keep_going {
                ErrorPolicy::Continue
            } else {
                ErrorPolicy::Abort
            },
            json: self.json,
        })
    }
}

/// Runs one sort and returns its final state.
///
/// The state is returned even when the walk aborted, so callers can report
/// the files handled before the failure.
pub fn run_organize(
    options: &OrganizeOptions,
) -> OrganizeResult<(RunState, OrganizeResult<()>)> {
    let log = RunLog::open(&options.log_file)?;
    let mut organizer =
        Organizer::new(&options.source_root, log).with_error_policy(options.error_policy);
    let outcome = organizer.organize();
    Ok((organizer.into_state(), outcome))
}

/// Runs the CLI application: sorts, prints the report, and reports failures.
///
/// Returns an error if the run aborted or, with `--keep-going`, if any file
/// could not be handled.
pub fn run_cli(options: &OrganizeOptions) -> anyhow::Result<()> {
    if !options.json {
        OutputFormatter::info(&format!(
            "Sorting contents of: {}",
            options.source_root.display()
        ));
    }

    let (state, outcome) = run_organize(options)?;

    if options.json {
        let report = Reporter::render_json(&state);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        OutputFormatter::plain(&Reporter::render(&state));
        if !state.errors.is_empty() {
            OutputFormatter::header(&format!("Problems ({}):", state.errors.len()));
        }
        for error in &state.errors {
            OutputFormatter::warning(&error.to_string());
        }
    }

    outcome.map_err(|e| anyhow::anyhow!("sorting failed: {}", e))?;

    if state.has_failures() {
        let failed = state
            .errors
            .iter()
            .filter(|e| !matches!(e, OrganizeError::Stat { .. }))
            .count();
        anyhow::bail!(
            "{} entries could not be sorted, see {}",
            failed,
            log_location(&options.log_file).display()
        );
    }

    if !options.json {
        OutputFormatter::success("Sorting complete!");
    }
    Ok(())
}

fn log_location(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
