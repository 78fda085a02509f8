//! dupescan - duplicate file finder
//!
//! Walks a directory tree and reports groups of files with identical
//! content. Files are bucketed by size first; each bucket of two or more
//! files is then split by content, either by BLAKE3 checksum or by direct
//! chunked comparison.
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let (result, _) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//! for group in &result.groups {
//!     println!("{:?}", group.files);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderError};
use crate::error::ExitCode;
use crate::output::{DetailedJsonOutput, JsonOutput};
use crate::progress::Progress;
use crate::scanner::ScanError;

/// Run one scan as described by the command line.
///
/// Logging must already be initialized. The result goes to stdout; progress
/// and logs go to stderr.
///
/// # Errors
///
/// Returns an error if the root path is missing or not a directory (checked
/// before configuration is loaded), configuration cannot be loaded, a file
/// cannot be read, or output cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.print_config {
        let config = load_config(&cli)?;
        out.write_all(config.to_toml_string()?.as_bytes())?;
        return Ok(ExitCode::Success);
    }

    // An unusable root is reported even when the configuration is broken
    let root = cli
        .path
        .as_deref()
        .ok_or(FinderError::InvalidInput(ScanError::MissingPath))?;
    ScanError::validate_root(root).map_err(FinderError::InvalidInput)?;

    let config = load_config(&cli)?;

    let mut finder_config = config.finder_config();
    if cli.show_progress() {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let finder = DuplicateFinder::new(finder_config);
    let (result, summary) = finder.find_duplicates(root)?;

    match cli.output {
        OutputFormat::Json => JsonOutput::new(&result).write_to(&mut out)?,
        OutputFormat::Detailed => DetailedJsonOutput::new(&result, &summary).write_to(&mut out)?,
    }
    out.flush()?;

    log::info!(
        "Found {} duplicate groups among {} files ({}) in {:.2}s",
        summary.duplicate_groups,
        summary.total_files,
        summary.total_size_display(),
        summary.scan_duration.as_secs_f64()
    );

    Ok(ExitCode::Success)
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = Config::load(cli.config.as_deref(), &cli.config_overrides())
        .context("Failed to load configuration")?;
    log::debug!("Effective configuration: {config:?}");
    Ok(config)
}
