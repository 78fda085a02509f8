//! Command-line interface definitions for dupescan.
//!
//! A single flat command: every option tunes one scan of one directory tree.
//! Options left unset fall through to the config file and environment (see
//! [`crate::config`]).
//!
//! # Example
//!
//! ```bash
//! # Scan a directory, print groups as JSON
//! dupescan --path ~/Downloads
//!
//! # Direct byte comparison with larger reads
//! dupescan -p ~/Downloads --strategy compare --compare-chunk-size 64KiB
//!
//! # Groups plus a summary object
//! dupescan -p ~/Downloads --output detailed
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ConfigOverrides;
use crate::duplicates::Strategy;

/// Find files with identical content under a directory.
///
/// Files are bucketed by size, then each bucket is split by content with
/// either a checksum or a direct byte-for-byte comparison.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory path to scan for duplicates
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Content comparison strategy [default: checksum]
    #[arg(short, long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Number of worker threads for content comparison [default: 4]
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Read size for checksum computation (e.g., 4096, 4KiB, 1MiB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub hash_chunk_size: Option<u64>,

    /// Read size for direct comparison (e.g., 2048, 2KiB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub compare_chunk_size: Option<u64>,

    /// Load configuration from this TOML file instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the merged configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// The options given on the command line, as the top config layer.
    #[must_use]
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            strategy: self.strategy,
            io_threads: self.io_threads,
            hash_chunk_size: self.hash_chunk_size.map(saturating_usize),
            compare_chunk_size: self.compare_chunk_size.map(saturating_usize),
        }
    }

    /// Whether progress bars should be drawn.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress
    }
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Duplicate groups as a JSON list of path lists
    #[default]
    Json,
    /// Duplicate groups with sizes, plus a scan summary
    Detailed,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Detailed => write!(f, "detailed"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupescan::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    if num < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
