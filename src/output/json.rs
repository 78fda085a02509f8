//! JSON output formatters for duplicate scan results.
//!
//! Two shapes are supported, both indented with four spaces:
//!
//! # `json`
//!
//! ```json
//! [
//!     [
//!         "/photos/a.jpg",
//!         "/backup/a.jpg"
//!     ]
//! ]
//! ```
//!
//! An empty result prints `[]`.
//!
//! # `detailed`
//!
//! ```json
//! {
//!     "duplicates": [
//!         { "size": 1024, "files": ["/a.txt", "/b.txt"] }
//!     ],
//!     "summary": {
//!         "strategy": "checksum",
//!         "total_files": 100,
//!         "duplicate_groups": 1,
//!         "reclaimable_space": 1024,
//!         "scan_duration_ms": 12
//!     }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanResult, ScanSummary, Strategy};

const INDENT: &[u8] = b"    ";

/// Duplicate groups as plain lists of path strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JsonOutput {
    /// One list of paths per duplicate group
    pub groups: Vec<Vec<String>>,
}

impl JsonOutput {
    /// Create the list-of-lists view of a scan result.
    ///
    /// ```
    /// use dupescan::duplicates::{DuplicateGroup, ScanResult};
    /// use dupescan::output::json::JsonOutput;
    /// use std::path::PathBuf;
    ///
    /// let result = ScanResult {
    ///     groups: vec![DuplicateGroup::new(
    ///         5,
    ///         vec![PathBuf::from("/a.txt"), PathBuf::from("/b.txt")],
    ///     )],
    /// };
    /// let output = JsonOutput::new(&result);
    /// assert_eq!(output.groups, vec![vec!["/a.txt", "/b.txt"]]);
    /// ```
    #[must_use]
    pub fn new(result: &ScanResult) -> Self {
        Self {
            groups: result.to_path_lists(),
        }
    }

    /// Serialize with four-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, JsonOutputError> {
        to_string_indented(self)
    }

    /// Write the indented JSON and a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        write_indented(self, writer)
    }
}

/// A single duplicate group with its size.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// File size in bytes
    pub size: u64,
    /// Paths of all identical files
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            size: group.size,
            files: group.path_strings(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Strategy used for content comparison
    pub strategy: Strategy,
    /// Total number of files enumerated
    pub total_files: usize,
    /// Total size of all enumerated files in bytes
    pub total_size: u64,
    /// Zero-byte files left out of grouping
    pub empty_files_dropped: usize,
    /// Files that shared a size with another file
    pub candidate_files: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding originals)
    pub duplicate_files: usize,
    /// Bytes freed by keeping one file per group
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(summary: &ScanSummary) -> Self {
        Self {
            strategy: summary.strategy,
            total_files: summary.total_files,
            total_size: summary.total_size,
            empty_files_dropped: summary.empty_files_dropped,
            candidate_files: summary.candidate_files,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: u64::try_from(summary.scan_duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Duplicate groups with sizes, plus scan statistics.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedJsonOutput {
    /// List of duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl DetailedJsonOutput {
    /// Create the detailed view of a scan result.
    #[must_use]
    pub fn new(result: &ScanResult, summary: &ScanSummary) -> Self {
        Self {
            duplicates: result.groups.iter().map(JsonDuplicateGroup::from).collect(),
            summary: JsonSummary::from(summary),
        }
    }

    /// Serialize with four-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, JsonOutputError> {
        to_string_indented(self)
    }

    /// Write the indented JSON and a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        write_indented(self, writer)
    }
}

fn to_string_indented<T: Serialize>(value: &T) -> Result<String, JsonOutputError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_indented<T: Serialize, W: Write>(value: &T, writer: &mut W) -> Result<(), JsonOutputError> {
    let json = to_string_indented(value)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error while writing JSON")]
    Io(#[from] std::io::Error),
}
