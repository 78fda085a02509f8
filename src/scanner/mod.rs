//! Scanner module for directory traversal and file content access.
//!
//! This module provides functionality for:
//! - Directory walking using jwalk (regular, readable files only)
//! - Streaming content hashing with BLAKE3
//! - Chunked byte-for-byte file comparison
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//! - [`compare`]: Direct content comparison of two files
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let files = Walker::new(Path::new(".")).files().unwrap();
//! for path in &files {
//!     println!("{}", path.display());
//! }
//! ```

pub mod compare;
pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};

pub use compare::{Comparer, COMPARE_CHUNK_SIZE};
pub use hasher::{hash_to_hex, Hash, Hasher, HASH_CHUNK_SIZE};
pub use walker::{enumerate_files, Walker};

/// A discovered file paired with its size.
///
/// The size is queried once per run and reused by every later stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file, as produced by the walker
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry from a known size.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }

    /// Stat `path` and build an entry from its current size.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the metadata query fails.
    pub fn from_path(path: PathBuf) -> std::io::Result<Self> {
        let size = std::fs::metadata(&path)?.len();
        Ok(Self { path, size })
    }
}

/// Invalid root for a scan.
///
/// Every variant means the same thing to the user: there is nothing to scan
/// at the requested location.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// No path was supplied.
    #[error("Path not found: no path given")]
    MissingPath,

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Path not found: {0} is not a directory")]
    NotADirectory(PathBuf),
}

impl ScanError {
    /// Check that `root` is an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::PathNotFound`] or [`ScanError::NotADirectory`].
    pub fn validate_root(root: &Path) -> Result<(), ScanError> {
        if !root.exists() {
            return Err(ScanError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }
        Ok(())
    }
}

/// A file could not be read while its content was being hashed or compared.
#[derive(thiserror::Error, Debug)]
#[error("I/O error for {path}")]
pub struct ReadError {
    /// Path where the error occurred
    pub path: PathBuf,
    /// The underlying I/O error
    #[source]
    pub source: std::io::Error,
}

impl ReadError {
    pub(crate) fn new(path: &Path, source: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}
