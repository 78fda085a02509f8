//! Content-equality strategies for a single size bucket.
//!
//! Both strategies split a bucket of same-sized files into classes of
//! byte-identical files and must agree on the resulting partition:
//!
//! - [`ChecksumStrategy`] hashes every file once and groups by digest.
//! - [`DirectCompareStrategy`] compares each file against one
//!   representative per class found so far.
//!
//! Callers pick one through [`Strategy`], usually from configuration.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{Strategy, StrategyOptions};
//! use std::path::PathBuf;
//!
//! let strategy = Strategy::Checksum.build(&StrategyOptions::default());
//! let bucket = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
//! let classes = strategy.partition(&bucket).unwrap();
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::scanner::{
    hash_to_hex, Comparer, Hash, Hasher, ReadError, COMPARE_CHUNK_SIZE, HASH_CHUNK_SIZE,
};

/// Partitions a bucket of same-sized files into content-equality classes.
pub trait EqualityStrategy: Send + Sync {
    /// Short name for logs and summaries.
    fn name(&self) -> &'static str;

    /// Split `bucket` into classes of identical files.
    ///
    /// Every input path appears in exactly one class; classes are never
    /// empty. Files are read in full, so any read failure aborts the
    /// partition.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] for the first file that cannot be read.
    fn partition(&self, bucket: &[PathBuf]) -> Result<Vec<Vec<PathBuf>>, ReadError>;
}

/// Groups files by full-content BLAKE3 digest.
///
/// Classes come out in the order their digest was first seen.
#[derive(Debug, Clone, Default)]
pub struct ChecksumStrategy {
    hasher: Hasher,
}

impl ChecksumStrategy {
    /// Create a checksum strategy around `hasher`.
    #[must_use]
    pub fn new(hasher: Hasher) -> Self {
        Self { hasher }
    }
}

impl EqualityStrategy for ChecksumStrategy {
    fn name(&self) -> &'static str {
        "checksum"
    }

    fn partition(&self, bucket: &[PathBuf]) -> Result<Vec<Vec<PathBuf>>, ReadError> {
        let mut classes: Vec<Vec<PathBuf>> = Vec::new();
        let mut index_by_hash: HashMap<Hash, usize> = HashMap::with_capacity(bucket.len());

        for path in bucket {
            let hash = self.hasher.full_hash(path)?;
            match index_by_hash.get(&hash) {
                Some(&idx) => classes[idx].push(path.clone()),
                None => {
                    log::trace!("New digest {} for {}", hash_to_hex(&hash), path.display());
                    index_by_hash.insert(hash, classes.len());
                    classes.push(vec![path.clone()]);
                }
            }
        }

        Ok(classes)
    }
}

/// Groups files by direct chunked comparison.
///
/// Each file is compared against the first member of every existing class,
/// in class creation order, and joins the first class that matches. A file
/// matching no class starts a new one.
///
/// Comparing against the representative alone is sound because byte
/// equality is transitive: every member of a class already equals its
/// representative. Members are not re-verified pairwise.
#[derive(Debug, Clone, Default)]
pub struct DirectCompareStrategy {
    comparer: Comparer,
}

impl DirectCompareStrategy {
    /// Create a direct comparison strategy around `comparer`.
    #[must_use]
    pub fn new(comparer: Comparer) -> Self {
        Self { comparer }
    }
}

impl EqualityStrategy for DirectCompareStrategy {
    fn name(&self) -> &'static str {
        "compare"
    }

    fn partition(&self, bucket: &[PathBuf]) -> Result<Vec<Vec<PathBuf>>, ReadError> {
        let mut classes: Vec<Vec<PathBuf>> = Vec::new();

        'files: for path in bucket {
            for class in &mut classes {
                if self.comparer.files_equal(&class[0], path)? {
                    class.push(path.clone());
                    continue 'files;
                }
            }
            log::trace!("New content class for {}", path.display());
            classes.push(vec![path.clone()]);
        }

        Ok(classes)
    }
}

/// Equality strategy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Hash every file and group by digest
    #[default]
    Checksum,
    /// Compare files byte-for-byte against class representatives
    Compare,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Checksum => write!(f, "checksum"),
            Strategy::Compare => write!(f, "compare"),
        }
    }
}

/// Tunables shared by the strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyOptions {
    /// Read size for checksum computation
    pub hash_chunk_size: usize,
    /// Read size for direct comparison
    pub compare_chunk_size: usize,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            hash_chunk_size: HASH_CHUNK_SIZE,
            compare_chunk_size: COMPARE_CHUNK_SIZE,
        }
    }
}

impl Strategy {
    /// Instantiate the selected strategy.
    #[must_use]
    pub fn build(self, options: &StrategyOptions) -> Arc<dyn EqualityStrategy> {
        match self {
            Strategy::Checksum => Arc::new(ChecksumStrategy::new(
                Hasher::new().with_chunk_size(options.hash_chunk_size),
            )),
            Strategy::Compare => Arc::new(DirectCompareStrategy::new(
                Comparer::new().with_chunk_size(options.compare_chunk_size),
            )),
        }
    }
}
