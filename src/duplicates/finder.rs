//! Duplicate finder implementation.
//!
//! # Overview
//!
//! This module orchestrates the duplicate detection pipeline:
//! 1. **Walk** - Collect every readable regular file under the root
//! 2. **Size grouping** - Bucket files by size (see [`crate::duplicates::groups`])
//! 3. **Content grouping** - Split each bucket of 2+ files into classes of
//!    identical files with the configured [`Strategy`]
//! 4. **Filter** - Keep classes with 2+ members
//!
//! Buckets are independent, so step 3 runs on a bounded rayon pool. Results
//! are collected in bucket order, which keeps the output identical to a
//! sequential run.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig, Strategy};
//! use std::path::Path;
//!
//! let config = FinderConfig::default().with_strategy(Strategy::Compare);
//! let finder = DuplicateFinder::new(config);
//! let (result, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! println!("{} groups, {} reclaimable", result.len(), summary.reclaimable_display());
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;
use rayon::prelude::*;

use super::groups::{group_by_size, DuplicateGroup, GroupingStats, ScanResult, SizeBucket};
use super::strategy::{EqualityStrategy, Strategy, StrategyOptions};
use crate::progress::ProgressCallback;
use crate::scanner::{FileEntry, ReadError, ScanError, Walker};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Content-equality strategy.
    pub strategy: Strategy,
    /// Read sizes used by the strategies.
    pub strategy_options: StrategyOptions,
    /// Number of worker threads for content grouping.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("strategy", &self.strategy)
            .field("strategy_options", &self.strategy_options)
            .field("io_threads", &self.io_threads)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            strategy_options: StrategyOptions::default(),
            io_threads: 4,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Select the content-equality strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the worker thread count (minimum 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the checksum read size (minimum 1).
    #[must_use]
    pub fn with_hash_chunk_size(mut self, bytes: usize) -> Self {
        self.strategy_options.hash_chunk_size = bytes.max(1);
        self
    }

    /// Set the direct comparison read size (minimum 1).
    #[must_use]
    pub fn with_compare_chunk_size(mut self, bytes: usize) -> Self {
        self.strategy_options.compare_chunk_size = bytes.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Strategy used for content grouping
    pub strategy: Strategy,
    /// Total number of files enumerated
    pub total_files: usize,
    /// Total size of all enumerated files in bytes
    pub total_size: u64,
    /// Zero-byte files dropped by size grouping
    pub empty_files_dropped: usize,
    /// Number of distinct sizes
    pub size_buckets: usize,
    /// Files that shared their size with at least one other file
    pub candidate_files: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding one original per group)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Format total size as human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }

    fn record_grouping(&mut self, stats: &GroupingStats) {
        self.total_files = stats.total_files;
        self.total_size = stats.total_size;
        self.empty_files_dropped = stats.empty_files_dropped;
        self.size_buckets = stats.unique_sizes;
        self.candidate_files = stats.candidate_files;
    }

    fn record_result(&mut self, result: &ScanResult) {
        self.duplicate_groups = result.len();
        self.duplicate_files = result.duplicate_files();
        self.reclaimable_space = result.reclaimable_space();
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The root path is missing or not a directory.
    #[error(transparent)]
    InvalidInput(#[from] ScanError),

    /// A file size could not be queried.
    #[error("Failed to read metadata for {path}")]
    Metadata {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File content could not be read during grouping.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// The worker pool could not be started.
    #[error("Failed to start worker threads")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Query the size of every path once and bucket the results.
///
/// # Errors
///
/// Returns [`FinderError::Metadata`] for the first path whose size cannot
/// be read.
pub fn size_buckets(
    paths: Vec<PathBuf>,
) -> Result<(Vec<SizeBucket>, GroupingStats), FinderError> {
    size_buckets_with_progress(paths, None)
}

fn size_buckets_with_progress(
    paths: Vec<PathBuf>,
    callback: Option<&Arc<dyn ProgressCallback>>,
) -> Result<(Vec<SizeBucket>, GroupingStats), FinderError> {
    if let Some(callback) = callback {
        callback.on_phase_start("sizing", paths.len());
    }

    let entries = paths
        .into_iter()
        .enumerate()
        .map(|(idx, path)| {
            if let Some(callback) = callback {
                callback.on_progress(idx + 1, path.to_string_lossy().as_ref());
            }
            FileEntry::from_path(path.clone())
                .map_err(|source| FinderError::Metadata { path, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(callback) = callback {
        callback.on_phase_end("sizing");
    }

    Ok(group_by_size(entries))
}

/// Duplicate finder that orchestrates the detection pipeline.
pub struct DuplicateFinder {
    config: FinderConfig,
    strategy: Arc<dyn EqualityStrategy>,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let strategy = config.strategy.build(&config.strategy_options);
        Self { config, strategy }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files under `path`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist or is not a directory (nothing is scanned)
    /// - A file's size or content cannot be read after enumeration
    ///
    /// Entries that cannot be read during the walk are skipped, not reported.
    pub fn find_duplicates(&self, path: &Path) -> Result<(ScanResult, ScanSummary), FinderError> {
        let start_time = Instant::now();
        ScanError::validate_root(path)?;

        log::info!(
            "Starting duplicate scan of {} ({} strategy)",
            path.display(),
            self.strategy.name()
        );

        let callback = self.config.progress_callback.as_ref();
        if let Some(callback) = callback {
            callback.on_phase_start("walking", 0);
        }

        let mut walker = Walker::new(path);
        if let Some(callback) = callback {
            walker = walker.with_progress_callback(Arc::clone(callback));
        }
        let files = walker.files()?;

        if let Some(callback) = callback {
            callback.on_phase_end("walking");
        }

        let (result, mut summary) = self.find_duplicates_from_files(files)?;
        summary.scan_duration = start_time.elapsed();

        Ok((result, summary))
    }

    /// Find duplicates among an already enumerated list of files.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if a size or content read fails, or if the
    /// worker pool cannot be started.
    pub fn find_duplicates_from_files(
        &self,
        files: Vec<PathBuf>,
    ) -> Result<(ScanResult, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary {
            strategy: self.config.strategy,
            ..Default::default()
        };

        let callback = self.config.progress_callback.as_ref();
        let (buckets, stats) = size_buckets_with_progress(files, callback)?;
        summary.record_grouping(&stats);

        log::info!(
            "Size grouping: {} files ({}) -> {} candidates ({:.1}% eliminated)",
            stats.total_files,
            ByteSize::b(stats.total_size),
            stats.candidate_files,
            stats.elimination_rate()
        );

        let groups = self.group_by_content(&buckets)?;
        let result = ScanResult { groups };
        summary.record_result(&result);
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} duplicate groups, {} duplicate files, {} reclaimable",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display()
        );

        Ok((result, summary))
    }

    /// Run the content strategy on every bucket with 2+ files.
    ///
    /// Single-file buckets are skipped: their only class is a singleton.
    fn group_by_content(&self, buckets: &[SizeBucket]) -> Result<Vec<DuplicateGroup>, FinderError> {
        let candidates: Vec<&SizeBucket> = buckets.iter().filter(|b| b.has_candidates()).collect();
        if candidates.is_empty() {
            log::debug!("No size bucket holds more than one file");
            return Ok(Vec::new());
        }

        let callback = self.config.progress_callback.as_ref();
        if let Some(callback) = callback {
            callback.on_phase_start("grouping", candidates.len());
        }

        log::info!(
            "Content grouping: {} buckets on {} threads",
            candidates.len(),
            self.config.io_threads
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()?;

        let done = AtomicUsize::new(0);
        let partitions: Vec<(u64, Vec<Vec<PathBuf>>)> = pool.install(|| {
            candidates
                .par_iter()
                .map(|bucket| {
                    let classes = self.strategy.partition(&bucket.files)?;
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(callback) = callback {
                        let first = bucket.files[0].to_string_lossy();
                        callback.on_progress(finished, first.as_ref());
                    }
                    log::trace!(
                        "Bucket {} bytes: {} files -> {} classes",
                        bucket.size,
                        bucket.len(),
                        classes.len()
                    );
                    Ok((bucket.size, classes))
                })
                .collect::<Result<Vec<_>, ReadError>>()
        })?;

        if let Some(callback) = callback {
            callback.on_phase_end("grouping");
        }

        let groups = partitions
            .into_iter()
            .flat_map(|(size, classes)| {
                classes
                    .into_iter()
                    .filter(|class| class.len() >= 2)
                    .map(move |files| DuplicateGroup::new(size, files))
            })
            .collect();

        Ok(groups)
    }
}
