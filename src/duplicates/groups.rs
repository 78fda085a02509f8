//! Size-based bucketing and duplicate group types.
//!
//! # Overview
//!
//! Size grouping is the first phase of duplicate detection. Files with
//! different sizes cannot be duplicates, so every later content check runs
//! within a single [`SizeBucket`].
//!
//! Empty files are not worth reporting. The first zero-byte file seeds a
//! bucket on its own and every later zero-byte file is dropped, so empty
//! files never reach the content phase as a group.
//!
//! # Example
//!
//! ```
//! use dupescan::scanner::FileEntry;
//! use dupescan::duplicates::group_by_size;
//! use std::path::PathBuf;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/file1.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/file2.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/file3.txt"), 10),
//! ];
//!
//! let (buckets, stats) = group_by_size(files);
//!
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(buckets.len(), 2);
//! assert_eq!(buckets[0].size, 10);  // ascending size
//! assert_eq!(buckets[1].files.len(), 2);
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::scanner::FileEntry;

/// A non-empty set of files sharing one byte size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBucket {
    /// File size in bytes (shared by all files in this bucket)
    pub size: u64,
    /// Files with this exact size, in discovery order
    pub files: Vec<PathBuf>,
}

impl SizeBucket {
    /// Number of files in this bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check if this bucket could hold duplicates (2+ files).
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        self.files.len() > 1
    }
}

/// Statistics from size grouping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files processed
    pub total_files: usize,
    /// Total size of all files in bytes
    pub total_size: u64,
    /// Number of distinct file sizes (one bucket each)
    pub unique_sizes: usize,
    /// Number of files in buckets with 2+ members
    pub candidate_files: usize,
    /// Number of buckets with 2+ members
    pub candidate_buckets: usize,
    /// Zero-byte files dropped after the first
    pub empty_files_dropped: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size grouping.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            let eliminated = self.total_files - self.candidate_files;
            (eliminated as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Group files by size.
///
/// Returns every bucket, singletons included, ordered by ascending size.
/// Within a bucket files keep their input order.
///
/// # Zero-byte files
///
/// The first zero-byte file seeds a one-member bucket of size 0. Every
/// later zero-byte file is dropped and counted in
/// [`GroupingStats::empty_files_dropped`].
#[must_use]
pub fn group_by_size(
    files: impl IntoIterator<Item = FileEntry>,
) -> (Vec<SizeBucket>, GroupingStats) {
    let mut by_size: BTreeMap<u64, Vec<PathBuf>> = BTreeMap::new();
    let mut stats = GroupingStats::default();

    for file in files {
        stats.total_files += 1;
        stats.total_size += file.size;

        match by_size.get_mut(&file.size) {
            None => {
                by_size.insert(file.size, vec![file.path]);
            }
            Some(paths) if file.size > 0 => paths.push(file.path),
            Some(_) => {
                stats.empty_files_dropped += 1;
                log::debug!("Ignoring empty file: {}", file.path.display());
            }
        }
    }

    if stats.empty_files_dropped > 0 {
        log::info!(
            "Ignored {} additional empty file(s)",
            stats.empty_files_dropped
        );
    }

    let buckets: Vec<SizeBucket> = by_size
        .into_iter()
        .map(|(size, files)| SizeBucket { size, files })
        .collect();

    stats.unique_sizes = buckets.len();
    for bucket in buckets.iter().filter(|b| b.has_candidates()) {
        stats.candidate_buckets += 1;
        stats.candidate_files += bucket.len();
        log::trace!(
            "Size bucket {} bytes: {} candidates",
            bucket.size,
            bucket.len()
        );
    }

    (buckets, stats)
}

/// Confirmed group of byte-identical files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// File size in bytes (shared by all members)
    pub size: u64,
    /// Member paths, in the order the content phase produced them
    pub files: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(size: u64, files: Vec<PathBuf>) -> Self {
        Self { size, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Space held by the extra copies.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Member paths as display strings.
    ///
    /// Non-UTF-8 bytes become U+FFFD, so distinct names can render alike.
    #[must_use]
    pub fn path_strings(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }
}

/// Final output of a scan: duplicate groups, each with 2+ members.
///
/// Groups are ordered by ascending size, then in the order the content
/// phase discovered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Confirmed duplicate groups
    pub groups: Vec<DuplicateGroup>,
}

impl ScanResult {
    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of extra copies across all groups.
    #[must_use]
    pub fn duplicate_files(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::duplicate_count).sum()
    }

    /// Total space held by extra copies.
    #[must_use]
    pub fn reclaimable_space(&self) -> u64 {
        self.groups.iter().map(DuplicateGroup::wasted_space).sum()
    }

    /// The result as plain lists of path strings.
    #[must_use]
    pub fn to_path_lists(&self) -> Vec<Vec<String>> {
        self.groups.iter().map(DuplicateGroup::path_strings).collect()
    }
}
