//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based file bucketing (Phase 1)
//! - Content grouping with a pluggable equality strategy (Phase 2)
//! - Orchestration over a bounded worker pool

pub mod finder;
pub mod groups;
pub mod strategy;

pub use finder::{size_buckets, DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{group_by_size, DuplicateGroup, GroupingStats, ScanResult, SizeBucket};
pub use strategy::{
    ChecksumStrategy, DirectCompareStrategy, EqualityStrategy, Strategy, StrategyOptions,
};
