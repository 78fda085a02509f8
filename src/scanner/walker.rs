//! Directory walker implementation using jwalk.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting the paths eligible for duplicate detection:
//! regular files that are not symbolic links and that the current process
//! can open for reading.
//!
//! Entries that cannot be inspected (permission denied, vanished mid-walk,
//! unreadable directories) are skipped silently. They are logged at debug
//! level and never reported as errors.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"));
//! for path in walker.files().unwrap() {
//!     println!("{}", path.display());
//! }
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::ScanError;
use crate::progress::ProgressCallback;

/// Directory walker for file discovery.
///
/// Children of every directory are sorted by file name, so the output order
/// is a pure function of the directory contents.
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Optional progress reporting
    progress_callback: Option<std::sync::Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            root: path.to_path_buf(),
            progress_callback: None,
        }
    }

    /// Report each discovered file to `callback`.
    #[must_use]
    pub fn with_progress_callback(
        mut self,
        callback: std::sync::Arc<dyn ProgressCallback>,
    ) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walk the tree and collect every eligible file path.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the root does not exist or is not a
    /// directory. Nothing is walked in that case.
    pub fn files(&self) -> Result<Vec<PathBuf>, ScanError> {
        ScanError::validate_root(&self.root)?;

        log::info!("Walking {}", self.root.display());
        let files: Vec<PathBuf> = self.walk().collect();
        log::info!("Found {} readable files", files.len());

        Ok(files)
    }

    /// Iterate over eligible file paths without validating the root.
    ///
    /// A nonexistent root yields nothing.
    pub fn walk(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .skip_hidden(false)
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        let mut discovered = 0usize;

        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    // jwalk reports the file type without following links
                    let file_type = entry.file_type();
                    if !file_type.is_file() {
                        if file_type.is_symlink() {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        return None;
                    }

                    let path = entry.path();
                    if !is_readable(&path) {
                        log::debug!("Skipping unreadable file: {}", path.display());
                        return None;
                    }

                    discovered += 1;
                    if let Some(ref callback) = self.progress_callback {
                        callback.on_progress(discovered, path.to_string_lossy().as_ref());
                    }

                    Some(path)
                }
                Err(e) => {
                    log::debug!("Skipping inaccessible entry: {}", e);
                    None
                }
            })
    }
}

/// Check that the file can be opened for reading.
///
/// Only called for regular files, so opening cannot block.
fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

/// Enumerate all eligible files under `root`.
///
/// # Errors
///
/// Returns [`ScanError`] if `root` is missing or not a directory.
pub fn enumerate_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    Walker::new(root).files()
}
