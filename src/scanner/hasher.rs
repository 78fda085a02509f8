//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing content digests
//! of whole files. Files are streamed through the digest in fixed-size
//! chunks so memory use does not depend on file size.
//!
//! BLAKE3 is used for its speed; the checksum strategy only needs digest
//! collisions to be rare, not cryptographically hard.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let hash = hasher.full_hash(Path::new("file.bin")).unwrap();
//! println!("{}", hash_to_hex(&hash));
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::ReadError;

/// A BLAKE3 digest (32 bytes).
pub type Hash = [u8; 32];

/// Default read size for checksum computation (4 KiB).
pub const HASH_CHUNK_SIZE: usize = 4096;

/// Streaming file hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher that reads [`HASH_CHUNK_SIZE`] bytes at a time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: HASH_CHUNK_SIZE,
        }
    }

    /// Use a custom read size. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Read size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Hash the entire content of the file at `path`.
    ///
    /// The file is opened, streamed to end-of-file and closed before this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] if the file cannot be opened or read.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, ReadError> {
        let mut file = File::open(path).map_err(|e| ReadError::new(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let count = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(count) => count,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadError::new(path, e)),
            };
            hasher.update(&buffer[..count]);
        }

        log::trace!("Hashed {}", path.display());
        Ok(*hasher.finalize().as_bytes())
    }
}

/// Format a hash as lowercase hexadecimal (64 characters).
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
