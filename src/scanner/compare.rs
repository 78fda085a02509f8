//! Chunked byte-for-byte comparison of two files.
//!
//! [`Comparer::files_equal`] reads both files in lockstep, one chunk at a
//! time, and stops at the first differing chunk. Two files are equal when
//! every chunk pair matches and both streams reach end-of-file at the same
//! position.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::ReadError;

/// Default read size for direct comparison (2 KiB).
pub const COMPARE_CHUNK_SIZE: usize = 2048;

/// Direct content comparer.
#[derive(Debug, Clone)]
pub struct Comparer {
    chunk_size: usize,
}

impl Default for Comparer {
    fn default() -> Self {
        Self::new()
    }
}

impl Comparer {
    /// Create a comparer that reads [`COMPARE_CHUNK_SIZE`] bytes at a time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: COMPARE_CHUNK_SIZE,
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

    /// Compare the full content of two files.
    ///
    /// Both handles are closed before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] naming the file that could not be opened or read.
    pub fn files_equal(&self, left: &Path, right: &Path) -> Result<bool, ReadError> {
        let mut left_file = File::open(left).map_err(|e| ReadError::new(left, e))?;
        let mut right_file = File::open(right).map_err(|e| ReadError::new(right, e))?;

        let mut left_buf = vec![0u8; self.chunk_size];
        let mut right_buf = vec![0u8; self.chunk_size];

        loop {
            let left_len =
                fill_chunk(&mut left_file, &mut left_buf).map_err(|e| ReadError::new(left, e))?;
            let right_len = fill_chunk(&mut right_file, &mut right_buf)
                .map_err(|e| ReadError::new(right, e))?;

            if left_len != right_len || left_buf[..left_len] != right_buf[..right_len] {
                return Ok(false);
            }
            if left_len == 0 {
                return Ok(true);
            }
        }
    }
}

/// Read until `buf` is full or the reader is exhausted.
///
/// A plain `read` may return fewer bytes than requested before end-of-file;
/// filling the buffer keeps both sides of a comparison aligned.
fn fill_chunk(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
