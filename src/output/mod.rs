//! Output formatters for duplicate scan results.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use dupescan::output::JsonOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (result, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! JsonOutput::new(&result).write_to(&mut std::io::stdout()).unwrap();
//! ```

pub mod json;

pub use json::{DetailedJsonOutput, JsonOutput, JsonOutputError};
