//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::FinderError;
use crate::scanner::ScanError;

/// Exit codes for the dupescan binary.
///
/// - 0: Success (scan completed, with or without duplicates)
/// - 1: General error (I/O failure during the scan, bad configuration)
/// - 2: Invalid input (root path missing or not a directory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Invalid input: The root path was not usable; nothing was scanned.
    InvalidInput = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::InvalidInput => "DS002",
        }
    }

    /// Pick the exit code for an error returned by the application.
    ///
    /// Invalid roots map to [`ExitCode::InvalidInput`]; everything else is a
    /// [`ExitCode::GeneralError`].
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let invalid_input = err.chain().any(|cause| {
            cause.is::<ScanError>()
                || cause
                    .downcast_ref::<FinderError>()
                    .is_some_and(|e| matches!(e, FinderError::InvalidInput(_)))
        });

        if invalid_input {
            Self::InvalidInput
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
