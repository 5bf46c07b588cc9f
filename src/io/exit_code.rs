//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - operation completed (no results is acceptable)
//! - `1`: General error - unspecified failure
//! - `2`: Blocking error - critical failure that should halt automation
//! - `3-125`: Specific recoverable errors
//! - `126-255`: Reserved by shell

use crate::error::{IndexError, SessionError};

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// Critical error that should halt automation (code 2), e.g. unresolved
    /// links under `links.fatal_warnings` or a duplicate symbol
    BlockingError = 2,

    /// Command ran but found nothing, or found issues (code 3)
    NotFound = 3,

    /// Malformed symbol manifest (code 4)
    ManifestError = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,

    /// Index corruption detected (code 7)
    IndexCorrupted = 7,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

impl ExitCode {
    /// `Success` when the command found something, `NotFound` otherwise.
    pub fn from_found(found: bool) -> Self {
        if found {
            ExitCode::Success
        } else {
            ExitCode::NotFound
        }
    }

    /// Convert an `IndexError` to the appropriate exit code.
    pub fn from_error(error: &IndexError) -> Self {
        match error {
            IndexError::IndexCorrupted { .. } => ExitCode::IndexCorrupted,
            IndexError::Manifest { .. } | IndexError::Serialization { .. } => {
                ExitCode::ManifestError
            }
            IndexError::FileRead { .. } | IndexError::FileWrite { .. } => ExitCode::IoError,
            IndexError::ConfigError { .. } => ExitCode::ConfigError,
            // Corrupt introspection data: nothing downstream can be trusted
            IndexError::Table(_) => ExitCode::BlockingError,
            IndexError::General(_) => ExitCode::GeneralError,
        }
    }

    pub fn from_session_error(error: &SessionError) -> Self {
        match error {
            SessionError::NotReady => ExitCode::GeneralError,
            SessionError::LoadFailed { .. } => ExitCode::IndexCorrupted,
        }
    }

    /// Check if this exit code indicates a blocking error.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, ExitCode::BlockingError)
    }

    /// Check if this exit code indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }

    /// Get a human-readable description of the exit code.
    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::BlockingError => "Blocking error - automation should halt",
            ExitCode::NotFound => "Not found",
            ExitCode::ManifestError => "Manifest error",
            ExitCode::IoError => "I/O error",
            ExitCode::ConfigError => "Configuration error",
            ExitCode::IndexCorrupted => "Index corrupted",
        }
    }
}
