//! Error types for the cross-reference and search system
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages.

use crate::types::Fragment;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to resolve a link reference against the symbol table.
///
/// These never escape the link parser: it downgrades them to diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown namespace '{name}'")]
    UnknownNamespace { name: String },

    #[error("Unable to find {fragment} '{path}'")]
    UnknownSymbol { fragment: Fragment, path: String },

    #[error("Ambiguous {fragment} reference '{path}', candidates: {}", candidates.join(", "))]
    AmbiguousSymbol {
        fragment: Fragment,
        path: String,
        candidates: Vec<String>,
    },

    #[error("Unknown fragment '{keyword}'")]
    UnknownFragment { keyword: String },

    #[error("Invalid {fragment} link '{endpoint}': {reason}")]
    InvalidPath {
        fragment: Fragment,
        endpoint: String,
        reason: String,
    },
}

impl ResolveError {
    /// Stable identifier for JSON output and log filtering.
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::UnknownNamespace { .. } => "UNKNOWN_NAMESPACE",
            Self::UnknownSymbol { .. } => "UNKNOWN_SYMBOL",
            Self::AmbiguousSymbol { .. } => "AMBIGUOUS_SYMBOL",
            Self::UnknownFragment { .. } => "UNKNOWN_FRAGMENT",
            Self::InvalidPath { .. } => "INVALID_PATH",
        }
    }
}

/// Errors raised while building the symbol table.
///
/// A duplicate symbol means the upstream metadata is corrupt; lookups rely on
/// key uniqueness so there is no recovery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Duplicate symbol {key} in namespace '{namespace}'")]
    DuplicateSymbol { namespace: String, key: String },

    #[error("Namespace '{name}' is already registered")]
    DuplicateNamespace { name: String },

    #[error("Unknown namespace '{name}'")]
    UnknownNamespace { name: String },
}

/// Errors at the I/O boundaries: manifests, index files, configuration.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize {what}: {reason}")]
    Serialization { what: String, reason: String },

    #[error("Invalid symbol manifest: {reason}")]
    Manifest { reason: String },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Search index appears to be corrupted: {reason}")]
    IndexCorrupted { reason: String },

    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    #[error("{0}")]
    General(String),
}

impl IndexError {
    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> String {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::FileWrite { .. } => "FILE_WRITE_ERROR",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::Manifest { .. } => "MANIFEST_ERROR",
            Self::Table(TableError::DuplicateSymbol { .. }) => "DUPLICATE_SYMBOL",
            Self::Table(_) => "TABLE_ERROR",
            Self::IndexCorrupted { .. } => "INDEX_CORRUPTED",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::General(_) => "GENERAL_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::Table(TableError::DuplicateSymbol { .. }) => vec![
                "The introspection data declares the same symbol twice",
                "Regenerate the symbol manifest from the GIR files",
            ],
            Self::Table(_) | Self::Manifest { .. } => vec![
                "Check that every dependency namespace is present in the manifest",
                "Regenerate the symbol manifest from the GIR files",
            ],
            Self::IndexCorrupted { .. } => vec![
                "Run 'gir-xref index' to rebuild the search index",
                "Check that producer and consumer agree on the index format version",
            ],
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
            ],
            Self::FileWrite { .. } => vec![
                "Check disk space and permissions in the output directory",
            ],
            Self::ConfigError { .. } => vec![
                "Check .gir-xref/settings.toml for syntax errors",
                "Run 'gir-xref init --force' to regenerate the default configuration",
            ],
            _ => vec![],
        }
    }
}

/// Errors reported by a search session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Search index is still loading")]
    NotReady,

    #[error("Search index failed to load: {reason}")]
    LoadFailed { reason: String },
}

/// Result type alias for resolution
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Result type alias for table construction
pub type TableResult<T> = Result<T, TableError>;

/// Result type alias for I/O boundary operations
pub type IndexResult<T> = Result<T, IndexError>;
