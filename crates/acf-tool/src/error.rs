//! Error types for the ACF tool.
//!
//! Per-entry problems never surface here; they are logged and counted.
//! Every variant aborts the current archive.

use std::path::PathBuf;

use acf_formats::acf::AcfError;
use thiserror::Error;

/// Errors raised while extracting or building archives.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Command line path does not exist or has the wrong type
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// Offending path
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// Build directory has no listing file
    #[error("Listing file not found in {0}")]
    ManifestNotFound(PathBuf),

    /// Failed to read an input file
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output file or directory
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        /// File or directory being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Archive could not be parsed or built
    #[error("{path}: {source}")]
    Archive {
        /// Archive path
        path: PathBuf,
        /// Container error
        #[source]
        source: AcfError,
    },

    /// Directory traversal failed
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
