//! Manifest listing error types

use thiserror::Error;

/// Error raised by the strict listing line parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// Identifier does not start with a decimal index
    #[error("line {line}: identifier {id:?} has no leading index")]
    InvalidIndex {
        /// 1-based line number
        line: usize,
        /// Offending identifier
        id: String,
    },

    /// Line has an identifier but no flag
    #[error("line {line}: missing flag")]
    MissingFlag {
        /// 1-based line number
        line: usize,
    },

    /// Flag is not one of -1, 0, 1
    #[error("line {line}: invalid flag {flag:?}, expected -1, 0 or 1")]
    InvalidFlag {
        /// 1-based line number
        line: usize,
        /// Offending flag token
        flag: String,
    },
}

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;
