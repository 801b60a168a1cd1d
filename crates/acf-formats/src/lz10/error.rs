//! LZ10 error types

use thiserror::Error;

/// LZ10 codec error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Lz10Error {
    /// Stream shorter than the 4-byte header
    #[error("data too short: got {actual} bytes, minimum is {minimum}")]
    TooShort {
        /// Actual data length
        actual: usize,
        /// Minimum required length
        minimum: usize,
    },

    /// Method tag is not 0x10
    #[error("invalid LZ10 tag: expected 0x10, got 0x{0:02X}")]
    InvalidTag(u8),

    /// Header declares an empty output
    #[error("declared decompressed size is zero")]
    ZeroLength,

    /// Output buffer could not be reserved
    #[error("failed to allocate {0} bytes for decompressed output")]
    AllocationFailed(usize),

    /// Input ended before a literal or match token could be read
    #[error("truncated stream at input offset {offset} ({produced} bytes produced)")]
    Truncated {
        /// Input offset where more data was expected
        offset: usize,
        /// Bytes produced before the stream ran out
        produced: usize,
    },

    /// Back-reference points before the start of the output
    #[error("back-reference displacement {displacement} exceeds {produced} bytes produced")]
    InvalidBackReference {
        /// Decoded displacement (1..=4096)
        displacement: usize,
        /// Bytes produced when the match was read
        produced: usize,
    },

    /// Stream ended without producing exactly the declared length
    #[error("length mismatch: header declares {expected} bytes, stream produced {actual}")]
    LengthMismatch {
        /// Declared decompressed length
        expected: usize,
        /// Bytes actually produced
        actual: usize,
    },

    /// Input too large for the 24-bit length field
    #[error("input of {0} bytes does not fit the 24-bit LZ10 length field")]
    InputTooLarge(usize),
}

/// Result type for LZ10 operations
pub type Lz10Result<T> = Result<T, Lz10Error>;
