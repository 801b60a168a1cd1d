//! ACF container error types

use thiserror::Error;

use crate::lz10::Lz10Error;

/// ACF-specific error type
#[derive(Debug, Error)]
pub enum AcfError {
    /// Buffer smaller than the fixed header
    #[error("data too short: got {actual} bytes, minimum is {minimum}")]
    TooSmall {
        /// Actual data length
        actual: usize,
        /// Minimum required length
        minimum: usize,
    },

    /// Magic tag is not "acf"
    #[error("invalid ACF magic: expected \"acf\", got {0:02X?}")]
    InvalidMagic([u8; 3]),

    /// File allocation table runs past the end of the buffer
    #[error(
        "FAT out of bounds: {num_files} entries at offset {fat_offset} need {needed} bytes, {available} available"
    )]
    FatOutOfBounds {
        /// Declared entry count
        num_files: u32,
        /// Stored header size (start of the FAT)
        fat_offset: u32,
        /// Bytes needed for the table
        needed: u64,
        /// Bytes available after the header
        available: u64,
    },

    /// Entry payload starts at or past the end of the buffer
    #[error("entry offset 0x{offset:X} is outside the archive ({len} bytes)")]
    EntryOutOfRange {
        /// Absolute payload offset
        offset: u64,
        /// Archive length
        len: usize,
    },

    /// Entry payload runs past the end of the buffer
    #[error("entry at 0x{offset:X} declares {size} bytes, only {available} available")]
    EntryTruncated {
        /// Absolute payload offset
        offset: u64,
        /// Declared payload size
        size: u32,
        /// Bytes available from the offset
        available: usize,
    },

    /// Entry index not present in the table
    #[error("entry index {index} out of range (table has {num_files} entries)")]
    EntryIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Table size
        num_files: usize,
    },

    /// Build requested with an empty manifest
    #[error("no entries to pack")]
    NoEntries,

    /// Stored header size is smaller than the fixed header
    #[error("header size {0} is smaller than the 32-byte header")]
    HeaderSizeTooSmall(u32),

    /// Table buffer could not be reserved
    #[error("failed to allocate {0} bytes for the archive table")]
    AllocationFailed(u64),

    /// Archive offsets or sizes exceed the 32-bit fields
    #[error("archive too large: {0} bytes does not fit a 32-bit field")]
    ArchiveTooLarge(u64),

    /// LZ10 codec error
    #[error("LZ10 error: {0}")]
    Lz10(#[from] Lz10Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary parsing error
    #[error("binary parsing error: {0}")]
    BinRw(#[from] binrw::Error),
}

impl AcfError {
    /// Whether the error only affects a single entry
    ///
    /// Extraction and build continue past these; everything else aborts the
    /// whole archive.
    pub fn is_entry_error(&self) -> bool {
        matches!(
            self,
            Self::EntryOutOfRange { .. } | Self::EntryTruncated { .. } | Self::Lz10(_)
        )
    }
}

/// Result type for ACF operations
pub type AcfResult<T> = Result<T, AcfError>;
