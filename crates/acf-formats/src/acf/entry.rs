//! File allocation table entries

use binrw::{BinRead, BinWrite};

/// Size of one FAT entry in bytes
pub const FAT_ENTRY_SIZE: usize = 12;

/// `relative_offset` sentinel marking a slot without payload
pub const UNUSED_OFFSET: u32 = 0xFFFF_FFFF;

/// A FAT entry
///
/// Binary layout (12 bytes, little-endian):
/// ```text
/// relative_offset: u32   payload offset from data_start (0xFFFFFFFF = unused)
/// output_size:     u32   content size after decompression (padded)
/// input_size:      u32   padded compressed size, 0 for raw entries
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct FatEntry {
    /// Payload offset relative to `data_start`
    pub relative_offset: u32,

    /// Size of the decoded content
    pub output_size: u32,

    /// Stored size of a compressed payload, 0 when raw
    pub input_size: u32,
}

impl FatEntry {
    /// Slot with no payload
    pub const UNUSED: Self = Self {
        relative_offset: UNUSED_OFFSET,
        output_size: 0,
        input_size: 0,
    };

    /// Raw entry of `padded_size` bytes at `relative_offset`
    pub fn raw(relative_offset: u32, padded_size: u32) -> Self {
        Self {
            relative_offset,
            output_size: padded_size,
            input_size: 0,
        }
    }

    /// Compressed entry storing `padded_compressed` bytes
    pub fn compressed(relative_offset: u32, padded_output: u32, padded_compressed: u32) -> Self {
        Self {
            relative_offset,
            output_size: padded_output,
            input_size: padded_compressed,
        }
    }

    /// Whether this slot carries no payload
    pub fn is_unused(&self) -> bool {
        self.relative_offset == UNUSED_OFFSET
    }

    /// Whether the entry declares a compressed payload
    pub fn is_compressed(&self) -> bool {
        !self.is_unused() && self.input_size > 0
    }

    /// Bytes the payload occupies in the data region
    pub fn stored_size(&self) -> u32 {
        if self.is_unused() {
            0
        } else if self.input_size > 0 {
            self.input_size
        } else {
            self.output_size
        }
    }
}

impl Default for FatEntry {
    fn default() -> Self {
        Self::UNUSED
    }
}
