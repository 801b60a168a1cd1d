//! ACF header parsing and building

use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};

use super::entry::FAT_ENTRY_SIZE;
use super::error::{AcfError, AcfResult};

/// ACF magic as stored on disk ("acf" plus a reserved zero byte)
pub const ACF_MAGIC: [u8; 4] = *b"acf\0";

/// Size of the header as written by this crate
pub const HEADER_SIZE: usize = 32;

/// Observed value of the first opaque header word
pub const UNKNOWN1: u32 = 1;

/// Observed value of the second opaque header word
pub const UNKNOWN2: u32 = 0x32;

/// ACF archive header
///
/// Layout (little-endian):
/// ```text
/// offset 0x00: [u8; 3] magic "acf" + 1 reserved byte
/// offset 0x04: u32 header_size   (FAT starts here)
/// offset 0x08: u32 data_start    (payload region)
/// offset 0x0C: u32 num_files     (FAT entries, unused slots included)
/// offset 0x10: u32 unknown1      (always 1)
/// offset 0x14: u32 unknown2      (always 0x32)
/// offset 0x18: [u32; 2] padding  (zero)
/// ```
///
/// `unknown1` and `unknown2` are reproduced as read; their meaning is not
/// known.
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct AcfHeader {
    /// Magic bytes; only the first 3 are significant
    pub magic: [u8; 4],

    /// Header block length; the FAT begins at this offset
    pub header_size: u32,

    /// Absolute offset of the payload region
    pub data_start: u32,

    /// Number of FAT entries
    pub num_files: u32,

    /// Opaque constant (1)
    pub unknown1: u32,

    /// Opaque constant (0x32)
    pub unknown2: u32,

    /// Reserved, always zero
    pub padding: [u32; 2],
}

impl AcfHeader {
    /// Create a header for `num_files` entries with the standard layout
    pub fn new(num_files: u32) -> Self {
        let data_start = HEADER_SIZE as u64 + u64::from(num_files) * FAT_ENTRY_SIZE as u64;
        Self {
            magic: ACF_MAGIC,
            header_size: HEADER_SIZE as u32,
            data_start: data_start as u32,
            num_files,
            unknown1: UNKNOWN1,
            unknown2: UNKNOWN2,
            padding: [0; 2],
        }
    }

    /// Parse the header from the start of an archive buffer
    pub fn parse(data: &[u8]) -> AcfResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(AcfError::TooSmall {
                actual: data.len(),
                minimum: HEADER_SIZE,
            });
        }

        let header = Self::read(&mut Cursor::new(&data[..HEADER_SIZE]))?;
        if !header.has_valid_magic() {
            return Err(AcfError::InvalidMagic([
                header.magic[0],
                header.magic[1],
                header.magic[2],
            ]));
        }

        Ok(header)
    }

    /// Serialize the 32-byte header
    pub fn build(&self) -> AcfResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(HEADER_SIZE));
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Check the 3 significant magic bytes
    pub fn has_valid_magic(&self) -> bool {
        self.magic[..3] == ACF_MAGIC[..3]
    }

    /// Offset of the FAT (the stored header size)
    pub fn fat_offset(&self) -> u64 {
        u64::from(self.header_size)
    }

    /// Size of the FAT in bytes
    pub fn fat_size(&self) -> u64 {
        u64::from(self.num_files) * FAT_ENTRY_SIZE as u64
    }

    /// `data_start` implied by the stored header size and entry count
    pub fn expected_data_start(&self) -> u64 {
        self.fat_offset() + self.fat_size()
    }
}
