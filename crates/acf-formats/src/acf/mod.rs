//! ACF container format implementation
//!
//! ACF bundles independently sized blobs behind a fixed-stride file
//! allocation table (FAT). Each blob is either stored raw or LZ10
//! compressed, and every payload is aligned to 4 bytes.
//!
//! # Format Structure
//!
//! ```text
//! ACF archive:
//! ├── Header (32 bytes, little-endian)
//! │   ├── magic "acf\0"
//! │   ├── header_size (u32)
//! │   ├── data_start (u32)
//! │   ├── num_files (u32)
//! │   ├── unknown1 (u32, 1)
//! │   ├── unknown2 (u32, 0x32)
//! │   └── padding ([u32; 2])
//! ├── FAT (at header_size, num_files × 12 bytes)
//! │   ├── relative_offset (u32, 0xFFFFFFFF = unused)
//! │   ├── output_size (u32)
//! │   └── input_size (u32, 0 = raw)
//! └── Payload region (at data_start, 4-byte aligned entries)
//! ```
//!
//! # Usage
//!
//! ## Parsing
//!
//! ```rust,no_run
//! use acf_formats::acf::AcfArchive;
//!
//! let data = std::fs::read("a0001.acf")?;
//! let archive = AcfArchive::parse(&data)?;
//!
//! for index in 0..archive.entries.len() {
//!     if let Some(entry) = archive.extract(&data, index)? {
//!         println!("{index:04}: {} bytes", entry.data.len());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Building
//!
//! ```rust
//! use std::collections::HashMap;
//! use acf_formats::acf::{AcfArchive, build_archive};
//! use acf_formats::manifest::{EntryManifest, ManifestEntry};
//!
//! let mut manifest = EntryManifest::new();
//! manifest.insert(0, ManifestEntry::raw("0000.bin"));
//! manifest.insert(2, ManifestEntry::compressed("0002.bin"));
//!
//! let mut sources = HashMap::new();
//! sources.insert("0000.bin".to_string(), vec![1, 2, 3, 4, 5]);
//! sources.insert("0002.bin".to_string(), vec![0; 100]);
//!
//! let data = build_archive(&manifest, &sources)?;
//! let archive = AcfArchive::parse(&data)?;
//! assert_eq!(archive.entries.len(), 3);
//! assert!(archive.entries[1].is_unused());
//! # Ok::<(), acf_formats::acf::AcfError>(())
//! ```

mod builder;
mod entry;
/// ACF error types
pub mod error;
mod header;
/// Table parser and entry extraction
pub mod parser;
mod utils;

use binrw::BinWrite;
use binrw::io::Cursor;
use tracing::warn;

pub use builder::{AcfBuilder, SourceLoader, build_archive};
pub use entry::{FAT_ENTRY_SIZE, FatEntry, UNUSED_OFFSET};
pub use error::{AcfError, AcfResult};
pub use header::{ACF_MAGIC, AcfHeader, HEADER_SIZE, UNKNOWN1, UNKNOWN2};
pub use parser::{ExtractedEntry, extract_entry, parse_table};
pub use utils::{DATA_ALIGNMENT, pad_size};

/// Parsed ACF header and allocation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcfArchive {
    /// Archive header
    pub header: AcfHeader,

    /// FAT entries in index order, unused slots included
    pub entries: Vec<FatEntry>,
}

impl AcfArchive {
    /// Parse the header and FAT of an archive buffer
    pub fn parse(data: &[u8]) -> AcfResult<Self> {
        let (header, entries) = parse_table(data)?;
        Ok(Self { header, entries })
    }

    /// Serialize the header and FAT
    ///
    /// When `header_size` is larger than the 32-byte header the gap is zero
    /// filled so the FAT lands at the stored offset. A `header_size` below 32
    /// would place the FAT inside the header and is rejected.
    pub fn build(&self) -> AcfResult<Vec<u8>> {
        if (self.header.header_size as usize) < HEADER_SIZE {
            return Err(AcfError::HeaderSizeTooSmall(self.header.header_size));
        }

        let mut out = self.header.build()?;
        let fat_offset = self.header.header_size as usize;
        out.resize(fat_offset, 0);

        let mut cursor = Cursor::new(out);
        cursor.set_position(fat_offset as u64);
        for entry in &self.entries {
            entry.write(&mut cursor)?;
        }

        Ok(cursor.into_inner())
    }

    /// Number of entries carrying a payload
    pub fn used_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_unused()).count()
    }

    /// Decode entry `index` from the archive buffer it was parsed from
    ///
    /// A corrupt LZ10 payload is returned raw and logged as a warning.
    pub fn extract(&self, data: &[u8], index: usize) -> AcfResult<Option<ExtractedEntry>> {
        let entry = self
            .entries
            .get(index)
            .ok_or(AcfError::EntryIndexOutOfRange {
                index,
                num_files: self.entries.len(),
            })?;

        let extracted = extract_entry(data, &self.header, entry)?;
        if let Some(err) = extracted.as_ref().and_then(|e| e.decode_error.as_ref()) {
            warn!("Decompression failed for entry {index:04}, keeping raw payload: {err}");
        }
        Ok(extracted)
    }
}

impl crate::AcfFormat for AcfArchive {
    fn parse(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::parse(data)?)
    }

    fn build(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        Ok(Self::build(self)?)
    }
}
