//! ACF archive builder
//!
//! Builds a complete archive from an [`EntryManifest`]. Entry payloads are
//! loaded through a [`SourceLoader`], so the builder itself never touches the
//! filesystem.
//!
//! The table is written twice: a placeholder header and an all-unused FAT go
//! out first, payloads follow, and once every offset and size is known the
//! header and FAT are rewritten at the start of the buffer.

use std::collections::HashMap;
use std::io::{Seek, SeekFrom, Write};

use binrw::BinWrite;
use binrw::io::Cursor;
use tracing::{debug, info, warn};

use super::entry::FatEntry;
use super::error::{AcfError, AcfResult};
use super::header::AcfHeader;
use super::utils::{DATA_ALIGNMENT, pad_size, pad_to_alignment};
use crate::lz10;
use crate::manifest::{EntryKind, EntryManifest};

/// Supplies the raw bytes of a manifest source
pub trait SourceLoader {
    /// Load the complete contents of `source`
    fn load(&self, source: &str) -> std::io::Result<Vec<u8>>;
}

impl SourceLoader for HashMap<String, Vec<u8>> {
    fn load(&self, source: &str) -> std::io::Result<Vec<u8>> {
        self.get(source).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no source named {source}"),
            )
        })
    }
}

/// Builder for ACF archives
#[derive(Debug)]
pub struct AcfBuilder<'a, L: SourceLoader> {
    loader: &'a L,
}

impl<'a, L: SourceLoader> AcfBuilder<'a, L> {
    /// Create a builder reading entry sources from `loader`
    pub fn new(loader: &'a L) -> Self {
        Self { loader }
    }

    /// Build the archive bytes for `manifest`
    ///
    /// Unused slots and sources that fail to load become unused FAT entries;
    /// only an empty manifest, an archive exceeding the 32-bit fields or a
    /// table that cannot be allocated is fatal. Index 0 is always stored raw.
    pub fn build(&self, manifest: &EntryManifest) -> AcfResult<Vec<u8>> {
        if manifest.is_empty() {
            return Err(AcfError::NoEntries);
        }

        let count = manifest.len();
        let num_files =
            u32::try_from(count).map_err(|_| AcfError::ArchiveTooLarge(count as u64))?;

        let mut header = AcfHeader::new(num_files);
        let data_start = header.expected_data_start();
        header.data_start = to_u32(data_start)?;

        // Placeholder table
        let mut table: Vec<u8> = Vec::new();
        reserve(&mut table, data_start)?;
        let mut fat = Vec::new();
        reserve(&mut fat, count as u64)?;
        fat.resize(count, FatEntry::UNUSED);

        let mut cursor = Cursor::new(table);
        header.write(&mut cursor)?;
        for entry in &fat {
            entry.write(&mut cursor)?;
        }

        let mut offset: u64 = 0;
        let mut packed = 0usize;
        let mut skipped = 0usize;

        for (index, entry) in manifest.entries() {
            if entry.kind == EntryKind::Unused {
                continue;
            }
            let Some(source) = entry.source.as_deref() else {
                continue;
            };

            let raw = match self.loader.load(source) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!("Skipping entry {index:04} ({source}): {err}");
                    skipped += 1;
                    continue;
                }
            };

            // First entry is always stored raw
            let compress = index != 0 && entry.kind == EntryKind::Compressed;
            let relative_offset = to_u32(offset)?;

            let (payload, fat_entry) = if compress {
                match encode_compressed(&raw, relative_offset)? {
                    Some(encoded) => encoded,
                    None => {
                        warn!(
                            "Entry {index:04} ({source}) too large for LZ10, storing raw ({} bytes)",
                            raw.len()
                        );
                        encode_raw(raw, relative_offset)?
                    }
                }
            } else {
                encode_raw(raw, relative_offset)?
            };

            debug!(
                "Packed entry {index:04} ({source}) at +0x{offset:X}: output={} input={}",
                fat_entry.output_size, fat_entry.input_size
            );

            cursor.write_all(&payload)?;
            offset += payload.len() as u64;
            fat[index as usize] = fat_entry;
            packed += 1;
        }

        // Backpatch header and FAT
        cursor.seek(SeekFrom::Start(0))?;
        header.write(&mut cursor)?;
        cursor.seek(SeekFrom::Start(header.fat_offset()))?;
        for entry in &fat {
            entry.write(&mut cursor)?;
        }

        let out = cursor.into_inner();

        info!(
            "Built ACF with {} entries ({} packed, {} skipped): header_size=0x{:X} data_start=0x{:X}",
            count, packed, skipped, header.header_size, header.data_start
        );

        Ok(out)
    }
}

/// Build an archive from `manifest`, loading sources from `loader`
pub fn build_archive<L: SourceLoader>(manifest: &EntryManifest, loader: &L) -> AcfResult<Vec<u8>> {
    AcfBuilder::new(loader).build(manifest)
}

fn encode_raw(mut raw: Vec<u8>, relative_offset: u32) -> AcfResult<(Vec<u8>, FatEntry)> {
    pad_to_alignment(&mut raw, DATA_ALIGNMENT);
    let padded = to_u32(raw.len() as u64)?;
    Ok((raw, FatEntry::raw(relative_offset, padded)))
}

/// `None` when the codec cannot represent the input
fn encode_compressed(raw: &[u8], relative_offset: u32) -> AcfResult<Option<(Vec<u8>, FatEntry)>> {
    let mut encoded = match lz10::compress(raw) {
        Ok(encoded) => encoded,
        Err(lz10::Lz10Error::InputTooLarge(_)) => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    pad_to_alignment(&mut encoded, DATA_ALIGNMENT);

    let padded_output = to_u32(pad_size(raw.len(), DATA_ALIGNMENT) as u64)?;
    let padded_input = to_u32(encoded.len() as u64)?;

    Ok(Some((
        encoded,
        FatEntry::compressed(relative_offset, padded_output, padded_input),
    )))
}

/// Reserve room for `len` more elements, without aborting on failure
fn reserve<T>(buf: &mut Vec<T>, len: u64) -> AcfResult<()> {
    let bytes = len.saturating_mul(size_of::<T>() as u64);
    let additional = usize::try_from(len).map_err(|_| AcfError::AllocationFailed(bytes))?;
    buf.try_reserve_exact(additional)
        .map_err(|_| AcfError::AllocationFailed(bytes))
}

fn to_u32(value: u64) -> AcfResult<u32> {
    u32::try_from(value).map_err(|_| AcfError::ArchiveTooLarge(value))
}
