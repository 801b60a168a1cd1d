//! ACF table parser and entry extraction

use binrw::BinRead;
use binrw::io::Cursor;

use super::entry::{FAT_ENTRY_SIZE, FatEntry};
use super::error::{AcfError, AcfResult};
use super::header::AcfHeader;
use crate::lz10::{self, Lz10Error};

/// Decoded payload of one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// Decoded bytes (decompressed, or copied raw)
    pub data: Vec<u8>,

    /// True only when the payload was LZ10-decoded successfully
    pub compressed: bool,

    /// Codec failure that forced a raw copy of a compressed payload
    pub decode_error: Option<Lz10Error>,
}

/// Parse the header and the complete FAT
///
/// The FAT is read at the stored `header_size`, not at the size of the
/// header structure.
pub fn parse_table(data: &[u8]) -> AcfResult<(AcfHeader, Vec<FatEntry>)> {
    let header = AcfHeader::parse(data)?;

    let fat_offset = header.fat_offset();
    let available = (data.len() as u64).saturating_sub(fat_offset);
    let needed = header.fat_size();
    if fat_offset > data.len() as u64 || needed > available {
        return Err(AcfError::FatOutOfBounds {
            num_files: header.num_files,
            fat_offset: header.header_size,
            needed,
            available,
        });
    }

    let start = fat_offset as usize;
    let end = start + needed as usize;
    let mut cursor = Cursor::new(&data[start..end]);

    let mut entries = Vec::with_capacity(header.num_files as usize);
    for _ in 0..header.num_files {
        entries.push(FatEntry::read(&mut cursor)?);
    }

    debug_assert_eq!(entries.len() * FAT_ENTRY_SIZE, end - start);

    Ok((header, entries))
}

/// Decode the payload of one FAT entry
///
/// - unused slot: `Ok(None)`, whatever its sizes say;
/// - `input_size > 0` and payload starting with the LZ10 tag: the first
///   `input_size` bytes are decompressed; if that fails they are returned
///   raw with `decode_error` set;
/// - otherwise `output_size` bytes are copied raw.
///
/// Offset errors only concern this entry; callers are expected to move on
/// to the next one.
pub fn extract_entry(
    data: &[u8],
    header: &AcfHeader,
    entry: &FatEntry,
) -> AcfResult<Option<ExtractedEntry>> {
    if entry.is_unused() {
        return Ok(None);
    }

    let offset = u64::from(header.data_start) + u64::from(entry.relative_offset);
    if offset >= data.len() as u64 {
        return Err(AcfError::EntryOutOfRange {
            offset,
            len: data.len(),
        });
    }
    let payload = &data[offset as usize..];

    if entry.input_size > 0 && lz10::is_lz10(payload) {
        let stored = region(payload, offset, entry.input_size)?;
        let extracted = match lz10::decompress(stored) {
            Ok(decoded) => ExtractedEntry {
                data: decoded,
                compressed: true,
                decode_error: None,
            },
            Err(err) => ExtractedEntry {
                data: stored.to_vec(),
                compressed: false,
                decode_error: Some(err),
            },
        };
        return Ok(Some(extracted));
    }

    let raw = region(payload, offset, entry.output_size)?;
    Ok(Some(ExtractedEntry {
        data: raw.to_vec(),
        compressed: false,
        decode_error: None,
    }))
}

fn region(payload: &[u8], offset: u64, size: u32) -> AcfResult<&[u8]> {
    payload
        .get(..size as usize)
        .ok_or(AcfError::EntryTruncated {
            offset,
            size,
            available: payload.len(),
        })
}
