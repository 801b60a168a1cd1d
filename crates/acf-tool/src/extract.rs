//! Archive extraction.
//!
//! An archive `dir/a0001.acf` is unpacked into `dir/a0001/`: one file per
//! used entry named `<index:04>.<ext>`, plus a listing file recording every
//! slot so the directory can be packed again.

use std::fs;
use std::path::{Path, PathBuf};

use acf_formats::acf::AcfArchive;
use acf_formats::manifest::{EntryManifest, ManifestEntry};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::LISTING_FILE;
use crate::error::{ToolError, ToolResult};
use crate::extension::detect_extension;

/// Progress is logged every this many entries
const PROGRESS_INTERVAL: usize = 32;

/// Outcome of extracting one archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Directory the entries were written to
    pub output_dir: PathBuf,
    /// FAT entries in the archive
    pub total: usize,
    /// Entries written to disk
    pub extracted: usize,
    /// Unused slots
    pub unused: usize,
    /// Entries whose LZ10 payload was kept raw after a decode failure
    pub fallback: usize,
    /// Entries skipped for bad offsets or failed writes
    pub failed: usize,
}

/// Outcome of extracting a file or a directory of archives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Archives extracted successfully
    pub archives: Vec<ExtractSummary>,
    /// Archives that could not be extracted
    pub failed: usize,
}

/// Output directory for `archive`: its path without the extension
pub fn output_dir_for(archive: &Path) -> PathBuf {
    archive.with_extension("")
}

/// Extract `path`, either one archive or every `.acf` file in a directory
///
/// In a directory, failures are logged and counted; a single archive that
/// fails is an error.
pub fn extract_path(path: &Path) -> ToolResult<BatchSummary> {
    if !path.is_dir() {
        let summary = extract_archive(path)?;
        return Ok(BatchSummary {
            archives: vec![summary],
            failed: 0,
        });
    }

    info!("Extracting all ACFs in directory: {}", path.display());

    let mut batch = BatchSummary::default();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_archive_path(entry.path()) {
            continue;
        }

        match extract_archive(entry.path()) {
            Ok(summary) => batch.archives.push(summary),
            Err(err) => {
                warn!("{err}");
                batch.failed += 1;
            }
        }
    }

    if batch.archives.is_empty() && batch.failed == 0 {
        info!("No ACF archives found in {}", path.display());
    }

    Ok(batch)
}

/// Extract every entry of the archive at `path`
pub fn extract_archive(path: &Path) -> ToolResult<ExtractSummary> {
    let data = fs::read(path).map_err(|source| ToolError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let archive = AcfArchive::parse(&data).map_err(|source| ToolError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let output_dir = output_dir_for(path);
    fs::create_dir_all(&output_dir).map_err(|source| ToolError::WriteFailed {
        path: output_dir.clone(),
        source,
    })?;

    info!(
        "Extracting {} ({} entries) to {}",
        path.display(),
        archive.entries.len(),
        output_dir.display()
    );

    let mut summary = ExtractSummary {
        output_dir,
        total: archive.entries.len(),
        ..ExtractSummary::default()
    };
    let mut listing = EntryManifest::new();

    for index in 0..summary.total {
        let slot = index as u32;
        let extracted = match archive.extract(&data, index) {
            Ok(Some(extracted)) => extracted,
            Ok(None) => {
                listing.insert_unused(slot);
                summary.unused += 1;
                continue;
            }
            Err(err) if err.is_entry_error() => {
                warn!("Entry {index:04}: {err}");
                listing.insert_unused(slot);
                summary.failed += 1;
                continue;
            }
            Err(source) => {
                return Err(ToolError::Archive {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if extracted.decode_error.is_some() {
            summary.fallback += 1;
        }

        let name = format!("{index:04}.{}", detect_extension(&extracted.data));
        let file_path = summary.output_dir.join(&name);
        match fs::write(&file_path, &extracted.data) {
            Ok(()) => {
                debug!(
                    "Wrote {} ({} bytes, compressed={})",
                    name,
                    extracted.data.len(),
                    extracted.compressed
                );
                summary.extracted += 1;
            }
            Err(err) => {
                warn!("Failed writing {}: {err}", file_path.display());
                summary.failed += 1;
            }
        }

        let entry = if extracted.compressed {
            ManifestEntry::compressed(name)
        } else {
            ManifestEntry::raw(name)
        };
        listing.insert(slot, entry);

        if (index + 1) % PROGRESS_INTERVAL == 0 {
            info!("Extracted {}/{}", index + 1, summary.total);
        }
    }

    let listing_path = summary.output_dir.join(LISTING_FILE);
    fs::write(&listing_path, listing.to_listing()).map_err(|source| ToolError::WriteFailed {
        path: listing_path,
        source,
    })?;

    info!(
        "Extracted {}/{} entries ({} unused, {} raw fallbacks, {} failed)",
        summary.extracted, summary.total, summary.unused, summary.fallback, summary.failed
    );

    Ok(summary)
}

fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("acf"))
}
