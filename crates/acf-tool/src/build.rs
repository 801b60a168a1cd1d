//! Archive building from an extracted directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use acf_formats::acf::{AcfArchive, SourceLoader, build_archive};
use acf_formats::manifest::EntryManifest;
use tracing::info;

use crate::LISTING_FILE;
use crate::error::{ToolError, ToolResult};

/// Loads entry sources from files relative to a directory
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    /// Create a loader resolving sources against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory sources are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceLoader for DirectoryLoader {
    fn load(&self, source: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(source))
    }
}

/// Outcome of building one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Archive written
    pub output: PathBuf,
    /// FAT entries, unused slots included
    pub entries: usize,
    /// Entries carrying a payload
    pub packed: usize,
    /// Archive size in bytes
    pub size: usize,
}

/// Default archive path for `dir`: the directory name plus `.acf`
pub fn default_output_path(dir: &Path) -> PathBuf {
    let mut name = dir.components().as_path().as_os_str().to_os_string();
    name.push(".acf");
    PathBuf::from(name)
}

/// Build an archive from the listing file and sources in `dir`
///
/// Writes to `output`, or [`default_output_path`] when `None`.
pub fn build_directory(dir: &Path, output: Option<&Path>) -> ToolResult<BuildSummary> {
    let listing_path = dir.join(LISTING_FILE);
    let listing = fs::read_to_string(&listing_path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ToolError::ManifestNotFound(dir.to_path_buf())
        } else {
            ToolError::ReadFailed {
                path: listing_path.clone(),
                source,
            }
        }
    })?;

    let manifest = EntryManifest::parse(&listing);
    let output = output.map_or_else(|| default_output_path(dir), Path::to_path_buf);

    info!("Building {} from {}", output.display(), dir.display());

    let loader = DirectoryLoader::new(dir);
    let data = build_archive(&manifest, &loader).map_err(|source| ToolError::Archive {
        path: output.clone(),
        source,
    })?;

    fs::write(&output, &data).map_err(|source| ToolError::WriteFailed {
        path: output.clone(),
        source,
    })?;

    let packed = AcfArchive::parse(&data)
        .map(|archive| archive.used_count())
        .map_err(|source| ToolError::Archive {
            path: output.clone(),
            source,
        })?;

    info!(
        "Wrote {} ({} bytes, {}/{} entries packed)",
        output.display(),
        data.len(),
        packed,
        manifest.len()
    );

    Ok(BuildSummary {
        output,
        entries: manifest.len(),
        packed,
        size: data.len(),
    })
}
