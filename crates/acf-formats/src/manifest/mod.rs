//! Entry manifest model
//!
//! An [`EntryManifest`] is the sparse, index-addressed list of entries an
//! archive is built from. It is usually read from the line-oriented listing
//! that extraction writes next to the unpacked files.
//!
//! # Listing Format
//!
//! ```text
//! # comment
//! 0000.bin 0        raw entry, source file "0000.bin"
//! 0001 -1           unused slot
//! 0003.NCGR 1       compressed entry; index 2 is implicitly unused
//! ```
//!
//! The index is taken from the leading decimal digits of the identifier, so
//! `0003.NCGR` addresses slot 3. A later line for the same index replaces an
//! earlier one.
//!
//! # Example
//!
//! ```rust
//! use acf_formats::manifest::{EntryKind, EntryManifest};
//!
//! let manifest = EntryManifest::parse("0000.bin 0\n0002.bin 1\n");
//! assert_eq!(manifest.len(), 3);
//!
//! let kinds: Vec<_> = manifest.dense_entries().into_iter().map(|(_, e)| e.kind).collect();
//! assert_eq!(kinds, [EntryKind::Raw, EntryKind::Unused, EntryKind::Compressed]);
//! ```

/// Manifest error types
pub mod error;

use std::collections::BTreeMap;

use tracing::warn;

pub use error::{ManifestError, ManifestResult};

/// How an entry is stored in the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Slot without payload
    Unused,
    /// Payload stored as is
    Raw,
    /// Payload stored LZ10 compressed
    Compressed,
}

impl EntryKind {
    /// Listing flag for this kind
    pub fn flag(self) -> i32 {
        match self {
            Self::Unused => -1,
            Self::Raw => 0,
            Self::Compressed => 1,
        }
    }

    /// Kind for a listing flag, `None` outside {-1, 0, 1}
    pub fn from_flag(flag: i32) -> Option<Self> {
        match flag {
            -1 => Some(Self::Unused),
            0 => Some(Self::Raw),
            1 => Some(Self::Compressed),
            _ => None,
        }
    }
}

/// One manifest slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Source name, relative to whatever the loader resolves against
    pub source: Option<String>,

    /// Storage kind
    pub kind: EntryKind,
}

impl ManifestEntry {
    /// Raw entry read from `source`
    pub fn raw(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            kind: EntryKind::Raw,
        }
    }

    /// Compressed entry read from `source`
    pub fn compressed(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            kind: EntryKind::Compressed,
        }
    }

    /// Slot without payload
    pub fn unused() -> Self {
        Self {
            source: None,
            kind: EntryKind::Unused,
        }
    }

    /// Whether the slot carries no payload
    pub fn is_unused(&self) -> bool {
        self.kind == EntryKind::Unused
    }
}

/// Sparse, index-addressed entry list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryManifest {
    entries: BTreeMap<u32, ManifestEntry>,
}

impl EntryManifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Set slot `index`, replacing any previous entry
    pub fn insert(&mut self, index: u32, entry: ManifestEntry) {
        self.entries.insert(index, entry);
    }

    /// Mark slot `index` as unused
    pub fn insert_unused(&mut self, index: u32) {
        self.insert(index, ManifestEntry::unused());
    }

    /// Entry explicitly set at `index`
    pub fn get(&self, index: u32) -> Option<&ManifestEntry> {
        self.entries.get(&index)
    }

    /// Table length: highest index plus one
    pub fn len(&self) -> usize {
        self.entries
            .last_key_value()
            .map_or(0, |(&index, _)| index as usize + 1)
    }

    /// Whether no slot was ever set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries explicitly set, in index order
    pub fn entries(&self) -> impl Iterator<Item = (u32, &ManifestEntry)> {
        self.entries.iter().map(|(&index, entry)| (index, entry))
    }

    /// Gap-free entry sequence from 0 to `len() - 1`
    ///
    /// Indices never set are synthesized as unused.
    pub fn dense_entries(&self) -> Vec<(u32, ManifestEntry)> {
        self.dense_iter().collect()
    }

    fn dense_iter(&self) -> impl Iterator<Item = (u32, ManifestEntry)> + '_ {
        let mut next = 0u32;
        self.entries.iter().flat_map(move |(&index, entry)| {
            let gaps = (next..index).map(|gap| (gap, ManifestEntry::unused()));
            next = index.saturating_add(1);
            gaps.chain(std::iter::once((index, entry.clone())))
        })
    }

    /// Parse a listing, skipping malformed lines with a warning
    pub fn parse(text: &str) -> Self {
        let mut manifest = Self::new();
        for (number, line) in text.lines().enumerate() {
            match Self::parse_line(number + 1, line) {
                Ok(Some((index, entry))) => manifest.insert(index, entry),
                Ok(None) => {}
                Err(err) => warn!("Skipping listing {err}"),
            }
        }
        manifest
    }

    /// Parse one listing line
    ///
    /// Blank lines, comments and lines shorter than 3 characters yield
    /// `Ok(None)`.
    pub fn parse_line(line_number: usize, line: &str) -> ManifestResult<Option<(u32, ManifestEntry)>> {
        let line = line.trim();
        if line.len() < 3 || line.starts_with('#') {
            return Ok(None);
        }

        let mut tokens = line.split_whitespace();
        let Some(id) = tokens.next() else {
            return Ok(None);
        };

        let digits = id.len() - id.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let index = id[..digits]
            .parse::<u32>()
            .map_err(|_| ManifestError::InvalidIndex {
                line: line_number,
                id: id.to_string(),
            })?;

        let flag = tokens
            .next()
            .ok_or(ManifestError::MissingFlag { line: line_number })?;
        let kind = flag
            .parse::<i32>()
            .ok()
            .and_then(EntryKind::from_flag)
            .ok_or_else(|| ManifestError::InvalidFlag {
                line: line_number,
                flag: flag.to_string(),
            })?;

        let entry = match kind {
            EntryKind::Unused => ManifestEntry::unused(),
            kind => ManifestEntry {
                source: Some(id.to_string()),
                kind,
            },
        };
        Ok(Some((index, entry)))
    }

    /// Render the listing, one line per dense index
    pub fn to_listing(&self) -> String {
        self.dense_iter()
            .map(|(index, entry)| match (entry.source, entry.kind) {
                (_, EntryKind::Unused) => format!("{index:04} -1\n"),
                (Some(source), kind) => format!("{source} {}\n", kind.flag()),
                (None, kind) => format!("{index:04} {}\n", kind.flag()),
            })
            .collect()
    }
}
