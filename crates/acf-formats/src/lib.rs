//! ACF archive and LZ10 codec for Nintendo DS game data
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Format terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::similar_names)] // Domain-specific naming patterns
#![allow(clippy::missing_const_for_fn)] // Accessors stay plain functions
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::use_self)] // Type clarity
//! This crate provides symmetric (parser and builder) implementations for the
//! ACF container used by Pokémon Ranger: Guardian Signs, together with the
//! LZ10 (Nintendo LZ77 type 0x10) codec its entries are compressed with.
//!
//! # Supported Formats
//!
//! - **LZ10**: 4-byte header plus flag-driven literal/back-reference stream
//! - **ACF**: 32-byte header, 12-byte FAT entries, 4-byte aligned payloads
//! - **Manifest**: sparse entry list and its line-oriented listing
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Buffer In, Buffer Out**: No filesystem access, sources are loaded
//!   through [`acf::SourceLoader`]
//! - **Per-Entry Recovery**: A damaged entry never aborts the archive

#![warn(missing_docs)]

/// ACF container format
///
/// Header and FAT parsing, per-entry extraction with LZ10 fallback, and the
/// two-pass archive builder.
///
/// See the [`acf`] module for usage examples.
pub mod acf;
/// LZ10 compression codec
pub mod lz10;
/// Entry manifest model and listing format
pub mod manifest;

/// Common format trait
pub trait AcfFormat: Sized {
    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>>;

    /// Verify round-trip correctness
    fn verify_round_trip(data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
        let parsed = Self::parse(data)?;
        let rebuilt = parsed.build()?;
        if data != rebuilt.as_slice() {
            return Err("Round-trip verification failed".into());
        }
        Ok(())
    }
}
