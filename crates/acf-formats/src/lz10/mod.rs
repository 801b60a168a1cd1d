//! LZ10 compression codec
//!
//! LZ10 is the LZSS variant used by Nintendo DS titles, identified by the
//! method tag `0x10`. It operates on fully materialized buffers; there is
//! no streaming interface.
//!
//! # Stream Layout
//!
//! ```text
//! LZ10 stream:
//! ├── tag (u8, always 0x10)
//! ├── decompressed_length (u24 LE)
//! └── token groups, repeated:
//!     ├── flag byte (MSB first, one bit per token)
//!     └── 8 tokens
//!         ├── bit 0: literal byte
//!         └── bit 1: back-reference (2 bytes)
//!             ├── byte 0: (length - 3) << 4 | (displacement - 1) >> 8
//!             └── byte 1: (displacement - 1) & 0xFF
//! ```
//!
//! Match lengths range over 3..=18 and displacements over 1..=4096. The
//! encoder only emits displacements of 2 or more.
//!
//! # Usage
//!
//! ```rust
//! use acf_formats::lz10;
//!
//! let encoded = lz10::compress(b"AAAAAAAAAA")?;
//! assert_eq!(encoded[0], lz10::LZ10_TAG);
//!
//! let decoded = lz10::decompress(&encoded)?;
//! assert_eq!(decoded, b"AAAAAAAAAA");
//! # Ok::<(), lz10::Lz10Error>(())
//! ```

mod compress;
mod decompress;
/// LZ10 error types
pub mod error;

pub use compress::{compress, max_compressed_size};
pub use decompress::decompress;
pub use error::{Lz10Error, Lz10Result};

/// Method tag identifying an LZ10 stream
pub const LZ10_TAG: u8 = 0x10;

/// Size of the stream header (tag + 24-bit length)
pub const HEADER_SIZE: usize = 4;

/// Sliding window size
pub const WINDOW_SIZE: usize = 0x1000;

/// Shortest back-reference the encoder emits
pub const MIN_MATCH: usize = 3;

/// Smallest displacement the encoder emits (the decoder accepts 1)
pub const MIN_DISPLACEMENT: usize = 2;

/// Longest back-reference a token can express
pub const MAX_MATCH: usize = 0x12;

/// Largest length representable in the 24-bit header field
pub const MAX_DECOMPRESSED_SIZE: usize = 0xFF_FFFF;

/// Check whether `data` starts with the LZ10 method tag
///
/// Only the tag is inspected; a short or corrupt stream still reports
/// `true` and fails in [`decompress`].
pub fn is_lz10(data: &[u8]) -> bool {
    data.first() == Some(&LZ10_TAG)
}

/// Decompressed length declared in the stream header
///
/// Returns `None` when `data` is shorter than the header. The tag is not
/// checked.
pub fn declared_size(data: &[u8]) -> Option<usize> {
    if data.len() < HEADER_SIZE {
        return None;
    }
    Some(u32::from_le_bytes([data[1], data[2], data[3], 0]) as usize)
}
