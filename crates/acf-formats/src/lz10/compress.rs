//! LZ10 compression
//!
//! Greedy LZSS encoder. Output is byte-exact: candidates are scanned from
//! the largest permitted displacement down to 2, and only a strictly longer
//! match replaces the current best. Displacement 1 is never emitted.

use super::error::{Lz10Error, Lz10Result};
use super::{
    HEADER_SIZE, LZ10_TAG, MAX_DECOMPRESSED_SIZE, MAX_MATCH, MIN_DISPLACEMENT, MIN_MATCH,
    WINDOW_SIZE,
};

/// Upper bound of the encoded size for `len` input bytes
///
/// Header, every byte as a literal, and one flag byte per 8 symbols.
pub const fn max_compressed_size(len: usize) -> usize {
    HEADER_SIZE + len + len.div_ceil(8)
}

/// Compress a buffer into a complete LZ10 stream
pub fn compress(src: &[u8]) -> Lz10Result<Vec<u8>> {
    if src.len() > MAX_DECOMPRESSED_SIZE {
        return Err(Lz10Error::InputTooLarge(src.len()));
    }

    let mut out = Vec::with_capacity(max_compressed_size(src.len()));
    out.push(LZ10_TAG);
    out.extend_from_slice(&(src.len() as u32).to_le_bytes()[..3]);

    let mut flag_pos = 0usize;
    let mut mask = 0u8;
    let mut pos = 0usize;

    while pos < src.len() {
        if mask == 0 {
            flag_pos = out.len();
            out.push(0);
            mask = 0x80;
        }

        let (length, displacement) = find_longest_match(src, pos);

        if length >= MIN_MATCH {
            out[flag_pos] |= mask;

            let length_field = length - MIN_MATCH;
            let position_field = displacement - 1;
            out.push(((length_field << 4) | (position_field >> 8)) as u8);
            out.push((position_field & 0xFF) as u8);

            pos += length;
        } else {
            out.push(src[pos]);
            pos += 1;
        }

        mask >>= 1;
    }

    Ok(out)
}

/// Longest match for the bytes at `pos`, as `(length, displacement)`
///
/// Returns a length below [`MIN_MATCH`] when nothing usable was found.
fn find_longest_match(src: &[u8], pos: usize) -> (usize, usize) {
    let max_displacement = pos.min(WINDOW_SIZE);
    let max_length = (src.len() - pos).min(MAX_MATCH);

    let mut best_length = MIN_MATCH - 1;
    let mut best_displacement = 0;

    for displacement in (MIN_DISPLACEMENT..=max_displacement).rev() {
        let candidate = pos - displacement;
        if src[candidate] != src[pos] {
            continue;
        }

        let mut length = 1;
        while length < max_length && src[candidate + length] == src[pos + length] {
            length += 1;
        }

        if length > best_length {
            best_length = length;
            best_displacement = displacement;
            if length == max_length {
                break;
            }
        }
    }

    (best_length, best_displacement)
}
