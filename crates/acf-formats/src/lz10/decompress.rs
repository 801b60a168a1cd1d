//! LZ10 decompression

use super::error::{Lz10Error, Lz10Result};
use super::{HEADER_SIZE, LZ10_TAG, MIN_MATCH, declared_size};

/// Decompress a complete LZ10 stream
///
/// The output is allocated at exactly the declared size. Decoding stops as
/// soon as that many bytes have been produced; leftover flag bits and the
/// tail of a match that would overrun the declared size are ignored.
///
/// Any failure discards the partial output.
pub fn decompress(src: &[u8]) -> Lz10Result<Vec<u8>> {
    if src.len() < HEADER_SIZE {
        return Err(Lz10Error::TooShort {
            actual: src.len(),
            minimum: HEADER_SIZE,
        });
    }

    if src[0] != LZ10_TAG {
        return Err(Lz10Error::InvalidTag(src[0]));
    }

    let size = declared_size(src).ok_or(Lz10Error::TooShort {
        actual: src.len(),
        minimum: HEADER_SIZE,
    })?;
    if size == 0 {
        return Err(Lz10Error::ZeroLength);
    }

    let mut out: Vec<u8> = Vec::new();
    out.try_reserve_exact(size)
        .map_err(|_| Lz10Error::AllocationFailed(size))?;

    let mut pos = HEADER_SIZE;

    while out.len() < size && pos < src.len() {
        let flags = src[pos];
        pos += 1;

        for bit in 0..8 {
            if out.len() >= size {
                break;
            }

            if flags & (0x80 >> bit) == 0 {
                let byte = *src.get(pos).ok_or(Lz10Error::Truncated {
                    offset: pos,
                    produced: out.len(),
                })?;
                out.push(byte);
                pos += 1;
                continue;
            }

            // Match token needs two bytes
            if pos + 1 >= src.len() {
                return Err(Lz10Error::Truncated {
                    offset: pos,
                    produced: out.len(),
                });
            }
            let b1 = src[pos];
            let b2 = src[pos + 1];
            pos += 2;

            let length = usize::from(b1 >> 4) + MIN_MATCH;
            let displacement = ((usize::from(b1 & 0x0F) << 8) | usize::from(b2)) + 1;

            if displacement > out.len() {
                return Err(Lz10Error::InvalidBackReference {
                    displacement,
                    produced: out.len(),
                });
            }

            // Byte-by-byte so overlapping references repeat the pattern
            let start = out.len() - displacement;
            for k in 0..length {
                if out.len() >= size {
                    break;
                }
                let byte = out[start + k];
                out.push(byte);
            }
        }
    }

    if out.len() != size {
        return Err(Lz10Error::LengthMismatch {
            expected: size,
            actual: out.len(),
        });
    }

    Ok(out)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_short_input() {
        assert_eq!(
            decompress(&[0x10, 0x01]),
            Err(Lz10Error::TooShort {
                actual: 2,
                minimum: 4
            })
        );
    }

    #[test]
    fn test_reject_wrong_tag() {
        assert_eq!(decompress(&[0x11, 0, 0, 0]), Err(Lz10Error::InvalidTag(0x11)));
    }

    #[test]
    fn test_reject_zero_length() {
        assert_eq!(decompress(&[0x10, 0, 0, 0]), Err(Lz10Error::ZeroLength));
    }

    #[test]
    fn test_reject_missing_body() {
        assert_eq!(
            decompress(&[0x10, 5, 0, 0]),
            Err(Lz10Error::LengthMismatch {
                expected: 5,
                actual: 0
            })
        );
    }

    #[test]
    fn test_reject_truncated_literal() {
        // Flag byte promises 8 literals, only 2 follow
        let result = decompress(&[0x10, 5, 0, 0, 0x00, b'a', b'b']);
        assert_eq!(
            result,
            Err(Lz10Error::Truncated {
                offset: 7,
                produced: 2
            })
        );
    }

    #[test]
    fn test_reject_truncated_match() {
        // Literal then a match with only one of its two bytes
        let result = decompress(&[0x10, 5, 0, 0, 0x40, b'a', 0x10]);
        assert!(matches!(result, Err(Lz10Error::Truncated { .. })));
    }

    #[test]
    fn test_reject_back_reference_before_start() {
        // One literal, then displacement 2 with only 1 byte produced
        let result = decompress(&[0x10, 4, 0, 0, 0x40, b'a', 0x00, 0x01]);
        assert_eq!(
            result,
            Err(Lz10Error::InvalidBackReference {
                displacement: 2,
                produced: 1
            })
        );
    }

    #[test]
    fn test_reject_match_as_first_token() {
        let result = decompress(&[0x10, 3, 0, 0, 0x80, 0x00, 0x00]);
        assert!(matches!(
            result,
            Err(Lz10Error::InvalidBackReference {
                displacement: 1,
                produced: 0
            })
        ));
    }

    #[test]
    fn test_literals_only() {
        let data = decompress(&[0x10, 3, 0, 0, 0x00, b'x', b'y', b'z']).unwrap();
        assert_eq!(data, b"xyz");
    }

    #[test]
    fn test_overlapping_copy_repeats_pattern() {
        // "ab" followed by a 6-byte match at displacement 2
        let data = decompress(&[0x10, 8, 0, 0, 0x20, b'a', b'b', 0x30, 0x01]).unwrap();
        assert_eq!(data, b"abababab");
    }

    #[test]
    fn test_run_length_via_displacement_one() {
        // 'A' then 18 copies of the previous byte, truncated to 10 total
        let data = decompress(&[0x10, 10, 0, 0, 0x40, b'A', 0xF0, 0x00]).unwrap();
        assert_eq!(data, b"AAAAAAAAAA");
    }

    #[test]
    fn test_trailing_flag_bits_ignored() {
        // Flag byte has match bits set after the declared size is reached
        let data = decompress(&[0x10, 2, 0, 0, 0x3F, b'h', b'i']).unwrap();
        assert_eq!(data, b"hi");
    }

    #[test]
    fn test_trailing_input_ignored() {
        // Padding after the stream is common inside archives
        let data = decompress(&[0x10, 1, 0, 0, 0x00, b'q', 0, 0, 0, 0]).unwrap();
        assert_eq!(data, b"q");
    }
}
