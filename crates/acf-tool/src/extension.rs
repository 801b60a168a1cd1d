//! File extension detection for extracted entries.
//!
//! Nitro resources carry a 4-character tag at offset 0. Some tags are stored
//! byte-reversed (`RGCN` for an `NCGR` tile file) and are flipped back.

/// Extension used when no tag is recognized
pub const DEFAULT_EXTENSION: &str = "bin";

/// Longest tag taken from the payload
const MAX_TAG_LEN: usize = 4;

/// Tags at or below this length are not trusted
const MIN_TAG_LEN: usize = 2;

/// Tags stored byte-reversed on disk
const REVERSED_TAGS: [&str; 6] = ["RGCN", "RLCN", "RECN", "RNAN", "RCSN", "RTFN"];

/// Guess a file extension from the leading bytes of `data`
///
/// Takes up to 4 leading ASCII alphanumeric bytes. Two or fewer yield
/// [`DEFAULT_EXTENSION`].
pub fn detect_extension(data: &[u8]) -> String {
    let tag: String = data
        .iter()
        .take(MAX_TAG_LEN)
        .take_while(|b| b.is_ascii_alphanumeric())
        .map(|&b| char::from(b))
        .collect();

    if tag.len() <= MIN_TAG_LEN {
        return DEFAULT_EXTENSION.to_string();
    }

    if REVERSED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
        tag.chars().rev().collect()
    } else {
        tag
    }
}
