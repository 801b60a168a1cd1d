//! Alignment helpers

/// Payload alignment inside the data region
pub const DATA_ALIGNMENT: usize = 4;

/// Round `size` up to a multiple of `align` (a power of two)
pub const fn pad_size(size: usize, align: usize) -> usize {
    (size + align - 1) & !(align - 1)
}

/// Append zero bytes until `buf.len()` is a multiple of `align`
pub fn pad_to_alignment(buf: &mut Vec<u8>, align: usize) {
    buf.resize(pad_size(buf.len(), align), 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_size() {
        assert_eq!(pad_size(0, 4), 0);
        assert_eq!(pad_size(1, 4), 4);
        assert_eq!(pad_size(4, 4), 4);
        assert_eq!(pad_size(5, 4), 8);
        assert_eq!(pad_size(13, 16), 16);
    }

    #[test]
    fn test_pad_to_alignment() {
        let mut buf = vec![1, 2, 3, 4, 5];
        pad_to_alignment(&mut buf, DATA_ALIGNMENT);
        assert_eq!(buf, vec![1, 2, 3, 4, 5, 0, 0, 0]);
    }
}
