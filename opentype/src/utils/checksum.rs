//! Table checksums and four-byte padding.
//!
//! A table checksum is the wrapping sum of the table's big-endian 32-bit
//! words, with the table conceptually padded to a four-byte boundary with
//! zeros. All tables begin on four-byte boundaries and the space between
//! them is padded with zeros, so the whole-file sum can be assembled from
//! per-table sums.

use std::io;

/// The 32-bit word sum over `data`, zero-padding the trailing partial word.
pub fn checksum(data: &[u8]) -> u32 {
    let mut sum = 0u32;
    let mut words = data.chunks_exact(4);
    for word in &mut words {
        sum = sum.wrapping_add(u32::from_be_bytes([word[0], word[1], word[2], word[3]]));
    }
    let rest = words.remainder();
    if !rest.is_empty() {
        let mut word = [0; 4];
        word[..rest.len()].copy_from_slice(rest);
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    sum
}

/// `len` rounded up to the next multiple of four.
pub fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

/// Writes the zero bytes that pad a region of `len` bytes to a four-byte
/// boundary.
pub fn pad_space<W: io::Write>(wr: &mut W, len: usize) -> Result<(), io::Error> {
    const PADDING: [u8; 3] = [0; 3];
    wr.write_all(&PADDING[..padded_len(len) - len])
}
