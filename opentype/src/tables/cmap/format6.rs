use std::collections::BTreeMap;
use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::Error;

/// Format 6: trimmed table mapping. A dense glyph-index array for a single
/// contiguous range of character codes starting at `first_code`; zero
/// entries mean "missing" and stay out of the mapping. Re-serialized from
/// the captured subtable bytes.
#[derive(Debug, PartialEq, Clone)]
pub struct Format6 {
    pub(crate) language: u16,
    /// First character code of the covered range.
    pub(crate) first_code: u16,
    pub(crate) entry_count: u16,
    pub(crate) glyph_id_array: Vec<u16>,
    pub(crate) cmap: BTreeMap<i32, u16>,
    /// The subtable bytes as read, re-emitted verbatim.
    pub(crate) raw: Vec<u8>,
}

impl Format6 {
    pub fn language(&self) -> u16 {
        self.language
    }

    pub fn mappings(&self) -> &BTreeMap<i32, u16> {
        &self.cmap
    }

    /// Parses a complete captured subtable (including the format number).
    pub(crate) fn unpack(raw: Vec<u8>) -> Result<Self, Error> {
        let mut rd = Cursor::new(&raw[..]);
        rd.set_position(4); // format and length already decoded
        let language = rd.read_u16::<BigEndian>()?;
        let first_code = rd.read_u16::<BigEndian>()?;
        let entry_count = rd.read_u16::<BigEndian>()?;

        let mut glyph_id_array = vec![0; entry_count as usize];
        rd.read_u16_into::<BigEndian>(&mut glyph_id_array)?;

        let mut cmap = BTreeMap::new();
        for (i, gid) in glyph_id_array.iter().enumerate() {
            if *gid != 0 {
                cmap.insert(first_code as i32 + i as i32, *gid);
            }
        }

        Ok(Format6 {
            language,
            first_code,
            entry_count,
            glyph_id_array,
            cmap,
            raw,
        })
    }

    pub(crate) fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_all(&self.raw)
    }

    pub(crate) fn byte_len(&self) -> u32 {
        self.raw.len() as u32
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_subtable() -> Vec<u8> {
        vec![
            0x00, 0x06, // format
            0x00, 0x10, // length
            0x00, 0x00, // language
            0x00, 0x30, // first code: '0'
            0x00, 0x03, // entry count
            0x00, 0x05, // '0' -> 5
            0x00, 0x00, // '1' -> missing
            0x00, 0x07, // '2' -> 7
        ]
    }

    #[test]
    fn test_format6_skips_missing_glyphs() {
        let subtable = Format6::unpack(sample_subtable()).unwrap();

        assert_eq!(subtable.first_code, 0x30);
        assert_eq!(subtable.entry_count, 3);
        assert_eq!(
            subtable.mappings().iter().collect::<Vec<_>>(),
            vec![(&0x30, &5), (&0x32, &7)]
        );
    }

    #[test]
    fn test_format6_repacks_captured_bytes() {
        let data = sample_subtable();
        let subtable = Format6::unpack(data.clone()).unwrap();

        let mut buffer = Vec::new();
        subtable.pack(&mut buffer).unwrap();
        assert_eq!(buffer, data);
        assert_eq!(subtable.byte_len(), 16);
    }
}
