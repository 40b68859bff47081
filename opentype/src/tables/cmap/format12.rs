use std::collections::BTreeMap;
use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::Error;

/// Format 12: segmented coverage of the full Unicode repertoire, the
/// Microsoft standard table for fonts supporting supplementary-plane
/// characters. Groups map consecutive character codes to consecutive glyph
/// ids; a group's end character code is treated as an EXCLUSIVE bound here.
/// Re-serialized from the captured subtable bytes.
#[derive(Debug, PartialEq, Clone)]
pub struct Format12 {
    pub(crate) length: u32,
    pub(crate) language: u32,
    pub(crate) num_groups: u32,
    pub(crate) groups: Vec<SequentialMapGroup>,
    pub(crate) cmap: BTreeMap<i32, u16>,
    /// The subtable bytes as read, re-emitted verbatim.
    pub(crate) raw: Vec<u8>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct SequentialMapGroup {
    pub(crate) start_char_code: u32,
    pub(crate) end_char_code: u32,
    pub(crate) start_glyph_id: u32,
}

impl Format12 {
    pub fn language(&self) -> u32 {
        self.language
    }

    pub fn mappings(&self) -> &BTreeMap<i32, u16> {
        &self.cmap
    }

    /// Parses a complete captured subtable (including format, reserved and
    /// length fields).
    pub(crate) fn unpack(raw: Vec<u8>) -> Result<Self, Error> {
        let mut rd = Cursor::new(&raw[..]);
        rd.set_position(4); // format and reserved already decoded
        let length = rd.read_u32::<BigEndian>()?;
        let language = rd.read_u32::<BigEndian>()?;
        let num_groups = rd.read_u32::<BigEndian>()?;

        let mut groups = Vec::with_capacity(num_groups.min(1024) as usize);
        for _ in 0..num_groups {
            groups.push(SequentialMapGroup {
                start_char_code: rd.read_u32::<BigEndian>()?,
                end_char_code: rd.read_u32::<BigEndian>()?,
                start_glyph_id: rd.read_u32::<BigEndian>()?,
            });
        }

        let mut cmap = BTreeMap::new();
        for group in &groups {
            for code in group.start_char_code..group.end_char_code {
                let gid = group
                    .start_glyph_id
                    .wrapping_add(code - group.start_char_code);
                cmap.insert(code as i32, gid as u16);
            }
        }

        Ok(Format12 {
            length,
            language,
            num_groups,
            groups,
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
