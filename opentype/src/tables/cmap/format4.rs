use std::collections::BTreeMap;
use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt};

use super::read_gid_at;
use crate::error::Error;

/// Format 4: the segmented mapping to delta values, the Microsoft standard
/// table for fonts supporting the Unicode BMP. Four parallel arrays
/// describe segments of consecutive character codes; a segment either maps
/// through a plain delta or indirects into the trailing glyph-index array,
/// relative to the position its id_range_offset was read at. The final
/// segment's 0xFFFF end code is a sentinel and not part of the mapping.
/// Re-serialized from the captured subtable bytes.
#[derive(Debug, PartialEq, Clone)]
pub struct Format4 {
    pub(crate) language: u16,
    /// Number of segments (the stored value is twice this).
    pub(crate) seg_count: u16,
    pub(crate) search_range: u16,
    pub(crate) entry_selector: u16,
    pub(crate) range_shift: u16,
    /// End character code for each segment, last = 0xFFFF.
    pub(crate) end_code: Vec<u16>,
    pub(crate) reserved_pad: u16,
    /// Start character code for each segment.
    pub(crate) start_code: Vec<u16>,
    /// Delta for all character codes in the segment.
    pub(crate) id_delta: Vec<i16>,
    /// Offset into the glyph-index array, or 0 for plain delta mapping.
    pub(crate) id_range_offset: Vec<u16>,
    /// Position each id_range_offset was read at within the subtable.
    pub(crate) id_range_offset_pos: Vec<u32>,
    pub(crate) cmap: BTreeMap<i32, u16>,
    /// The subtable bytes as read, re-emitted verbatim.
    pub(crate) raw: Vec<u8>,
}

impl Format4 {
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
        let seg_count = rd.read_u16::<BigEndian>()? / 2;
        let search_range = rd.read_u16::<BigEndian>()?;
        let entry_selector = rd.read_u16::<BigEndian>()?;
        let range_shift = rd.read_u16::<BigEndian>()?;

        let mut end_code = vec![0; seg_count as usize];
        rd.read_u16_into::<BigEndian>(&mut end_code)?;
        let reserved_pad = rd.read_u16::<BigEndian>()?;
        let mut start_code = vec![0; seg_count as usize];
        rd.read_u16_into::<BigEndian>(&mut start_code)?;
        let mut id_delta = vec![0; seg_count as usize];
        rd.read_i16_into::<BigEndian>(&mut id_delta)?;

        let mut id_range_offset = Vec::with_capacity(seg_count as usize);
        let mut id_range_offset_pos = Vec::with_capacity(seg_count as usize);
        for _ in 0..seg_count {
            id_range_offset_pos.push(rd.position() as u32);
            id_range_offset.push(rd.read_u16::<BigEndian>()?);
        }

        let mut subtable = Format4 {
            language,
            seg_count,
            search_range,
            entry_selector,
            range_shift,
            end_code,
            reserved_pad,
            start_code,
            id_delta,
            id_range_offset,
            id_range_offset_pos,
            cmap: BTreeMap::new(),
            raw,
        };
        subtable.cmap = subtable.decode()?;
        Ok(subtable)
    }

    fn decode(&self) -> Result<BTreeMap<i32, u16>, Error> {
        let mut cmap = BTreeMap::new();
        for i in 0..self.seg_count as usize {
            if self.end_code[i] == 0xFFFF {
                // sentinel segment, not part of the mapping
                break;
            }
            for code in self.start_code[i]..=self.end_code[i] {
                cmap.insert(code as i32, self.glyph_for(i, code)?);
            }
        }
        Ok(cmap)
    }

    fn glyph_for(&self, segment: usize, code: u16) -> Result<u16, Error> {
        if self.id_range_offset[segment] == 0 {
            return Ok((code as i32 + self.id_delta[segment] as i32) as u16);
        }
        let at = self.id_range_offset_pos[segment] as usize
            + self.id_range_offset[segment] as usize
            + 2 * (code - self.start_code[segment]) as usize;
        read_gid_at(&self.raw, at, self.id_delta[segment])
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

    fn put16(data: &mut [u8], at: usize, value: u16) {
        data[at..at + 2].copy_from_slice(&value.to_be_bytes());
    }

    /// One plain-delta segment covering ASCII plus the sentinel segment.
    fn delta_subtable() -> Vec<u8> {
        let mut data = vec![0u8; 32];
        put16(&mut data, 0, 4); // format
        put16(&mut data, 2, 32); // length
        put16(&mut data, 4, 0); // language
        put16(&mut data, 6, 4); // seg_count_x2
        put16(&mut data, 8, 4); // search_range
        put16(&mut data, 10, 1); // entry_selector
        put16(&mut data, 12, 0); // range_shift
        put16(&mut data, 14, 0x7E); // end codes
        put16(&mut data, 16, 0xFFFF);
        put16(&mut data, 18, 0); // reserved pad
        put16(&mut data, 20, 0x20); // start codes
        put16(&mut data, 22, 0xFFFF);
        put16(&mut data, 24, (-29i16) as u16); // id deltas
        put16(&mut data, 26, 1);
        put16(&mut data, 28, 0); // id range offsets
        put16(&mut data, 30, 0);
        data
    }

    /// One segment indirecting into the glyph-index array plus the
    /// sentinel.
    fn range_offset_subtable() -> Vec<u8> {
        let mut data = vec![0u8; 38];
        put16(&mut data, 0, 4);
        put16(&mut data, 2, 38); // length
        put16(&mut data, 4, 0);
        put16(&mut data, 6, 4); // seg_count_x2
        put16(&mut data, 8, 4);
        put16(&mut data, 10, 1);
        put16(&mut data, 12, 0);
        put16(&mut data, 14, 12); // end codes
        put16(&mut data, 16, 0xFFFF);
        put16(&mut data, 18, 0); // reserved pad
        put16(&mut data, 20, 10); // start codes
        put16(&mut data, 22, 0xFFFF);
        put16(&mut data, 24, 0); // id deltas
        put16(&mut data, 26, 1);
        // id_range_offset[0] is read at position 28; the glyph-index array
        // begins at 32
        put16(&mut data, 28, 4);
        put16(&mut data, 30, 0);
        put16(&mut data, 32, 1);
        put16(&mut data, 34, 2);
        put16(&mut data, 36, 3);
        data
    }

    #[test]
    fn test_format4_delta_arithmetic() {
        let subtable = Format4::unpack(delta_subtable()).unwrap();

        assert_eq!(subtable.seg_count, 2);
        // (0x41 - 29) mod 65536
        assert_eq!(subtable.mappings()[&0x41], 36);
        assert_eq!(subtable.mappings()[&0x20], 3);
        assert_eq!(subtable.mappings()[&0x7E], 97);
        // the sentinel segment contributes nothing
        assert_eq!(subtable.mappings().len(), 0x7E - 0x20 + 1);
        assert_eq!(subtable.mappings().get(&0xFFFF), None);
    }

    #[test]
    fn test_format4_range_offset_lookup() {
        let subtable = Format4::unpack(range_offset_subtable()).unwrap();

        assert_eq!(
            subtable.mappings().iter().collect::<Vec<_>>(),
            vec![(&10, &1), (&11, &2), (&12, &3)]
        );
    }

    #[test]
    fn test_format4_repacks_captured_bytes() {
        let data = delta_subtable();
        let subtable = Format4::unpack(data.clone()).unwrap();

        let mut buffer = Vec::new();
        subtable.pack(&mut buffer).unwrap();
        assert_eq!(buffer, data);
    }
}
