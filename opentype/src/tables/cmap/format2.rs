use std::collections::BTreeMap;
use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt};

use super::read_gid_at;
use crate::error::Error;

/// Format 2: the high-byte mapping table used for the national character
/// code standards for Japanese, Chinese and Korean. 256 sub-header keys
/// select packed sub-headers; a key of 0 maps the byte as a standalone
/// character through sub-header 0, a nonzero key marks the byte as the lead
/// of a two-byte character. Re-serialized from the captured subtable bytes.
#[derive(Debug, PartialEq, Clone)]
pub struct Format2 {
    pub(crate) language: u16,
    pub(crate) sub_header_keys: Vec<u16>,
    pub(crate) sub_headers: Vec<SubHeader>,
    pub(crate) cmap: BTreeMap<i32, u16>,
    /// The subtable bytes as read, re-emitted verbatim.
    pub(crate) raw: Vec<u8>,
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct SubHeader {
    pub(crate) first_code: u16,
    pub(crate) entry_count: u16,
    pub(crate) id_delta: i16,
    pub(crate) id_range_offset: u16,
    /// Position of the id_range_offset field within the subtable; the
    /// glyph-index lookup is relative to where the field was read.
    pub(crate) id_range_offset_pos: u32,
}

impl Format2 {
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

        let mut sub_header_keys = vec![0u16; 256];
        rd.read_u16_into::<BigEndian>(&mut sub_header_keys)?;
        // sub-header 0 is always present; every nonzero key adds one
        let sub_header_count = 1 + sub_header_keys.iter().filter(|key| **key > 0).count();

        let mut sub_headers = Vec::with_capacity(sub_header_count.min(256));
        for _ in 0..sub_header_count {
            let first_code = rd.read_u16::<BigEndian>()?;
            let entry_count = rd.read_u16::<BigEndian>()?;
            let id_delta = rd.read_i16::<BigEndian>()?;
            let id_range_offset_pos = rd.position() as u32;
            let id_range_offset = rd.read_u16::<BigEndian>()?;
            sub_headers.push(SubHeader {
                first_code,
                entry_count,
                id_delta,
                id_range_offset,
                id_range_offset_pos,
            });
        }

        let cmap = decode(&raw, &sub_header_keys, &sub_headers)?;

        Ok(Format2 {
            language,
            sub_header_keys,
            sub_headers,
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

fn decode(
    raw: &[u8],
    keys: &[u16],
    sub_headers: &[SubHeader],
) -> Result<BTreeMap<i32, u16>, Error> {
    let mut cmap = BTreeMap::new();
    let first = &sub_headers[0];
    for i in 0..256u16 {
        // single-byte characters go through sub-header 0
        let at = first.id_range_offset_pos as usize
            + first.id_range_offset.wrapping_add(2 * i) as usize;
        let gid = read_gid_at(raw, at, first.id_delta)?;
        if gid > 0 {
            cmap.insert(i as i32, gid);
        }

        if keys[i as usize] > 0 {
            // `i` is the lead byte of a two-byte character
            let key = (keys[i as usize] / 8) as usize;
            let sub = sub_headers.get(key).ok_or_else(|| {
                Error::Invariant(format!(
                    "cmap format 2 sub-header key {} exceeds the sub-header count {}",
                    key,
                    sub_headers.len()
                ))
            })?;
            for j in 0..sub.entry_count {
                let code = sub
                    .first_code
                    .wrapping_add(j)
                    .wrapping_add(i.wrapping_mul(256));
                let at = sub.id_range_offset_pos as usize
                    + sub.id_range_offset.wrapping_add(j.wrapping_mul(2)) as usize;
                let gid = read_gid_at(raw, at, sub.id_delta)?;
                if gid > 0 {
                    cmap.insert(code as i32, gid);
                }
            }
        }
    }
    Ok(cmap)
}

#[cfg(test)]
mod test {
    use super::*;

    fn put16(data: &mut [u8], at: usize, value: u16) {
        data[at..at + 2].copy_from_slice(&value.to_be_bytes());
    }

    /// One lead byte (0x81) with two entries, plus 'A' as a single-byte
    /// character through sub-header 0.
    fn sample_subtable() -> Vec<u8> {
        // format .. sub_header_keys[256] = 518 bytes, two sub-headers of
        // 8 bytes, 256 + 2 glyph-index words
        let mut data = vec![0u8; 518 + 16 + 512 + 4];
        let length = data.len() as u16;
        put16(&mut data, 0, 2); // format
        put16(&mut data, 2, length);
        put16(&mut data, 4, 0); // language
        put16(&mut data, 6 + 2 * 0x81, 8); // key of lead byte -> sub-header 1

        // sub-header 0: one-byte pass reads glyph indices right after the
        // sub-header array (id_range_offset field sits at 524)
        put16(&mut data, 518, 0); // first_code
        put16(&mut data, 520, 0); // entry_count (unused by the byte pass)
        put16(&mut data, 522, 0); // id_delta
        put16(&mut data, 524, 534 - 524); // id_range_offset
        put16(&mut data, 534 + 2 * 0x41, 10); // 'A' -> glyph 10

        // sub-header 1: two-byte characters 0x8140 and 0x8141
        put16(&mut data, 526, 0x40); // first_code
        put16(&mut data, 528, 2); // entry_count
        put16(&mut data, 530, 5); // id_delta
        put16(&mut data, 532, 1046 - 532); // id_range_offset
        put16(&mut data, 1046, 20); // 0x8140 -> (20 + 5) % 65536
        put16(&mut data, 1048, 0); // 0x8141 -> missing

        data
    }

    #[test]
    fn test_format2_decodes_one_and_two_byte_characters() {
        let subtable = Format2::unpack(sample_subtable()).unwrap();

        assert_eq!(subtable.sub_headers.len(), 2);
        assert_eq!(
            subtable.mappings().iter().collect::<Vec<_>>(),
            vec![(&0x41, &10), (&0x8140, &25)]
        );
    }

    #[test]
    fn test_format2_repacks_captured_bytes() {
        let data = sample_subtable();
        let subtable = Format2::unpack(data.clone()).unwrap();

        let mut buffer = Vec::new();
        subtable.pack(&mut buffer).unwrap();
        assert_eq!(buffer, data);
        assert_eq!(subtable.byte_len() as usize, data.len());
    }
}
