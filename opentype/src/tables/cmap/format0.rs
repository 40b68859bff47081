use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;

/// Format 0: the Apple standard byte-encoding table. A direct array of 256
/// glyph ids, one per one-byte character code. The only subtable format
/// that serializes from decoded state; all entries are part of the mapping,
/// zeros included.
#[derive(Debug, PartialEq, Clone)]
pub struct Format0 {
    pub(crate) length: u16,
    pub(crate) language: u16,
    pub(crate) glyph_id_array: Vec<u8>,
    pub(crate) cmap: BTreeMap<i32, u16>,
}

impl Format0 {
    pub fn language(&self) -> u16 {
        self.language
    }

    pub fn mappings(&self) -> &BTreeMap<i32, u16> {
        &self.cmap
    }

    /// Parses the body following the format number.
    pub(crate) fn unpack<R: io::Read + AsRef<[u8]>>(rd: &mut Cursor<R>) -> Result<Self, Error> {
        let length = rd.read_u16::<BigEndian>()?;
        let language = rd.read_u16::<BigEndian>()?;
        let mut glyph_id_array = vec![0; 256];
        rd.read_exact(&mut glyph_id_array)?;

        let cmap = glyph_id_array
            .iter()
            .enumerate()
            .map(|(code, gid)| (code as i32, *gid as u16))
            .collect();

        Ok(Format0 {
            length,
            language,
            glyph_id_array,
            cmap,
        })
    }

    pub(crate) fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_u16::<BigEndian>(0)?; // format
        wr.write_u16::<BigEndian>(self.length)?;
        wr.write_u16::<BigEndian>(self.language)?;
        wr.write_all(&self.glyph_id_array)
    }

    pub(crate) fn byte_len(&self) -> u32 {
        6 + self.glyph_id_array.len() as u32
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format0_encode_decode() {
        let mut data = vec![
            0x01, 0x06, // length
            0x00, 0x00, // language
        ];
        let mut array = vec![0u8; 256];
        array[65] = 36;
        array[66] = 37;
        data.extend_from_slice(&array);

        let subtable = Format0::unpack(&mut Cursor::new(&data[..])).unwrap();
        assert_eq!(subtable.length, 262);
        // zeros are part of the mapping
        assert_eq!(subtable.mappings().len(), 256);
        assert_eq!(subtable.mappings()[&65], 36);
        assert_eq!(subtable.mappings()[&66], 37);
        assert_eq!(subtable.mappings()[&67], 0);

        // re-pack and compare
        let mut buffer = Vec::new();
        subtable.pack(&mut buffer).unwrap();
        assert_eq!(buffer.len() as u32, subtable.byte_len());
        assert_eq!(&buffer[2..], &data[..]);
    }
}
