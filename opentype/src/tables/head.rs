use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;
use crate::tables::FontTable;
use crate::types::{Fixed, LongDateTime};

/// The font header: font-wide metadata and the switch that selects the short
/// or long 'loca' format. Always 54 bytes.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/head
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6head.html
#[derive(Debug, PartialEq, Clone)]
pub struct HeadTable {
    /// Major version number of the font header table — set to 1.
    pub(crate) major_version: u16,
    /// Minor version number of the font header table — set to 0.
    pub(crate) minor_version: u16,
    /// Set by font manufacturer.
    pub(crate) font_revision: Fixed,
    /// To compute: set it to 0, sum the entire font as uint32, then store
    /// 0xB1B0AFBA minus the sum. The table's own checksum is always taken
    /// with this field zeroed.
    pub(crate) check_sum_adjustment: u32,
    /// Set to 0x5F0F3CF5.
    pub(crate) magic_number: u32,
    pub(crate) flags: u16,
    /// Design units per em, from 16 to 16384.
    pub(crate) units_per_em: u16,
    pub(crate) created: LongDateTime,
    pub(crate) modified: LongDateTime,
    /// Bounding box over all glyph bounding boxes.
    pub(crate) x_min: i16,
    pub(crate) y_min: i16,
    pub(crate) x_max: i16,
    pub(crate) y_max: i16,
    /// Bold, italic, underline, ... style bits.
    pub(crate) mac_style: u16,
    /// Smallest readable size in pixels.
    pub(crate) lowest_rec_ppem: u16,
    /// Deprecated — set to 2.
    pub(crate) font_direction_hint: i16,
    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub(crate) index_to_loc_format: i16,
    /// 0 for current format.
    pub(crate) glyph_data_format: i16,
}

impl HeadTable {
    pub fn font_revision(&self) -> Fixed {
        self.font_revision
    }

    pub fn check_sum_adjustment(&self) -> u32 {
        self.check_sum_adjustment
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn created(&self) -> LongDateTime {
        self.created
    }

    pub fn modified(&self) -> LongDateTime {
        self.modified
    }

    pub fn index_to_loc_format(&self) -> i16 {
        self.index_to_loc_format
    }
}

impl<'a> FontTable<'a> for HeadTable {
    type Dep = ();

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        _: Self::Dep,
    ) -> Result<Self, Error> {
        Ok(HeadTable {
            major_version: rd.read_u16::<BigEndian>()?,
            minor_version: rd.read_u16::<BigEndian>()?,
            font_revision: Fixed::unpack(rd)?,
            check_sum_adjustment: rd.read_u32::<BigEndian>()?,
            magic_number: rd.read_u32::<BigEndian>()?,
            flags: rd.read_u16::<BigEndian>()?,
            units_per_em: rd.read_u16::<BigEndian>()?,
            created: LongDateTime::unpack(rd)?,
            modified: LongDateTime::unpack(rd)?,
            x_min: rd.read_i16::<BigEndian>()?,
            y_min: rd.read_i16::<BigEndian>()?,
            x_max: rd.read_i16::<BigEndian>()?,
            y_max: rd.read_i16::<BigEndian>()?,
            mac_style: rd.read_u16::<BigEndian>()?,
            lowest_rec_ppem: rd.read_u16::<BigEndian>()?,
            font_direction_hint: rd.read_i16::<BigEndian>()?,
            index_to_loc_format: rd.read_i16::<BigEndian>()?,
            glyph_data_format: rd.read_i16::<BigEndian>()?,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_u16::<BigEndian>(self.major_version)?;
        wr.write_u16::<BigEndian>(self.minor_version)?;
        self.font_revision.pack(wr)?;
        wr.write_u32::<BigEndian>(self.check_sum_adjustment)?;
        wr.write_u32::<BigEndian>(self.magic_number)?;
        wr.write_u16::<BigEndian>(self.flags)?;
        wr.write_u16::<BigEndian>(self.units_per_em)?;
        self.created.pack(wr)?;
        self.modified.pack(wr)?;
        wr.write_i16::<BigEndian>(self.x_min)?;
        wr.write_i16::<BigEndian>(self.y_min)?;
        wr.write_i16::<BigEndian>(self.x_max)?;
        wr.write_i16::<BigEndian>(self.y_max)?;
        wr.write_u16::<BigEndian>(self.mac_style)?;
        wr.write_u16::<BigEndian>(self.lowest_rec_ppem)?;
        wr.write_i16::<BigEndian>(self.font_direction_hint)?;
        wr.write_i16::<BigEndian>(self.index_to_loc_format)?;
        wr.write_i16::<BigEndian>(self.glyph_data_format)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testdata;

    #[test]
    fn test_head_table_encode_decode() {
        let head = testdata::sample_head();

        let mut buffer = Vec::new();
        head.pack(&mut buffer).unwrap();
        assert_eq!(buffer.len(), 54);

        // re-pack and compare
        assert_eq!(
            HeadTable::unpack(&mut Cursor::new(&buffer[..]), ()).unwrap(),
            head
        );
    }
}
