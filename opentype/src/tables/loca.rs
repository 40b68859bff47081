use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;
use crate::tables::head::HeadTable;
use crate::tables::maxp::MaxpTable;
use crate::tables::FontTable;

/// The index-to-location table: byte offsets into 'glyf', indexed by glyph
/// id, with one extra terminal entry equal to the total 'glyf' length. The
/// size of a glyph data block is the difference between two consecutive
/// offsets.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/loca
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6loca.html
#[derive(Debug, PartialEq, Clone)]
pub struct LocaTable {
    /// True byte offsets; short-format values are doubled while reading so
    /// lookups are uniform.
    pub(crate) offsets: Vec<u32>,
    /// The storage format the offsets were read in (and will be written in).
    pub(crate) format: LocaFormat,
}

/// The storage format selected by `head.index_to_loc_format`: 0 stores
/// half-offsets as u16, 1 stores byte offsets as u32.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LocaFormat {
    Short,
    Long,
}

impl LocaTable {
    /// Number of entries, which is one more than the glyph count.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The byte offset of glyph `i` within 'glyf' (the terminal entry for
    /// `i` = glyph count).
    pub fn get(&self, i: usize) -> Option<u32> {
        self.offsets.get(i).copied()
    }

    pub fn format(&self) -> LocaFormat {
        self.format
    }
}

impl<'a> FontTable<'a> for LocaTable {
    type Dep = (&'a HeadTable, &'a MaxpTable);

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        (head, maxp): Self::Dep,
    ) -> Result<Self, Error> {
        let format = if head.index_to_loc_format == 0 {
            LocaFormat::Short
        } else {
            LocaFormat::Long
        };

        let n = maxp.num_glyphs() as usize + 1;
        let mut offsets = Vec::with_capacity(n);
        for _ in 0..n {
            offsets.push(match format {
                LocaFormat::Short => (rd.read_u16::<BigEndian>()? as u32) * 2,
                LocaFormat::Long => rd.read_u32::<BigEndian>()?,
            });
        }

        Ok(LocaTable { offsets, format })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        for offset in &self.offsets {
            match self.format {
                LocaFormat::Short => wr.write_u16::<BigEndian>((offset / 2) as u16)?,
                LocaFormat::Long => wr.write_u32::<BigEndian>(*offset)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testdata;

    #[test]
    fn test_loca_table_short_encode_decode() {
        let head = testdata::sample_head(); // index_to_loc_format == 0
        let maxp = testdata::sample_maxp(2);

        let data = vec![0x00, 0x00, 0x00, 0x03, 0x00, 0x07];
        let loca = LocaTable::unpack(&mut Cursor::new(&data[..]), (&head, &maxp)).unwrap();

        assert_eq!(loca.format, LocaFormat::Short);
        // stored values are half-offsets
        assert_eq!(loca.offsets, vec![0, 6, 14]);
        assert_eq!(loca.get(1), Some(6));
        assert_eq!(loca.get(3), None);

        // re-pack and compare
        let mut buffer = Vec::new();
        loca.pack(&mut buffer).unwrap();
        assert_eq!(buffer, data);
    }

    #[test]
    fn test_loca_table_long_encode_decode() {
        let mut head = testdata::sample_head();
        head.index_to_loc_format = 1;
        let maxp = testdata::sample_maxp(1);

        let data = vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09];
        let loca = LocaTable::unpack(&mut Cursor::new(&data[..]), (&head, &maxp)).unwrap();

        assert_eq!(loca.format, LocaFormat::Long);
        assert_eq!(loca.offsets, vec![0, 9]);

        // re-pack and compare
        let mut buffer = Vec::new();
        loca.pack(&mut buffer).unwrap();
        assert_eq!(buffer, data);
    }
}
