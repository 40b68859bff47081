use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;
use crate::tables::FontTable;

/// The horizontal header: layout metrics plus the count of paired records in
/// the 'hmtx' table.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/hhea
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6hhea.html
#[derive(Debug, PartialEq, Clone)]
pub struct HheaTable {
    pub(crate) major_version: u16,
    pub(crate) minor_version: u16,
    /// Distance from baseline of highest ascender.
    pub(crate) ascender: i16,
    /// Distance from baseline of lowest descender.
    pub(crate) descender: i16,
    /// Typographic line gap.
    pub(crate) line_gap: i16,
    /// Maximum advance width value in 'hmtx' table.
    pub(crate) advance_width_max: u16,
    /// Minimum left sidebearing value in 'hmtx' table.
    pub(crate) min_left_side_bearing: i16,
    /// Minimum right sidebearing value; calculated as
    /// Min(aw - lsb - (xMax - xMin)).
    pub(crate) min_right_side_bearing: i16,
    /// Max(lsb + (xMax - xMin)).
    pub(crate) x_max_extent: i16,
    /// Used to calculate the slope of the cursor (rise/run); 1 for vertical.
    pub(crate) caret_slope_rise: i16,
    /// 0 for vertical.
    pub(crate) caret_slope_run: i16,
    /// The amount by which a slanted highlight on a glyph needs to be shifted
    /// to produce the best appearance.
    pub(crate) caret_offset: i16,
    /// Four reserved values, emitted as read.
    pub(crate) reserved: [i16; 4],
    /// 0 for current format.
    pub(crate) metric_data_format: i16,
    /// Number of hMetric entries in the 'hmtx' table.
    pub(crate) number_of_h_metrics: u16,
}

impl HheaTable {
    pub fn ascender(&self) -> i16 {
        self.ascender
    }

    pub fn descender(&self) -> i16 {
        self.descender
    }

    pub fn line_gap(&self) -> i16 {
        self.line_gap
    }

    pub fn number_of_h_metrics(&self) -> u16 {
        self.number_of_h_metrics
    }
}

impl<'a> FontTable<'a> for HheaTable {
    type Dep = ();

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        _: Self::Dep,
    ) -> Result<Self, Error> {
        Ok(HheaTable {
            major_version: rd.read_u16::<BigEndian>()?,
            minor_version: rd.read_u16::<BigEndian>()?,
            ascender: rd.read_i16::<BigEndian>()?,
            descender: rd.read_i16::<BigEndian>()?,
            line_gap: rd.read_i16::<BigEndian>()?,
            advance_width_max: rd.read_u16::<BigEndian>()?,
            min_left_side_bearing: rd.read_i16::<BigEndian>()?,
            min_right_side_bearing: rd.read_i16::<BigEndian>()?,
            x_max_extent: rd.read_i16::<BigEndian>()?,
            caret_slope_rise: rd.read_i16::<BigEndian>()?,
            caret_slope_run: rd.read_i16::<BigEndian>()?,
            caret_offset: rd.read_i16::<BigEndian>()?,
            reserved: [
                rd.read_i16::<BigEndian>()?,
                rd.read_i16::<BigEndian>()?,
                rd.read_i16::<BigEndian>()?,
                rd.read_i16::<BigEndian>()?,
            ],
            metric_data_format: rd.read_i16::<BigEndian>()?,
            number_of_h_metrics: rd.read_u16::<BigEndian>()?,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_u16::<BigEndian>(self.major_version)?;
        wr.write_u16::<BigEndian>(self.minor_version)?;
        wr.write_i16::<BigEndian>(self.ascender)?;
        wr.write_i16::<BigEndian>(self.descender)?;
        wr.write_i16::<BigEndian>(self.line_gap)?;
        wr.write_u16::<BigEndian>(self.advance_width_max)?;
        wr.write_i16::<BigEndian>(self.min_left_side_bearing)?;
        wr.write_i16::<BigEndian>(self.min_right_side_bearing)?;
        wr.write_i16::<BigEndian>(self.x_max_extent)?;
        wr.write_i16::<BigEndian>(self.caret_slope_rise)?;
        wr.write_i16::<BigEndian>(self.caret_slope_run)?;
        wr.write_i16::<BigEndian>(self.caret_offset)?;
        for reserved in &self.reserved {
            wr.write_i16::<BigEndian>(*reserved)?;
        }
        wr.write_i16::<BigEndian>(self.metric_data_format)?;
        wr.write_u16::<BigEndian>(self.number_of_h_metrics)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testdata;

    #[test]
    fn test_hhea_table_encode_decode() {
        let hhea = testdata::sample_hhea(2);

        let mut buffer = Vec::new();
        hhea.pack(&mut buffer).unwrap();
        assert_eq!(buffer.len(), 36);

        // re-pack and compare
        assert_eq!(
            HheaTable::unpack(&mut Cursor::new(&buffer[..]), ()).unwrap(),
            hhea
        );
    }
}
