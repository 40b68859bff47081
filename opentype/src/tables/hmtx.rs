use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;
use crate::tables::hhea::HheaTable;
use crate::tables::maxp::MaxpTable;
use crate::tables::FontTable;

/// The horizontal metrics table: advance widths and left side bearings.
/// The first `hhea.number_of_h_metrics` glyphs carry paired records; the
/// remaining glyphs carry a bare left side bearing and inherit the last
/// advance width.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6hmtx.html
#[derive(Debug, PartialEq, Clone)]
pub struct HmtxTable {
    /// Paired advance width and left side bearing values, indexed by glyph
    /// id.
    pub(crate) h_metrics: Vec<LongHorMetric>,
    /// Left side bearings for glyph ids greater than or equal to
    /// `number_of_h_metrics`.
    pub(crate) left_side_bearings: Vec<i16>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LongHorMetric {
    /// Advance width, in font design units.
    pub(crate) advance_width: u16,
    /// Glyph left side bearing, in font design units.
    pub(crate) lsb: i16,
}

impl LongHorMetric {
    pub fn advance_width(&self) -> u16 {
        self.advance_width
    }

    pub fn lsb(&self) -> i16 {
        self.lsb
    }
}

impl HmtxTable {
    pub fn h_metrics(&self) -> &[LongHorMetric] {
        &self.h_metrics
    }

    pub fn left_side_bearings(&self) -> &[i16] {
        &self.left_side_bearings
    }

    /// New metrics for the glyph sequence `filter` (source glyph ids, in
    /// the new order). The paired region is cut after the last entry that
    /// still maps from a paired source glyph; filtered glyphs from the
    /// bare-bearing region that land inside it get a synthesized advance
    /// width of 0. Glyph ids must have been validated against the glyph
    /// count.
    pub(crate) fn filter(&self, filter: &[u16]) -> HmtxTable {
        let paired = self.h_metrics.len() as u16;
        let mut num_h_metrics = 0;
        for (i, gid) in filter.iter().enumerate() {
            if *gid < paired {
                num_h_metrics = i + 1;
            }
        }

        let mut new = HmtxTable {
            h_metrics: Vec::with_capacity(num_h_metrics),
            left_side_bearings: Vec::with_capacity(filter.len() - num_h_metrics),
        };
        for (i, gid) in filter.iter().enumerate() {
            if i < num_h_metrics {
                if *gid < paired {
                    new.h_metrics.push(self.h_metrics[*gid as usize].clone());
                } else {
                    new.h_metrics.push(LongHorMetric {
                        advance_width: 0,
                        lsb: self.left_side_bearings[(*gid - paired) as usize],
                    });
                }
            } else {
                new.left_side_bearings
                    .push(self.left_side_bearings[(*gid - paired) as usize]);
            }
        }
        new
    }
}

impl<'a> FontTable<'a> for HmtxTable {
    type Dep = (&'a HheaTable, &'a MaxpTable);

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        (hhea, maxp): Self::Dep,
    ) -> Result<Self, Error> {
        let mut h_metrics = Vec::with_capacity(hhea.number_of_h_metrics as usize);
        for _ in 0..hhea.number_of_h_metrics {
            h_metrics.push(LongHorMetric {
                advance_width: rd.read_u16::<BigEndian>()?,
                lsb: rd.read_i16::<BigEndian>()?,
            });
        }

        let mut left_side_bearings =
            vec![0; maxp.num_glyphs().saturating_sub(hhea.number_of_h_metrics) as usize];
        rd.read_i16_into::<BigEndian>(&mut left_side_bearings)?;

        Ok(HmtxTable {
            h_metrics,
            left_side_bearings,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        for metric in &self.h_metrics {
            wr.write_u16::<BigEndian>(metric.advance_width)?;
            wr.write_i16::<BigEndian>(metric.lsb)?;
        }
        for bearing in &self.left_side_bearings {
            wr.write_i16::<BigEndian>(*bearing)?;
        }
        Ok(())
    }
}
