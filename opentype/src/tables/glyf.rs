use std::io::{self, Cursor};

use crate::error::Error;
use crate::tables::loca::{LocaFormat, LocaTable};
use crate::tables::FontTable;

/// The glyph data table: one data block per glyph, referenced by sequential
/// glyph ids beginning at zero. The blocks are carried as opaque bytes —
/// simple/composite outlines are preserved and re-emitted, never decoded.
/// 'loca' brackets glyph `i` at `[loca.get(i), loca.get(i + 1))`.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/glyf
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6glyf.html
#[derive(Debug, PartialEq, Clone)]
pub struct GlyfTable {
    pub(crate) data: Vec<Vec<u8>>,
}

impl GlyfTable {
    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw data block of glyph `gid`; empty for glyphs without an
    /// outline.
    pub fn glyph_data(&self, gid: u16) -> Option<&[u8]> {
        self.data.get(gid as usize).map(|d| d.as_slice())
    }

    /// Total byte length over all glyph blocks.
    pub(crate) fn total_len(&self) -> u32 {
        self.data.iter().map(|d| d.len() as u32).sum()
    }

    /// A new table holding the blocks of `filter`, in filter order. Glyph
    /// ids must have been validated against the glyph count.
    pub(crate) fn filter(&self, filter: &[u16]) -> GlyfTable {
        GlyfTable {
            data: filter
                .iter()
                .map(|gid| self.data.get(*gid as usize).cloned().unwrap_or_default())
                .collect(),
        }
    }

    /// A long-format 'loca' bracketing this table's blocks: running byte
    /// offsets plus the terminal total length.
    pub(crate) fn generate_loca(&self) -> LocaTable {
        let mut offsets = Vec::with_capacity(self.data.len() + 1);
        let mut offset = 0u32;
        for data in &self.data {
            offsets.push(offset);
            offset += data.len() as u32;
        }
        offsets.push(offset);
        LocaTable {
            offsets,
            format: LocaFormat::Long,
        }
    }
}

impl<'a> FontTable<'a> for GlyfTable {
    type Dep = &'a LocaTable;

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        loca: Self::Dep,
    ) -> Result<Self, Error> {
        let region = rd.get_ref().as_ref();
        let n = loca.len().saturating_sub(1);

        let mut data = Vec::with_capacity(n);
        for i in 0..n {
            let start = loca.offsets[i] as usize;
            let end = loca.offsets[i + 1] as usize;
            if start > end || end > region.len() {
                return Err(Error::Invariant(format!(
                    "loca brackets glyph {} at {}..{}, beyond the glyf table length {}",
                    i,
                    start,
                    end,
                    region.len()
                )));
            }
            data.push(region[start..end].to_vec());
        }

        Ok(GlyfTable { data })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        for data in &self.data {
            wr.write_all(data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn loca(offsets: Vec<u32>) -> LocaTable {
        LocaTable {
            offsets,
            format: LocaFormat::Long,
        }
    }

    #[test]
    fn test_glyf_table_encode_decode() {
        let data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9];
        let glyf = GlyfTable::unpack(
            &mut Cursor::new(&data[..]),
            &loca(vec![0, 4, 4, 9]),
        )
        .unwrap();

        assert_eq!(
            glyf.data,
            vec![vec![1, 2, 3, 4], vec![], vec![5, 6, 7, 8, 9]]
        );
        assert_eq!(glyf.len(), 3);
        assert_eq!(glyf.total_len(), 9);
        assert_eq!(glyf.glyph_data(1), Some(&[][..]));

        // re-pack and compare
        let mut buffer = Vec::new();
        glyf.pack(&mut buffer).unwrap();
        assert_eq!(buffer, data);
    }

    #[test]
    fn test_glyf_table_rejects_unordered_loca() {
        let data = vec![0; 8];
        let err = GlyfTable::unpack(&mut Cursor::new(&data[..]), &loca(vec![0, 6, 2]))
            .unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn test_glyf_table_rejects_out_of_bounds_loca() {
        let data = vec![0; 4];
        let err = GlyfTable::unpack(&mut Cursor::new(&data[..]), &loca(vec![0, 8]))
            .unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn test_glyf_table_filter() {
        let glyf = GlyfTable {
            data: vec![vec![0], vec![1, 1], vec![2], vec![]],
        };
        assert_eq!(
            glyf.filter(&[1, 3]),
            GlyfTable {
                data: vec![vec![1, 1], vec![]]
            }
        );
    }

    #[test]
    fn test_generate_loca() {
        let glyf = GlyfTable {
            data: vec![vec![0; 6], vec![], vec![0; 8]],
        };
        let loca = glyf.generate_loca();
        assert_eq!(loca.format, LocaFormat::Long);
        assert_eq!(loca.offsets, vec![0, 6, 6, 14]);
    }
}
