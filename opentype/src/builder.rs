use std::io;

use crate::error::Error;
use crate::font::Font;
use crate::tables::offset::{OffsetTable, TableRecord, OFFSET_TABLE_LENGTH, TABLE_RECORD_LENGTH};
use crate::tables::FontTable;
use crate::types::Tag;
use crate::utils::checksum::{checksum, pad_space, padded_len};

/// Computing: zero `head.check_sum_adjustment`, sum the entire file as
/// uint32, store this value minus the sum.
const CHECK_SUM_ADJUSTMENT_BASE: u32 = 0xB1B0_AFBA;

/// Serializes a font as a complete SFNT stream in a single forward pass:
/// table bodies are packed up front, offsets and checksums are derived from
/// them, then the directory and the padded bodies are written in
/// tag-ascending order.
pub(crate) struct Builder<'a> {
    font: &'a Font,
}

impl<'a> Builder<'a> {
    pub fn new(font: &'a Font) -> Self {
        Builder { font }
    }

    pub fn build<W: io::Write>(&self, mut wr: W) -> Result<(), Error> {
        self.font.validate()?;

        let mut tables = self.pack_tables()?;

        let mut offset = OFFSET_TABLE_LENGTH + TABLE_RECORD_LENGTH * tables.len() as u32;
        let mut records = Vec::with_capacity(tables.len());
        for (tag, data) in &tables {
            records.push(TableRecord {
                tag: *tag,
                check_sum: checksum(data),
                offset,
                length: data.len() as u32,
            });
            offset += padded_len(data.len()) as u32;
        }

        let offset_table = OffsetTable::new(self.font.sfnt_version, records);
        let mut directory = Vec::new();
        offset_table.pack(&mut directory)?;

        // every table starts on a four-byte boundary and pads with zeros,
        // so the file word-sum is the directory sum plus the per-table
        // checksums; the whole-file adjustment lands in the emitted 'head'
        // bytes while its record keeps the zero-adjusted checksum
        let mut total = checksum(&directory);
        for record in offset_table.records() {
            total = total.wrapping_add(record.check_sum);
        }
        let adjustment = CHECK_SUM_ADJUSTMENT_BASE.wrapping_sub(total);
        if let Some((_, data)) = tables.iter_mut().find(|(tag, _)| *tag == Tag::HEAD) {
            data[8..12].copy_from_slice(&adjustment.to_be_bytes());
        }

        wr.write_all(&directory).map_err(Error::Write)?;
        for (_, data) in &tables {
            wr.write_all(data).map_err(Error::Write)?;
            pad_space(&mut wr, data.len()).map_err(Error::Write)?;
        }
        Ok(())
    }

    /// Packs every present table into its unpadded bytes, in tag-ascending
    /// order. 'head' is packed with a zeroed check_sum_adjustment so that
    /// its table checksum comes out zero-adjusted.
    fn pack_tables(&self) -> Result<Vec<(Tag, Vec<u8>)>, Error> {
        let font = self.font;
        let mut tables: Vec<(Tag, Vec<u8>)> = Vec::new();

        if let Some(cmap) = &font.cmap {
            tables.push((Tag::CMAP, packed(|wr| cmap.pack(wr))?));
        }
        if let Some(cvt) = &font.cvt {
            tables.push((Tag::CVT, packed(|wr| cvt.pack(wr))?));
        }
        if let Some(fpgm) = &font.fpgm {
            tables.push((Tag::FPGM, packed(|wr| fpgm.pack(wr))?));
        }
        if let Some(glyf) = &font.glyf {
            tables.push((Tag::GLYF, packed(|wr| glyf.pack(wr))?));
        }
        let mut head = font.head.clone();
        head.check_sum_adjustment = 0;
        tables.push((Tag::HEAD, packed(|wr| head.pack(wr))?));
        tables.push((Tag::HHEA, packed(|wr| font.hhea.pack(wr))?));
        tables.push((Tag::HMTX, packed(|wr| font.hmtx.pack(wr))?));
        if let Some(loca) = &font.loca {
            tables.push((Tag::LOCA, packed(|wr| loca.pack(wr))?));
        }
        tables.push((Tag::MAXP, packed(|wr| font.maxp.pack(wr))?));
        tables.push((Tag::NAME, packed(|wr| font.name.pack(wr))?));
        if let Some(prep) = &font.prep {
            tables.push((Tag::PREP, packed(|wr| prep.pack(wr))?));
        }

        Ok(tables)
    }
}

fn packed<F>(pack: F) -> Result<Vec<u8>, Error>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), io::Error>,
{
    let mut data = Vec::new();
    pack(&mut data)?;
    Ok(data)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use crate::tables::offset::SfntVersion;
    use crate::testdata;

    #[test]
    fn test_build_writes_sorted_directory() {
        let data = testdata::sample_file();
        let offset_table =
            OffsetTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap();

        assert_eq!(offset_table.sfnt_version, SfntVersion::TrueType);
        let tags: Vec<_> = offset_table.records().iter().map(|r| r.tag).collect();
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn test_build_aligns_tables_and_pads_with_zeros() {
        let data = testdata::sample_file();
        let offset_table =
            OffsetTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap();

        for record in offset_table.records() {
            assert_eq!(record.offset % 4, 0, "{} is unaligned", record.tag);
            let end = (record.offset + record.length) as usize;
            for (i, byte) in data[end..padded_len(end)].iter().enumerate() {
                assert_eq!(*byte, 0, "nonzero padding after {} at {}", record.tag, i);
            }
        }
        assert_eq!(data.len() % 4, 0);
    }

    #[test]
    fn test_build_record_checksums_match_table_bytes() {
        let data = testdata::sample_file();
        let offset_table =
            OffsetTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap();

        for record in offset_table.records() {
            let start = record.offset as usize;
            let mut region = data[start..start + record.length as usize].to_vec();
            if record.tag == Tag::HEAD {
                region[8..12].copy_from_slice(&[0; 4]);
            }
            assert_eq!(
                checksum(&region),
                record.check_sum,
                "checksum mismatch for {}",
                record.tag
            );
        }
    }

    #[test]
    fn test_build_applies_whole_file_adjustment() {
        let data = testdata::sample_file();
        // with the stored adjustment in place, the file sums to the magic
        // constant
        assert_eq!(checksum(&data), CHECK_SUM_ADJUSTMENT_BASE);
    }

    #[test]
    fn test_head_adjustment_only_differs_in_emitted_bytes() {
        let font = testdata::sample_font();
        let data = testdata::sample_file();

        let record = testdata::find_record(&data, Tag::HEAD);
        let start = record.offset as usize;
        let emitted = &data[start..start + record.length as usize];

        let mut zeroed = Vec::new();
        let mut head = font.head.clone();
        head.check_sum_adjustment = 0;
        head.pack(&mut zeroed).unwrap();

        // identical apart from the patched adjustment field
        assert_eq!(emitted[..8], zeroed[..8]);
        assert_eq!(emitted[12..], zeroed[12..]);
    }
}
