use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;
use crate::tables::FontTable;
use crate::types::Tag;
use crate::utils::limit_read::LimitRead;

/// Size of the offset table itself.
pub(crate) const OFFSET_TABLE_LENGTH: u32 = 12;
/// Size of a single table record.
pub(crate) const TABLE_RECORD_LENGTH: u32 = 16;

/// The recognized top-level sfnt versions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SfntVersion {
    /// OpenType fonts that contain TrueType outlines (0x00010000).
    TrueType,
    /// OpenType fonts containing CFF data ('OTTO').
    Cff,
    /// The Apple specification for TrueType fonts ('true').
    AppleTrueType,
    /// The Apple specification for the old style of PostScript font
    /// ('typ1'); detected but not parsed.
    AppleType1,
    /// The header of a TTC format file ('ttcf').
    Collection,
}

impl SfntVersion {
    pub(crate) fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, Error> {
        let tag = Tag::unpack(rd)?;
        match tag.to_u32() {
            0x00010000 => Ok(SfntVersion::TrueType),
            0x4F54544F => Ok(SfntVersion::Cff),
            0x74727565 => Ok(SfntVersion::AppleTrueType),
            0x74797031 => Ok(SfntVersion::AppleType1),
            0x74746366 => Ok(SfntVersion::Collection),
            _ => Err(Error::UnsupportedSfntVersion(tag)),
        }
    }

    pub(crate) fn pack<W: io::Write>(self, wr: &mut W) -> Result<(), io::Error> {
        self.tag().pack(wr)
    }

    pub fn tag(self) -> Tag {
        match self {
            SfntVersion::TrueType => Tag::from_u32(0x00010000),
            SfntVersion::Cff => Tag::new(b"OTTO"),
            SfntVersion::AppleTrueType => Tag::new(b"true"),
            SfntVersion::AppleType1 => Tag::new(b"typ1"),
            SfntVersion::Collection => Tag::TTCF,
        }
    }
}

/// The first table of a font file: a dictionary of all tables included in
/// the file.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/otff
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6.html
#[derive(Debug, PartialEq)]
pub struct OffsetTable {
    pub(crate) sfnt_version: SfntVersion,
    /// Number of tables.
    pub(crate) num_tables: u16,
    /// (Maximum power of 2 <= numTables) x 16.
    pub(crate) search_range: u16,
    /// Log2(maximum power of 2 <= numTables).
    pub(crate) entry_selector: u16,
    /// NumTables x 16 - searchRange.
    pub(crate) range_shift: u16,
    /// Table records, ordered ascending by tag.
    pub(crate) records: Vec<TableRecord>,
}

impl OffsetTable {
    /// Builds a directory for `records`; the binary-search fields are
    /// derived from the record count when packing.
    pub(crate) fn new(sfnt_version: SfntVersion, records: Vec<TableRecord>) -> Self {
        let num_tables = records.len() as u16;
        let (search_range, entry_selector, range_shift) = derived_fields(num_tables);
        OffsetTable {
            sfnt_version,
            num_tables,
            search_range,
            entry_selector,
            range_shift,
            records,
        }
    }

    pub(crate) fn record(&self, tag: Tag) -> Option<&TableRecord> {
        self.records.iter().find(|r| r.tag == tag)
    }

    pub(crate) fn unpack_table<'a, T, R>(
        &self,
        tag: Tag,
        dep: T::Dep,
        cursor: &mut Cursor<R>,
    ) -> Result<Option<T>, Error>
    where
        R: io::Read + AsRef<[u8]>,
        T: FontTable<'a>,
    {
        let record = match self.record(tag) {
            Some(record) => record,
            None => return Ok(None),
        };

        cursor.set_position(record.offset as u64);
        let region = LimitRead::from_cursor(cursor, record.length as usize)?;
        let mut rd = Cursor::new(region.as_slice());
        Ok(Some(T::unpack(&mut rd, dep)?))
    }

    pub(crate) fn unpack_required_table<'a, T, R>(
        &self,
        tag: Tag,
        dep: T::Dep,
        cursor: &mut Cursor<R>,
    ) -> Result<T, Error>
    where
        R: io::Read + AsRef<[u8]>,
        T: FontTable<'a>,
    {
        self.unpack_table(tag, dep, cursor)?
            .ok_or(Error::MissingTable(tag))
    }

    pub(crate) fn records(&self) -> &[TableRecord] {
        &self.records
    }
}

impl<'a> FontTable<'a> for OffsetTable {
    type Dep = ();

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        _: Self::Dep,
    ) -> Result<Self, Error> {
        let sfnt_version = SfntVersion::unpack(rd)?;
        let num_tables = rd.read_u16::<BigEndian>()?;
        let search_range = rd.read_u16::<BigEndian>()?;
        let entry_selector = rd.read_u16::<BigEndian>()?;
        let range_shift = rd.read_u16::<BigEndian>()?;

        let mut records = Vec::with_capacity(num_tables.min(64) as usize);
        for _ in 0..num_tables {
            records.push(TableRecord::unpack(rd)?);
        }

        Ok(OffsetTable {
            sfnt_version,
            num_tables,
            search_range,
            entry_selector,
            range_shift,
            records,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        self.sfnt_version.pack(wr)?;
        let num_tables = self.records.len() as u16;
        wr.write_u16::<BigEndian>(num_tables)?;

        let (search_range, entry_selector, range_shift) = derived_fields(num_tables);
        wr.write_u16::<BigEndian>(search_range)?;
        wr.write_u16::<BigEndian>(entry_selector)?;
        wr.write_u16::<BigEndian>(range_shift)?;
        for record in &self.records {
            record.pack(wr)?;
        }
        Ok(())
    }
}

/// `(search_range, entry_selector, range_shift)` for a record count.
fn derived_fields(num_tables: u16) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    // largest power of two not exceeding num_tables
    let mut entry_selector = 0u16;
    let mut max_pow2 = 1u16;
    while (1u32 << (entry_selector + 1)) <= num_tables as u32 {
        entry_selector += 1;
        max_pow2 *= 2;
    }
    let search_range = max_pow2 * 16;
    (search_range, entry_selector, num_tables * 16 - search_range)
}

/// A single table record of the font directory.
#[derive(Debug, PartialEq, Clone)]
pub struct TableRecord {
    pub(crate) tag: Tag,
    pub(crate) check_sum: u32,
    /// Offset from the beginning of the font file.
    pub(crate) offset: u32,
    /// Unpadded table length in bytes.
    pub(crate) length: u32,
}

impl TableRecord {
    pub(crate) fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        Ok(TableRecord {
            tag: Tag::unpack(rd)?,
            check_sum: rd.read_u32::<BigEndian>()?,
            offset: rd.read_u32::<BigEndian>()?,
            length: rd.read_u32::<BigEndian>()?,
        })
    }

    pub(crate) fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        self.tag.pack(wr)?;
        wr.write_u32::<BigEndian>(self.check_sum)?;
        wr.write_u32::<BigEndian>(self.offset)?;
        wr.write_u32::<BigEndian>(self.length)?;
        Ok(())
    }
}
