mod format0;
mod format12;
mod format2;
mod format4;
mod format6;

use std::collections::BTreeMap;
use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

pub use format0::Format0;
pub use format12::{Format12, SequentialMapGroup};
pub use format2::Format2;
pub use format4::Format4;
pub use format6::Format6;

use crate::error::Error;
use crate::tables::ids::{EncodingId, PlatformId};
use crate::tables::FontTable;

/// The character map: encoding records pointing at subtables that map
/// character codes to glyph ids. Five subtable formats are understood
/// (0, 2, 4, 6, 12); each decodes its complete mapping at parse time.
/// Character codes are kept as 32-bit signed integers so that format 12's
/// supplementary-plane codes share one key type with the byte-oriented
/// formats.
///
/// Encoding-record offsets are recomputed when packing, laying the
/// subtables out sequentially behind the records; records that shared a
/// subtable in the source each emit their own copy.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/cmap
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6cmap.html
#[derive(Debug, PartialEq, Clone)]
pub struct CmapTable {
    pub(crate) version: u16,
    pub(crate) encoding_records: Vec<EncodingRecord>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct EncodingRecord {
    pub(crate) platform_id: PlatformId,
    pub(crate) encoding_id: EncodingId,
    pub(crate) subtable: Subtable,
}

impl CmapTable {
    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn encoding_records(&self) -> &[EncodingRecord] {
        &self.encoding_records
    }
}

impl EncodingRecord {
    pub fn platform_id(&self) -> PlatformId {
        self.platform_id
    }

    pub fn encoding_id(&self) -> EncodingId {
        self.encoding_id
    }

    pub fn subtable(&self) -> &Subtable {
        &self.subtable
    }

    /// The record's decoded character-to-glyph mapping.
    pub fn mappings(&self) -> &BTreeMap<i32, u16> {
        self.subtable.mappings()
    }
}

/// A character-to-glyph-index subtable, one variant per understood format.
#[derive(Debug, PartialEq, Clone)]
pub enum Subtable {
    Format0(Format0),
    Format2(Format2),
    Format4(Format4),
    Format6(Format6),
    Format12(Format12),
}

impl Subtable {
    pub fn format(&self) -> u16 {
        match self {
            Subtable::Format0(_) => 0,
            Subtable::Format2(_) => 2,
            Subtable::Format4(_) => 4,
            Subtable::Format6(_) => 6,
            Subtable::Format12(_) => 12,
        }
    }

    /// The decoded character-to-glyph mapping.
    pub fn mappings(&self) -> &BTreeMap<i32, u16> {
        match self {
            Subtable::Format0(subtable) => subtable.mappings(),
            Subtable::Format2(subtable) => subtable.mappings(),
            Subtable::Format4(subtable) => subtable.mappings(),
            Subtable::Format6(subtable) => subtable.mappings(),
            Subtable::Format12(subtable) => subtable.mappings(),
        }
    }

    pub fn glyph_id(&self, code: i32) -> Option<u16> {
        self.mappings().get(&code).copied()
    }

    /// Unpacks the subtable the cursor is positioned at. The cursor spans
    /// the whole cmap table, so formats that capture their raw bytes can
    /// slice themselves out of it.
    pub(crate) fn unpack<R: io::Read + AsRef<[u8]>>(rd: &mut Cursor<R>) -> Result<Self, Error> {
        let start = rd.position() as usize;
        let format = rd.read_u16::<BigEndian>()?;
        match format {
            0 => Ok(Subtable::Format0(Format0::unpack(rd)?)),
            2 | 4 | 6 => {
                let length = rd.read_u16::<BigEndian>()? as usize;
                let raw = capture(rd.get_ref().as_ref(), start, length)?;
                Ok(match format {
                    2 => Subtable::Format2(Format2::unpack(raw)?),
                    4 => Subtable::Format4(Format4::unpack(raw)?),
                    _ => Subtable::Format6(Format6::unpack(raw)?),
                })
            }
            12 => {
                rd.read_u16::<BigEndian>()?; // reserved
                let length = rd.read_u32::<BigEndian>()? as usize;
                let raw = capture(rd.get_ref().as_ref(), start, length)?;
                Ok(Subtable::Format12(Format12::unpack(raw)?))
            }
            _ => Err(Error::UnsupportedCmapFormat(format)),
        }
    }

    pub(crate) fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        match self {
            Subtable::Format0(subtable) => subtable.pack(wr),
            Subtable::Format2(subtable) => subtable.pack(wr),
            Subtable::Format4(subtable) => subtable.pack(wr),
            Subtable::Format6(subtable) => subtable.pack(wr),
            Subtable::Format12(subtable) => subtable.pack(wr),
        }
    }

    pub(crate) fn byte_len(&self) -> u32 {
        match self {
            Subtable::Format0(subtable) => subtable.byte_len(),
            Subtable::Format2(subtable) => subtable.byte_len(),
            Subtable::Format4(subtable) => subtable.byte_len(),
            Subtable::Format6(subtable) => subtable.byte_len(),
            Subtable::Format12(subtable) => subtable.byte_len(),
        }
    }
}

/// The subtable's byte range within the cmap table, per its own length
/// field.
fn capture(table: &[u8], start: usize, length: usize) -> Result<Vec<u8>, Error> {
    table
        .get(start..start.saturating_add(length))
        .map(|raw| raw.to_vec())
        .ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "cmap subtable at {} claims {} bytes, beyond the table end",
                    start, length
                ),
            ))
        })
}

/// Reads the `u16` a format 2 or 4 glyph-index lookup lands on; zero means
/// "missing", anything else has the segment delta applied modulo 65536.
fn read_gid_at(raw: &[u8], at: usize, delta: i16) -> Result<u16, Error> {
    let v = raw
        .get(at..at + 2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("cmap glyph-index lookup at {} is beyond the subtable end", at),
            ))
        })?;
    if v == 0 {
        return Ok(0);
    }
    Ok(((v as i32 + delta as i32) % 65536) as u16)
}

impl<'a> FontTable<'a> for CmapTable {
    type Dep = ();

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        _: Self::Dep,
    ) -> Result<Self, Error> {
        let version = rd.read_u16::<BigEndian>()?;
        let num_tables = rd.read_u16::<BigEndian>()?;

        let mut raw_records = Vec::with_capacity(num_tables.min(8) as usize);
        for _ in 0..num_tables {
            raw_records.push((
                PlatformId(rd.read_u16::<BigEndian>()?),
                EncodingId(rd.read_u16::<BigEndian>()?),
                rd.read_u32::<BigEndian>()?,
            ));
        }

        let mut encoding_records = Vec::with_capacity(raw_records.len());
        for (platform_id, encoding_id, offset) in raw_records {
            rd.set_position(offset as u64);
            encoding_records.push(EncodingRecord {
                platform_id,
                encoding_id,
                subtable: Subtable::unpack(rd)?,
            });
        }

        Ok(CmapTable {
            version,
            encoding_records,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_u16::<BigEndian>(self.version)?;
        wr.write_u16::<BigEndian>(self.encoding_records.len() as u16)?;

        let mut offset = 4 + 8 * self.encoding_records.len() as u32;
        for record in &self.encoding_records {
            wr.write_u16::<BigEndian>(record.platform_id.0)?;
            wr.write_u16::<BigEndian>(record.encoding_id.0)?;
            wr.write_u32::<BigEndian>(offset)?;
            offset += record.subtable.byte_len();
        }
        for record in &self.encoding_records {
            record.subtable.pack(wr)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn put16(data: &mut [u8], at: usize, value: u16) {
        data[at..at + 2].copy_from_slice(&value.to_be_bytes());
    }

    /// A cmap with a single format 6 subtable behind two encoding records
    /// sharing it.
    fn sample_table() -> Vec<u8> {
        let mut data = vec![0u8; 4 + 16 + 14];
        put16(&mut data, 0, 0); // version
        put16(&mut data, 2, 2); // num tables
        put16(&mut data, 4, 0); // platform: Unicode
        put16(&mut data, 6, 3); // encoding: BMP
        data[8..12].copy_from_slice(&20u32.to_be_bytes());
        put16(&mut data, 12, 3); // platform: Windows
        put16(&mut data, 14, 1); // encoding: Unicode BMP
        data[16..20].copy_from_slice(&20u32.to_be_bytes());
        // format 6 subtable at offset 20
        put16(&mut data, 20, 6);
        put16(&mut data, 22, 14); // length
        put16(&mut data, 24, 0); // language
        put16(&mut data, 26, 0x41); // first code
        put16(&mut data, 28, 2); // entry count
        put16(&mut data, 30, 17);
        put16(&mut data, 32, 18);
        data
    }

    #[test]
    fn test_cmap_table_encode_decode() {
        let data = sample_table();
        let cmap = CmapTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap();

        assert_eq!(cmap.version(), 0);
        assert_eq!(cmap.encoding_records().len(), 2);
        let record = &cmap.encoding_records()[0];
        assert_eq!(record.platform_id(), PlatformId::UNICODE);
        assert_eq!(record.subtable().format(), 6);
        assert_eq!(record.subtable().glyph_id(0x41), Some(17));
        assert_eq!(record.subtable().glyph_id(0x43), None);

        // re-pack and compare; the shared subtable is duplicated but the
        // decoded content is unchanged
        let mut buffer = Vec::new();
        cmap.pack(&mut buffer).unwrap();
        assert_eq!(
            CmapTable::unpack(&mut Cursor::new(&buffer[..]), ()).unwrap(),
            cmap
        );
    }

    #[test]
    fn test_cmap_pack_recomputes_offsets() {
        let data = sample_table();
        let cmap = CmapTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap();

        let mut buffer = Vec::new();
        cmap.pack(&mut buffer).unwrap();

        let mut rd = Cursor::new(&buffer[..]);
        rd.set_position(8);
        assert_eq!(rd.read_u32::<BigEndian>().unwrap(), 20);
        rd.set_position(16);
        // the second record now points at its own copy
        assert_eq!(rd.read_u32::<BigEndian>().unwrap(), 34);
    }

    #[test]
    fn test_cmap_rejects_unknown_subtable_format() {
        let mut data = vec![0u8; 4 + 8 + 4];
        put16(&mut data, 0, 0);
        put16(&mut data, 2, 1);
        put16(&mut data, 4, 0);
        put16(&mut data, 6, 3);
        data[8..12].copy_from_slice(&12u32.to_be_bytes());
        put16(&mut data, 12, 8); // format 8 is not supported

        let err = CmapTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCmapFormat(8)));
    }
}
