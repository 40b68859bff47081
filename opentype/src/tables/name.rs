use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;
use crate::tables::ids::{EncodingId, LanguageId, NameId, PlatformId};
use crate::tables::FontTable;
use crate::utils::limit_read::LimitRead;

/// The naming table: multilingual strings associated with the font, such as
/// the family name, copyright notice and sample text. Format 1 additionally
/// carries language-tag records for language ids at and above 0x8000.
///
/// Records and the string storage area are decoded into values at parse
/// time; the storage layout (string offset and the per-record offset/length
/// fields) is recomputed when packing, so the emitted record fields always
/// agree with the emitted storage.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/name
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6name.html
#[derive(Debug, PartialEq, Clone)]
pub struct NameTable {
    pub(crate) format: u16,
    pub(crate) name_records: Vec<NameRecord>,
    /// Only present for format 1.
    pub(crate) lang_tag_records: Vec<LangTagRecord>,
}

/// Platform specific metadata string of the font.
#[derive(Debug, PartialEq, Clone)]
pub struct NameRecord {
    pub(crate) platform_id: PlatformId,
    pub(crate) encoding_id: EncodingId,
    pub(crate) language_id: LanguageId,
    pub(crate) name_id: NameId,
    pub(crate) value: NameValue,
}

/// A name record's string value. Macintosh-platform strings use a
/// single-byte legacy encoding and are preserved verbatim; all other
/// platforms store big-endian UTF-16.
#[derive(Debug, PartialEq, Clone)]
pub enum NameValue {
    Macintosh(Vec<u8>),
    Unicode(String),
}

impl NameValue {
    /// The string, when it is not a legacy Macintosh byte string.
    pub fn as_unicode(&self) -> Option<&str> {
        match self {
            NameValue::Macintosh(_) => None,
            NameValue::Unicode(value) => Some(value),
        }
    }

    fn byte_len(&self) -> usize {
        match self {
            NameValue::Macintosh(bytes) => bytes.len(),
            NameValue::Unicode(value) => value.encode_utf16().count() * 2,
        }
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        match self {
            NameValue::Macintosh(bytes) => wr.write_all(bytes),
            NameValue::Unicode(value) => {
                for unit in value.encode_utf16() {
                    wr.write_u16::<BigEndian>(unit)?;
                }
                Ok(())
            }
        }
    }
}

/// A language tag for language ids within 0x8000..0x8000 + langTagCount.
#[derive(Debug, PartialEq, Clone)]
pub struct LangTagRecord {
    /// An IETF BCP 47 tag such as "en-US", stored as UTF-16BE.
    pub(crate) value: String,
}

impl NameRecord {
    pub fn platform_id(&self) -> PlatformId {
        self.platform_id
    }

    pub fn encoding_id(&self) -> EncodingId {
        self.encoding_id
    }

    pub fn language_id(&self) -> LanguageId {
        self.language_id
    }

    pub fn name_id(&self) -> NameId {
        self.name_id
    }

    pub fn value(&self) -> &NameValue {
        &self.value
    }
}

impl NameTable {
    pub fn format(&self) -> u16 {
        self.format
    }

    pub fn name_records(&self) -> &[NameRecord] {
        &self.name_records
    }

    pub fn lang_tags(&self) -> impl Iterator<Item = &str> {
        self.lang_tag_records.iter().map(|r| r.value.as_str())
    }

    /// The first value stored for `name_id`, preferring records whose value
    /// decodes as Unicode.
    pub fn find(&self, name_id: NameId) -> Option<&NameValue> {
        let records = self.name_records.iter().filter(|r| r.name_id == name_id);
        records
            .clone()
            .find(|r| matches!(r.value, NameValue::Unicode(_)))
            .or_else(|| records.clone().next())
            .map(|r| &r.value)
    }
}

/// The record fields as laid out in the file; values are resolved against
/// the storage area in a second pass.
struct RawNameRecord {
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: u16,
    length: u16,
    offset: u16,
}

impl<'a> FontTable<'a> for NameTable {
    type Dep = ();

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        _: Self::Dep,
    ) -> Result<Self, Error> {
        let format = rd.read_u16::<BigEndian>()?;
        let count = rd.read_u16::<BigEndian>()?;
        let string_offset = rd.read_u16::<BigEndian>()?;

        let mut raw_records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            raw_records.push(RawNameRecord {
                platform_id: rd.read_u16::<BigEndian>()?,
                encoding_id: rd.read_u16::<BigEndian>()?,
                language_id: rd.read_u16::<BigEndian>()?,
                name_id: rd.read_u16::<BigEndian>()?,
                length: rd.read_u16::<BigEndian>()?,
                offset: rd.read_u16::<BigEndian>()?,
            });
        }

        let mut raw_lang_tags = Vec::new();
        if format == 1 {
            let lang_tag_count = rd.read_u16::<BigEndian>()?;
            for _ in 0..lang_tag_count {
                let length = rd.read_u16::<BigEndian>()?;
                let offset = rd.read_u16::<BigEndian>()?;
                raw_lang_tags.push((length, offset));
            }
        }

        let mut name_records = Vec::with_capacity(raw_records.len());
        for raw in raw_records {
            let platform_id = PlatformId(raw.platform_id);
            rd.set_position(string_offset as u64 + raw.offset as u64);
            let bytes = LimitRead::from_cursor(rd, raw.length as usize)?;
            let value = if platform_id == PlatformId::MACINTOSH {
                NameValue::Macintosh(bytes)
            } else {
                NameValue::Unicode(decode_utf16_be(&bytes))
            };
            name_records.push(NameRecord {
                platform_id,
                encoding_id: EncodingId(raw.encoding_id),
                language_id: LanguageId(raw.language_id),
                name_id: NameId(raw.name_id),
                value,
            });
        }

        let mut lang_tag_records = Vec::with_capacity(raw_lang_tags.len());
        for (length, offset) in raw_lang_tags {
            rd.set_position(string_offset as u64 + offset as u64);
            let bytes = LimitRead::from_cursor(rd, length as usize)?;
            lang_tag_records.push(LangTagRecord {
                value: decode_utf16_be(&bytes),
            });
        }

        Ok(NameTable {
            format,
            name_records,
            lang_tag_records,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        let count = self.name_records.len() as u16;
        let string_offset = 6
            + 12 * count as u32
            + if self.format == 1 {
                2 + 4 * self.lang_tag_records.len() as u32
            } else {
                0
            };

        wr.write_u16::<BigEndian>(self.format)?;
        wr.write_u16::<BigEndian>(count)?;
        wr.write_u16::<BigEndian>(string_offset as u16)?;

        // storage is laid out sequentially in record order, name records
        // first, language tags after
        let mut offset = 0usize;
        for record in &self.name_records {
            wr.write_u16::<BigEndian>(record.platform_id.0)?;
            wr.write_u16::<BigEndian>(record.encoding_id.0)?;
            wr.write_u16::<BigEndian>(record.language_id.0)?;
            wr.write_u16::<BigEndian>(record.name_id.0)?;
            wr.write_u16::<BigEndian>(record.value.byte_len() as u16)?;
            wr.write_u16::<BigEndian>(offset as u16)?;
            offset += record.value.byte_len();
        }

        if self.format == 1 {
            wr.write_u16::<BigEndian>(self.lang_tag_records.len() as u16)?;
            for record in &self.lang_tag_records {
                let length = record.value.encode_utf16().count() * 2;
                wr.write_u16::<BigEndian>(length as u16)?;
                wr.write_u16::<BigEndian>(offset as u16)?;
                offset += length;
            }
        }

        for record in &self.name_records {
            record.value.pack(wr)?;
        }
        if self.format == 1 {
            for record in &self.lang_tag_records {
                for unit in record.value.encode_utf16() {
                    wr.write_u16::<BigEndian>(unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Big-endian UTF-16 bytes to a string; `length` fields are byte counts, so
/// the code-unit count is the byte count halved. Unpaired surrogates decode
/// to U+FFFD.
fn decode_utf16_be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
