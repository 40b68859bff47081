use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::Error;
use crate::font::{parse_at, Font};
use crate::types::Tag;

/// Returns true when the file is a font collection ('ttcf') rather than a
/// single font.
pub fn is_font_collection(data: impl AsRef<[u8]>) -> Result<bool, Error> {
    let mut cursor = Cursor::new(data.as_ref());
    Ok(Tag::unpack(&mut cursor)? == Tag::TTCF)
}

/// A font collection: multiple fonts packaged in a single file, each a
/// complete offset table and table set at its own offset. Parse only.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/otff#font-collections
#[derive(Debug, PartialEq)]
pub struct FontCollection {
    pub(crate) major_version: u16,
    pub(crate) minor_version: u16,
    pub(crate) fonts: Vec<Font>,
}

impl FontCollection {
    pub fn from_slice(data: impl AsRef<[u8]>) -> Result<FontCollection, Error> {
        let data = data.as_ref();
        let mut cursor = Cursor::new(data);

        let tag = Tag::unpack(&mut cursor)?;
        if tag != Tag::TTCF {
            return Err(Error::UnsupportedSfntVersion(tag));
        }
        let major_version = cursor.read_u16::<BigEndian>()?;
        let minor_version = cursor.read_u16::<BigEndian>()?;
        let num_fonts = cursor.read_u32::<BigEndian>()?;

        let mut offsets = Vec::with_capacity(num_fonts.min(64) as usize);
        for _ in 0..num_fonts {
            offsets.push(cursor.read_u32::<BigEndian>()?);
        }

        let mut fonts = Vec::with_capacity(offsets.len());
        for offset in offsets {
            fonts.push(parse_at(data, offset as u64)?);
        }

        Ok(FontCollection {
            major_version,
            minor_version,
            fonts,
        })
    }

    pub fn major_version(&self) -> u16 {
        self.major_version
    }

    pub fn minor_version(&self) -> u16 {
        self.minor_version
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }
}
