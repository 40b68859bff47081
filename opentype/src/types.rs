use std::fmt;
use std::io;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// A four-byte identifier used for table names and sfnt versions. A tag is
/// both a 32-bit big-endian value and a four-character ASCII string; spaces
/// are significant (e.g. `"cvt "`). Tags order by byte value, which is the
/// ASCII-ascending order the table directory is sorted by.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(u32);

impl Tag {
    pub const CMAP: Tag = Tag::new(b"cmap");
    pub const CVT: Tag = Tag::new(b"cvt ");
    pub const FPGM: Tag = Tag::new(b"fpgm");
    pub const GLYF: Tag = Tag::new(b"glyf");
    pub const HEAD: Tag = Tag::new(b"head");
    pub const HHEA: Tag = Tag::new(b"hhea");
    pub const HMTX: Tag = Tag::new(b"hmtx");
    pub const LOCA: Tag = Tag::new(b"loca");
    pub const MAXP: Tag = Tag::new(b"maxp");
    pub const NAME: Tag = Tag::new(b"name");
    pub const PREP: Tag = Tag::new(b"prep");
    pub const TTCF: Tag = Tag::new(b"ttcf");

    pub const fn new(bytes: &[u8; 4]) -> Self {
        Tag(((bytes[0] as u32) << 24)
            | ((bytes[1] as u32) << 16)
            | ((bytes[2] as u32) << 8)
            | (bytes[3] as u32))
    }

    pub const fn from_u32(value: u32) -> Self {
        Tag(value)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [
            (self.0 >> 24) as u8,
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
        ]
    }

    pub(crate) fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        Ok(Tag(rd.read_u32::<BigEndian>()?))
    }

    pub(crate) fn pack<W: io::Write>(self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_u32::<BigEndian>(self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // tags from broken fonts can hold arbitrary bytes; keep them printable
        for b in &self.to_bytes() {
            for c in std::ascii::escape_default(*b) {
                write!(f, "{}", c as char)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

/// A 32-bit signed fixed-point number (16.16), used for version fields and
/// `head.font_revision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fixed(i32);

impl Fixed {
    pub const fn from_bits(bits: i32) -> Self {
        Fixed(bits)
    }

    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// The integral half of the value.
    pub fn integer(self) -> i16 {
        (self.0 >> 16) as i16
    }

    /// The fractional half, in 1/65536 units.
    pub fn fraction(self) -> u16 {
        self.0 as u16
    }

    pub(crate) fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        Ok(Fixed(rd.read_i32::<BigEndian>()?))
    }

    pub(crate) fn pack<W: io::Write>(self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_i32::<BigEndian>(self.0)
    }
}

/// A date expressed as the number of seconds since 12:00 midnight,
/// January 1st 1904, UTC; stored as a signed 64-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LongDateTime(i64);

impl LongDateTime {
    pub const fn from_seconds(seconds: i64) -> Self {
        LongDateTime(seconds)
    }

    pub const fn as_seconds(self) -> i64 {
        self.0
    }

    pub(crate) fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        Ok(LongDateTime(rd.read_i64::<BigEndian>()?))
    }

    pub(crate) fn pack<W: io::Write>(self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_i64::<BigEndian>(self.0)
    }
}
