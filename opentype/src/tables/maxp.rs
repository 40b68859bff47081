use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;
use crate::tables::FontTable;
use crate::types::Fixed;

/// Version 0.5 of the table, used for fonts without TrueType outlines.
const VERSION_0_5: i32 = 0x00005000;

/// The maxima table, most importantly the canonical glyph count. Version 0.5
/// (a 6-byte body holding only the glyph count) is selected iff the version
/// field equals 0x00005000; any other version carries the full 32-byte
/// TrueType body.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/maxp
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6maxp.html
#[derive(Debug, PartialEq, Clone)]
pub enum MaxpTable {
    /// Version 0.5.
    Cff(CffMaxpTable),
    /// Version 1.0.
    TrueType(TrueTypeMaxpTable),
}

#[derive(Debug, PartialEq, Clone)]
pub struct CffMaxpTable {
    /// The number of glyphs in the font.
    pub(crate) num_glyphs: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct TrueTypeMaxpTable {
    pub(crate) version: Fixed,
    /// The number of glyphs in the font.
    pub(crate) num_glyphs: u16,
    /// Maximum points in a non-composite glyph.
    pub(crate) max_points: u16,
    /// Maximum contours in a non-composite glyph.
    pub(crate) max_contours: u16,
    /// Maximum points in a composite glyph.
    pub(crate) max_composite_points: u16,
    /// Maximum contours in a composite glyph.
    pub(crate) max_composite_contours: u16,
    /// 1 if instructions do not use the twilight zone (Z0), 2 otherwise.
    pub(crate) max_zones: u16,
    /// Maximum points used in Z0.
    pub(crate) max_twilight_points: u16,
    /// Number of Storage Area locations.
    pub(crate) max_storage: u16,
    /// Number of FDEFs, equal to the highest function number + 1.
    pub(crate) max_function_defs: u16,
    /// Number of IDEFs.
    pub(crate) max_instruction_defs: u16,
    /// Maximum stack depth.
    pub(crate) max_stack_elements: u16,
    /// Maximum byte count for glyph instructions.
    pub(crate) max_size_of_instructions: u16,
    /// Maximum number of components referenced at top level for any
    /// composite glyph.
    pub(crate) max_component_elements: u16,
    /// Maximum levels of recursion; 1 for simple components.
    pub(crate) max_component_depth: u16,
}

impl MaxpTable {
    pub fn num_glyphs(&self) -> u16 {
        match self {
            MaxpTable::Cff(table) => table.num_glyphs,
            MaxpTable::TrueType(table) => table.num_glyphs,
        }
    }

    /// A copy of the table with the glyph count replaced.
    pub(crate) fn with_num_glyphs(&self, num_glyphs: u16) -> MaxpTable {
        match self {
            MaxpTable::Cff(_) => MaxpTable::Cff(CffMaxpTable { num_glyphs }),
            MaxpTable::TrueType(table) => MaxpTable::TrueType(TrueTypeMaxpTable {
                num_glyphs,
                ..table.clone()
            }),
        }
    }
}

impl<'a> FontTable<'a> for MaxpTable {
    type Dep = ();

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        _: Self::Dep,
    ) -> Result<Self, Error> {
        let version = Fixed::unpack(rd)?;
        if version.to_bits() == VERSION_0_5 {
            return Ok(MaxpTable::Cff(CffMaxpTable {
                num_glyphs: rd.read_u16::<BigEndian>()?,
            }));
        }
        Ok(MaxpTable::TrueType(TrueTypeMaxpTable {
            version,
            num_glyphs: rd.read_u16::<BigEndian>()?,
            max_points: rd.read_u16::<BigEndian>()?,
            max_contours: rd.read_u16::<BigEndian>()?,
            max_composite_points: rd.read_u16::<BigEndian>()?,
            max_composite_contours: rd.read_u16::<BigEndian>()?,
            max_zones: rd.read_u16::<BigEndian>()?,
            max_twilight_points: rd.read_u16::<BigEndian>()?,
            max_storage: rd.read_u16::<BigEndian>()?,
            max_function_defs: rd.read_u16::<BigEndian>()?,
            max_instruction_defs: rd.read_u16::<BigEndian>()?,
            max_stack_elements: rd.read_u16::<BigEndian>()?,
            max_size_of_instructions: rd.read_u16::<BigEndian>()?,
            max_component_elements: rd.read_u16::<BigEndian>()?,
            max_component_depth: rd.read_u16::<BigEndian>()?,
        }))
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        match self {
            MaxpTable::Cff(table) => {
                Fixed::from_bits(VERSION_0_5).pack(wr)?;
                wr.write_u16::<BigEndian>(table.num_glyphs)?;
            }
            MaxpTable::TrueType(table) => {
                table.version.pack(wr)?;
                wr.write_u16::<BigEndian>(table.num_glyphs)?;
                wr.write_u16::<BigEndian>(table.max_points)?;
                wr.write_u16::<BigEndian>(table.max_contours)?;
                wr.write_u16::<BigEndian>(table.max_composite_points)?;
                wr.write_u16::<BigEndian>(table.max_composite_contours)?;
                wr.write_u16::<BigEndian>(table.max_zones)?;
                wr.write_u16::<BigEndian>(table.max_twilight_points)?;
                wr.write_u16::<BigEndian>(table.max_storage)?;
                wr.write_u16::<BigEndian>(table.max_function_defs)?;
                wr.write_u16::<BigEndian>(table.max_instruction_defs)?;
                wr.write_u16::<BigEndian>(table.max_stack_elements)?;
                wr.write_u16::<BigEndian>(table.max_size_of_instructions)?;
                wr.write_u16::<BigEndian>(table.max_component_elements)?;
                wr.write_u16::<BigEndian>(table.max_component_depth)?;
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
    fn test_maxp_table_true_type_encode_decode() {
        let maxp = testdata::sample_maxp(2);

        let mut buffer = Vec::new();
        maxp.pack(&mut buffer).unwrap();
        assert_eq!(buffer.len(), 32);

        // re-pack and compare
        assert_eq!(
            MaxpTable::unpack(&mut Cursor::new(&buffer[..]), ()).unwrap(),
            maxp
        );
    }

    #[test]
    fn test_maxp_table_cff_encode_decode() {
        let data = vec![
            0x00, 0x00, 0x50, 0x00, // version 0.5
            0x22, 0xC2, // num glyphs
        ];
        let maxp = MaxpTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap();

        match &maxp {
            MaxpTable::Cff(table) => assert_eq!(table.num_glyphs, 8898),
            MaxpTable::TrueType(_) => panic!("Expected version 0.5 maxp table"),
        }
        assert_eq!(maxp.num_glyphs(), 8898);

        // re-pack and compare
        let mut buffer = Vec::new();
        maxp.pack(&mut buffer).unwrap();
        assert_eq!(buffer, data);
    }

    #[test]
    fn test_maxp_with_num_glyphs() {
        let maxp = testdata::sample_maxp(42);
        let updated = maxp.with_num_glyphs(3);
        assert_eq!(updated.num_glyphs(), 3);
        match (maxp, updated) {
            (MaxpTable::TrueType(before), MaxpTable::TrueType(after)) => {
                assert_eq!(before.max_points, after.max_points);
                assert_eq!(before.version, after.version);
            }
            _ => panic!("Expected version 1.0 maxp tables"),
        }
    }
}
