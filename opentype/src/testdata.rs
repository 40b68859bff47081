//! Shared test fixtures: a small synthetic TrueType font (two glyphs, short
//! 'loca', one byte-encoding cmap) built table by table, plus its serialized
//! file form. No binary font ships with the repository.

use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder};

use crate::font::Font;
use crate::tables::cmap::{CmapTable, EncodingRecord, Format0, Subtable};
use crate::tables::cvt::CvtTable;
use crate::tables::fpgm::FpgmTable;
use crate::tables::glyf::GlyfTable;
use crate::tables::head::HeadTable;
use crate::tables::hhea::HheaTable;
use crate::tables::hmtx::{HmtxTable, LongHorMetric};
use crate::tables::ids::{EncodingId, LanguageId, NameId, PlatformId};
use crate::tables::loca::{LocaFormat, LocaTable};
use crate::tables::maxp::{MaxpTable, TrueTypeMaxpTable};
use crate::tables::name::{NameRecord, NameTable, NameValue};
use crate::tables::offset::{OffsetTable, SfntVersion, TableRecord};
use crate::tables::prep::PrepTable;
use crate::tables::FontTable;
use crate::types::{Fixed, LongDateTime, Tag};

pub(crate) fn sample_head() -> HeadTable {
    HeadTable {
        major_version: 1,
        minor_version: 0,
        font_revision: Fixed::from_bits(0x0001_0000),
        check_sum_adjustment: 0,
        magic_number: 0x5F0F_3CF5,
        flags: 0x000B,
        units_per_em: 1000,
        created: LongDateTime::from_seconds(3562553439),
        modified: LongDateTime::from_seconds(3678044538),
        x_min: -50,
        y_min: -200,
        x_max: 550,
        y_max: 750,
        mac_style: 0,
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: 0,
        glyph_data_format: 0,
    }
}

pub(crate) fn sample_hhea(number_of_h_metrics: u16) -> HheaTable {
    HheaTable {
        major_version: 1,
        minor_version: 0,
        ascender: 750,
        descender: -200,
        line_gap: 67,
        advance_width_max: 600,
        min_left_side_bearing: 0,
        min_right_side_bearing: 0,
        x_max_extent: 550,
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        reserved: [0; 4],
        metric_data_format: 0,
        number_of_h_metrics,
    }
}

pub(crate) fn sample_maxp(num_glyphs: u16) -> MaxpTable {
    MaxpTable::TrueType(TrueTypeMaxpTable {
        version: Fixed::from_bits(0x0001_0000),
        num_glyphs,
        max_points: 12,
        max_contours: 2,
        max_composite_points: 0,
        max_composite_contours: 0,
        max_zones: 2,
        max_twilight_points: 0,
        max_storage: 0,
        max_function_defs: 0,
        max_instruction_defs: 0,
        max_stack_elements: 32,
        max_size_of_instructions: 0,
        max_component_elements: 0,
        max_component_depth: 0,
    })
}

fn sample_name() -> NameTable {
    NameTable {
        format: 0,
        name_records: vec![
            NameRecord {
                platform_id: PlatformId::MACINTOSH,
                encoding_id: EncodingId(0),
                language_id: LanguageId(0),
                name_id: NameId::FONT_FAMILY_NAME,
                value: NameValue::Macintosh(b"Sample".to_vec()),
            },
            NameRecord {
                platform_id: PlatformId::WINDOWS,
                encoding_id: EncodingId(1),
                language_id: LanguageId(0x0409),
                name_id: NameId::FONT_FAMILY_NAME,
                value: NameValue::Unicode("Sample".to_string()),
            },
        ],
        lang_tag_records: Vec::new(),
    }
}

fn sample_cmap() -> CmapTable {
    // a format 0 subtable mapping 'A' and 'B' to the two glyphs
    let mut body = vec![
        0x01, 0x06, // length
        0x00, 0x00, // language
    ];
    let mut array = vec![0u8; 256];
    array[b'A' as usize] = 0;
    array[b'B' as usize] = 1;
    body.extend_from_slice(&array);

    let format0 = Format0::unpack(&mut Cursor::new(&body[..])).unwrap();
    CmapTable {
        version: 0,
        encoding_records: vec![EncodingRecord {
            platform_id: PlatformId::MACINTOSH,
            encoding_id: EncodingId(0),
            subtable: Subtable::Format0(format0),
        }],
    }
}

fn raw_sample_font() -> Font {
    Font {
        sfnt_version: SfntVersion::TrueType,
        name: sample_name(),
        cmap: Some(sample_cmap()),
        head: sample_head(),
        hhea: sample_hhea(2),
        maxp: sample_maxp(2),
        hmtx: HmtxTable {
            h_metrics: vec![
                LongHorMetric {
                    advance_width: 500,
                    lsb: 0,
                },
                LongHorMetric {
                    advance_width: 600,
                    lsb: 40,
                },
            ],
            left_side_bearings: Vec::new(),
        },
        cvt: Some(CvtTable {
            values: vec![68, -70, 256],
        }),
        fpgm: Some(FpgmTable {
            instructions: vec![0xB0, 0x01, 0x2C],
        }),
        prep: Some(PrepTable {
            instructions: vec![0xB9, 0x01, 0xFF],
        }),
        loca: Some(LocaTable {
            offsets: vec![0, 6, 14],
            format: LocaFormat::Short,
        }),
        glyf: Some(GlyfTable {
            data: vec![vec![1, 2, 3, 4, 5, 6], vec![7, 8, 9, 10, 11, 12, 13, 14]],
        }),
    }
}

/// The synthetic two-glyph font. Its `head.check_sum_adjustment` carries
/// the value the serializer computes for it, so serializing and re-parsing
/// reproduces the font field for field.
pub(crate) fn sample_font() -> Font {
    let mut font = raw_sample_font();
    let mut buffer = Vec::new();
    font.to_writer(&mut buffer).unwrap();
    font.head.check_sum_adjustment = Font::from_slice(&buffer)
        .unwrap()
        .head
        .check_sum_adjustment;
    font
}

/// The serialized form of [`sample_font`].
pub(crate) fn sample_file() -> Vec<u8> {
    let mut buffer = Vec::new();
    sample_font().to_writer(&mut buffer).unwrap();
    buffer
}

/// The table record for `tag` in a serialized font file.
pub(crate) fn find_record(data: &[u8], tag: Tag) -> TableRecord {
    let offset_table = OffsetTable::unpack(&mut Cursor::new(data), ()).unwrap();
    offset_table
        .record(tag)
        .unwrap_or_else(|| panic!("{} record not found", tag))
        .clone()
}

/// A 'ttcf' file holding [`sample_font`] twice (both directory offsets
/// point at the same member).
pub(crate) fn sample_collection_file() -> Vec<u8> {
    let mut member = sample_file();

    // table record offsets are measured from the start of the file; shift
    // them past the collection header
    let base = 20u32;
    let num_tables = BigEndian::read_u16(&member[4..6]) as usize;
    for i in 0..num_tables {
        let at = 12 + 16 * i + 8;
        let offset = BigEndian::read_u32(&member[at..at + 4]);
        BigEndian::write_u32(&mut member[at..at + 4], offset + base);
    }

    let mut data = Vec::with_capacity(base as usize + member.len());
    data.extend_from_slice(b"ttcf");
    data.extend_from_slice(&1u16.to_be_bytes()); // major version
    data.extend_from_slice(&0u16.to_be_bytes()); // minor version
    data.extend_from_slice(&2u32.to_be_bytes()); // num fonts
    data.extend_from_slice(&base.to_be_bytes());
    data.extend_from_slice(&base.to_be_bytes());
    data.extend_from_slice(&member);
    data
}
