use std::io::{self, Cursor};

use log::warn;

use crate::builder::Builder;
use crate::error::{Error, TableErrors};
use crate::tables::cmap::CmapTable;
use crate::tables::cvt::CvtTable;
use crate::tables::fpgm::FpgmTable;
use crate::tables::glyf::GlyfTable;
use crate::tables::head::HeadTable;
use crate::tables::hhea::HheaTable;
use crate::tables::hmtx::HmtxTable;
use crate::tables::loca::{LocaFormat, LocaTable};
use crate::tables::maxp::MaxpTable;
use crate::tables::name::NameTable;
use crate::tables::offset::{OffsetTable, SfntVersion, TableRecord};
use crate::tables::prep::PrepTable;
use crate::tables::FontTable;
use crate::types::Tag;
use crate::utils::checksum::checksum;

/// A parsed font: the sfnt version plus the modeled tables. `name`, `head`,
/// `hhea`, `maxp` and `hmtx` are always present; `loca` and `glyf` are
/// present for TrueType outlines; `cmap`, `cvt `, `fpgm` and `prep` are
/// optional. Unmodeled tables are ignored (their record checksums are still
/// verified during parsing).
#[derive(Debug, PartialEq, Clone)]
pub struct Font {
    pub(crate) sfnt_version: SfntVersion,
    pub(crate) name: NameTable,
    pub(crate) cmap: Option<CmapTable>,
    pub(crate) head: HeadTable,
    pub(crate) hhea: HheaTable,
    pub(crate) maxp: MaxpTable,
    pub(crate) hmtx: HmtxTable,
    pub(crate) cvt: Option<CvtTable>,
    pub(crate) fpgm: Option<FpgmTable>,
    pub(crate) prep: Option<PrepTable>,
    pub(crate) loca: Option<LocaTable>,
    pub(crate) glyf: Option<GlyfTable>,
}

impl Font {
    /// Parses a font from a complete font file. Files starting with the
    /// 'ttcf' tag hold multiple fonts and are parsed with
    /// [`FontCollection`](crate::FontCollection) instead.
    pub fn from_slice(data: impl AsRef<[u8]>) -> Result<Font, Error> {
        parse_at(data.as_ref(), 0)
    }

    pub fn sfnt_version(&self) -> SfntVersion {
        self.sfnt_version
    }

    pub fn name(&self) -> &NameTable {
        &self.name
    }

    pub fn cmap(&self) -> Option<&CmapTable> {
        self.cmap.as_ref()
    }

    pub fn head(&self) -> &HeadTable {
        &self.head
    }

    pub fn hhea(&self) -> &HheaTable {
        &self.hhea
    }

    pub fn maxp(&self) -> &MaxpTable {
        &self.maxp
    }

    pub fn hmtx(&self) -> &HmtxTable {
        &self.hmtx
    }

    pub fn cvt(&self) -> Option<&CvtTable> {
        self.cvt.as_ref()
    }

    pub fn fpgm(&self) -> Option<&FpgmTable> {
        self.fpgm.as_ref()
    }

    pub fn prep(&self) -> Option<&PrepTable> {
        self.prep.as_ref()
    }

    pub fn loca(&self) -> Option<&LocaTable> {
        self.loca.as_ref()
    }

    pub fn glyf(&self) -> Option<&GlyfTable> {
        self.glyf.as_ref()
    }

    /// The number of glyphs in the font.
    pub fn num_glyphs(&self) -> u16 {
        self.maxp.num_glyphs()
    }

    /// Tags of the present tables, in the (tag-ascending) order they are
    /// serialized in.
    pub fn tables(&self) -> Vec<Tag> {
        let mut tags = Vec::new();
        if self.cmap.is_some() {
            tags.push(Tag::CMAP);
        }
        if self.cvt.is_some() {
            tags.push(Tag::CVT);
        }
        if self.fpgm.is_some() {
            tags.push(Tag::FPGM);
        }
        if self.glyf.is_some() {
            tags.push(Tag::GLYF);
        }
        tags.push(Tag::HEAD);
        tags.push(Tag::HHEA);
        tags.push(Tag::HMTX);
        if self.loca.is_some() {
            tags.push(Tag::LOCA);
        }
        tags.push(Tag::MAXP);
        tags.push(Tag::NAME);
        if self.prep.is_some() {
            tags.push(Tag::PREP);
        }
        tags
    }

    /// Serializes the font into `wr` as a complete, checksum-valid font
    /// file. The font itself is left untouched.
    pub fn to_writer<W: io::Write>(&self, wr: W) -> Result<(), Error> {
        Builder::new(self).build(wr)
    }

    /// Creates a new font holding the glyphs of `filter`, in filter order.
    ///
    /// Glyph id 0 points at the missing character and should lead the
    /// filter; when it does not, the filter's first entry is repeated at
    /// index 0. 'glyf', 'loca' (always long format afterwards) and 'hmtx'
    /// are rebuilt, `maxp`, `hhea` and `head` are updated copies, and all
    /// other tables carry over unchanged.
    pub fn filter_glyf(&self, filter: &[u16]) -> Result<Font, Error> {
        let glyf = self.glyf.as_ref().ok_or(Error::MissingTable(Tag::GLYF))?;
        if filter.is_empty() {
            return Err(Error::Invariant("glyph filter is empty".into()));
        }

        let mut f = Vec::with_capacity(filter.len() + 1);
        if filter[0] != 0 {
            f.push(filter[0]);
        }
        f.extend_from_slice(filter);

        let num_glyphs = self.maxp.num_glyphs();
        let max_gid = f.iter().copied().max().unwrap_or(0);
        if max_gid >= num_glyphs {
            return Err(Error::GlyphOutOfRange {
                requested: max_gid,
                max: num_glyphs.saturating_sub(1),
            });
        }

        let new_glyf = glyf.filter(&f);
        let new_loca = new_glyf.generate_loca();
        let new_hmtx = self.hmtx.filter(&f);

        let mut head = self.head.clone();
        head.index_to_loc_format = 1;
        let mut hhea = self.hhea.clone();
        hhea.number_of_h_metrics = new_hmtx.h_metrics().len() as u16;

        Ok(Font {
            sfnt_version: self.sfnt_version,
            name: self.name.clone(),
            cmap: self.cmap.clone(),
            head,
            hhea,
            maxp: self.maxp.with_num_glyphs(f.len() as u16),
            hmtx: new_hmtx,
            cvt: self.cvt.clone(),
            fpgm: self.fpgm.clone(),
            prep: self.prep.clone(),
            loca: Some(new_loca),
            glyf: Some(new_glyf),
        })
    }

    /// Checks the cross-table invariants that must hold after a successful
    /// parse and before serialization.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let num_glyphs = self.maxp.num_glyphs() as usize;
        let num_h_metrics = self.hhea.number_of_h_metrics as usize;

        if num_glyphs >= 1 && num_h_metrics == 0 {
            return Err(Error::Invariant(
                "hhea.number_of_h_metrics must be at least 1 for a non-empty glyph set".into(),
            ));
        }
        if self.hmtx.h_metrics().len() != num_h_metrics {
            return Err(Error::Invariant(format!(
                "hmtx holds {} paired records but hhea.number_of_h_metrics is {}",
                self.hmtx.h_metrics().len(),
                num_h_metrics
            )));
        }
        let metrics = self.hmtx.h_metrics().len() + self.hmtx.left_side_bearings().len();
        if metrics != num_glyphs {
            return Err(Error::Invariant(format!(
                "hmtx holds metrics for {} glyphs but maxp.num_glyphs is {}",
                metrics, num_glyphs
            )));
        }

        match (&self.loca, &self.glyf) {
            (Some(loca), Some(glyf)) => {
                if loca.len() != num_glyphs + 1 {
                    return Err(Error::Invariant(format!(
                        "loca holds {} entries but maxp.num_glyphs is {}",
                        loca.len(),
                        num_glyphs
                    )));
                }
                if loca.offsets.windows(2).any(|pair| pair[0] > pair[1]) {
                    return Err(Error::Invariant(
                        "loca offsets must be monotonically non-decreasing".into(),
                    ));
                }
                if glyf.len() != num_glyphs {
                    return Err(Error::Invariant(format!(
                        "glyf holds {} glyphs but maxp.num_glyphs is {}",
                        glyf.len(),
                        num_glyphs
                    )));
                }
                let total = glyf.total_len();
                if loca.get(num_glyphs) != Some(total) {
                    return Err(Error::Invariant(format!(
                        "loca ends at {:?} but the glyf table is {} bytes",
                        loca.get(num_glyphs),
                        total
                    )));
                }
                let short = self.head.index_to_loc_format == 0;
                if short != (loca.format() == LocaFormat::Short) {
                    return Err(Error::Invariant(format!(
                        "head.index_to_loc_format is {} but loca is stored in {:?} form",
                        self.head.index_to_loc_format,
                        loca.format()
                    )));
                }
            }
            (None, None) => {}
            (Some(_), None) => return Err(Error::MissingTable(Tag::GLYF)),
            (None, Some(_)) => return Err(Error::MissingTable(Tag::LOCA)),
        }

        Ok(())
    }
}

/// Tables whose absence (or corruption) aborts parsing; everything else is
/// dropped and reported in an aggregated error.
fn is_required(tag: Tag, true_type: bool) -> bool {
    matches!(tag, Tag::HEAD | Tag::HHEA | Tag::MAXP | Tag::HMTX | Tag::NAME)
        || (true_type && matches!(tag, Tag::LOCA | Tag::GLYF))
}

/// Parses the font whose offset table starts at `offset` (nonzero for
/// members of a font collection; table record offsets are absolute either
/// way).
pub(crate) fn parse_at(data: &[u8], offset: u64) -> Result<Font, Error> {
    let mut cursor = Cursor::new(data);
    cursor.set_position(offset);
    let sfnt_version = SfntVersion::unpack(&mut cursor)?;
    let true_type = match sfnt_version {
        SfntVersion::TrueType | SfntVersion::AppleTrueType => true,
        SfntVersion::Cff => false,
        version => return Err(Error::UnsupportedSfntVersion(version.tag())),
    };

    cursor.set_position(offset);
    let mut offset_table = OffsetTable::unpack(&mut cursor, ())?;

    // validate every record's checksum up front; failures on non-required
    // tables drop the table and are reported together at the end
    let mut errors = TableErrors::new();
    let mut dropped = Vec::new();
    for record in offset_table.records() {
        if let Err(err) = verify_record(data, record) {
            if is_required(record.tag, true_type) {
                return Err(err);
            }
            warn!("dropping {} table: {}", record.tag, err);
            errors.push(record.tag, err);
            dropped.push(record.tag);
        }
    }
    offset_table.records.retain(|r| !dropped.contains(&r.tag));

    let head: HeadTable = offset_table.unpack_required_table(Tag::HEAD, (), &mut cursor)?;
    let hhea: HheaTable = offset_table.unpack_required_table(Tag::HHEA, (), &mut cursor)?;
    let maxp: MaxpTable = offset_table.unpack_required_table(Tag::MAXP, (), &mut cursor)?;
    let name: NameTable = offset_table.unpack_required_table(Tag::NAME, (), &mut cursor)?;
    let hmtx: HmtxTable =
        offset_table.unpack_required_table(Tag::HMTX, (&hhea, &maxp), &mut cursor)?;

    let (loca, glyf, cvt, fpgm, prep) = if true_type {
        let loca: LocaTable =
            offset_table.unpack_required_table(Tag::LOCA, (&head, &maxp), &mut cursor)?;
        let glyf: GlyfTable =
            offset_table.unpack_required_table(Tag::GLYF, &loca, &mut cursor)?;
        let cvt: Option<CvtTable> =
            unpack_optional_table(&offset_table, Tag::CVT, (), &mut cursor, &mut errors);
        let fpgm: Option<FpgmTable> =
            unpack_optional_table(&offset_table, Tag::FPGM, (), &mut cursor, &mut errors);
        let prep: Option<PrepTable> =
            unpack_optional_table(&offset_table, Tag::PREP, (), &mut cursor, &mut errors);
        (Some(loca), Some(glyf), cvt, fpgm, prep)
    } else {
        (None, None, None, None, None)
    };
    let cmap: Option<CmapTable> =
        unpack_optional_table(&offset_table, Tag::CMAP, (), &mut cursor, &mut errors);

    let font = Font {
        sfnt_version,
        name,
        cmap,
        head,
        hhea,
        maxp,
        hmtx,
        cvt,
        fpgm,
        prep,
        loca,
        glyf,
    };
    font.validate()?;

    if !errors.is_empty() {
        return Err(Error::Tables(errors));
    }
    Ok(font)
}

/// Parses a non-required table, dropping it and collecting the failure when
/// it cannot be decoded.
fn unpack_optional_table<'a, T, R>(
    offset_table: &OffsetTable,
    tag: Tag,
    dep: T::Dep,
    cursor: &mut Cursor<R>,
    errors: &mut TableErrors,
) -> Option<T>
where
    R: io::Read + AsRef<[u8]>,
    T: FontTable<'a>,
{
    match offset_table.unpack_table(tag, dep, cursor) {
        Ok(table) => table,
        Err(err) => {
            warn!("dropping {} table: {}", tag, err);
            errors.push(tag, err);
            None
        }
    }
}

/// Recomputes a record's checksum over its padded table region. The 'head'
/// table is summed with its check_sum_adjustment field forced to zero.
fn verify_record(data: &[u8], record: &TableRecord) -> Result<(), Error> {
    let start = record.offset as usize;
    let end = start
        .checked_add(record.length as usize)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} table region is beyond the end of the file", record.tag),
            ))
        })?;

    let actual = if record.tag == Tag::HEAD {
        let mut region = data[start..end].to_vec();
        if region.len() >= 12 {
            region[8..12].copy_from_slice(&[0; 4]);
        }
        checksum(&region)
    } else {
        checksum(&data[start..end])
    };

    if actual != record.check_sum {
        return Err(Error::ChecksumMismatch {
            tag: record.tag,
            expected: record.check_sum,
            actual,
        });
    }
    Ok(())
}
