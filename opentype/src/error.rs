use std::fmt;
use std::io;

use thiserror::Error;

use crate::types::Tag;

/// Errors reported while parsing, subsetting or writing a font.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying byte source failed or ended early.
    #[error("error reading font data")]
    Io(#[from] io::Error),
    /// A table record's checksum disagreed with the recomputed value.
    #[error("table {tag} has invalid checksum, expected: {expected}, actual: {actual}")]
    ChecksumMismatch { tag: Tag, expected: u32, actual: u32 },
    /// The top-level sfnt version is not one of the recognized tags.
    #[error("{0} is not a supported sfnt version")]
    UnsupportedSfntVersion(Tag),
    /// A cmap subtable declared a format other than 0, 2, 4, 6 or 12.
    #[error("cmap subtable format {0} is not supported")]
    UnsupportedCmapFormat(u16),
    /// A table referenced by another table (or required outright) is absent.
    #[error("{0} table is missing")]
    MissingTable(Tag),
    /// A cross-table invariant does not hold.
    #[error("invariant violation: {0}")]
    Invariant(String),
    /// A glyph filter referenced a glyph beyond the font's glyph count.
    #[error("glyph id {requested} exceeds the maximum glyph id {max}")]
    GlyphOutOfRange { requested: u16, max: u16 },
    /// The serialization sink failed.
    #[error("error writing font file")]
    Write(#[source] io::Error),
    /// Failures collected across optional tables; the affected tables were
    /// dropped but parsing carried on so all problems surface at once.
    #[error("parsing font failed: [{0}]")]
    Tables(TableErrors),
}

/// Per-table failures, keyed by table tag.
#[derive(Debug, Default)]
pub struct TableErrors {
    errors: Vec<(Tag, Error)>,
}

impl TableErrors {
    pub(crate) fn new() -> Self {
        TableErrors::default()
    }

    pub(crate) fn push(&mut self, tag: Tag, err: Error) {
        self.errors.push((tag, err));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = (Tag, &Error)> {
        self.errors.iter().map(|(tag, err)| (*tag, err))
    }
}

impl fmt::Display for TableErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (tag, err)) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", tag, err)?;
        }
        Ok(())
    }
}
