//! An OpenType/TrueType font file codec: parses the SFNT container into
//! typed tables, supports glyph subsetting, and writes byte-exact,
//! checksum-valid font files.
//!
//! ```no_run
//! use opentype::Font;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("font.ttf")?;
//! let font = Font::from_slice(&data)?;
//!
//! let subset = font.filter_glyf(&[0, 36, 37, 38])?;
//! let mut out = Vec::new();
//! subset.to_writer(&mut out)?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod font;
pub mod tables;
#[cfg(test)]
mod testdata;
mod ttc;
mod types;
mod utils;

pub use crate::error::{Error, TableErrors};
pub use crate::font::Font;
pub use crate::tables::offset::SfntVersion;
pub use crate::ttc::{is_font_collection, FontCollection};
pub use crate::types::{Fixed, LongDateTime, Tag};
