pub mod cmap;
pub mod cvt;
pub mod fpgm;
pub mod glyf;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod ids;
pub mod loca;
pub mod maxp;
pub mod name;
pub mod offset;
pub mod prep;

use std::io::{self, Cursor};

use crate::error::Error;

/// A table of the font file.
///
/// Tables unpack from their recorded byte region, materialized into a cursor
/// so that decoding can seek (cmap subtable offsets, name string storage),
/// and pack into any writer. `Dep` names the already-parsed tables whose
/// values the layout depends on (e.g. 'loca' needs `head.index_to_loc_format`
/// and `maxp.num_glyphs`).
pub trait FontTable<'a>: Sized {
    type Dep;

    fn unpack<R: io::Read + AsRef<[u8]>>(rd: &mut Cursor<R>, dep: Self::Dep)
        -> Result<Self, Error>;
    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error>;
}
