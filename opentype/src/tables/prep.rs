use std::io::{self, Cursor, Read};

use crate::error::Error;
use crate::tables::FontTable;

/// The control value program, run whenever the point size or transformation
/// changes. Carried as opaque instruction bytes.
/// See spec: https://docs.microsoft.com/en-us/typography/opentype/spec/prep
#[derive(Debug, PartialEq, Clone)]
pub struct PrepTable {
    pub(crate) instructions: Vec<u8>,
}

impl PrepTable {
    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }
}

impl<'a> FontTable<'a> for PrepTable {
    type Dep = ();

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        _: Self::Dep,
    ) -> Result<Self, Error> {
        let mut instructions = Vec::new();
        rd.read_to_end(&mut instructions)?;
        Ok(PrepTable { instructions })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_all(&self.instructions)
    }
}
