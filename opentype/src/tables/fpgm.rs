use std::io::{self, Cursor, Read};

use crate::error::Error;
use crate::tables::FontTable;

/// The font program, run once when the font is first used. Carried as
/// opaque instruction bytes.
/// See spec: https://docs.microsoft.com/en-us/typography/opentype/spec/fpgm
#[derive(Debug, PartialEq, Clone)]
pub struct FpgmTable {
    pub(crate) instructions: Vec<u8>,
}

impl FpgmTable {
    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }
}

impl<'a> FontTable<'a> for FpgmTable {
    type Dep = ();

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        _: Self::Dep,
    ) -> Result<Self, Error> {
        let mut instructions = Vec::new();
        rd.read_to_end(&mut instructions)?;
        Ok(FpgmTable { instructions })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_all(&self.instructions)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fpgm_table_encode_decode() {
        let data = vec![0xB0, 0x01, 0x2C, 0xB0, 0x02];
        let table = FpgmTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap();
        assert_eq!(table.instructions, data);

        // re-pack and compare
        let mut buffer = Vec::new();
        table.pack(&mut buffer).unwrap();
        assert_eq!(buffer, data);
    }
}
