use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;
use crate::tables::FontTable;

/// The control value table: a list of values that can be referenced by
/// instructions. The entry count is the table length divided by two.
/// See spec: https://docs.microsoft.com/en-us/typography/opentype/spec/cvt
#[derive(Debug, PartialEq, Clone)]
pub struct CvtTable {
    pub(crate) values: Vec<i16>,
}

impl CvtTable {
    pub fn values(&self) -> &[i16] {
        &self.values
    }
}

impl<'a> FontTable<'a> for CvtTable {
    type Dep = ();

    fn unpack<R: io::Read + AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        _: Self::Dep,
    ) -> Result<Self, Error> {
        let remaining = rd.get_ref().as_ref().len().saturating_sub(rd.position() as usize);
        let mut values = vec![0; remaining / 2];
        rd.read_i16_into::<BigEndian>(&mut values)?;
        Ok(CvtTable { values })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        for value in &self.values {
            wr.write_i16::<BigEndian>(*value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cvt_table_encode_decode() {
        let data = vec![0x00, 0x44, 0xFF, 0xBA, 0x01, 0x00];
        let table = CvtTable::unpack(&mut Cursor::new(&data[..]), ()).unwrap();
        assert_eq!(table.values, vec![0x44, -0x46, 0x100]);

        // re-pack and compare
        let mut buffer = Vec::new();
        table.pack(&mut buffer).unwrap();
        assert_eq!(buffer, data);
    }
}
