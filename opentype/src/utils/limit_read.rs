use std::io::{self, Read};

/// A reader that stops after `limit` bytes of the underlying source.
pub struct LimitRead<T: io::Read> {
    inner: T,
    limit: usize,
    already_read: usize,
}

impl<T> LimitRead<T>
where
    T: io::Read,
{
    pub fn new(inner: T, limit: usize) -> Self {
        Self {
            inner,
            limit,
            already_read: 0,
        }
    }

    /// Materializes the next `limit` bytes of `rd` into an owned buffer, so
    /// that a table region can be decoded with random access (subtable
    /// offsets, string storage). A source that ends before `limit` bytes is
    /// an error.
    pub fn from_cursor(rd: &mut T, limit: usize) -> Result<Vec<u8>, io::Error> {
        let mut buf = Vec::with_capacity(limit.min(1 << 20));
        LimitRead::new(rd, limit).read_to_end(&mut buf)?;
        if buf.len() < limit {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("table region truncated, expected {} bytes", limit),
            ));
        }
        Ok(buf)
    }
}

impl<T> io::Read for LimitRead<T>
where
    T: io::Read,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.already_read == self.limit {
            return Ok(0);
        }

        let cap = buf.len().min(self.limit - self.already_read);
        let n = self.inner.read(&mut buf[..cap])?;
        self.already_read += n;
        Ok(n)
    }
}
