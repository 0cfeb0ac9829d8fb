use crate::error::UnderflowError;

/// Cursor over a borrowed byte buffer.
///
/// Several top-level decode calls may share one reader: each call starts where the previous one
/// stopped, and nothing is copied until a caller asks for owned bytes.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn consumed(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek_byte(&self) -> Result<u8, UnderflowError> {
        self.buf.get(self.pos).copied().ok_or(UnderflowError {
            wanted: 1,
            remaining: 0,
        })
    }

    pub fn read_byte(&mut self) -> Result<u8, UnderflowError> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Ok(byte)
    }

    /// Fails without moving the cursor when `n` exceeds what is left.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], UnderflowError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(UnderflowError {
                wanted: n,
                remaining,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;

        Ok(bytes)
    }

    /// Unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}
