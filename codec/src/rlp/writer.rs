/// Growable output buffer.
///
/// A child writer shares nothing with its parent; the parent picks its bytes up with
/// [`Writer::append`] once the child is complete. List encoding relies on this to learn the
/// payload length before writing the list header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn length(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn new_child(&self) -> Writer {
        Writer::new()
    }

    pub fn append(&mut self, child: Writer) {
        if self.buf.is_empty() {
            self.buf = child.buf;
        } else {
            self.buf.extend_from_slice(&child.buf);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn result(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_writer_is_independent() {
        let mut writer = Writer::new();
        writer.write_byte(255);
        assert_eq!(writer.length(), 1);

        let mut child = writer.new_child();
        assert_eq!(child.length(), 0);
        child.write_byte(16);
        assert_eq!(writer.length(), 1);

        writer.append(child);
        assert_eq!(writer.result(), vec![255, 16]);
    }

    #[test]
    fn append_into_empty_parent() {
        let mut parent = Writer::new();
        let mut child = parent.new_child();
        child.write_bytes(&[1, 2, 3]);
        parent.append(child);
        parent.write_bytes(&[4]);

        assert_eq!(parent.as_bytes(), &[1, 2, 3, 4]);
    }
}
