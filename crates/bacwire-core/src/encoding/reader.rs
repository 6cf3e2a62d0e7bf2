use crate::encoding::tag::{Tag, TagClass};
use crate::DecodeError;

/// How a read behaves when it fails or succeeds.
///
/// `optional` turns a failed read into `Ok(None)` and restores the cursor.
/// `silent` restores the cursor even on success, which makes the read a peek.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub optional: bool,
    pub silent: bool,
}

impl ReadOptions {
    pub const REQUIRED: Self = Self {
        optional: false,
        silent: false,
    };
    pub const OPTIONAL: Self = Self {
        optional: true,
        silent: false,
    };
    pub const PEEK: Self = Self {
        optional: true,
        silent: true,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek_u8(&self) -> Result<u8, DecodeError> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEof)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek_u8()?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEof);
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..start + len])
    }

    pub fn read_be_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_exact(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_be_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_exact(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a big-endian unsigned integer of 1 to 4 bytes.
    pub fn read_be_uint(&mut self, len: usize) -> Result<u32, DecodeError> {
        if len == 0 || len > 4 {
            return Err(DecodeError::InvalidLength);
        }
        let bytes = self.read_exact(len)?;
        Ok(bytes.iter().fold(0u32, |acc, b| (acc << 8) | *b as u32))
    }

    pub fn read_be_f32(&mut self) -> Result<f32, DecodeError> {
        self.read_be_u32().map(f32::from_bits)
    }

    /// Reads `len` bytes as UTF-8.
    pub fn read_string(&mut self, len: usize) -> Result<&'a str, DecodeError> {
        let bytes = self.read_exact(len)?;
        core::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidValue)
    }

    /// Sub-slice of the underlying buffer, independent of the cursor.
    pub fn range(&self, start: usize, end: usize) -> Result<&'a [u8], DecodeError> {
        if start > end {
            return Err(DecodeError::InvalidLength);
        }
        self.buf.get(start..end).ok_or(DecodeError::UnexpectedEof)
    }

    /// Everything from the cursor to the end of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos.min(self.buf.len())..]
    }

    /// Runs `op` under `opts`.
    ///
    /// Returns `Ok(None)` only for an optional read that failed; the cursor is
    /// then back where it started.
    pub fn read_with<T>(
        &mut self,
        opts: ReadOptions,
        op: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        let checkpoint = *self;
        let result = op(self);
        if opts.silent {
            *self = checkpoint;
        }
        match result {
            Ok(value) => Ok(Some(value)),
            Err(_) if opts.optional => {
                *self = checkpoint;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// The next tag, without consuming it. `None` at end of input or on a
    /// malformed tag.
    pub fn peek_tag(&self) -> Option<Tag> {
        let mut probe = *self;
        probe.read_with(ReadOptions::PEEK, Tag::decode).ok().flatten()
    }

    /// Whether the next tag has this number and class.
    pub fn is_tag(&self, number: u8, class: TagClass) -> bool {
        self.peek_tag()
            .is_some_and(|tag| tag.number() == number && tag.class() == class)
    }
}

#[cfg(test)]
mod tests {
    use super::{ReadOptions, Reader};
    use crate::encoding::tag::{AppTag, Tag, TagClass};
    use crate::DecodeError;

    #[test]
    fn reader_reads_values() {
        let mut r = Reader::new(&[1, 2, 3, 4, 5]);
        assert_eq!(r.read_u8().unwrap(), 1);
        assert_eq!(r.read_exact(2).unwrap(), &[2, 3]);
        assert_eq!(r.remaining(), 2);
    }

    #[test]
    fn reader_bounds() {
        let mut r = Reader::new(&[1]);
        assert_eq!(r.read_u8().unwrap(), 1);
        assert_eq!(r.read_u8().unwrap_err(), DecodeError::UnexpectedEof);
    }

    #[test]
    fn reads_variable_width_unsigned() {
        let mut r = Reader::new(&[0x04, 0x93, 0xe0, 0x12, 0x11]);
        assert_eq!(r.read_be_uint(3).unwrap(), 300_000);
        assert_eq!(r.read_be_uint(2).unwrap(), 0x1211);
        assert_eq!(
            Reader::new(&[0; 8]).read_be_uint(5).unwrap_err(),
            DecodeError::InvalidLength
        );
    }

    #[test]
    fn reads_float_and_string() {
        let mut r = Reader::new(&[0x42, 0x91, 0x00, 0x00, b'o', b'k']);
        assert_eq!(r.read_be_f32().unwrap(), 72.5);
        assert_eq!(r.read_string(2).unwrap(), "ok");
        assert!(r.is_empty());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let mut r = Reader::new(&[0xff, 0xfe]);
        assert_eq!(r.read_string(2).unwrap_err(), DecodeError::InvalidValue);
    }

    #[test]
    fn optional_read_rewinds_on_failure() {
        let mut r = Reader::new(&[7, 8]);
        r.read_u8().unwrap();
        let got = r
            .read_with(ReadOptions::OPTIONAL, |r| r.read_be_u32())
            .unwrap();
        assert_eq!(got, None);
        assert_eq!(r.position(), 1);
    }

    #[test]
    fn required_read_propagates_failure() {
        let mut r = Reader::new(&[7]);
        let err = r
            .read_with(ReadOptions::REQUIRED, |r| r.read_be_u16())
            .unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedEof);
    }

    #[test]
    fn silent_read_does_not_advance() {
        let mut r = Reader::new(&[0x21, 0x05]);
        let got = r.read_with(ReadOptions::PEEK, |r| r.read_u8()).unwrap();
        assert_eq!(got, Some(0x21));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn peek_and_is_tag_do_not_consume() {
        let r = Reader::new(&[0x19, 0x55]);
        assert_eq!(r.peek_tag(), Some(Tag::Context { tag_num: 1, len: 1 }));
        assert!(r.is_tag(1, TagClass::Context));
        assert!(!r.is_tag(1, TagClass::Application));
        assert!(!r.is_tag(2, TagClass::Context));
        assert_eq!(r.position(), 0);

        let r = Reader::new(&[0x21, 0x05]);
        assert_eq!(
            r.peek_tag(),
            Some(Tag::Application {
                tag: AppTag::UnsignedInt,
                len: 1
            })
        );
        assert!(Reader::new(&[]).peek_tag().is_none());
    }

    #[test]
    fn range_and_rest_slice_the_buffer() {
        let mut r = Reader::new(&[1, 2, 3, 4, 5]);
        r.read_u8().unwrap();
        assert_eq!(r.range(1, 3).unwrap(), &[2, 3]);
        assert_eq!(r.rest(), &[2, 3, 4, 5]);
        assert_eq!(r.range(2, 9).unwrap_err(), DecodeError::UnexpectedEof);
        assert_eq!(r.range(3, 2).unwrap_err(), DecodeError::InvalidLength);
    }
}
