use crate::encoding::tag::TagClass;
use crate::EncodeError;

/// Append-only byte buffer.
///
/// Each layer encodes into its own writer; parents read the child's
/// [`size`](Self::size) to fill in length fields and then [`concat`](Self::concat)
/// the pieces in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn size(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_written(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_all(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    pub fn write_be_u16(&mut self, value: u16) {
        self.write_all(&value.to_be_bytes());
    }

    pub fn write_be_u32(&mut self, value: u32) {
        self.write_all(&value.to_be_bytes());
    }

    pub fn write_be_f32(&mut self, value: f32) {
        self.write_be_u32(value.to_bits());
    }

    pub fn write_str(&mut self, value: &str) {
        self.write_all(value.as_bytes());
    }

    /// Packs a single tag byte from its three fields.
    pub fn write_tag_byte(
        &mut self,
        number: u8,
        class: TagClass,
        value: u8,
    ) -> Result<(), EncodeError> {
        if number > 14 {
            return Err(EncodeError::Unsupported);
        }
        if value > 7 {
            return Err(EncodeError::ValueOutOfRange);
        }
        let class_bit = match class {
            TagClass::Application => 0,
            TagClass::Context => 0b0000_1000,
        };
        self.write_u8((number << 4) | class_bit | value);
        Ok(())
    }

    /// Writes `value` big-endian in 1, 2 or 4 bytes, whichever is the
    /// smallest that holds it, and returns the width.
    pub fn write_unsigned(&mut self, value: u32) -> usize {
        let len = unsigned_width(value);
        self.write_all(&value.to_be_bytes()[4 - len..]);
        len
    }

    /// Joins writers in order into a fresh one.
    pub fn concat<'w>(parts: impl IntoIterator<Item = &'w Writer>) -> Writer {
        let mut out = Writer::new();
        for part in parts {
            out.write_all(part.as_written());
        }
        out
    }
}

/// Width in bytes that [`Writer::write_unsigned`] uses for `value`.
pub const fn unsigned_width(value: u32) -> usize {
    if value <= 0xFF {
        1
    } else if value <= 0xFFFF {
        2
    } else {
        4
    }
}
