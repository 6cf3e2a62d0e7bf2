use crate::encoding::{
    reader::Reader,
    tag::{AppTag, Tag},
    writer::{unsigned_width, Writer},
};
use crate::{DecodeError, EncodeError};

pub fn encode_unsigned(w: &mut Writer, value: u32) -> usize {
    w.write_unsigned(value)
}

pub fn decode_unsigned(r: &mut Reader<'_>, len: usize) -> Result<u32, DecodeError> {
    r.read_be_uint(len)
}

pub fn encode_app_unsigned(w: &mut Writer, value: u32) -> Result<(), EncodeError> {
    Tag::Application {
        tag: AppTag::UnsignedInt,
        len: unsigned_width(value) as u32,
    }
    .encode(w)?;
    encode_unsigned(w, value);
    Ok(())
}

pub fn encode_app_enumerated(w: &mut Writer, value: u32) -> Result<(), EncodeError> {
    Tag::Application {
        tag: AppTag::Enumerated,
        len: unsigned_width(value) as u32,
    }
    .encode(w)?;
    encode_unsigned(w, value);
    Ok(())
}

pub fn encode_ctx_unsigned(w: &mut Writer, tag_num: u8, value: u32) -> Result<(), EncodeError> {
    Tag::Context {
        tag_num,
        len: unsigned_width(value) as u32,
    }
    .encode(w)?;
    encode_unsigned(w, value);
    Ok(())
}

pub fn encode_opening_tag(w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
    Tag::Opening { tag_num }.encode(w)
}

pub fn encode_closing_tag(w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
    Tag::Closing { tag_num }.encode(w)
}

pub fn decode_opening_tag(r: &mut Reader<'_>, expected_tag_num: u8) -> Result<(), DecodeError> {
    match Tag::decode(r)? {
        Tag::Opening { tag_num } if tag_num == expected_tag_num => Ok(()),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn decode_closing_tag(r: &mut Reader<'_>, expected_tag_num: u8) -> Result<(), DecodeError> {
    match Tag::decode(r)? {
        Tag::Closing { tag_num } if tag_num == expected_tag_num => Ok(()),
        _ => Err(DecodeError::InvalidTag),
    }
}

/// Consumes one complete element: a primitive tag and its payload, or an
/// opening tag through its matching closing tag.
///
/// Nesting is tracked on the heap, so depth is bounded by the input length
/// and not by the call stack.
pub fn skip_element(r: &mut Reader<'_>) -> Result<(), DecodeError> {
    let mut open: Vec<u8> = Vec::new();
    loop {
        match Tag::decode(r)? {
            Tag::Opening { tag_num } => open.push(tag_num),
            Tag::Closing { tag_num } => match open.pop() {
                Some(n) if n == tag_num => {}
                _ => return Err(DecodeError::InvalidTag),
            },
            tag => {
                let len = tag.payload_len().unwrap_or(0) as usize;
                r.read_exact(len)?;
            }
        }
        if open.is_empty() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        decode_closing_tag, decode_opening_tag, decode_unsigned, encode_app_enumerated,
        encode_app_unsigned, encode_ctx_unsigned, encode_unsigned, skip_element,
    };
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::DecodeError;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unsigned_roundtrip(v in any::<u32>()) {
            let mut w = Writer::new();
            let len = encode_unsigned(&mut w, v);
            let mut r = Reader::new(w.as_written());
            let got = decode_unsigned(&mut r, len).unwrap();
            prop_assert_eq!(got, v);
            prop_assert!(len != 3);
        }
    }

    #[test]
    fn app_unsigned_matches_known_bytes() {
        let mut w = Writer::new();
        encode_app_unsigned(&mut w, 0x23).unwrap();
        encode_app_unsigned(&mut w, 0x1211).unwrap();
        assert_eq!(w.as_written(), &[0x21, 0x23, 0x22, 0x12, 0x11]);
    }

    #[test]
    fn enumerated_and_context_unsigned_headers() {
        let mut w = Writer::new();
        encode_app_enumerated(&mut w, 0).unwrap();
        encode_ctx_unsigned(&mut w, 3, 300_000).unwrap();
        assert_eq!(
            w.as_written(),
            &[0x91, 0x00, 0x3c, 0x00, 0x04, 0x93, 0xe0]
        );
    }

    #[test]
    fn bracket_helpers_check_numbers() {
        let mut r = Reader::new(&[0x2e, 0x2f, 0x3e]);
        decode_opening_tag(&mut r, 2).unwrap();
        decode_closing_tag(&mut r, 2).unwrap();
        assert_eq!(
            decode_opening_tag(&mut r, 2).unwrap_err(),
            DecodeError::InvalidTag
        );
    }

    #[test]
    fn skip_element_consumes_nested_brackets() {
        // [2 [0 uint] real ] enum
        let bytes = [
            0x2e, 0x0e, 0x21, 0x05, 0x0f, 0x44, 0x42, 0x91, 0x00, 0x00, 0x2f, 0x91, 0x01,
        ];
        let mut r = Reader::new(&bytes);
        skip_element(&mut r).unwrap();
        assert_eq!(r.rest(), &[0x91, 0x01]);
        skip_element(&mut r).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn skip_element_fails_on_unterminated_bracket() {
        let mut r = Reader::new(&[0x2e, 0x21, 0x05]);
        assert_eq!(skip_element(&mut r).unwrap_err(), DecodeError::UnexpectedEof);
    }

    #[test]
    fn skip_element_rejects_mismatched_closing_tag() {
        let mut r = Reader::new(&[0x2e, 0x0e, 0x2f]);
        assert_eq!(skip_element(&mut r).unwrap_err(), DecodeError::InvalidTag);
        let mut r = Reader::new(&[0x1f]);
        assert_eq!(skip_element(&mut r).unwrap_err(), DecodeError::InvalidTag);
    }

    #[test]
    fn skip_element_handles_deep_nesting() {
        let depth = 60_000;
        let mut bytes = vec![0x0e; depth];
        let mut r = Reader::new(&bytes);
        assert_eq!(skip_element(&mut r).unwrap_err(), DecodeError::UnexpectedEof);

        bytes.extend(std::iter::repeat(0x0f).take(depth));
        bytes.push(0x91);
        let mut r = Reader::new(&bytes);
        skip_element(&mut r).unwrap();
        assert_eq!(r.rest(), &[0x91]);
    }

    #[test]
    fn skip_element_leaves_boolean_payload_alone() {
        let mut r = Reader::new(&[0x11, 0x21, 0x07]);
        skip_element(&mut r).unwrap();
        assert_eq!(r.rest(), &[0x21, 0x07]);
    }
}
