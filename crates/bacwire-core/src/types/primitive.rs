use crate::encoding::{
    primitives::{decode_unsigned, encode_app_enumerated, encode_app_unsigned, encode_ctx_unsigned},
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::types::{ObjectId, StatusFlags};
use crate::{DecodeError, EncodeError};

/// Payload of an application Null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Null;

/// An enumerated value. Shares the unsigned payload encoding but carries
/// application tag 9 instead of 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enumerated(pub u32);

/// A type that maps onto exactly one BACnet application tag.
///
/// Implementors decode their payload once the tag header is known and encode
/// themselves either as a bare application value or as a context-tagged
/// parameter of an enclosing service.
pub trait Primitive: Sized {
    const APP_TAG: AppTag;
    const TYPE_NAME: &'static str;

    /// Decodes the payload following `tag`, which has already been consumed.
    fn decode_payload(r: &mut Reader<'_>, tag: Tag) -> Result<Self, DecodeError>;

    /// Writes the value under its own application tag.
    fn encode_value(&self, w: &mut Writer) -> Result<(), EncodeError>;

    /// Writes the value under context tag `tag_num`.
    fn encode_param(&self, _w: &mut Writer, _tag_num: u8) -> Result<(), EncodeError> {
        Err(EncodeError::Unimplemented {
            type_name: Self::TYPE_NAME,
            operation: "encode_param",
        })
    }

    /// Reads an application-tagged value of this type.
    fn read_value(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let tag = Tag::decode(r)?;
        match tag {
            Tag::Application { tag: app, .. } if app == Self::APP_TAG => {
                Self::decode_payload(r, tag)
            }
            _ => Err(DecodeError::InvalidTag),
        }
    }

    /// Reads a value of this type under context tag `tag_num`.
    fn read_param(r: &mut Reader<'_>, tag_num: u8) -> Result<Self, DecodeError> {
        let tag = Tag::decode(r)?;
        match tag {
            Tag::Context { tag_num: n, .. } if n == tag_num => Self::decode_payload(r, tag),
            _ => Err(DecodeError::InvalidTag),
        }
    }

    /// Like [`read_param`](Self::read_param), but returns `Ok(None)` without
    /// consuming anything when the next tag is not context tag `tag_num`.
    fn read_optional_param(r: &mut Reader<'_>, tag_num: u8) -> Result<Option<Self>, DecodeError> {
        match r.peek_tag() {
            Some(Tag::Context { tag_num: n, .. }) if n == tag_num => {
                Self::read_param(r, tag_num).map(Some)
            }
            _ => Ok(None),
        }
    }
}

fn payload_len(tag: Tag) -> Result<usize, DecodeError> {
    tag.payload_len()
        .map(|len| len as usize)
        .ok_or(DecodeError::InvalidTag)
}

/// Rounds to four decimal places, the precision Real values are kept at.
pub fn round_real(value: f32) -> f32 {
    if !value.is_finite() {
        return value;
    }
    ((value as f64 * 10_000.0).round() / 10_000.0) as f32
}

impl Primitive for Null {
    const APP_TAG: AppTag = AppTag::Null;
    const TYPE_NAME: &'static str = "null";

    fn decode_payload(r: &mut Reader<'_>, tag: Tag) -> Result<Self, DecodeError> {
        r.read_exact(payload_len(tag)?)?;
        Ok(Null)
    }

    fn encode_value(&self, w: &mut Writer) -> Result<(), EncodeError> {
        Tag::Application {
            tag: AppTag::Null,
            len: 0,
        }
        .encode(w)
    }

    fn encode_param(&self, w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
        Tag::Context { tag_num, len: 0 }.encode(w)
    }
}

impl Primitive for bool {
    const APP_TAG: AppTag = AppTag::Boolean;
    const TYPE_NAME: &'static str = "boolean";

    fn decode_payload(r: &mut Reader<'_>, tag: Tag) -> Result<Self, DecodeError> {
        match tag {
            Tag::Application { len: 0, .. } => Ok(false),
            Tag::Application { len: 1, .. } => Ok(true),
            Tag::Application { .. } => Err(DecodeError::InvalidValue),
            Tag::Context { len: 1, .. } => Ok(r.read_u8()? != 0),
            Tag::Context { .. } => Err(DecodeError::InvalidLength),
            _ => Err(DecodeError::InvalidTag),
        }
    }

    fn encode_value(&self, w: &mut Writer) -> Result<(), EncodeError> {
        Tag::Application {
            tag: AppTag::Boolean,
            len: u32::from(*self),
        }
        .encode(w)
    }

    fn encode_param(&self, w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
        Tag::Context { tag_num, len: 1 }.encode(w)?;
        w.write_u8(u8::from(*self));
        Ok(())
    }
}

impl Primitive for u32 {
    const APP_TAG: AppTag = AppTag::UnsignedInt;
    const TYPE_NAME: &'static str = "unsigned-integer";

    fn decode_payload(r: &mut Reader<'_>, tag: Tag) -> Result<Self, DecodeError> {
        decode_unsigned(r, payload_len(tag)?)
    }

    fn encode_value(&self, w: &mut Writer) -> Result<(), EncodeError> {
        encode_app_unsigned(w, *self)
    }

    fn encode_param(&self, w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
        encode_ctx_unsigned(w, tag_num, *self)
    }
}

impl Primitive for f32 {
    const APP_TAG: AppTag = AppTag::Real;
    const TYPE_NAME: &'static str = "real";

    fn decode_payload(r: &mut Reader<'_>, tag: Tag) -> Result<Self, DecodeError> {
        if payload_len(tag)? != 4 {
            return Err(DecodeError::InvalidLength);
        }
        r.read_be_f32().map(round_real)
    }

    fn encode_value(&self, w: &mut Writer) -> Result<(), EncodeError> {
        Tag::Application {
            tag: AppTag::Real,
            len: 4,
        }
        .encode(w)?;
        w.write_be_f32(*self);
        Ok(())
    }

    fn encode_param(&self, w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
        Tag::Context { tag_num, len: 4 }.encode(w)?;
        w.write_be_f32(*self);
        Ok(())
    }
}

/// Character strings: a charset byte (only 0, UTF-8, is accepted) followed by
/// the bytes. The header always uses the extended length form, so a short
/// string starts `0x75, len + 1, 0x00`.
impl Primitive for String {
    const APP_TAG: AppTag = AppTag::CharacterString;
    const TYPE_NAME: &'static str = "character-string";

    fn decode_payload(r: &mut Reader<'_>, tag: Tag) -> Result<Self, DecodeError> {
        let len = payload_len(tag)?;
        if len == 0 {
            return Err(DecodeError::InvalidLength);
        }
        if r.read_u8()? != 0 {
            return Err(DecodeError::Unsupported);
        }
        r.read_string(len - 1).map(str::to_owned)
    }

    fn encode_value(&self, w: &mut Writer) -> Result<(), EncodeError> {
        let len = u32::try_from(self.len() + 1).map_err(|_| EncodeError::InvalidLength)?;
        Tag::Application {
            tag: AppTag::CharacterString,
            len,
        }
        .encode_extended(w)?;
        w.write_u8(0);
        w.write_str(self);
        Ok(())
    }
}

impl Primitive for Enumerated {
    const APP_TAG: AppTag = AppTag::Enumerated;
    const TYPE_NAME: &'static str = "enumerated";

    fn decode_payload(r: &mut Reader<'_>, tag: Tag) -> Result<Self, DecodeError> {
        decode_unsigned(r, payload_len(tag)?).map(Enumerated)
    }

    fn encode_value(&self, w: &mut Writer) -> Result<(), EncodeError> {
        encode_app_enumerated(w, self.0)
    }

    fn encode_param(&self, w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
        encode_ctx_unsigned(w, tag_num, self.0)
    }
}

impl Primitive for ObjectId {
    const APP_TAG: AppTag = AppTag::ObjectId;
    const TYPE_NAME: &'static str = "object-identifier";

    fn decode_payload(r: &mut Reader<'_>, tag: Tag) -> Result<Self, DecodeError> {
        if payload_len(tag)? != 4 {
            return Err(DecodeError::InvalidLength);
        }
        r.read_be_u32().map(ObjectId::from_raw)
    }

    fn encode_value(&self, w: &mut Writer) -> Result<(), EncodeError> {
        Tag::Application {
            tag: AppTag::ObjectId,
            len: 4,
        }
        .encode(w)?;
        w.write_be_u32(self.raw());
        Ok(())
    }

    fn encode_param(&self, w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
        Tag::Context { tag_num, len: 4 }.encode(w)?;
        w.write_be_u32(self.raw());
        Ok(())
    }
}

impl Primitive for StatusFlags {
    const APP_TAG: AppTag = AppTag::BitString;
    const TYPE_NAME: &'static str = "status-flags";

    fn decode_payload(r: &mut Reader<'_>, tag: Tag) -> Result<Self, DecodeError> {
        let len = payload_len(tag)?;
        if len < 2 {
            return Err(DecodeError::InvalidLength);
        }
        let _unused_bits = r.read_u8()?;
        let flags = StatusFlags::from_bits(r.read_u8()?);
        r.read_exact(len - 2)?;
        Ok(flags)
    }

    fn encode_value(&self, w: &mut Writer) -> Result<(), EncodeError> {
        Tag::Application {
            tag: AppTag::BitString,
            len: 2,
        }
        .encode(w)?;
        w.write_u8(StatusFlags::UNUSED_BITS);
        w.write_u8(self.to_bits());
        Ok(())
    }
}
