use crate::encoding::{
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::types::primitive::{round_real, Enumerated, Null, Primitive};
use crate::types::{ObjectId, StatusFlags};
use crate::{DecodeError, EncodeError};

/// One application-tagged value from a property value list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Null,
    Boolean(bool),
    Unsigned(u32),
    Real(f32),
    CharacterString(String),
    Enumerated(u32),
    ObjectId(ObjectId),
    StatusFlags(StatusFlags),
}

impl Value {
    /// Checked Real constructor: rejects non-finite input and rounds to four
    /// decimal places.
    pub fn real(value: f32) -> Result<Self, EncodeError> {
        if !value.is_finite() {
            return Err(EncodeError::TypeMismatch {
                found: "non-finite number",
                expected: f32::TYPE_NAME,
            });
        }
        Ok(Self::Real(round_real(value)))
    }

    /// The zero value for an application tag, if the tag is one this codec
    /// models.
    pub fn default_for(tag: AppTag) -> Option<Self> {
        match tag {
            AppTag::Null => Some(Self::Null),
            AppTag::Boolean => Some(Self::Boolean(false)),
            AppTag::UnsignedInt => Some(Self::Unsigned(0)),
            AppTag::Real => Some(Self::Real(0.0)),
            AppTag::CharacterString => Some(Self::CharacterString(String::new())),
            AppTag::BitString => Some(Self::StatusFlags(StatusFlags::default())),
            AppTag::Enumerated => Some(Self::Enumerated(0)),
            AppTag::ObjectId => Some(Self::ObjectId(ObjectId::default())),
            _ => None,
        }
    }

    pub const fn is_supported(tag: AppTag) -> bool {
        matches!(
            tag,
            AppTag::Null
                | AppTag::Boolean
                | AppTag::UnsignedInt
                | AppTag::Real
                | AppTag::CharacterString
                | AppTag::BitString
                | AppTag::Enumerated
                | AppTag::ObjectId
        )
    }

    pub const fn app_tag(&self) -> AppTag {
        match self {
            Self::Null => AppTag::Null,
            Self::Boolean(_) => AppTag::Boolean,
            Self::Unsigned(_) => AppTag::UnsignedInt,
            Self::Real(_) => AppTag::Real,
            Self::CharacterString(_) => AppTag::CharacterString,
            Self::Enumerated(_) => AppTag::Enumerated,
            Self::ObjectId(_) => AppTag::ObjectId,
            Self::StatusFlags(_) => AppTag::BitString,
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => Null::TYPE_NAME,
            Self::Boolean(_) => bool::TYPE_NAME,
            Self::Unsigned(_) => u32::TYPE_NAME,
            Self::Real(_) => f32::TYPE_NAME,
            Self::CharacterString(_) => String::TYPE_NAME,
            Self::Enumerated(_) => Enumerated::TYPE_NAME,
            Self::ObjectId(_) => ObjectId::TYPE_NAME,
            Self::StatusFlags(_) => StatusFlags::TYPE_NAME,
        }
    }

    /// Replaces the payload, keeping the variant.
    ///
    /// A value of a different variant is a type mismatch; a Real goes through
    /// [`Value::real`].
    pub fn set(&mut self, value: Value) -> Result<(), EncodeError> {
        if core::mem::discriminant(self) != core::mem::discriminant(&value) {
            return Err(EncodeError::TypeMismatch {
                found: value.type_name(),
                expected: self.type_name(),
            });
        }
        *self = match value {
            Self::Real(v) => Self::real(v)?,
            other => other,
        };
        Ok(())
    }

    /// Reads one application-tagged value.
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Self::decode_with_tag(r).map(|(_, value)| value)
    }

    /// Reads one application-tagged value and returns the tag it was read
    /// under alongside it.
    pub fn decode_with_tag(r: &mut Reader<'_>) -> Result<(Tag, Self), DecodeError> {
        let tag = Tag::decode(r)?;
        let app = match tag {
            Tag::Application { tag, .. } => tag,
            _ => return Err(DecodeError::InvalidTag),
        };
        let value = match app {
            AppTag::Null => Null::decode_payload(r, tag).map(|_| Self::Null)?,
            AppTag::Boolean => Self::Boolean(bool::decode_payload(r, tag)?),
            AppTag::UnsignedInt => Self::Unsigned(u32::decode_payload(r, tag)?),
            AppTag::Real => Self::Real(f32::decode_payload(r, tag)?),
            AppTag::CharacterString => Self::CharacterString(String::decode_payload(r, tag)?),
            AppTag::BitString => Self::StatusFlags(StatusFlags::decode_payload(r, tag)?),
            AppTag::Enumerated => Self::Enumerated(Enumerated::decode_payload(r, tag)?.0),
            AppTag::ObjectId => Self::ObjectId(ObjectId::decode_payload(r, tag)?),
            _ => return Err(DecodeError::Unsupported),
        };
        Ok((tag, value))
    }

    /// Writes the value under its own application tag.
    pub fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        match self {
            Self::Null => Null.encode_value(w),
            Self::Boolean(v) => v.encode_value(w),
            Self::Unsigned(v) => v.encode_value(w),
            Self::Real(v) => v.encode_value(w),
            Self::CharacterString(v) => v.encode_value(w),
            Self::Enumerated(v) => Enumerated(*v).encode_value(w),
            Self::ObjectId(v) => v.encode_value(w),
            Self::StatusFlags(v) => v.encode_value(w),
        }
    }

    /// Writes the value under context tag `tag_num`.
    pub fn encode_param(&self, w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
        match self {
            Self::Null => Null.encode_param(w, tag_num),
            Self::Boolean(v) => v.encode_param(w, tag_num),
            Self::Unsigned(v) => v.encode_param(w, tag_num),
            Self::Real(v) => v.encode_param(w, tag_num),
            Self::CharacterString(v) => v.encode_param(w, tag_num),
            Self::Enumerated(v) => Enumerated(*v).encode_param(w, tag_num),
            Self::ObjectId(v) => v.encode_param(w, tag_num),
            Self::StatusFlags(v) => v.encode_param(w, tag_num),
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_unsigned(&self) -> Option<u32> {
        match self {
            Self::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f32> {
        match self {
            Self::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::CharacterString(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub const fn as_enumerated(&self) -> Option<u32> {
        match self {
            Self::Enumerated(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::ObjectId(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_status_flags(&self) -> Option<StatusFlags> {
        match self {
            Self::StatusFlags(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Unsigned(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::CharacterString(value.to_owned())
    }
}

impl From<ObjectId> for Value {
    fn from(value: ObjectId) -> Self {
        Self::ObjectId(value)
    }
}

impl From<StatusFlags> for Value {
    fn from(value: StatusFlags) -> Self {
        Self::StatusFlags(value)
    }
}
