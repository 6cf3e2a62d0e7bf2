//! Property codec.
//!
//! A property is encoded as a run of context tags whose numbers are relative
//! to the first one, `N`:
//!
//! | context | field                                   |
//! |---------|-----------------------------------------|
//! | `N`     | property identifier (enumerated)        |
//! | `N + 1` | array index (unsigned, optional)        |
//! | `N + 2` | opening/closing bracket around values   |
//! | `N + 3` | priority (unsigned, optional)           |
//!
//! Property lists use `N = 0`; WriteProperty and the ReadProperty ack start
//! at `N = 1` because the object identifier takes context 0.

use crate::encoding::{
    primitives::{
        decode_closing_tag, decode_opening_tag, encode_closing_tag, encode_opening_tag,
        skip_element,
    },
    reader::Reader,
    tag::{Tag, TagClass},
    writer::Writer,
};
use crate::types::{Enumerated, Primitive, PropertyId, Value};
use crate::{DecodeContext, DecodeError, EncodeError};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyValue {
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub values: Vec<Value>,
    pub priority: Option<u8>,
}

/// A property's values, with a single value exposed directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyData<'a> {
    Single(&'a Value),
    Multiple(&'a [Value]),
}

impl PropertyValue {
    pub fn new(property_id: PropertyId, values: Vec<Value>) -> Self {
        Self {
            property_id,
            array_index: None,
            values,
            priority: None,
        }
    }

    pub fn single(property_id: PropertyId, value: Value) -> Self {
        Self::new(property_id, vec![value])
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_array_index(mut self, index: u32) -> Self {
        self.array_index = Some(index);
        self
    }

    /// The value itself when there is exactly one, otherwise the whole list.
    pub fn value(&self) -> PropertyData<'_> {
        match self.values.as_slice() {
            [single] => PropertyData::Single(single),
            all => PropertyData::Multiple(all),
        }
    }
}

/// First property in `props` with identifier `id`.
pub fn find_property(props: &[PropertyValue], id: PropertyId) -> Option<&PropertyValue> {
    props.iter().find(|prop| prop.property_id == id)
}

/// Reads one property, numbering its context tags from whatever number the
/// first tag carries.
pub fn read_property(r: &mut Reader<'_>) -> Result<PropertyValue, DecodeError> {
    decode_property(r).context("Property", "read_property")
}

fn decode_property(r: &mut Reader<'_>) -> Result<PropertyValue, DecodeError> {
    let base = match r.peek_tag() {
        Some(Tag::Context { tag_num, .. }) => tag_num,
        Some(_) => return Err(DecodeError::InvalidTag),
        None => return Err(DecodeError::UnexpectedEof),
    };

    let property_id = PropertyId::from_u32(Enumerated::read_param(r, base)?.0);
    let array_index = u32::read_optional_param(r, base + 1)?;
    let values = read_property_values(r, base + 2)?;
    let priority = if r.is_tag(base + 3, TagClass::Context) {
        let raw = u32::read_param(r, base + 3)?;
        Some(u8::try_from(raw).map_err(|_| DecodeError::InvalidValue)?)
    } else {
        None
    };

    Ok(PropertyValue {
        property_id,
        array_index,
        values,
        priority,
    })
}

/// Reads properties bracketed by context tag `tag_num`, up to and including
/// the matching closing tag.
pub fn read_properties(
    r: &mut Reader<'_>,
    tag_num: u8,
) -> Result<Vec<PropertyValue>, DecodeError> {
    decode_properties(r, tag_num).context("Property", "read_properties")
}

fn decode_properties(r: &mut Reader<'_>, tag_num: u8) -> Result<Vec<PropertyValue>, DecodeError> {
    decode_opening_tag(r, tag_num)?;
    let mut props = Vec::new();
    loop {
        if let Some(Tag::Closing { tag_num: n }) = r.peek_tag() {
            if n == tag_num {
                decode_closing_tag(r, tag_num)?;
                return Ok(props);
            }
        }
        props.push(read_property(r)?);
    }
}

/// Reads application values bracketed by context tag `tag_num`, up to and
/// including the matching closing tag.
///
/// Elements this codec does not model (other application types, context
/// tagged or constructed data) are consumed and dropped.
pub fn read_property_values(r: &mut Reader<'_>, tag_num: u8) -> Result<Vec<Value>, DecodeError> {
    decode_property_values(r, tag_num).context("Property", "read_property_values")
}

fn decode_property_values(r: &mut Reader<'_>, tag_num: u8) -> Result<Vec<Value>, DecodeError> {
    decode_opening_tag(r, tag_num)?;
    let mut values = Vec::new();
    loop {
        match r.peek_tag() {
            Some(Tag::Closing { tag_num: n }) if n == tag_num => {
                decode_closing_tag(r, tag_num)?;
                return Ok(values);
            }
            Some(Tag::Application { tag, .. }) if Value::is_supported(tag) => {
                values.push(Value::decode(r)?);
            }
            Some(Tag::Closing { .. }) => return Err(DecodeError::InvalidTag),
            Some(other) => {
                log::debug!("skipping unsupported element {other:?} in value list");
                skip_element(r)?;
            }
            None if r.is_empty() => return Err(DecodeError::UnexpectedEof),
            None => return Err(DecodeError::InvalidTag),
        }
    }
}

/// Writes a property with its context tags numbered from `base`.
pub fn write_property_at(
    w: &mut Writer,
    prop: &PropertyValue,
    base: u8,
) -> Result<(), EncodeError> {
    Enumerated(prop.property_id.to_u32()).encode_param(w, base)?;
    if let Some(index) = prop.array_index {
        index.encode_param(w, base + 1)?;
    }
    write_values(w, &prop.values, base + 2)?;
    if let Some(priority) = prop.priority {
        u32::from(priority).encode_param(w, base + 3)?;
    }
    Ok(())
}

/// Writes a property as a property-list entry (contexts 0 to 3).
pub fn write_property(w: &mut Writer, prop: &PropertyValue) -> Result<(), EncodeError> {
    write_property_at(w, prop, 0)
}

pub fn write_properties(
    w: &mut Writer,
    props: &[PropertyValue],
    tag_num: u8,
) -> Result<(), EncodeError> {
    encode_opening_tag(w, tag_num)?;
    for prop in props {
        write_property(w, prop)?;
    }
    encode_closing_tag(w, tag_num)
}

pub fn write_values(w: &mut Writer, values: &[Value], tag_num: u8) -> Result<(), EncodeError> {
    encode_opening_tag(w, tag_num)?;
    for value in values {
        value.encode(w)?;
    }
    encode_closing_tag(w, tag_num)
}
