use crate::encoding::{reader::Reader, writer::Writer};
use crate::services::property::{read_property, write_property_at, PropertyValue};
use crate::types::{Enumerated, ObjectId, Primitive, PropertyId};
use crate::{DecodeError, EncodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadPropertyRequest {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
}

impl ReadPropertyRequest {
    pub const fn new(object_id: ObjectId, property_id: PropertyId) -> Self {
        Self {
            object_id,
            property_id,
            array_index: None,
        }
    }

    pub fn encode_body(&self, w: &mut Writer) -> Result<(), EncodeError> {
        self.object_id.encode_param(w, 0)?;
        Enumerated(self.property_id.to_u32()).encode_param(w, 1)?;
        if let Some(idx) = self.array_index {
            idx.encode_param(w, 2)?;
        }
        Ok(())
    }

    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let object_id = ObjectId::read_param(r, 0)?;
        let property_id = PropertyId::from_u32(Enumerated::read_param(r, 1)?.0);
        let array_index = u32::read_optional_param(r, 2)?;
        Ok(Self {
            object_id,
            property_id,
            array_index,
        })
    }
}

/// ReadProperty result carried in a ComplexACK: the object and the full
/// property, values included.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadPropertyAck {
    pub object_id: ObjectId,
    pub property: PropertyValue,
}

impl ReadPropertyAck {
    pub fn encode_body(&self, w: &mut Writer) -> Result<(), EncodeError> {
        self.object_id.encode_param(w, 0)?;
        write_property_at(w, &self.property, 1)
    }

    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let object_id = ObjectId::read_param(r, 0)?;
        let property = read_property(r)?;
        Ok(Self {
            object_id,
            property,
        })
    }
}
