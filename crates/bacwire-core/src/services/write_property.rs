use crate::encoding::{reader::Reader, writer::Writer};
use crate::services::property::{read_property, write_property_at, PropertyValue};
use crate::types::{ObjectId, Primitive};
use crate::{DecodeError, EncodeError};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WritePropertyRequest {
    pub object_id: ObjectId,
    pub property: PropertyValue,
}

impl WritePropertyRequest {
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
