use crate::encoding::{reader::Reader, writer::Writer};
use crate::services::property::{read_properties, write_properties, PropertyValue};
use crate::types::{ObjectId, Primitive};
use crate::{DecodeError, EncodeError};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CovNotificationRequest {
    pub subscriber_process_id: u32,
    pub initiating_device_id: ObjectId,
    pub monitored_object_id: ObjectId,
    pub time_remaining_seconds: u32,
    pub values: Vec<PropertyValue>,
}

impl CovNotificationRequest {
    pub fn encode_body(&self, w: &mut Writer) -> Result<(), EncodeError> {
        self.subscriber_process_id.encode_param(w, 0)?;
        self.initiating_device_id.encode_param(w, 1)?;
        self.monitored_object_id.encode_param(w, 2)?;
        self.time_remaining_seconds.encode_param(w, 3)?;
        write_properties(w, &self.values, 4)
    }

    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            subscriber_process_id: u32::read_param(r, 0)?,
            initiating_device_id: ObjectId::read_param(r, 1)?,
            monitored_object_id: ObjectId::read_param(r, 2)?,
            time_remaining_seconds: u32::read_param(r, 3)?,
            values: read_properties(r, 4)?,
        })
    }
}
