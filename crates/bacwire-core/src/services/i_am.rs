use crate::encoding::{reader::Reader, writer::Writer};
use crate::types::{Enumerated, MaxApdu, ObjectId, Primitive, Segmentation};
use crate::{DecodeError, EncodeError};

/// Max APDU length announced by [`IAmRequest::announce`].
pub const I_AM_MAX_APDU: u32 = MaxApdu::UpTo1476.octets();
/// Segmentation announced by [`IAmRequest::announce`] (code 0).
pub const I_AM_SEGMENTATION: Segmentation = Segmentation::SegmentedBoth;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IAmRequest {
    pub device_id: ObjectId,
    pub max_apdu: u32,
    pub segmentation: Segmentation,
    pub vendor_id: u32,
}

impl IAmRequest {
    /// The fixed capability announcement: 1476-octet APDUs, segmentation
    /// code 0.
    pub const fn announce(device_id: ObjectId, vendor_id: u32) -> Self {
        Self {
            device_id,
            max_apdu: I_AM_MAX_APDU,
            segmentation: I_AM_SEGMENTATION,
            vendor_id,
        }
    }

    pub fn encode_body(&self, w: &mut Writer) -> Result<(), EncodeError> {
        self.device_id.encode_value(w)?;
        self.max_apdu.encode_value(w)?;
        Enumerated(self.segmentation.to_u32()).encode_value(w)?;
        self.vendor_id.encode_value(w)
    }

    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            device_id: ObjectId::read_value(r)?,
            max_apdu: u32::read_value(r)?,
            segmentation: Segmentation::from_u32(Enumerated::read_value(r)?.0)
                .ok_or(DecodeError::InvalidValue)?,
            vendor_id: u32::read_value(r)?,
        })
    }
}
