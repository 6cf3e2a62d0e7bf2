use crate::encoding::{reader::Reader, writer::Writer};
use crate::types::{ObjectId, Primitive};
use crate::{DecodeError, EncodeError};

/// SubscribeCOV request. Leaving both optional fields unset turns the request
/// into a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubscribeCovRequest {
    pub subscriber_process_id: u32,
    pub monitored_object_id: ObjectId,
    pub issue_confirmed_notifications: Option<bool>,
    pub lifetime_seconds: Option<u32>,
}

impl SubscribeCovRequest {
    pub fn encode_body(&self, w: &mut Writer) -> Result<(), EncodeError> {
        self.subscriber_process_id.encode_param(w, 0)?;
        self.monitored_object_id.encode_param(w, 1)?;
        if let Some(issue_confirmed) = self.issue_confirmed_notifications {
            issue_confirmed.encode_param(w, 2)?;
        }
        if let Some(lifetime_seconds) = self.lifetime_seconds {
            lifetime_seconds.encode_param(w, 3)?;
        }
        Ok(())
    }

    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            subscriber_process_id: u32::read_param(r, 0)?,
            monitored_object_id: ObjectId::read_param(r, 1)?,
            issue_confirmed_notifications: bool::read_optional_param(r, 2)?,
            lifetime_seconds: u32::read_optional_param(r, 3)?,
        })
    }

    pub const fn cancel(subscriber_process_id: u32, monitored_object_id: ObjectId) -> Self {
        Self {
            subscriber_process_id,
            monitored_object_id,
            issue_confirmed_notifications: None,
            lifetime_seconds: None,
        }
    }

    pub const fn is_cancellation(&self) -> bool {
        self.issue_confirmed_notifications.is_none() && self.lifetime_seconds.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::SubscribeCovRequest;
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::types::ObjectId;

    #[test]
    fn optional_fields_absent() {
        let mut r = Reader::new(&[0x09, 0x00, 0x1c, 0x01, 0x40, 0x00, 0x1a]);
        let req = SubscribeCovRequest::decode_after_header(&mut r).unwrap();
        assert_eq!(req.monitored_object_id, ObjectId::from_parts(5, 26));
        assert_eq!(req.issue_confirmed_notifications, None);
        assert_eq!(req.lifetime_seconds, None);
        assert!(req.is_cancellation());
    }

    #[test]
    fn optional_fields_present() {
        let bytes = [
            0x09, 0x00, 0x1c, 0x01, 0x40, 0x00, 0x1a, 0x29, 0x00, 0x3c, 0x00, 0x04, 0x93, 0xe0,
        ];
        let mut r = Reader::new(&bytes);
        let req = SubscribeCovRequest::decode_after_header(&mut r).unwrap();
        assert_eq!(req.issue_confirmed_notifications, Some(false));
        assert_eq!(req.lifetime_seconds, Some(300_000));

        let mut w = Writer::new();
        req.encode_body(&mut w).unwrap();
        assert_eq!(w.as_written(), &bytes);
    }

    #[test]
    fn lifetime_without_confirmation_flag() {
        let req = SubscribeCovRequest {
            lifetime_seconds: Some(60),
            ..SubscribeCovRequest::cancel(7, ObjectId::from_parts(0, 2))
        };
        let mut w = Writer::new();
        req.encode_body(&mut w).unwrap();
        let mut r = Reader::new(w.as_written());
        assert_eq!(SubscribeCovRequest::decode_after_header(&mut r).unwrap(), req);
    }
}
