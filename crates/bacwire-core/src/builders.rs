//! Ready-to-send BACnet/IP datagrams.
//!
//! Who-Is and I-Am go out as original-broadcast frames with a global
//! broadcast NPDU; everything else is an original-unicast frame with a bare
//! `01 00` NPDU.

use crate::apdu::{
    Apdu, ComplexAckService, ConfirmedService, ConfirmedServiceChoice, UnconfirmedService,
};
use crate::bvlc::BvlcFunction;
use crate::frame::encode_frame;
use crate::npdu::Npdu;
use crate::services::{
    CovNotificationRequest, IAmRequest, PropertyValue, ReadPropertyAck, ReadPropertyRequest,
    SubscribeCovRequest, WhoIsRequest, WritePropertyRequest,
};
use crate::types::ObjectId;
use crate::EncodeError;

fn broadcast(service: UnconfirmedService) -> Result<Vec<u8>, EncodeError> {
    encode_frame(
        BvlcFunction::OriginalBroadcastNpdu,
        &Npdu::global_broadcast(),
        &Apdu::UnconfirmedRequest(service),
    )
}

fn unicast(apdu: Apdu) -> Result<Vec<u8>, EncodeError> {
    encode_frame(BvlcFunction::OriginalUnicastNpdu, &Npdu::new(), &apdu)
}

pub fn who_is(request: WhoIsRequest) -> Result<Vec<u8>, EncodeError> {
    broadcast(UnconfirmedService::WhoIs(request))
}

/// I-Am for `device_id`, announcing 1476-octet APDUs and segmentation code 0.
pub fn i_am(device_id: ObjectId, vendor_id: u32) -> Result<Vec<u8>, EncodeError> {
    broadcast(UnconfirmedService::IAm(IAmRequest::announce(
        device_id, vendor_id,
    )))
}

pub fn cov_notification(request: CovNotificationRequest) -> Result<Vec<u8>, EncodeError> {
    unicast(Apdu::UnconfirmedRequest(
        UnconfirmedService::CovNotification(request),
    ))
}

pub fn read_property(invoke_id: u8, request: ReadPropertyRequest) -> Result<Vec<u8>, EncodeError> {
    unicast(Apdu::confirmed(
        invoke_id,
        ConfirmedService::ReadProperty(request),
    ))
}

pub fn write_property(
    invoke_id: u8,
    request: WritePropertyRequest,
) -> Result<Vec<u8>, EncodeError> {
    unicast(Apdu::confirmed(
        invoke_id,
        ConfirmedService::WriteProperty(request),
    ))
}

pub fn subscribe_cov(invoke_id: u8, request: SubscribeCovRequest) -> Result<Vec<u8>, EncodeError> {
    unicast(Apdu::confirmed(
        invoke_id,
        ConfirmedService::SubscribeCov(request),
    ))
}

/// SubscribeCOV with both optional fields left out, which cancels the
/// subscription.
pub fn unsubscribe_cov(
    invoke_id: u8,
    subscriber_process_id: u32,
    monitored_object_id: ObjectId,
) -> Result<Vec<u8>, EncodeError> {
    subscribe_cov(
        invoke_id,
        SubscribeCovRequest::cancel(subscriber_process_id, monitored_object_id),
    )
}

pub fn read_property_ack(
    invoke_id: u8,
    object_id: ObjectId,
    property: PropertyValue,
) -> Result<Vec<u8>, EncodeError> {
    unicast(Apdu::complex_ack(
        invoke_id,
        ComplexAckService::ReadProperty(ReadPropertyAck {
            object_id,
            property,
        }),
    ))
}

pub fn write_property_ack(invoke_id: u8) -> Result<Vec<u8>, EncodeError> {
    unicast(Apdu::simple_ack(
        invoke_id,
        ConfirmedServiceChoice::WriteProperty,
    ))
}

pub fn subscribe_cov_ack(invoke_id: u8) -> Result<Vec<u8>, EncodeError> {
    unicast(Apdu::simple_ack(invoke_id, ConfirmedServiceChoice::SubscribeCov))
}

#[cfg(test)]
mod tests {
    use super::{read_property_ack, write_property};
    use crate::services::{PropertyValue, WritePropertyRequest};
    use crate::types::{ObjectId, ObjectType, PropertyId, Value};
    use crate::EncodeError;

    #[test]
    fn unencodable_values_surface_as_errors() {
        let request = WritePropertyRequest {
            object_id: ObjectId::new(ObjectType::AnalogValue, 3),
            property: PropertyValue::single(PropertyId::PresentValue, Value::Real(1.0))
                .with_array_index(1)
                .with_priority(1),
        };
        assert!(write_property(1, request).is_ok());

        let ack = read_property_ack(
            1,
            ObjectId::new(ObjectType::Device, 1),
            PropertyValue::single(
                PropertyId::Description,
                Value::from("x".repeat(70_000).as_str()),
            ),
        );
        assert_eq!(ack.unwrap_err(), EncodeError::InvalidLength);
    }
}
