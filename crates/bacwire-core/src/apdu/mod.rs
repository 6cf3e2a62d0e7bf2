//! The APDU tree.
//!
//! Decoding reads the first byte, branches on the PDU type in its high
//! nibble, reads that kind's fixed header and then hands the remaining bytes
//! to the service body selected by the service choice. Service choices this
//! codec has no body type for are kept as raw bytes.

/// Confirmed-request and acknowledgement headers.
pub mod confirmed;
/// PDU type and service choice numbers.
pub mod pdu;
/// Unconfirmed-request header.
pub mod unconfirmed;

pub use confirmed::{ComplexAckHeader, ConfirmedRequestHeader, SimpleAck};
pub use pdu::{ApduType, ConfirmedServiceChoice, UnconfirmedServiceChoice};
pub use unconfirmed::UnconfirmedRequestHeader;

use crate::encoding::{reader::Reader, writer::Writer};
use crate::services::{
    CovNotificationRequest, IAmRequest, PropertyValue, ReadPropertyAck, ReadPropertyRequest,
    SubscribeCovRequest, WhoIsRequest, WritePropertyRequest,
};
use crate::types::ObjectId;
use crate::{DecodeContext, DecodeError, EncodeError};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfirmedService {
    ReadProperty(ReadPropertyRequest),
    WriteProperty(WritePropertyRequest),
    SubscribeCov(SubscribeCovRequest),
    Other { service_choice: u8, data: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnconfirmedService {
    IAm(IAmRequest),
    WhoIs(WhoIsRequest),
    CovNotification(CovNotificationRequest),
    Other { service_choice: u8, data: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComplexAckService {
    ReadProperty(ReadPropertyAck),
    Other { service_choice: u8, data: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Apdu {
    ConfirmedRequest {
        header: ConfirmedRequestHeader,
        service: ConfirmedService,
    },
    UnconfirmedRequest(UnconfirmedService),
    SimpleAck(SimpleAck),
    ComplexAck {
        header: ComplexAckHeader,
        service: ComplexAckService,
    },
}

fn read_other(r: &mut Reader<'_>, service_choice: u8) -> Result<Vec<u8>, DecodeError> {
    let data = r.read_exact(r.remaining())?.to_vec();
    log::debug!(
        "no body type for service choice {service_choice}, keeping {} raw bytes",
        data.len()
    );
    Ok(data)
}

impl ConfirmedService {
    pub fn service_choice(&self) -> u8 {
        match self {
            Self::ReadProperty(_) => ConfirmedServiceChoice::ReadProperty.to_u8(),
            Self::WriteProperty(_) => ConfirmedServiceChoice::WriteProperty.to_u8(),
            Self::SubscribeCov(_) => ConfirmedServiceChoice::SubscribeCov.to_u8(),
            Self::Other { service_choice, .. } => *service_choice,
        }
    }

    fn decode(r: &mut Reader<'_>, service_choice: u8) -> Result<Self, DecodeError> {
        match ConfirmedServiceChoice::from_u8(service_choice) {
            Some(ConfirmedServiceChoice::ReadProperty) => {
                ReadPropertyRequest::decode_after_header(r)
                    .context("ReadProperty", "decode")
                    .map(Self::ReadProperty)
            }
            Some(ConfirmedServiceChoice::WriteProperty) => {
                WritePropertyRequest::decode_after_header(r)
                    .context("WriteProperty", "decode")
                    .map(Self::WriteProperty)
            }
            Some(ConfirmedServiceChoice::SubscribeCov) => {
                SubscribeCovRequest::decode_after_header(r)
                    .context("SubscribeCOV", "decode")
                    .map(Self::SubscribeCov)
            }
            _ => Ok(Self::Other {
                service_choice,
                data: read_other(r, service_choice)?,
            }),
        }
    }

    fn encode_body(&self, w: &mut Writer) -> Result<(), EncodeError> {
        match self {
            Self::ReadProperty(req) => req.encode_body(w),
            Self::WriteProperty(req) => req.encode_body(w),
            Self::SubscribeCov(req) => req.encode_body(w),
            Self::Other { data, .. } => {
                w.write_all(data);
                Ok(())
            }
        }
    }
}

impl UnconfirmedService {
    pub fn service_choice(&self) -> u8 {
        match self {
            Self::IAm(_) => UnconfirmedServiceChoice::IAm.to_u8(),
            Self::WhoIs(_) => UnconfirmedServiceChoice::WhoIs.to_u8(),
            Self::CovNotification(_) => UnconfirmedServiceChoice::CovNotification.to_u8(),
            Self::Other { service_choice, .. } => *service_choice,
        }
    }

    fn decode(r: &mut Reader<'_>, service_choice: u8) -> Result<Self, DecodeError> {
        match UnconfirmedServiceChoice::from_u8(service_choice) {
            Some(UnconfirmedServiceChoice::IAm) => IAmRequest::decode_after_header(r)
                .context("IAm", "decode")
                .map(Self::IAm),
            Some(UnconfirmedServiceChoice::WhoIs) => WhoIsRequest::decode_after_header(r)
                .context("WhoIs", "decode")
                .map(Self::WhoIs),
            Some(UnconfirmedServiceChoice::CovNotification) => {
                CovNotificationRequest::decode_after_header(r)
                    .context("COVNotification", "decode")
                    .map(Self::CovNotification)
            }
            _ => Ok(Self::Other {
                service_choice,
                data: read_other(r, service_choice)?,
            }),
        }
    }

    fn encode_body(&self, w: &mut Writer) -> Result<(), EncodeError> {
        match self {
            Self::IAm(req) => req.encode_body(w),
            Self::WhoIs(req) => req.encode_body(w),
            Self::CovNotification(req) => req.encode_body(w),
            Self::Other { data, .. } => {
                w.write_all(data);
                Ok(())
            }
        }
    }
}

impl ComplexAckService {
    pub fn service_choice(&self) -> u8 {
        match self {
            Self::ReadProperty(_) => ConfirmedServiceChoice::ReadProperty.to_u8(),
            Self::Other { service_choice, .. } => *service_choice,
        }
    }

    fn decode(r: &mut Reader<'_>, service_choice: u8) -> Result<Self, DecodeError> {
        match ConfirmedServiceChoice::from_u8(service_choice) {
            Some(ConfirmedServiceChoice::ReadProperty) => ReadPropertyAck::decode_after_header(r)
                .context("ReadProperty", "decode_ack")
                .map(Self::ReadProperty),
            _ => Ok(Self::Other {
                service_choice,
                data: read_other(r, service_choice)?,
            }),
        }
    }

    fn encode_body(&self, w: &mut Writer) -> Result<(), EncodeError> {
        match self {
            Self::ReadProperty(ack) => ack.encode_body(w),
            Self::Other { data, .. } => {
                w.write_all(data);
                Ok(())
            }
        }
    }
}

impl Apdu {
    /// Unsegmented confirmed request with the default header.
    pub fn confirmed(invoke_id: u8, service: ConfirmedService) -> Self {
        Self::ConfirmedRequest {
            header: ConfirmedRequestHeader::new(invoke_id, service.service_choice()),
            service,
        }
    }

    pub fn complex_ack(invoke_id: u8, service: ComplexAckService) -> Self {
        Self::ComplexAck {
            header: ComplexAckHeader::new(invoke_id, service.service_choice()),
            service,
        }
    }

    pub fn simple_ack(invoke_id: u8, service_choice: ConfirmedServiceChoice) -> Self {
        Self::SimpleAck(SimpleAck {
            invoke_id,
            service_choice: service_choice.to_u8(),
        })
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let apdu = decode_apdu(r).context("APDU", "decode")?;
        if !r.is_empty() {
            log::debug!("{} trailing bytes after APDU body", r.remaining());
        }
        Ok(apdu)
    }

    /// Writes the APDU. The service choice byte always comes from the
    /// service, whatever the stored header says.
    pub fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        match self {
            Self::ConfirmedRequest { header, service } => {
                ConfirmedRequestHeader {
                    service_choice: service.service_choice(),
                    ..*header
                }
                .encode(w);
                service.encode_body(w)
            }
            Self::UnconfirmedRequest(service) => {
                UnconfirmedRequestHeader {
                    service_choice: service.service_choice(),
                }
                .encode(w);
                service.encode_body(w)
            }
            Self::SimpleAck(ack) => {
                ack.encode(w);
                Ok(())
            }
            Self::ComplexAck { header, service } => {
                ComplexAckHeader {
                    service_choice: service.service_choice(),
                    ..*header
                }
                .encode(w);
                service.encode_body(w)
            }
        }
    }

    pub const fn apdu_type(&self) -> ApduType {
        match self {
            Self::ConfirmedRequest { .. } => ApduType::ConfirmedRequest,
            Self::UnconfirmedRequest(_) => ApduType::UnconfirmedRequest,
            Self::SimpleAck(_) => ApduType::SimpleAck,
            Self::ComplexAck { .. } => ApduType::ComplexAck,
        }
    }

    pub fn invoke_id(&self) -> Option<u8> {
        match self {
            Self::ConfirmedRequest { header, .. } => Some(header.invoke_id),
            Self::UnconfirmedRequest(_) => None,
            Self::SimpleAck(ack) => Some(ack.invoke_id),
            Self::ComplexAck { header, .. } => Some(header.invoke_id),
        }
    }

    pub fn service_choice(&self) -> u8 {
        match self {
            Self::ConfirmedRequest { service, .. } => service.service_choice(),
            Self::UnconfirmedRequest(service) => service.service_choice(),
            Self::SimpleAck(ack) => ack.service_choice,
            Self::ComplexAck { service, .. } => service.service_choice(),
        }
    }

    /// The object the service is about: the requested object, the
    /// monitored object of a subscription or notification, or the device
    /// announcing itself.
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            Self::ConfirmedRequest { service, .. } => match service {
                ConfirmedService::ReadProperty(req) => Some(req.object_id),
                ConfirmedService::WriteProperty(req) => Some(req.object_id),
                ConfirmedService::SubscribeCov(req) => Some(req.monitored_object_id),
                ConfirmedService::Other { .. } => None,
            },
            Self::UnconfirmedRequest(service) => match service {
                UnconfirmedService::IAm(req) => Some(req.device_id),
                UnconfirmedService::CovNotification(req) => Some(req.monitored_object_id),
                UnconfirmedService::WhoIs(_) | UnconfirmedService::Other { .. } => None,
            },
            Self::ComplexAck {
                service: ComplexAckService::ReadProperty(ack),
                ..
            } => Some(ack.object_id),
            _ => None,
        }
    }

    /// The property carried by a WriteProperty request or a ReadProperty
    /// acknowledgement.
    pub fn property(&self) -> Option<&PropertyValue> {
        match self {
            Self::ConfirmedRequest {
                service: ConfirmedService::WriteProperty(req),
                ..
            } => Some(&req.property),
            Self::ComplexAck {
                service: ComplexAckService::ReadProperty(ack),
                ..
            } => Some(&ack.property),
            _ => None,
        }
    }

    /// Every property the APDU carries: the single property of
    /// [`Apdu::property`], or a COV notification's value list.
    pub fn properties(&self) -> &[PropertyValue] {
        match self {
            Self::UnconfirmedRequest(UnconfirmedService::CovNotification(cov)) => &cov.values,
            _ => self.property().map(core::slice::from_ref).unwrap_or(&[]),
        }
    }
}

fn decode_apdu(r: &mut Reader<'_>) -> Result<Apdu, DecodeError> {
    let b0 = r.peek_u8()?;
    match ApduType::from_first_byte(b0) {
        Some(ApduType::ConfirmedRequest) => {
            decode_confirmed_request(r).context("ConfirmedRequest", "decode")
        }
        Some(ApduType::UnconfirmedRequest) => {
            decode_unconfirmed_request(r).context("UnconfirmedRequest", "decode")
        }
        Some(ApduType::SimpleAck) => SimpleAck::decode(r)
            .map(Apdu::SimpleAck)
            .context("SimpleACK", "decode"),
        Some(ApduType::ComplexAck) => decode_complex_ack(r).context("ComplexACK", "decode"),
        Some(other) => {
            log::debug!("unhandled PDU type {other:?}");
            Err(DecodeError::Unsupported)
        }
        None => Err(DecodeError::InvalidValue),
    }
}

fn decode_confirmed_request(r: &mut Reader<'_>) -> Result<Apdu, DecodeError> {
    let header = ConfirmedRequestHeader::decode(r)?;
    if header.segmented {
        log::debug!(
            "confirmed request {} is segment {:?}, decoding as a single segment",
            header.invoke_id,
            header.sequence_number
        );
    }
    let service = ConfirmedService::decode(r, header.service_choice)?;
    Ok(Apdu::ConfirmedRequest { header, service })
}

fn decode_unconfirmed_request(r: &mut Reader<'_>) -> Result<Apdu, DecodeError> {
    let header = UnconfirmedRequestHeader::decode(r)?;
    UnconfirmedService::decode(r, header.service_choice).map(Apdu::UnconfirmedRequest)
}

fn decode_complex_ack(r: &mut Reader<'_>) -> Result<Apdu, DecodeError> {
    let header = ComplexAckHeader::decode(r)?;
    let service = ComplexAckService::decode(r, header.service_choice)?;
    Ok(Apdu::ComplexAck { header, service })
}

#[cfg(test)]
mod tests {
    use super::{Apdu, ComplexAckService, ConfirmedService, UnconfirmedService};
    use crate::apdu::{ApduType, ConfirmedServiceChoice};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::services::{
        PropertyData, PropertyValue, ReadPropertyAck, SubscribeCovRequest, WhoIsRequest,
    };
    use crate::types::{ObjectId, ObjectType, PropertyId, Value};
    use crate::DecodeError;

    fn decode(bytes: &[u8]) -> Result<Apdu, DecodeError> {
        let mut r = Reader::new(bytes);
        Apdu::decode(&mut r)
    }

    fn encode(apdu: &Apdu) -> Vec<u8> {
        let mut w = Writer::new();
        apdu.encode(&mut w).unwrap();
        w.into_bytes()
    }

    #[test]
    fn subscribe_cov_without_optional_fields() {
        let apdu = decode(&[
            0x00, 0x05, 0x01, 0x05, 0x09, 0x00, 0x1c, 0x01, 0x40, 0x00, 0x1a,
        ])
        .unwrap();
        assert_eq!(apdu.invoke_id(), Some(1));
        match &apdu {
            Apdu::ConfirmedRequest {
                service: ConfirmedService::SubscribeCov(req),
                ..
            } => {
                assert_eq!(req.issue_confirmed_notifications, None);
                assert_eq!(req.lifetime_seconds, None);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(apdu.object_id(), Some(ObjectId::from_parts(5, 26)));
    }

    #[test]
    fn subscribe_cov_with_optional_fields() {
        let bytes = [
            0x00, 0x05, 0x01, 0x05, 0x09, 0x00, 0x1c, 0x01, 0x40, 0x00, 0x1a, 0x29, 0x00, 0x3c,
            0x00, 0x04, 0x93, 0xe0,
        ];
        let apdu = decode(&bytes).unwrap();
        let expected = Apdu::confirmed(
            1,
            ConfirmedService::SubscribeCov(SubscribeCovRequest {
                subscriber_process_id: 0,
                monitored_object_id: ObjectId::from_parts(5, 26),
                issue_confirmed_notifications: Some(false),
                lifetime_seconds: Some(300_000),
            }),
        );
        assert_eq!(apdu, expected);
        assert_eq!(encode(&apdu), bytes);
    }

    #[test]
    fn complex_ack_read_property() {
        let bytes = [
            0x30, 0x01, 0x0c, 0x0c, 0x02, 0x00, 0x00, 0x01, 0x19, 0x0c, 0x3e, 0x75, 0x07, 0x00,
            0x56, 0x31, 0x2e, 0x30, 0x2e, 0x30, 0x3f,
        ];
        let apdu = decode(&bytes).unwrap();
        let prop = apdu.property().unwrap();
        assert_eq!(prop.property_id, PropertyId::ApplicationSoftwareVersion);
        assert_eq!(
            prop.value(),
            PropertyData::Single(&Value::CharacterString("V1.0.0".into()))
        );
        assert_eq!(apdu.object_id(), Some(ObjectId::new(ObjectType::Device, 1)));
        assert_eq!(encode(&apdu), bytes);
    }

    #[test]
    fn simple_ack() {
        let apdu = decode(&[0x20, 0x05, 0x0f]).unwrap();
        assert_eq!(apdu, Apdu::simple_ack(5, ConfirmedServiceChoice::WriteProperty));
        assert_eq!(apdu.apdu_type(), ApduType::SimpleAck);
        assert!(apdu.properties().is_empty());
    }

    #[test]
    fn who_is_has_empty_body() {
        let apdu = decode(&[0x10, 0x08]).unwrap();
        assert_eq!(
            apdu,
            Apdu::UnconfirmedRequest(UnconfirmedService::WhoIs(WhoIsRequest::global()))
        );
        assert_eq!(apdu.invoke_id(), None);
        assert_eq!(apdu.object_id(), None);
    }

    #[test]
    fn unknown_service_choice_is_kept_raw() {
        // Who-Has by object name
        let bytes = [0x10, 0x07, 0x3d, 0x03, 0x00, b'A', b'V'];
        let apdu = decode(&bytes).unwrap();
        assert_eq!(
            apdu,
            Apdu::UnconfirmedRequest(UnconfirmedService::Other {
                service_choice: 7,
                data: bytes[2..].to_vec(),
            })
        );
        assert_eq!(encode(&apdu), bytes);
    }

    #[test]
    fn encode_takes_choice_from_service() {
        let ack = ReadPropertyAck {
            object_id: ObjectId::new(ObjectType::AnalogInput, 1),
            property: PropertyValue::single(PropertyId::PresentValue, Value::Real(1.5)),
        };
        let mut apdu = Apdu::complex_ack(3, ComplexAckService::ReadProperty(ack));
        if let Apdu::ComplexAck { header, .. } = &mut apdu {
            header.service_choice = 0x1a;
        }
        assert_eq!(encode(&apdu)[..3], [0x30, 0x03, 0x0c]);
    }

    #[test]
    fn unhandled_pdu_types_fail_with_context() {
        for bytes in [&[0x50u8, 0x01, 0x0f][..], &[0x60, 0x01, 0x03], &[0x70, 0x01, 0x04]] {
            let err = decode(bytes).unwrap_err();
            assert_eq!(err.root_cause(), &DecodeError::Unsupported);
            assert!(err.to_string().starts_with("APDU - decode: Parse - "));
        }
        assert_eq!(
            decode(&[0x90, 0x00]).unwrap_err().root_cause(),
            &DecodeError::InvalidValue
        );
    }

    #[test]
    fn truncated_body_reports_breadcrumbs() {
        let err = decode(&[0x00, 0x05, 0x01, 0x0f, 0x0c, 0x00, 0x80]).unwrap_err();
        assert_eq!(err.root_cause(), &DecodeError::UnexpectedEof);
        assert!(err
            .to_string()
            .starts_with(
                "APDU - decode: Parse - ConfirmedRequest - decode: Parse - \
                 WriteProperty - decode: Parse - "
            ));
    }

    #[test]
    fn truncated_headers_name_their_pdu_kind() {
        let cases: [(&[u8], &str); 4] = [
            (&[0x00, 0x05], "ConfirmedRequest"),
            (&[0x10], "UnconfirmedRequest"),
            (&[0x20, 0x05], "SimpleACK"),
            (&[0x30], "ComplexACK"),
        ];
        for (bytes, kind) in cases {
            let err = decode(bytes).unwrap_err();
            assert_eq!(err.root_cause(), &DecodeError::UnexpectedEof, "{kind}");
            assert_eq!(
                err.to_string(),
                format!("APDU - decode: Parse - {kind} - decode: Parse - unexpected end of input")
            );
        }
    }

    #[test]
    fn empty_input_is_eof() {
        assert_eq!(
            decode(&[]).unwrap_err().root_cause(),
            &DecodeError::UnexpectedEof
        );
    }
}
