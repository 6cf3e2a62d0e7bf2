use std::net::SocketAddrV4;

use crate::apdu::Apdu;
use crate::bvlc::{decode_origin, encode_origin, BvlcFunction, BvlcHeader};
use crate::encoding::{reader::Reader, writer::Writer};
use crate::npdu::{Npdu, NpduMessage};
use crate::services::{PropertyData, PropertyValue};
use crate::types::ObjectId;
use crate::{DecodeContext, DecodeError, EncodeError};

/// One decoded BACnet/IP datagram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub function: BvlcFunction,
    /// Originating address of a Forwarded-NPDU.
    pub origin: Option<SocketAddrV4>,
    pub message: NpduMessage,
}

impl Frame {
    pub fn new(function: BvlcFunction, npdu: Npdu, apdu: Apdu) -> Self {
        Self {
            function,
            origin: None,
            message: NpduMessage::new(npdu, apdu),
        }
    }

    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new(data);
        decode_bvlc(&mut r).context("BVLC", "decode")
    }

    /// Rebuilds the wire bytes, recomputing the total length.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut npdu_w = Writer::new();
        let mut body_w = Writer::new();
        self.message.encode_layers(&mut npdu_w, &mut body_w)?;
        assemble(self.function, self.origin, &npdu_w, &body_w)
    }

    pub fn npdu(&self) -> &Npdu {
        &self.message.npdu
    }

    pub fn apdu(&self) -> Option<&Apdu> {
        self.message.apdu()
    }

    pub fn object_id(&self) -> Option<ObjectId> {
        self.apdu().and_then(Apdu::object_id)
    }

    pub fn property(&self) -> Option<&PropertyValue> {
        self.apdu().and_then(Apdu::property)
    }

    /// The carried property's value, collapsed to the value itself when
    /// there is exactly one.
    pub fn property_value(&self) -> Option<PropertyData<'_>> {
        self.property().map(PropertyValue::value)
    }

    pub fn properties(&self) -> &[PropertyValue] {
        self.apdu().map(Apdu::properties).unwrap_or(&[])
    }
}

fn decode_bvlc(r: &mut Reader<'_>) -> Result<Frame, DecodeError> {
    let header = BvlcHeader::decode(r)?;
    if !header.function.carries_npdu() {
        log::debug!("BVLC function {:?} carries no NPDU", header.function);
        return Err(DecodeError::Unsupported);
    }
    let payload = r.read_exact(header.payload_len())?;
    if !r.is_empty() {
        log::debug!(
            "{} bytes past the BVLC length of {}",
            r.remaining(),
            header.length
        );
    }

    let mut r = Reader::new(payload);
    let origin = if header.function == BvlcFunction::ForwardedNpdu {
        Some(decode_origin(&mut r)?)
    } else {
        None
    };
    let message = NpduMessage::decode(&mut r)?;
    log::trace!(
        "decoded {:?} frame of {} bytes",
        header.function,
        header.length
    );
    Ok(Frame {
        function: header.function,
        origin,
        message,
    })
}

fn assemble(
    function: BvlcFunction,
    origin: Option<SocketAddrV4>,
    npdu_w: &Writer,
    body_w: &Writer,
) -> Result<Vec<u8>, EncodeError> {
    let mut origin_w = Writer::new();
    match (function, origin) {
        (BvlcFunction::ForwardedNpdu, Some(addr)) => encode_origin(&mut origin_w, addr),
        (BvlcFunction::ForwardedNpdu, None) => {
            return Err(EncodeError::Message("forwarded NPDU needs an origin address"))
        }
        (_, Some(_)) if function.carries_npdu() => {
            return Err(EncodeError::Message(
                "origin address is only carried by forwarded NPDUs",
            ))
        }
        _ if function.carries_npdu() => {}
        _ => return Err(EncodeError::Unsupported),
    }

    let header = BvlcHeader::for_payload(
        function,
        origin_w.size() + npdu_w.size() + body_w.size(),
    )?;
    let mut bvlc_w = Writer::with_capacity(header.length as usize);
    header.encode(&mut bvlc_w);
    log::trace!("encoded {function:?} frame of {} bytes", header.length);
    Ok(Writer::concat([&bvlc_w, &origin_w, npdu_w, body_w]).into_bytes())
}

/// Decodes a whole BACnet/IP datagram.
pub fn decode_frame(data: &[u8]) -> Result<Frame, DecodeError> {
    Frame::decode(data)
}

/// Frames `apdu` under `npdu` and a BVLC header with `function`.
pub fn encode_frame(function: BvlcFunction, npdu: &Npdu, apdu: &Apdu) -> Result<Vec<u8>, EncodeError> {
    let mut apdu_w = Writer::new();
    apdu.encode(&mut apdu_w)?;
    let mut npdu_w = Writer::new();
    npdu.encode(&mut npdu_w)?;
    assemble(function, None, &npdu_w, &apdu_w)
}

#[cfg(test)]
mod tests {
    use super::{decode_frame, encode_frame, Frame};
    use crate::apdu::{Apdu, UnconfirmedService};
    use crate::bvlc::BvlcFunction;
    use crate::npdu::Npdu;
    use crate::services::{PropertyData, WhoIsRequest};
    use crate::types::{ObjectId, PropertyId, Value};
    use crate::{DecodeError, EncodeError};
    use std::net::{Ipv4Addr, SocketAddrV4};

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    const COV_FRAME: &str =
        "810a00270100100209001c0200270f2c0140001a3b0493e04e09552e91002f096f2e8204002f4f";

    #[test]
    fn cov_notification_layers() {
        let frame = decode_frame(&hex(COV_FRAME)).unwrap();
        assert_eq!(frame.function, BvlcFunction::OriginalUnicastNpdu);
        assert_eq!(frame.npdu(), &Npdu::new());
        assert_eq!(frame.object_id(), Some(ObjectId::from_parts(5, 26)));
        assert_eq!(frame.properties().len(), 2);
        assert_eq!(frame.properties()[0].property_id, PropertyId::PresentValue);
        assert!(frame.property().is_none());
    }

    #[test]
    fn reencode_preserves_tree() {
        let frame = decode_frame(&hex(COV_FRAME)).unwrap();
        let bytes = frame.encode().unwrap();
        // time remaining is re-encoded on four bytes instead of three
        assert_eq!(bytes.len(), hex(COV_FRAME).len() + 1);
        assert_eq!(decode_frame(&bytes).unwrap(), frame);
    }

    #[test]
    fn who_is_frame() {
        let apdu = Apdu::UnconfirmedRequest(UnconfirmedService::WhoIs(WhoIsRequest::global()));
        let bytes = encode_frame(
            BvlcFunction::OriginalBroadcastNpdu,
            &Npdu::global_broadcast(),
            &apdu,
        )
        .unwrap();
        assert_eq!(bytes, hex("810b000c0120ffff00ff1008"));
        assert_eq!(decode_frame(&bytes).unwrap().apdu(), Some(&apdu));
    }

    #[test]
    fn property_value_collapses_single_value() {
        let frame = decode_frame(&hex(
            "810a001b01003001 0c0c0200000119 0c3e750700 56312e302e303f".replace(' ', "").as_str(),
        ))
        .unwrap();
        assert_eq!(
            frame.property_value(),
            Some(PropertyData::Single(&Value::CharacterString("V1.0.0".into())))
        );
    }

    #[test]
    fn forwarded_npdu_keeps_origin() {
        let bytes = hex("810400120a000007bac00120ffff00ff1008");
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(frame.function, BvlcFunction::ForwardedNpdu);
        assert_eq!(
            frame.origin,
            Some(SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 7), 0xbac0))
        );
        assert_eq!(frame.encode().unwrap(), bytes);
    }

    #[test]
    fn non_npdu_functions_are_unsupported() {
        let err = decode_frame(&hex("810500060e10")).unwrap_err();
        assert_eq!(err.root_cause(), &DecodeError::Unsupported);
        assert!(err.to_string().starts_with("BVLC - decode: Parse - "));
    }

    #[test]
    fn length_past_buffer_is_eof() {
        let err = decode_frame(&hex("810a00100100")).unwrap_err();
        assert_eq!(err.root_cause(), &DecodeError::UnexpectedEof);
    }

    #[test]
    fn trailing_bytes_past_length_are_ignored() {
        let mut bytes = hex("810b000c0120ffff00ff1008");
        bytes.extend_from_slice(&[0xde, 0xad]);
        assert!(decode_frame(&bytes).is_ok());
    }

    #[test]
    fn nested_errors_read_outermost_first() {
        let err = decode_frame(&hex("810a000901001000c4")).unwrap_err();
        assert_eq!(err.root_cause(), &DecodeError::UnexpectedEof);
        assert!(err.to_string().starts_with(
            "BVLC - decode: Parse - NPDU - decode: Parse - APDU - decode: Parse - \
             UnconfirmedRequest - decode: Parse - IAm - decode: Parse - "
        ));
    }

    #[test]
    fn forwarded_without_origin_cannot_encode() {
        let mut frame = decode_frame(&hex("810400120a000007bac00120ffff00ff1008")).unwrap();
        frame.origin = None;
        assert!(matches!(frame.encode(), Err(EncodeError::Message(_))));
        frame.function = BvlcFunction::Result;
        assert_eq!(frame.encode().unwrap_err(), EncodeError::Unsupported);
    }

    #[test]
    fn origin_on_original_unicast_cannot_encode() {
        let mut frame = decode_frame(&hex("810400120a000007bac00120ffff00ff1008")).unwrap();
        frame.function = BvlcFunction::OriginalUnicastNpdu;
        assert!(matches!(frame.encode(), Err(EncodeError::Message(_))));
        frame.origin = None;
        assert_eq!(&frame.encode().unwrap()[..4], &[0x81, 0x0a, 0x00, 0x0c]);
    }

    #[test]
    fn frame_new_wraps_layers() {
        let apdu = Apdu::UnconfirmedRequest(UnconfirmedService::WhoIs(WhoIsRequest::range(1, 2)));
        let frame = Frame::new(BvlcFunction::OriginalBroadcastNpdu, Npdu::global_broadcast(), apdu);
        assert_eq!(decode_frame(&frame.encode().unwrap()).unwrap(), frame);
    }
}
