use crate::apdu::ApduType;
use crate::encoding::{reader::Reader, writer::Writer};
use crate::types::MaxApdu;
use crate::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmedRequestHeader {
    pub segmented: bool,
    pub more_follows: bool,
    pub segmented_response_accepted: bool,
    pub max_segments: u8,
    pub max_apdu: u8,
    pub invoke_id: u8,
    pub sequence_number: Option<u8>,
    pub proposed_window_size: Option<u8>,
    pub service_choice: u8,
}

impl ConfirmedRequestHeader {
    /// Unsegmented request header advertising 1476-octet responses.
    pub const fn new(invoke_id: u8, service_choice: u8) -> Self {
        Self {
            segmented: false,
            more_follows: false,
            segmented_response_accepted: false,
            max_segments: 0,
            max_apdu: MaxApdu::UpTo1476.to_u8(),
            invoke_id,
            sequence_number: None,
            proposed_window_size: None,
            service_choice,
        }
    }

    pub fn encode(&self, w: &mut Writer) {
        let mut b0 = ApduType::ConfirmedRequest.first_byte();
        if self.segmented {
            b0 |= 0b0000_1000;
        }
        if self.more_follows {
            b0 |= 0b0000_0100;
        }
        if self.segmented_response_accepted {
            b0 |= 0b0000_0010;
        }

        w.write_u8(b0);
        w.write_u8(((self.max_segments & 0x07) << 4) | (self.max_apdu & 0x0f));
        w.write_u8(self.invoke_id);
        if self.segmented {
            w.write_u8(self.sequence_number.unwrap_or(0));
            w.write_u8(self.proposed_window_size.unwrap_or(1));
        }
        w.write_u8(self.service_choice);
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let b0 = r.read_u8()?;
        if (b0 >> 4) != ApduType::ConfirmedRequest as u8 {
            return Err(DecodeError::InvalidValue);
        }
        let segmented = (b0 & 0b0000_1000) != 0;
        let more_follows = (b0 & 0b0000_0100) != 0;
        let segmented_response_accepted = (b0 & 0b0000_0010) != 0;
        let seg_apdu = r.read_u8()?;
        let invoke_id = r.read_u8()?;
        let (sequence_number, proposed_window_size) = if segmented {
            (Some(r.read_u8()?), Some(r.read_u8()?))
        } else {
            (None, None)
        };
        let service_choice = r.read_u8()?;
        Ok(Self {
            segmented,
            more_follows,
            segmented_response_accepted,
            max_segments: (seg_apdu >> 4) & 0x07,
            max_apdu: seg_apdu & 0x0f,
            invoke_id,
            sequence_number,
            proposed_window_size,
            service_choice,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplexAckHeader {
    pub segmented: bool,
    pub more_follows: bool,
    pub invoke_id: u8,
    pub sequence_number: Option<u8>,
    pub proposed_window_size: Option<u8>,
    pub service_choice: u8,
}

impl ComplexAckHeader {
    pub const fn new(invoke_id: u8, service_choice: u8) -> Self {
        Self {
            segmented: false,
            more_follows: false,
            invoke_id,
            sequence_number: None,
            proposed_window_size: None,
            service_choice,
        }
    }

    pub fn encode(&self, w: &mut Writer) {
        let mut b0 = ApduType::ComplexAck.first_byte();
        if self.segmented {
            b0 |= 0b0000_1000;
        }
        if self.more_follows {
            b0 |= 0b0000_0100;
        }
        w.write_u8(b0);
        w.write_u8(self.invoke_id);
        if self.segmented {
            w.write_u8(self.sequence_number.unwrap_or(0));
            w.write_u8(self.proposed_window_size.unwrap_or(1));
        }
        w.write_u8(self.service_choice);
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let b0 = r.read_u8()?;
        if (b0 >> 4) != ApduType::ComplexAck as u8 {
            return Err(DecodeError::InvalidValue);
        }

        let segmented = (b0 & 0b0000_1000) != 0;
        let more_follows = (b0 & 0b0000_0100) != 0;
        let invoke_id = r.read_u8()?;
        let (sequence_number, proposed_window_size) = if segmented {
            (Some(r.read_u8()?), Some(r.read_u8()?))
        } else {
            (None, None)
        };
        let service_choice = r.read_u8()?;

        Ok(Self {
            segmented,
            more_follows,
            invoke_id,
            sequence_number,
            proposed_window_size,
            service_choice,
        })
    }
}

/// Simple-ACK: the whole PDU is three bytes, no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleAck {
    pub invoke_id: u8,
    pub service_choice: u8,
}

impl SimpleAck {
    pub fn encode(&self, w: &mut Writer) {
        w.write_u8(ApduType::SimpleAck.first_byte());
        w.write_u8(self.invoke_id);
        w.write_u8(self.service_choice);
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let b0 = r.read_u8()?;
        if (b0 >> 4) != ApduType::SimpleAck as u8 {
            return Err(DecodeError::InvalidValue);
        }
        Ok(Self {
            invoke_id: r.read_u8()?,
            service_choice: r.read_u8()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ComplexAckHeader, ConfirmedRequestHeader, SimpleAck};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::DecodeError;

    #[test]
    fn request_header_defaults() {
        let mut w = Writer::new();
        ConfirmedRequestHeader::new(1, 0x05).encode(&mut w);
        assert_eq!(w.as_written(), &[0x00, 0x05, 0x01, 0x05]);
    }

    #[test]
    fn segmented_request_header_roundtrip() {
        let hdr = ConfirmedRequestHeader {
            segmented: true,
            more_follows: true,
            segmented_response_accepted: true,
            max_segments: 3,
            sequence_number: Some(4),
            proposed_window_size: Some(2),
            ..ConfirmedRequestHeader::new(9, 0x0c)
        };
        let mut w = Writer::new();
        hdr.encode(&mut w);
        assert_eq!(w.as_written(), &[0x0e, 0x35, 0x09, 0x04, 0x02, 0x0c]);
        let mut r = Reader::new(w.as_written());
        assert_eq!(ConfirmedRequestHeader::decode(&mut r).unwrap(), hdr);
    }

    #[test]
    fn reserved_bit_in_request_is_ignored() {
        let mut r = Reader::new(&[0x01, 0x05, 0x01, 0x0c]);
        let hdr = ConfirmedRequestHeader::decode(&mut r).unwrap();
        assert!(!hdr.segmented);
        assert_eq!(hdr.service_choice, 0x0c);
    }

    #[test]
    fn complex_ack_header_bytes() {
        let mut w = Writer::new();
        ComplexAckHeader::new(1, 0x0c).encode(&mut w);
        assert_eq!(w.as_written(), &[0x30, 0x01, 0x0c]);

        let mut r = Reader::new(&[0x38, 0x07, 0x00, 0x04, 0x0c]);
        let hdr = ComplexAckHeader::decode(&mut r).unwrap();
        assert!(hdr.segmented);
        assert_eq!(hdr.sequence_number, Some(0));
        assert_eq!(hdr.proposed_window_size, Some(4));
    }

    #[test]
    fn simple_ack_bytes() {
        let ack = SimpleAck {
            invoke_id: 5,
            service_choice: 0x0f,
        };
        let mut w = Writer::new();
        ack.encode(&mut w);
        assert_eq!(w.as_written(), &[0x20, 0x05, 0x0f]);
        let mut r = Reader::new(w.as_written());
        assert_eq!(SimpleAck::decode(&mut r).unwrap(), ack);
    }

    #[test]
    fn wrong_pdu_type_is_rejected() {
        let mut r = Reader::new(&[0x10, 0x08]);
        assert_eq!(
            SimpleAck::decode(&mut r).unwrap_err(),
            DecodeError::InvalidValue
        );
    }

    #[test]
    fn truncated_header_is_eof() {
        let mut r = Reader::new(&[0x00, 0x05]);
        assert_eq!(
            ConfirmedRequestHeader::decode(&mut r).unwrap_err(),
            DecodeError::UnexpectedEof
        );
    }
}
