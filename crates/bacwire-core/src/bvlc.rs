use std::net::{Ipv4Addr, SocketAddrV4};

use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

pub const BVLC_TYPE_BIP: u8 = 0x81;
/// Length of the type, function and length fields.
pub const BVLC_HEADER_LEN: usize = 4;
/// The standard BACnet/IP UDP port, 47808.
pub const BACNET_IP_PORT: u16 = 0xBAC0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BvlcFunction {
    Result,
    WriteBroadcastDistributionTable,
    ReadBroadcastDistributionTable,
    ReadBroadcastDistributionTableAck,
    ForwardedNpdu,
    RegisterForeignDevice,
    ReadForeignDeviceTable,
    ReadForeignDeviceTableAck,
    DeleteForeignDeviceTableEntry,
    DistributeBroadcastToNetwork,
    OriginalUnicastNpdu,
    OriginalBroadcastNpdu,
    Unknown(u8),
}

impl BvlcFunction {
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x00 => Self::Result,
            0x01 => Self::WriteBroadcastDistributionTable,
            0x02 => Self::ReadBroadcastDistributionTable,
            0x03 => Self::ReadBroadcastDistributionTableAck,
            0x04 => Self::ForwardedNpdu,
            0x05 => Self::RegisterForeignDevice,
            0x06 => Self::ReadForeignDeviceTable,
            0x07 => Self::ReadForeignDeviceTableAck,
            0x08 => Self::DeleteForeignDeviceTableEntry,
            0x09 => Self::DistributeBroadcastToNetwork,
            0x0A => Self::OriginalUnicastNpdu,
            0x0B => Self::OriginalBroadcastNpdu,
            v => Self::Unknown(v),
        }
    }

    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Result => 0x00,
            Self::WriteBroadcastDistributionTable => 0x01,
            Self::ReadBroadcastDistributionTable => 0x02,
            Self::ReadBroadcastDistributionTableAck => 0x03,
            Self::ForwardedNpdu => 0x04,
            Self::RegisterForeignDevice => 0x05,
            Self::ReadForeignDeviceTable => 0x06,
            Self::ReadForeignDeviceTableAck => 0x07,
            Self::DeleteForeignDeviceTableEntry => 0x08,
            Self::DistributeBroadcastToNetwork => 0x09,
            Self::OriginalUnicastNpdu => 0x0A,
            Self::OriginalBroadcastNpdu => 0x0B,
            Self::Unknown(v) => v,
        }
    }

    /// Whether frames with this function carry an NPDU.
    pub const fn carries_npdu(self) -> bool {
        matches!(
            self,
            Self::OriginalUnicastNpdu
                | Self::OriginalBroadcastNpdu
                | Self::DistributeBroadcastToNetwork
                | Self::ForwardedNpdu
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BvlcHeader {
    pub function: BvlcFunction,
    /// Total frame length, header included.
    pub length: u16,
}

impl BvlcHeader {
    /// Header for a frame whose payload is `payload_len` bytes.
    pub fn for_payload(function: BvlcFunction, payload_len: usize) -> Result<Self, EncodeError> {
        let length = u16::try_from(BVLC_HEADER_LEN + payload_len)
            .map_err(|_| EncodeError::InvalidLength)?;
        Ok(Self { function, length })
    }

    pub fn encode(&self, w: &mut Writer) {
        w.write_u8(BVLC_TYPE_BIP);
        w.write_u8(self.function.to_u8());
        w.write_be_u16(self.length);
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        if r.read_u8()? != BVLC_TYPE_BIP {
            return Err(DecodeError::InvalidValue);
        }
        let function = BvlcFunction::from_u8(r.read_u8()?);
        let length = r.read_be_u16()?;
        if (length as usize) < BVLC_HEADER_LEN {
            return Err(DecodeError::InvalidLength);
        }
        Ok(Self { function, length })
    }

    pub const fn payload_len(&self) -> usize {
        self.length as usize - BVLC_HEADER_LEN
    }
}

/// Originating address carried by a Forwarded-NPDU: IPv4 address then port.
pub fn encode_origin(w: &mut Writer, origin: SocketAddrV4) {
    w.write_all(&origin.ip().octets());
    w.write_be_u16(origin.port());
}

pub fn decode_origin(r: &mut Reader<'_>) -> Result<SocketAddrV4, DecodeError> {
    let ip = r.read_exact(4)?;
    let port = r.read_be_u16()?;
    Ok(SocketAddrV4::new(
        Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]),
        port,
    ))
}

#[cfg(test)]
mod tests {
    use super::{
        decode_origin, encode_origin, BvlcFunction, BvlcHeader, BACNET_IP_PORT, BVLC_TYPE_BIP,
    };
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::{DecodeError, EncodeError};
    use std::net::{Ipv4Addr, SocketAddrV4};

    #[test]
    fn bvlc_roundtrip() {
        let h = BvlcHeader {
            function: BvlcFunction::OriginalBroadcastNpdu,
            length: 12,
        };
        let mut w = Writer::new();
        h.encode(&mut w);
        assert_eq!(w.as_written(), &[0x81, 0x0b, 0x00, 0x0c]);
        let mut r = Reader::new(w.as_written());
        let decoded = BvlcHeader::decode(&mut r).unwrap();
        assert_eq!(decoded, h);
        assert_eq!(decoded.payload_len(), 8);
    }

    #[test]
    fn unknown_function_decodes() {
        let mut r = Reader::new(&[BVLC_TYPE_BIP, 0x99, 0, 4]);
        let decoded = BvlcHeader::decode(&mut r).unwrap();
        assert_eq!(decoded.function, BvlcFunction::Unknown(0x99));
        assert!(!decoded.function.carries_npdu());
    }

    #[test]
    fn bad_type_and_short_length() {
        let mut r = Reader::new(&[0x82, 0x0a, 0, 4]);
        assert_eq!(
            BvlcHeader::decode(&mut r).unwrap_err(),
            DecodeError::InvalidValue
        );
        let mut r = Reader::new(&[0x81, 0x0a, 0, 3]);
        assert_eq!(
            BvlcHeader::decode(&mut r).unwrap_err(),
            DecodeError::InvalidLength
        );
    }

    #[test]
    fn payload_length_must_fit() {
        let h = BvlcHeader::for_payload(BvlcFunction::OriginalUnicastNpdu, 5).unwrap();
        assert_eq!(h.length, 9);
        assert_eq!(
            BvlcHeader::for_payload(BvlcFunction::OriginalUnicastNpdu, 70_000).unwrap_err(),
            EncodeError::InvalidLength
        );
    }

    #[test]
    fn origin_address() {
        let origin = SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 7), BACNET_IP_PORT);
        let mut w = Writer::new();
        encode_origin(&mut w, origin);
        assert_eq!(w.as_written(), &[10, 0, 0, 7, 0xba, 0xc0]);
        let mut r = Reader::new(w.as_written());
        assert_eq!(decode_origin(&mut r).unwrap(), origin);
    }
}
