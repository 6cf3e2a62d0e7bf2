use crate::apdu::Apdu;
use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeContext, DecodeError, EncodeError};

/// BACnet network layer protocol version (always `0x01`).
pub const NPDU_VERSION: u8 = 0x01;
/// Destination network number addressing every network.
pub const GLOBAL_BROADCAST_NETWORK: u16 = 0xFFFF;
/// Hop count written when a destination is present and none was given.
pub const DEFAULT_HOP_COUNT: u8 = 0xFF;

const CONTROL_NETWORK_MESSAGE: u8 = 0x80;
const CONTROL_DESTINATION: u8 = 0x20;
const CONTROL_SOURCE: u8 = 0x08;
const CONTROL_EXPECTING_REPLY: u8 = 0x04;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NetworkPriority {
    #[default]
    Normal = 0,
    Urgent = 1,
    CriticalEquipment = 2,
    LifeSafety = 3,
}

impl NetworkPriority {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Normal,
            1 => Self::Urgent,
            2 => Self::CriticalEquipment,
            _ => Self::LifeSafety,
        }
    }
}

/// The control byte, minus the address-present bits, which follow from
/// whether [`Npdu`] carries a destination or source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpduControl {
    pub network_message: bool,
    pub expecting_reply: bool,
    pub priority: NetworkPriority,
}

/// A network-layer address: network number plus MAC address. An empty MAC
/// is a broadcast on that network.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpduAddress {
    pub network: u16,
    pub mac: Vec<u8>,
}

/// BACnet Network Protocol Data Unit (NPDU) header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npdu {
    pub control: NpduControl,
    pub destination: Option<NpduAddress>,
    pub source: Option<NpduAddress>,
    /// Only present alongside a destination.
    pub hop_count: Option<u8>,
}

impl Npdu {
    /// Local delivery, no addressing: encodes as `01 00`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination on every network: encodes as `01 20 ff ff 00 ff`.
    pub fn global_broadcast() -> Self {
        Self {
            destination: Some(NpduAddress {
                network: GLOBAL_BROADCAST_NETWORK,
                mac: Vec::new(),
            }),
            hop_count: Some(DEFAULT_HOP_COUNT),
            ..Self::default()
        }
    }

    pub fn control_byte(&self) -> u8 {
        let mut control = self.control.priority as u8;
        if self.control.network_message {
            control |= CONTROL_NETWORK_MESSAGE;
        }
        if self.destination.is_some() {
            control |= CONTROL_DESTINATION;
        }
        if self.source.is_some() {
            control |= CONTROL_SOURCE;
        }
        if self.control.expecting_reply {
            control |= CONTROL_EXPECTING_REPLY;
        }
        control
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_u8(NPDU_VERSION);
        w.write_u8(self.control_byte());

        if let Some(dest) = &self.destination {
            encode_addr(w, dest)?;
        }
        if let Some(src) = &self.source {
            encode_addr(w, src)?;
        }
        if self.destination.is_some() {
            w.write_u8(self.hop_count.unwrap_or(DEFAULT_HOP_COUNT));
        }
        Ok(())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let version = r.read_u8()?;
        if version != NPDU_VERSION {
            return Err(DecodeError::InvalidValue);
        }

        let control = r.read_u8()?;
        let has_dest = (control & CONTROL_DESTINATION) != 0;
        let has_src = (control & CONTROL_SOURCE) != 0;

        let destination = if has_dest {
            Some(decode_addr(r)?)
        } else {
            None
        };
        let source = if has_src { Some(decode_addr(r)?) } else { None };
        let hop_count = if has_dest { Some(r.read_u8()?) } else { None };

        Ok(Self {
            control: NpduControl {
                network_message: (control & CONTROL_NETWORK_MESSAGE) != 0,
                expecting_reply: (control & CONTROL_EXPECTING_REPLY) != 0,
                priority: NetworkPriority::from_bits(control),
            },
            destination,
            source,
            hop_count,
        })
    }
}

fn encode_addr(w: &mut Writer, addr: &NpduAddress) -> Result<(), EncodeError> {
    let mac_len = u8::try_from(addr.mac.len()).map_err(|_| EncodeError::InvalidLength)?;
    w.write_be_u16(addr.network);
    w.write_u8(mac_len);
    w.write_all(&addr.mac);
    Ok(())
}

fn decode_addr(r: &mut Reader<'_>) -> Result<NpduAddress, DecodeError> {
    let network = r.read_be_u16()?;
    let mac_len = r.read_u8()?;
    let mac = r.read_exact(mac_len as usize)?.to_vec();
    Ok(NpduAddress { network, mac })
}

/// A network-layer message, carried in place of an APDU.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkMessage {
    pub message_type: u8,
    /// Present for proprietary message types (`0x80` and up).
    pub vendor_id: Option<u16>,
    pub data: Vec<u8>,
}

impl NetworkMessage {
    pub fn encode(&self, w: &mut Writer) {
        w.write_u8(self.message_type);
        if self.message_type >= 0x80 {
            w.write_be_u16(self.vendor_id.unwrap_or(0));
        }
        w.write_all(&self.data);
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let message_type = r.read_u8()?;
        let vendor_id = if message_type >= 0x80 {
            Some(r.read_be_u16()?)
        } else {
            None
        };
        let data = r.read_exact(r.remaining())?.to_vec();
        Ok(Self {
            message_type,
            vendor_id,
            data,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NpduBody {
    Apdu(Apdu),
    NetworkMessage(NetworkMessage),
}

/// An NPDU header together with what it carries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpduMessage {
    pub npdu: Npdu,
    pub body: NpduBody,
}

impl NpduMessage {
    pub fn new(npdu: Npdu, apdu: Apdu) -> Self {
        Self {
            npdu,
            body: NpduBody::Apdu(apdu),
        }
    }

    pub fn apdu(&self) -> Option<&Apdu> {
        match &self.body {
            NpduBody::Apdu(apdu) => Some(apdu),
            NpduBody::NetworkMessage(_) => None,
        }
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        decode_message(r).context("NPDU", "decode")
    }

    /// Writes the header and the body into separate buffers. The
    /// network-message control bit follows the body.
    pub fn encode_layers(&self, npdu_w: &mut Writer, body_w: &mut Writer) -> Result<(), EncodeError> {
        let mut npdu = self.npdu.clone();
        npdu.control.network_message = matches!(self.body, NpduBody::NetworkMessage(_));
        npdu.encode(npdu_w)?;
        match &self.body {
            NpduBody::Apdu(apdu) => apdu.encode(body_w),
            NpduBody::NetworkMessage(msg) => {
                msg.encode(body_w);
                Ok(())
            }
        }
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        let mut body_w = Writer::new();
        self.encode_layers(w, &mut body_w)?;
        w.write_all(body_w.as_written());
        Ok(())
    }
}

fn decode_message(r: &mut Reader<'_>) -> Result<NpduMessage, DecodeError> {
    let npdu = Npdu::decode(r)?;
    let body = if npdu.control.network_message {
        NpduBody::NetworkMessage(NetworkMessage::decode(r)?)
    } else {
        NpduBody::Apdu(Apdu::decode(r)?)
    };
    Ok(NpduMessage { npdu, body })
}
