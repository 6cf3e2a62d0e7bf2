/// PDU type carried in the high nibble of the first APDU byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ApduType {
    ConfirmedRequest = 0,
    UnconfirmedRequest = 1,
    SimpleAck = 2,
    ComplexAck = 3,
    SegmentAck = 4,
    Error = 5,
    Reject = 6,
    Abort = 7,
}

impl ApduType {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::ConfirmedRequest),
            1 => Some(Self::UnconfirmedRequest),
            2 => Some(Self::SimpleAck),
            3 => Some(Self::ComplexAck),
            4 => Some(Self::SegmentAck),
            5 => Some(Self::Error),
            6 => Some(Self::Reject),
            7 => Some(Self::Abort),
            _ => None,
        }
    }

    /// The PDU type of an APDU whose first byte is `b0`.
    pub const fn from_first_byte(b0: u8) -> Option<Self> {
        Self::from_u8(b0 >> 4)
    }

    pub const fn first_byte(self) -> u8 {
        (self as u8) << 4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ConfirmedServiceChoice {
    SubscribeCov = 5,
    ReadProperty = 12,
    ReadPropertyMultiple = 14,
    WriteProperty = 15,
    WritePropertyMultiple = 16,
}

impl ConfirmedServiceChoice {
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            5 => Some(Self::SubscribeCov),
            12 => Some(Self::ReadProperty),
            14 => Some(Self::ReadPropertyMultiple),
            15 => Some(Self::WriteProperty),
            16 => Some(Self::WritePropertyMultiple),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum UnconfirmedServiceChoice {
    IAm = 0,
    IHave = 1,
    CovNotification = 2,
    EventNotification = 3,
    WhoHas = 7,
    WhoIs = 8,
}

impl UnconfirmedServiceChoice {
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::IAm),
            1 => Some(Self::IHave),
            2 => Some(Self::CovNotification),
            3 => Some(Self::EventNotification),
            7 => Some(Self::WhoHas),
            8 => Some(Self::WhoIs),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApduType, ConfirmedServiceChoice, UnconfirmedServiceChoice};

    #[test]
    fn pdu_type_from_high_nibble() {
        assert_eq!(ApduType::from_first_byte(0x30), Some(ApduType::ComplexAck));
        assert_eq!(ApduType::from_first_byte(0x72), Some(ApduType::Abort));
        assert_eq!(ApduType::from_first_byte(0x80), None);
        assert_eq!(ApduType::SimpleAck.first_byte(), 0x20);
    }

    #[test]
    fn service_choice_numbers() {
        assert_eq!(ConfirmedServiceChoice::ReadProperty.to_u8(), 0x0c);
        assert_eq!(
            ConfirmedServiceChoice::from_u8(0x0f),
            Some(ConfirmedServiceChoice::WriteProperty)
        );
        assert_eq!(ConfirmedServiceChoice::from_u8(0x1a), None);
        assert_eq!(UnconfirmedServiceChoice::WhoIs.to_u8(), 8);
        assert_eq!(
            UnconfirmedServiceChoice::from_u8(2),
            Some(UnconfirmedServiceChoice::CovNotification)
        );
        assert_eq!(UnconfirmedServiceChoice::from_u8(4), None);
    }
}
