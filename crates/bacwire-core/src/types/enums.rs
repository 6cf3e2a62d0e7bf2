/// Segmentation capability advertised during device discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Segmentation {
    SegmentedBoth = 0,
    SegmentedTransmit = 1,
    SegmentedReceive = 2,
    NoSegmentation = 3,
}

/// Maximum APDU length accepted by a device, as the 4-bit code carried in
/// confirmed request headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MaxApdu {
    UpTo50 = 0,
    UpTo128 = 1,
    UpTo206 = 2,
    UpTo480 = 3,
    UpTo1024 = 4,
    UpTo1476 = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EventState {
    Normal = 0,
    Fault = 1,
    Offnormal = 2,
    HighLimit = 3,
    LowLimit = 4,
    LifeSafetyAlarm = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Reliability {
    NoFaultDetected = 0,
    NoSensor = 1,
    OverRange = 2,
    UnderRange = 3,
    OpenLoop = 4,
    ShortedLoop = 5,
    NoOutput = 6,
    UnreliableOther = 7,
    ProcessError = 8,
    MultiStateFault = 9,
    ConfigurationError = 10,
    CommunicationFailure = 12,
    MemberFault = 13,
    MonitoredObjectFault = 14,
    Tripped = 15,
    LampFailure = 16,
    ActivationFailure = 17,
    RenewDhcpFailure = 18,
    RenewFdRegistrationFailure = 19,
    RestartAutoNegotiationFailure = 20,
    RestartFailure = 21,
    ProprietaryCommandFailure = 22,
    FaultsListed = 23,
    ReferencedObjectFault = 24,
}

/// Present value of binary objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BinaryPv {
    Inactive = 0,
    Active = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Polarity {
    Normal = 0,
    Reverse = 1,
}

impl Segmentation {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::SegmentedBoth),
            1 => Some(Self::SegmentedTransmit),
            2 => Some(Self::SegmentedReceive),
            3 => Some(Self::NoSegmentation),
            _ => None,
        }
    }
}

impl MaxApdu {
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::UpTo50),
            1 => Some(Self::UpTo128),
            2 => Some(Self::UpTo206),
            3 => Some(Self::UpTo480),
            4 => Some(Self::UpTo1024),
            5 => Some(Self::UpTo1476),
            _ => None,
        }
    }

    /// Largest APDU, in octets, this code allows.
    pub const fn octets(self) -> u32 {
        match self {
            Self::UpTo50 => 50,
            Self::UpTo128 => 128,
            Self::UpTo206 => 206,
            Self::UpTo480 => 480,
            Self::UpTo1024 => 1024,
            Self::UpTo1476 => 1476,
        }
    }
}

impl EventState {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Fault),
            2 => Some(Self::Offnormal),
            3 => Some(Self::HighLimit),
            4 => Some(Self::LowLimit),
            5 => Some(Self::LifeSafetyAlarm),
            _ => None,
        }
    }
}

impl Reliability {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::NoFaultDetected),
            1 => Some(Self::NoSensor),
            2 => Some(Self::OverRange),
            3 => Some(Self::UnderRange),
            4 => Some(Self::OpenLoop),
            5 => Some(Self::ShortedLoop),
            6 => Some(Self::NoOutput),
            7 => Some(Self::UnreliableOther),
            8 => Some(Self::ProcessError),
            9 => Some(Self::MultiStateFault),
            10 => Some(Self::ConfigurationError),
            12 => Some(Self::CommunicationFailure),
            13 => Some(Self::MemberFault),
            14 => Some(Self::MonitoredObjectFault),
            15 => Some(Self::Tripped),
            16 => Some(Self::LampFailure),
            17 => Some(Self::ActivationFailure),
            18 => Some(Self::RenewDhcpFailure),
            19 => Some(Self::RenewFdRegistrationFailure),
            20 => Some(Self::RestartAutoNegotiationFailure),
            21 => Some(Self::RestartFailure),
            22 => Some(Self::ProprietaryCommandFailure),
            23 => Some(Self::FaultsListed),
            24 => Some(Self::ReferencedObjectFault),
            _ => None,
        }
    }
}

impl BinaryPv {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Inactive),
            1 => Some(Self::Active),
            _ => None,
        }
    }
}

impl Polarity {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Reverse),
            _ => None,
        }
    }
}
