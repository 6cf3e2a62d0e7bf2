/// BACnet property identifiers.
///
/// Properties this codec knows by name are variants; vendor-specific or
/// unrecognised identifiers use [`Proprietary`](Self::Proprietary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyId {
    ApduSegmentTimeout,
    ApduTimeout,
    ApplicationSoftwareVersion,
    ChangeOfStateCount,
    ChangeOfStateTime,
    CovIncrement,
    Description,
    DeviceAddressBinding,
    ElapsedActiveTime,
    EventState,
    FirmwareRevision,
    LocalDate,
    LocalTime,
    MaxApduLengthAccepted,
    MaxInfoFrames,
    MaxMaster,
    MaxPresValue,
    MinimumOffTime,
    MinimumOnTime,
    MinPresValue,
    ModelName,
    NumberOfApduRetries,
    NumberOfStates,
    ObjectIdentifier,
    ObjectList,
    ObjectName,
    ObjectType,
    OutOfService,
    Polarity,
    PresentValue,
    PriorityArray,
    ProtocolObjectTypesSupported,
    ProtocolServicesSupported,
    ProtocolVersion,
    Reliability,
    RelinquishDefault,
    SegmentationSupported,
    StateText,
    StatusFlags,
    SystemStatus,
    TimeOfActiveTimeReset,
    TimeOfStateCountReset,
    Units,
    VendorIdentifier,
    VendorName,
    ProtocolRevision,
    DatabaseRevision,
    CurrentCommandPriority,
    Proprietary(u32),
}

impl PropertyId {
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::ApduSegmentTimeout => 10,
            Self::ApduTimeout => 11,
            Self::ApplicationSoftwareVersion => 12,
            Self::ChangeOfStateCount => 15,
            Self::ChangeOfStateTime => 16,
            Self::CovIncrement => 22,
            Self::Description => 28,
            Self::DeviceAddressBinding => 30,
            Self::ElapsedActiveTime => 33,
            Self::EventState => 36,
            Self::FirmwareRevision => 44,
            Self::LocalDate => 56,
            Self::LocalTime => 57,
            Self::MaxApduLengthAccepted => 62,
            Self::MaxInfoFrames => 63,
            Self::MaxMaster => 64,
            Self::MaxPresValue => 65,
            Self::MinimumOffTime => 66,
            Self::MinimumOnTime => 67,
            Self::MinPresValue => 69,
            Self::ModelName => 70,
            Self::NumberOfApduRetries => 73,
            Self::NumberOfStates => 74,
            Self::ObjectIdentifier => 75,
            Self::ObjectList => 76,
            Self::ObjectName => 77,
            Self::ObjectType => 79,
            Self::OutOfService => 81,
            Self::Polarity => 84,
            Self::PresentValue => 85,
            Self::PriorityArray => 87,
            Self::ProtocolObjectTypesSupported => 96,
            Self::ProtocolServicesSupported => 97,
            Self::ProtocolVersion => 98,
            Self::Reliability => 103,
            Self::RelinquishDefault => 104,
            Self::SegmentationSupported => 107,
            Self::StateText => 110,
            Self::StatusFlags => 111,
            Self::SystemStatus => 112,
            Self::TimeOfActiveTimeReset => 114,
            Self::TimeOfStateCountReset => 115,
            Self::Units => 117,
            Self::VendorIdentifier => 120,
            Self::VendorName => 121,
            Self::ProtocolRevision => 139,
            Self::DatabaseRevision => 155,
            Self::CurrentCommandPriority => 431,
            Self::Proprietary(v) => v,
        }
    }

    pub const fn from_u32(value: u32) -> Self {
        match value {
            10 => Self::ApduSegmentTimeout,
            11 => Self::ApduTimeout,
            12 => Self::ApplicationSoftwareVersion,
            15 => Self::ChangeOfStateCount,
            16 => Self::ChangeOfStateTime,
            22 => Self::CovIncrement,
            28 => Self::Description,
            30 => Self::DeviceAddressBinding,
            33 => Self::ElapsedActiveTime,
            36 => Self::EventState,
            44 => Self::FirmwareRevision,
            56 => Self::LocalDate,
            57 => Self::LocalTime,
            62 => Self::MaxApduLengthAccepted,
            63 => Self::MaxInfoFrames,
            64 => Self::MaxMaster,
            65 => Self::MaxPresValue,
            66 => Self::MinimumOffTime,
            67 => Self::MinimumOnTime,
            69 => Self::MinPresValue,
            70 => Self::ModelName,
            73 => Self::NumberOfApduRetries,
            74 => Self::NumberOfStates,
            75 => Self::ObjectIdentifier,
            76 => Self::ObjectList,
            77 => Self::ObjectName,
            79 => Self::ObjectType,
            81 => Self::OutOfService,
            84 => Self::Polarity,
            85 => Self::PresentValue,
            87 => Self::PriorityArray,
            96 => Self::ProtocolObjectTypesSupported,
            97 => Self::ProtocolServicesSupported,
            98 => Self::ProtocolVersion,
            103 => Self::Reliability,
            104 => Self::RelinquishDefault,
            107 => Self::SegmentationSupported,
            110 => Self::StateText,
            111 => Self::StatusFlags,
            112 => Self::SystemStatus,
            114 => Self::TimeOfActiveTimeReset,
            115 => Self::TimeOfStateCountReset,
            117 => Self::Units,
            120 => Self::VendorIdentifier,
            121 => Self::VendorName,
            139 => Self::ProtocolRevision,
            155 => Self::DatabaseRevision,
            431 => Self::CurrentCommandPriority,
            v => Self::Proprietary(v),
        }
    }
}
