/// BACnet engineering units, as carried by the `units` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineeringUnits {
    SquareMeters,
    SquareFeet,
    Milliamperes,
    Amperes,
    Ohms,
    Volts,
    Kilovolts,
    Megavolts,
    VoltAmperes,
    KilovoltAmperes,
    MegavoltAmperes,
    VoltAmperesReactive,
    KilovoltAmperesReactive,
    MegavoltAmperesReactive,
    DegreesPhase,
    PowerFactor,
    PercentRelativeHumidity,
    DegreesCelsius,
    DegreesKelvin,
    DegreesFahrenheit,
    NoUnits,
    Percent,
    Currency1,
    Currency2,
    Currency3,
    Currency4,
    Currency5,
    Currency6,
    Currency7,
    Currency8,
    Currency9,
    Currency10,
    SquareInches,
    SquareCentimeters,
    Kilohms,
    Megohms,
    Millivolts,
    MetersPerSecondPerSecond,
    AmperesPerMeter,
    AmperesPerSquareMeter,
    AmpereSquareMeters,
    Farads,
    Henrys,
    OhmMeters,
    Siemens,
    SiemensPerMeter,
    Teslas,
    VoltsPerDegreeKelvin,
    VoltsPerMeter,
    Webers,
    Microsiemens,
    Decibels,
    DecibelsMillivolt,
    DecibelsVolt,
    Millisiemens,
    OhmMeterSquaredPerMeter,
    Unknown(u32),
}

impl EngineeringUnits {
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::SquareMeters => 0,
            Self::SquareFeet => 1,
            Self::Milliamperes => 2,
            Self::Amperes => 3,
            Self::Ohms => 4,
            Self::Volts => 5,
            Self::Kilovolts => 6,
            Self::Megavolts => 7,
            Self::VoltAmperes => 8,
            Self::KilovoltAmperes => 9,
            Self::MegavoltAmperes => 10,
            Self::VoltAmperesReactive => 11,
            Self::KilovoltAmperesReactive => 12,
            Self::MegavoltAmperesReactive => 13,
            Self::DegreesPhase => 14,
            Self::PowerFactor => 15,
            Self::PercentRelativeHumidity => 29,
            Self::DegreesCelsius => 62,
            Self::DegreesKelvin => 63,
            Self::DegreesFahrenheit => 64,
            Self::NoUnits => 95,
            Self::Percent => 98,
            Self::Currency1 => 105,
            Self::Currency2 => 106,
            Self::Currency3 => 107,
            Self::Currency4 => 108,
            Self::Currency5 => 109,
            Self::Currency6 => 110,
            Self::Currency7 => 111,
            Self::Currency8 => 112,
            Self::Currency9 => 113,
            Self::Currency10 => 114,
            Self::SquareInches => 115,
            Self::SquareCentimeters => 116,
            Self::Kilohms => 122,
            Self::Megohms => 123,
            Self::Millivolts => 124,
            Self::MetersPerSecondPerSecond => 166,
            Self::AmperesPerMeter => 167,
            Self::AmperesPerSquareMeter => 168,
            Self::AmpereSquareMeters => 169,
            Self::Farads => 170,
            Self::Henrys => 171,
            Self::OhmMeters => 172,
            Self::Siemens => 173,
            Self::SiemensPerMeter => 174,
            Self::Teslas => 175,
            Self::VoltsPerDegreeKelvin => 176,
            Self::VoltsPerMeter => 177,
            Self::Webers => 178,
            Self::Microsiemens => 190,
            Self::Decibels => 199,
            Self::DecibelsMillivolt => 200,
            Self::DecibelsVolt => 201,
            Self::Millisiemens => 202,
            Self::OhmMeterSquaredPerMeter => 237,
            Self::Unknown(v) => v,
        }
    }

    pub const fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::SquareMeters,
            1 => Self::SquareFeet,
            2 => Self::Milliamperes,
            3 => Self::Amperes,
            4 => Self::Ohms,
            5 => Self::Volts,
            6 => Self::Kilovolts,
            7 => Self::Megavolts,
            8 => Self::VoltAmperes,
            9 => Self::KilovoltAmperes,
            10 => Self::MegavoltAmperes,
            11 => Self::VoltAmperesReactive,
            12 => Self::KilovoltAmperesReactive,
            13 => Self::MegavoltAmperesReactive,
            14 => Self::DegreesPhase,
            15 => Self::PowerFactor,
            29 => Self::PercentRelativeHumidity,
            62 => Self::DegreesCelsius,
            63 => Self::DegreesKelvin,
            64 => Self::DegreesFahrenheit,
            95 => Self::NoUnits,
            98 => Self::Percent,
            105 => Self::Currency1,
            106 => Self::Currency2,
            107 => Self::Currency3,
            108 => Self::Currency4,
            109 => Self::Currency5,
            110 => Self::Currency6,
            111 => Self::Currency7,
            112 => Self::Currency8,
            113 => Self::Currency9,
            114 => Self::Currency10,
            115 => Self::SquareInches,
            116 => Self::SquareCentimeters,
            122 => Self::Kilohms,
            123 => Self::Megohms,
            124 => Self::Millivolts,
            166 => Self::MetersPerSecondPerSecond,
            167 => Self::AmperesPerMeter,
            168 => Self::AmperesPerSquareMeter,
            169 => Self::AmpereSquareMeters,
            170 => Self::Farads,
            171 => Self::Henrys,
            172 => Self::OhmMeters,
            173 => Self::Siemens,
            174 => Self::SiemensPerMeter,
            175 => Self::Teslas,
            176 => Self::VoltsPerDegreeKelvin,
            177 => Self::VoltsPerMeter,
            178 => Self::Webers,
            190 => Self::Microsiemens,
            199 => Self::Decibels,
            200 => Self::DecibelsMillivolt,
            201 => Self::DecibelsVolt,
            202 => Self::Millisiemens,
            237 => Self::OhmMeterSquaredPerMeter,
            v => Self::Unknown(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineeringUnits;

    #[test]
    fn units_roundtrip() {
        assert_eq!(EngineeringUnits::from_u32(62), EngineeringUnits::DegreesCelsius);
        assert_eq!(EngineeringUnits::NoUnits.to_u32(), 95);
        assert_eq!(EngineeringUnits::from_u32(237).to_u32(), 237);
        assert_eq!(EngineeringUnits::from_u32(9999), EngineeringUnits::Unknown(9999));
    }
}
