use bacwire_core::types::ObjectType;
use clap::ValueEnum;
use thiserror::Error;

/// CLI-friendly enum for selecting BACnet object types.
///
/// Maps human-readable names to [`ObjectType`] variants for use with clap argument parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ObjectTypeArg {
    AnalogInput,
    AnalogOutput,
    AnalogValue,
    BinaryInput,
    BinaryOutput,
    BinaryValue,
    Calendar,
    Device,
    EventEnrollment,
    File,
    NotificationClass,
    Schedule,
    TrendLog,
    MultiStateInput,
    MultiStateOutput,
    MultiStateValue,
}

impl ObjectTypeArg {
    pub const fn into_object_type(self) -> ObjectType {
        match self {
            Self::AnalogInput => ObjectType::AnalogInput,
            Self::AnalogOutput => ObjectType::AnalogOutput,
            Self::AnalogValue => ObjectType::AnalogValue,
            Self::BinaryInput => ObjectType::BinaryInput,
            Self::BinaryOutput => ObjectType::BinaryOutput,
            Self::BinaryValue => ObjectType::BinaryValue,
            Self::Calendar => ObjectType::Calendar,
            Self::Device => ObjectType::Device,
            Self::EventEnrollment => ObjectType::EventEnrollment,
            Self::File => ObjectType::File,
            Self::NotificationClass => ObjectType::NotificationClass,
            Self::Schedule => ObjectType::Schedule,
            Self::TrendLog => ObjectType::TrendLog,
            Self::MultiStateInput => ObjectType::MultiStateInput,
            Self::MultiStateOutput => ObjectType::MultiStateOutput,
            Self::MultiStateValue => ObjectType::MultiStateValue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("invalid hex input: odd number of digits ({0})")]
    OddLength(usize),
    #[error("invalid hex input: '{0}'")]
    InvalidDigits(String),
}

/// Parses hex bytes, ignoring whitespace, `:` separators, `0x` prefixes
/// and `#` comment lines.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let digits: String = input
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(|line| line.split(|c: char| c.is_whitespace() || c == ':'))
        .map(|token| token.trim_start_matches("0x"))
        .collect();
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            let pair = digits
                .get(i..i + 2)
                .ok_or_else(|| HexError::InvalidDigits(digits.clone()))?;
            u8::from_str_radix(pair, 16).map_err(|_| HexError::InvalidDigits(pair.to_owned()))
        })
        .collect()
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
