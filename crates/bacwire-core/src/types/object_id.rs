use crate::types::ObjectType;
use core::fmt;

/// A packed BACnet object identifier combining an [`ObjectType`] and a 22-bit
/// instance number into a single `u32`.
///
/// The upper 10 bits encode the object type and the lower 22 bits encode the
/// instance number, matching the BACnet wire format. Out-of-range parts are
/// truncated by the masks, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(u32);

impl ObjectId {
    pub const MAX_INSTANCE: u32 = 0x3F_FFFF;

    /// Creates an `ObjectId` from a type and instance number.
    pub const fn new(object_type: ObjectType, instance: u32) -> Self {
        Self::from_parts(object_type.to_u16(), instance)
    }

    /// Creates an `ObjectId` from a raw type number and instance number.
    pub const fn from_parts(object_type: u16, instance: u32) -> Self {
        Self((((object_type as u32) & 0x03FF) << 22) | (instance & Self::MAX_INSTANCE))
    }

    /// Returns the raw packed `u32` representation.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Constructs an `ObjectId` from a pre-packed `u32`.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Extracts the [`ObjectType`] from the upper 10 bits.
    pub const fn object_type(self) -> ObjectType {
        ObjectType::from_u16(self.type_number())
    }

    /// The raw 10-bit object type number.
    pub const fn type_number(self) -> u16 {
        ((self.0 >> 22) & 0x03FF) as u16
    }

    /// Extracts the 22-bit instance number.
    pub const fn instance(self) -> u32 {
        self.0 & Self::MAX_INSTANCE
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.object_type(), self.instance())
    }
}
