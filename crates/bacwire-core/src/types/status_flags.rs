/// The four-flag bit string carried by the `status-flags` property.
///
/// On the wire the flags occupy bits 7 to 4 of a single byte, in the order
/// in-alarm, fault, overridden, out-of-service. The remaining bits are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusFlags {
    pub in_alarm: bool,
    pub fault: bool,
    pub overridden: bool,
    pub out_of_service: bool,
}

impl StatusFlags {
    /// Unused trailing bits in the encoded bit string.
    pub const UNUSED_BITS: u8 = 0x04;

    pub const fn to_bits(self) -> u8 {
        let mut bits = 0u8;
        if self.in_alarm {
            bits |= 0b1000_0000;
        }
        if self.fault {
            bits |= 0b0100_0000;
        }
        if self.overridden {
            bits |= 0b0010_0000;
        }
        if self.out_of_service {
            bits |= 0b0001_0000;
        }
        bits
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self {
            in_alarm: bits & 0b1000_0000 != 0,
            fault: bits & 0b0100_0000 != 0,
            overridden: bits & 0b0010_0000 != 0,
            out_of_service: bits & 0b0001_0000 != 0,
        }
    }
}
