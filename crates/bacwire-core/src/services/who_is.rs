use crate::encoding::{reader::Reader, writer::Writer};
use crate::types::Primitive;
use crate::{DecodeError, EncodeError};

/// Who-Is, optionally limited to a device instance range. The global form
/// has an empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WhoIsRequest {
    pub low_limit: Option<u32>,
    pub high_limit: Option<u32>,
}

impl WhoIsRequest {
    pub const fn global() -> Self {
        Self {
            low_limit: None,
            high_limit: None,
        }
    }

    pub const fn range(low: u32, high: u32) -> Self {
        Self {
            low_limit: Some(low),
            high_limit: Some(high),
        }
    }

    pub fn encode_body(&self, w: &mut Writer) -> Result<(), EncodeError> {
        if let Some(low) = self.low_limit {
            low.encode_param(w, 0)?;
        }
        if let Some(high) = self.high_limit {
            high.encode_param(w, 1)?;
        }
        Ok(())
    }

    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            low_limit: u32::read_optional_param(r, 0)?,
            high_limit: u32::read_optional_param(r, 1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::WhoIsRequest;
    use crate::encoding::{reader::Reader, writer::Writer};

    #[test]
    fn global_body_is_empty() {
        let mut w = Writer::new();
        WhoIsRequest::global().encode_body(&mut w).unwrap();
        assert!(w.is_empty());
        let mut r = Reader::new(&[]);
        assert_eq!(
            WhoIsRequest::decode_after_header(&mut r).unwrap(),
            WhoIsRequest::global()
        );
    }

    #[test]
    fn range_limits() {
        let req = WhoIsRequest::range(100, 70_000);
        let mut w = Writer::new();
        req.encode_body(&mut w).unwrap();
        assert_eq!(
            w.as_written(),
            &[0x09, 0x64, 0x1c, 0x00, 0x01, 0x11, 0x70]
        );
        let mut r = Reader::new(w.as_written());
        assert_eq!(WhoIsRequest::decode_after_header(&mut r).unwrap(), req);
    }
}
