//! BACnet/IP wire encoding and decoding in pure Rust.
//!
//! `bacwire-core` converts between raw BACnet/IP datagrams and a typed
//! message tree: BVLC framing, the NPDU network header, the APDU service
//! layer and the service bodies underneath it. Every operation is a pure
//! function over a borrowed input buffer or an owned output buffer; there is
//! no transport and no shared state.
//!
//! # Feature flags
//!
//! - **`serde`** derives `Serialize`/`Deserialize` on messages, values and
//!   vocabulary types.

/// APDU (Application Protocol Data Unit) headers and the service dispatch tree.
pub mod apdu;
/// Outbound frame builders for every supported request and acknowledgement.
pub mod builders;
/// BACnet Virtual Link Control framing for BACnet/IP.
pub mod bvlc;
/// Tag codec and the byte-level reader/writer.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// Whole-datagram decode/encode across all layers.
pub mod frame;
/// NPDU (Network Protocol Data Unit) encoding and decoding.
pub mod npdu;
/// Service bodies and the property codec.
pub mod services;
/// Object identifiers, vocabulary tables and application values.
pub mod types;

pub use error::{DecodeContext, DecodeError, EncodeError};
pub use frame::{decode_frame, encode_frame, Frame};
