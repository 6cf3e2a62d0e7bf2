/// Raw unsigned helpers and bracket (opening/closing tag) helpers.
pub mod primitives;
/// Cursor reader over a borrowed frame, with optional and peek reads.
pub mod reader;
/// BACnet tag byte codec (application, context, opening/closing).
pub mod tag;
/// Growable byte writer used by every encoder.
pub mod writer;
