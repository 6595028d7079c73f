use core::fmt;

use crate::pkt::opt::OptParseError;

/// Errors encounterable while parsing a packet from bytes
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum PacketParseError {
  /// Reached end of stream before end of packet
  UnexpectedEndOfStream,

  /// Version was something other than 1
  InvalidVersion(u8),

  /// Type was not one of Con, Non, Ack or Reset.
  ///
  /// Cannot occur when parsing a datagram (the type field is 2 bits
  /// wide), only when converting a loose byte with `TryFrom<u8>`.
  InvalidType(u8),

  /// Token length was > 8
  InvalidTokenLength(u8),

  /// Code had a class reserved by RFC7252 (1, 6 or 7)
  InvalidCodeClass(u8),

  /// Packet ended with the `0xFF` payload marker but no payload bytes
  PayloadMarkerWithoutPayload,

  /// Payload was longer than 1024 bytes
  PayloadTooLong(usize),

  /// Error parsing option
  OptParseError(OptParseError),
}

impl PacketParseError {
  /// Shorthand for [`PacketParseError::UnexpectedEndOfStream`]
  pub fn eof() -> Self {
    Self::UnexpectedEndOfStream
  }
}

impl fmt::Display for PacketParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::UnexpectedEndOfStream => f.write_str("unexpected end of stream"),
      | Self::InvalidVersion(v) => write!(f, "invalid version: {}", v),
      | Self::InvalidType(t) => write!(f, "invalid message type: {}", t),
      | Self::InvalidTokenLength(tkl) => write!(f, "invalid token length: {}", tkl),
      | Self::InvalidCodeClass(c) => write!(f, "invalid code class: {}", c),
      | Self::PayloadMarkerWithoutPayload => {
        f.write_str("payload marker not followed by payload bytes")
      },
      | Self::PayloadTooLong(len) => {
        write!(f, "payload length {} exceeds the 1024-byte limit", len)
      },
      | Self::OptParseError(e) => write!(f, "error parsing option: {}", e),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketParseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      | Self::OptParseError(e) => Some(e),
      | _ => None,
    }
  }
}
