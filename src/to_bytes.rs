use alloc::vec::Vec;
use core::fmt;

use tinyvec::ArrayVec;

use crate::pkt::{Byte1, Id, Packet, Type};

/// Trait allowing fallible conversion into bytes
pub trait TryIntoBytes {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to convert into a collection of bytes
  ///
  /// Construction rules are checked before any byte is produced; an
  /// `Err` means nothing was serialized.
  ///
  /// ```
  /// use coap_packet::{Packet, TryIntoBytes, Type};
  ///
  /// let pkt = Packet::builder().ty(Type::Non)
  ///                            .id(0x47CD)
  ///                            .payload("Hello World")
  ///                            .build()
  ///                            .unwrap();
  ///
  /// let bytes: Vec<u8> = pkt.try_into_bytes().unwrap();
  /// assert_eq!(bytes,
  ///            vec![0x50, 0x01, 0x47, 0xCD, 0xFF, b'H', b'e', b'l', b'l', b'o', b' ', b'W',
  ///                 b'o', b'r', b'l', b'd']);
  /// ```
  fn try_into_bytes(self) -> Result<Vec<u8>, Self::Error>;
}

/// Errors encounterable serializing a packet to bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PacketToBytesError {
  /// Token was longer than 8 bytes
  InvalidTokenLength(usize),

  /// Code had a class reserved by RFC7252 (1, 6 or 7)
  InvalidCodeClass(u8),

  /// Code was `0.00` but the packet carried a token, options or a payload
  InvalidEmptyMessage,

  /// An option value was longer than 1034 bytes
  OptionValueTooLong(usize),

  /// Payload was longer than 1024 bytes
  PayloadTooLong(usize),

  /// Buffer provided to [`serialize_into`](crate::Packet::serialize_into)
  /// cannot hold the serialized packet
  #[allow(missing_docs)]
  BufferTooSmall { capacity: usize, size: usize },
}

impl fmt::Display for PacketToBytesError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::InvalidTokenLength(len) => write!(f, "token length {} exceeds 8 bytes", len),
      | Self::InvalidCodeClass(c) => write!(f, "invalid code class: {}", c),
      | Self::InvalidEmptyMessage => {
        f.write_str("empty message (code 0.00) may not carry a token, options or payload")
      },
      | Self::OptionValueTooLong(len) => {
        write!(f, "option value length {} exceeds the 1034-byte limit", len)
      },
      | Self::PayloadTooLong(len) => {
        write!(f, "payload length {} exceeds the 1024-byte limit", len)
      },
      | Self::BufferTooSmall { capacity, size } => {
        write!(f, "buffer of {} bytes cannot hold a {}-byte packet", capacity, size)
      },
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketToBytesError {}

impl TryIntoBytes for Packet {
  type Error = PacketToBytesError;

  fn try_into_bytes(self) -> Result<Vec<u8>, Self::Error> {
    self.validate()?;

    let mut bytes = Vec::with_capacity(self.wire_size());
    self.extend_with(&mut bytes);

    Ok(bytes)
  }
}

// Emits one option delta or length as (nibble, extension bytes).
//
// The option header byte holds two such nibbles (delta, then length),
// each optionally followed by 1 or 2 extension bytes in the same order:
// all of the delta's bytes precede all of the length's. Parsing mirrors
// this and must consume the delta's extensions first.
pub(crate) fn opt_len_or_delta(val: u16) -> (u8, Option<ArrayVec<[u8; 2]>>) {
  match val {
    | n if n >= 269 => {
      let mut bytes = ArrayVec::new();
      bytes.extend((n - 269).to_be_bytes());
      (14, Some(bytes))
    },
    | n if n >= 13 => {
      let mut bytes = ArrayVec::new();
      bytes.push((n - 13) as u8);
      (13, Some(bytes))
    },
    | n => (n as u8, None),
  }
}

impl From<Id> for [u8; 2] {
  fn from(id: Id) -> [u8; 2] {
    id.0.to_be_bytes()
  }
}

impl From<Type> for u8 {
  fn from(t: Type) -> u8 {
    use Type::*;
    match t {
      | Con => 0,
      | Non => 1,
      | Ack => 2,
      | Reset => 3,
    }
  }
}

impl From<Byte1> for u8 {
  fn from(b: Byte1) -> u8 {
    let ver = b.ver.0 << 6;
    let ty = u8::from(b.ty) << 4;
    let tkl = b.tkl;

    ver | ty | tkl
  }
}
