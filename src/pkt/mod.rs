use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::from_bytes::{TryConsumeBytes, TryFromBytes};
use crate::to_bytes::PacketToBytesError;

/// Message Code
pub mod code;

/// Packet parsing errors
pub mod parse_error;

/// Message ID
pub mod id;

/// Packet Options
pub mod opt;

/// Message Type
pub mod ty;

/// Message Token
pub mod token;

/// Protocol Version
pub mod ver;

/// Packet builder
pub mod build;

pub use build::*;
pub use code::*;
pub use id::*;
pub use opt::*;
pub use parse_error::*;
pub use token::*;
pub use ty::*;
pub use ver::*;

/// Maximum length in bytes of a packet's payload
pub const MAX_PAYLOAD_LEN: usize = 1024;

/// Maximum length in bytes of a single option's value
pub const MAX_OPT_VALUE_LEN: usize = 1034;

/// Byte separating a packet's options from its payload
pub const PAYLOAD_MARKER: u8 = 0xFF;

/// Payload
///
/// The body of a packet; request data for requests, response
/// data for responses. May be empty, in which case neither it nor the
/// `0xFF` marker that would precede it appear on the wire.
///
/// At most [`MAX_PAYLOAD_LEN`] bytes long.
///
/// # Related
/// - [RFC7252#section-5.5 Payloads and Representations](https://datatracker.ietf.org/doc/html/rfc7252#section-5.5)
#[derive(Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Payload(pub Vec<u8>);

/// Struct representing the first byte of a packet.
///
/// ```text
/// CoAP version
/// |
/// |  Message type (confirmable, non-confirmable, ack, reset)
/// |  |
/// |  |  Length of token, in bytes. (4-bit integer)
/// |  |  |
/// vv vv vvvv
/// 01 00 0000
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub(crate) struct Byte1 {
  pub(crate) ver: Version,
  pub(crate) ty: Type,
  pub(crate) tkl: u8,
}

impl TryFrom<u8> for Byte1 {
  type Error = PacketParseError;

  fn try_from(b: u8) -> Result<Self, Self::Error> {
    let ver = b >> 6; // bits 0 & 1
    let ty = b >> 4 & 0b11; // bits 2 & 3
    let tkl = b & 0b1111u8; // last 4 bits

    Ok(Byte1 { ver: Version(ver),
               ty: Type::try_from(ty)?,
               tkl })
  }
}

/// # `Packet` struct
/// Low-level representation of a CoAP message, very close to the actual
/// byte layout.
///
/// Packets support both serializing to bytes and parsing from bytes, by
/// using the provided [`TryIntoBytes`](crate::TryIntoBytes) and
/// [`TryFromBytes`] traits. Parsing rejects malformed datagrams
/// ([`PacketParseError`]) and serializing rejects packets that would
/// break the wire rules ([`PacketToBytesError`]) without emitting
/// anything.
///
/// ```
/// use coap_packet::TryFromBytes;
/// use coap_packet::*;
/// # //                       version  token len  code (2.05 Content)
/// # //                       |        |          /
/// # //                       |  type  |         /  message ID
/// # //                       |  |     |        |   |
/// # //                       vv vv vvvv vvvvvvvv vvvvvvvvvvvvvvvv
/// # let header: [u8; 4] = 0b_01_00_0001_01000101_0000000000000001u32.to_be_bytes();
/// # let token: [u8; 1] = [254u8];
/// # let content_format: &[u8] = b"application/json";
/// # let options: [&[u8]; 2] = [&[0b_1100_1101u8, 0b00000011u8], content_format];
/// # let payload: [&[u8]; 2] = [&[0b_11111111u8], b"hello, world!"];
/// let packet: Vec<u8> = /* bytes! */
/// # [header.as_ref(), token.as_ref(), options.concat().as_ref(), payload.concat().as_ref()].concat();
///
/// let pkt = Packet::try_from_bytes(packet.clone()).unwrap();
/// # let opt = Opt {
/// #   number: OptNumber(12),
/// #   value: OptValue(content_format.iter().map(|u| *u).collect()),
/// # };
/// let mut opts_expected = /* create expected options */
/// # Vec::new();
/// # opts_expected.push(opt);
///
/// let expected = Packet {
///   id: Id(1),
///   ty: Type::Con,
///   ver: Version(1),
///   token: Token(tinyvec::array_vec!([u8; 8] => 254)),
///   opts: opts_expected,
///   code: Code {class: 2, detail: 5},
///   payload: Payload(b"hello, world!".to_vec()),
/// };
///
/// assert_eq!(pkt, expected);
/// ```
///
/// # Related
/// - [RFC7252#section-2.1 Messaging Model](https://datatracker.ietf.org/doc/html/rfc7252#section-2.1)
/// - [RFC7252#section-3 Message Format](https://datatracker.ietf.org/doc/html/rfc7252#section-3)
#[derive(Clone, PartialEq, PartialOrd, Debug)]
pub struct Packet {
  /// see [`Id`] for details
  pub id: Id,
  /// see [`Type`] for details
  pub ty: Type,
  /// see [`Version`] for details
  pub ver: Version,
  /// see [`Token`] for details
  pub token: Token,
  /// see [`Code`] for details
  pub code: Code,
  /// see [`opt::Opt`] for details
  pub opts: Vec<Opt>,
  /// see [`Payload`]
  pub payload: Payload,
}

impl Packet {
  /// Start building a packet field-by-field.
  ///
  /// ```
  /// use coap_packet::{Code, Packet, Type};
  ///
  /// let pkt = Packet::builder().ty(Type::Con)
  ///                            .id(0x04D2)
  ///                            .path("/sensors/temp")
  ///                            .build()
  ///                            .unwrap();
  ///
  /// assert_eq!(pkt.code, Code::GET);
  /// assert_eq!(pkt.opts.len(), 2);
  /// ```
  pub fn builder() -> PacketBuilder {
    PacketBuilder::default()
  }

  /// Number of bytes [`TryIntoBytes`](crate::TryIntoBytes) will produce
  /// for this packet, computed without serializing anything.
  ///
  /// The payload marker is counted only when there is a payload, making
  /// this exact rather than a worst-case estimate.
  pub fn wire_size(&self) -> usize {
    let ext_size = |n: u16| match n {
      | n if n >= 269 => 2,
      | n if n >= 13 => 1,
      | _ => 0,
    };

    let mut opts: Vec<(u16, usize)> = self.opts
                                          .iter()
                                          .map(|o| (o.number.0, o.value.0.len()))
                                          .collect();
    opts.sort_by_key(|(number, _)| *number);

    let mut opts_size = 0usize;
    let mut number = 0u16;
    for (n, len) in opts {
      opts_size += 1 + ext_size(n.wrapping_sub(number)) + ext_size(len as u16) + len;
      number = n;
    }

    let header_size = 4;
    let token_size = self.token.0.len();
    let payload_size = match self.payload.0.len() {
      | 0 => 0,
      | n => 1 + n,
    };

    header_size + token_size + opts_size + payload_size
  }

  /// Check the rules enforced at serialization time: the code's class
  /// is not reserved, payload and option values are within their
  /// limits, and an Empty packet (code `0.00`) carries no token,
  /// options or payload.
  ///
  /// [`TryIntoBytes`](crate::TryIntoBytes) and
  /// [`serialize_into`](Packet::serialize_into) run this before
  /// emitting; a packet that fails produces no bytes at all.
  pub fn validate(&self) -> Result<(), PacketToBytesError> {
    if self.code.class_is_reserved() {
      return Err(PacketToBytesError::InvalidCodeClass(self.code.class));
    }

    if self.payload.0.len() > MAX_PAYLOAD_LEN {
      return Err(PacketToBytesError::PayloadTooLong(self.payload.0.len()));
    }

    if let Some(opt) = self.opts.iter().find(|o| o.value.0.len() > MAX_OPT_VALUE_LEN) {
      return Err(PacketToBytesError::OptionValueTooLong(opt.value.0.len()));
    }

    if self.code.is_empty()
       && !(self.token.0.is_empty() && self.opts.is_empty() && self.payload.0.is_empty())
    {
      return Err(PacketToBytesError::InvalidEmptyMessage);
    }

    Ok(())
  }

  /// Serialize into a caller-provided buffer instead of an owned
  /// collection of bytes.
  ///
  /// Returns the number of bytes written. The packet's options need not
  /// be sorted beforehand.
  ///
  /// ```
  /// use coap_packet::{Packet, Type};
  ///
  /// let pkt = Packet::builder().ty(Type::Non).build().unwrap();
  ///
  /// let mut buf = [0u8; 64];
  /// let n = pkt.serialize_into(&mut buf).unwrap();
  /// assert_eq!(&buf[..n], &[0x50, 0x01, 0x00, 0x00]);
  /// ```
  pub fn serialize_into(&self, buf: &mut [u8]) -> Result<usize, PacketToBytesError> {
    self.validate()?;

    let size = self.wire_size();
    if buf.len() < size {
      return Err(PacketToBytesError::BufferTooSmall { capacity: buf.len(),
                                                      size });
    }

    let mut bytes = tinyvec::SliceVec::from_slice_len(buf, 0);
    self.extend_with(&mut bytes);

    Ok(size)
  }

  /// Emit the packet's bytes into any [`Extend`] collection.
  ///
  /// Assumes `validate` has already passed.
  pub(crate) fn extend_with(&self, bytes: &mut impl Extend<u8>) {
    let byte1: u8 = Byte1 { tkl: self.token.0.len() as u8,
                            ver: self.ver,
                            ty: self.ty }.into();
    let code: u8 = self.code.into();
    let id: [u8; 2] = self.id.into();

    bytes.extend(Some(byte1));
    bytes.extend(Some(code));

    bytes.extend(id);
    bytes.extend(self.token.0);

    // stable sort; equal numbers keep their insertion order
    let mut opts: Vec<&Opt> = self.opts.iter().collect();
    opts.sort_by_key(|o| o.number.0);

    let mut number = 0u16;
    for opt in opts {
      opt.extend_bytes(opt.number.0.wrapping_sub(number), bytes);
      number = opt.number.0;
    }

    if !self.payload.0.is_empty() {
      bytes.extend(Some(PAYLOAD_MARKER));
      bytes.extend(self.payload.0.iter().copied());
    }
  }
}

impl<Bytes: AsRef<[u8]>> TryFromBytes<Bytes> for Packet {
  type Error = PacketParseError;

  fn try_from_bytes(bytes: Bytes) -> Result<Self, Self::Error> {
    let mut bytes = Cursor::new(bytes);

    // a datagram shorter than its fixed header is rejected before any
    // field is interpreted
    if bytes.remaining() < 4 {
      return Err(PacketParseError::eof());
    }

    let Byte1 { tkl, ty, ver } = bytes.next()
                                      .ok_or_else(|| PacketParseError::eof())?
                                      .try_into()?;

    if ver.0 != 1 {
      return Err(Self::Error::InvalidVersion(ver.0));
    }

    if tkl > 8 {
      return Err(Self::Error::InvalidTokenLength(tkl));
    }

    let code: Code = bytes.next().ok_or_else(|| PacketParseError::eof())?.into();

    if code.class_is_reserved() {
      return Err(Self::Error::InvalidCodeClass(code.class));
    }

    let id: Id = Id::try_consume_bytes(&mut bytes)?;

    let token = bytes.take_exact(tkl as usize)
                     .ok_or_else(|| PacketParseError::eof())?;
    let token = tinyvec::ArrayVec::<[u8; 8]>::try_from(token).expect("tkl was checked to be <= 8");
    let token = Token(token);

    let (opts, saw_marker) =
      opt::try_consume_opts(&mut bytes).map_err(Self::Error::OptParseError)?;

    if saw_marker && bytes.remaining() == 0 {
      return Err(Self::Error::PayloadMarkerWithoutPayload);
    }

    let payload = bytes.take_until_end().to_vec();

    if payload.len() > MAX_PAYLOAD_LEN {
      return Err(Self::Error::PayloadTooLong(payload.len()));
    }

    Ok(Packet { id,
                ty,
                ver,
                code,
                token,
                opts,
                payload: Payload(payload) })
  }
}
