use alloc::format;
use alloc::vec::Vec;

use crate::pkt::{Code, ContentFormat, Id, Opt, OptNumber, Packet, Payload, ToOptValue, Token,
                 Type, Version};
use crate::to_bytes::{PacketToBytesError, TryIntoBytes};

/// Builds a [`Packet`] without mutating intermediate state by hand.
///
/// A fresh builder holds a Confirmable GET with id 0, protocol
/// version 1, no token, no options and no payload. Setters replace
/// their field; [`option`](PacketBuilder::option), [`path`](PacketBuilder::path)
/// and [`query`](PacketBuilder::query) append.
///
/// Methods never panic. An invalid input (e.g. a 9-byte token) is
/// remembered and surfaced by [`build`](PacketBuilder::build); the
/// first error wins.
///
/// ```
/// use coap_packet::{Packet, Type};
///
/// let bytes = Packet::builder().ty(Type::Con)
///                              .id(0x04D2)
///                              .token(&[0x12, 0x34])
///                              .path("/sensors/temp")
///                              .build_bytes()
///                              .unwrap();
///
/// assert_eq!(bytes,
///            vec![0x42, 0x01, 0x04, 0xD2, 0x12, 0x34, 0xB7, b's', b'e', b'n', b's', b'o',
///                 b'r', b's', 0x04, b't', b'e', b'm', b'p']);
/// ```
#[derive(Clone, Debug)]
pub struct PacketBuilder {
  inner: Result<Packet, PacketToBytesError>,
}

impl Default for PacketBuilder {
  fn default() -> Self {
    Self { inner: Ok(Packet { id: Id(0),
                              ty: Type::Con,
                              ver: Version::default(),
                              token: Token(Default::default()),
                              code: Code::GET,
                              opts: Vec::new(),
                              payload: Payload(Vec::new()) }) }
  }
}

impl PacketBuilder {
  fn map(self, f: impl FnOnce(&mut Packet)) -> Self {
    Self { inner: self.inner.map(|mut pkt| {
                              f(&mut pkt);
                              pkt
                            }) }
  }

  /// Set the message type
  pub fn ty(self, ty: Type) -> Self {
    self.map(|pkt| pkt.ty = ty)
  }

  /// Set the message code
  pub fn code(self, code: Code) -> Self {
    self.map(|pkt| pkt.code = code)
  }

  /// Set the message id
  pub fn id(self, id: u16) -> Self {
    self.map(|pkt| pkt.id = Id(id))
  }

  /// Set the token
  ///
  /// A token longer than 8 bytes is an error, not a truncation.
  pub fn token(self, token: &[u8]) -> Self {
    match tinyvec::ArrayVec::<[u8; 8]>::try_from(token) {
      | Ok(token) => self.map(|pkt| pkt.token = Token(token)),
      | Err(_) => {
        Self { inner: self.inner
                          .and(Err(PacketToBytesError::InvalidTokenLength(token.len()))) }
      },
    }
  }

  /// Set the payload
  pub fn payload(self, payload: impl AsRef<[u8]>) -> Self {
    self.map(|pkt| pkt.payload = Payload(payload.as_ref().to_vec()))
  }

  /// Append an option
  ///
  /// Repeatable options (Uri-Path, Uri-Query, ...) are built by
  /// calling this once per value.
  pub fn option(self, number: OptNumber, value: impl ToOptValue) -> Self {
    let value = value.to_opt_value();
    self.map(|pkt| pkt.opts.push(Opt { number, value }))
  }

  /// Append one Uri-Path segment
  pub fn path_segment(self, segment: &str) -> Self {
    self.option(OptNumber::URI_PATH, segment)
  }

  /// Split a path on `/` and append one Uri-Path option per non-empty
  /// segment
  ///
  /// ```
  /// use coap_packet::Packet;
  ///
  /// let a = Packet::builder().path("/sensors/temp").build().unwrap();
  /// let b = Packet::builder().path_segment("sensors")
  ///                          .path_segment("temp")
  ///                          .build()
  ///                          .unwrap();
  ///
  /// assert_eq!(a, b);
  /// ```
  pub fn path(self, path: &str) -> Self {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(self, |builder, segment| builder.path_segment(segment))
  }

  /// Append a Uri-Query option holding `key=value`
  pub fn query(self, key: &str, value: &str) -> Self {
    self.option(OptNumber::URI_QUERY, format!("{}={}", key, value))
  }

  /// Set the Content-Format option
  pub fn content_format(self, format: ContentFormat) -> Self {
    self.option(OptNumber::CONTENT_FORMAT, format)
  }

  /// Validate and produce the packet.
  ///
  /// Options come out stably sorted by number; values of a repeated
  /// option keep the order they were appended in.
  pub fn build(self) -> Result<Packet, PacketToBytesError> {
    let mut pkt = self.inner?;
    pkt.validate()?;
    pkt.opts.sort_by_key(|opt| opt.number.0);

    Ok(pkt)
  }

  /// Shorthand for [`build`](PacketBuilder::build) followed by
  /// [`try_into_bytes`](TryIntoBytes::try_into_bytes)
  pub fn build_bytes(self) -> Result<Vec<u8>, PacketToBytesError> {
    self.build()?.try_into_bytes()
  }
}
