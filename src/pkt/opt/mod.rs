use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::pkt::{MAX_OPT_VALUE_LEN, PAYLOAD_MARKER};

/// Content-Format option values
pub mod content_format;

/// Option parsing errors
pub mod parse_error;

pub use content_format::*;
pub use parse_error::*;

pub(crate) fn parse_opt_len_or_delta<A: AsRef<[u8]>>(head: u8,
                                                     bytes: &mut Cursor<A>,
                                                     reserved_err: OptParseError)
                                                     -> Result<u16, OptParseError> {
  match head {
    | 13 => {
      let n = bytes.next().ok_or_else(OptParseError::eof)?;
      Ok((n as u16) + 13)
    },
    | 14 => match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok(u16::from_be_bytes([a, b]).wrapping_add(269)),
      | _ => Err(OptParseError::eof()),
    },
    | 15 => Err(reserved_err),
    | _ => Ok(head as u16),
  }
}

/// # `Opt` struct
/// A CoAP Option, i.e. a request/response header attached to a
/// [`Packet`](crate::Packet) (e.g. `Uri-Path: "temp"`).
///
/// ## Option Numbers
/// On the wire each option encodes its number as a delta added to the
/// number of the option before it, which forces the serialized sequence
/// to be sorted. `Opt` stores the absolute [`OptNumber`] instead; deltas
/// are summed away when parsing and recomputed when serializing.
///
/// # Related
/// - [RFC7252#section-3.1 Option Format](https://datatracker.ietf.org/doc/html/rfc7252#section-3.1)
/// - [RFC7252#section-5.4 Options](https://datatracker.ietf.org/doc/html/rfc7252#section-5.4)
#[derive(Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct Opt {
  /// See [`OptNumber`]
  pub number: OptNumber,
  /// See [`OptValue`]
  pub value: OptValue,
}

impl Opt {
  /// Given a collection to [`Extend`] and the delta from the previously
  /// serialized option's number, add this Opt's bytes to the collection.
  pub(crate) fn extend_bytes(&self, delta: u16, bytes: &mut impl Extend<u8>) {
    let (del, del_bytes) = crate::to_bytes::opt_len_or_delta(delta);
    let (len, len_bytes) = crate::to_bytes::opt_len_or_delta(self.value.0.len() as u16);
    let del = del << 4;

    let header = del | len;

    bytes.extend(Some(header));

    if let Some(bs) = del_bytes {
      bytes.extend(bs);
    }

    if let Some(bs) = len_bytes {
      bytes.extend(bs);
    }

    bytes.extend(self.value.0.iter().copied());
  }
}

/// Identifies a kind of option, e.g. Uri-Path (11) or Content-Format (12)
///
/// Numbers need not be unique within a packet; repeatable options
/// (Uri-Path, Uri-Query, ...) occur once per value.
///
/// The number is not an opaque id; RFC7252 packs behavioral flags into
/// its low bits, surfaced here by [`OptNumber::must_be_processed`],
/// [`OptNumber::when_unsupported_by_proxy`] and
/// [`OptNumber::when_option_changes`].
///
/// # Related
/// - [RFC7252#section-5.4.6 Option Numbers](https://datatracker.ietf.org/doc/html/rfc7252#section-5.4.6)
/// - [RFC7252#section-12.2 Core CoAP Option Number Registry](https://datatracker.ietf.org/doc/html/rfc7252#section-12.2)
#[derive(Copy, Clone, Hash, PartialEq, PartialOrd, Debug, Default)]
pub struct OptNumber(pub u16);

/// Core option numbers from RFC7252 section 12.2, plus Observe
/// (RFC7641) and the blockwise-transfer numbers (RFC7959).
impl OptNumber {
  /// If-Match
  pub const IF_MATCH: OptNumber = OptNumber(1);
  /// Uri-Host
  pub const URI_HOST: OptNumber = OptNumber(3);
  /// ETag
  pub const ETAG: OptNumber = OptNumber(4);
  /// If-None-Match
  pub const IF_NONE_MATCH: OptNumber = OptNumber(5);
  /// Observe
  pub const OBSERVE: OptNumber = OptNumber(6);
  /// Uri-Port
  pub const URI_PORT: OptNumber = OptNumber(7);
  /// Location-Path
  pub const LOCATION_PATH: OptNumber = OptNumber(8);
  /// Uri-Path
  pub const URI_PATH: OptNumber = OptNumber(11);
  /// Content-Format
  pub const CONTENT_FORMAT: OptNumber = OptNumber(12);
  /// Max-Age
  pub const MAX_AGE: OptNumber = OptNumber(14);
  /// Uri-Query
  pub const URI_QUERY: OptNumber = OptNumber(15);
  /// Accept
  pub const ACCEPT: OptNumber = OptNumber(17);
  /// Location-Query
  pub const LOCATION_QUERY: OptNumber = OptNumber(20);
  /// Block2
  pub const BLOCK2: OptNumber = OptNumber(23);
  /// Block1
  pub const BLOCK1: OptNumber = OptNumber(27);
  /// Size2
  pub const SIZE2: OptNumber = OptNumber(28);
  /// Proxy-Uri
  pub const PROXY_URI: OptNumber = OptNumber(35);
  /// Proxy-Scheme
  pub const PROXY_SCHEME: OptNumber = OptNumber(39);
  /// Size1
  pub const SIZE1: OptNumber = OptNumber(60);
}

/// Whether an option must be processed by the receiving endpoint
/// (RFC7252 section 5.4.1)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptionMustBeProcessed {
  /// This option must be processed,
  /// and a response that ignores it
  /// will be rejected.
  ///
  /// Corresponds to the option being "critical"
  /// in strict CoAP terms
  Yes,
  /// This option does not _need_ to
  /// be processed,
  /// and a response that ignores it
  /// will be processed anyway.
  ///
  /// Corresponds to the option being "elective"
  /// in strict CoAP terms
  No,
}

/// What a proxy that does not recognize an option should do with the
/// message carrying it (RFC7252 section 5.4.2)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WhenOptionUnsupportedByProxy {
  /// This option /must be/ processed & understood by proxies
  /// and may not be forwarded blindly to their destination.
  ///
  /// Corresponds to the option being "UnSafe" to forward
  /// in strict CoAP terms
  Error,
  /// This option may not be processed & understood by proxies
  /// and may be forwarded blindly to their destination.
  ///
  /// Corresponds to the option being "SafeToForward"
  /// in strict CoAP terms
  Forward,
}

/// Whether different values for an option should produce different
/// proxy cache entries (RFC7252 section 5.4.2)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WhenOptionChanges {
  /// If this option is safe to forward, but unknown to a proxy,
  /// it should be included in the proxy's cache key for this message.
  ///
  /// Corresponds to the option being not "NoCacheKey"
  /// in strict CoAP terms
  ResponseChanges,
  /// If this option is safe to forward, but unknown to a proxy,
  /// it should not be included in the proxy's cache key for this
  /// message, and different values for this option should yield
  /// the cached response.
  ///
  /// Corresponds to the option being "NoCacheKey"
  /// in strict CoAP terms
  ResponseDoesNotChange,
}

impl OptNumber {
  /// Whether or not this option may be ignored by a server
  pub fn must_be_processed(&self) -> OptionMustBeProcessed {
    #[allow(clippy::wildcard_in_or_patterns)] // will only ever be 0 or 1
    match self.0 & 0b1 {
      | 1 => OptionMustBeProcessed::Yes,
      | 0 | _ => OptionMustBeProcessed::No,
    }
  }

  /// Whether or not this option may be forwarded blindly by
  /// a proxy that does not support processing it
  pub fn when_unsupported_by_proxy(&self) -> WhenOptionUnsupportedByProxy {
    #[allow(clippy::wildcard_in_or_patterns)] // will only ever be 0 or 1
    match (self.0 & 0b10) >> 1 {
      | 1 => WhenOptionUnsupportedByProxy::Error,
      | 0 | _ => WhenOptionUnsupportedByProxy::Forward,
    }
  }

  /// Whether or not different values for this option should
  /// yield proxies' cached response
  ///
  /// _(when the proxy does not support processing it and
  /// the option is safe to forward)_
  pub fn when_option_changes(&self) -> WhenOptionChanges {
    match (self.0 & 0b11100) >> 2 {
      | 0b111 => WhenOptionChanges::ResponseDoesNotChange,
      | _ => WhenOptionChanges::ResponseChanges,
    }
  }
}

/// Option Value
///
/// Raw bytes of an option's value. Whether those bytes are a string,
/// an unsigned integer, opaque data or empty is a convention attached
/// to the option's number and is not enforced here.
///
/// # Related
/// - [RFC7252#section-3.2 Option Value Formats](https://datatracker.ietf.org/doc/html/rfc7252#section-3.2)
#[derive(Default, Clone, Hash, PartialEq, PartialOrd, Debug)]
pub struct OptValue(pub Vec<u8>);

impl OptValue {
  /// Encode an unsigned integer value in the shortest big-endian
  /// representation that has no leading zero bytes.
  ///
  /// Zero becomes the empty value.
  ///
  /// ```
  /// use coap_packet::OptValue;
  ///
  /// assert_eq!(OptValue::uint(0).0, vec![]);
  /// assert_eq!(OptValue::uint(60).0, vec![60]);
  /// assert_eq!(OptValue::uint(0x12345).0, vec![0x01, 0x23, 0x45]);
  /// ```
  pub fn uint(n: u32) -> Self {
    let bytes = n.to_be_bytes();
    let zeros = (n.leading_zeros() / 8) as usize;
    OptValue(bytes[zeros..].to_vec())
  }

  /// Decode the value as a big-endian unsigned integer.
  ///
  /// At most the first 4 bytes are read; the empty value decodes to 0.
  pub fn as_uint(&self) -> u32 {
    self.0.iter().take(4).fold(0u32, |n, b| (n << 8) | (*b as u32))
  }
}

/// Types that can be used as option values in
/// [`PacketBuilder::option`](crate::PacketBuilder::option)
pub trait ToOptValue {
  /// Convert into the option value's wire bytes
  fn to_opt_value(self) -> OptValue;
}

impl ToOptValue for &str {
  fn to_opt_value(self) -> OptValue {
    OptValue(self.as_bytes().to_vec())
  }
}

impl ToOptValue for alloc::string::String {
  fn to_opt_value(self) -> OptValue {
    OptValue(self.into_bytes())
  }
}

impl ToOptValue for &[u8] {
  fn to_opt_value(self) -> OptValue {
    OptValue(self.to_vec())
  }
}

impl<const N: usize> ToOptValue for [u8; N] {
  fn to_opt_value(self) -> OptValue {
    OptValue(self.to_vec())
  }
}

impl ToOptValue for Vec<u8> {
  fn to_opt_value(self) -> OptValue {
    OptValue(self)
  }
}

impl ToOptValue for () {
  fn to_opt_value(self) -> OptValue {
    OptValue(Vec::new())
  }
}

impl ToOptValue for u8 {
  fn to_opt_value(self) -> OptValue {
    OptValue::uint(self.into())
  }
}

impl ToOptValue for u16 {
  fn to_opt_value(self) -> OptValue {
    OptValue::uint(self.into())
  }
}

impl ToOptValue for u32 {
  fn to_opt_value(self) -> OptValue {
    OptValue::uint(self)
  }
}

/// Consume options until the payload marker or the end of input.
///
/// Yields the options in wire order with their numbers resolved
/// (running sum of the deltas in uint16 arithmetic), plus whether the
/// `0xFF` payload marker was consumed.
pub(crate) fn try_consume_opts<A: AsRef<[u8]>>(bytes: &mut Cursor<A>)
                                               -> Result<(Vec<Opt>, bool), OptParseError> {
  let mut opts = Vec::new();
  let mut number = 0u16;

  loop {
    let head = match bytes.next() {
      | None => return Ok((opts, false)),
      | Some(PAYLOAD_MARKER) => return Ok((opts, true)),
      | Some(b) => b,
    };

    let (delta, value) = try_consume_opt(head, bytes)?;
    number = number.wrapping_add(delta);

    opts.push(Opt { number: OptNumber(number),
                    value });
  }
}

fn try_consume_opt<A: AsRef<[u8]>>(head: u8,
                                   bytes: &mut Cursor<A>)
                                   -> Result<(u16, OptValue), OptParseError> {
  // NOTE: Delta **MUST** be consumed before Value. see comment on `opt_len_or_delta` for more info
  let delta = parse_opt_len_or_delta(head >> 4,
                                     bytes,
                                     OptParseError::OptionDeltaReservedValue(15))?;

  let len = parse_opt_len_or_delta(head & 0b00001111,
                                   bytes,
                                   OptParseError::ValueLengthReservedValue(15))?
            as usize;

  let value = match bytes.take_exact(len) {
    | Some(bs) => OptValue(bs.to_vec()),
    | None => return Err(OptParseError::eof()),
  };

  if value.0.len() > MAX_OPT_VALUE_LEN {
    return Err(OptParseError::OptionValueTooLong(value.0.len()));
  }

  Ok((delta, value))
}
