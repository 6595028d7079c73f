use crate::pkt::opt::{OptValue, ToOptValue};

/// Content-Format
///
/// Media type of a payload, as registered with IANA
/// (RFC7252 section 12.3, plus `application/cbor` from RFC8949).
///
/// Serialized as a minimal-length unsigned integer, e.g. `Json`
/// becomes the single byte `50` and `Text` becomes zero bytes.
///
/// ```
/// use coap_packet::{ContentFormat, Packet};
///
/// let pkt = Packet::builder().content_format(ContentFormat::Json)
///                            .build()
///                            .unwrap();
/// assert_eq!(pkt.opts[0].value.as_uint(), 50);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentFormat {
  /// `text/plain; charset=utf-8`
  Text,
  /// `application/link-format`
  LinkFormat,
  /// `application/xml`
  Xml,
  /// `application/octet-stream`
  OctetStream,
  /// `application/exi`
  Exi,
  /// `application/json`
  Json,
  /// `application/cbor`
  Cbor,
  /// Another content format
  Other(u16),
}

impl<'a> From<&'a ContentFormat> for u16 {
  fn from(f: &'a ContentFormat) -> Self {
    use ContentFormat::*;
    match *f {
      | Text => 0,
      | LinkFormat => 40,
      | Xml => 41,
      | OctetStream => 42,
      | Exi => 47,
      | Json => 50,
      | Cbor => 60,
      | Other(n) => n,
    }
  }
}

impl From<u16> for ContentFormat {
  fn from(n: u16) -> Self {
    use ContentFormat::*;
    match n {
      | 0 => Text,
      | 40 => LinkFormat,
      | 41 => Xml,
      | 42 => OctetStream,
      | 47 => Exi,
      | 50 => Json,
      | 60 => Cbor,
      | n => Other(n),
    }
  }
}

impl ToOptValue for ContentFormat {
  fn to_opt_value(self) -> OptValue {
    OptValue::uint(u16::from(&self).into())
  }
}
