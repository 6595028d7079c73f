/// Version of the CoAP protocol that the message adheres to.
///
/// The only version defined by RFC7252 is 1; the decoder rejects
/// datagrams carrying anything else, so packets obtained by parsing
/// always hold `Version(1)`.
///
/// See [RFC7252 - Message Details](https://datatracker.ietf.org/doc/html/rfc7252#section-3) for context
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct Version(pub u8);

impl Default for Version {
  fn default() -> Self {
    Version(1)
  }
}
