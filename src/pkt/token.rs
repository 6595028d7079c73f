#[allow(unused_imports)]
use crate::pkt::Id;

/// # Message Token
///
/// Client-chosen opaque byte sequence (0-8 bytes) used to correlate
/// a response with the request that prompted it.
///
/// Where [`Id`] matches an Acknowledgement or Reset to the transmission
/// it acknowledges, the token matches a response to a request across
/// retransmissions and even across messages: a response to a Confirmable
/// request may arrive in a separate Confirmable message carrying the
/// same token and a fresh [`Id`].
///
/// Stored in a fixed 8-byte buffer so the type itself upholds the
/// protocol's token length limit.
///
/// See [RFC7252 - Token](https://datatracker.ietf.org/doc/html/rfc7252#section-5.3.1) for context
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct Token(pub tinyvec::ArrayVec<[u8; 8]>);

impl Token {
  /// Take an arbitrary-length sequence of bytes and turn it into an opaque message token
  ///
  /// Currently uses the BLAKE2 hashing algorithm, but this may change in the future.
  ///
  /// ```
  /// use coap_packet::Token;
  ///
  /// let my_token = Token::opaque(&[0, 1, 2]);
  /// ```
  pub fn opaque(data: &[u8]) -> Token {
    use blake2::digest::consts::U8;
    use blake2::{Blake2b, Digest};

    let mut digest = Blake2b::<U8>::new();
    digest.update(data);
    Token(Into::<[u8; 8]>::into(digest.finalize()).into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opaque_tokens_are_stable_and_distinct() {
    let a = Token::opaque(&[1, 2, 3]);
    let b = Token::opaque(&[1, 2, 3]);
    let c = Token::opaque(&[3, 2, 1]);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.0.len(), 8);
  }
}
