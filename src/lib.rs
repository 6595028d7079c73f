//! Low-level representation of CoAP packets.
//!
//! The most notable item in `coap_packet` is [`Packet`];
//! a CoAP message very close to the actual byte layout.
//!
//! ## Parsing & serializing
//! [`Packet`] converts to and from the RFC7252 binary format with the
//! [`TryIntoBytes`] and [`TryFromBytes`] traits. Parsing rejects
//! malformed datagrams with a [`PacketParseError`] naming the offending
//! field; serializing checks every construction rule before emitting,
//! so a [`PacketToBytesError`] never leaves a half-written packet
//! behind.
//!
//! Unlike the wire format, which encodes each option's number as a
//! delta from the option before it, [`Packet`] stores absolute
//! [`OptNumber`]s and sorts them (stably) on the way out. Options can
//! therefore be appended in any order, and repeated options keep the
//! order their values were added in.
//!
//! ## Building
//! [`Packet::builder`] covers the common cases without touching fields
//! by hand; invalid input poisons the builder instead of panicking and
//! comes back from `build`.
//!
//! ```
//! use coap_packet::{Packet, TryFromBytes, Type};
//!
//! let bytes = Packet::builder().ty(Type::Con)
//!                              .id(0x04D2)
//!                              .path("/sensors/temp")
//!                              .query("unit", "celsius")
//!                              .build_bytes()
//!                              .unwrap();
//!
//! let echoed = Packet::try_from_bytes(&bytes).unwrap();
//! assert_eq!(echoed.opts.len(), 3);
//! assert_eq!(echoed.id, coap_packet::Id(0x04D2));
//! ```
//!
//! ## Allocation
//! Packets own their bytes (`Vec` payloads and option values), so the
//! crate requires `alloc` but not `std`; disable the default `std`
//! feature on `no_std` targets. Tokens live in a fixed 8-byte
//! [`tinyvec::ArrayVec`] mirroring the wire limit, and
//! [`Packet::serialize_into`] writes to a caller-provided buffer for
//! output paths that must not allocate.
//!
//! ## Performance
//! This crate uses `criterion` to measure parse & serialize performance
//! against `coap_lite::Packet` across a grid of packet shapes; see the
//! `benches` directory.

#![doc(html_root_url = "https://docs.rs/coap-packet/0.1.0")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code, missing_copy_implementations))]
#![cfg_attr(any(docsrs, feature = "docs"), feature(doc_cfg))]
#![cfg_attr(not(test), deny(missing_docs))]

extern crate alloc;

mod cursor;

#[doc(hidden)]
pub mod from_bytes;

/// Packet structs
pub mod pkt;

#[doc(hidden)]
pub mod to_bytes;

#[doc(inline)]
pub use from_bytes::TryFromBytes;
#[doc(inline)]
pub use pkt::*;
#[doc(inline)]
pub use to_bytes::{PacketToBytesError, TryIntoBytes};

#[cfg(test)]
pub(crate) fn test_pkt() -> (Packet, Vec<u8>) {
  let header: [u8; 4] = 0b0100_0001_0100_0101_0000_0000_0000_0001_u32.to_be_bytes();
  let token: [u8; 1] = [254u8];
  let content_format: &[u8] = b"application/json";
  let options: [&[u8]; 2] = [&[0b_1100_1101u8, 0b00000011u8], content_format];
  let payload: [&[u8]; 2] = [&[0b1111_1111_u8], b"hello, world!"];
  let bytes = [header.as_ref(),
               token.as_ref(),
               options.concat().as_ref(),
               payload.concat().as_ref()].concat();

  let pkt = Packet { id: Id(1),
                     ty: Type::Con,
                     ver: Version(1),
                     token: Token(tinyvec::array_vec!([u8; 8] => 254)),
                     opts: vec![Opt { number: OptNumber(12),
                                      value: OptValue(content_format.to_vec()) }],
                     code: Code { class: 2,
                                  detail: 5 },
                     payload: Payload(b"hello, world!".to_vec()) };
  (pkt, bytes)
}
