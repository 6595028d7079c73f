use coap_packet::*;

fn base_packet() -> Packet {
  Packet { id: Id(1),
           ty: Type::Con,
           ver: Default::default(),
           token: Token(Default::default()),
           code: Code::GET,
           opts: vec![],
           payload: Payload(vec![]) }
}

fn cat(head: &[u8], tail: &[u8]) -> Vec<u8> {
  [head, tail].concat()
}

#[test]
fn get_request_serializes_to_known_bytes() {
  let bytes = Packet::builder().ty(Type::Con)
                               .id(0x04D2)
                               .token(&[0x12, 0x34])
                               .path("/sensors/temp")
                               .build_bytes()
                               .unwrap();

  assert_eq!(bytes,
             vec![0x42, 0x01, 0x04, 0xD2, 0x12, 0x34, 0xB7, b's', b'e', b'n', b's', b'o', b'r',
                  b's', 0x04, b't', b'e', b'm', b'p']);

  let pkt = Packet::try_from_bytes(&bytes).unwrap();
  assert_eq!(pkt.ty, Type::Con);
  assert_eq!(pkt.id, Id(0x04D2));
  assert_eq!(pkt.token, Token(tinyvec::array_vec!([u8; 8] => 0x12, 0x34)));
  assert_eq!(pkt.opts,
             vec![Opt { number: OptNumber::URI_PATH,
                        value: OptValue(b"sensors".to_vec()) },
                  Opt { number: OptNumber::URI_PATH,
                        value: OptValue(b"temp".to_vec()) }]);
}

#[test]
fn hello_world_response_decodes_and_reencodes() {
  let bytes = vec![0x50, 0x01, 0x47, 0xCD, 0xFF, b'H', b'e', b'l', b'l', b'o', b' ', b'W', b'o',
                   b'r', b'l', b'd'];

  let pkt = Packet::try_from_bytes(&bytes).unwrap();
  assert_eq!(pkt.ty, Type::Non);
  assert_eq!(pkt.code, Code::GET);
  assert_eq!(pkt.id, Id(0x47CD));
  assert!(pkt.token.0.is_empty());
  assert!(pkt.opts.is_empty());
  assert_eq!(pkt.payload, Payload(b"Hello World".to_vec()));

  assert_eq!(pkt.try_into_bytes().unwrap(), bytes);
}

#[test]
fn empty_messages_round_trip() {
  // a bare Reset, e.g. the response to an unrecognized Confirmable id
  let bytes = vec![0x70, 0x00, 0x12, 0x34];

  let pkt = Packet::try_from_bytes(&bytes).unwrap();
  assert_eq!(pkt.ty, Type::Reset);
  assert_eq!(pkt.code, Code::EMPTY);
  assert!(pkt.token.0.is_empty());
  assert!(pkt.opts.is_empty());
  assert!(pkt.payload.0.is_empty());

  assert_eq!(pkt.try_into_bytes().unwrap(), bytes);
}

#[test]
fn truncated_packets_are_rejected() {
  for bytes in [vec![], vec![0x40], vec![0x40, 0x01], vec![0x40, 0x01, 0x00]] {
    assert_eq!(Packet::try_from_bytes(&bytes),
               Err(PacketParseError::UnexpectedEndOfStream));
  }

  // token length promises 2 bytes, 1 follows
  assert_eq!(Packet::try_from_bytes([0x42u8, 0x01, 0x00, 0x01, 0xAA]),
             Err(PacketParseError::UnexpectedEndOfStream));
}

#[test]
fn truncated_options_are_rejected() {
  let base = [0x40u8, 0x01, 0x00, 0x01];
  let suffixes: [&[u8]; 5] = [&[0xD1],              // delta 13, extension byte missing
                              &[0xE1, 0x01],        // delta 14, one of two extension bytes
                              &[0x1D],              // length 13, extension byte missing
                              &[0x1E, 0x00],        // length 14, one of two extension bytes
                              &[0x13, b'a']];       // length 3, one value byte

  for suffix in suffixes {
    assert_eq!(Packet::try_from_bytes(cat(&base, suffix)),
               Err(PacketParseError::OptParseError(OptParseError::UnexpectedEndOfStream)));
  }
}

#[test]
fn reserved_option_nibbles_are_rejected() {
  let base = [0x40u8, 0x01, 0x00, 0x01];

  assert_eq!(Packet::try_from_bytes(cat(&base, &[0xF1, b'a'])),
             Err(PacketParseError::OptParseError(OptParseError::OptionDeltaReservedValue(15))));

  assert_eq!(Packet::try_from_bytes(cat(&base, &[0x1F, b'a'])),
             Err(PacketParseError::OptParseError(OptParseError::ValueLengthReservedValue(15))));

  // the whole byte being 1111 1111 is the payload marker, not an error
  assert_eq!(Packet::try_from_bytes(cat(&base, &[0xFF, b'a'])).unwrap().payload,
             Payload(vec![b'a']));
}

#[test]
fn header_fields_are_checked() {
  assert_eq!(Packet::try_from_bytes([0x00u8, 0x01, 0x00, 0x01]),
             Err(PacketParseError::InvalidVersion(0)));
  assert_eq!(Packet::try_from_bytes([0x80u8, 0x01, 0x00, 0x01]),
             Err(PacketParseError::InvalidVersion(2)));

  assert_eq!(Packet::try_from_bytes([0x4Fu8, 0x01, 0x00, 0x01]),
             Err(PacketParseError::InvalidTokenLength(15)));

  assert_eq!(Packet::try_from_bytes([0x40u8, 0x20, 0x00, 0x01]),
             Err(PacketParseError::InvalidCodeClass(1)));
  assert_eq!(Packet::try_from_bytes([0x40u8, 0xC0, 0x00, 0x01]),
             Err(PacketParseError::InvalidCodeClass(6)));
  assert_eq!(Packet::try_from_bytes([0x40u8, 0xE5, 0x00, 0x01]),
             Err(PacketParseError::InvalidCodeClass(7)));
}

#[test]
fn payload_marker_must_be_followed_by_payload() {
  assert_eq!(Packet::try_from_bytes([0x40u8, 0x01, 0x00, 0x01, 0xFF]),
             Err(PacketParseError::PayloadMarkerWithoutPayload));

  // same with an option in front of the marker
  assert_eq!(Packet::try_from_bytes([0x40u8, 0x01, 0x00, 0x01, 0x11, b'a', 0xFF]),
             Err(PacketParseError::PayloadMarkerWithoutPayload));

  let pkt = Packet::try_from_bytes([0x40u8, 0x01, 0x00, 0x01, 0xFF, b'x']).unwrap();
  assert_eq!(pkt.payload, Payload(vec![b'x']));
}

#[test]
fn payload_length_limit_is_enforced() {
  let head = [0x40u8, 0x01, 0x00, 0x01, 0xFF];

  let bytes = cat(&head, &vec![0xAA; 1024]);
  let pkt = Packet::try_from_bytes(&bytes).unwrap();
  assert_eq!(pkt.payload.0.len(), 1024);
  assert_eq!(pkt.try_into_bytes().unwrap(), bytes);

  assert_eq!(Packet::try_from_bytes(cat(&head, &vec![0xAA; 1025])),
             Err(PacketParseError::PayloadTooLong(1025)));

  let mut pkt = base_packet();
  pkt.payload = Payload(vec![0xAA; 1025]);
  assert_eq!(pkt.try_into_bytes(), Err(PacketToBytesError::PayloadTooLong(1025)));
}

#[test]
fn option_number_boundaries_round_trip() {
  let wire = |n: u16| -> Vec<u8> {
    let mut pkt = base_packet();
    pkt.opts = vec![Opt { number: OptNumber(n),
                          value: OptValue(b"v".to_vec()) }];
    pkt.try_into_bytes().unwrap()[4..].to_vec()
  };

  assert_eq!(wire(0), vec![0x01, b'v']);
  assert_eq!(wire(12), vec![0xC1, b'v']);
  assert_eq!(wire(13), vec![0xD1, 0x00, b'v']);
  assert_eq!(wire(268), vec![0xD1, 0xFF, b'v']);
  assert_eq!(wire(269), vec![0xE1, 0x00, 0x00, b'v']);
  assert_eq!(wire(270), vec![0xE1, 0x00, 0x01, b'v']);
  assert_eq!(wire(65535), vec![0xE1, 0xFE, 0xF2, b'v']);

  for n in [0u16, 12, 13, 268, 269, 270, 65535] {
    let mut pkt = base_packet();
    pkt.opts = vec![Opt { number: OptNumber(n),
                          value: OptValue(b"v".to_vec()) }];
    let bytes = pkt.clone().try_into_bytes().unwrap();
    assert_eq!(Packet::try_from_bytes(&bytes).unwrap(), pkt);
  }
}

#[test]
fn option_length_boundaries_round_trip() {
  let wire = |len: usize| -> Vec<u8> {
    let mut pkt = base_packet();
    pkt.opts = vec![Opt { number: OptNumber(1),
                          value: OptValue(vec![b'a'; len]) }];
    pkt.try_into_bytes().unwrap()[4..].to_vec()
  };

  assert_eq!(wire(0), vec![0x10]);
  assert_eq!(wire(12)[..2], [0x1C, b'a']);
  assert_eq!(wire(13)[..3], [0x1D, 0x00, b'a']);
  assert_eq!(wire(268)[..3], [0x1D, 0xFF, b'a']);
  assert_eq!(wire(269)[..4], [0x1E, 0x00, 0x00, b'a']);
  assert_eq!(wire(1034)[..4], [0x1E, 0x02, 0xFD, b'a']);

  for len in [0usize, 12, 13, 268, 269, 270, 1034] {
    let mut pkt = base_packet();
    pkt.opts = vec![Opt { number: OptNumber(1),
                          value: OptValue(vec![b'a'; len]) }];
    let bytes = pkt.clone().try_into_bytes().unwrap();
    assert_eq!(Packet::try_from_bytes(&bytes).unwrap(), pkt);
  }
}

#[test]
fn option_value_length_limit_is_enforced() {
  let mut pkt = base_packet();
  pkt.opts = vec![Opt { number: OptNumber(1),
                        value: OptValue(vec![b'a'; 1035]) }];
  assert_eq!(pkt.try_into_bytes(),
             Err(PacketToBytesError::OptionValueTooLong(1035)));

  let head = [0x40u8, 0x01, 0x00, 0x01, 0x1E, 0x02, 0xFE];
  assert_eq!(Packet::try_from_bytes(cat(&head, &vec![b'a'; 1035])),
             Err(PacketParseError::OptParseError(OptParseError::OptionValueTooLong(1035))));
}

#[test]
fn repeated_options_preserve_insertion_order() {
  let bytes = Packet::builder().option(OptNumber::URI_PATH, "x")
                               .option(OptNumber::IF_NONE_MATCH, ())
                               .option(OptNumber::URI_PATH, "y")
                               .build_bytes()
                               .unwrap();

  let pkt = Packet::try_from_bytes(&bytes).unwrap();
  let numbers: Vec<u16> = pkt.opts.iter().map(|o| o.number.0).collect();
  assert_eq!(numbers, vec![5, 11, 11]);
  assert_eq!(pkt.opts[1].value, OptValue(vec![b'x']));
  assert_eq!(pkt.opts[2].value, OptValue(vec![b'y']));

  // reencoding a parse is a fixed point
  assert_eq!(pkt.try_into_bytes().unwrap(), bytes);
}

#[test]
fn unsorted_options_serialize_sorted() {
  let mut a = base_packet();
  a.opts = vec![Opt { number: OptNumber(20),
                      value: OptValue(vec![1]) },
                Opt { number: OptNumber(4),
                      value: OptValue(vec![2]) }];

  let mut b = base_packet();
  b.opts = vec![Opt { number: OptNumber(4),
                      value: OptValue(vec![2]) },
                Opt { number: OptNumber(20),
                      value: OptValue(vec![1]) }];

  let bytes_a = a.try_into_bytes().unwrap();
  let bytes_b = b.try_into_bytes().unwrap();
  assert_eq!(bytes_a, bytes_b);

  let numbers: Vec<u16> = Packet::try_from_bytes(&bytes_a).unwrap()
                                                          .opts
                                                          .iter()
                                                          .map(|o| o.number.0)
                                                          .collect();
  assert_eq!(numbers, vec![4, 20]);
}

#[test]
fn option_number_deltas_wrap_when_parsing() {
  // delta 65535 then delta 2; the running sum is uint16 arithmetic
  let bytes = [0x40u8, 0x01, 0x00, 0x01, 0xE0, 0xFE, 0xF2, 0x20];

  let pkt = Packet::try_from_bytes(bytes).unwrap();
  let numbers: Vec<u16> = pkt.opts.iter().map(|o| o.number.0).collect();
  assert_eq!(numbers, vec![65535, 1]);
}

#[test]
fn parse_does_not_enforce_empty_message_rules() {
  // a 0.00 code with a payload parses fine
  let pkt = Packet::try_from_bytes([0x40u8, 0x00, 0x00, 0x01, 0xFF, b'x']).unwrap();
  assert_eq!(pkt.code, Code::EMPTY);
  assert_eq!(pkt.payload, Payload(vec![b'x']));

  // but serializing it back is refused
  assert_eq!(pkt.try_into_bytes(),
             Err(PacketToBytesError::InvalidEmptyMessage));
}

#[test]
fn wire_size_is_exact() {
  let mut with_everything = base_packet();
  with_everything.token = Token(tinyvec::array_vec!([u8; 8] => 1, 2, 3, 4, 5, 6, 7, 8));
  with_everything.opts = vec![Opt { number: OptNumber(12),
                                    value: OptValue(vec![b'a'; 268]) },
                              Opt { number: OptNumber(281),
                                    value: OptValue(vec![b'b'; 269]) },
                              Opt { number: OptNumber(3),
                                    value: OptValue(vec![]) }];
  with_everything.payload = Payload(vec![0xAA; 300]);

  let mut no_payload = base_packet();
  no_payload.opts = vec![Opt { number: OptNumber(60),
                               value: OptValue(vec![1, 2]) }];

  for pkt in [base_packet(), with_everything, no_payload] {
    assert_eq!(pkt.wire_size(), pkt.clone().try_into_bytes().unwrap().len());
  }
}

#[test]
fn serialize_into_writes_exactly_wire_size() {
  let pkt = Packet::builder().ty(Type::Con)
                             .id(0x04D2)
                             .token(&[0x12, 0x34])
                             .path("/sensors/temp")
                             .payload("22.5")
                             .build()
                             .unwrap();

  let expected = pkt.clone().try_into_bytes().unwrap();

  let mut buf = [0u8; 128];
  let n = pkt.serialize_into(&mut buf).unwrap();
  assert_eq!(n, expected.len());
  assert_eq!(&buf[..n], expected.as_slice());

  let mut small = vec![0u8; expected.len() - 1];
  assert_eq!(pkt.serialize_into(&mut small),
             Err(PacketToBytesError::BufferTooSmall { capacity: expected.len() - 1,
                                                      size: expected.len() }));
}

#[test]
fn uint_option_values_round_trip() {
  let bytes = Packet::builder().content_format(ContentFormat::Json)
                               .option(OptNumber::MAX_AGE, 3600u32)
                               .option(OptNumber::URI_PORT, 5683u16)
                               .build_bytes()
                               .unwrap();

  let pkt = Packet::try_from_bytes(&bytes).unwrap();
  let uint_of = |number: OptNumber| {
    pkt.opts
       .iter()
       .find(|o| o.number == number)
       .map(|o| o.value.as_uint())
       .unwrap()
  };

  assert_eq!(uint_of(OptNumber::URI_PORT), 5683);
  assert_eq!(uint_of(OptNumber::CONTENT_FORMAT), 50);
  assert_eq!(uint_of(OptNumber::MAX_AGE), 3600);
  assert_eq!(ContentFormat::from(uint_of(OptNumber::CONTENT_FORMAT) as u16),
             ContentFormat::Json);
}
