use core::fmt;

/// # Message Code
///
/// 8-bit value split into a 3-bit class and a 5-bit detail,
/// written `c.dd` (e.g. `0.01` GET, `2.05` Content, `4.04` Not Found).
///
/// Codes of class 0 are requests (or, with detail 0, the Empty message);
/// classes 2, 4 and 5 are responses. Classes 1, 6 and 7 are reserved by
/// RFC7252 and never appear in a valid message.
///
/// # Examples
/// ```
/// use coap_packet::Code;
/// assert_eq!(Code { class: 2, detail: 5 }.to_string(), "2.05".to_string())
/// ```
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct Code {
  /// The "class" of message codes identify it as a request or response, and provides the class of response status:
  ///
  /// |class|meaning|
  /// |---|---|
  /// |`0`|Message is a request|
  /// |`2`|Message is a success response|
  /// |`4`|Message is a client error response|
  /// |`5`|Message is a server error response|
  pub class: u8,

  /// 2-digit integer (range `[0, 32)`) that provides granular information about the response status.
  ///
  /// Will always be `0` for requests.
  pub detail: u8,
}

impl Code {
  /// Create a new Code
  ///
  /// ```
  /// use coap_packet::Code;
  ///
  /// let content = Code::new(2, 05);
  /// ```
  pub const fn new(class: u8, detail: u8) -> Self {
    Self { class, detail }
  }

  /// Get the human string representation of a message code
  ///
  /// # Returns
  /// A `char` array
  ///
  /// This is to avoid unnecessary heap allocation,
  /// you can create a `String` with `FromIterator::<String>::from_iter`,
  /// or just use the provided `Display` implementation.
  /// ```
  /// use coap_packet::Code;
  ///
  /// let code = Code { class: 2, detail: 5 };
  /// let chars = code.to_human();
  /// let string = String::from_iter(chars);
  /// assert_eq!(string, "2.05".to_string());
  /// ```
  pub fn to_human(&self) -> [char; 4] {
    let to_char = |d: u8| char::from_digit(d.into(), 10).unwrap_or('?');
    [to_char(self.class),
     '.',
     to_char(self.detail / 10),
     to_char(self.detail % 10)]
  }

  /// Whether this code identifies an Empty message (`0.00`)
  pub fn is_empty(&self) -> bool {
    self.class == 0 && self.detail == 0
  }

  /// Whether this code identifies a request (class 0, nonzero detail)
  pub fn is_request(&self) -> bool {
    self.class == 0 && self.detail > 0
  }

  /// Whether this code identifies a response (class 2, 4 or 5)
  pub fn is_response(&self) -> bool {
    matches!(self.class, 2 | 4 | 5)
  }

  /// Whether the class falls in the space RFC7252 reserves (1, 6 or 7).
  ///
  /// Reserved classes are rejected both when parsing a datagram and
  /// when serializing a [`Packet`](crate::Packet).
  pub fn class_is_reserved(&self) -> bool {
    matches!(self.class, 1 | 6 | 7)
  }
}

/// Method & response codes from RFC7252 section 12.1, plus the
/// FETCH/PATCH/iPATCH methods of RFC8132.
impl Code {
  /// `0.00` Empty
  pub const EMPTY: Code = Code::new(0, 0);
  /// `0.01` GET
  pub const GET: Code = Code::new(0, 1);
  /// `0.02` POST
  pub const POST: Code = Code::new(0, 2);
  /// `0.03` PUT
  pub const PUT: Code = Code::new(0, 3);
  /// `0.04` DELETE
  pub const DELETE: Code = Code::new(0, 4);
  /// `0.05` FETCH
  pub const FETCH: Code = Code::new(0, 5);
  /// `0.06` PATCH
  pub const PATCH: Code = Code::new(0, 6);
  /// `0.07` iPATCH
  pub const IPATCH: Code = Code::new(0, 7);
  /// `2.01` Created
  pub const CREATED: Code = Code::new(2, 1);
  /// `2.02` Deleted
  pub const DELETED: Code = Code::new(2, 2);
  /// `2.03` Valid
  pub const VALID: Code = Code::new(2, 3);
  /// `2.04` Changed
  pub const CHANGED: Code = Code::new(2, 4);
  /// `2.05` Content
  pub const CONTENT: Code = Code::new(2, 5);
  /// `2.31` Continue
  pub const CONTINUE: Code = Code::new(2, 31);
  /// `4.00` Bad Request
  pub const BAD_REQUEST: Code = Code::new(4, 0);
  /// `4.01` Unauthorized
  pub const UNAUTHORIZED: Code = Code::new(4, 1);
  /// `4.02` Bad Option
  pub const BAD_OPTION: Code = Code::new(4, 2);
  /// `4.03` Forbidden
  pub const FORBIDDEN: Code = Code::new(4, 3);
  /// `4.04` Not Found
  pub const NOT_FOUND: Code = Code::new(4, 4);
  /// `4.05` Method Not Allowed
  pub const METHOD_NOT_ALLOWED: Code = Code::new(4, 5);
  /// `4.06` Not Acceptable
  pub const NOT_ACCEPTABLE: Code = Code::new(4, 6);
  /// `4.08` Request Entity Incomplete
  pub const REQUEST_ENTITY_INCOMPLETE: Code = Code::new(4, 8);
  /// `4.12` Precondition Failed
  pub const PRECONDITION_FAILED: Code = Code::new(4, 12);
  /// `4.13` Request Entity Too Large
  pub const REQUEST_ENTITY_TOO_LARGE: Code = Code::new(4, 13);
  /// `4.15` Unsupported Content-Format
  pub const UNSUPPORTED_CONTENT_FORMAT: Code = Code::new(4, 15);
  /// `5.00` Internal Server Error
  pub const INTERNAL_SERVER_ERROR: Code = Code::new(5, 0);
  /// `5.01` Not Implemented
  pub const NOT_IMPLEMENTED: Code = Code::new(5, 1);
  /// `5.02` Bad Gateway
  pub const BAD_GATEWAY: Code = Code::new(5, 2);
  /// `5.03` Service Unavailable
  pub const SERVICE_UNAVAILABLE: Code = Code::new(5, 3);
  /// `5.04` Gateway Timeout
  pub const GATEWAY_TIMEOUT: Code = Code::new(5, 4);
  /// `5.05` Proxying Not Supported
  pub const PROXYING_NOT_SUPPORTED: Code = Code::new(5, 5);
}

impl fmt::Display for Code {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let [a, b, c, d] = self.to_human();
    write!(f, "{}{}{}{}", a, b, c, d)
  }
}

impl From<u8> for Code {
  fn from(b: u8) -> Self {
    let class = b >> 5;
    let detail = b & 0b0011111;

    Code { class, detail }
  }
}

impl From<Code> for u8 {
  fn from(code: Code) -> u8 {
    let class = code.class << 5;
    let detail = code.detail;

    class | detail
  }
}
