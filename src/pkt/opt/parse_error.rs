use core::fmt;

/// Errors encounterable while parsing an option from bytes
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum OptParseError {
  /// Reached end of stream before end of option
  UnexpectedEndOfStream,

  /// Option delta nibble was the reserved value 15
  /// outside of the payload marker `0xFF`
  OptionDeltaReservedValue(u8),

  /// Option length nibble was the reserved value 15
  /// outside of the payload marker `0xFF`
  ValueLengthReservedValue(u8),

  /// Option value was longer than 1034 bytes
  OptionValueTooLong(usize),
}

impl OptParseError {
  /// Shorthand for [`OptParseError::UnexpectedEndOfStream`]
  pub fn eof() -> Self {
    Self::UnexpectedEndOfStream
  }
}

impl fmt::Display for OptParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::UnexpectedEndOfStream => f.write_str("unexpected end of stream"),
      | Self::OptionDeltaReservedValue(n) => {
        write!(f, "option delta uses reserved nibble {}", n)
      },
      | Self::ValueLengthReservedValue(n) => {
        write!(f, "option length uses reserved nibble {}", n)
      },
      | Self::OptionValueTooLong(len) => {
        write!(f, "option value length {} exceeds the 1034-byte limit", len)
      },
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for OptParseError {}
