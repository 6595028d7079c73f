/// A consuming cursor over a byte buffer (std- and alloc-less
/// take on [`std::io::Cursor`])
///
/// Used by the parsing internals to walk a datagram exactly once,
/// front to back, with every read bounds-checked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Cursor<T> {
  t: T,
  cursor: usize,
  len: usize,
}

impl<T: AsRef<[u8]>> Cursor<T> {
  /// Creates a new cursor positioned at the start of the buffer
  pub(crate) fn new(t: T) -> Cursor<T> {
    let len = t.as_ref().len();
    Cursor { t, cursor: 0, len }
  }

  /// Take the next byte in the cursor, returning None
  /// if the cursor is exhausted.
  ///
  /// Runs in O(1) time.
  pub(crate) fn next(&mut self) -> Option<u8> {
    self.take_exact(1).and_then(|a| match a {
                        | &[a] => Some(a),
                        | _ => None,
                      })
  }

  /// Take `n` bytes from the cursor, returning None if
  /// fewer than `n` bytes remain.
  ///
  /// Runs in O(1) time.
  pub(crate) fn take_exact(&mut self, n: usize) -> Option<&[u8]> {
    if n > self.remaining() {
      None
    } else {
      let out = &self.t.as_ref()[self.cursor..self.cursor + n];
      self.cursor += n;
      Some(out)
    }
  }

  /// Take all bytes between the current position and
  /// the end of the buffer, exhausting the cursor.
  ///
  /// Runs in O(1) time.
  pub(crate) fn take_until_end(&mut self) -> &[u8] {
    let out = &self.t.as_ref()[self.cursor..];
    self.cursor = self.len;
    out
  }

  /// The number of bytes not yet consumed.
  ///
  /// Runs in O(1) time.
  pub(crate) fn remaining(&self) -> usize {
    self.len - self.cursor
  }
}
