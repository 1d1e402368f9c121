/*!
# Scanning position over the input buffer

The [`Cursor`] is an offset into a borrowed byte slice. It never reads out of
bounds and never allocates; all slices handed out borrow the input, not the
cursor.
*/
use memchr::{memchr2, memmem};

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	input: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	pub fn new(input: &'a [u8]) -> Self {
		Self {
			input: input,
			pos: 0,
		}
	}

	/// Current offset into the input.
	#[inline]
	pub fn position(&self) -> usize {
		self.pos
	}

	#[inline]
	pub fn is_eof(&self) -> bool {
		self.pos >= self.input.len()
	}

	/// Everything from the current position to the end of the input.
	#[inline]
	pub fn remaining(&self) -> &'a [u8] {
		&self.input[self.pos..]
	}

	#[inline]
	pub fn peek(&self) -> Option<u8> {
		self.input.get(self.pos).copied()
	}

	#[inline]
	pub fn advance(&mut self) -> Option<u8> {
		let b = self.peek()?;
		self.pos += 1;
		Some(b)
	}

	/// Move forward by one byte. The caller has to know that a byte is
	/// available (e.g. after a successful `peek`).
	#[inline]
	pub fn skip_one(&mut self) {
		debug_assert!(self.pos < self.input.len());
		self.pos += 1;
	}

	/// Undo a single-byte read.
	#[inline]
	pub fn retreat_one(&mut self) {
		debug_assert!(self.pos > 0);
		self.pos -= 1;
	}

	#[inline]
	pub fn match_predicate<F: Fn(u8) -> bool>(&mut self, pred: F) -> bool {
		match self.peek() {
			Some(b) if pred(b) => {
				self.pos += 1;
				true
			}
			_ => false,
		}
	}

	#[inline]
	pub fn match_byte(&mut self, b: u8) -> bool {
		self.match_predicate(|c| c == b)
	}

	pub fn skip_while<F: Fn(u8) -> bool>(&mut self, pred: F) {
		while self.match_predicate(&pred) {}
	}

	/// Consume `lit` if the input continues with exactly these bytes.
	/// Consumes nothing otherwise.
	pub fn match_literal(&mut self, lit: &[u8]) -> bool {
		if self.remaining().starts_with(lit) {
			self.pos += lit.len();
			true
		} else {
			false
		}
	}

	/// Advance up to (not past) the next occurrence of `a` or `b` and return
	/// the byte found. At end of input, `None` is returned and the cursor
	/// sits at the end.
	pub fn skip_until2(&mut self, a: u8, b: u8) -> Option<u8> {
		match memchr2(a, b, self.remaining()) {
			Some(offset) => {
				self.pos += offset;
				self.peek()
			}
			None => {
				self.pos = self.input.len();
				None
			}
		}
	}

	/// Advance just past the next occurrence of `lit`. If there is none, the
	/// cursor moves to the end of the input and `false` is returned.
	pub fn skip_past_literal(&mut self, lit: &[u8]) -> bool {
		match memmem::find(self.remaining(), lit) {
			Some(offset) => {
				self.pos += offset + lit.len();
				true
			}
			None => {
				self.pos = self.input.len();
				false
			}
		}
	}

	/// Window `[start, end)` of the input.
	#[inline]
	pub fn slice_between(&self, start: usize, end: usize) -> &'a [u8] {
		debug_assert!(start <= end && end <= self.input.len());
		&self.input[start..end]
	}

	/// Window from `start` up to the current position.
	#[inline]
	pub fn slice_from(&self, start: usize) -> &'a [u8] {
		self.slice_between(start, self.pos)
	}
}
