/*!
# Single-pass grammar

The `Parser` walks the input once, depth-first. Nodes are built bottom-up:
an element only comes into existence after all its children have been parsed.
Elements whose footer is still outstanding are kept on an explicit stack, not
on the call stack. Any error abandons the parse, dropping everything
accumulated so far.
*/
use log::trace;

use crate::cursor::Cursor;
use crate::error::*;
use crate::selectors::{is_name_char, is_whitespace};
use crate::value::{Attributes, DebugBytes, Value};

const TOK_COMMENT_START: &'static [u8] = b"<!--";
const TOK_COMMENT_END: &'static [u8] = b"-->";
const TOK_DECL_END: &'static [u8] = b"?>";
const TOK_HEAD_CLOSE: &'static [u8] = b"/>";
const TOK_FOOT_START: &'static [u8] = b"</";

/// Options to tune the parser.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct ParserOptions {
	/// Maximum nesting depth of elements, counting top-level elements as
	/// depth 1.
	///
	/// `None` means unlimited. Elements nested deeper cause
	/// [`Error::RestrictedXml`].
	pub max_depth: Option<usize>,
}

impl ParserOptions {
	/// Set the [`ParserOptions::max_depth`] value.
	///
	/// # Example
	///
	/// ```
	/// use bxml::{parse_with_options, Error, ParserOptions};
	/// let opts = ParserOptions::default().max_depth(1);
	/// assert!(parse_with_options(b"<a/>", opts).is_ok());
	/// assert!(matches!(
	///     parse_with_options(b"<a><b/></a>", opts),
	///     Err(Error::RestrictedXml(..))
	/// ));
	/// ```
	pub fn max_depth(mut self, v: usize) -> ParserOptions {
		self.max_depth = Some(v);
		self
	}
}

impl Default for ParserOptions {
	fn default() -> Self {
		Self { max_depth: None }
	}
}

/// Outcome of a single dispatch step inside a list of siblings.
#[derive(Debug)]
pub(crate) enum Step<'a> {
	Produced(Value<'a>),
	/// An element header ended with `>`; its children follow.
	Opened {
		tag: &'a [u8],
		attributes: Attributes<'a>,
	},
	/// The input continues with a closing tag or has no more values for the
	/// current sibling list. Nothing of the closing tag has been consumed.
	EndOfSiblings,
}

/// An element whose header has been read but whose footer has not.
struct Frame<'a> {
	tag: &'a [u8],
	attributes: Attributes<'a>,
	children: Vec<Value<'a>>,
}

pub(crate) struct Parser<'a> {
	cursor: Cursor<'a>,
	opts: ParserOptions,
	/// Currently open elements, innermost last.
	open: Vec<Frame<'a>>,
}

impl<'a> Parser<'a> {
	pub(crate) fn with_options(input: &'a [u8], opts: ParserOptions) -> Self {
		Self {
			cursor: Cursor::new(input),
			opts: opts,
			open: Vec::new(),
		}
	}

	/// Build the error for a failed match of `lit` at the current position.
	///
	/// If the remaining input is a prefix of `lit`, this is an eof condition,
	/// otherwise the first differing byte is reported.
	fn mismatch(&self, lit: &[u8], ctx: &'static str, expected: Option<&'static [&'static str]>) -> Error {
		let offset = self.cursor.position();
		let remaining = self.cursor.remaining();
		match remaining.iter().zip(lit.iter()).position(|(a, b)| a != b) {
			Some(i) => Error::InvalidData(WFError::UnexpectedByte(ctx, remaining[i], expected), offset + i),
			None => Error::wfeof(ctx, offset + remaining.len()),
		}
	}

	fn expect_literal(&mut self, lit: &'static [u8], ctx: &'static str, expected: &'static [&'static str]) -> Result<()> {
		if self.cursor.match_literal(lit) {
			Ok(())
		} else {
			Err(self.mismatch(lit, ctx, Some(expected)))
		}
	}

	/// Skip the body of a comment; the opening `<!--` has been consumed.
	fn skip_comment(&mut self) -> Result<()> {
		if self.cursor.skip_past_literal(TOK_COMMENT_END) {
			Ok(())
		} else {
			Err(Error::wfeof(ERRCTX_COMMENT, self.cursor.position()))
		}
	}

	/// Parse the next node of the current sibling list.
	///
	/// Comments are skipped transparently. Whitespace preceding text is
	/// kept as part of the text; whitespace preceding markup is dropped.
	pub(crate) fn parse_value(&mut self) -> Result<Step<'a>> {
		let mut value_start = self.cursor.position();
		self.cursor.skip_while(is_whitespace);
		while self.cursor.match_literal(TOK_COMMENT_START) {
			self.skip_comment()?;
			value_start = self.cursor.position();
			self.cursor.skip_while(is_whitespace);
		}

		if self.cursor.peek() == Some(b'<') {
			if self.cursor.remaining().starts_with(TOK_FOOT_START) {
				return Ok(Step::EndOfSiblings);
			}
			self.cursor.skip_one();
			self.parse_element()
		} else {
			Ok(self.parse_text(value_start))
		}
	}

	/// Parse an element or declaration header; the leading `<` has been
	/// consumed.
	fn parse_element(&mut self) -> Result<Step<'a>> {
		let element_start = self.cursor.position() - 1;
		if let Some(max_depth) = self.opts.max_depth {
			if self.open.len() >= max_depth {
				return Err(Error::RestrictedXml("element nesting too deep", element_start));
			}
		}

		let is_declaration = self.cursor.match_byte(b'?');
		let tag_start = self.cursor.position();
		self.cursor.skip_while(is_name_char);
		let tag = self.cursor.slice_from(tag_start);
		let attributes = self.parse_attributes()?;

		if is_declaration {
			self.expect_literal(TOK_DECL_END, ERRCTX_DECL_END, &["'?>'"])?;
			trace!(target: "bxml::parser", "declaration {:?} with {} attributes", DebugBytes(tag), attributes.len());
			return Ok(Step::Produced(Value::Declaration { tag, attributes }));
		}

		if self.cursor.match_literal(TOK_HEAD_CLOSE) {
			trace!(
				target: "bxml::parser",
				"element {:?} with {} attributes and no children",
				DebugBytes(tag),
				attributes.len(),
			);
			Ok(Step::Produced(Value::Element {
				tag,
				attributes,
				children: Box::new([]),
			}))
		} else if self.cursor.match_byte(b'>') {
			Ok(Step::Opened { tag, attributes })
		} else {
			Err(self.mismatch(b">", ERRCTX_ELEMENT_HEAD_END, Some(&["'/>'", "'>'"])))
		}
	}

	/// Parse a quoted attribute value; the `=` has been consumed.
	///
	/// A backslash causes the following byte to be taken verbatim, which
	/// allows `\"` inside values. The backslash stays part of the value.
	fn parse_attribute_value(&mut self) -> Result<&'a [u8]> {
		if !self.cursor.match_byte(b'"') {
			return Err(self.mismatch(b"\"", ERRCTX_ATTVAL_START, Some(&["'\"'"])));
		}
		let value_start = self.cursor.position();
		loop {
			match self.cursor.skip_until2(b'"', b'\\') {
				Some(b'"') => break,
				Some(_) => {
					self.cursor.skip_one();
					if self.cursor.advance().is_none() {
						return Err(Error::wfeof(ERRCTX_ATTVAL, self.cursor.position()));
					}
				}
				None => return Err(Error::wfeof(ERRCTX_ATTVAL, self.cursor.position())),
			}
		}
		let value = self.cursor.slice_from(value_start);
		self.cursor.skip_one();
		Ok(value)
	}

	fn parse_attributes(&mut self) -> Result<Attributes<'a>> {
		let mut attributes = Attributes::new();
		loop {
			self.cursor.skip_while(is_whitespace);
			let name_start = self.cursor.position();
			self.cursor.skip_while(is_name_char);
			let name = self.cursor.slice_from(name_start);
			if name.is_empty() {
				return Ok(attributes);
			}

			let value = if self.cursor.match_byte(b'=') {
				Some(self.parse_attribute_value()?)
			} else {
				None
			};
			if attributes.contains_key(name) {
				return Err(Error::InvalidData(WFError::DuplicateAttribute, name_start));
			}
			attributes.try_reserve(1)?;
			attributes.insert(name, value);
		}
	}

	/// Match the name in an element footer against `tag`. The `</` has been
	/// consumed.
	fn expect_closing_tag(&mut self, tag: &'a [u8]) -> Result<()> {
		let offset = self.cursor.position();
		if self.cursor.match_literal(tag) {
			if self.cursor.peek().map_or(false, is_name_char) {
				return Err(Error::InvalidData(WFError::ElementMismatch, offset));
			}
			return Ok(());
		}
		let footer = self.cursor.remaining();
		if tag.starts_with(footer) {
			Err(Error::wfeof(ERRCTX_ELEMENT_FOOT, offset + footer.len()))
		} else {
			Err(Error::InvalidData(WFError::ElementMismatch, offset))
		}
	}

	/// Parse the footer of the innermost open element and turn it into a
	/// complete [`Value::Element`].
	fn close_element(&mut self, frame: Frame<'a>) -> Result<Value<'a>> {
		self.expect_literal(TOK_FOOT_START, ERRCTX_ELEMENT_FOOT, &["'</'"])?;
		self.expect_closing_tag(frame.tag)?;
		self.cursor.skip_while(is_whitespace);
		self.expect_literal(b">", ERRCTX_ELEMENT_CLOSE, &["'>'"])?;
		trace!(
			target: "bxml::parser",
			"element {:?} with {} attributes and {} children",
			DebugBytes(frame.tag),
			frame.attributes.len(),
			frame.children.len(),
		);
		Ok(Value::Element {
			tag: frame.tag,
			attributes: frame.attributes,
			children: frame.children.into_boxed_slice(),
		})
	}

	/// Parse a text run. `value_start` may lie before whitespace which has
	/// already been skipped; that whitespace becomes part of the text.
	fn parse_text(&mut self, value_start: usize) -> Step<'a> {
		let text_start = self.cursor.position();
		self.cursor.skip_until2(b'<', b'>');
		if self.cursor.position() == text_start {
			return Step::EndOfSiblings;
		}
		Step::Produced(Value::Text(self.cursor.slice_from(value_start)))
	}

	/// Append a finished value to the innermost open element, or to the top
	/// level if no element is open.
	fn push_value(&mut self, top: &mut Vec<Value<'a>>, value: Value<'a>) -> Result<()> {
		let siblings = match self.open.last_mut() {
			Some(frame) => &mut frame.children,
			None => top,
		};
		siblings.try_reserve(1)?;
		siblings.push(value);
		Ok(())
	}

	/// Parse the whole input into a [`Value::Document`].
	///
	/// Open elements live on a heap stack instead of the call stack, so
	/// nesting depth is bounded only by the input length.
	pub(crate) fn parse_document(&mut self) -> Result<Value<'a>> {
		let mut top = Vec::new();
		loop {
			match self.parse_value()? {
				Step::Produced(v) => self.push_value(&mut top, v)?,
				Step::Opened { tag, attributes } => {
					self.open.try_reserve(1)?;
					self.open.push(Frame {
						tag,
						attributes,
						children: Vec::new(),
					});
				}
				Step::EndOfSiblings => match self.open.pop() {
					Some(frame) => {
						let element = self.close_element(frame)?;
						self.push_value(&mut top, element)?;
					}
					None => break,
				},
			}
		}

		if let Some(b) = self.cursor.peek() {
			return Err(Error::InvalidData(
				WFError::UnexpectedByte(ERRCTX_DOCEND, b, None),
				self.cursor.position(),
			));
		}
		trace!(target: "bxml::parser", "document with {} top-level nodes", top.len());
		Ok(Value::Document(top.into_boxed_slice()))
	}
}
