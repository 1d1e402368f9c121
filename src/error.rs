/*!
# Error types

All structural violations are reported as [`Error::InvalidData`]; the
wrapped [`WFError`] says what exactly went wrong and where.
*/
use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result::Result as StdResult;

pub const ERRCTX_COMMENT: &'static str = "in comment";
pub const ERRCTX_ATTVAL: &'static str = "in attribute value";
pub const ERRCTX_ATTVAL_START: &'static str = "at start of attribute value";
pub const ERRCTX_ELEMENT_HEAD_END: &'static str = "at end of element header";
pub const ERRCTX_ELEMENT_FOOT: &'static str = "in element footer";
pub const ERRCTX_ELEMENT_CLOSE: &'static str = "at element close";
pub const ERRCTX_DECL_END: &'static str = "at end of declaration";
pub const ERRCTX_DOCEND: &'static str = "after end of document";

/// Violation of the grammar accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WFError {
	/// End of input encountered during a construct where more data was
	/// expected, e.g. an unterminated comment or attribute value.
	///
	/// The contents are implementation details.
	InvalidEof(&'static str),

	/// Byte which was not expected at that point in the grammar.
	///
	/// The contents are implementation details.
	UnexpectedByte(&'static str, u8, Option<&'static [&'static str]>),

	/// Attribute was declared multiple times in the same element or
	/// declaration.
	DuplicateAttribute,

	/// Ending tag name does not match opening tag.
	ElementMismatch,
}

impl error::Error for WFError {}

fn write_expected<'f>(f: &'f mut fmt::Formatter, opts: &'static [&'static str]) -> fmt::Result {
	if opts.len() == 1 {
		f.write_str(opts[0])?;
		f.write_str(")")
	} else {
		f.write_str("one of: ")?;
		for (i, opt) in opts.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			f.write_str(*opt)?;
		}
		f.write_str(")")
	}
}

impl fmt::Display for WFError {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			WFError::InvalidEof(ctx) => write!(f, "invalid eof {}", ctx),
			WFError::UnexpectedByte(ctx, b, Some(opts)) if opts.len() > 0 => {
				write!(f, "0x{:02x} not allowed {} (expected ", *b, ctx)?;
				write_expected(f, opts)
			}
			WFError::UnexpectedByte(ctx, b, _) => write!(f, "0x{:02x} not allowed {}", *b, ctx),
			WFError::DuplicateAttribute => f.write_str("duplicate attribute"),
			WFError::ElementMismatch => f.write_str("start and end tag do not match"),
		}
	}
}

/// Error type returned by [`crate::parse`].
///
/// No partial result is ever returned together with an error: whatever was
/// built before the failure has already been released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// The input violates the accepted grammar.
	///
	/// The second field is the byte offset into the input at which the
	/// violation was detected.
	InvalidData(WFError, usize),

	/// Memory for a node, an attribute entry or a children slot could not
	/// be allocated.
	OutOfMemory,

	/// A limit configured via [`crate::ParserOptions`] was exceeded.
	///
	/// The string indicates the context and should not be interpreted by user
	/// code. The second field is the byte offset.
	RestrictedXml(&'static str, usize),
}

pub type Result<T> = StdResult<T, Error>;

impl Error {
	pub(crate) fn wfeof(ctx: &'static str, offset: usize) -> Error {
		Error::InvalidData(WFError::InvalidEof(ctx), offset)
	}

	/// Byte offset in the input at which the error was detected, if known.
	pub fn offset(&self) -> Option<usize> {
		match self {
			Error::InvalidData(_, offset) | Error::RestrictedXml(_, offset) => Some(*offset),
			Error::OutOfMemory => None,
		}
	}
}

impl From<TryReserveError> for Error {
	fn from(_: TryReserveError) -> Error {
		Error::OutOfMemory
	}
}

impl fmt::Display for Error {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::InvalidData(e, offset) => write!(f, "invalid data at byte {}: {}", offset, e),
			Error::OutOfMemory => f.write_str("out of memory"),
			Error::RestrictedXml(msg, offset) => write!(f, "restricted xml at byte {}: {}", offset, msg),
		}
	}
}

impl error::Error for Error {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		match self {
			Error::InvalidData(e, _) => Some(e),
			Error::OutOfMemory | Error::RestrictedXml(..) => None,
		}
	}
}
