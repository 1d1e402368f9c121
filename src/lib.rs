/*!
# Lightweight XML tree parsing

This crate turns an in-memory byte buffer into a tree of [`Value`] nodes in a
single depth-first pass. Tag names, attribute values and text are borrowed
from the input, so the tree can never outlive the buffer it was parsed from.

## Features (some call them restrictions)

* Whole input in memory, no streaming
* No entity or character reference decoding; values are raw byte slices
* No CDATA sections
* No DTD, external entities or schema processing
* No namespace resolution; prefixes are part of the tag name
* No encoding negotiation; markup is recognized by ASCII bytes only
* Comments are skipped
* Duplicate attributes are an error

## Example

```
let doc = bxml::parse(b"<?xml version=\"1.0\"?><hello who=\"World\">Hi!</hello>").unwrap();
let hello = doc.search("hello").next().unwrap();
assert_eq!(hello.get_attribute("who"), Some(Some(&b"World"[..])));
assert_eq!(hello.children()[0].text(), Some(&b"Hi!"[..]));
```

## Errors

Any violation of the accepted grammar fails the whole parse with
[`Error::InvalidData`]; there is no partial result. This includes input left
over after the last top-level node, such as a stray closing tag or `>`.
Allocation failures while growing the tree are reported as
[`Error::OutOfMemory`].

```
use bxml::{parse, Error, WFError};
assert!(matches!(
    parse(b"<a/></b>"),
    Err(Error::InvalidData(WFError::UnexpectedByte(..), 4))
));
assert!(matches!(
    parse(b"text>"),
    Err(Error::InvalidData(WFError::UnexpectedByte(..), 4))
));
```

Nesting depth is limited only by the input length unless
[`ParserOptions::max_depth`] is set.

## Logging

Tree construction is traced via the [`log`] facade under the
`bxml::parser` target; failed parses are logged at debug level under the
`bxml` target.
*/
use log::debug;

pub mod cursor;
pub mod error;
mod parser;
pub mod search;
pub mod selectors;
pub mod value;
pub mod writer;


#[doc(inline)]
pub use error::{Error, Result, WFError};
pub use parser::ParserOptions;
#[doc(inline)]
pub use search::Search;
#[doc(inline)]
pub use value::{Attributes, Value};

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

/// Parse `input` into a [`Value::Document`] using default options.
///
/// The returned tree borrows from `input`. It is released by dropping it.
///
/// ```
/// use bxml::{parse, Error, WFError};
/// assert!(parse(b"<a/>").is_ok());
/// assert!(matches!(
///     parse(b"<a></b>"),
///     Err(Error::InvalidData(WFError::ElementMismatch, _))
/// ));
/// ```
pub fn parse(input: &[u8]) -> Result<Value<'_>> {
	parse_with_options(input, ParserOptions::default())
}

/// Parse `input` into a [`Value::Document`] using the given options.
pub fn parse_with_options(input: &[u8], opts: ParserOptions) -> Result<Value<'_>> {
	let result = parser::Parser::with_options(input, opts).parse_document();
	if let Err(ref e) = result {
		debug!(target: "bxml", "failed to parse {} bytes: {}", input.len(), e);
	}
	result
}
