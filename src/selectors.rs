/*!
# Byte classes

The parser compares the input against ASCII control characters only; every
other byte (including all bytes of multi-byte UTF-8 sequences) is ordinary
name or text material.
*/

/// Whitespace: space, tab, line feed, carriage return, vertical tab and form
/// feed.
pub static CLASS_SPACE_BYTE: &'static [u8] = b" \t\n\r\x0b\x0c";

/// Bytes which terminate a tag or attribute name (in addition to whitespace).
pub static CLASS_NAME_DELIMITER_BYTE: &'static [u8] = b"<>?/=\"";

/// Bytes which terminate a text run.
pub static CLASS_TEXT_DELIMITER_BYTE: &'static [u8] = b"<>";

#[inline]
pub fn is_whitespace(b: u8) -> bool {
	CLASS_SPACE_BYTE.contains(&b)
}

/// Deliberately permissive: anything which is neither whitespace nor one of
/// [`CLASS_NAME_DELIMITER_BYTE`] may be part of a name.
#[inline]
pub fn is_name_char(b: u8) -> bool {
	!is_whitespace(b) && !CLASS_NAME_DELIMITER_BYTE.contains(&b)
}

#[inline]
pub fn is_text_char(b: u8) -> bool {
	!CLASS_TEXT_DELIMITER_BYTE.contains(&b)
}
