/*!
# Tree model

A parsed document is a tree of [`Value`] nodes. Tag names, attribute names and
values and text content are borrowed from the input buffer; the children
sequences and attribute maps are owned by their node and released when the
node is dropped.
*/
use std::collections::HashMap;
use std::fmt;
use std::mem;

/// Attribute map of an element or declaration.
///
/// `None` as value marks an attribute written without value (`<a disabled/>`).
/// Iteration order is unspecified.
pub type Attributes<'a> = HashMap<&'a [u8], Option<&'a [u8]>>;

/// A node of the parsed tree.
pub enum Value<'a> {
	/// Synthetic root holding all top-level nodes. Only ever returned as the
	/// outermost node by [`crate::parse`].
	Document(Box<[Value<'a>]>),

	/// `<?tag ...?>`
	Declaration {
		tag: &'a [u8],
		attributes: Attributes<'a>,
	},

	/// `<tag ...>...</tag>` or `<tag .../>`
	Element {
		tag: &'a [u8],
		attributes: Attributes<'a>,
		children: Box<[Value<'a>]>,
	},

	/// Run of bytes between markup, including leading whitespace.
	Text(&'a [u8]),
}

impl<'a> Value<'a> {
	/// Release the node and everything it owns.
	///
	/// Equivalent to dropping the value. Dropping does not recurse, so
	/// arbitrarily deep trees can be released.
	pub fn release(self) {}

	/// Tag name of an element or declaration.
	pub fn tag(&self) -> Option<&'a [u8]> {
		match self {
			Value::Element { tag, .. } | Value::Declaration { tag, .. } => Some(*tag),
			Value::Document(_) | Value::Text(_) => None,
		}
	}

	pub fn attributes(&self) -> Option<&Attributes<'a>> {
		match self {
			Value::Element { attributes, .. } | Value::Declaration { attributes, .. } => {
				Some(attributes)
			}
			Value::Document(_) | Value::Text(_) => None,
		}
	}

	/// Direct children of a document or element; empty for all other nodes.
	pub fn children(&self) -> &[Value<'a>] {
		match self {
			Value::Document(children) | Value::Element { children, .. } => &children[..],
			Value::Declaration { .. } | Value::Text(_) => &[],
		}
	}

	pub fn text(&self) -> Option<&'a [u8]> {
		match self {
			Value::Text(content) => Some(*content),
			_ => None,
		}
	}

	/// Look up an attribute.
	///
	/// The outer `Option` is `None` if the node cannot carry attributes or
	/// the attribute is absent. The inner `Option` is `None` if the attribute
	/// is present without a value.
	///
	/// ```
	/// let doc = bxml::parse(b"<a x=\"1\" y/>").unwrap();
	/// let a = &doc.children()[0];
	/// assert_eq!(a.get_attribute("x"), Some(Some(&b"1"[..])));
	/// assert_eq!(a.get_attribute("y"), Some(None));
	/// assert_eq!(a.get_attribute("z"), None);
	/// ```
	pub fn get_attribute<N: AsRef<[u8]> + ?Sized>(&self, name: &N) -> Option<Option<&'a [u8]>> {
		self.attributes()?.get(name.as_ref()).copied()
	}

	pub fn is_document(&self) -> bool {
		matches!(self, Value::Document(_))
	}

	pub fn is_declaration(&self) -> bool {
		matches!(self, Value::Declaration { .. })
	}

	pub fn is_element(&self) -> bool {
		matches!(self, Value::Element { .. })
	}

	pub fn is_text(&self) -> bool {
		matches!(self, Value::Text(_))
	}
}

fn children_mut<'v, 'a>(value: &'v mut Value<'a>) -> Option<&'v mut Box<[Value<'a>]>> {
	match value {
		Value::Document(children) | Value::Element { children, .. } => Some(children),
		Value::Declaration { .. } | Value::Text(_) => None,
	}
}

impl Drop for Value<'_> {
	fn drop(&mut self) {
		let children = match children_mut(self) {
			Some(children) => children,
			None => return,
		};
		if children.iter().all(|child| child.children().is_empty()) {
			return;
		}
		// detach grandchildren so that every node is dropped with an empty
		// children slice
		let mut pending = vec![mem::take(children)];
		while let Some(mut nodes) = pending.pop() {
			for node in nodes.iter_mut() {
				if let Some(grandchildren) = children_mut(node) {
					if !grandchildren.is_empty() {
						pending.push(mem::take(grandchildren));
					}
				}
			}
		}
	}
}

fn escape_byte<'f>(v: u8, f: &'f mut fmt::Formatter) -> fmt::Result {
	if v >= 0x20u8 && v < 0x7fu8 && v != b'"' && v != b'\\' {
		let ch = v as char;
		write!(f, "{}", ch)
	} else {
		write!(f, "\\x{:02x}", v)
	}
}

#[derive(Copy, Clone)]
pub(crate) struct DebugBytes<'a>(pub(crate) &'a [u8]);

impl<'a> fmt::Debug for DebugBytes<'a> {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		f.write_str("b\"")?;
		for b in self.0.iter() {
			escape_byte(*b, f)?;
		}
		f.write_str("\"")?;
		Ok(())
	}
}

struct DebugAttributes<'x, 'a>(&'x Attributes<'a>);

impl fmt::Debug for DebugAttributes<'_, '_> {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		let mut map = f.debug_map();
		for (name, value) in self.0.iter() {
			map.entry(&DebugBytes(name), &value.map(DebugBytes));
		}
		map.finish()
	}
}

impl fmt::Debug for Value<'_> {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			Value::Document(children) => f.debug_tuple("Document").field(children).finish(),
			Value::Declaration { tag, attributes } => f
				.debug_struct("Declaration")
				.field("tag", &DebugBytes(tag))
				.field("attributes", &DebugAttributes(attributes))
				.finish(),
			Value::Element {
				tag,
				attributes,
				children,
			} => f
				.debug_struct("Element")
				.field("tag", &DebugBytes(tag))
				.field("attributes", &DebugAttributes(attributes))
				.field("children", children)
				.finish(),
			Value::Text(content) => f.debug_tuple("Text").field(&DebugBytes(content)).finish(),
		}
	}
}

impl PartialEq for Value<'_> {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Document(a), Value::Document(b)) => a == b,
			(
				Value::Declaration {
					tag: tag_a,
					attributes: attrs_a,
				},
				Value::Declaration {
					tag: tag_b,
					attributes: attrs_b,
				},
			) => tag_a == tag_b && attrs_a == attrs_b,
			(
				Value::Element {
					tag: tag_a,
					attributes: attrs_a,
					children: children_a,
				},
				Value::Element {
					tag: tag_b,
					attributes: attrs_b,
					children: children_b,
				},
			) => tag_a == tag_b && attrs_a == attrs_b && children_a == children_b,
			(Value::Text(a), Value::Text(b)) => a == b,
			_ => false,
		}
	}
}
