/*!
# Rendering trees back to XML-like text

Tag names, attribute values and text are written verbatim, exactly as they
were borrowed from the input; nothing is escaped. Attribute order follows the
iteration order of the attribute map and is therefore unspecified.
*/
use bytes::{BufMut, BytesMut};

use crate::value::{Attributes, Value};

fn render_attributes<O: BufMut>(attributes: &Attributes<'_>, out: &mut O) {
	for (name, value) in attributes.iter() {
		out.put_u8(b' ');
		out.put_slice(name);
		if let Some(value) = value {
			out.put_slice(b"=\"");
			out.put_slice(value);
			out.put_u8(b'"');
		}
	}
}

/// Written between two adjacent text nodes; without it they would read back
/// as a single text node.
const TEXT_SEPARATOR: &'static [u8] = b"<!---->";

enum Item<'v, 'a> {
	Node(&'v Value<'a>),
	Close(&'a [u8]),
	Separator,
}

/// Queue `children` so that they are popped in document order.
fn push_children<'v, 'a>(stack: &mut Vec<Item<'v, 'a>>, children: &'v [Value<'a>]) {
	for (i, child) in children.iter().enumerate().rev() {
		stack.push(Item::Node(child));
		if i > 0 && child.is_text() && children[i - 1].is_text() {
			stack.push(Item::Separator);
		}
	}
}

fn adjacent_texts(children: &[Value<'_>]) -> usize {
	children
		.windows(2)
		.filter(|pair| pair[0].is_text() && pair[1].is_text())
		.count()
}

/// Rough upper bound of the rendered size, used to reserve output space.
fn estimate_len(value: &Value<'_>) -> usize {
	let attrs_len = |attributes: &Attributes<'_>| -> usize {
		attributes
			.iter()
			.map(|(name, value)| name.len() + value.map_or(1, |v| v.len() + 4))
			.sum()
	};
	let mut total = 0;
	let mut pending = vec![value];
	while let Some(value) = pending.pop() {
		total += match value {
			Value::Declaration { tag, attributes } => tag.len() + attrs_len(attributes) + 4,
			Value::Element { tag, attributes, .. } => 2 * tag.len() + attrs_len(attributes) + 5,
			Value::Text(content) => content.len(),
			Value::Document(_) => 0,
		};
		let children = value.children();
		total += TEXT_SEPARATOR.len() * adjacent_texts(children);
		pending.extend(children.iter());
	}
	total
}

impl Value<'_> {
	/// Write the tree rooted at this node to `out`.
	///
	/// Elements without children are written self-closing (`<tag/>`), except
	/// for the nameless element, which is written as `<></>`. Declarations
	/// are written as `<?tag?>`. A document writes its children one after
	/// another. Two adjacent text nodes are separated by an empty comment so
	/// that they stay apart when the output is parsed again.
	///
	/// ```
	/// let doc = bxml::parse(b"<a><b></b>text</a>").unwrap();
	/// let mut out = Vec::new();
	/// doc.render(&mut out);
	/// assert_eq!(out, b"<a><b/>text</a>");
	/// ```
	pub fn render<O: BufMut>(&self, out: &mut O) {
		let mut stack = vec![Item::Node(self)];
		while let Some(item) = stack.pop() {
			let value = match item {
				Item::Node(value) => value,
				Item::Close(tag) => {
					out.put_slice(b"</");
					out.put_slice(tag);
					out.put_u8(b'>');
					continue;
				}
				Item::Separator => {
					out.put_slice(TEXT_SEPARATOR);
					continue;
				}
			};
			match value {
				Value::Document(children) => push_children(&mut stack, children),
				Value::Declaration { tag, attributes } => {
					out.put_slice(b"<?");
					out.put_slice(tag);
					render_attributes(attributes, out);
					out.put_slice(b"?>");
				}
				Value::Element {
					tag,
					attributes,
					children,
				} => {
					out.put_u8(b'<');
					out.put_slice(tag);
					render_attributes(attributes, out);
					// `</>` would read back as a closing tag
					if children.is_empty() && !tag.is_empty() {
						out.put_slice(b"/>");
						continue;
					}
					out.put_u8(b'>');
					stack.push(Item::Close(*tag));
					push_children(&mut stack, children);
				}
				Value::Text(content) => out.put_slice(content),
			}
		}
	}

	/// Render into a [`BytesMut`], reserving enough space up front.
	pub fn render_into_bytes(&self, out: &mut BytesMut) {
		out.reserve(estimate_len(self));
		self.render(out)
	}
}
