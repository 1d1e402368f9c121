/*!
# Tag search over direct children
*/
use std::iter::FusedIterator;
use std::slice;

use crate::value::Value;

/// Iterator over the direct children of a node whose tag equals a given
/// name.
///
/// Created by [`Value::search`]. Elements and declarations are matched by
/// comparing their tag byte-for-byte; text nodes never match. Descendants
/// further down the tree are not visited.
#[derive(Debug, Clone)]
pub struct Search<'v, 'a, 't> {
	children: slice::Iter<'v, Value<'a>>,
	tag: &'t [u8],
}

impl<'v, 'a, 't> Iterator for Search<'v, 'a, 't> {
	type Item = &'v Value<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		let tag = self.tag;
		self.children.find(|child| child.tag() == Some(tag))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, Some(self.children.len()))
	}
}

impl FusedIterator for Search<'_, '_, '_> {}

impl<'a> Value<'a> {
	/// Iterate over the direct children whose tag equals `tag`, in document
	/// order.
	///
	/// For text and declaration nodes the iterator is empty.
	///
	/// ```
	/// let doc = bxml::parse(b"<root><a/><b><a/></b><a x/></root>").unwrap();
	/// let root = doc.search("root").next().unwrap();
	/// assert_eq!(root.search("a").count(), 2);
	/// ```
	pub fn search<'v, 't, T: AsRef<[u8]> + ?Sized>(&'v self, tag: &'t T) -> Search<'v, 'a, 't> {
		Search {
			children: self.children().iter(),
			tag: tag.as_ref(),
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::parse;

	#[test]
	fn search_only_visits_direct_children() {
		let doc = parse(b"<root><a/><b><a/></b></root>").unwrap();
		// the document's only direct child is `root`
		assert_eq!(doc.search("a").count(), 0);
		let root = doc.search("root").next().unwrap();
		let found: Vec<_> = root.search("a").collect();
		assert_eq!(found.len(), 1);
		assert!(std::ptr::eq(found[0], &root.children()[0]));
	}

	#[test]
	fn search_on_document_scans_top_level() {
		let doc = parse(b"<a/><b/><a/>").unwrap();
		assert_eq!(doc.search("a").count(), 2);
		assert_eq!(doc.search("b").count(), 1);
		assert_eq!(doc.search("c").count(), 0);
	}

	#[test]
	fn search_yields_matches_in_document_order() {
		let doc = parse(br#"<r><x n="1"/><y/><x n="2"/>text<x n="3"/></r>"#).unwrap();
		let r = &doc.children()[0];
		let ns: Vec<_> = r
			.search("x")
			.map(|x| x.get_attribute("n").unwrap().unwrap())
			.collect();
		assert_eq!(ns, vec![&b"1"[..], &b"2"[..], &b"3"[..]]);
	}

	#[test]
	fn search_matches_declarations_but_not_text() {
		let doc = parse(br#"<?xml version="1.0"?>xml<xml/>"#).unwrap();
		let found: Vec<_> = doc.search("xml").collect();
		assert_eq!(found.len(), 2);
		assert!(found[0].is_declaration());
		assert!(found[1].is_element());
	}

	#[test]
	fn search_on_leaf_nodes_is_empty() {
		let doc = parse(b"<?pi a?>t").unwrap();
		for child in doc.children() {
			assert_eq!(child.search("a").count(), 0);
			assert_eq!(child.search("t").count(), 0);
		}
	}

	#[test]
	fn search_compares_tags_exactly() {
		let doc = parse(b"<ab/><a/><A/>").unwrap();
		assert_eq!(doc.search("a").count(), 1);
		assert_eq!(doc.search(&b"ab"[..]).count(), 1);
	}

	#[test]
	fn search_is_exhausted_after_end() {
		let doc = parse(b"<a/>").unwrap();
		let mut it = doc.search("a");
		assert!(it.next().is_some());
		assert!(it.next().is_none());
		assert!(it.next().is_none());
	}

	#[test]
	fn independent_searches_over_same_node() {
		let doc = parse(b"<a/><b/><a/>").unwrap();
		let mut first = doc.search("a");
		let mut second = doc.search("a");
		first.next();
		assert!(second.next().is_some());
		assert!(second.next().is_some());
		assert!(first.next().is_some());
		assert!(first.next().is_none());
	}

	#[test]
	fn concurrent_searches_from_threads() {
		let input = b"<r><a/><a/><b/></r>".to_vec();
		let doc = parse(&input).unwrap();
		let root = &doc.children()[0];
		std::thread::scope(|s| {
			let handles: Vec<_> = (0..4).map(|_| s.spawn(|| root.search("a").count())).collect();
			for h in handles {
				assert_eq!(h.join().unwrap(), 2);
			}
		});
	}
}
