#[macro_use]
extern crate afl;
extern crate bxml;

fn main() {
	fuzz!(|data: &[u8]| {
		let doc = match bxml::parse(data) {
			Ok(doc) => doc,
			Err(_) => return,
		};

		// anything we render must be accepted again
		let mut out = Vec::new();
		doc.render(&mut out);
		if let Err(e) = bxml::parse(&out) {
			panic!(
				"rendered tree failed to parse: {} ({:?})",
				e,
				String::from_utf8_lossy(&out)
			);
		}
	});
}
