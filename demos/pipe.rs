use std::io;
use std::io::{Read, Write};

use bytes::BytesMut;

fn main() {
	let mut input = Vec::new();
	io::stdin()
		.read_to_end(&mut input)
		.expect("failed to read stdin");
	let doc = match bxml::parse(&input) {
		Ok(doc) => doc,
		Err(e) => panic!("invalid XML on input: {}", e),
	};
	let mut buf = BytesMut::with_capacity(input.len());
	doc.render_into_bytes(&mut buf);
	io::stdout()
		.write_all(&buf[..])
		.expect("failed to write to stdout");
}
