use ntriples_collection::Document;
use std::path::Path;

fn parse<P: AsRef<Path>>(path: P) -> Document {
	stderrlog::new().init().ok();
	match std::fs::read_to_string(&path) {
		Ok(buffer) => match buffer.parse::<Document>() {
			Ok(doc) => doc,
			Err(e) => {
				log::error!("parse error: {e}");
				panic!("parse error: {e:?}")
			}
		},
		Err(e) => {
			log::error!("unable to read file `{}`: {}", path.as_ref().display(), e);
			panic!("IO error: {e:?}")
		}
	}
}

#[test]
fn p01() {
	let doc = parse("tests/positive/01.nt");
	assert_eq!(doc.len(), 6);
	assert_eq!(
		doc.triples[0].object,
		"\"That Seventies Show\"^^http://www.w3.org/2001/XMLSchema#string"
	);
	assert_eq!(
		doc.triples[2].object,
		"\"Cette Série des Années Septante\"@fr-be"
	);
	assert_eq!(
		doc.triples[3].object,
		"\"This is a multi-line\nliteral with many quotes (\"\"\"\"\")\nand two apostrophes ('').\""
	);
}

#[test]
fn p02() {
	let doc = parse("tests/positive/02.nt");
	let triples: Vec<_> = doc.iter().collect();
	assert_eq!(triples.len(), 4);
	assert_eq!(triples[0].subject, "_:alice");
	assert_eq!(triples[0].object, "_:bob");
	assert_eq!(triples[2].object, "\"\u{1f600} é\t\\\"");
	assert_eq!(triples[3].object, "http://example.org/o");
}

#[test]
fn p03() {
	let doc = parse("tests/positive/03.nq");
	assert_eq!(doc.len(), 2);
	assert_eq!(doc.triples[0].object, "http://example.org/green-goblin");
	assert_eq!(doc.triples[1].object, "\"Spiderman\"");
}

#[test]
fn p04() {
	let doc = parse("tests/positive/04.nt");
	let objects: Vec<_> = doc.into_iter().map(|t| t.object).collect();
	assert_eq!(objects, ["\"crlf\"", "\"again\"@en"]);
}
