use ntriples_collection::{read_ntriples_file, write_ntriples_file, Error, Quad, Triple};
use std::path::PathBuf;

const DC_PUBLISHER: &str = "http://purl.org/dc/elements/1.1/publisher";
const DC_CREATOR: &str = "http://purl.org/dc/elements/1.1/creator";

fn tmp_path(name: &str) -> PathBuf {
	let dir = std::env::temp_dir().join("ntriples-collection-tests");
	std::fs::create_dir_all(&dir).expect("temporary directory");
	dir.join(format!("{}-{name}", std::process::id()))
}

#[test]
fn reads_ntriples_file() {
	stderrlog::new().init().ok();
	let triples = read_ntriples_file("tests/fixtures/reference.nt").expect("readable fixture");

	let expected = [
		Triple::new("http://www.site.org/version/123/", DC_PUBLISHER, "\"Publisher Alpha\""),
		Triple::new("http://www.site.org/version/123/", DC_CREATOR, "\"Creator Alpha\""),
		Triple::new("http://www.site.org/version/124/", DC_PUBLISHER, "\"Publisher Beta\""),
		Triple::new("http://www.site.org/version/124/", DC_CREATOR, "\"Creator Beta\""),
		Triple::new("http://www.site.org/version/125/", DC_CREATOR, "\"Dave Beckett\"@fr-be"),
		Triple::new("http://www.site.org/version/125/", DC_CREATOR, "\"Art Barstow\""),
		Triple::new("http://www.site.org/version/125/", DC_PUBLISHER, "http://www.w3.org/"),
	];

	assert_eq!(triples.len(), 7);
	assert_eq!(triples, expected);
}

#[test]
fn missing_file_is_a_file_error() {
	match read_ntriples_file("tests/fixtures/missing.nt") {
		Err(Error::File(e)) => {
			assert_eq!(e.path(), std::path::Path::new("tests/fixtures/missing.nt"));
			assert_eq!(e.io_error().kind(), std::io::ErrorKind::NotFound);
		}
		other => panic!("expected a file error, got {other:?}"),
	}
}

#[test]
fn writes_ntriples_file() {
	stderrlog::new().init().ok();
	let graph = Some("/only-for-quad".to_owned());
	let quads = [
		Quad::new("http://www.site.org/version/123/", DC_PUBLISHER, "\"Publisher Alpha\"", graph.clone()),
		Quad::new("http://www.site.org/version/123/", DC_CREATOR, "\"Creator Alpha\"", graph.clone()),
		Quad::new("http://www.site.org/version/124/", DC_PUBLISHER, "\"Publisher Beta\"", graph.clone()),
		Quad::new("http://www.site.org/version/124/", DC_CREATOR, "\"Creator Beta\"", graph.clone()),
		Quad::new("http://www.site.org/version/125/", DC_CREATOR, "\"Dave Beckett\"", graph.clone()),
		Quad::new("http://www.site.org/version/125/", DC_CREATOR, "\"Art Barstow\"", graph.clone()),
		Quad::new("http://www.site.org/version/125/", DC_PUBLISHER, "http://www.w3.org/", graph),
	];

	let path = tmp_path("write-example.nt");
	let summary = write_ntriples_file(&path, &quads).expect("writable file");
	assert_eq!(summary.count, 7);

	let expected = std::fs::read_to_string("tests/fixtures/write-reference.nt").unwrap();
	let actual = std::fs::read_to_string(&path).unwrap();
	assert_eq!(actual, expected);
	assert!(!actual.contains("only-for-quad"));

	let reread = read_ntriples_file(&path).unwrap();
	let dropped: Vec<Triple> = quads.into_iter().map(Triple::from).collect();
	assert_eq!(reread, dropped);
	std::fs::remove_file(path).ok();
}

#[test]
fn writing_nothing_writes_an_empty_file() {
	let path = tmp_path("empty.nt");
	let summary = write_ntriples_file::<_, Triple>(&path, &[]).unwrap();
	assert_eq!(summary.count, 0);
	assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
	std::fs::remove_file(path).ok();
}

#[test]
fn invalid_literal_aborts_the_write() {
	let path = tmp_path("invalid.nt");
	let triples = [
		Triple::new("http://a.org/s", "http://a.org/p", "\"fine\""),
		Triple::new("http://a.org/s", "http://a.org/p", "\"broken"),
	];

	match write_ntriples_file(&path, &triples) {
		Err(Error::InvalidLiteral(e)) => assert_eq!(e.0, "\"broken"),
		other => panic!("expected an invalid literal, got {other:?}"),
	}
	assert!(!path.exists());
}
