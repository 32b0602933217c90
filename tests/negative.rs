use codespan_reporting::{
	diagnostic::{Diagnostic, Label},
	files::SimpleFile,
	term::{self, termcolor::NoColor},
};
use ntriples_collection::{parsing, ParseError};
use std::path::Path;

struct Failure {
	error: ParseError,
	report: String,
}

fn parse<P: AsRef<Path>>(path: P) -> Failure {
	stderrlog::new().init().ok();
	let path = path.as_ref();
	let buffer = match std::fs::read_to_string(path) {
		Ok(buffer) => buffer,
		Err(e) => {
			log::error!("unable to read file `{}`: {}", path.display(), e);
			panic!("IO error: {e:?}")
		}
	};

	match ntriples_collection::decode(&buffer) {
		Ok(triples) => panic!("unexpected success: {triples:?}"),
		Err(error) => {
			let file = SimpleFile::new(path.display().to_string(), buffer.as_str());
			let diagnostic = Diagnostic::error()
				.with_message(format!("parse error: {}", error.error()))
				.with_labels(vec![Label::primary((), error.span())]);

			let mut writer = NoColor::new(Vec::new());
			let config = term::Config::default();
			term::emit(&mut writer, &config, &file, &diagnostic).expect("diagnostic");
			let report = String::from_utf8(writer.into_inner()).expect("utf-8 report");
			log::error!("{report}");

			Failure { error, report }
		}
	}
}

#[test]
fn n01() {
	let failure = parse("tests/negative/01.nt");
	assert_eq!(failure.error.line(), 2);
	assert!(matches!(
		failure.error.error(),
		parsing::Error::Lexer(ntriples_collection::lexing::Error::Unexpected(None))
	));
	assert!(failure.report.contains("tests/negative/01.nt:2:"));
}

#[test]
fn n02() {
	let failure = parse("tests/negative/02.nt");
	assert_eq!(failure.error.line(), 1);
	assert_eq!(failure.error.to_string(), "line 1: unexpected string literal \"literal\"");
	assert_eq!(failure.error.span().start(), 0);
	assert_eq!(failure.error.span().end(), 9);
}

#[test]
fn n03() {
	let failure = parse("tests/negative/03.nt");
	assert_eq!(failure.error.line(), 2);
	assert_eq!(
		failure.error.text(),
		"<http://example.org/s> <http://example.org/p> \"bad tag\"@1en ."
	);
	assert!(failure.report.contains("unexpected character `1`"));
	assert!(failure.report.contains("tests/negative/03.nt:2:57"));
}

#[test]
fn n04() {
	let failure = parse("tests/negative/04.nt");
	assert!(matches!(
		failure.error.error(),
		parsing::Error::Unexpected(Some(_))
	));
}
