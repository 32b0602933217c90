//! N-Triples documents.
use crate::{
	lexing::{self, decoded_chars, Lexer},
	parsing::{self, parse_line, BoxedError},
	term::{encode_iri, encode_object, encode_resource, InvalidLiteral},
	Statement, Triple,
};
use locspan::{Meta, Span};
use std::{fmt, str::FromStr};

/// Line that could not be parsed.
#[derive(Debug)]
pub struct ParseError {
	line: usize,
	text: String,
	error: BoxedError<lexing::Error>,
}

impl ParseError {
	/// 1-based line number.
	pub fn line(&self) -> usize {
		self.line
	}

	/// Offending line.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Position of the error, in bytes from the start of the document.
	pub fn span(&self) -> Span {
		self.error.1
	}

	pub fn error(&self) -> &parsing::Error<lexing::Error> {
		&self.error.0
	}
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "line {}: {}", self.line, self.error.0)
	}
}

impl std::error::Error for ParseError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		Some(&self.error.0)
	}
}

/// Reads the triples of an N-Triples document, in order.
///
/// Only lines containing a `<` are read; others are taken for blank lines or
/// comments. A graph label ending a line is accepted and dropped. The first
/// line that does not parse fails the whole document.
pub fn decode(text: &str) -> Result<Vec<Triple>, ParseError> {
	let mut triples = Vec::new();
	let mut offset = 0;

	for (i, raw) in text.split('\n').enumerate() {
		let start = offset;
		offset += raw.len() + 1;

		let line = raw.strip_suffix('\r').unwrap_or(raw);
		if !line.contains('<') {
			continue;
		}

		let mut lexer = Lexer::at(decoded_chars(line), start);
		match parse_line(&mut lexer) {
			Ok(Some(Meta(statement, _))) => triples.push(statement.into()),
			Ok(None) => log::trace!("line {} holds no statement", i + 1),
			Err(error) => {
				return Err(ParseError {
					line: i + 1,
					text: line.to_owned(),
					error,
				})
			}
		}
	}

	log::debug!("decoded {} triples", triples.len());
	Ok(triples)
}

/// Renders one statement as `<subject> <predicate> object.`
pub fn encode_statement<S: Statement + ?Sized>(statement: &S) -> Result<String, InvalidLiteral> {
	Ok(format!(
		"{} {} {}.",
		encode_resource(statement.subject()),
		encode_iri(statement.predicate()),
		encode_object(statement.object())?
	))
}

/// Renders statements one per line, without a final line break.
///
/// Stops at the first object that is not a valid term.
pub fn encode<S: Statement>(statements: &[S]) -> Result<String, InvalidLiteral> {
	let lines = statements
		.iter()
		.map(encode_statement)
		.collect::<Result<Vec<_>, _>>()?;

	log::debug!("encoded {} triples", lines.len());
	Ok(lines.join("\n"))
}

/// N-Triples document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
	pub triples: Vec<Triple>,
}

impl Document {
	pub fn iter(&self) -> std::slice::Iter<Triple> {
		self.triples.iter()
	}

	pub fn len(&self) -> usize {
		self.triples.len()
	}

	pub fn is_empty(&self) -> bool {
		self.triples.is_empty()
	}

	pub fn encode(&self) -> Result<String, InvalidLiteral> {
		encode(&self.triples)
	}
}

impl FromStr for Document {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		decode(s).map(|triples| Self { triples })
	}
}

impl From<Vec<Triple>> for Document {
	fn from(triples: Vec<Triple>) -> Self {
		Self { triples }
	}
}

impl<'a> IntoIterator for &'a Document {
	type Item = &'a Triple;
	type IntoIter = std::slice::Iter<'a, Triple>;

	fn into_iter(self) -> Self::IntoIter {
		self.triples.iter()
	}
}

impl IntoIterator for Document {
	type Item = Triple;
	type IntoIter = std::vec::IntoIter<Triple>;

	fn into_iter(self) -> Self::IntoIter {
		self.triples.into_iter()
	}
}
