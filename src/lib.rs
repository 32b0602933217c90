//! Flat collections of RDF triples read from and written to N-Triples text,
//! with typed lookups of objects by predicate.
//!
//! ## Basic usage
//!
//! ```rust
//! use ntriples_collection::{decode, encode, query, Value};
//!
//! let text = r#"
//! # publications
//! <http://www.site.org/version/123/> <http://purl.org/dc/elements/1.1/creator> "Dave Beckett"@fr-be .
//! <http://www.site.org/version/123/> <http://purl.org/dc/elements/1.1/date> "2017-03-01"^^<http://www.w3.org/2001/XMLSchema#date> .
//! "#;
//!
//! let triples = decode(text).unwrap();
//! assert_eq!(triples[0].object, "\"Dave Beckett\"@fr-be");
//!
//! let creator = query::find_localized_object_by_predicate(
//!   &triples,
//!   "http://purl.org/dc/elements/1.1/creator",
//!   "en",
//!   &["fr-be"],
//!   None,
//! );
//! assert_eq!(creator, Some(Value::from("Dave Beckett")));
//!
//! let date = query::find_object_by_predicate(&triples, "http://purl.org/dc/elements/1.1/date", None);
//! assert_eq!(date.unwrap().as_date_time().unwrap().format("%Y/%m").unwrap(), "2017/03");
//!
//! let text = encode(&triples).unwrap();
//! assert_eq!(decode(&text).unwrap(), triples);
//! ```
use std::fmt;

pub mod datetime;
pub mod document;
pub mod fs;
pub mod lexing;
pub mod parsing;
pub mod query;
pub mod term;
pub mod value;

pub use datetime::DateTime;
pub use document::{decode, encode, Document, ParseError};
pub use fs::{read_ntriples_file, write_ntriples_file, FileError, WriteSummary};
pub use term::InvalidLiteral;
pub use value::{as_semantic_value, as_semantic_values, SemanticValue, Value};

/// Anything with a subject, a predicate and an object.
///
/// Encoding and lookups only ever see these three components, so a graph
/// carried by the implementor never reaches them.
pub trait Statement {
	fn subject(&self) -> &str;

	fn predicate(&self) -> &str;

	/// Object in its stored lexical form (see [`term`]).
	fn object(&self) -> &str;
}

impl<'a, S: Statement + ?Sized> Statement for &'a S {
	fn subject(&self) -> &str {
		(**self).subject()
	}

	fn predicate(&self) -> &str {
		(**self).predicate()
	}

	fn object(&self) -> &str {
		(**self).object()
	}
}

/// RDF triple.
///
/// Subject and predicate are bare IRIs (or a `_:` blank node for the
/// subject), the object is stored in its lexical form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triple {
	pub subject: String,
	pub predicate: String,
	pub object: String,
}

impl Triple {
	pub fn new(
		subject: impl Into<String>,
		predicate: impl Into<String>,
		object: impl Into<String>,
	) -> Self {
		Self {
			subject: subject.into(),
			predicate: predicate.into(),
			object: object.into(),
		}
	}
}

impl Statement for Triple {
	fn subject(&self) -> &str {
		&self.subject
	}

	fn predicate(&self) -> &str {
		&self.predicate
	}

	fn object(&self) -> &str {
		&self.object
	}
}

/// Triple with the graph component some inputs carry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quad {
	pub subject: String,
	pub predicate: String,
	pub object: String,
	#[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
	pub graph: Option<String>,
}

impl Quad {
	pub fn new(
		subject: impl Into<String>,
		predicate: impl Into<String>,
		object: impl Into<String>,
		graph: Option<String>,
	) -> Self {
		Self {
			subject: subject.into(),
			predicate: predicate.into(),
			object: object.into(),
			graph,
		}
	}
}

impl Statement for Quad {
	fn subject(&self) -> &str {
		&self.subject
	}

	fn predicate(&self) -> &str {
		&self.predicate
	}

	fn object(&self) -> &str {
		&self.object
	}
}

/// Drops the graph.
impl From<Quad> for Triple {
	fn from(quad: Quad) -> Self {
		Self {
			subject: quad.subject,
			predicate: quad.predicate,
			object: quad.object,
		}
	}
}

impl From<parsing::Line> for Quad {
	fn from(line: parsing::Line) -> Self {
		Self {
			subject: line.subject.to_string(),
			predicate: line.predicate.to_string(),
			object: line.object.to_string(),
			graph: line.graph.map(|g| g.to_string()),
		}
	}
}

impl From<parsing::Line> for Triple {
	fn from(line: parsing::Line) -> Self {
		Quad::from(line).into()
	}
}

/// Error.
#[derive(Debug)]
pub enum Error {
	Parse(ParseError),
	InvalidLiteral(InvalidLiteral),
	File(FileError),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Parse(e) => write!(f, "parse error: {e}"),
			Self::InvalidLiteral(e) => write!(f, "{e}"),
			Self::File(e) => write!(f, "{e}"),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Parse(e) => Some(e),
			Self::InvalidLiteral(e) => Some(e),
			Self::File(e) => Some(e),
		}
	}
}

impl From<ParseError> for Error {
	fn from(e: ParseError) -> Self {
		Self::Parse(e)
	}
}

impl From<InvalidLiteral> for Error {
	fn from(e: InvalidLiteral) -> Self {
		Self::InvalidLiteral(e)
	}
}

impl From<FileError> for Error {
	fn from(e: FileError) -> Self {
		Self::File(e)
	}
}
