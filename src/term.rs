//! Object terms in their stored lexical form.
//!
//! A decoded triple keeps its object as a single string:
//!
//! - an IRI is stored bare (`http://example.org/`),
//! - a blank node keeps its `_:` prefix (`_:b0`),
//! - a literal is stored as `"<value>"` with its unescaped value, followed by
//!   `@<language>` or `^^<datatype IRI>` (the datatype IRI is stored bare).
//!
//! This module classifies such strings and renders them back to N-Triples
//! syntax.
use std::{borrow::Cow, fmt};

/// Object string that is neither an IRI, a blank node nor a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLiteral(pub String);

impl fmt::Display for InvalidLiteral {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "invalid literal `{}`", self.0)
	}
}

impl std::error::Error for InvalidLiteral {}

/// Malformed escape sequence, at the given byte index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidEscape(pub usize);

impl fmt::Display for InvalidEscape {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "invalid escape sequence at byte {}", self.0)
	}
}

impl std::error::Error for InvalidEscape {}

/// Classified object term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term<'a> {
	Iri(&'a str),
	Blank(&'a str),
	Literal(Literal<'a>),
}

impl<'a> Term<'a> {
	/// Classifies a stored object string.
	pub fn classify(object: &'a str) -> Result<Self, InvalidLiteral> {
		if object.starts_with('"') {
			Literal::parse(object).map(Self::Literal)
		} else if object.starts_with("_:") {
			Ok(Self::Blank(object))
		} else {
			Ok(Self::Iri(object))
		}
	}

	pub fn is_literal(&self) -> bool {
		matches!(self, Self::Literal(_))
	}

	pub fn as_literal(&self) -> Option<&Literal<'a>> {
		match self {
			Self::Literal(lit) => Some(lit),
			_ => None,
		}
	}
}

/// Literal decomposed into its value and its optional annotation.
///
/// A literal has at most one of `datatype` and `language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'a> {
	pub value: &'a str,
	pub datatype: Option<&'a str>,
	pub language: Option<&'a str>,
}

impl<'a> Literal<'a> {
	/// Parses `"<value>"` optionally followed by `^^<datatype>` or `@<language>`.
	///
	/// The value extends to the last quote after which a valid annotation (or
	/// nothing) follows, so values may contain unescaped quotes.
	pub fn parse(object: &'a str) -> Result<Self, InvalidLiteral> {
		let invalid = || InvalidLiteral(object.to_owned());
		let body = object.strip_prefix('"').ok_or_else(invalid)?;

		for (i, _) in body.rmatch_indices('"') {
			let value = &body[..i];
			let suffix = &body[i + 1..];

			if suffix.is_empty() {
				return Ok(Self {
					value,
					datatype: None,
					language: None,
				});
			}

			if let Some(datatype) = suffix.strip_prefix("^^") {
				if !datatype.is_empty() && !datatype.contains(['\n', '\r']) {
					return Ok(Self {
						value,
						datatype: Some(datatype),
						language: None,
					});
				}
			}

			if let Some(language) = suffix.strip_prefix('@') {
				if is_language(language) {
					return Ok(Self {
						value,
						datatype: None,
						language: Some(language),
					});
				}
			}
		}

		Err(invalid())
	}
}

/// `[a-zA-Z]+ ('-' [a-zA-Z0-9]+)*`, the language tags the lexer reads.
fn is_language(tag: &str) -> bool {
	let mut subtags = tag.split('-');
	let primary = subtags.next().unwrap_or_default();
	!primary.is_empty()
		&& primary.chars().all(|c| c.is_ascii_alphabetic())
		&& subtags.all(|subtag| !subtag.is_empty() && subtag.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Returns the character denoted by a single-character escape `\c`.
pub(crate) fn unescape_char(c: char) -> Option<char> {
	match c {
		't' => Some('\t'),
		'b' => Some('\u{08}'),
		'n' => Some('\n'),
		'r' => Some('\r'),
		'f' => Some('\u{0c}'),
		'"' => Some('"'),
		'\'' => Some('\''),
		'\\' => Some('\\'),
		_ => None,
	}
}

fn needs_escape(c: char) -> bool {
	matches!(c, '"' | '\\' | '\u{00}'..='\u{19}') || c > '\u{ffff}'
}

/// Escapes the characters N-Triples does not allow verbatim.
///
/// Control characters without a short form are written `\uXXXX`, characters
/// outside the basic multilingual plane `\UXXXXXXXX`.
pub fn escape(s: &str) -> Cow<str> {
	if !s.chars().any(needs_escape) {
		return Cow::Borrowed(s);
	}

	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'\\' => escaped.push_str("\\\\"),
			'"' => escaped.push_str("\\\""),
			'\t' => escaped.push_str("\\t"),
			'\n' => escaped.push_str("\\n"),
			'\r' => escaped.push_str("\\r"),
			'\u{08}' => escaped.push_str("\\b"),
			'\u{0c}' => escaped.push_str("\\f"),
			c if c > '\u{ffff}' => escaped.push_str(&format!("\\U{:08x}", c as u32)),
			c if needs_escape(c) => escaped.push_str(&format!("\\u{:04x}", c as u32)),
			c => escaped.push(c),
		}
	}

	Cow::Owned(escaped)
}

/// Inverse of [`escape`].
///
/// Also accepts `\'` and upper case hexadecimal digits.
pub fn unescape(s: &str) -> Result<Cow<str>, InvalidEscape> {
	if !s.contains('\\') {
		return Ok(Cow::Borrowed(s));
	}

	let mut unescaped = String::with_capacity(s.len());
	let mut chars = s.char_indices();
	while let Some((i, c)) = chars.next() {
		if c != '\\' {
			unescaped.push(c);
			continue;
		}

		let c = match chars.next() {
			Some((_, 'u')) => unescape_hex(&mut chars, 4).ok_or(InvalidEscape(i))?,
			Some((_, 'U')) => unescape_hex(&mut chars, 8).ok_or(InvalidEscape(i))?,
			Some((_, c)) => unescape_char(c).ok_or(InvalidEscape(i))?,
			None => return Err(InvalidEscape(i)),
		};

		unescaped.push(c)
	}

	Ok(Cow::Owned(unescaped))
}

fn unescape_hex(chars: &mut std::str::CharIndices, len: usize) -> Option<char> {
	let mut codepoint = 0;
	for _ in 0..len {
		let (_, c) = chars.next()?;
		codepoint = codepoint << 4 | c.to_digit(16)?;
	}

	char::from_u32(codepoint)
}

/// Renders `<iri>`.
pub fn encode_iri(iri: &str) -> String {
	format!("<{}>", escape(iri))
}

/// Renders a subject or non-literal object: blank nodes verbatim, IRIs
/// between angle brackets.
pub fn encode_resource(resource: &str) -> String {
	if resource.starts_with("_:") {
		resource.to_owned()
	} else {
		encode_iri(resource)
	}
}

/// Renders a literal. The language tag wins over the datatype.
pub fn encode_literal(value: &str, datatype: Option<&str>, language: Option<&str>) -> String {
	let value = escape(value);
	match (language, datatype) {
		(Some(language), _) => format!("\"{value}\"@{language}"),
		(None, Some(datatype)) => format!("\"{value}\"^^{}", encode_iri(datatype)),
		(None, None) => format!("\"{value}\""),
	}
}

/// Renders a stored object string in N-Triples syntax.
pub fn encode_object(object: &str) -> Result<String, InvalidLiteral> {
	match Term::classify(object)? {
		Term::Literal(lit) => Ok(encode_literal(lit.value, lit.datatype, lit.language)),
		Term::Iri(iri) => Ok(encode_iri(iri)),
		Term::Blank(id) => Ok(id.to_owned()),
	}
}
