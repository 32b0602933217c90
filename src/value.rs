//! Native values of object terms.
use crate::{
	datetime::DateTime,
	term::{Literal, Term},
};
use std::fmt;

/// XML Schema datatypes namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Datatypes with a native value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
	String,
	AnyUri,
	Time,
	Integer,
	NonPositiveInteger,
	NegativeInteger,
	NonNegativeInteger,
	PositiveInteger,
	Float,
	Boolean,
	DateTime,
	Date,
}

impl Datatype {
	pub const ALL: [Self; 12] = [
		Self::String,
		Self::AnyUri,
		Self::Time,
		Self::Integer,
		Self::NonPositiveInteger,
		Self::NegativeInteger,
		Self::NonNegativeInteger,
		Self::PositiveInteger,
		Self::Float,
		Self::Boolean,
		Self::DateTime,
		Self::Date,
	];

	/// Local name in the XML Schema namespace.
	pub fn local_name(&self) -> &'static str {
		match self {
			Self::String => "string",
			Self::AnyUri => "anyURI",
			Self::Time => "time",
			Self::Integer => "integer",
			Self::NonPositiveInteger => "nonPositiveInteger",
			Self::NegativeInteger => "negativeInteger",
			Self::NonNegativeInteger => "nonNegativeInteger",
			Self::PositiveInteger => "positiveInteger",
			Self::Float => "float",
			Self::Boolean => "boolean",
			Self::DateTime => "dateTime",
			Self::Date => "date",
		}
	}

	pub fn iri(&self) -> String {
		format!("{XSD}{}", self.local_name())
	}

	/// Recognizes a full datatype IRI, case-sensitively.
	pub fn from_iri(iri: &str) -> Option<Self> {
		let local_name = iri.strip_prefix(XSD)?;
		Self::ALL
			.into_iter()
			.find(|datatype| datatype.local_name() == local_name)
	}
}

/// Native value of an object.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Plain literal, string-like datatype or unknown datatype.
	String(String),
	/// IRI object, verbatim.
	Iri(String),
	/// Blank node object, verbatim (`_:` included).
	Blank(String),
	Integer(i64),
	Float(f64),
	Boolean(bool),
	DateTime(DateTime),
	/// Lexical form a numeric or temporal datatype could not make sense of,
	/// or an object with broken literal syntax.
	Unparsed(String),
}

impl Value {
	/// Normalizes a stored object string.
	///
	/// Never fails: values that do not parse become [`Value::Unparsed`].
	pub fn from_object(object: &str) -> Self {
		match Term::classify(object) {
			Ok(Term::Literal(lit)) => Self::from_literal(&lit),
			Ok(Term::Iri(iri)) => Self::Iri(iri.to_owned()),
			Ok(Term::Blank(id)) => Self::Blank(id.to_owned()),
			Err(_) => Self::Unparsed(object.to_owned()),
		}
	}

	pub fn from_literal(lit: &Literal) -> Self {
		let value = lit.value;
		match lit.datatype.and_then(Datatype::from_iri) {
			Some(Datatype::String | Datatype::AnyUri | Datatype::Time) => {
				Self::String(value.to_owned())
			}
			Some(
				Datatype::Integer
				| Datatype::NonPositiveInteger
				| Datatype::NegativeInteger
				| Datatype::NonNegativeInteger
				| Datatype::PositiveInteger,
			) => parse_integer(value).map_or_else(|| Self::unparsed(value), Self::Integer),
			Some(Datatype::Float) => parse_float(value).map_or_else(|| Self::unparsed(value), Self::Float),
			Some(Datatype::Boolean) => Self::Boolean(parse_boolean(value)),
			Some(Datatype::DateTime | Datatype::Date) => {
				DateTime::parse(value).map_or_else(|| Self::unparsed(value), Self::DateTime)
			}
			// Plain literals, language strings and datatypes without a native
			// mapping keep their lexical value.
			None => Self::String(value.to_owned()),
		}
	}

	fn unparsed(value: &str) -> Self {
		Self::Unparsed(value.to_owned())
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) | Self::Iri(s) | Self::Blank(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Self::Integer(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(f) => Some(*f),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_date_time(&self) -> Option<&DateTime> {
		match self {
			Self::DateTime(dt) => Some(dt),
			_ => None,
		}
	}

	pub fn is_unparsed(&self) -> bool {
		matches!(self, Self::Unparsed(_))
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::String(s) | Self::Iri(s) | Self::Blank(s) | Self::Unparsed(s) => f.write_str(s),
			Self::Integer(i) => write!(f, "{i}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Boolean(b) => write!(f, "{b}"),
			Self::DateTime(dt) => write!(f, "{dt}"),
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::String(s.to_owned())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::String(s)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Self::Integer(i)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Self::Float(v)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Boolean(b)
	}
}

/// Normalizes an optional object, substituting `default` when it is absent.
pub fn normalize(object: Option<&str>, default: Option<Value>) -> Option<Value> {
	match object {
		Some(object) => Some(Value::from_object(object)),
		None => default,
	}
}

/// Reads a leading integer, ignoring what follows it: `"12px"` is 12.
///
/// A leading `0x` selects hexadecimal.
fn parse_integer(s: &str) -> Option<i64> {
	let s = s.trim_start();
	let (negative, unsigned) = match s.as_bytes().first() {
		Some(b'-') => (true, &s[1..]),
		Some(b'+') => (false, &s[1..]),
		_ => (false, s),
	};

	let (radix, digits) = match unsigned
		.strip_prefix("0x")
		.or_else(|| unsigned.strip_prefix("0X"))
	{
		Some(hex) => (16, hex),
		None => (10, unsigned),
	};

	let end = digits
		.find(|c: char| !c.is_digit(radix))
		.unwrap_or(digits.len());
	if end == 0 {
		return None;
	}

	let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
	Some(if negative { -magnitude } else { magnitude })
}

/// Reads a leading floating point number, ignoring what follows it.
///
/// Also accepts the XML Schema special values `INF`, `-INF` and `NaN`.
fn parse_float(s: &str) -> Option<f64> {
	let s = s.trim_start();
	match s.trim_end() {
		"INF" | "+INF" => return Some(f64::INFINITY),
		"-INF" => return Some(f64::NEG_INFINITY),
		"NaN" => return Some(f64::NAN),
		_ => (),
	}

	let bytes = s.as_bytes();
	let mut end = 0;
	if matches!(bytes.first(), Some(b'-' | b'+')) {
		end += 1;
	}

	let int_digits = count_digits(&bytes[end..]);
	end += int_digits;
	let mut frac_digits = 0;
	if bytes.get(end) == Some(&b'.') {
		frac_digits = count_digits(&bytes[end + 1..]);
		end += 1 + frac_digits;
	}

	if int_digits + frac_digits == 0 {
		return None;
	}

	if matches!(bytes.get(end), Some(b'e' | b'E')) {
		let mut exp_end = end + 1;
		if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
			exp_end += 1;
		}

		let exp_digits = count_digits(&bytes[exp_end..]);
		if exp_digits > 0 {
			end = exp_end + exp_digits;
		}
	}

	s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
	bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// `true` and `1`, in any case, are true. Anything else is false.
fn parse_boolean(s: &str) -> bool {
	s.eq_ignore_ascii_case("true") || s == "1"
}

/// Object viewed together with its literal annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticValue<'a> {
	/// Stored object string.
	pub value: &'a str,
	pub literal_value: Value,
	pub literal_type: Option<&'a str>,
	pub literal_language: Option<&'a str>,
}

impl<'a> SemanticValue<'a> {
	/// Checks the language tag, the empty tag standing for "no language".
	pub fn has_language(&self, language: &str) -> bool {
		self.literal_language.unwrap_or("") == language
	}
}

pub fn as_semantic_value(object: &str) -> SemanticValue {
	let literal = Term::classify(object)
		.ok()
		.and_then(|term| term.as_literal().copied());

	SemanticValue {
		value: object,
		literal_value: Value::from_object(object),
		literal_type: literal.and_then(|lit| lit.datatype),
		literal_language: literal.and_then(|lit| lit.language),
	}
}

pub fn as_semantic_values<'a, I>(objects: I) -> Vec<SemanticValue<'a>>
where
	I: IntoIterator<Item = &'a str>,
{
	objects.into_iter().map(as_semantic_value).collect()
}
