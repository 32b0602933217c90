use crate::lexing::{Token, Tokens};
use iref::IriBuf;
use langtag::LangTagBuf;
use locspan::{Meta, Span};
use std::fmt;

#[derive(Debug)]
pub enum Error<E> {
	Lexer(E),
	Unexpected(Option<Token>),
}

pub type BoxedError<E> = Box<Meta<Error<E>, Span>>;

impl<E> Error<E> {
	fn from_lexer(Meta(e, span): Meta<E, Span>) -> BoxedError<E> {
		Box::new(Meta(Self::Lexer(e), span))
	}

	fn unexpected(Meta(token, span): Meta<Option<Token>, Span>) -> BoxedError<E> {
		Box::new(Meta(Self::Unexpected(token), span))
	}
}

impl<E: fmt::Display> fmt::Display for Error<E> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Unexpected(None) => write!(f, "unexpected end of line"),
			Self::Unexpected(Some(token)) => write!(f, "unexpected {}", token),
			Self::Lexer(e) => write!(f, "{e}"),
		}
	}
}

impl<E: 'static + std::error::Error> std::error::Error for Error<E> {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Lexer(e) => Some(e),
			_ => None,
		}
	}
}

pub trait Parse: Sized {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>>;
}

/// Subject.
#[derive(Clone, Debug)]
pub enum Subject {
	Iri(IriBuf),
	Blank(String),
}

/// Literal.
#[derive(Clone, Debug)]
pub enum Literal {
	String(String),
	LangString(String, LangTagBuf),
	TypedString(String, IriBuf),
}

/// Object.
#[derive(Clone, Debug)]
pub enum Object {
	Iri(IriBuf),
	Blank(String),
	Literal(Literal),
}

/// Graph label, only found in N-Quads statements.
#[derive(Clone, Debug)]
pub enum GraphLabel {
	Iri(IriBuf),
	Blank(String),
}

/// One statement line.
#[derive(Clone, Debug)]
pub struct Line {
	pub subject: Subject,
	pub predicate: IriBuf,
	pub object: Object,
	pub graph: Option<GraphLabel>,
}

impl Parse for IriBuf {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>> {
		match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::Iri(iri)), span) => Ok(Meta(iri, span)),
			unexpected => Err(Error::unexpected(unexpected)),
		}
	}
}

impl Parse for Subject {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>> {
		match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::Iri(iri)), span) => Ok(Meta(Self::Iri(iri), span)),
			Meta(Some(Token::BlankNodeLabel(label)), span) => Ok(Meta(Self::Blank(label), span)),
			unexpected => Err(Error::unexpected(unexpected)),
		}
	}
}

fn parse_literal<L: Tokens>(
	lexer: &mut L,
	string: String,
	mut span: Span,
) -> Result<Meta<Literal, Span>, BoxedError<L::Error>> {
	match lexer.peek().map_err(Error::from_lexer)? {
		Meta(Some(Token::LangTag(_)), _) => match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::LangTag(tag)), tag_span) => {
				span.append(tag_span);
				Ok(Meta(Literal::LangString(string, tag), span))
			}
			unexpected => Err(Error::unexpected(unexpected)),
		},
		Meta(Some(Token::Carets), _) => {
			lexer.next().map_err(Error::from_lexer)?;
			match lexer.next().map_err(Error::from_lexer)? {
				Meta(Some(Token::Iri(iri)), iri_span) => {
					span.append(iri_span);
					Ok(Meta(Literal::TypedString(string, iri), span))
				}
				unexpected => Err(Error::unexpected(unexpected)),
			}
		}
		_ => Ok(Meta(Literal::String(string), span)),
	}
}

impl Parse for Object {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>> {
		match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::Iri(iri)), span) => Ok(Meta(Self::Iri(iri), span)),
			Meta(Some(Token::BlankNodeLabel(label)), span) => Ok(Meta(Self::Blank(label), span)),
			Meta(Some(Token::StringLiteral(string)), span) => {
				let Meta(lit, span) = parse_literal(lexer, string, span)?;
				Ok(Meta(Self::Literal(lit), span))
			}
			unexpected => Err(Error::unexpected(unexpected)),
		}
	}
}

impl Parse for Line {
	/// Parses `subject predicate object [graph] .` and requires the line to
	/// end there.
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>> {
		let Meta(subject, mut span) = Subject::parse(lexer)?;
		let Meta(predicate, _) = IriBuf::parse(lexer)?;
		let Meta(object, _) = Object::parse(lexer)?;

		let graph = match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::Dot), dot_span) => {
				span.append(dot_span);
				None
			}
			Meta(Some(Token::Iri(iri)), _) => Some(GraphLabel::Iri(iri)),
			Meta(Some(Token::BlankNodeLabel(label)), _) => Some(GraphLabel::Blank(label)),
			unexpected => return Err(Error::unexpected(unexpected)),
		};

		if graph.is_some() {
			match lexer.next().map_err(Error::from_lexer)? {
				Meta(Some(Token::Dot), dot_span) => span.append(dot_span),
				unexpected => return Err(Error::unexpected(unexpected)),
			}
		}

		match lexer.next().map_err(Error::from_lexer)? {
			Meta(None, _) => Ok(Meta(
				Self {
					subject,
					predicate,
					object,
					graph,
				},
				span,
			)),
			unexpected => Err(Error::unexpected(unexpected)),
		}
	}
}

/// Parses a line that may also hold nothing but white spaces and a comment.
#[allow(clippy::type_complexity)]
pub fn parse_line<L: Tokens>(
	lexer: &mut L,
) -> Result<Option<Meta<Line, Span>>, BoxedError<L::Error>> {
	match lexer.peek().map_err(Error::from_lexer)? {
		Meta(None, _) => Ok(None),
		Meta(Some(_), _) => Line::parse(lexer).map(Some),
	}
}

impl fmt::Display for Subject {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "{iri}"),
			Self::Blank(label) => f.write_str(label),
		}
	}
}

impl fmt::Display for GraphLabel {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "{iri}"),
			Self::Blank(label) => f.write_str(label),
		}
	}
}

/// Renders the stored object form: bare IRIs and datatypes, unescaped
/// literal values.
impl fmt::Display for Object {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "{iri}"),
			Self::Blank(label) => f.write_str(label),
			Self::Literal(Literal::String(s)) => write!(f, "\"{s}\""),
			Self::Literal(Literal::LangString(s, tag)) => write!(f, "\"{s}\"@{tag}"),
			Self::Literal(Literal::TypedString(s, iri)) => write!(f, "\"{s}\"^^{iri}"),
		}
	}
}
