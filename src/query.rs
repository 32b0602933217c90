//! Lookups of objects by predicate.
//!
//! Subjects are ignored: a slice of statements is treated as the description
//! of a single resource. Matches are returned in input order.
use crate::{
	value::{as_semantic_values, Value},
	Statement,
};

fn objects_by_predicate<'a, S: Statement>(
	triples: &'a [S],
	predicate: &'a str,
) -> impl 'a + Iterator<Item = &'a str> {
	triples
		.iter()
		.filter(move |t| t.predicate() == predicate)
		.map(|t| t.object())
}

/// Value of the first object of `predicate`, or `default` if there is none.
pub fn find_object_by_predicate<S: Statement>(
	triples: &[S],
	predicate: &str,
	default: Option<Value>,
) -> Option<Value> {
	match objects_by_predicate(triples, predicate).next() {
		Some(object) => Some(Value::from_object(object)),
		None => default,
	}
}

/// Same as [`find_object_by_predicate`], as a string.
pub fn find_string_by_predicate<S: Statement>(
	triples: &[S],
	predicate: &str,
	default: Option<&str>,
) -> Option<String> {
	find_object_by_predicate(triples, predicate, default.map(Value::from))
		.map(|value| value.to_string())
}

/// Values of every object of `predicate`.
pub fn find_objects_by_predicate<S: Statement>(triples: &[S], predicate: &str) -> Vec<Value> {
	objects_by_predicate(triples, predicate)
		.map(Value::from_object)
		.collect()
}

/// Same as [`find_objects_by_predicate`], as strings.
pub fn find_strings_by_predicate<S: Statement>(triples: &[S], predicate: &str) -> Vec<String> {
	objects_by_predicate(triples, predicate)
		.map(|object| Value::from_object(object).to_string())
		.collect()
}

/// Value of the first object of `predicate` tagged with `language`.
///
/// When no object has that language, the first of `alt_langs` is tried, then
/// the second. Further alternatives are ignored. The empty language matches
/// objects without a language tag. Returns `default` when every tried
/// language fails.
pub fn find_localized_object_by_predicate<S: Statement>(
	triples: &[S],
	predicate: &str,
	language: &str,
	alt_langs: &[&str],
	default: Option<Value>,
) -> Option<Value> {
	let values = as_semantic_values(objects_by_predicate(triples, predicate));
	if values.is_empty() {
		return default;
	}

	let find = |language: &str| {
		values
			.iter()
			.find(|value| value.has_language(language))
			.map(|value| value.literal_value.clone())
	};

	let mut found = find(language);
	for &alt_lang in alt_langs.iter().take(2) {
		if found.is_some() {
			break;
		}

		log::trace!("no <{predicate}> object in `{language}`, trying `{alt_lang}`");
		found = find(alt_lang);
	}

	found.or(default)
}

/// Same as [`find_localized_object_by_predicate`], as a string.
pub fn find_localized_string_by_predicate<S: Statement>(
	triples: &[S],
	predicate: &str,
	language: &str,
	alt_langs: &[&str],
	default: Option<&str>,
) -> Option<String> {
	find_localized_object_by_predicate(
		triples,
		predicate,
		language,
		alt_langs,
		default.map(Value::from),
	)
	.map(|value| value.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Quad, Triple};

	const SUBJECT: &str = "http://www.site.org/subject/123/";

	fn quad(predicate: &str, object: &str, graph: bool) -> Quad {
		Quad::new(
			SUBJECT,
			predicate,
			object,
			graph.then(|| "/only-for-quad".to_owned()),
		)
	}

	fn lookup_fixture() -> Vec<Quad> {
		vec![
			quad("http://w.org/a", "\"A\"", true),
			quad("http://w.org/b", "\"B\"", true),
			quad("http://w.org/c", "\"C\"", false),
			quad("http://w.org/d", "\"D\"@en", true),
			quad("http://w.org/d", "\"D2\"", true),
			quad("http://w.org/e", "\"E\"", false),
			quad("http://w.org/d", "\"D3\"", true),
			quad(
				"http://w.org/g",
				"\"3\"^^http://www.w3.org/2001/XMLSchema#integer",
				false,
			),
			quad(
				"http://w.org/h",
				"\"3.2\"^^http://www.w3.org/2001/XMLSchema#float",
				true,
			),
			quad(
				"http://w.org/i",
				"\"true\"^^http://www.w3.org/2001/XMLSchema#boolean",
				false,
			),
			quad(
				"http://w.org/j",
				"\"2017-04-01T10:45:54Z\"^^http://www.w3.org/2001/XMLSchema#dateTime",
				true,
			),
			quad(
				"http://w.org/k",
				"\"2017-03-01\"^^http://www.w3.org/2001/XMLSchema#date",
				false,
			),
			quad("http://w.org/l", "\"0\"^^http://www.w3.org/2001/XMLSchema#integer", false),
		]
	}

	fn localized_fixture() -> Vec<Triple> {
		vec![
			Triple::new(SUBJECT, "http://w.org/a", "\"A\""),
			Triple::new(SUBJECT, "http://w.org/a", "\"A-en\"@en"),
			Triple::new(SUBJECT, "http://w.org/a", "\"A-fr\"@fr"),
			Triple::new(SUBJECT, "http://w.org/a", "\"A-es\"@es"),
			Triple::new(SUBJECT, "http://w.org/b", "\"B\""),
		]
	}

	#[test]
	fn finds_first_object() {
		let triples = lookup_fixture();
		let find = |p| find_object_by_predicate(&triples, p, None);

		assert_eq!(find("http://w.org/none"), None);
		assert_eq!(
			find_object_by_predicate(&triples, "http://w.org/none", Some(Value::from("NULL"))),
			Some(Value::from("NULL"))
		);
		assert_eq!(find("http://w.org/b"), Some(Value::from("B")));
		assert_eq!(find("http://w.org/c"), Some(Value::from("C")));
		assert_eq!(find("http://w.org/d"), Some(Value::from("D")));
		assert_eq!(find("http://w.org/e"), Some(Value::from("E")));
		assert_eq!(find("http://w.org/g"), Some(Value::Integer(3)));
		assert_eq!(find("http://w.org/h"), Some(Value::Float(3.2)));
		assert_eq!(find("http://w.org/i"), Some(Value::Boolean(true)));

		let j = find("http://w.org/j").unwrap();
		assert_eq!(j.as_date_time().unwrap().format("%Y/%M").unwrap(), "2017/45");
		let k = find("http://w.org/k").unwrap();
		assert_eq!(k.as_date_time().unwrap().format("%Y/%m").unwrap(), "2017/03");
	}

	#[test]
	fn empty_collection_yields_the_default() {
		assert_eq!(find_object_by_predicate::<Triple>(&[], "http://w.org/a", None), None);
		assert_eq!(
			find_object_by_predicate::<Triple>(&[], "http://w.org/a", Some(Value::from("NULL"))),
			Some(Value::from("NULL"))
		);
		assert_eq!(
			find_string_by_predicate::<Triple>(&[], "http://w.org/a", Some("NULL")).as_deref(),
			Some("NULL")
		);
		assert!(find_objects_by_predicate::<Triple>(&[], "http://w.org/a").is_empty());
		assert_eq!(
			find_localized_object_by_predicate::<Triple>(&[], "http://w.org/a", "en", &["fr"], None),
			None
		);
	}

	#[test]
	fn falsy_values_are_not_absent() {
		let triples = lookup_fixture();
		assert_eq!(
			find_object_by_predicate(&triples, "http://w.org/l", Some(Value::from(42_i64))),
			Some(Value::Integer(0))
		);
	}

	#[test]
	fn finds_strings() {
		let triples = lookup_fixture();
		assert_eq!(
			find_string_by_predicate(&triples, "http://w.org/g", None).as_deref(),
			Some("3")
		);
		assert_eq!(
			find_string_by_predicate(&triples, "http://w.org/i", None).as_deref(),
			Some("true")
		);
		assert_eq!(
			find_string_by_predicate(&triples, "http://w.org/j", None).as_deref(),
			Some("2017-04-01T10:45:54Z")
		);
		assert_eq!(find_string_by_predicate(&triples, "http://w.org/none", None), None);
		assert_eq!(
			find_string_by_predicate(&triples, "http://w.org/none", Some("NULL")).as_deref(),
			Some("NULL")
		);
		assert_eq!(
			find_strings_by_predicate(&triples, "http://w.org/d"),
			["D", "D2", "D3"]
		);
	}

	#[test]
	fn finds_all_objects() {
		let triples = localized_fixture();
		assert_eq!(
			find_objects_by_predicate(&triples, "http://w.org/a"),
			[
				Value::from("A"),
				Value::from("A-en"),
				Value::from("A-fr"),
				Value::from("A-es")
			]
		);
		assert!(find_objects_by_predicate(&triples, "http://w.org/z").is_empty());
		assert!(find_strings_by_predicate(&triples, "http://w.org/z").is_empty());
	}

	#[test]
	fn cascades_through_alternate_languages() {
		fn find(lang: &str, langs: &[&str], default: Option<&str>) -> Option<String> {
			let triples = localized_fixture();
			find_localized_string_by_predicate(&triples, "http://w.org/a", lang, langs, default)
		}

		assert_eq!(find("fr", &[], None).as_deref(), Some("A-fr"));
		assert_eq!(find("", &[], None).as_deref(), Some("A"));
		assert_eq!(find("de", &[], None), None);
		assert_eq!(find("de", &[], Some("NULL")).as_deref(), Some("NULL"));
		assert_eq!(find("de", &["en"], None).as_deref(), Some("A-en"));
		assert_eq!(find("de", &["jp", ""], None).as_deref(), Some("A"));
		assert_eq!(find("de", &["jp"], None), None);
		assert_eq!(find("de", &["jp"], Some("NULL")).as_deref(), Some("NULL"));
		assert_eq!(find("de", &["jp", "it"], None), None);
		assert_eq!(find("de", &["jp", "it"], Some("NULL")).as_deref(), Some("NULL"));
	}

	#[test]
	fn primary_language_wins_over_alternates() {
		let triples = localized_fixture();
		assert_eq!(
			find_localized_object_by_predicate(&triples, "http://w.org/a", "es", &["en", "fr"], None),
			Some(Value::from("A-es"))
		);
		assert_eq!(
			find_localized_object_by_predicate(&triples, "http://w.org/a", "de", &["fr", "en"], None),
			Some(Value::from("A-fr"))
		);
	}

	#[test]
	fn ignores_a_third_alternate() {
		let triples = localized_fixture();
		assert_eq!(
			find_localized_object_by_predicate(
				&triples,
				"http://w.org/a",
				"de",
				&["jp", "it", "en"],
				None
			),
			None
		);
	}

	#[test]
	fn missing_predicate_returns_default_before_any_language() {
		let triples = localized_fixture();
		assert_eq!(
			find_localized_object_by_predicate(
				&triples,
				"http://w.org/z",
				"",
				&[],
				Some(Value::from(false))
			),
			Some(Value::Boolean(false))
		);
	}
}
