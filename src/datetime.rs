//! Date-time values of `xsd:dateTime` and `xsd:date` literals.
//!
//! Only ISO-8601 extended forms are accepted, including reduced precision
//! (`2017`, `2017-03`, `2017-03-01T10`) and a space in place of the `T`
//! separator. Basic (`20170301`), week and ordinal forms are not. Values
//! without an offset are taken to be UTC.
use chrono::{DateTime as ChronoDateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::{
	borrow::Cow,
	fmt::{self, Write},
};

/// Parsed date-time, keeping the lexical form it was read from.
#[derive(Clone, Debug)]
pub struct DateTime {
	value: ChronoDateTime<FixedOffset>,
	/// `None` when the lexical form carries no offset.
	tz_offset: Option<FixedOffset>,
	original: String,
}

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%dT%H:%M",
];

const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f%z",
	"%Y-%m-%dT%H:%M:%S%z",
	"%Y-%m-%dT%H:%M%z",
	"%Y-%m-%dT%H:%M:%S%.f%:z",
	"%Y-%m-%dT%H:%M%:z",
];

impl DateTime {
	/// Parses an ISO-8601 date (`2017-03-01`) or date-time
	/// (`2017-04-01T10:45:54Z`, `2017-04-01T10:45:54.250+02:00`, `2017-04-01T10:45`).
	pub fn parse(s: &str) -> Option<Self> {
		let completed = complete(s);
		let lexical = completed.as_ref();

		if let Ok(dt) = ChronoDateTime::parse_from_rfc3339(lexical) {
			return Some(Self::with_offset(dt, s));
		}

		let zoned = lexical
			.strip_suffix('Z')
			.map(|rest| format!("{rest}+00:00"));
		let zoned = zoned.as_deref().unwrap_or(lexical);
		for fmt in OFFSET_DATE_TIME_FORMATS {
			if let Ok(dt) = ChronoDateTime::parse_from_str(zoned, fmt) {
				return Some(Self::with_offset(dt, s));
			}
		}

		for fmt in NAIVE_DATE_TIME_FORMATS {
			if let Ok(ndt) = NaiveDateTime::parse_from_str(lexical, fmt) {
				return Some(Self::naive(ndt, s));
			}
		}

		let date = NaiveDate::parse_from_str(lexical, "%Y-%m-%d").ok()?;
		Some(Self::naive(date.and_hms_opt(0, 0, 0)?, s))
	}

	fn with_offset(value: ChronoDateTime<FixedOffset>, original: &str) -> Self {
		Self {
			value,
			tz_offset: Some(*value.offset()),
			original: original.to_owned(),
		}
	}

	fn naive(ndt: NaiveDateTime, original: &str) -> Self {
		Self {
			value: Utc.from_utc_datetime(&ndt).into(),
			tz_offset: None,
			original: original.to_owned(),
		}
	}

	/// Date-time in its own offset (UTC when none was given).
	pub fn value(&self) -> ChronoDateTime<FixedOffset> {
		self.value
	}

	/// Normalized UTC instant.
	pub fn instant(&self) -> ChronoDateTime<Utc> {
		self.value.with_timezone(&Utc)
	}

	pub fn tz_offset(&self) -> Option<FixedOffset> {
		self.tz_offset
	}

	/// Lexical form this value was parsed from.
	pub fn as_str(&self) -> &str {
		&self.original
	}

	/// Formats with a `strftime` pattern, e.g. `"%Y/%m"`.
	///
	/// Fails on an invalid pattern.
	pub fn format(&self, pattern: &str) -> Result<String, fmt::Error> {
		let mut formatted = String::new();
		write!(formatted, "{}", self.value.format(pattern))?;
		Ok(formatted)
	}
}

/// Expands reduced ISO-8601 forms to the ones chrono reads: missing month or
/// day become `01`, a lone hour gets `:00` minutes, and a space separator
/// becomes `T`.
fn complete(s: &str) -> Cow<str> {
	match s.find(|c: char| c == 'T' || c == ' ') {
		None => match s.len() {
			4 => Cow::Owned(format!("{s}-01-01")),
			7 => Cow::Owned(format!("{s}-01")),
			_ => Cow::Borrowed(s),
		},
		Some(i) => {
			let (date, time) = (&s[..i], &s[i + 1..]);
			let bytes = time.as_bytes();
			let hour_only = bytes.len() >= 2
				&& bytes[..2].iter().all(u8::is_ascii_digit)
				&& bytes.get(2) != Some(&b':');

			if hour_only {
				Cow::Owned(format!("{date}T{}:00{}", &time[..2], &time[2..]))
			} else if s.as_bytes()[i] == b' ' {
				Cow::Owned(format!("{date}T{time}"))
			} else {
				Cow::Borrowed(s)
			}
		}
	}
}

impl PartialEq for DateTime {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl fmt::Display for DateTime {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.original)
	}
}
