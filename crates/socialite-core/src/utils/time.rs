//! Provider timestamp parsing

use chrono::{DateTime, Timelike, Utc};

use crate::error::{ErrorKind, ProviderError, ProviderResult};

/// UTC offsets for zone abbreviations providers emit in place of offsets.
const TIMEZONE_OFFSETS: &[(&str, &str)] = &[
	("GMT", "+0000"),
	("UTC", "+0000"),
	("EST", "-0500"),
	("EDT", "-0400"),
	("CST", "-0600"),
	("CDT", "-0500"),
	("MST", "-0700"),
	("MDT", "-0600"),
	("PST", "-0800"),
	("PDT", "-0700"),
	("AKST", "-0800"),
	("AKDT", "-0800"),
	("CHST", "+1000"),
	("HST", "-1000"),
	("AST", "-0400"),
	("SST", "-1100"),
];

/// Offset for a zone abbreviation, e.g. `"PDT"` -> `"-0700"`.
pub fn timezone_offset(abbreviation: &str) -> Option<&'static str> {
	TIMEZONE_OFFSETS
		.iter()
		.find(|(name, _)| *name == abbreviation)
		.map(|(_, offset)| *offset)
}

/// Parses `text` with a chrono `layout` and converts it to UTC, truncated to
/// the second.
///
/// The layout must carry a zone: `%z` for numeric offsets, or `%Z` for one of
/// the known abbreviations.
pub fn parse_utc(text: &str, layout: &str) -> ProviderResult<DateTime<Utc>> {
	let (text, layout) = if layout.contains("%Z") {
		let text = text
			.split(' ')
			.map(|token| timezone_offset(token).unwrap_or(token))
			.collect::<Vec<_>>()
			.join(" ");
		(text, layout.replace("%Z", "%z"))
	} else {
		(text.to_string(), layout.to_string())
	};

	let parsed = DateTime::parse_from_str(&text, &layout).map_err(|err| {
		ProviderError::new(ErrorKind::InvalidContent)
			.caused_by_msg(format!("Error parsing time string {:?}: {}", text, err))
	})?;
	let utc = parsed.with_timezone(&Utc);
	Ok(utc.with_nanosecond(0).unwrap_or(utc))
}

/// [`parse_utc`] for optional fields: empty or malformed input yields `None`.
pub fn parse_utc_opt(text: &str, layout: &str) -> Option<DateTime<Utc>> {
	if text.is_empty() {
		return None;
	}
	parse_utc(text, layout).ok()
}
