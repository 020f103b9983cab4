//! Field parsers for raw listing text
//!
//! Each parser is pure and fails on its own with a [`ParseError`] carrying
//! the offending text, so one bad field never stops the rest of a row.

use crate::ParseError;
use chrono::{NaiveDateTime, Weekday};
use regex::Regex;
use std::sync::OnceLock;

/// Layout of listing times once the weekday and ordinal suffix are gone, e.g. `2 Jan, 2024, 7:30pm`
pub const TIME_FORMAT: &str = "%d %b, %Y, %I:%M%p";

fn price_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+\.[0-9]+").ok()).as_ref()
}

fn ordinal_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(.*[0-9]{1,2})(st|nd|rd|th)( .*)$").ok())
        .as_ref()
}

/// Parses the first `digits.digits` amount found in the text
///
/// # Example
///
/// ```
/// use gig_crawler::crawler::parse_price;
///
/// assert_eq!(parse_price("£12.50 + £1.25 booking fee"), Ok(12.5));
/// assert!(parse_price("Free").is_err());
/// ```
pub fn parse_price(raw: &str) -> Result<f64, ParseError> {
    price_pattern()
        .and_then(|pattern| pattern.find(raw))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(|| ParseError::Price {
            raw: raw.to_string(),
        })
}

/// Parses a listing time such as `Tue 2nd Jan, 2024, 7:30pm`
///
/// The leading weekday must be a weekday name but is not checked against
/// the date. The ordinal suffix after the day of month is removed before
/// matching the rest against [`TIME_FORMAT`].
///
/// # Example
///
/// ```
/// use gig_crawler::crawler::parse_time;
///
/// let time = parse_time("Mon 2nd Jan, 2024, 7:30pm").unwrap();
/// assert_eq!(time.to_string(), "2024-01-02 19:30:00");
/// ```
pub fn parse_time(raw: &str) -> Result<NaiveDateTime, ParseError> {
    let error = || ParseError::Time {
        raw: raw.to_string(),
    };

    let (weekday, rest) = raw.trim().split_once(char::is_whitespace).ok_or_else(error)?;
    weekday.parse::<Weekday>().map_err(|_| error())?;

    let rest = rest.trim_start();
    let cleaned = match ordinal_pattern() {
        Some(pattern) => pattern.replace(rest, "${1}${3}"),
        None => rest.into(),
    };

    NaiveDateTime::parse_from_str(&cleaned, TIME_FORMAT).map_err(|_| error())
}

/// Derives the event id from its detail link
///
/// The link must be `base` followed by decimal digits only.
pub fn parse_id(link: &str, base: &str) -> Result<i64, ParseError> {
    let link = link.trim();
    let rest = link.strip_prefix(base).unwrap_or(link);

    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::Id {
            raw: link.to_string(),
        });
    }

    rest.parse::<i64>().map_err(|_| ParseError::Id {
        raw: link.to_string(),
    })
}
