//! Event record produced by the listing extractor
//!
//! One `Event` is built per listing row, optionally enriched by the detail
//! fetcher and written exactly once to the event sink.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp persisted for an event whose time could not be parsed
pub const ZERO_TIME: &str = "0001-01-01T00:00:00";

/// A single event listed on a search-result page
///
/// Serialized with the capitalized keys of the persisted record shape
/// (`Artist`, `City`, `Venue`, `Time`, `Price`, `Title`, `Link`, `ID`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    /// Currently the same text as `title`; the listing row has no separate artist field
    pub artist: String,

    /// Not populated by listing extraction
    pub city: String,

    /// Venue name, empty when the row has no venue details
    pub venue: String,

    /// Start time in the site's local time, `None` when it could not be parsed
    ///
    /// `None` is written as [`ZERO_TIME`] so the field is always a timestamp.
    #[serde(with = "zero_time")]
    pub time: Option<NaiveDateTime>,

    /// Ticket price, 0.0 when free or unparsed
    pub price: f64,

    pub title: String,

    /// Absolute URL of the event's detail page
    pub link: String,

    /// Identifier taken from the detail page URL, 0 when unparsed
    #[serde(rename = "ID")]
    pub id: i64,
}

impl Event {
    /// Returns true if the event carries the fields every listing row must have
    pub fn is_complete(&self) -> bool {
        !self.link.is_empty() && self.id != 0
    }
}

mod zero_time {
    use super::ZERO_TIME;
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    fn zero() -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(1, 1, 1).and_then(|date| date.and_hms_opt(0, 0, 0))
    }

    pub fn serialize<S>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => time.serialize(serializer),
            None => serializer.serialize_str(ZERO_TIME),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let time = Option::<NaiveDateTime>::deserialize(deserializer)?;
        Ok(time.filter(|time| Some(*time) != zero()))
    }
}
