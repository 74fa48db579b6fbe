//! Calendar event records.
//!
//! Events are kept exactly as the calendar service returned them. The only
//! field this crate looks into is the start time, through [`start_time`].

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque event object as returned by the calendar API.
///
/// Serialization is transparent, so the object (including its key order) is
/// written back out exactly as it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Map<String, Value>);

impl Event {
    /// Wraps a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the top-level field with the given name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the event identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }

    /// Returns the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the event and returns the underlying JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Event {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Returns the start time of an event.
///
/// Timed events carry `start.dateTime` (RFC3339). All-day events only carry
/// `start.date`; those start at local midnight of that date. Returns `None`
/// when neither field is present or parsable.
pub fn start_time(event: &Event) -> Option<DateTime<Utc>> {
    start_time_in(event, &Local)
}

/// Like [`start_time`], resolving all-day dates in the given time zone.
pub fn start_time_in<Tz: TimeZone>(event: &Event, tz: &Tz) -> Option<DateTime<Utc>> {
    let start = event.get("start")?;

    if let Some(dt) = start.get("dateTime").and_then(Value::as_str) {
        return DateTime::parse_from_rfc3339(dt)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc));
    }

    let date = start.get("date").and_then(Value::as_str)?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    tz.from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
