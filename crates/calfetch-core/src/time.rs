//! The "upcoming" query window.
//!
//! [`UpcomingWindow`] bounds an events query to what is still ahead: from the
//! current instant up to 3:00 AM local time, `days_ahead` days from today.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, SecondsFormat, TimeZone};
use thiserror::Error;

/// Number of days ahead used when `--upcoming` is given without a value.
pub const DEFAULT_DAYS_AHEAD: f64 = 1.0;

/// Hour of the day (local time) at which the window closes.
pub const CUTOFF_HOUR: i64 = 3;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Errors from computing an upcoming window.
#[derive(Debug, Error, PartialEq)]
pub enum WindowError {
    /// The number of days is NaN, infinite or negative.
    #[error("invalid number of days ahead: {0} (expected a finite number >= 0)")]
    InvalidDaysAhead(f64),

    /// The window end does not fit in the supported date range.
    #[error("upcoming window is out of range for {0} days ahead")]
    OutOfRange(f64),
}

/// A `{not_before, not_after}` filter for an events query.
///
/// Both bounds keep the UTC offset of the zone they were computed in, so they
/// render as local RFC3339 timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingWindow {
    /// Lower bound, the instant the window was computed.
    ///
    /// The calendar API has no "starts after" filter. This is sent as
    /// `timeMin`, which the API compares against event *end* times.
    pub not_before: DateTime<FixedOffset>,
    /// Upper bound on event start times (`timeMax`).
    pub not_after: DateTime<FixedOffset>,
}

impl UpcomingWindow {
    /// Computes the window for `days_ahead` days from `now`.
    ///
    /// `not_after` is local midnight of `now`'s day plus `days_ahead * 24h`
    /// plus three hours. Fractional days are allowed and counted as elapsed
    /// time with millisecond precision.
    pub fn compute<Tz: TimeZone>(now: &DateTime<Tz>, days_ahead: f64) -> Result<Self, WindowError> {
        if !days_ahead.is_finite() || days_ahead < 0.0 {
            return Err(WindowError::InvalidDaysAhead(days_ahead));
        }

        let midnight = start_of_day(now).ok_or(WindowError::OutOfRange(days_ahead))?;
        let ahead = Duration::try_milliseconds((days_ahead * MILLIS_PER_DAY).round() as i64)
            .ok_or(WindowError::OutOfRange(days_ahead))?;

        let not_after = midnight
            .checked_add_signed(ahead)
            .and_then(|dt| dt.checked_add_signed(Duration::hours(CUTOFF_HOUR)))
            .ok_or(WindowError::OutOfRange(days_ahead))?;

        Ok(Self {
            not_before: now.fixed_offset(),
            not_after: not_after.fixed_offset(),
        })
    }

    /// Returns the events-list query parameters for this window.
    ///
    /// Recurring events are expanded into single instances and ordered by
    /// start time, which the API requires for `orderBy=startTime`.
    pub fn query_params(&self) -> [(&'static str, String); 4] {
        [
            ("timeMax", format_timestamp(&self.not_after)),
            ("timeMin", format_timestamp(&self.not_before)),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ]
    }
}

/// Formats a timestamp as RFC3339 with whole seconds.
pub fn format_timestamp(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Returns the first instant of `now`'s calendar day in its own time zone.
///
/// An ambiguous midnight resolves to the earlier instant. When midnight falls
/// in a DST gap, the first whole hour that exists is used instead.
fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    (0..=CUTOFF_HOUR).find_map(|hour| {
        tz.from_local_datetime(&(midnight + Duration::hours(hour)))
            .earliest()
    })
}
