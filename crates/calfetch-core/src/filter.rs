//! Client-side "upcoming" post-filter.
//!
//! The server-side window uses `timeMin`, which matches on event *end*, so
//! events that already started but are still running come back too. The
//! filter here drops them by comparing each start time against a clock read
//! when the event is examined.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::event::{Event, start_time};

/// Returns true if the event starts strictly after `instant`.
///
/// Events without a readable start time never match.
pub fn starts_after(event: &Event, instant: DateTime<Utc>) -> bool {
    match start_time(event) {
        Some(start) => start > instant,
        None => {
            warn!(id = event.id(), "event has no readable start time, skipping");
            false
        }
    }
}

/// Iterator adapter keeping only events that have not started yet.
///
/// Works over fallible sequences: `Err` items are passed through untouched so
/// the consumer sees them in order.
pub struct UpcomingFilter<I, C> {
    inner: I,
    clock: C,
}

impl<I, C> UpcomingFilter<I, C> {
    /// Wraps `inner`; `clock` is called once per examined event.
    pub fn new(inner: I, clock: C) -> Self {
        Self { inner, clock }
    }
}

impl<I, C, E> Iterator for UpcomingFilter<I, C>
where
    I: Iterator<Item = Result<Event, E>>,
    C: FnMut() -> DateTime<Utc>,
{
    type Item = Result<Event, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(event) => {
                    let now = (self.clock)();
                    if starts_after(&event, now) {
                        return Some(Ok(event));
                    }
                    debug!(id = event.id(), "dropping event that already started");
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
