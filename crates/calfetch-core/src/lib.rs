//! Core types: events, the upcoming window, filtering and JSON-lines output.

pub mod event;
pub mod filter;
pub mod format;
pub mod time;
pub mod tracing;

pub use event::{Event, start_time, start_time_in};
pub use filter::{UpcomingFilter, starts_after};
pub use format::{JsonLinesWriter, to_line};
pub use time::{DEFAULT_DAYS_AHEAD, UpcomingWindow, WindowError, format_timestamp};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
