//! Google Calendar over HTTP.
//!
//! [`HttpTransport`] implements [`CalendarTransport`](crate::CalendarTransport)
//! against the Calendar API v3 and Google's OAuth token endpoint.
//!
//! ```ignore
//! use calfetch_providers::{ApiClient, Credentials, EventPages, Query};
//! use calfetch_providers::google::HttpTransport;
//!
//! let credentials = Credentials::load(&calfetch_providers::credentials::default_path())?;
//! let mut client = ApiClient::new(HttpTransport::new()?, credentials);
//! for event in EventPages::new(&mut client, Query::for_calendar("primary")) {
//!     println!("{}", serde_json::to_string(&event?)?);
//! }
//! ```

mod client;
mod oauth;
#[cfg(test)]
mod test_server;

pub use client::{CALENDAR_API_BASE, HttpTransport};
pub use oauth::{GOOGLE_TOKEN_URL, OAuthClient};
