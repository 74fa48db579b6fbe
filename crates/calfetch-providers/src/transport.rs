//! The seam between the API client and the network.
//!
//! [`CalendarTransport`] performs single requests and token refreshes. It
//! does not retry and does not look into response payloads; that policy lives
//! in [`ApiClient`](crate::api::ApiClient).

use serde_json::Value;

use crate::credentials::Credentials;
use crate::error::ProviderResult;
use crate::query::Query;

/// A remote API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    /// `calendar.events.list`: one page of events from a calendar.
    EventsList,
}

impl ApiMethod {
    /// Returns the API's name for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventsList => "calendar.events.list",
        }
    }
}

/// Executes calendar API requests.
pub trait CalendarTransport {
    /// Executes `method` once and returns the decoded response body.
    ///
    /// A body that decodes as JSON is returned even when it describes an
    /// error (`{"error": {...}}`); callers decide what to do with it.
    fn execute(
        &self,
        method: ApiMethod,
        query: &Query,
        access_token: &str,
    ) -> ProviderResult<Value>;

    /// Obtains a fresh access token using the stored refresh token.
    fn refresh_access_token(&self, credentials: &Credentials) -> ProviderResult<String>;
}

impl<T: CalendarTransport + ?Sized> CalendarTransport for Box<T> {
    fn execute(
        &self,
        method: ApiMethod,
        query: &Query,
        access_token: &str,
    ) -> ProviderResult<Value> {
        (**self).execute(method, query, access_token)
    }

    fn refresh_access_token(&self, credentials: &Credentials) -> ProviderResult<String> {
        (**self).refresh_access_token(credentials)
    }
}
