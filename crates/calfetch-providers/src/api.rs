//! Authenticated API calls with a single refresh-and-retry.
//!
//! Access token expiry is not tracked locally (the credentials file carries
//! no expiry time). Instead, an error payload in a response is taken to mean
//! the token went stale: the client refreshes it once and repeats the
//! request once. A second error payload is final.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::credentials::Credentials;
use crate::error::{ProviderError, ProviderResult};
use crate::query::Query;
use crate::transport::{ApiMethod, CalendarTransport};

/// API client owning the credentials and the transport.
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    credentials: Credentials,
}

impl<T: CalendarTransport> ApiClient<T> {
    /// Creates a client. No request is made until [`fetch`](Self::fetch).
    pub fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Returns the credentials, including the current access token.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes `method` and returns the response body.
    ///
    /// # Errors
    ///
    /// - `AuthenticationFailed` or `ApiError` (see
    ///   [`ProviderError::api_error`]) carrying the `error` payload if the response
    ///   still reports an error after one token refresh and one retry
    /// - whatever the transport or the token refresh fails with
    pub fn fetch(&mut self, method: ApiMethod, query: &Query) -> ProviderResult<Value> {
        let data = self.execute(method, query)?;
        let Some(error) = data_error(&data) else {
            return Ok(data);
        };

        debug!(method = method.as_str(), %error, "API returned an error, refreshing access token");
        self.refresh()?;

        let data = self.execute(method, query)?;
        if let Some(error) = data_error(&data) {
            warn!(method = method.as_str(), %error, "API error persists after token refresh");
            return Err(ProviderError::api_error(error.clone()));
        }
        Ok(data)
    }

    fn execute(&self, method: ApiMethod, query: &Query) -> ProviderResult<Value> {
        debug!(method = method.as_str(), ?query, "executing request");
        self.transport
            .execute(method, query, &self.credentials.access_token)
    }

    fn refresh(&mut self) -> ProviderResult<()> {
        let token = self
            .transport
            .refresh_access_token(&self.credentials)?;
        self.credentials.access_token = token;
        info!("refreshed access token");
        Ok(())
    }
}

/// Returns the error indicator embedded in a response body, if any.
pub fn data_error(data: &Value) -> Option<&Value> {
    data.get("error").filter(|e| !e.is_null())
}
