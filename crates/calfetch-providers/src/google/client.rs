//! Google Calendar API transport over HTTP.

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{ProviderError, ProviderResult};
use crate::query::{CALENDAR_ID, Query};
use crate::transport::{ApiMethod, CalendarTransport};

use super::oauth::OAuthClient;

/// Base URL for Google Calendar API v3.
pub const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

const USER_AGENT: &str = concat!("calfetch/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP implementation of [`CalendarTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    api_base: String,
    oauth: OAuthClient,
}

impl HttpTransport {
    /// Creates a transport talking to the public Google endpoints.
    pub fn new() -> ProviderResult<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ProviderError::network(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;
        Ok(Self::with_client(http_client))
    }

    /// Creates a transport on top of an existing HTTP client.
    pub fn with_client(http_client: Client) -> Self {
        Self {
            oauth: OAuthClient::new(http_client.clone()),
            http_client,
            api_base: CALENDAR_API_BASE.to_string(),
        }
    }

    /// Points the transport at other endpoints.
    #[must_use]
    pub fn with_endpoints(
        mut self,
        api_base: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        self.api_base = api_base.into();
        self.oauth = self.oauth.with_token_url(token_url);
        self
    }

    /// Splits a query into the request URL and its URL parameters.
    fn request_parts<'q>(
        &self,
        method: ApiMethod,
        query: &'q Query,
    ) -> ProviderResult<(String, Vec<(&'q str, &'q str)>)> {
        match method {
            ApiMethod::EventsList => {
                let calendar_id = query.calendar_id().ok_or_else(|| {
                    ProviderError::configuration(format!(
                        "{} requires a {} parameter",
                        method.as_str(),
                        CALENDAR_ID
                    ))
                })?;
                let url = format!(
                    "{}/calendars/{}/events",
                    self.api_base,
                    urlencoding::encode(calendar_id)
                );
                let params = query.iter().filter(|(k, _)| *k != CALENDAR_ID).collect();
                Ok((url, params))
            }
        }
    }
}

impl CalendarTransport for HttpTransport {
    fn execute(
        &self,
        method: ApiMethod,
        query: &Query,
        access_token: &str,
    ) -> ProviderResult<Value> {
        let (url, params) = self.request_parts(method, query)?;

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .query(&params)
            .send()
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "request timeout".to_string()
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    format!("request failed: {}", e)
                };
                ProviderError::network(message).with_source(e)
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            ProviderError::network(format!("failed to read response: {}", e)).with_source(e)
        })?;

        // Error statuses usually come with a JSON `{"error": ...}` body, which
        // is handed back as data so the caller's retry policy can see it.
        match serde_json::from_str::<Value>(&body) {
            Ok(data) => {
                if !status.is_success() {
                    debug!(%status, method = method.as_str(), "API answered with an error status");
                }
                Ok(data)
            }
            Err(e) if status.is_success() => Err(ProviderError::invalid_response(format!(
                "failed to parse response: {}",
                e
            ))
            .with_source(e)),
            Err(_) => Err(ProviderError::network(format!(
                "API error ({}): {}",
                status, body
            ))),
        }
    }

    fn refresh_access_token(&self, credentials: &Credentials) -> ProviderResult<String> {
        self.oauth.refresh(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, data_error};
    use crate::error::ProviderErrorCode;
    use crate::google::test_server::serve_once;
    use crate::pagination::EventPages;
    use crate::testing::credentials;

    fn transport() -> HttpTransport {
        HttpTransport::with_client(Client::builder().no_proxy().build().unwrap())
    }

    #[test]
    fn events_list_url() {
        let query = Query::for_calendar("team@group.calendar.google.com")
            .with("singleEvents", "true")
            .with("pageToken", "p2");
        let (url, params) = transport()
            .request_parts(ApiMethod::EventsList, &query)
            .unwrap();

        assert_eq!(
            url,
            "https://www.googleapis.com/calendar/v3/calendars/team%40group.calendar.google.com/events"
        );
        assert_eq!(params, vec![("singleEvents", "true"), ("pageToken", "p2")]);
    }

    #[test]
    fn events_list_requires_calendar() {
        let err = transport()
            .request_parts(ApiMethod::EventsList, &Query::new())
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert!(err.message().contains("calendarId"));
    }

    #[test]
    fn error_status_with_json_body_is_data() {
        let server = serve_once(
            "401 Unauthorized",
            r#"{"error":{"code":401,"message":"Invalid Credentials"}}"#,
        );
        let transport = transport().with_endpoints(server.url(""), server.url("/token"));

        let data = transport
            .execute(ApiMethod::EventsList, &Query::for_calendar("primary"), "stale")
            .unwrap();
        assert!(data_error(&data).is_some());

        let request = server.request();
        assert!(request.starts_with("GET /calendars/primary/events "));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer stale"));
    }

    #[test]
    fn error_status_with_html_body_is_a_network_error() {
        let server = serve_once("502 Bad Gateway", "<html>bad gateway</html>");
        let transport = transport().with_endpoints(server.url(""), server.url("/token"));

        let err = transport
            .execute(ApiMethod::EventsList, &Query::for_calendar("primary"), "token")
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NetworkError);
        assert!(err.message().contains("502"));
        server.request();
    }

    #[test]
    fn query_parameters_are_sent() {
        let server = serve_once("200 OK", r#"{"items":[{"id":"a"}]}"#);
        let transport = transport().with_endpoints(server.url(""), server.url("/token"));

        let mut client = ApiClient::new(transport, credentials());
        let query = Query::for_calendar("primary")
            .with("timeMin", "2024-03-15T10:00:00+01:00")
            .with("orderBy", "startTime");
        let events: Vec<_> = EventPages::new(&mut client, query)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(events.len(), 1);

        let request = server.request();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.contains("timeMin=2024-03-15T10%3A00%3A00%2B01%3A00"));
        assert!(request_line.contains("orderBy=startTime"));
        assert!(!request_line.contains("calendarId"));
    }
}
