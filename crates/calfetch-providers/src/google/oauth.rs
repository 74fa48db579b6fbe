//! OAuth 2.0 access token refresh for Google APIs.
//!
//! Only the refresh grant is implemented. Obtaining the first refresh token
//! is a one-time, browser-driven bootstrap done outside this program.

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::credentials::Credentials;
use crate::error::{ProviderError, ProviderResult};

/// Google's OAuth token endpoint.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Exchanges refresh tokens for new access tokens.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http_client: Client,
    token_url: String,
}

impl OAuthClient {
    /// Creates a client talking to Google's token endpoint.
    pub fn new(http_client: Client) -> Self {
        Self {
            http_client,
            token_url: GOOGLE_TOKEN_URL.to_string(),
        }
    }

    /// Uses a different token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Requests a new access token with the stored refresh token.
    ///
    /// # Errors
    ///
    /// `NetworkError` if the endpoint cannot be reached, `AuthenticationFailed`
    /// if it rejects the grant or its reply does not parse.
    pub fn refresh(&self, credentials: &Credentials) -> ProviderResult<String> {
        let params = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("refresh_token", credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        debug!(url = %self.token_url, "refreshing access token");
        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .map_err(|e| {
                ProviderError::network(format!("token refresh request failed: {}", e))
                    .with_source(e)
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            ProviderError::network(format!("failed to read token response: {}", e)).with_source(e)
        })?;

        if !status.is_success() {
            return Err(ProviderError::authentication(format!(
                "token refresh failed ({}): {}",
                status, body
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::authentication(format!("invalid token response: {}", e)).with_source(e)
        })?;

        info!(expires_in = ?token.expires_in, "obtained new access token");
        Ok(token.access_token)
    }
}

/// Response from Google's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}
