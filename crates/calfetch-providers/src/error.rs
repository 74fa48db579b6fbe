//! Error types for calendar API operations.

use std::fmt;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The credentials file does not exist.
    ConfigMissing,
    /// The credentials file could not be read, parsed or resolved.
    ConfigurationError,
    /// The API kept reporting an authorization error after a token refresh,
    /// or the refresh itself was rejected.
    AuthenticationFailed,
    /// The API kept reporting some other error (unknown calendar, quota, ...)
    /// after a token refresh.
    ApiError,
    /// Transport failure below the payload level (connect, timeout, non-JSON
    /// error body).
    NetworkError,
    /// The response body was not what the API documents.
    InvalidResponse,
}

impl ProviderErrorCode {
    /// Returns a machine-friendly name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigMissing => "config_missing",
            Self::ConfigurationError => "configuration_error",
            Self::AuthenticationFailed => "authentication_failed",
            Self::ApiError => "api_error",
            Self::NetworkError => "network_error",
            Self::InvalidResponse => "invalid_response",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while talking to the calendar API.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// The `error` member of an API response, when that is what failed.
    payload: Option<Value>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            payload: None,
            source: None,
        }
    }

    /// Creates a missing-config error for `path`.
    pub fn config_missing(path: &Path) -> Self {
        Self::new(
            ProviderErrorCode::ConfigMissing,
            format!("{} not found", path.display()),
        )
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthenticationFailed, message)
    }

    /// Creates an error from an API error payload that outlived a token
    /// refresh.
    ///
    /// Payloads with code 401 or 403 are `AuthenticationFailed`, anything
    /// else is `ApiError`. The message ends with the payload as JSON.
    pub fn api_error(payload: Value) -> Self {
        let code = match payload.get("code").and_then(Value::as_u64) {
            Some(401 | 403) => ProviderErrorCode::AuthenticationFailed,
            _ => ProviderErrorCode::ApiError,
        };
        let mut err = Self::new(code, format!("API error after token refresh: {}", payload));
        err.payload = Some(payload);
        err
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the API error payload, if this error carries one.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
