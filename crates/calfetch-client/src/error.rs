//! Client error types.

use std::fmt;
use std::path::PathBuf;

use calfetch_core::WindowError;
use calfetch_providers::{ProviderError, ProviderErrorCode};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// The credentials file does not exist.
    ConfigMissing(PathBuf),
    /// Calendar API or credentials error.
    Provider(ProviderError),
    /// The upcoming window could not be computed.
    Window(WindowError),
    /// Writing events to the output failed.
    Output(std::io::Error),
}

impl ClientError {
    /// Wraps a credentials loading error, keeping the path when the file is
    /// missing.
    pub fn from_load(err: ProviderError, path: impl Into<PathBuf>) -> Self {
        if err.code() == ProviderErrorCode::ConfigMissing {
            Self::ConfigMissing(path.into())
        } else {
            Self::Provider(err)
        }
    }

    /// Returns true if output stopped because the reader went away.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMissing(path) => write!(f, "{} not found", path.display()),
            Self::Provider(err) => write!(f, "{}", err),
            Self::Window(err) => write!(f, "{}", err),
            Self::Output(err) => write!(f, "failed to write output: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            Self::Window(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::ConfigMissing(_) => None,
        }
    }
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl From<WindowError> for ClientError {
    fn from(err: WindowError) -> Self {
        Self::Window(err)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(err)
    }
}
