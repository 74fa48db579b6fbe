//! Secret references in credential values.
//!
//! A credential value in the config file may point somewhere else instead of
//! holding the secret itself:
//!
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - `pass::path/in/store` runs `pass show path/in/store` and keeps the first line
//! - anything else is used verbatim

use std::process::Command;

use tracing::debug;

use crate::error::{ProviderError, ProviderResult};

/// Where a credential value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretRef<'a> {
    /// Literal value.
    Plain(&'a str),
    /// Environment variable name.
    Env(&'a str),
    /// Entry in the `pass` password store.
    Pass(&'a str),
}

impl<'a> SecretRef<'a> {
    /// Parses a raw config value.
    pub fn parse(value: &'a str) -> Self {
        if let Some(var) = value.strip_prefix("env::") {
            Self::Env(var)
        } else if let Some(path) = value.strip_prefix("pass::") {
            Self::Pass(path)
        } else {
            Self::Plain(value)
        }
    }

    /// Produces the secret value.
    pub fn resolve(&self) -> ProviderResult<String> {
        match *self {
            Self::Plain(value) => Ok(value.to_string()),
            Self::Env(var) => std::env::var(var).map_err(|e| {
                ProviderError::configuration(format!("environment variable `{}` is not set", var))
                    .with_source(e)
            }),
            Self::Pass(path) => pass_show(path),
        }
    }
}

/// Resolves a raw config value, following `env::` and `pass::` references.
pub fn resolve(value: &str) -> ProviderResult<String> {
    SecretRef::parse(value).resolve()
}

fn pass_show(path: &str) -> ProviderResult<String> {
    debug!(path, "reading secret from pass");
    let output = Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| {
            ProviderError::configuration(format!("failed to run `pass show {}`", path))
                .with_source(e)
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProviderError::configuration(format!(
            "`pass show {}` failed ({}): {}",
            path,
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::configuration(format!("`pass show {}` printed nothing", path))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    #[test]
    fn parse_prefixes() {
        assert_eq!(SecretRef::parse("abc"), SecretRef::Plain("abc"));
        assert_eq!(SecretRef::parse("env::TOKEN"), SecretRef::Env("TOKEN"));
        assert_eq!(SecretRef::parse("pass::google/cal"), SecretRef::Pass("google/cal"));
        // Only a leading prefix counts.
        assert_eq!(SecretRef::parse("x-env::Y"), SecretRef::Plain("x-env::Y"));
    }

    #[test]
    fn plain_value() {
        assert_eq!(resolve("1//refresh-token").unwrap(), "1//refresh-token");
    }

    #[test]
    fn env_value() {
        unsafe {
            std::env::set_var("_CALFETCH_SECRET_TEST", "from-env");
        }
        assert_eq!(resolve("env::_CALFETCH_SECRET_TEST").unwrap(), "from-env");
        unsafe {
            std::env::remove_var("_CALFETCH_SECRET_TEST");
        }
    }

    #[test]
    fn missing_env_value() {
        let err = resolve("env::_CALFETCH_SECRET_DOES_NOT_EXIST").unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert!(err.message().contains("_CALFETCH_SECRET_DOES_NOT_EXIST"));
    }
}
