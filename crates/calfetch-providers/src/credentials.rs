//! OAuth credentials file.
//!
//! The file is YAML and is written once by an external, interactive OAuth
//! bootstrap (`google-api oauth-2-login`). This crate only reads it. Keys
//! other than the five below (the bootstrap also writes `mechanism`) are
//! ignored.
//!
//! ```yaml
//! client_id: 1234.apps.googleusercontent.com
//! client_secret: env::GOOGLE_CLIENT_SECRET
//! scope: https://www.googleapis.com/auth/calendar
//! refresh_token: 1//0g...
//! access_token: ya29...
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::secret;

/// File name of the credentials file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".google-api.yaml";

/// Redirect URI the OAuth client must allow for the bootstrap tool.
const BOOTSTRAP_REDIRECT_URI: &str = "http://localhost:12736/";

/// Scope requested by the bootstrap tool.
const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// OAuth2 client credentials and tokens.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Granted scope(s), space separated.
    #[serde(default)]
    pub scope: String,
    /// Long-lived token used to obtain new access tokens.
    pub refresh_token: String,
    /// Short-lived bearer token. May be stale or empty; the API client
    /// refreshes it when the service rejects it.
    #[serde(default)]
    pub access_token: String,
}

impl Credentials {
    /// Loads credentials from `path`.
    ///
    /// # Errors
    ///
    /// - `ConfigMissing` if the file does not exist
    /// - `ConfigurationError` if it cannot be read or parsed, a required
    ///   value is empty, or a secret reference cannot be resolved
    pub fn load(path: &Path) -> ProviderResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProviderError::config_missing(path)
            } else {
                ProviderError::configuration(format!("failed to read {}", path.display()))
                    .with_source(e)
            }
        })?;

        debug!(path = %path.display(), "loaded credentials file");
        Self::from_yaml(&content).map_err(|e| {
            ProviderError::configuration(format!("{}: {}", path.display(), e.message()))
        })
    }

    /// Parses credentials from YAML text and resolves secret references.
    pub fn from_yaml(content: &str) -> ProviderResult<Self> {
        let raw: Self = serde_yaml::from_str(content).map_err(|e| {
            ProviderError::configuration(format!("failed to parse credentials: {}", e))
        })?;
        let creds = raw.resolve_secrets()?;
        creds.validate()?;
        Ok(creds)
    }

    /// Checks that the values needed for a token refresh are present.
    pub fn validate(&self) -> ProviderResult<()> {
        for (name, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", &self.refresh_token),
        ] {
            if value.trim().is_empty() {
                return Err(ProviderError::configuration(format!("{} is empty", name)));
            }
        }
        Ok(())
    }

    fn resolve_secrets(self) -> ProviderResult<Self> {
        Ok(Self {
            client_id: secret::resolve(&self.client_id)?,
            client_secret: secret::resolve(&self.client_secret)?,
            scope: self.scope,
            refresh_token: secret::resolve(&self.refresh_token)?,
            access_token: secret::resolve(&self.access_token)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .field("refresh_token", &"<redacted>")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Returns the default credentials path, `~/.google-api.yaml`.
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

/// Returns the steps a user has to follow to create the credentials file.
pub fn setup_instructions(path: &Path) -> String {
    format!(
        "\
This utility needs OAuth credentials and tokens for your Google API project
in the config file '{path}'.

To create it:

  - In the Google API Console, set up a project that will be used to read
    your calendars and enable the Calendar API for it.
  - Create an OAuth client and add '{redirect}' to its redirect URIs.
  - Note the project's CLIENT_ID and CLIENT_SECRET.
  - Generate '{path}' with the google-api command from the
    google-api-client gem. It opens a browser to grant access and writes
    the file:

      google-api oauth-2-login --scope={scope} \\
        --client-id=\"$CLIENT_ID\" --client-secret=\"$CLIENT_SECRET\"

Values in the file may also be written as env::VAR or pass::path/in/store.
",
        path = path.display(),
        redirect = BOOTSTRAP_REDIRECT_URI,
        scope = CALENDAR_SCOPE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use std::io::Write;

    const SAMPLE: &str = "\
---
mechanism: oauth_2
scope: https://www.googleapis.com/auth/calendar
client_id: 1234.apps.googleusercontent.com
client_secret: shh
access_token: ya29.stale
refresh_token: 1//refresh
";

    #[test]
    fn parse_bootstrap_file() {
        let creds = Credentials::from_yaml(SAMPLE).unwrap();
        assert_eq!(creds.client_id, "1234.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "shh");
        assert_eq!(creds.scope, "https://www.googleapis.com/auth/calendar");
        assert_eq!(creds.refresh_token, "1//refresh");
        assert_eq!(creds.access_token, "ya29.stale");
    }

    #[test]
    fn access_token_and_scope_are_optional() {
        let creds =
            Credentials::from_yaml("client_id: id\nclient_secret: secret\nrefresh_token: r\n")
                .unwrap();
        assert!(creds.access_token.is_empty());
        assert!(creds.scope.is_empty());
    }

    #[test]
    fn missing_refresh_token_is_a_config_error() {
        let err = Credentials::from_yaml("client_id: id\nclient_secret: secret\n").unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert!(err.message().contains("refresh_token"));
    }

    #[test]
    fn empty_client_id_is_rejected() {
        let err = Credentials::from_yaml("client_id: ''\nclient_secret: s\nrefresh_token: r\n")
            .unwrap_err();
        assert!(err.message().contains("client_id is empty"));
    }

    #[test]
    fn secret_references_are_resolved() {
        unsafe {
            std::env::set_var("_CALFETCH_CREDS_SECRET", "resolved-secret");
        }
        let creds = Credentials::from_yaml(
            "client_id: id\nclient_secret: env::_CALFETCH_CREDS_SECRET\nrefresh_token: r\n",
        )
        .unwrap();
        assert_eq!(creds.client_secret, "resolved-secret");
        unsafe {
            std::env::remove_var("_CALFETCH_CREDS_SECRET");
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let creds = Credentials::load(file.path()).unwrap();
        assert_eq!(creds.refresh_token, "1//refresh");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let err = Credentials::load(&path).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigMissing);
        assert!(err.message().contains(".google-api.yaml"));
    }

    #[test]
    fn load_garbage_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"- just\n- a list\n").unwrap();

        let err = Credentials::load(file.path()).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert!(err.message().contains(&file.path().display().to_string()));
    }

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::from_yaml(SAMPLE).unwrap();
        let dbg = format!("{:?}", creds);
        assert!(!dbg.contains("shh"));
        assert!(!dbg.contains("1//refresh"));
        assert!(dbg.contains("1234.apps.googleusercontent.com"));
    }

    #[test]
    fn instructions_name_the_path() {
        let text = setup_instructions(Path::new("/home/me/.google-api.yaml"));
        assert!(text.contains("'/home/me/.google-api.yaml'"));
        assert!(text.contains("oauth-2-login"));
        assert!(text.contains(BOOTSTRAP_REDIRECT_URI));
    }
}
