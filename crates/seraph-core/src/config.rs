//! Client options shared by the Seraph and Polsu façades.
//!
//! Options are consumed when a façade is built and never change afterwards.
//! They can be constructed in code or deserialized from camelCase JSON:
//!
//! ```
//! use seraph_core::ClientOptions;
//!
//! let options: ClientOptions =
//!     serde_json::from_str(r#"{"apiKey": "public", "timeoutMs": 2500}"#).unwrap();
//! assert_eq!(options.timeout_ms, 2500);
//! ```

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use validator::Validate;

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// User agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "seraph-library";

/// Options for building a service façade.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
    /// API key sent in the service's auth header
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_key: SecretString,

    /// Custom user agent (defaults to [`DEFAULT_USER_AGENT`])
    #[validate(length(min = 1))]
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Request timeout in milliseconds
    #[validate(range(min = 1, max = 600_000))]
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl ClientOptions {
    /// Create options with the given API key and default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            user_agent: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set a custom user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the request timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// The user agent actually sent.
    #[must_use]
    pub fn effective_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// The request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The API key in plain text, for building the auth header.
    #[must_use]
    pub fn expose_api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the timeout is out of range or
    /// the user agent is empty.
    pub fn validated(self) -> Result<Self, Error> {
        self.validate()?;
        Ok(self)
    }
}
