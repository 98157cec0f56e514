//! Remote service descriptors.
//!
//! Both façades share one transport implementation; everything that differs
//! between the two services (base URL, auth header, documentation link and
//! envelope quirks) is described here.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Base URL of the Seraph API
pub const SERAPH_BASE_URL: &str = "https://api.seraph.si/";
/// Base URL of the Polsu API
pub const POLSU_BASE_URL: &str = "https://api.polsu.xyz/";

/// Documentation linked from Seraph failure envelopes
pub const SERAPH_DOCUMENTATION_URL: &str = "https://docs.seraph.si";
/// Documentation linked from Polsu failure envelopes
pub const POLSU_DOCUMENTATION_URL: &str = "https://docs.polsu.xyz";

/// Supported remote services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteService {
    /// Seraph player reputation API
    Seraph,
    /// Polsu Minecraft statistics API
    Polsu,
}

impl RemoteService {
    /// Returns the service name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Seraph => "seraph",
            Self::Polsu => "polsu",
        }
    }

    /// Returns all available services.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Seraph, Self::Polsu]
    }

    /// Returns the production base URL, always ending in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Seraph => SERAPH_BASE_URL,
            Self::Polsu => POLSU_BASE_URL,
        }
    }

    /// Returns the header carrying the API key.
    #[must_use]
    pub const fn auth_header(&self) -> &'static str {
        match self {
            Self::Seraph => "run-api-key",
            Self::Polsu => "API-Key",
        }
    }

    /// Returns the documentation URL embedded in synthesized failures.
    #[must_use]
    pub const fn documentation_url(&self) -> &'static str {
        match self {
            Self::Seraph => SERAPH_DOCUMENTATION_URL,
            Self::Polsu => POLSU_DOCUMENTATION_URL,
        }
    }

    /// Whether response bodies lack a `code` field that must be filled in
    /// from the HTTP status.
    #[must_use]
    pub const fn splices_status(&self) -> bool {
        matches!(self, Self::Polsu)
    }
}

impl FromStr for RemoteService {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "seraph" => Ok(Self::Seraph),
            "polsu" => Ok(Self::Polsu),
            _ => Err(Error::InvalidRequest(format!("Unknown service: {s}"))),
        }
    }
}

impl std::fmt::Display for RemoteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_names() {
        assert_eq!(RemoteService::Seraph.name(), "seraph");
        assert_eq!(RemoteService::Polsu.to_string(), "polsu");
        assert_eq!(RemoteService::all().len(), 2);
    }

    #[test]
    fn test_service_from_str() {
        let seraph: RemoteService = "Seraph".parse().unwrap();
        let polsu: RemoteService = "polsu".parse().unwrap();
        assert_eq!(seraph, RemoteService::Seraph);
        assert_eq!(polsu, RemoteService::Polsu);
        assert!(matches!(
            "hypixel".parse::<RemoteService>(),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_auth_headers_differ() {
        assert_eq!(RemoteService::Seraph.auth_header(), "run-api-key");
        assert_eq!(RemoteService::Polsu.auth_header(), "API-Key");
    }

    #[test]
    fn test_base_urls_end_with_slash() {
        for service in RemoteService::all() {
            assert!(service.base_url().ends_with('/'));
            assert!(url::Url::parse(service.base_url()).is_ok());
        }
    }

    #[test]
    fn test_only_polsu_splices_status() {
        assert!(RemoteService::Polsu.splices_status());
        assert!(!RemoteService::Seraph.splices_status());
    }
}
