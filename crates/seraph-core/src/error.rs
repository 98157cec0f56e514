//! Error types for client construction and transport faults.
//!
//! Endpoint methods never surface these to callers: they are folded into a
//! failure envelope by [`crate::envelope::FailureBody::from_error`]. Builders
//! and option validation return them directly.

use thiserror::Error;

/// Main error type for Seraph and Polsu client operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Remote service could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Invalid player UUID format
    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Invalid request parameter
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::InvalidUuid(_) => "INVALID_UUID",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Returns true if the error originated on the network rather than locally.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_) | Self::HttpError(_))
            || matches!(self, Self::Timeout(_) | Self::ParseError(_))
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::ConfigError(format!("Invalid header value: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::ServiceUnavailable("test".to_string()).error_code(),
            "SERVICE_UNAVAILABLE"
        );
        assert_eq!(
            Error::InvalidUuid("test".to_string()).error_code(),
            "INVALID_UUID"
        );
        assert_eq!(
            Error::ConfigError("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::HttpError("test".to_string()).error_code(),
            "HTTP_ERROR"
        );
        assert_eq!(Error::Timeout("test".to_string()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::InvalidRequest("test".to_string()).error_code(),
            "INVALID_REQUEST"
        );
        assert_eq!(
            Error::ValidationError("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            Error::ParseError("test".to_string()).error_code(),
            "PARSE_ERROR"
        );
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::ServiceUnavailable("api.seraph.si".to_string());
        assert_eq!(err.to_string(), "Service unavailable: api.seraph.si");

        let err = Error::InvalidUuid("abc".to_string());
        assert_eq!(err.to_string(), "Invalid UUID: abc");
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::Timeout("t".to_string()).is_transport());
        assert!(Error::ServiceUnavailable("t".to_string()).is_transport());
        assert!(Error::ParseError("t".to_string()).is_transport());
        assert!(!Error::InvalidUuid("t".to_string()).is_transport());
        assert!(!Error::ConfigError("t".to_string()).is_transport());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let converted: Error = err.into();
        assert!(matches!(converted, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let converted: Error = err.into();
        assert!(matches!(converted, Error::ParseError(_)));
    }

    #[test]
    fn test_from_invalid_header_value() {
        let err = reqwest::header::HeaderValue::from_str("bad\nvalue").unwrap_err();
        let converted: Error = err.into();
        assert_eq!(converted.error_code(), "CONFIG_ERROR");
    }
}
