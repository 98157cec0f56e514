//! Response envelope contract and error normalization.
//!
//! Every endpoint method resolves to an envelope: either the body the remote
//! service sent, or a failure synthesized by the library. The library
//! synthesizes failures in three situations:
//!
//! - local validation rejected the input ([`invalid_request`], code 400)
//! - the request exceeded the configured timeout ([`FailureBody::timed_out`], code 500)
//! - the transport failed or the body could not be decoded (code 500, or the
//!   HTTP status when the service answered with an error page)
//!
//! Synthesized failures share the [`FailureBody`] wire shape. Each service
//! family converts it into its own failure type.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::client::RawResponse;
use crate::error::{Error, Result};
use crate::types::RemoteService;

/// Cause returned when a player UUID fails local validation.
pub const INVALID_UUID_MESSAGE: &str = "The UUID provided doesn't match the undashed type required";

/// Developer hint attached to library-side failures.
pub const CONTACT_SUPPORT: &str = "If this keeps happening, please contact the library maintainers \
     and include the endpoint you were calling.";

/// Fields every envelope exposes regardless of service family.
pub trait DefaultEnvelope {
    /// The `success` flag of the body.
    fn is_success(&self) -> bool;

    /// Status code carried in the body.
    fn code(&self) -> u16;

    /// Milliseconds since the Unix epoch, when the body carries one.
    fn timestamp_ms(&self) -> Option<i64>;
}

/// An envelope family that can be decoded from a body or built from a
/// synthesized failure.
pub trait Envelope: DefaultEnvelope + DeserializeOwned + From<FailureBody> {}

impl<E> Envelope for E where E: DefaultEnvelope + DeserializeOwned + From<FailureBody> {}

/// Detail entry in a failure envelope's `extra` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExtra {
    /// Short error name
    pub name: String,
    /// Human-readable reason
    pub reason: String,
    /// Hint aimed at developers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_reason: Option<String>,
    /// Status code associated with this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl ErrorExtra {
    /// Create an entry with a name and reason.
    #[must_use]
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
            developer_reason: None,
            code: None,
        }
    }

    /// Attach a status code.
    #[must_use]
    pub const fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a developer hint.
    #[must_use]
    pub fn with_developer_reason(mut self, reason: impl Into<String>) -> Self {
        self.developer_reason = Some(reason.into());
        self
    }
}

/// Wire shape of a failure synthesized by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureBody {
    /// Always `false`
    pub success: bool,
    /// Status code
    pub code: u16,
    /// Top-level cause
    pub cause: String,
    /// Detail entries
    pub extra: Vec<ErrorExtra>,
    /// Documentation URL of the service
    pub documentation: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl FailureBody {
    /// Create a failure for `service` stamped with the current time.
    #[must_use]
    pub fn new(
        service: RemoteService,
        code: u16,
        cause: impl Into<String>,
        extra: Vec<ErrorExtra>,
    ) -> Self {
        Self {
            success: false,
            code,
            cause: cause.into(),
            extra,
            documentation: service.documentation_url().to_string(),
            timestamp: now_ms(),
        }
    }

    /// The failure produced when a request exceeds `timeout_ms`.
    #[must_use]
    pub fn timed_out(service: RemoteService, timeout_ms: u64) -> Self {
        Self::new(
            service,
            500,
            format!("I have timed out. Response took longer than {timeout_ms} milliseconds."),
            vec![ErrorExtra::new("Timeout", "The library has timed out.")
                .with_code(500)
                .with_developer_reason(CONTACT_SUPPORT)],
        )
    }

    /// The failure produced for a transport fault other than a timeout.
    #[must_use]
    pub fn from_error(service: RemoteService, err: &Error) -> Self {
        let name = if err.is_transport() {
            "Transport"
        } else {
            "Library"
        };
        Self::new(
            service,
            500,
            err.to_string(),
            vec![ErrorExtra::new(name, err.to_string())
                .with_code(500)
                .with_developer_reason(CONTACT_SUPPORT)],
        )
    }

    /// The failure produced when a body does not match the envelope shape.
    ///
    /// Keeps the HTTP status when the service answered with an error status.
    #[must_use]
    pub fn undecodable(service: RemoteService, status: StatusCode, err: &Error) -> Self {
        let code = if status.is_client_error() || status.is_server_error() {
            status.as_u16()
        } else {
            500
        };
        Self::new(
            service,
            code,
            format!("The {service} API returned an unexpected response body."),
            vec![ErrorExtra::new("Invalid Response", err.to_string())
                .with_code(code)
                .with_developer_reason(CONTACT_SUPPORT)],
        )
    }

    /// Render the failure as a JSON body.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "success": self.success,
            "code": self.code,
            "cause": self.cause,
            "extra": self.extra,
            "documentation": self.documentation,
            "timestamp": self.timestamp,
        })
    }
}

impl DefaultEnvelope for FailureBody {
    fn is_success(&self) -> bool {
        false
    }

    fn code(&self) -> u16 {
        self.code
    }

    fn timestamp_ms(&self) -> Option<i64> {
        Some(self.timestamp)
    }
}

/// Build the failure returned when input is rejected before any request.
///
/// The first `extra` entry is always an `Invalid Request` entry repeating the
/// cause; caller-supplied entries follow it.
#[must_use]
pub fn invalid_request(
    service: RemoteService,
    cause: impl Into<String>,
    extra: Vec<ErrorExtra>,
) -> FailureBody {
    let cause = cause.into();
    let mut entries = Vec::with_capacity(extra.len() + 1);
    entries.push(ErrorExtra::new("Invalid Request", cause.clone()).with_code(400));
    entries.extend(extra);
    FailureBody::new(service, 400, cause, entries)
}

/// Current time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Reads the boolean `success` tag of an envelope body.
#[must_use]
pub fn success_flag(body: &Value) -> Option<bool> {
    body.get("success").and_then(Value::as_bool)
}

/// Turn a transport outcome into an envelope of family `E`.
#[must_use]
pub fn resolve<E: Envelope>(service: RemoteService, outcome: Result<RawResponse>) -> E {
    match outcome {
        Ok(raw) => decode(service, raw),
        Err(err) => {
            warn!(service = %service, error = %err, "request failed");
            FailureBody::from_error(service, &err).into()
        }
    }
}

/// The `cause` of a body that reports `success: false`.
fn remote_cause(body: &Value) -> Option<String> {
    if success_flag(body) != Some(false) {
        return None;
    }
    let cause = body.get("cause")?.as_str()?;
    Some(cause.to_string())
}

/// Decode a received body into an envelope of family `E`.
///
/// For services whose bodies omit `code`, the HTTP status is written into
/// the body first. A remote failure that does not match the family's shape
/// keeps the remote `cause`.
#[must_use]
pub fn decode<E: Envelope>(service: RemoteService, raw: RawResponse) -> E {
    let RawResponse { status, mut body } = raw;

    if service.splices_status() {
        if let Value::Object(map) = &mut body {
            map.insert("code".to_string(), json!(status.as_u16()));
        }
    }

    let cause = remote_cause(&body);
    match serde_json::from_value::<E>(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            let err = Error::from(err);
            warn!(service = %service, status = %status, error = %err, "undecodable response body");
            let mut failure = FailureBody::undecodable(service, status, &err);
            if let Some(cause) = cause {
                failure.cause = cause;
            }
            failure.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal envelope family used to exercise the generic helpers.
    #[derive(Debug, Deserialize)]
    struct TestEnvelope {
        success: bool,
        code: u16,
        #[serde(default)]
        cause: Option<String>,
    }

    impl DefaultEnvelope for TestEnvelope {
        fn is_success(&self) -> bool {
            self.success
        }

        fn code(&self) -> u16 {
            self.code
        }

        fn timestamp_ms(&self) -> Option<i64> {
            None
        }
    }

    impl From<FailureBody> for TestEnvelope {
        fn from(body: FailureBody) -> Self {
            Self {
                success: false,
                code: body.code,
                cause: Some(body.cause),
            }
        }
    }

    #[test]
    fn test_invalid_request_shape() {
        let body = invalid_request(RemoteService::Seraph, INVALID_UUID_MESSAGE, vec![]);
        assert!(!body.success);
        assert_eq!(body.code, 400);
        assert_eq!(body.cause, INVALID_UUID_MESSAGE);
        assert_eq!(body.documentation, "https://docs.seraph.si");
        assert_eq!(body.extra.len(), 1);
        assert_eq!(body.extra[0].name, "Invalid Request");
        assert_eq!(body.extra[0].code, Some(400));
        assert_eq!(body.extra[0].reason, INVALID_UUID_MESSAGE);
        assert!(body.timestamp > 0);
    }

    #[test]
    fn test_invalid_request_appends_extra() {
        let body = invalid_request(
            RemoteService::Polsu,
            "bad map",
            vec![ErrorExtra::new("Map", "unknown map")],
        );
        assert_eq!(body.extra.len(), 2);
        assert_eq!(body.extra[0].name, "Invalid Request");
        assert_eq!(body.extra[1].name, "Map");
        assert_eq!(body.documentation, "https://docs.polsu.xyz");
    }

    #[test]
    fn test_timed_out_shape() {
        let body = FailureBody::timed_out(RemoteService::Polsu, 1);
        assert_eq!(body.code, 500);
        assert_eq!(
            body.cause,
            "I have timed out. Response took longer than 1 milliseconds."
        );
        assert_eq!(body.extra[0].name, "Timeout");
        assert_eq!(body.extra[0].reason, "The library has timed out.");
        assert_eq!(
            body.extra[0].developer_reason.as_deref(),
            Some(CONTACT_SUPPORT)
        );
    }

    #[test]
    fn test_to_value_matches_serialize() {
        let body = FailureBody::timed_out(RemoteService::Seraph, 5000);
        assert_eq!(body.to_value(), serde_json::to_value(&body).unwrap());
        assert_eq!(success_flag(&body.to_value()), Some(false));
    }

    #[test]
    fn test_error_extra_skips_missing_fields() {
        let json = serde_json::to_value(ErrorExtra::new("Name", "Reason")).unwrap();
        assert_eq!(json, json!({"name": "Name", "reason": "Reason"}));
    }

    #[test]
    fn test_decode_splices_status_for_polsu() {
        let raw = RawResponse {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: json!({"success": false, "cause": "slow down"}),
        };
        let envelope: TestEnvelope = decode(RemoteService::Polsu, raw);
        assert_eq!(envelope.code, 429);
        assert_eq!(envelope.cause.as_deref(), Some("slow down"));
    }

    #[test]
    fn test_decode_overrides_body_code_for_polsu() {
        let raw = RawResponse {
            status: StatusCode::OK,
            body: json!({"success": true, "code": 999}),
        };
        let envelope: TestEnvelope = decode(RemoteService::Polsu, raw);
        assert_eq!(envelope.code, 200);
    }

    #[test]
    fn test_decode_passes_seraph_body_verbatim() {
        let raw = RawResponse {
            status: StatusCode::OK,
            body: json!({"success": false, "code": 403, "cause": "locked"}),
        };
        let envelope: TestEnvelope = decode(RemoteService::Seraph, raw);
        assert_eq!(envelope.code, 403);
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_decode_undecodable_keeps_error_status() {
        let raw = RawResponse {
            status: StatusCode::BAD_GATEWAY,
            body: Value::String("<html>bad gateway</html>".to_string()),
        };
        let envelope: TestEnvelope = decode(RemoteService::Seraph, raw);
        assert_eq!(envelope.code, 502);
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_decode_mismatch_reports_parse_error() {
        let raw = RawResponse {
            status: StatusCode::OK,
            body: json!({"success": true, "code": "two hundred"}),
        };
        let envelope: TestEnvelope = decode(RemoteService::Seraph, raw);
        assert_eq!(envelope.code, 500);
        assert_eq!(
            envelope.cause.as_deref(),
            Some("The seraph API returned an unexpected response body.")
        );

        let err = Error::from(serde_json::from_str::<u16>("\"x\"").unwrap_err());
        let body = FailureBody::undecodable(RemoteService::Seraph, StatusCode::OK, &err);
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert!(body.extra[0].reason.starts_with("Failed to parse response"));
    }

    #[test]
    fn test_decode_mismatch_keeps_remote_cause() {
        let raw = RawResponse {
            status: StatusCode::FORBIDDEN,
            body: json!({"success": false, "code": "locked", "cause": "Security Alert"}),
        };
        let envelope: TestEnvelope = decode(RemoteService::Seraph, raw);
        assert_eq!(envelope.code, 403);
        assert_eq!(envelope.cause.as_deref(), Some("Security Alert"));
    }

    #[test]
    fn test_decode_mismatch_ignores_cause_on_success() {
        let raw = RawResponse {
            status: StatusCode::OK,
            body: json!({"success": true, "code": "ok", "cause": "not an error"}),
        };
        let envelope: TestEnvelope = decode(RemoteService::Seraph, raw);
        assert_ne!(envelope.cause.as_deref(), Some("not an error"));
    }

    #[test]
    fn test_resolve_folds_errors() {
        let envelope: TestEnvelope = resolve(
            RemoteService::Seraph,
            Err(Error::ServiceUnavailable("connection refused".to_string())),
        );
        assert_eq!(envelope.code, 500);
        assert_eq!(
            envelope.cause.as_deref(),
            Some("Service unavailable: connection refused")
        );
    }
}
