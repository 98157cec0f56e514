//! HTTP transport shared by the service façades.
//!
//! A [`ServiceClient`] is bound to one [`RemoteService`] and sends every
//! request with the same fixed headers and timeout. It never treats an HTTP
//! status as an error: the body is handed back together with the status so
//! the envelope decides what happened. A timeout is turned into a synthesized
//! failure body instead of an error.

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientOptions;
use crate::envelope::FailureBody;
use crate::error::{Error, Result};
use crate::types::RemoteService;

/// Value of the `Accept-Encoding` header
pub const ACCEPT_ENCODING_VALUE: &str = "gzip,deflate,compress";

/// Body and status of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status observed on the wire (500 for a synthesized timeout)
    pub status: StatusCode,
    /// Parsed JSON body; non-JSON bodies are kept as a string value
    pub body: Value,
}

/// Issues GET requests against one remote service.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a GET request to `path` (relative to the base URL) with `query`.
    ///
    /// # Errors
    ///
    /// Returns an error for transport faults other than a timeout, such as
    /// a refused connection.
    async fn get(&self, path: &str, query: Vec<(&'static str, String)>) -> Result<RawResponse>;
}

/// Build the fixed header set for `service`.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the API key or user agent is not a
/// valid header value.
pub fn default_headers(service: RemoteService, options: &ClientOptions) -> Result<HeaderMap> {
    let auth_name = HeaderName::from_bytes(service.auth_header().as_bytes())
        .map_err(|e| Error::ConfigError(format!("Invalid auth header name: {e}")))?;
    let mut api_key = HeaderValue::from_str(options.expose_api_key())?;
    api_key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(auth_name, api_key);
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(options.effective_user_agent())?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        ACCEPT_ENCODING,
        HeaderValue::from_static(ACCEPT_ENCODING_VALUE),
    );
    Ok(headers)
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    service: RemoteService,
    base_url: Url,
    headers: HeaderMap,
    timeout_ms: u64,
}

impl ServiceClientBuilder {
    /// Create a builder for `service` from validated options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail validation or cannot be encoded
    /// as headers.
    pub fn new(service: RemoteService, options: ClientOptions) -> Result<Self> {
        let options = options.validated()?;
        let headers = default_headers(service, &options)?;
        let base_url = Url::parse(service.base_url())?;

        Ok(Self {
            service,
            base_url,
            headers,
            timeout_ms: options.timeout_ms,
        })
    }

    /// Point the client at a different base URL, e.g. a local mock server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the URL cannot be parsed.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        self.base_url = normalize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be created.
    pub fn build(self) -> Result<ServiceClient> {
        let http = ClientBuilder::new()
            .default_headers(self.headers.clone())
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
            .map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to build {} HTTP client: {err}",
                    self.service
                ))
            })?;

        Ok(ServiceClient {
            http,
            service: self.service,
            base_url: self.base_url,
            headers: self.headers,
            timeout_ms: self.timeout_ms,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Preconfigured HTTP client for one remote service.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    service: RemoteService,
    base_url: Url,
    headers: HeaderMap,
    timeout_ms: u64,
}

impl ServiceClient {
    /// The service this client talks to.
    #[must_use]
    pub const fn service(&self) -> RemoteService {
        self.service
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers attached to every request.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(Error::from)
    }

    /// Timeouts become a synthesized failure body; other faults propagate.
    fn fault(&self, err: Error) -> Result<RawResponse> {
        match err {
            Error::Timeout(_) => Ok(self.timed_out()),
            err => Err(err),
        }
    }

    fn timed_out(&self) -> RawResponse {
        warn!(
            service = %self.service,
            timeout_ms = self.timeout_ms,
            "request timed out"
        );
        RawResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: FailureBody::timed_out(self.service, self.timeout_ms).to_value(),
        }
    }
}

#[async_trait]
impl Transport for ServiceClient {
    async fn get(&self, path: &str, query: Vec<(&'static str, String)>) -> Result<RawResponse> {
        let url = self.endpoint(path)?;
        debug!(service = %self.service, url = %url, "sending request");

        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(&query);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return self.fault(err.into()),
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return self.fault(err.into()),
        };
        debug!(service = %self.service, status = %status, "received response");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Ok(RawResponse { status, body })
    }
}
