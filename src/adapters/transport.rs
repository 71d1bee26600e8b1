//! Fetch collaborator
//!
//! The extraction core only needs "fetch these bytes from this URL with these
//! headers". [`Transport`] is that seam; [`HttpTransport`] implements it over
//! `reqwest`. Tests substitute their own implementation or point an
//! `HttpTransport` at a mock server.

use crate::config::SecretString;
use crate::domain::{ChompError, Result, TransportError};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// A single GET request
///
/// Header values are held as secrets: the only header the extractor sends is
/// the bearer token, and `Debug` output of a request must not leak it.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Fully built request URL including query string
    pub url: Url,

    /// Header name/value pairs
    pub headers: Vec<(String, SecretString)>,
}

impl FetchRequest {
    /// Create a request without headers
    pub fn new(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: SecretString) -> Self {
        self.headers.push((name.into(), value));
        self
    }

    /// Look up a header value by name, case-insensitively
    pub fn header(&self, name: &str) -> Option<&SecretString> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

/// Abstract fetch: issue one request and return the raw response body
///
/// Implementations must not retry; the caller decides whether to call again.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the body of `request`
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on network failure, timeout or a non-2xx
    /// status.
    async fn fetch(&self, request: &FetchRequest) -> std::result::Result<Vec<u8>, TransportError>;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns [`ChompError::Configuration`] if the HTTP client cannot be built
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(30).min(timeout))
            .user_agent(concat!("chomp-sendgrid/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChompError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &FetchRequest) -> std::result::Result<Vec<u8>, TransportError> {
        let mut builder = self.client.get(request.url.clone());

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidRequest(format!("header name: {e}")))?;
            let mut value = HeaderValue::from_str(value.expose_secret().as_ref())
                .map_err(|e| TransportError::InvalidRequest(format!("header value: {e}")))?;
            value.set_sensitive(true);
            builder = builder.header(name, value);
        }

        tracing::debug!(url = %request.url, "Sending request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), url = %request.url, "Request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::ConnectionFailed(e.to_string())
            }
        })?;

        tracing::debug!(bytes = bytes.len(), "Received response");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_request_debug_redacts_headers() {
        let request = FetchRequest::new(Url::parse("https://example.com/stats").unwrap())
            .with_header("Authorization", secret_string("Bearer SG.secret".to_string()));

        let debug_output = format!("{request:?}");
        assert!(!debug_output.contains("SG.secret"));
        assert!(debug_output.contains("example.com"));
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let request = FetchRequest::new(Url::parse("https://example.com").unwrap())
            .with_header("Authorization", secret_string("Bearer k".to_string()));

        assert!(request.header("authorization").is_some());
        assert!(request.header("accept").is_none());
    }

    #[tokio::test]
    async fn test_http_transport_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/stats")
            .match_header("authorization", "Bearer k")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let request = FetchRequest::new(Url::parse(&format!("{}/stats", server.url())).unwrap())
            .with_header("Authorization", secret_string("Bearer k".to_string()));

        let body = transport.fetch(&request).await.unwrap();
        assert_eq!(body, b"[]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_transport_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/stats")
            .with_status(403)
            .with_body(r#"{"errors":[{"message":"access forbidden"}]}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let request = FetchRequest::new(Url::parse(&format!("{}/stats", server.url())).unwrap());

        match transport.fetch(&request).await {
            Err(TransportError::Status { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("access forbidden"));
            }
            other => panic!("Expected status error, got {other:?}"),
        }
    }
}
