//! Outbound HTTP transport.
//!
//! # Responsibilities
//! - Issue a single GET to an upstream decoding service
//! - Enforce connect and total timeouts on every call
//! - Cap the upstream body size before buffering it
//! - Hand back status and raw body; interpretation is the router's job
//!
//! # Design Decisions
//! - The router depends on the [`HttpTransport`] trait, so tests swap in
//!   canned transports without a network
//! - No retries: one call per decode
//! - Error messages never carry the request URL (the plate URL holds the key)

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::config::schema::DEFAULT_MAX_RESPONSE_BYTES;
use crate::config::TimeoutConfig;

/// Status and body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Errors raised by a transport before a complete response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The call exceeded the configured upstream timeout.
    #[error("timed out after {0}s")]
    Timeout(u64),

    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The response body exceeded the configured limit.
    #[error("response body exceeded {0} bytes")]
    ResponseTooLarge(usize),

    /// Any other request or body read failure.
    #[error("{0}")]
    Request(String),

    /// The HTTP client could not be built.
    #[error("client setup failed: {0}")]
    Client(String),
}

/// A minimal async HTTP GET client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, TransportError>;
}

/// Production transport backed by a pooled `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout_secs: u64,
    max_response_bytes: usize,
}

impl ReqwestTransport {
    /// Build a transport honoring the upstream and connect timeouts.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .user_agent(concat!("vehicle-decoder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Client(e.without_url().to_string()))?;

        Ok(Self::with_client(client, timeouts.upstream_secs))
    }

    /// Wrap a preconfigured client. `timeout_secs` should match the client's
    /// total timeout; it is only used for error reporting.
    pub fn with_client(client: reqwest::Client, timeout_secs: u64) -> Self {
        Self {
            client,
            timeout_secs,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }

    /// Reject upstream bodies larger than `bytes`.
    pub fn with_response_limit(mut self, bytes: usize) -> Self {
        self.max_response_bytes = bytes;
        self
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            TransportError::Connect(e.without_url().to_string())
        } else {
            TransportError::Request(e.without_url().to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, TransportError> {
        let mut response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let limit = self.max_response_bytes;
        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(TransportError::ResponseTooLarge(limit));
        }

        // Content-Length may be absent or wrong, so count as we read.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_error(e))? {
            if body.len() + chunk.len() > limit {
                return Err(TransportError::ResponseTooLarge(limit));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(UpstreamResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn short_timeouts() -> TimeoutConfig {
        TimeoutConfig {
            request_secs: 5,
            upstream_secs: 1,
            connect_secs: 1,
        }
    }

    // Bypass any proxy configured in the test environment.
    fn local_transport() -> ReqwestTransport {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .connect_timeout(Duration::from_secs(1))
            .no_proxy()
            .build()
            .unwrap();
        ReqwestTransport::with_client(client, 1)
    }

    /// Serve one raw HTTP response on an ephemeral port.
    async fn serve_once(response: String) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        addr
    }

    #[tokio::test]
    async fn test_declared_oversized_body_is_rejected() {
        let body = "x".repeat(64);
        let addr = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ))
        .await;

        let transport = local_transport().with_response_limit(16);
        let url = Url::parse(&format!("http://{}/x", addr)).unwrap();
        let err = transport.get(&url).await.unwrap_err();

        assert_eq!(err, TransportError::ResponseTooLarge(16));
    }

    #[tokio::test]
    async fn test_undeclared_oversized_body_is_rejected() {
        let addr = serve_once(format!(
            "HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n{}",
            "x".repeat(64)
        ))
        .await;

        let transport = local_transport().with_response_limit(16);
        let url = Url::parse(&format!("http://{}/x", addr)).unwrap();
        let err = transport.get(&url).await.unwrap_err();

        assert_eq!(err, TransportError::ResponseTooLarge(16));
    }

    #[tokio::test]
    async fn test_body_at_limit_is_accepted() {
        let body = "x".repeat(16);
        let addr = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ))
        .await;

        let transport = local_transport().with_response_limit(16);
        let url = Url::parse(&format!("http://{}/x", addr)).unwrap();
        let response = transport.get(&url).await.unwrap();

        assert_eq!(response.body, body.into_bytes());
    }

    #[test]
    fn test_new_builds_from_config() {
        assert!(ReqwestTransport::new(&short_timeouts()).is_ok());
    }

    #[tokio::test]
    async fn test_reqwest_transport_returns_status_and_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let body = r#"{"ok":true}"#;
            let response = format!(
                "HTTP/1.1 503 Service Unavailable\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        let transport = local_transport();
        let url = Url::parse(&format!("http://{}/x", addr)).unwrap();
        let response = transport.get(&url).await.unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(response.body, br#"{"ok":true}"#.to_vec());
    }

    #[tokio::test]
    async fn test_reqwest_transport_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let transport = local_transport();
        let url = Url::parse(&format!("http://{}/slow?key=s3cret", addr)).unwrap();
        let err = transport.get(&url).await.unwrap_err();

        assert_eq!(err, TransportError::Timeout(1));
        assert!(!err.to_string().contains("s3cret"));
    }

    #[tokio::test]
    async fn test_reqwest_transport_connection_refused() {
        // Bind then drop to get a port nobody listens on.
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();

        let transport = local_transport();
        let url = Url::parse(&format!("http://{}/?key=s3cret", addr)).unwrap();
        let err = transport.get(&url).await.unwrap_err();

        assert!(matches!(err, TransportError::Connect(_)));
        assert!(!err.to_string().contains("s3cret"));
    }
}
