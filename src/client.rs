//! The bundled reqwest-backed transport.

use async_trait::async_trait;

use crate::HttpRequest;
use crate::transport::{Transport, TransportResult};

/// A [`Transport`] backed by a [`reqwest::Client`].
///
/// Requests and responses are fully buffered. Responses come back whatever
/// their status; classifying non-success statuses is left to response hooks
/// or the caller. The client carries its own connection pool, so transports
/// cloned from the same client share connections.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport around a freshly configured default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client, keeping its pool and TLS configuration.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> TransportResult {
        let (parts, body) = request.into_parts();
        let response = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .send()
            .await?;

        let mut rebuilt = http::Response::builder()
            .status(response.status())
            .version(response.version());
        if let Some(headers) = rebuilt.headers_mut() {
            *headers = response.headers().clone();
        }

        let body = response.bytes().await?;
        Ok(rebuilt.body(body)?)
    }
}
