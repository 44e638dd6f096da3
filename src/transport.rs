//! The transport capability and per-request overrides.
//!
//! A [`Transport`] is the one capability an [`Agent`](crate::agent::Agent)
//! requires of its HTTP backend: send a buffered request, produce a
//! buffered response. The bundled
//! [`ReqwestTransport`](crate::client::ReqwestTransport) implements it for
//! real network traffic, [`transport_fn`] lifts an async closure for tests
//! and small adapters, and [`RequestTransportExt`] routes a single request
//! through a different transport without touching the agent.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::{HttpRequest, HttpResponse};

/// A shared, thread-safe [`Transport`] trait object.
pub type SharedTransport = Arc<dyn Transport>;

/// The outcome of a transport send.
pub type TransportResult = std::result::Result<HttpResponse, BoxError>;

/// The request-dispatch capability an agent delegates network I/O to.
///
/// Implementations receive the fully processed request (default headers and
/// request hooks already applied) and return either a response or an error.
/// The error is surfaced verbatim as the source of
/// [`Error::Transport`](crate::Error::Transport); producing a response for
/// non-success statuses is expected, classifying them is not the
/// transport's job.
///
/// # Object Safety
///
/// This trait is object-safe and is normally used as [`SharedTransport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and produces a response.
    ///
    /// # Errors
    ///
    /// Any error the backend fails with, passed through verbatim.
    async fn send(&self, request: HttpRequest) -> TransportResult;
}

/// Adapter that runs an async function as a [`Transport`].
///
/// Values are created through [`transport_fn`], which fixes the argument
/// type so closures infer cleanly.
pub struct TransportFn<F> {
    f: F,
}

impl<F> fmt::Debug for TransportFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = TransportResult> + Send,
{
    async fn send(&self, request: HttpRequest) -> TransportResult {
        (self.f)(request).await
    }
}

/// Lifts an async function into a [`Transport`].
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use http_agent::transport::transport_fn;
///
/// let stub = transport_fn(|_req| async {
///     Ok(http::Response::builder()
///         .status(204)
///         .body(Bytes::new())?)
/// });
/// ```
#[must_use]
pub fn transport_fn<F, Fut>(f: F) -> TransportFn<F>
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = TransportResult> + Send,
{
    TransportFn { f }
}

/// Typed extension entry carrying a per-request transport override.
#[derive(Clone)]
struct TransportOverride(SharedTransport);

/// Request extensions for per-call transport routing.
///
/// The agent consults the override in its transport-resolution stage; the
/// rest of the dispatch (headers, hooks, timeout) is unchanged. Useful for
/// steering one request through a recording or stubbed transport while the
/// agent keeps its default for everything else.
pub trait RequestTransportExt {
    /// Attaches `transport` as this request's transport override.
    ///
    /// An override attached earlier is replaced.
    #[must_use]
    fn with_transport_override(self, transport: SharedTransport) -> Self;

    /// The transport override attached to this request, if any.
    fn transport_override(&self) -> Option<SharedTransport>;
}

impl<B> RequestTransportExt for http::Request<B> {
    fn with_transport_override(mut self, transport: SharedTransport) -> Self {
        self.extensions_mut().insert(TransportOverride(transport));
        self
    }

    fn transport_override(&self) -> Option<SharedTransport> {
        self.extensions()
            .get::<TransportOverride>()
            .map(|o| Arc::clone(&o.0))
    }
}
