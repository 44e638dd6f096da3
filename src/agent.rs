//! The agent: decorated dispatch around a transport.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use tokio::time;
use tracing::debug;

use crate::error::{Error, Result};
use crate::hooks::{Hook, RequestHooks, ResponseHooks, apply_headers};
use crate::transport::{RequestTransportExt, SharedTransport, Transport};
use crate::{HttpRequest, HttpResponse};

/// An HTTP dispatcher that decorates a [`Transport`] with default headers,
/// request and response hooks, and an optional per-call timeout.
///
/// Configuration lives in plain public fields and there is no interior
/// mutability: finish configuring the agent, then share it. `&Agent` and
/// clones are safe for concurrent [`execute`](Self::execute) calls, and
/// reconfiguring requires `&mut Agent`, which the borrow checker keeps
/// exclusive. To branch off a variant, clone the agent or derive one with
/// [`with_transport`](Self::with_transport) and reconfigure the copy.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use http_agent::agent::Agent;
/// use http_agent::client::ReqwestTransport;
/// use http_agent::hooks::request_hook;
///
/// let mut agent = Agent::new(ReqwestTransport::new());
/// agent.default_headers.insert("user-agent", "http-agent/0.1".parse()?);
/// agent.request_hooks.append(request_hook(|req| {
///     req.headers_mut().insert("x-request-id", "42".parse()?);
///     Ok(())
/// }));
///
/// let request = http::Request::builder()
///     .uri("https://example.com/")
///     .body(Bytes::new())?;
/// let response = agent.execute(request).await?;
/// ```
#[non_exhaustive]
#[derive(Clone)]
pub struct Agent {
    /// The transport used when a request carries no override.
    transport: SharedTransport,
    /// Bound on each transport call; `None` leaves calls unbounded.
    pub default_timeout: Option<Duration>,
    /// Headers applied to every request, skipping names the caller set.
    ///
    /// Read fresh on every dispatch, so changes between calls take effect.
    pub default_headers: HeaderMap,
    /// Hooks run against the request before the transport call.
    pub request_hooks: RequestHooks,
    /// Hooks run against the response after the transport call.
    pub response_hooks: ResponseHooks,
}

impl Agent {
    /// Creates an agent around `transport` with no timeout, no default
    /// headers, and empty hook chains.
    #[must_use]
    pub fn new<T>(transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self::from_shared(Arc::new(transport))
    }

    /// Creates an agent around an already shared transport.
    #[must_use]
    pub fn from_shared(transport: SharedTransport) -> Self {
        Self {
            transport,
            default_timeout: None,
            default_headers: HeaderMap::new(),
            request_hooks: RequestHooks::new(),
            response_hooks: ResponseHooks::new(),
        }
    }

    /// The transport used when a request carries no override.
    #[must_use]
    pub fn transport(&self) -> &SharedTransport {
        &self.transport
    }

    /// Derives an agent around a different transport.
    ///
    /// The timeout, default headers, and hook chains are copied;
    /// reconfiguring either agent afterwards never affects the other.
    #[must_use]
    pub fn with_transport<T>(&self, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        self.with_shared_transport(Arc::new(transport))
    }

    /// Derives an agent around an already shared transport; see
    /// [`with_transport`](Self::with_transport).
    #[must_use]
    pub fn with_shared_transport(&self, transport: SharedTransport) -> Self {
        Self {
            transport,
            default_timeout: self.default_timeout,
            default_headers: self.default_headers.clone(),
            request_hooks: self.request_hooks.clone(),
            response_hooks: self.response_hooks.clone(),
        }
    }

    /// Dispatches `request` through the hook pipeline.
    ///
    /// Stages run in a fixed order:
    ///
    /// 1. [`default_headers`](Self::default_headers) are applied, skipping
    ///    names the caller already set;
    /// 2. [`request_hooks`](Self::request_hooks) run, aborting on the first
    ///    error;
    /// 3. the transport is resolved: the request's
    ///    [override](crate::transport::RequestTransportExt) when attached,
    ///    this agent's own otherwise;
    /// 4. the transport call runs, bounded by
    ///    [`default_timeout`](Self::default_timeout) when set (an enclosing
    ///    deadline on the caller's side composes with it, and whichever is
    ///    earlier fires first);
    /// 5. [`response_hooks`](Self::response_hooks) run against the mutable
    ///    response.
    ///
    /// # Errors
    ///
    /// The first failure of any stage: [`Error::RequestHook`] before the
    /// transport was called, [`Error::Transport`] or [`Error::Timeout`]
    /// from the call itself, [`Error::ResponseHook`] after it. On error no
    /// response is returned; on success the response passed every response
    /// hook.
    pub async fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method(), uri = %request.uri(), "dispatching request");

        apply_headers(&self.default_headers, request.headers_mut(), false, true);

        self.request_hooks
            .call(&mut request)
            .await
            .map_err(Error::RequestHook)?;

        let transport = request
            .transport_override()
            .unwrap_or_else(|| Arc::clone(&self.transport));

        let send = transport.send(request);
        let mut response = match self.default_timeout {
            Some(timeout) => time::timeout(timeout, send)
                .await
                .map_err(|_| Error::timeout(timeout))?,
            None => send.await,
        }
        .map_err(Error::Transport)?;

        self.response_hooks
            .call(&mut response)
            .await
            .map_err(Error::ResponseHook)?;

        debug!(status = %response.status(), "request dispatched");
        Ok(response)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("default_timeout", &self.default_timeout)
            .field("default_headers", &self.default_headers)
            .field("request_hooks", &self.request_hooks)
            .field("response_hooks", &self.response_hooks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bytes::Bytes;
    use http::HeaderValue;

    use super::*;
    use crate::hooks::request_hook;
    use crate::transport::transport_fn;

    fn stub_transport() -> SharedTransport {
        Arc::new(transport_fn(|_req| async {
            Ok(http::Response::builder().status(200).body(Bytes::new())?)
        }))
    }

    #[test]
    fn new_starts_unconfigured() {
        let agent = Agent::from_shared(stub_transport());
        assert!(agent.default_timeout.is_none());
        assert!(agent.default_headers.is_empty());
        assert!(agent.request_hooks.is_empty());
        assert!(agent.response_hooks.is_empty());
    }

    #[test]
    fn transport_accessor_returns_the_default() {
        let transport = stub_transport();
        let agent = Agent::from_shared(Arc::clone(&transport));
        assert!(Arc::ptr_eq(agent.transport(), &transport));
    }

    #[test]
    fn with_transport_copies_configuration() {
        let mut original = Agent::from_shared(stub_transport());
        original.default_timeout = Some(Duration::from_secs(5));
        original
            .default_headers
            .insert("x-team", HeaderValue::from_static("core"));
        original.request_hooks.append(request_hook(|_| Ok(())));

        let derived = original.with_shared_transport(stub_transport());

        assert_eq!(derived.default_timeout, Some(Duration::from_secs(5)));
        assert_eq!(derived.default_headers.get("x-team").unwrap(), "core");
        assert_eq!(derived.request_hooks.len(), 1);
        assert!(!Arc::ptr_eq(derived.transport(), original.transport()));
    }

    #[test]
    fn with_transport_is_independent_both_ways() {
        let mut original = Agent::from_shared(stub_transport());
        original.request_hooks.append(request_hook(|_| Ok(())));

        let mut derived = original.with_shared_transport(stub_transport());
        derived.request_hooks.append(request_hook(|_| Ok(())));
        derived
            .default_headers
            .insert("x-derived", HeaderValue::from_static("only"));

        assert_eq!(original.request_hooks.len(), 1);
        assert_eq!(derived.request_hooks.len(), 2);
        assert!(original.default_headers.get("x-derived").is_none());

        original
            .default_headers
            .insert("x-original", HeaderValue::from_static("only"));
        assert!(derived.default_headers.get("x-original").is_none());
    }

    #[test]
    fn clone_shares_the_transport() {
        let agent = Agent::from_shared(stub_transport());
        let cloned = agent.clone();
        assert!(Arc::ptr_eq(agent.transport(), cloned.transport()));
    }

    #[test]
    fn debug_omits_the_transport() {
        let agent = Agent::from_shared(stub_transport());
        let shown = format!("{agent:?}");
        assert!(shown.contains("default_timeout"));
        assert!(shown.contains(".."));
    }
}
