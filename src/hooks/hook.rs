//! The hook contract and the closure adapter.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::{HttpRequest, HttpResponse};

/// A shared, thread-safe [`Hook`] trait object.
pub type SharedHook<M> = std::sync::Arc<dyn Hook<M>>;

/// The outcome of a single hook application.
pub type HookResult = std::result::Result<(), BoxError>;

/// One unit of processing applied to an HTTP message.
///
/// Request hooks implement `Hook<HttpRequest>`, response hooks
/// `Hook<HttpResponse>`. A hook may mutate the message in place; returning
/// an error aborts the rest of its chain and the dispatch it runs in, with
/// the error surfaced to the caller unchanged.
///
/// # Object Safety
///
/// This trait is object-safe and is normally used as [`SharedHook`].
#[async_trait]
pub trait Hook<M>: Send + Sync
where
    M: 'static,
{
    /// Applies this hook to the message.
    ///
    /// # Errors
    ///
    /// Any error vetoes the message and is passed through verbatim.
    async fn call(&self, message: &mut M) -> HookResult;

    /// Adds this hook to a chain's backing storage.
    ///
    /// The default stores the hook as a single element.
    /// [`NoopHook`](crate::hooks::NoopHook) overrides it to store nothing
    /// and [`HookChain`](crate::hooks::HookChain) overrides it to splice
    /// its hooks in one by one, which is what keeps chains flat.
    fn splice_into(self, hooks: &mut Vec<SharedHook<M>>)
    where
        Self: Sized + 'static,
    {
        hooks.push(Arc::new(self));
    }
}

/// Adapter that runs a plain function as a [`Hook`].
///
/// Values are created through [`request_hook`] and [`response_hook`], which
/// fix the message type so closure arguments infer cleanly.
pub struct HookFn<F> {
    f: F,
}

impl<F> fmt::Debug for HookFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<M, F> Hook<M> for HookFn<F>
where
    M: Send + 'static,
    F: Fn(&mut M) -> HookResult + Send + Sync,
{
    async fn call(&self, message: &mut M) -> HookResult {
        (self.f)(message)
    }
}

/// Wraps a function as a request hook.
///
/// # Example
///
/// ```rust
/// use http_agent::hooks::request_hook;
///
/// let hook = request_hook(|req| {
///     req.headers_mut()
///         .insert("x-request-id", "42".parse()?);
///     Ok(())
/// });
/// ```
#[must_use]
pub fn request_hook<F>(f: F) -> HookFn<F>
where
    F: Fn(&mut HttpRequest) -> HookResult + Send + Sync,
{
    HookFn { f }
}

/// Wraps a function as a response hook.
///
/// # Example
///
/// ```rust
/// use http_agent::hooks::response_hook;
///
/// let hook = response_hook(|res| {
///     if res.status().is_server_error() {
///         return Err("upstream is failing".into());
///     }
///     Ok(())
/// });
/// ```
#[must_use]
pub fn response_hook<F>(f: F) -> HookFn<F>
where
    F: Fn(&mut HttpResponse) -> HookResult + Send + Sync,
{
    HookFn { f }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use bytes::Bytes;
    use http::HeaderValue;

    fn request() -> HttpRequest {
        http::Request::builder()
            .uri("http://example.com/")
            .body(Bytes::new())
            .unwrap()
    }

    fn response() -> HttpResponse {
        http::Response::builder()
            .status(200)
            .body(Bytes::new())
            .unwrap()
    }

    #[tokio::test]
    async fn request_hook_mutates_message() {
        let hook = request_hook(|req| {
            req.headers_mut()
                .insert("x-marker", HeaderValue::from_static("1"));
            Ok(())
        });

        let mut req = request();
        hook.call(&mut req).await.unwrap();
        assert_eq!(req.headers().get("x-marker").unwrap(), "1");
    }

    #[tokio::test]
    async fn response_hook_mutates_message() {
        let hook = response_hook(|res| {
            *res.status_mut() = http::StatusCode::IM_A_TEAPOT;
            Ok(())
        });

        let mut res = response();
        hook.call(&mut res).await.unwrap();
        assert_eq!(res.status(), http::StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn hook_error_passes_through_verbatim() {
        let hook = request_hook(|_| Err("rejected".into()));

        let mut req = request();
        let err = hook.call(&mut req).await.unwrap_err();
        assert_eq!(err.to_string(), "rejected");
    }

    #[test]
    fn into_shared() {
        let _: SharedHook<HttpRequest> = Arc::new(request_hook(|_| Ok(())));
        let _: SharedHook<HttpResponse> = Arc::new(response_hook(|_| Ok(())));
    }

    #[test]
    fn debug_impl() {
        let hook = request_hook(|_| Ok(()));
        assert!(format!("{hook:?}").contains("HookFn"));
    }
}
