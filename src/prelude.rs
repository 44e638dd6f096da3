//! Convenience re-exports for the common case.
//!
//! ```rust
//! use http_agent::prelude::*;
//! ```

pub use bytes::Bytes;
pub use http::{
    HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode, Uri, Version,
};

pub use crate::agent::Agent;
#[cfg(feature = "reqwest")]
pub use crate::client::ReqwestTransport;
pub use crate::error::{BoxError, Error, Result};
pub use crate::hooks::{
    HeaderHook, Hook, HookChain, HookFn, HookResult, NoopHook, RequestDumperHook, RequestHooks,
    ResponseDumperHook, ResponseHooks, SharedHook, request_hook, response_hook,
};
pub use crate::transport::{
    RequestTransportExt, SharedTransport, Transport, TransportFn, TransportResult, transport_fn,
};
pub use crate::{HttpRequest, HttpResponse};
