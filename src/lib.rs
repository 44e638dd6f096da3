//! http-agent - A decorator layer for HTTP clients
//!
//! This crate wraps any [`transport::Transport`] in an [`agent::Agent`] that
//! applies default headers, runs ordered request and response hooks, and
//! bounds each call with an optional timeout.

pub mod agent;
#[cfg(feature = "reqwest")]
pub mod client;
pub mod error;
pub mod hooks;
pub mod prelude;
pub mod transport;

pub use error::{BoxError, Error, Result};

use bytes::Bytes;

/// The request type the agent and its hooks operate on.
pub type HttpRequest = http::Request<Bytes>;

/// The response type the agent and its hooks operate on.
pub type HttpResponse = http::Response<Bytes>;
