//! Error types for agent dispatch.
//!
//! Every failure of [`Agent::execute`](crate::agent::Agent::execute)
//! surfaces here, split by the pipeline stage that produced it:
//!
//! - Request hook aborts (before any transport call)
//! - Transport failures, passed through verbatim as the source
//! - The agent's own timeout elapsing
//! - Response hook aborts (after the transport call)

use std::time::Duration;

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error type hooks and transports fail with.
///
/// Hooks and transports may fail with any error type; the agent wraps
/// whatever they return without interpreting it.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type for agent dispatch.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A request hook aborted the dispatch before the transport was called.
    #[error("request hook error: {0}")]
    RequestHook(#[source] BoxError),

    /// A response hook rejected the response after the transport call.
    #[error("response hook error: {0}")]
    ResponseHook(#[source] BoxError),

    /// The transport failed to produce a response.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The agent's default timeout elapsed before the transport returned.
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// The configured timeout that elapsed.
        timeout: Duration,
    },
}

impl Error {
    /// Create a timeout error.
    #[must_use]
    pub const fn timeout(timeout: Duration) -> Self {
        Self::Timeout { timeout }
    }

    /// Check if this is the agent's own timeout elapsing.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if a request or response hook produced this error.
    #[must_use]
    pub const fn is_hook(&self) -> bool {
        matches!(self, Self::RequestHook(_) | Self::ResponseHook(_))
    }

    /// Check if the transport produced this error.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
