//! Hooks: ordered pre-request and post-response processing.
//!
//! A [`Hook`] mutates one message (request or response) in place or vetoes
//! it with an error. Hooks compose through [`HookChain`], which runs them
//! in append order and stops at the first error. Three implementations ship
//! with the crate:
//!
//! - [`HeaderHook`] applies a header set in replace, append, or fill-in mode
//! - [`RequestDumperHook`] / [`ResponseDumperHook`] write wire-format dumps
//! - [`NoopHook`] does nothing and vanishes when appended
//!
//! Plain closures become hooks through [`request_hook`] and
//! [`response_hook`].

mod chain;
mod dump;
mod header;
mod hook;
mod noop;

pub(crate) use header::apply_headers;

pub use chain::{HookChain, RequestHooks, ResponseHooks};
pub use dump::{RequestDumperHook, ResponseDumperHook};
pub use header::HeaderHook;
pub use hook::{Hook, HookFn, HookResult, SharedHook, request_hook, response_hook};
pub use noop::NoopHook;
