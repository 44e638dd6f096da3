//! The identity hook.
//!
//! [`NoopHook`] is the do-nothing [`Hook`]: applying it leaves the message
//! untouched, and appending it to a [`HookChain`](super::HookChain) stores
//! nothing, so chain lengths only ever count hooks that do real work.

use async_trait::async_trait;

use super::hook::{Hook, HookResult, SharedHook};

/// A hook that does nothing.
///
/// Useful as a placeholder wherever a hook value is required but no
/// processing is wanted. It is the identity element of a chain: appending
/// it is a no-op.
///
/// # Example
///
/// ```rust
/// use http_agent::hooks::{NoopHook, RequestHooks};
///
/// let mut hooks = RequestHooks::new();
/// hooks.append(NoopHook);
/// assert!(hooks.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

#[async_trait]
impl<M: Send + 'static> Hook<M> for NoopHook {
    async fn call(&self, _message: &mut M) -> HookResult {
        Ok(())
    }

    fn splice_into(self, _hooks: &mut Vec<SharedHook<M>>) {}
}
