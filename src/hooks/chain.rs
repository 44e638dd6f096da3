//! Ordered hook chains with flattening append.

use std::fmt;

use async_trait::async_trait;

use super::hook::{Hook, HookResult, SharedHook};
use crate::{HttpRequest, HttpResponse};

/// Hooks applied to outgoing requests, in order.
pub type RequestHooks = HookChain<HttpRequest>;

/// Hooks applied to received responses, in order.
pub type ResponseHooks = HookChain<HttpResponse>;

/// An ordered sequence of hooks executed against one message.
///
/// `HookChain` is itself a [`Hook`], so chains compose: appending one chain
/// to another splices the appended hooks in individually, never as a nested
/// sub-chain, and appending [`NoopHook`](super::NoopHook) stores nothing.
/// [`len`](Self::len) therefore always reports the flattened hook count.
///
/// Execution is fail-fast: hooks run in append order against the same
/// message and the first error aborts the rest of the chain. Mutations made
/// by hooks that already ran remain visible on the message.
pub struct HookChain<M: 'static> {
    hooks: Vec<SharedHook<M>>,
}

impl<M: 'static> HookChain<M> {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Appends a hook, consuming it.
    ///
    /// The hook decides how it joins the chain: most hooks are stored as a
    /// single element, a chain splices its hooks in one by one, and the
    /// no-op hook is elided. Append a [`clone`](Clone::clone) to keep using
    /// a chain after splicing it into another.
    pub fn append<H>(&mut self, hook: H)
    where
        H: Hook<M> + 'static,
    {
        hook.splice_into(&mut self.hooks);
    }

    /// Number of hooks in the chain, counting spliced chains element-wise.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether the chain contains no hooks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

// Hand-written impls: derives would place their bounds on `M`, but only the
// hook storage is involved.

impl<M: 'static> Default for HookChain<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: 'static> Clone for HookChain<M> {
    fn clone(&self) -> Self {
        Self {
            hooks: self.hooks.clone(),
        }
    }
}

impl<M: 'static> fmt::Debug for HookChain<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain")
            .field("len", &self.hooks.len())
            .finish()
    }
}

#[async_trait]
impl<M> Hook<M> for HookChain<M>
where
    M: Send + 'static,
{
    async fn call(&self, message: &mut M) -> HookResult {
        for hook in &self.hooks {
            hook.call(message).await?;
        }
        Ok(())
    }

    fn splice_into(self, hooks: &mut Vec<SharedHook<M>>) {
        hooks.extend(self.hooks);
    }
}
