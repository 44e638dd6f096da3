//! Default-header application with replace, append, and fill-in modes.

use async_trait::async_trait;
use http::HeaderMap;

use super::hook::{Hook, HookResult};
use crate::HttpRequest;

/// A request hook that applies a configured set of headers.
///
/// For each configured header name the hook either replaces the request's
/// existing values, appends after them, or leaves the request alone when
/// the name is already present:
///
/// - [`set`](Self::set) replaces whatever the request carries
/// - [`add`](Self::add) appends after existing values
/// - [`defaulting`](Self::defaulting) fills in only absent names
///
/// Names compare case-insensitively, as header names always do. When the
/// configuration carries several values for one name, only the first is
/// applied. The hook itself never fails.
///
/// # Example
///
/// ```rust
/// use http::HeaderMap;
/// use http_agent::hooks::HeaderHook;
///
/// let mut defaults = HeaderMap::new();
/// defaults.insert("user-agent", "http-agent/0.1".parse()?);
/// let hook = HeaderHook::defaulting(defaults);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderHook {
    /// Headers to apply to the request.
    pub headers: HeaderMap,
    /// Append after existing values instead of replacing them.
    pub add: bool,
    /// Leave names the request already carries untouched.
    pub skip_if_exists: bool,
}

impl HeaderHook {
    /// A hook that replaces existing values with `headers`.
    #[must_use]
    pub fn set(headers: HeaderMap) -> Self {
        Self {
            headers,
            add: false,
            skip_if_exists: false,
        }
    }

    /// A hook that appends `headers` after any existing values.
    #[must_use]
    pub fn add(headers: HeaderMap) -> Self {
        Self {
            headers,
            add: true,
            skip_if_exists: false,
        }
    }

    /// A hook that fills in `headers` only where the request has none.
    #[must_use]
    pub fn defaulting(headers: HeaderMap) -> Self {
        Self {
            headers,
            add: false,
            skip_if_exists: true,
        }
    }

    /// Applies the configured headers to `target`.
    pub fn apply(&self, target: &mut HeaderMap) {
        apply_headers(&self.headers, target, self.add, self.skip_if_exists);
    }
}

#[async_trait]
impl Hook<HttpRequest> for HeaderHook {
    async fn call(&self, message: &mut HttpRequest) -> HookResult {
        self.apply(message.headers_mut());
        Ok(())
    }
}

/// Applies `config` to `target`, one configured name at a time.
///
/// Only the first configured value per name is used. `skip_if_exists` wins
/// over `add` when both are set.
pub(crate) fn apply_headers(
    config: &HeaderMap,
    target: &mut HeaderMap,
    add: bool,
    skip_if_exists: bool,
) {
    for name in config.keys() {
        if skip_if_exists && target.contains_key(name) {
            continue;
        }
        let Some(value) = config.get(name) else {
            continue;
        };
        if add {
            target.append(name.clone(), value.clone());
        } else {
            target.insert(name.clone(), value.clone());
        }
    }
}
