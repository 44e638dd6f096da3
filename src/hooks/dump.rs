//! Wire-format dump hooks for debugging traffic.
//!
//! [`RequestDumperHook`] and [`ResponseDumperHook`] write the message they
//! see to any [`Write`] sink: start line, headers, a blank line, the
//! buffered body, and then a single trailing newline so consecutive dumps
//! stay separated. The output is a debugging aid rather than a byte-exact
//! wire capture: header names print lowercase, and a `host` line is
//! synthesized from the request URI when the caller has not set one.

use std::fmt;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use http::HeaderMap;

use super::hook::{Hook, HookResult};
use crate::{HttpRequest, HttpResponse};

/// A request hook that dumps outgoing requests to a sink.
///
/// The sink sits behind a mutex, so one dumper can serve concurrent
/// dispatches; whole dumps never interleave. A write failure aborts the
/// dispatch like any hook error, and whatever part of the dump was already
/// written stays in the sink.
pub struct RequestDumperHook<W> {
    sink: Mutex<W>,
}

impl<W> RequestDumperHook<W> {
    /// Creates a dumper writing to `sink`.
    #[must_use]
    pub const fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Consumes the hook and returns the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> fmt::Debug for RequestDumperHook<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDumperHook").finish_non_exhaustive()
    }
}

#[async_trait]
impl<W> Hook<HttpRequest> for RequestDumperHook<W>
where
    W: Write + Send,
{
    async fn call(&self, message: &mut HttpRequest) -> HookResult {
        let dump = dump_request(message);
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(&dump)?;
        Ok(())
    }
}

/// A response hook that dumps received responses to a sink.
///
/// Same sink handling as [`RequestDumperHook`].
pub struct ResponseDumperHook<W> {
    sink: Mutex<W>,
}

impl<W> ResponseDumperHook<W> {
    /// Creates a dumper writing to `sink`.
    #[must_use]
    pub const fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Consumes the hook and returns the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> fmt::Debug for ResponseDumperHook<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseDumperHook").finish_non_exhaustive()
    }
}

#[async_trait]
impl<W> Hook<HttpResponse> for ResponseDumperHook<W>
where
    W: Write + Send,
{
    async fn call(&self, message: &mut HttpResponse) -> HookResult {
        let dump = dump_response(message);
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(&dump)?;
        Ok(())
    }
}

fn dump_request(request: &HttpRequest) -> Vec<u8> {
    let path = request
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str());
    let mut head = format!(
        "{} {} {:?}\r\n",
        request.method(),
        path,
        request.version()
    );
    if !request.headers().contains_key(http::header::HOST) {
        if let Some(authority) = request.uri().authority() {
            head.push_str(&format!("host: {authority}\r\n"));
        }
    }
    push_headers(&mut head, request.headers());
    head.push_str("\r\n");
    finish(head, request.body())
}

fn dump_response(response: &HttpResponse) -> Vec<u8> {
    let mut head = format!("{:?} {}\r\n", response.version(), response.status());
    push_headers(&mut head, response.headers());
    head.push_str("\r\n");
    finish(head, response.body())
}

fn push_headers(head: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        head.push_str(name.as_str());
        head.push_str(": ");
        head.push_str(&String::from_utf8_lossy(value.as_bytes()));
        head.push_str("\r\n");
    }
}

fn finish(head: String, body: &[u8]) -> Vec<u8> {
    let mut out = head.into_bytes();
    out.extend_from_slice(body);
    out.push(b'\n');
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use bytes::Bytes;

    use super::*;

    /// Sink that accepts `capacity` bytes and then fails.
    struct LimitedSink {
        written: Vec<u8>,
        capacity: usize,
    }

    impl LimitedSink {
        fn new(capacity: usize) -> Self {
            Self {
                written: Vec::new(),
                capacity,
            }
        }
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() >= self.capacity {
                return Err(io::Error::other("sink full"));
            }
            let take = buf.len().min(self.capacity - self.written.len());
            self.written.extend_from_slice(&buf[..take]);
            Ok(take)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn request() -> HttpRequest {
        http::Request::builder()
            .method(http::Method::POST)
            .uri("http://example.com/search?q=1")
            .header("x-token", "t")
            .body(Bytes::from_static(b"ping"))
            .unwrap()
    }

    fn response() -> HttpResponse {
        http::Response::builder()
            .status(404)
            .header("content-type", "text/plain")
            .body(Bytes::from_static(b"missing"))
            .unwrap()
    }

    #[tokio::test]
    async fn request_dump_has_wire_shape() {
        let hook = RequestDumperHook::new(Vec::new());
        let mut req = request();
        hook.call(&mut req).await.unwrap();

        let dump = String::from_utf8(hook.into_inner()).unwrap();
        assert!(dump.starts_with("POST /search?q=1 HTTP/1.1\r\n"));
        assert!(dump.contains("host: example.com\r\n"));
        assert!(dump.contains("x-token: t\r\n"));
        assert!(dump.contains("\r\n\r\n"));
        assert!(dump.ends_with("ping\n"));
    }

    #[tokio::test]
    async fn request_dump_keeps_explicit_host() {
        let hook = RequestDumperHook::new(Vec::new());
        let mut req = http::Request::builder()
            .uri("http://example.com/")
            .header("host", "override.test")
            .body(Bytes::new())
            .unwrap();
        hook.call(&mut req).await.unwrap();

        let dump = String::from_utf8(hook.into_inner()).unwrap();
        assert!(dump.contains("host: override.test\r\n"));
        assert_eq!(dump.matches("host:").count(), 1);
    }

    #[tokio::test]
    async fn request_dump_ends_with_single_newline() {
        let hook = RequestDumperHook::new(Vec::new());
        let mut req = request();
        hook.call(&mut req).await.unwrap();

        let dump = hook.into_inner();
        assert_eq!(dump.last(), Some(&b'\n'));
        assert_ne!(dump.get(dump.len() - 2), Some(&b'\n'));
    }

    #[tokio::test]
    async fn response_dump_has_wire_shape() {
        let hook = ResponseDumperHook::new(Vec::new());
        let mut res = response();
        hook.call(&mut res).await.unwrap();

        let dump = String::from_utf8(hook.into_inner()).unwrap();
        assert!(dump.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(dump.contains("content-type: text/plain\r\n"));
        assert!(dump.ends_with("missing\n"));
    }

    #[tokio::test]
    async fn dump_leaves_message_untouched() {
        let hook = RequestDumperHook::new(Vec::new());
        let mut req = request();
        hook.call(&mut req).await.unwrap();

        assert_eq!(req.headers().get("x-token").unwrap(), "t");
        assert_eq!(req.body().as_ref(), b"ping");
    }

    #[tokio::test]
    async fn failing_sink_aborts_and_keeps_partial_dump() {
        let hook = RequestDumperHook::new(LimitedSink::new(8));
        let mut req = request();

        let err = hook.call(&mut req).await.unwrap_err();
        assert!(err.to_string().contains("sink full"));

        let sink = hook.into_inner();
        assert_eq!(sink.written.len(), 8);
        assert!(b"POST /search?q=1".starts_with(&sink.written));
    }
}
