//! Fetch a page through an agent with default headers and a dump hook.
//!
//! ```bash
//! cargo run --example basic
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io;

use http_agent::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut agent = Agent::new(ReqwestTransport::new());
    agent.default_timeout = Some(std::time::Duration::from_secs(10));
    agent
        .default_headers
        .insert("user-agent", "http-agent/0.1".parse()?);
    agent
        .default_headers
        .insert("accept", "application/json".parse()?);
    agent
        .request_hooks
        .append(RequestDumperHook::new(io::stderr()));

    let request = Request::builder()
        .uri("https://httpbin.org/headers")
        .body(Bytes::new())?;

    match agent.execute(request).await {
        Ok(response) => {
            println!("Status: {}", response.status());
            println!("{}", String::from_utf8_lossy(response.body()));
        }
        Err(e) => eprintln!("Error: {e}"),
    }

    Ok(())
}
