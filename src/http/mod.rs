//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 server: one GET request per connection,
//! answered with a file, a directory listing, or a fixed error response.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine
//! - **`parser`**: finds the end of the request head and parses the request line
//! - **`request`**: request line representation
//! - **`response`**: status codes, the fixed responses and a builder
//! - **`writer`**: serializes and writes responses to the client
//! - **`mime`**: media type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← Read until "\r\n\r\n"
//!        └──────┬───────────┘
//!               │ Request line parsed (bad line → 400, not GET → 405)
//!               ▼
//!        ┌──────────────────┐
//!        │     Parsed       │ ← Resolve path against the webroot
//!        └──────┬───────────┘
//!               │ Resource found (otherwise → 404)
//!               ▼
//!        ┌──────────────────┐
//!        │    Resolved      │ ← Frame 200 OK
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Single write of the whole response
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Always reached, even after failures
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use shrubbery::config::Config;
//! use shrubbery::http::connection::{Connection, Limits};
//! use shrubbery::webroot::Webroot;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::default();
//!     let webroot = Arc::new(Webroot::open(&cfg.root)?);
//!     let listener = TcpListener::bind(&cfg.listen_addr).await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, webroot.clone(), Limits::from_config(&cfg));
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
