//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 wire layer of the server: one request
//! and one response per accepted connection.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection driver implementing the request-response state machine
//! - **`parser`**: Decodes incoming HTTP requests from byte buffers
//! - **`request`**: Request line, method and request representation
//! - **`headers`**: Ordered header map and cookie parsing
//! - **`form`**: Form-encoded request bodies
//! - **`response`**: Status codes, response entities and the wire-level response
//! - **`writer`**: Renders entities and serializes responses to the client
//! - **`mime`**: Content type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and render a response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use turnstile::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = turnstile::App::from_config(&Default::default());
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let app = app.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, app);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod form;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
