//! HTTP protocol implementation.
//!
//! This module implements a small HTTP/1.1 server with support for keep-alive connections.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection loop implementing the request-response state machine
//! - **`parser`**: Parses the text of a request head
//! - **`request`**: HTTP request representation and methods
//! - **`response`**: Response body buffer and header fields
//! - **`status`**: Status code to reason phrase table
//! - **`cookie`**: `Set-Cookie` values
//! - **`writer`**: Writes a serialized response to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read lines up to the blank line
//!        └──────┬──────┘
//!               │ Request head received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route to a handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Connection: keep-alive → Reading (same connection)
//!               └─ anything else → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use box_server::config::ConnectionConfig;
//! use box_server::http::connection::Connection;
//! use box_server::routing::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:3000").await?;
//!     let router = Arc::new(Router::with_landing_page());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = Arc::clone(&router);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router, ConnectionConfig::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod cookie;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod writer;
