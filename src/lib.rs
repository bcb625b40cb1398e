//! BOX - a small HTTP/1.1 server on raw TCP sockets.
//!
//! Core library for request parsing, routing and response serialization.

pub mod config;
pub mod http;
pub mod routing;
pub mod server;
