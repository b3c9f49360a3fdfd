//! Wireserve - HTTP/1.1 straight off the socket
//!
//! Core library for hand-rolled HTTP parsing, routing and response writing.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
