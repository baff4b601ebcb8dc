//! # Application Layer Network Protocols
//!
//! Protocols spoken on top of the transport traits in [`crate::network`].
//!
//! ## Available Protocols
//!
//! - **[`http`]**: HTTP/1.1 GET/POST client written directly against a byte stream
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Connection`](crate::network::Connection)
//! - **No Hidden Machinery**: The bytes on the wire are built and parsed here, not by a library
//! - **Error Handling**: Every failure is a typed error; nothing panics on bad input

/// HTTP client implementation.
///
/// Provides a simple HTTP/1.1 client supporting GET and POST with
/// form-encoded bodies.
pub mod http;
