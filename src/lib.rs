//! # rawhttp - HTTP/1.1 over raw TCP
//!
//! A minimal HTTP/1.1 client that writes requests and reads responses directly
//! on a TCP socket, without any HTTP library in between. It exists to make the
//! wire format visible: request line and header framing, form-encoded POST
//! bodies, reading a response until the server goes quiet, and decoding the
//! body with the charset the server announced.
//!
//! ## Features
//!
//! - **GET and POST**: `application/x-www-form-urlencoded` request bodies
//! - **Idle-timeout framing**: a response ends when no bytes arrive for a short window
//! - **Charset-aware decoding**: bodies are decoded with the `Content-Type` charset
//! - **Pluggable transport**: the client runs over any [`network::Connection`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rawhttp::network::application::http::{Client, Options};
//!
//! let mut client = Client::tcp(Options::default());
//! let response = client.get("http://example.com/")?;
//!
//! if response.code == Some(200) {
//!     println!("{}", response.body);
//! }
//! # Ok::<(), rawhttp::network::application::http::Error>(())
//! ```
//!
//! ## Non-goals
//!
//! Keep-alive, TLS, HTTP/2, chunked transfer-encoding, redirects, cookies,
//! proxies and custom request headers are all out of scope.

#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Network abstraction layer: transport traits, TCP transport and the HTTP client.
pub mod network;

pub use network::application::http::{Client, Error, Form, Method, Options, Response};
