//! HTTP/1.1 protocol implementation over raw byte streams.
//!
//! This module provides a small blocking HTTP client that speaks the wire
//! format itself instead of delegating to an HTTP library. It is meant to show
//! what a GET or POST actually puts on the socket and how a response is framed
//! when neither `Content-Length` nor chunking is relied upon.
//!
//! # Features
//!
//! - GET and POST (`application/x-www-form-urlencoded` bodies)
//! - One request per connection, closed on every exit path
//! - End of response detected by an idle read timeout
//! - Body decoded with the charset announced in `Content-Type`
//!
//! # Components
//!
//! - [`url`]: URL parsing and path normalization
//! - [`request`]: request serialization
//! - [`response`]: draining the socket, header/body split, charset decoding
//! - [`headers`]: header block tokenizer
//! - [`client`]: the [`Client`] facade driving all of the above
//!
//! # Usage
//!
//! ```rust,no_run
//! use rawhttp::network::application::http::{Client, Form, Options};
//!
//! let mut client = Client::tcp(Options::default());
//!
//! let response = client.get("http://example.com/")?;
//! println!("{:?}", response.code);
//!
//! let form = Form::new().field("name", "value");
//! let response = client.post("http://example.com/submit", Some(&form))?;
//! println!("{}", response.body);
//! # Ok::<(), rawhttp::network::application::http::Error>(())
//! ```

/// Client facade and configuration.
pub mod client;

/// Client error type.
pub mod error;

pub mod headers;

/// Request line, headers and form body serialization.
pub mod request;

pub mod response;

/// Request target parsing.
pub mod url;

pub use client::{Client, Options, State};
pub use error::Error;
pub use headers::HeaderMap;
pub use request::{Form, Method, Request};
pub use response::{RawResponse, Response};
pub use url::Target;
