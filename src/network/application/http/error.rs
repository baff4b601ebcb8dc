//! Errors surfaced by the HTTP client.

use crate::network::error::Error as NetError;
use thiserror::Error;

/// Everything that can abort a single GET or POST.
///
/// Each variant is fatal for the request that produced it; the client never
/// retries. A missing or unparseable status code is *not* an error and is
/// reported as `None` on the response instead.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// The URL could not be parsed or names no host.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl {
        /// The URL as given by the caller.
        url: String,
        /// What was wrong with it.
        reason: String,
    },
    /// Name resolution or the TCP connect failed.
    #[error("failed to connect to {host}:{port}: {source}")]
    Connection {
        /// Host that was dialled.
        host: String,
        /// Port that was dialled.
        port: u16,
        /// Transport failure.
        #[source]
        source: NetError,
    },
    /// Sending the request failed, or the connection broke mid-response.
    #[error("transmission failed: {0}")]
    Transmission(#[source] NetError),
    /// The response has no blank line separating headers from body.
    #[error("malformed response: no header/body separator in {len} bytes")]
    MalformedResponse {
        /// Number of bytes received.
        len: usize,
    },
    /// The body is not valid in the announced (or default) charset.
    #[error("response body is not valid {charset}")]
    Decoding {
        /// Charset label taken from the response, or the default.
        charset: String,
    },
}
