//! Response reading, framing and decoding.

use super::error::Error;
use super::headers::HeaderMap;
use crate::network::Connection;
use crate::network::error::Error as NetError;
use core::time::Duration;
use encoding_rs::{Encoding, mem};
use log::trace;

/// Blank line separating the header block from the body.
const SEPARATOR: &[u8] = b"\r\n\r\n";

/// Labels decoded byte for byte as ISO-8859-1, not as windows-1252.
const LATIN1_LABELS: &[&str] = &["iso-8859-1", "iso8859-1", "iso_8859-1", "latin1", "latin-1", "l1"];

/// Labels that only admit 7-bit bytes.
const ASCII_LABELS: &[&str] = &["us-ascii", "ascii"];

/// Read timeouts used while draining a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPolicy {
    /// Timeout while waiting for the first bytes, restored afterwards.
    pub baseline: Duration,
    /// Timeout once data is flowing; hitting it ends the response.
    pub idle: Duration,
    /// Maximum bytes requested per read.
    pub chunk_size: usize,
}

/// Drains `connection` until the peer closes or goes quiet.
///
/// The first read waits up to `policy.baseline`; once anything arrives the
/// timeout drops to `policy.idle`, and a timeout from then on is taken as
/// the end of the response. A timeout on the very first read ends the stream
/// with nothing read. The baseline timeout is put back before returning,
/// whatever the outcome.
pub fn read_to_idle<C: Connection>(
    connection: &mut C,
    policy: &ReadPolicy,
) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    let mut chunk = vec![0u8; policy.chunk_size.max(1)];
    let mut idle = false;

    let outcome = loop {
        match connection.read(&mut chunk) {
            Ok(0) => break Ok(()),
            Ok(n) => {
                buffer.extend_from_slice(&chunk[..n]);
                if !idle {
                    trace!("data arrived, switching to idle timeout {:?}", policy.idle);
                    if let Err(e) = connection.set_read_timeout(policy.idle) {
                        break Err(e);
                    }
                    idle = true;
                }
            }
            Err(NetError::Timeout) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    let restored = connection.set_read_timeout(policy.baseline);
    outcome.and(restored).map_err(Error::Transmission)?;

    Ok(buffer)
}

/// A received response split at the first blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Status line and header lines, without the trailing blank line.
    pub header_block: Vec<u8>,
    /// Everything after the blank line.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Splits `data` on the first `\r\n\r\n`.
    ///
    /// An empty buffer (the server sent nothing) splits into an empty header
    /// block and empty body; any other buffer without the separator is
    /// malformed.
    pub fn split(mut data: Vec<u8>) -> Result<Self, Error> {
        if data.is_empty() {
            return Ok(Self {
                header_block: Vec::new(),
                body: Vec::new(),
            });
        }

        let end = find_slice(&data, SEPARATOR)
            .ok_or(Error::MalformedResponse { len: data.len() })?;
        let body = data.split_off(end + SEPARATOR.len());
        data.truncate(end);

        Ok(Self {
            header_block: data,
            body,
        })
    }

    /// Tokenizes the header block.
    pub fn headers(&self) -> HeaderMap {
        HeaderMap::parse(&self.header_block)
    }
}

/// Decodes `body` using the charset label `charset`.
///
/// Latin-1 labels map every byte to the code point of the same value and
/// ASCII labels reject any byte above `0x7F`. Other labels are resolved the
/// way browsers resolve them. An unknown label or a malformed byte sequence
/// fails; nothing is replaced and no BOM is sniffed.
pub fn decode_body(body: &[u8], charset: &str) -> Result<String, Error> {
    let decoding_error = || Error::Decoding {
        charset: charset.to_string(),
    };

    let label = charset.trim().to_ascii_lowercase();
    if LATIN1_LABELS.contains(&label.as_str()) {
        return Ok(mem::decode_latin1(body).into_owned());
    }
    if ASCII_LABELS.contains(&label.as_str()) {
        if !mem::is_ascii(body) {
            return Err(decoding_error());
        }
        return Ok(mem::decode_latin1(body).into_owned());
    }

    let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(decoding_error)?;
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(decoding_error)
}

/// A parsed response handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code, or `None` when the status line could not be read.
    pub code: Option<u16>,
    /// Body decoded with [`Response::charset`].
    pub body: String,
    /// Charset label used to decode the body.
    pub charset: String,
    /// Body bytes as received.
    pub raw_body: Vec<u8>,
}

impl Response {
    /// Extracts status code and charset from `raw` and decodes its body.
    pub fn from_raw(raw: RawResponse) -> Result<Self, Error> {
        let headers = raw.headers();
        let code = headers.status_code();
        let charset = headers.charset().to_string();
        let body = decode_body(&raw.body, &charset)?;

        Ok(Self {
            code,
            body,
            charset,
            raw_body: raw.body,
        })
    }
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
