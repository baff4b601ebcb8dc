//! Header block tokenizer.
//!
//! This is a deliberately literal parser and its limitations are part of its
//! contract:
//!
//! - lines are split on `\r\n` and each line on *single* spaces, so runs of
//!   spaces produce empty tokens;
//! - the first token of a line becomes the key verbatim, which means header
//!   names keep their trailing colon (`Content-Type:`) and the status line is
//!   keyed by its protocol token (`HTTP/1.1`);
//! - lookups are case-sensitive and exact;
//! - a repeated key replaces the earlier line.
//!
//! Everything that reads headers goes through [`HeaderMap`], so a proper
//! `name: value` parser with case-insensitive lookup can replace this one
//! without touching the client.

use std::collections::HashMap;

/// Charset assumed when the response does not announce one.
pub const DEFAULT_CHARSET: &str = "utf-8";

const STATUS_KEYS: [&str; 2] = ["HTTP/1.1", "HTTP/1.0"];
const CONTENT_TYPE_KEY: &str = "Content-Type:";
const CHARSET_TOKEN: &str = "charset";
/// Length of `charset=`, stripped from the matching token as-is.
const CHARSET_PREFIX_LEN: usize = 8;

/// Header lines keyed by their first space-separated token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: HashMap<String, Vec<String>>,
}

impl HeaderMap {
    /// Tokenizes a raw header block (the bytes before the blank line).
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn parse(block: &[u8]) -> Self {
        let text = String::from_utf8_lossy(block);
        let mut entries = HashMap::new();

        for line in text.split("\r\n") {
            let mut tokens = line.split(' ').map(str::to_string);
            if let Some(key) = tokens.next() {
                entries.insert(key, tokens.collect());
            }
        }

        Self { entries }
    }

    /// Tokens following `key`, if a line started with exactly `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no line was tokenized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Status code from the `HTTP/1.1` line, falling back to `HTTP/1.0`.
    ///
    /// The first token made only of ASCII digits is taken as the code.
    /// Returns `None` when neither status line exists, neither has a numeric
    /// token, or the number does not fit in a `u16`.
    pub fn status_code(&self) -> Option<u16> {
        STATUS_KEYS.iter().find_map(|key| {
            self.get(key)?
                .iter()
                .find(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|token| token.parse().ok())
        })
    }

    /// Charset named in the `Content-Type:` line, or [`DEFAULT_CHARSET`].
    ///
    /// The first token starting with `charset` is taken and its first eight
    /// bytes (`charset=`) dropped. A token with nothing left after that
    /// yields the default.
    pub fn charset(&self) -> &str {
        self.get(CONTENT_TYPE_KEY)
            .and_then(|tokens| tokens.iter().find(|t| t.starts_with(CHARSET_TOKEN)))
            .and_then(|token| token.get(CHARSET_PREFIX_LEN..))
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CHARSET)
    }
}
