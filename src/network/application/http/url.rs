//! Request target parsing.

use super::error::Error;
use url::Url;

/// Port used when the URL does not name one.
pub const STANDARD_PORT: u16 = 80;

/// The parts of a URL the client needs to open a connection and address a
/// resource.
///
/// The scheme is ignored: everything is spoken to as plaintext HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Host name, lowercased by the URL parser. Never empty.
    pub host: String,
    /// Explicit port from the URL, if any.
    pub port: Option<u16>,
    /// Path, already passed through [`normalize`].
    pub path: String,
    /// Query string without the leading `?`.
    pub query: Option<String>,
}

impl Target {
    /// Parses `url` into a target.
    pub fn parse(url: &str) -> Result<Self, Error> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let host = match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => {
                return Err(Error::InvalidUrl {
                    url: url.to_string(),
                    reason: "missing host".to_string(),
                });
            }
        };

        Ok(Self {
            host,
            port: parsed.port(),
            path: normalize(parsed.path()),
            query: parsed.query().map(str::to_string),
        })
    }

    /// Port to dial; an absent or zero port falls back to `default`.
    pub fn port_or(&self, default: u16) -> u16 {
        match self.port {
            Some(port) if port != 0 => port,
            _ => default,
        }
    }

    /// The request target placed on the request line.
    ///
    /// The query, when present, follows the normalized path, so `/a?x=1`
    /// goes out as `/a/?x=1` rather than losing the query to a bare `/a/`.
    pub fn request_path(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

/// Makes sure `path` ends with `/`.
///
/// Applied to every path, including ones that look like files (`/index.html`
/// becomes `/index.html/`). An empty path becomes `/`.
pub fn normalize(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
