//! Request serialization.

use super::url::Target;
use url::form_urlencoded;

/// Supported request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// `GET`
    #[default]
    Get,
    /// `POST`, carrying a form-encoded body.
    Post,
}

impl Method {
    /// The method token as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// Maps a command-line token to a method. Only an exact `POST` selects
    /// [`Method::Post`]; anything else is a GET.
    pub fn from_command(command: &str) -> Self {
        if command == "POST" {
            Method::Post
        } else {
            Method::Get
        }
    }
}

/// Ordered form fields sent as an `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, String)>,
}

impl Form {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, keeping insertion order.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// The fields in insertion order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Form-encodes the fields: spaces become `+`, reserved bytes are
    /// percent-escaped and pairs are joined with `&`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }

    /// Parses a form-encoded body back into fields.
    pub fn decode(encoded: &[u8]) -> Self {
        form_urlencoded::parse(encoded).into_owned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Form {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A request ready to be serialized.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub method: Method,
    pub target: &'a Target,
    /// Form body; only sent for [`Method::Post`].
    pub form: Option<&'a Form>,
}

impl Request<'_> {
    /// Serializes the request into wire bytes.
    ///
    /// Every request carries `Host` and `Accept-Charset: UTF-8`. A POST also
    /// carries `Content-Type` and `Content-Length`, even when the form is
    /// absent (an empty body with length 0).
    pub fn to_bytes(&self) -> Vec<u8> {
        // Request line and common headers
        let mut head = format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\nAccept-Charset: UTF-8\r\n",
            self.method.as_str(),
            self.target.request_path(),
            self.target.host
        );

        let body = match self.method {
            Method::Get => String::new(),
            Method::Post => {
                let body = self.form.map(Form::encode).unwrap_or_default();
                head.push_str("Content-Type: application/x-www-form-urlencoded\r\n");
                head.push_str("Content-Length: ");
                head.push_str(&body.len().to_string());
                head.push_str("\r\n");
                body
            }
        };
        head.push_str("\r\n");

        let mut request_buf = head.into_bytes();
        request_buf.extend_from_slice(body.as_bytes());
        request_buf
    }
}
