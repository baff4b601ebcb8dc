//! HTTP/1.1 GET/POST client facade.
//!
//! Each call runs one request end to end on a fresh connection:
//!
//! ```text
//! Idle -> Connecting -> Sending -> Receiving -> Parsing -> Closed
//! ```
//!
//! Any failure jumps straight to `Closed`. Once a connection is open it is
//! closed before the call returns, whether the exchange succeeded or not.

use super::error::Error;
use super::request::{Form, Method, Request};
use super::response::{RawResponse, ReadPolicy, Response, read_to_idle};
use super::url::{STANDARD_PORT, Target};
use crate::network::tcp::TcpConnector;
use crate::network::{Connect, Connection};
use core::time::Duration;
use log::{debug, trace, warn};

/// Environment variable overriding [`Options::read_timeout`], in milliseconds.
pub const ENV_READ_TIMEOUT_MS: &str = "RAWHTTP_READ_TIMEOUT_MS";
/// Environment variable overriding [`Options::idle_timeout`], in milliseconds.
pub const ENV_IDLE_TIMEOUT_MS: &str = "RAWHTTP_IDLE_TIMEOUT_MS";
/// Environment variable overriding [`Options::connect_timeout`], in milliseconds.
pub const ENV_CONNECT_TIMEOUT_MS: &str = "RAWHTTP_CONNECT_TIMEOUT_MS";

/// Client configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Read timeout while waiting for the first bytes of a response.
    pub read_timeout: Duration,
    /// Read timeout once the response started; a pause this long ends it.
    pub idle_timeout: Duration,
    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Bytes requested per read.
    pub chunk_size: usize,
    /// Port dialled when the URL has none.
    pub default_port: u16,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_millis(100),
            connect_timeout: Duration::from_secs(30),
            chunk_size: 1024,
            default_port: STANDARD_PORT,
        }
    }
}

impl Options {
    /// Defaults, overridden by any `RAWHTTP_*_MS` variables that parse as
    /// a positive number of milliseconds. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str| lookup(key).and_then(|value| parse_millis(key, &value));

        let mut options = Self::default();
        if let Some(timeout) = millis(ENV_READ_TIMEOUT_MS) {
            options.read_timeout = timeout;
        }
        if let Some(timeout) = millis(ENV_IDLE_TIMEOUT_MS) {
            options.idle_timeout = timeout;
        }
        if let Some(timeout) = millis(ENV_CONNECT_TIMEOUT_MS) {
            options.connect_timeout = timeout;
        }
        options
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    fn read_policy(&self) -> ReadPolicy {
        ReadPolicy {
            baseline: self.read_timeout,
            idle: self.idle_timeout,
            chunk_size: self.chunk_size,
        }
    }
}

fn parse_millis(key: &str, value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => {
            warn!("ignoring {key}={value:?}: expected a positive number of milliseconds");
            None
        }
    }
}

/// Where the client is in the lifecycle of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No request has been made yet.
    Idle,
    /// Parsing the URL and opening the connection.
    Connecting,
    /// Writing the request.
    Sending,
    /// Draining the response.
    Receiving,
    /// Splitting, tokenizing and decoding the response.
    Parsing,
    /// The last request finished, successfully or not.
    Closed,
}

/// Closes `connection`, logging instead of failing the call.
fn release<C: Connection>(connection: C) {
    match connection.close() {
        Ok(()) => trace!("connection closed"),
        Err(e) => warn!("failed to close connection: {e}"),
    }
}

/// A blocking HTTP client issuing one request per connection.
#[derive(Debug)]
pub struct Client<N: Connect> {
    connector: N,
    options: Options,
    state: State,
}

impl Client<TcpConnector> {
    /// A client speaking over TCP with the given options.
    pub fn tcp(options: Options) -> Self {
        let connector = TcpConnector::new(options.connect_timeout, options.read_timeout);
        Self::new(connector, options)
    }
}

impl Default for Client<TcpConnector> {
    fn default() -> Self {
        Self::tcp(Options::default())
    }
}

impl<N: Connect> Client<N> {
    /// A client opening its connections through `connector`.
    ///
    /// The connector is expected to apply `options.read_timeout` to the
    /// connections it opens.
    pub fn new(connector: N, options: Options) -> Self {
        Self {
            connector,
            options,
            state: State::Idle,
        }
    }

    /// State reached by the last call.
    pub fn state(&self) -> State {
        self.state
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn connector(&self) -> &N {
        &self.connector
    }

    /// Fetches `url` with a GET request.
    pub fn get(&mut self, url: &str) -> Result<Response, Error> {
        self.execute(url, Method::Get, None)
    }

    /// Sends `form` (or an empty body) to `url` with a POST request.
    pub fn post(&mut self, url: &str, form: Option<&Form>) -> Result<Response, Error> {
        self.execute(url, Method::Post, form)
    }

    /// Dispatches on `method`; the form is only used by POST.
    pub fn command(
        &mut self,
        url: &str,
        method: Method,
        form: Option<&Form>,
    ) -> Result<Response, Error> {
        match method {
            Method::Post => self.post(url, form),
            Method::Get => self.get(url),
        }
    }

    fn execute(&mut self, url: &str, method: Method, form: Option<&Form>) -> Result<Response, Error> {
        let result = self.run(url, method, form);
        self.transition(State::Closed);
        if let Err(e) = &result {
            debug!("{} {url} failed: {e}", method.as_str());
        }
        result
    }

    fn run(&mut self, url: &str, method: Method, form: Option<&Form>) -> Result<Response, Error> {
        self.transition(State::Connecting);
        let target = Target::parse(url)?;
        let port = target.port_or(self.options.default_port);
        let mut connection = self
            .connector
            .connect(&target.host, port)
            .map_err(|source| Error::Connection {
                host: target.host.clone(),
                port,
                source,
            })?;

        let result = self.exchange(&mut connection, &target, method, form);
        release(connection);
        result
    }

    fn exchange<C: Connection>(
        &mut self,
        connection: &mut C,
        target: &Target,
        method: Method,
        form: Option<&Form>,
    ) -> Result<Response, Error> {
        self.transition(State::Sending);
        let request = Request {
            method,
            target,
            form,
        }
        .to_bytes();
        debug!(
            "{} {} ({} bytes) to {}",
            method.as_str(),
            target.request_path(),
            request.len(),
            target.host
        );
        connection.write_all(&request).map_err(Error::Transmission)?;

        self.transition(State::Receiving);
        let data = read_to_idle(connection, &self.options.read_policy())?;
        debug!("received {} bytes from {}", data.len(), target.host);

        self.transition(State::Parsing);
        let response = Response::from_raw(RawResponse::split(data)?)?;
        debug!(
            "status {:?}, {} body bytes as {}",
            response.code,
            response.raw_body.len(),
            response.charset
        );
        Ok(response)
    }

    fn transition(&mut self, next: State) {
        trace!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
