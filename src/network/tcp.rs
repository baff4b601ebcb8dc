//! Blocking TCP transport.
//!
//! [`TcpConnector`] resolves a host name, tries every resolved address with a
//! connect timeout, and hands back a [`TcpConnection`] whose read timeout is
//! already set to the baseline value.

use super::error::Error;
use super::{Close, Connect, Connection, Read, ReadTimeout, Write};
use core::time::Duration;
use log::{debug, trace, warn};
use std::io::{ErrorKind, Read as StdRead, Write as StdWrite};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

/// Shortest read timeout handed to the socket. std treats zero as "block
/// forever", so shorter requests are raised to this.
pub const MIN_READ_TIMEOUT: Duration = Duration::from_millis(1);

/// A connected TCP stream implementing the transport traits.
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
}

impl TcpConnection {
    /// Wraps an already connected stream.
    pub fn new(stream: TcpStream) -> Self {
        Self { stream }
    }

    /// Returns the underlying stream.
    pub fn stream(&self) -> &TcpStream {
        &self.stream
    }
}

impl Read for TcpConnection {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        loop {
            match self.stream.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    if !matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) {
                        debug!("tcp read failed: {e}");
                    }
                    return Err(Error::from_io(&e, Error::ReadError));
                }
            }
        }
    }
}

impl Write for TcpConnection {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        loop {
            match self.stream.write(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("tcp write failed: {e}");
                    return Err(Error::from_io(&e, Error::WriteError));
                }
            }
        }
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.stream.flush().map_err(|e| {
            debug!("tcp flush failed: {e}");
            Error::from_io(&e, Error::WriteError)
        })
    }
}

impl ReadTimeout for TcpConnection {
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), Error> {
        let timeout = timeout.max(MIN_READ_TIMEOUT);
        trace!("tcp read timeout -> {timeout:?}");
        self.stream
            .set_read_timeout(Some(timeout))
            .map_err(|e| Error::from_io(&e, Error::ReadError))
    }
}

impl Close for TcpConnection {
    fn close(self) -> Result<(), Error> {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // The peer may already have torn the socket down.
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(e) => {
                warn!("tcp shutdown failed: {e}");
                Err(Error::from_io(&e, Error::ConnectionClosed))
            }
        }
    }
}

impl Connection for TcpConnection {}

/// Opens [`TcpConnection`]s.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnector {
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl TcpConnector {
    /// Creates a connector with the given connect timeout and baseline read timeout.
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            read_timeout,
        }
    }
}

impl Connect for TcpConnector {
    type Connection = TcpConnection;

    fn connect(&mut self, host: &str, port: u16) -> Result<Self::Connection, Error> {
        // IPv6 literals arrive bracketed, as they appear in URLs.
        let bare = host.trim_start_matches('[').trim_end_matches(']');
        let addrs = (bare, port).to_socket_addrs().map_err(|e| {
            debug!("failed to resolve {host}:{port}: {e}");
            Error::InvalidAddress
        })?;

        let mut last_error = Error::InvalidAddress;
        for addr in addrs {
            trace!("connecting to {addr}");
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => {
                    debug!("connected to {host}:{port} via {addr}");
                    let mut connection = TcpConnection::new(stream);
                    connection.set_read_timeout(self.read_timeout)?;
                    return Ok(connection);
                }
                Err(e) => {
                    debug!("connect to {addr} failed: {e}");
                    last_error = Error::from_io(&e, Error::ConnectionRefused);
                }
            }
        }
        Err(last_error)
    }
}
