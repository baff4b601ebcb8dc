//! A network abstraction layer for byte-stream transports
//!
//! This module provides the small set of traits the HTTP client is written
//! against, plus a blocking TCP implementation of them. Keeping the protocol
//! code behind these traits lets the client be driven by an in-memory
//! connection in tests and by [`tcp::TcpConnector`] in production.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

use core::time::Duration;

/// Common error types for network operations
pub mod error;

/// Blocking TCP transport built on `std::net`
pub mod tcp;

/// Application layer protocols
pub mod application;

pub use error::Error;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, ReadTimeout, Write};
}

pub trait Read {
    /// Read data from the connection.
    ///
    /// Returns `Ok(0)` when the peer closed the stream and
    /// `Err(Error::Timeout)` when the current read timeout elapsed.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;
}

pub trait Write {
    /// Write data to the connection, returning how many bytes were accepted
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Error>;

    /// Write the whole buffer, looping on partial writes, then flush.
    fn write_all(&mut self, mut buf: &[u8]) -> Result<(), Error> {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => return Err(Error::WriteError),
                n => buf = &buf[n..],
            }
        }
        self.flush()
    }
}

pub trait ReadTimeout {
    /// Set how long a single read may block before failing with `Error::Timeout`
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), Error>;
}

pub trait Close {
    /// Close the connection
    fn close(self) -> Result<(), Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + ReadTimeout + Close {}

/// A synchronous connector (client)
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Open a connection to `host:port`
    fn connect(&mut self, host: &str, port: u16) -> Result<Self::Connection, Error>;
}
