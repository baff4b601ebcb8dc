//! Common error types for network operations

use thiserror::Error;

/// A common error type for transport operations.
///
/// This enum defines the failures a transport can report to the protocol
/// layer. It is deliberately small and `Copy`; transports log the underlying
/// OS error before collapsing it into one of these variants.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An operation was attempted on a connection that is not open.
    #[error("connection is not open")]
    NotOpen,
    /// An error occurred during a write operation.
    #[error("write failed")]
    WriteError,
    /// An error occurred during a read operation.
    #[error("read failed")]
    ReadError,
    /// A connection attempt was refused.
    #[error("connection refused")]
    ConnectionRefused,
    /// A timeout occurred.
    #[error("operation timed out")]
    Timeout,
    /// The connection was closed.
    #[error("connection closed by peer")]
    ConnectionClosed,
    /// An invalid or unresolvable address was provided.
    #[error("invalid or unresolvable address")]
    InvalidAddress,
}

impl Error {
    /// Collapses an I/O error into the transport error it represents.
    ///
    /// `fallback` is used for kinds with no dedicated variant, so callers can
    /// say whether the failure happened while reading or writing.
    pub fn from_io(err: &std::io::Error, fallback: Error) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => Error::Timeout,
            ErrorKind::ConnectionRefused => Error::ConnectionRefused,
            ErrorKind::NotConnected => Error::NotOpen,
            ErrorKind::BrokenPipe
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::UnexpectedEof => Error::ConnectionClosed,
            ErrorKind::AddrNotAvailable | ErrorKind::InvalidInput => Error::InvalidAddress,
            _ => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn timeouts_collapse_to_timeout() {
        let would_block = io::Error::from(io::ErrorKind::WouldBlock);
        let timed_out = io::Error::from(io::ErrorKind::TimedOut);
        assert_eq!(Error::from_io(&would_block, Error::ReadError), Error::Timeout);
        assert_eq!(Error::from_io(&timed_out, Error::ReadError), Error::Timeout);
    }

    #[test]
    fn resets_are_reported_as_closed() {
        let reset = io::Error::from(io::ErrorKind::ConnectionReset);
        let pipe = io::Error::from(io::ErrorKind::BrokenPipe);
        assert_eq!(Error::from_io(&reset, Error::ReadError), Error::ConnectionClosed);
        assert_eq!(Error::from_io(&pipe, Error::WriteError), Error::ConnectionClosed);
    }

    #[test]
    fn unknown_kinds_use_the_fallback() {
        let other = io::Error::other("boom");
        assert_eq!(Error::from_io(&other, Error::WriteError), Error::WriteError);
        assert_eq!(Error::from_io(&other, Error::ReadError), Error::ReadError);
    }
}
