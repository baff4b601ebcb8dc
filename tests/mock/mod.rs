use rawhttp::network::error::Error;
use rawhttp::network::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

/// What the mock observed, shared with the test after the client consumed
/// the connection.
#[derive(Debug, Default)]
pub struct Wire {
    pub written: Vec<u8>,
    pub timeouts: Vec<Duration>,
    pub closed: bool,
    pub connects: Vec<(String, u16)>,
}

/// One scripted outcome of a `read` call. Once the script runs out, reads
/// return `Ok(0)`.
#[derive(Debug, Clone)]
pub enum Step {
    Data(Vec<u8>),
    Timeout,
    Fail(Error),
}

#[derive(Debug)]
pub struct MockConnection {
    wire: Rc<RefCell<Wire>>,
    reads: VecDeque<Step>,
    write_limit: usize,
    write_error: Option<Error>,
}

impl MockConnection {
    fn new(wire: Rc<RefCell<Wire>>) -> Self {
        Self {
            wire,
            reads: VecDeque::new(),
            write_limit: usize::MAX,
            write_error: None,
        }
    }
}

impl Read for MockConnection {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        match self.reads.pop_front() {
            None => Ok(0),
            Some(Step::Timeout) => Err(Error::Timeout),
            Some(Step::Fail(e)) => Err(e),
            Some(Step::Data(mut data)) => {
                let len = buf.len().min(data.len());
                buf[..len].copy_from_slice(&data[..len]);
                if len < data.len() {
                    // Hand out the rest on the next read.
                    let rest = data.split_off(len);
                    self.reads.push_front(Step::Data(rest));
                }
                Ok(len)
            }
        }
    }
}

impl Write for MockConnection {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        if let Some(e) = self.write_error {
            return Err(e);
        }
        let len = buf.len().min(self.write_limit);
        self.wire.borrow_mut().written.extend_from_slice(&buf[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl ReadTimeout for MockConnection {
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), Error> {
        self.wire.borrow_mut().timeouts.push(timeout);
        Ok(())
    }
}

impl Close for MockConnection {
    fn close(self) -> Result<(), Error> {
        self.wire.borrow_mut().closed = true;
        Ok(())
    }
}

impl Connection for MockConnection {}

/// A connector handing out one scripted connection per call.
#[derive(Debug)]
pub struct MockNetwork {
    pub wire: Rc<RefCell<Wire>>,
    scripts: VecDeque<MockConnection>,
    refuse: bool,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self {
            wire: Rc::new(RefCell::new(Wire::default())),
            scripts: VecDeque::new(),
            refuse: false,
        }
    }

    /// Refuse every connection attempt.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new()
        }
    }

    /// Queue a connection whose reads follow `steps`.
    pub fn respond(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        let mut connection = MockConnection::new(self.wire.clone());
        connection.reads = steps.into_iter().collect();
        self.scripts.push_back(connection);
        self
    }

    /// Limit every write of the last queued connection to `limit` bytes.
    pub fn write_limit(mut self, limit: usize) -> Self {
        if let Some(connection) = self.scripts.back_mut() {
            connection.write_limit = limit;
        }
        self
    }

    /// Make every write of the last queued connection fail.
    pub fn write_error(mut self, error: Error) -> Self {
        if let Some(connection) = self.scripts.back_mut() {
            connection.write_error = Some(error);
        }
        self
    }
}

impl Connect for MockNetwork {
    type Connection = MockConnection;

    fn connect(&mut self, host: &str, port: u16) -> Result<Self::Connection, Error> {
        self.wire.borrow_mut().connects.push((host.to_string(), port));
        if self.refuse {
            return Err(Error::ConnectionRefused);
        }
        self.scripts.pop_front().ok_or(Error::NotOpen)
    }
}

/// A complete response with the given header lines and body.
pub fn response(head: &str, body: &[u8]) -> Vec<u8> {
    let mut bytes = head.as_bytes().to_vec();
    bytes.extend_from_slice(b"\r\n\r\n");
    bytes.extend_from_slice(body);
    bytes
}
