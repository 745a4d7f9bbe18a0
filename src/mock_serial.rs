//! We use this mocking module in unit tests to emulate a serial port.
//!
//! The instruments themselves are never on the bench during `cargo test`, so
//! the sessions run against an in-memory duplex channel instead: everything
//! written is captured, and reads drain a pre-loaded reply buffer. Once the
//! reply buffer runs dry, reads fail the way a real port does when its
//! timeout elapses.

/// Our mock type used to emulate a serial port.
pub struct MockSerial {
    /// Everything written to the mock, in order.
    written: heapless::Vec<u8, 256>,
    /// Pre-loaded bytes handed out by subsequent reads.
    replies: heapless::Vec<u8, 256>,
    /// How far into `replies` the reads have drained.
    cursor: usize,
    /// Optional failure the mock should simulate.
    fault: Option<MockFault>,
}

/// Failure modes the mock can be told to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFault {
    /// Every operation reports the port as held by another process.
    Busy,
    /// Reads fail with a hard I/O error instead of running dry.
    BrokenRead,
}

#[derive(Debug)]
pub enum MockSerialError {
    /// The port is held by someone else.
    Busy,
    /// No data arrived before the simulated read timeout.
    TimedOut,
    /// Hard I/O failure mid-transfer.
    Broken,
    /// A mock buffer filled up.
    Overflow,
}

impl core::fmt::Display for MockSerialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

impl core::error::Error for MockSerialError {}

impl embedded_io::Error for MockSerialError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            MockSerialError::Busy => embedded_io::ErrorKind::AddrInUse,
            MockSerialError::TimedOut => embedded_io::ErrorKind::TimedOut,
            MockSerialError::Broken => embedded_io::ErrorKind::BrokenPipe,
            MockSerialError::Overflow => embedded_io::ErrorKind::OutOfMemory,
        }
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = MockSerialError;
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fault == Some(MockFault::Busy) {
            return Err(MockSerialError::Busy);
        }
        self.written
            .extend_from_slice(buf)
            .map_err(|_| MockSerialError::Overflow)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fault == Some(MockFault::Busy) {
            return Err(MockSerialError::Busy);
        }
        Ok(())
    }
}

impl embedded_io::Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match self.fault {
            Some(MockFault::Busy) => return Err(MockSerialError::Busy),
            Some(MockFault::BrokenRead) => return Err(MockSerialError::Broken),
            None => {}
        }

        if self.cursor >= self.replies.len() {
            return Err(MockSerialError::TimedOut);
        }

        let available = &self.replies[self.cursor..];
        let count = buf.len().min(available.len());
        buf[..count].copy_from_slice(&available[..count]);
        self.cursor += count;
        Ok(count)
    }
}

impl MockSerial {
    /// Create a new mock with nothing written and nothing to read.
    pub fn new() -> Self {
        Self {
            written: heapless::Vec::new(),
            replies: heapless::Vec::new(),
            cursor: 0,
            fault: None,
        }
    }

    /// Load the bytes the next reads will hand out.
    pub fn set_read_data(&mut self, data: &[u8]) -> Result<(), MockSerialError> {
        self.replies.clear();
        self.cursor = 0;
        self.replies
            .extend_from_slice(data)
            .map_err(|_| MockSerialError::Overflow)
    }

    /// Everything written to the mock so far.
    pub fn written_data(&self) -> &[u8] {
        &self.written
    }

    /// Everything written so far, as text. Panics on non-UTF-8, which in a
    /// test is exactly the loud failure we want.
    pub fn written_str(&self) -> &str {
        core::str::from_utf8(&self.written).expect("mock received non-UTF-8 bytes")
    }

    /// Forget what has been written so far.
    pub fn clear_written(&mut self) {
        self.written.clear();
    }

    /// Arm (or clear) a simulated failure.
    pub fn set_fault(&mut self, fault: Option<MockFault>) {
        self.fault = fault;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::{Read, Write};

    #[test]
    fn captures_writes_in_order() {
        let mut mock = MockSerial::new();
        mock.write(b":VOLT 12.4V\n").unwrap();
        mock.write(b":INP 1\n").unwrap();
        assert_eq!(mock.written_str(), ":VOLT 12.4V\n:INP 1\n");

        mock.clear_written();
        assert!(mock.written_data().is_empty());
    }

    #[test]
    fn reads_drain_the_loaded_reply() {
        let mut mock = MockSerial::new();
        mock.set_read_data(b"1.234V\n").unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(mock.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"1.23");
        assert_eq!(mock.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"4V\n");
    }

    #[test]
    fn exhausted_reply_times_out() {
        let mut mock = MockSerial::new();
        let mut buf = [0u8; 8];
        assert!(matches!(
            mock.read(&mut buf),
            Err(MockSerialError::TimedOut)
        ));
    }

    #[test]
    fn busy_fault_hits_every_operation() {
        let mut mock = MockSerial::new();
        mock.set_fault(Some(MockFault::Busy));

        let mut buf = [0u8; 8];
        assert!(matches!(mock.write(b"x"), Err(MockSerialError::Busy)));
        assert!(matches!(mock.flush(), Err(MockSerialError::Busy)));
        assert!(matches!(mock.read(&mut buf), Err(MockSerialError::Busy)));
    }
}
