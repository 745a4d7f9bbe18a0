//! The SCPI command/response session shared by every driver in this crate.
//!
//! A session owns one serial interface exclusively. Commands go out one per
//! line, terminated with a single `\n`; replies come back the same way. There
//! is never more than one exchange in flight.

use core::fmt::Write as _;

use embedded_io::{Error as _, ErrorKind};
use log::debug;

use crate::error::{Error, Result};

/// One serial connection paired with the line-oriented SCPI framing.
///
/// `L` is the capacity of the line buffer used for outgoing commands and
/// incoming replies; the default of 128 bytes is generous for SCPI traffic.
pub struct ScpiSession<S: embedded_io::Read + embedded_io::Write, const L: usize = 128> {
    interface: S,
}

impl<S: embedded_io::Read + embedded_io::Write, const L: usize> ScpiSession<S, L> {
    /// Take ownership of `interface` and probe that it is usable.
    ///
    /// The probe is a flush; a port that is absent, access-denied or held by
    /// another process fails here with [Error::PortUnavailable] instead of
    /// limping along in a broken state.
    pub fn open(mut interface: S) -> Result<Self, S::Error> {
        if let Err(err) = interface.flush() {
            return Err(match err.kind() {
                ErrorKind::NotFound
                | ErrorKind::PermissionDenied
                | ErrorKind::AddrInUse
                | ErrorKind::NotConnected => Error::PortUnavailable(err),
                _ => Error::Serial(err),
            });
        }
        Ok(Self { interface })
    }

    /// Send one command line. No acknowledgement is awaited.
    ///
    /// Exactly one `\n` terminator goes on the wire per call; any terminator
    /// already on `command` is dropped first.
    pub fn write(&mut self, command: &str) -> Result<(), S::Error> {
        let command = command.trim_end_matches(['\r', '\n']);
        debug!("write: '{}'", command);
        self.interface
            .write_all(command.as_bytes())
            .map_err(Error::Serial)?;
        self.interface.write_all(b"\n").map_err(Error::Serial)?;
        self.interface.flush().map_err(Error::Serial)?;
        Ok(())
    }

    /// Format a command into the line buffer, then [write](Self::write) it.
    pub fn write_command(&mut self, args: core::fmt::Arguments<'_>) -> Result<(), S::Error> {
        let mut line: heapless::String<L> = heapless::String::new();
        line.write_fmt(args).map_err(|_| Error::BufferOverflow)?;
        self.write(&line)
    }

    /// Send `command`, then block for one reply line.
    ///
    /// The reply comes back stripped of its terminator (and of a trailing
    /// `\r`, for firmwares that answer with `\r\n`). A device that stays
    /// silent until the transport's read timeout yields
    /// [Error::ResponseTimeout]; a device that answers with a bare terminator
    /// yields an empty string. The two are never conflated.
    pub fn query(&mut self, command: &str) -> Result<heapless::String<L>, S::Error> {
        self.write(command)?;
        self.read_line()
    }

    /// Release the serial interface.
    ///
    /// There is no separate close step; dropping the returned interface
    /// closes the port.
    pub fn into_inner(self) -> S {
        self.interface
    }

    fn read_line(&mut self) -> Result<heapless::String<L>, S::Error> {
        let mut line: heapless::Vec<u8, L> = heapless::Vec::new();
        let mut chunk = [0u8; 16];
        let mut terminated = false;

        'recv: loop {
            match self.interface.read(&mut chunk) {
                // End of stream. Whatever arrived so far is the reply.
                Ok(0) => break,
                Ok(count) => {
                    for &byte in &chunk[..count] {
                        if byte == b'\n' {
                            // Bytes after the terminator belong to no
                            // outstanding request and are left unread.
                            terminated = true;
                            break 'recv;
                        }
                        if line.push(byte).is_err() {
                            return Err(Error::BufferOverflow);
                        }
                    }
                }
                Err(err) => match err.kind() {
                    // The read timeout elapsing is how a quiet device tells
                    // us it is done; with a partial line we keep what came.
                    ErrorKind::TimedOut | ErrorKind::Other if !line.is_empty() => break,
                    ErrorKind::TimedOut | ErrorKind::Other => {
                        return Err(Error::ResponseTimeout);
                    }
                    _ => return Err(Error::Serial(err)),
                },
            }
        }

        if !terminated && line.is_empty() {
            return Err(Error::ResponseTimeout);
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if core::str::from_utf8(&line).is_err() {
            return Err(Error::unexpected_reply(&line));
        }
        // Validity checked just above.
        let reply = heapless::String::from_utf8(line).map_err(|_| Error::BufferOverflow)?;
        debug!("read: '{}'", reply);
        Ok(reply)
    }
}
