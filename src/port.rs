//! Adapter between [serialport] and the [embedded_io] traits the drivers
//! want. Enabled with the `serialport` feature.

use std::time::Duration;

use crate::error::Error;

/// Baud rate the instruments in this crate ship with.
pub const DEFAULT_BAUD: u32 = 9600;

/// All the instruments answer well within a second; an elapsed timeout is
/// how "no reply" is detected.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// A [serialport::SerialPort] usable by the drivers in this crate.
///
/// Dropping it closes the port.
pub struct SerialInterface(Box<dyn serialport::SerialPort>);

/// [std::io::Error] carrier that maps onto [embedded_io::ErrorKind].
#[derive(Debug)]
pub struct SerialError(std::io::Error);

impl core::fmt::Display for SerialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SerialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl embedded_io::Error for SerialError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self.0.kind() {
            std::io::ErrorKind::NotFound => embedded_io::ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
            std::io::ErrorKind::AddrInUse => embedded_io::ErrorKind::AddrInUse,
            std::io::ErrorKind::NotConnected => embedded_io::ErrorKind::NotConnected,
            std::io::ErrorKind::BrokenPipe => embedded_io::ErrorKind::BrokenPipe,
            std::io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
            std::io::ErrorKind::TimedOut => embedded_io::ErrorKind::TimedOut,
            std::io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for SerialInterface {
    type Error = SerialError;
}

impl embedded_io::Read for SerialInterface {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(&mut self.0, buf).map_err(SerialError)
    }
}

impl embedded_io::Write for SerialInterface {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.0, buf).map_err(SerialError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(&mut self.0).map_err(SerialError)
    }
}

/// Open `path` at `baud` with the fixed [READ_TIMEOUT].
///
/// A port that cannot be opened (absent, access denied, held by another
/// process) surfaces as [Error::PortUnavailable].
pub fn open(path: &str, baud: u32) -> Result<SerialInterface, Error<SerialError>> {
    let port = serialport::new(path, baud)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(|err| Error::PortUnavailable(SerialError(err.into())))?;
    Ok(SerialInterface(port))
}
