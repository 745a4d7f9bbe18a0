//! Our error types for the bench instrument drivers.

use thiserror::Error;

pub type Result<T, I> = core::result::Result<T, Error<I>>;

/// Longest prefix of a device reply kept inside [Error::UnexpectedReply].
pub const REPLY_SNIPPET: usize = 48;

/// Error type for the SCPI serial drivers.
///
/// The legacy scripts these drivers replace swallowed every failure and kept
/// going on a dead port. Here the three failure moments stay distinguishable:
/// the port could not be acquired, the device stayed silent, or the device
/// answered something we cannot make sense of.
#[derive(Error, Debug)]
pub enum Error<I: embedded_io::Error> {
    /// The serial port could not be acquired: device absent, access denied,
    /// or already held open by another process.
    #[error("serial port unavailable")]
    PortUnavailable(I),
    /// The transport failed mid-exchange.
    #[error("serial communication error")]
    Serial(I),
    /// The read timeout elapsed without a single byte arriving. A device that
    /// sends a bare terminator yields an empty reply instead, never this.
    #[error("no reply before the read timeout")]
    ResponseTimeout,
    /// The device answered, but not in the shape the command calls for.
    #[error("unexpected reply: '{0}'")]
    UnexpectedReply(heapless::String<REPLY_SNIPPET>),
    /// A command or reply did not fit the session's line buffer.
    #[error("line exceeds the session buffer capacity")]
    BufferOverflow,
}

impl<I: embedded_io::Error> Error<I> {
    /// Build an [Error::UnexpectedReply] from raw reply bytes, keeping a
    /// printable prefix so the offending text shows up in logs.
    pub(crate) fn unexpected_reply(raw: &[u8]) -> Self {
        let mut snippet: heapless::String<REPLY_SNIPPET> = heapless::String::new();
        for &byte in raw {
            let ch = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            };
            if snippet.push(ch).is_err() {
                break;
            }
        }
        Error::UnexpectedReply(snippet)
    }
}

/// Error type for the PS 2000 B power supply facade.
///
/// The facade's own protocol errors are opaque here; we only wrap them so the
/// "port never opened" case stays its own variant.
#[derive(Error, Debug)]
pub enum SupplyError<E: core::fmt::Debug> {
    /// The underlying supply connection is not open.
    #[error("power supply port is not open")]
    PortUnavailable,
    /// The supply module reported a failure of its own.
    #[error("power supply fault: {0:?}")]
    Port(E),
}
