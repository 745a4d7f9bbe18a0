//! Serial drivers for a small bench of programmable instruments controlled
//! with line-oriented ASCII SCPI commands.
//!
//! Supported instruments:
//! * Tenma 72-13210 programmable DC load ([load::Tenma7213210])
//! * Aim TTi LD400P electronic load ([ld400::Ld400])
//! * Elektro-Automatik PS 2000 B power supplies, through the remote-control
//!   facade in [supply] (the binary PS 2000 B protocol itself lives outside
//!   this crate)
//!
//! The SCPI drivers work over anything implementing [embedded_io::Read] and
//! [embedded_io::Write]. Enable the `serialport` feature for a ready-made
//! adapter around a real serial port, see [port].
//!
//! The serial side of these instruments should be configured like so:
//! * Baud rate: 9600
//! * Data bits: 8
//! * Stop bits: 1
//! * Parity: None
//!
//! Commands are one per line, terminated with `\n`. Command keywords are
//! case-sensitive on some firmwares, so the drivers emit them exactly as the
//! programming manuals spell them.

pub mod delay;
pub mod error;
pub mod ld400;
pub mod load;
#[cfg(feature = "serialport")]
pub mod port;
pub mod session;
pub mod supply;
pub mod types;

#[cfg(test)]
mod mock_serial;
