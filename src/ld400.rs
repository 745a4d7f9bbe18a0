//! Driver for the Aim TTi LD400P electronic load.
//!
//! Unlike the Tenma load, the LD400P keeps its command vocabulary terse:
//! single-letter mode selection, `A`/`B` level slots whose unit depends on
//! the active mode, and a transient generator driven by `FREQ`. Replies are
//! plain numbers without unit suffixes.

use crate::error::{Error, Result};
use crate::session::ScpiSession;
use crate::types::State;

/// Operating modes of the LD400P, selected by a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ld400Mode {
    /// Constant current.
    ConstantCurrent,
    /// Constant voltage.
    ConstantVoltage,
    /// Constant power.
    ConstantPower,
    /// Constant resistance.
    ConstantResistance,
    /// Constant conductance.
    ConstantConductance,
}

impl Ld400Mode {
    /// The mode letter as the instrument expects it.
    pub const fn letter(self) -> char {
        match self {
            Ld400Mode::ConstantCurrent => 'C',
            Ld400Mode::ConstantVoltage => 'V',
            Ld400Mode::ConstantPower => 'P',
            Ld400Mode::ConstantResistance => 'R',
            Ld400Mode::ConstantConductance => 'G',
        }
    }
}

impl core::fmt::Display for Ld400Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// You can create a Ld400 using any interface which implements
/// [embedded_io::Read] & [embedded_io::Write].
pub struct Ld400<S: embedded_io::Read + embedded_io::Write, const L: usize = 128> {
    session: ScpiSession<S, L>,
}

impl<S: embedded_io::Read + embedded_io::Write, const L: usize> Ld400<S, L> {
    /// Open a session on the given interface.
    ///
    /// Fails with [Error::PortUnavailable] when the port cannot be used.
    pub fn open(interface: S) -> Result<Self, S::Error> {
        Ok(Self {
            session: ScpiSession::open(interface)?,
        })
    }

    /// Release the serial interface. Dropping it closes the port.
    pub fn into_inner(self) -> S {
        self.session.into_inner()
    }

    /// Return the device identification string. (`*IDN?`)
    pub fn ident(&mut self) -> Result<heapless::String<L>, S::Error> {
        self.session.query("*IDN?")
    }

    /// Select the operating mode.
    pub fn set_mode(&mut self, mode: Ld400Mode) -> Result<(), S::Error> {
        self.session.write_command(format_args!("MODE {mode}"))
    }

    /// Set level slot A. The unit depends on the active mode (amps in
    /// constant current, volts in constant voltage, and so on), hence the
    /// bare number.
    pub fn set_level_a(&mut self, level: f64) -> Result<(), S::Error> {
        self.session.write_command(format_args!("A {level}"))
    }

    /// Set level slot B. Same unit caveat as [Self::set_level_a].
    pub fn set_level_b(&mut self, level: f64) -> Result<(), S::Error> {
        self.session.write_command(format_args!("B {level}"))
    }

    /// Set the transient generator frequency in hertz.
    pub fn set_frequency_hz(&mut self, hz: u32) -> Result<(), S::Error> {
        self.session.write_command(format_args!("FREQ {hz}"))
    }

    /// Get the configured transient generator frequency in hertz.
    pub fn get_frequency_hz(&mut self) -> Result<f64, S::Error> {
        let reply = self.session.query("FREQ?")?;
        reply
            .trim()
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Enable/disable the load input.
    pub fn set_input_state(&mut self, state: impl Into<State>) -> Result<(), S::Error> {
        let state: State = state.into();
        self.session
            .write_command(format_args!("INP {}", state as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_serial::MockSerial;

    #[test]
    fn demo_sequence_matches_the_wire_format() {
        // The manual's quick-start sequence: transient at 1 kHz, constant
        // current, level A, input on.
        let mut ld400: Ld400<MockSerial> = Ld400::open(MockSerial::new()).unwrap();
        ld400.set_frequency_hz(1000).unwrap();
        ld400.set_mode(Ld400Mode::ConstantCurrent).unwrap();
        ld400.set_level_a(1.0).unwrap();
        ld400.set_input_state(State::On).unwrap();
        ld400.set_level_a(2.5).unwrap();
        ld400.set_input_state(State::Off).unwrap();

        assert_eq!(
            ld400.into_inner().written_str(),
            "FREQ 1000\nMODE C\nA 1\nINP 1\nA 2.5\nINP 0\n"
        );
    }

    #[test]
    fn every_mode_renders_its_letter() {
        let modes = [
            (Ld400Mode::ConstantCurrent, "MODE C\n"),
            (Ld400Mode::ConstantVoltage, "MODE V\n"),
            (Ld400Mode::ConstantPower, "MODE P\n"),
            (Ld400Mode::ConstantResistance, "MODE R\n"),
            (Ld400Mode::ConstantConductance, "MODE G\n"),
        ];
        for (mode, line) in modes {
            let mut ld400: Ld400<MockSerial> = Ld400::open(MockSerial::new()).unwrap();
            ld400.set_mode(mode).unwrap();
            assert_eq!(ld400.into_inner().written_str(), line);
        }
    }

    #[test]
    fn frequency_query_parses_a_bare_number() {
        let mut mock = MockSerial::new();
        mock.set_read_data(b"1000.0\n").unwrap();

        let mut ld400: Ld400<MockSerial> = Ld400::open(mock).unwrap();
        assert_eq!(ld400.get_frequency_hz().unwrap(), 1000.0);
        assert_eq!(ld400.into_inner().written_str(), "FREQ?\n");
    }

    #[test]
    fn level_b_uses_its_own_slot() {
        let mut ld400: Ld400<MockSerial> = Ld400::open(MockSerial::new()).unwrap();
        ld400.set_level_b(0.25).unwrap();
        assert_eq!(ld400.into_inner().written_str(), "B 0.25\n");
    }
}
