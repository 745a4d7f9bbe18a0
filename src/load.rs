//! Driver for the Tenma 72-13210 programmable DC electronic load.
//!
//! The instrument speaks line-oriented SCPI over its serial port. Setting a
//! threshold with [Tenma7213210::set_voltage] and friends also switches the
//! load into the matching function, mirroring the front-panel behaviour.
//!
//! Nomenclature follows the rest of the crate: `set` writes a configuration,
//! `get` reads a configuration back, `read` takes a measurement.

use core::str::FromStr;

use fugit::Duration;
use strum_macros::EnumIter;

use crate::error::{Error, Result};
use crate::session::ScpiSession;
use crate::types::{Current, ParseValueError, Power, Resistance, State, Voltage};

/// Operating functions of the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum LoadFunction {
    /// Constant voltage.
    ConstantVoltage,
    /// Constant current.
    ConstantCurrent,
    /// Constant power.
    ConstantPower,
    /// Constant resistance.
    ConstantResistance,
    /// Short circuit.
    ShortCircuit,
}

impl LoadFunction {
    /// The keyword exactly as the firmware spells it. The odd casing of
    /// `SHORt` is the instrument's, not ours.
    pub const fn keyword(self) -> &'static str {
        match self {
            LoadFunction::ConstantVoltage => "CV",
            LoadFunction::ConstantCurrent => "CC",
            LoadFunction::ConstantPower => "CW",
            LoadFunction::ConstantResistance => "CR",
            LoadFunction::ShortCircuit => "SHORt",
        }
    }
}

impl core::fmt::Display for LoadFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for LoadFunction {
    type Err = ParseValueError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("CV") {
            Ok(LoadFunction::ConstantVoltage)
        } else if s.eq_ignore_ascii_case("CC") {
            Ok(LoadFunction::ConstantCurrent)
        } else if s.eq_ignore_ascii_case("CW") {
            Ok(LoadFunction::ConstantPower)
        } else if s.eq_ignore_ascii_case("CR") {
            Ok(LoadFunction::ConstantResistance)
        } else if s.eq_ignore_ascii_case("SHORT") {
            Ok(LoadFunction::ShortCircuit)
        } else {
            Err(ParseValueError)
        }
    }
}

/// You can create a Tenma7213210 using any interface which implements
/// [embedded_io::Read] & [embedded_io::Write].
pub struct Tenma7213210<S: embedded_io::Read + embedded_io::Write, const L: usize = 128> {
    session: ScpiSession<S, L>,
}

impl<S: embedded_io::Read + embedded_io::Write, const L: usize> Tenma7213210<S, L> {
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

    /// Return the measured voltage at the input terminals.
    pub fn read_voltage(&mut self) -> Result<Voltage, S::Error> {
        let reply = self.session.query(":MEAS:VOLT?")?;
        reply
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Return the measured input current.
    pub fn read_current(&mut self) -> Result<Current, S::Error> {
        let reply = self.session.query(":MEAS:CURR?")?;
        reply
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Return the measured power dissipation.
    pub fn read_power(&mut self) -> Result<Power, S::Error> {
        let reply = self.session.query(":MEAS:POW?")?;
        reply
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Switch to constant voltage and set the threshold.
    pub fn set_voltage(&mut self, voltage: Voltage) -> Result<(), S::Error> {
        self.session.write_command(format_args!(":VOLT {voltage}"))
    }

    /// Switch to constant current and set the threshold.
    pub fn set_current(&mut self, current: Current) -> Result<(), S::Error> {
        self.session.write_command(format_args!(":CURR {current}"))
    }

    /// Switch to constant power and set the threshold.
    pub fn set_power(&mut self, power: Power) -> Result<(), S::Error> {
        self.session.write_command(format_args!(":POW {power}"))
    }

    /// Switch to constant resistance and set the threshold.
    pub fn set_resistance(&mut self, resistance: Resistance) -> Result<(), S::Error> {
        self.session
            .write_command(format_args!(":RES {resistance}"))
    }

    /// Get the configured voltage threshold.
    pub fn get_voltage(&mut self) -> Result<Voltage, S::Error> {
        let reply = self.session.query(":VOLT?")?;
        reply
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Get the configured current threshold.
    pub fn get_current(&mut self) -> Result<Current, S::Error> {
        let reply = self.session.query(":CURR?")?;
        reply
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Get the configured power threshold.
    pub fn get_power(&mut self) -> Result<Power, S::Error> {
        let reply = self.session.query(":POW?")?;
        reply
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Get the configured resistance threshold.
    pub fn get_resistance(&mut self) -> Result<Resistance, S::Error> {
        let reply = self.session.query(":RES?")?;
        reply
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Select the operating function.
    pub fn set_function(&mut self, function: LoadFunction) -> Result<(), S::Error> {
        self.session.write_command(format_args!(":FUNC {function}"))
    }

    /// Get the currently active operating function.
    pub fn get_function(&mut self) -> Result<LoadFunction, S::Error> {
        let reply = self.session.query(":FUNC?")?;
        reply
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Enable/disable the load input.
    pub fn set_input_state(&mut self, state: impl Into<State>) -> Result<(), S::Error> {
        let state: State = state.into();
        self.session
            .write_command(format_args!(":INP {}", state as u16))
    }

    /// Read whether the load input is enabled or disabled.
    pub fn get_input_state(&mut self) -> Result<State, S::Error> {
        let reply = self.session.query(":INP?")?;
        let value: u8 = reply
            .trim()
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))?;
        Ok(State::from(value != 0))
    }

    /// Enable/disable the key-press beep.
    pub fn set_beep(&mut self, state: impl Into<State>) -> Result<(), S::Error> {
        let word = match state.into() {
            State::On => "ON",
            State::Off => "OFF",
        };
        self.session
            .write_command(format_args!(":SYST:BEEP {word}"))
    }

    /// Get the current key-press beep setting.
    pub fn get_beep(&mut self) -> Result<State, S::Error> {
        let reply = self.session.query(":SYST:BEEP?")?;
        let word = reply.trim();
        if word.eq_ignore_ascii_case("ON") {
            Ok(State::On)
        } else if word.eq_ignore_ascii_case("OFF") {
            Ok(State::Off)
        } else {
            Err(Error::unexpected_reply(reply.as_bytes()))
        }
    }

    /// Get the baud rate the instrument side is configured for.
    pub fn get_baud(&mut self) -> Result<u32, S::Error> {
        let reply = self.session.query(":SYST:BAUD?")?;
        reply
            .trim()
            .parse()
            .map_err(|_| Error::unexpected_reply(reply.as_bytes()))
    }

    /// Program battery-test slot 1.
    ///
    /// Parameters, in command order: charging current, load current, cutoff
    /// voltage, cutoff charge in amp-hours, end time. The layout follows the
    /// programming manual, but the firmware we have on hand has never
    /// accepted this command, so the parameter semantics are unverified.
    pub fn set_battery_test(
        &mut self,
        charge_current: Current,
        load_current: Current,
        cutoff_voltage: Voltage,
        cutoff_charge_ah: f64,
        end_time: Duration<u32, 1, 1>,
    ) -> Result<(), S::Error> {
        self.session.write_command(format_args!(
            ":BATT 1, {charge_current}, {load_current}, {cutoff_voltage}, {cutoff_charge_ah}AH, {}S",
            end_time.to_secs()
        ))
    }
}
