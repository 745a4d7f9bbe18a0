//! Unit-tagged value types used when formatting setpoints and parsing replies.
//!
//! The instruments want their unit suffix spelled out on the wire (`12.4V`,
//! `2.8A`, `5OHM`). Carrying the unit in the type keeps a voltage from ever
//! being rendered as an amp value.

use core::fmt;
use core::str::FromStr;
use thiserror::Error;

/// A device reply that does not parse as a number in the expected unit.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("not a numeric reply in the expected unit")]
pub struct ParseValueError;

/// Parse `text` as a number, tolerating an optional unit suffix.
///
/// Instruments differ on whether they echo the unit back, so `1.234V` and
/// `1.234` both parse. The suffix match ignores case.
fn parse_with_unit(text: &str, unit: &str) -> Result<f64, ParseValueError> {
    let text = text.trim();
    let split = text.len().saturating_sub(unit.len());
    let bare = if text.len() >= unit.len()
        && text.is_char_boundary(split)
        && text[split..].eq_ignore_ascii_case(unit)
    {
        &text[..split]
    } else {
        text
    };
    bare.trim_end().parse().map_err(|_| ParseValueError)
}

/// A voltage in volts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Voltage(f64);

impl Voltage {
    pub const fn from_volts(volts: f64) -> Self {
        Self(volts)
    }

    pub const fn volts(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Voltage {
    /// Renders the way the instruments expect it, e.g. `12.4V`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}V", self.0)
    }
}

impl FromStr for Voltage {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with_unit(s, "V").map(Self)
    }
}

/// A current in amps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Current(f64);

impl Current {
    pub const fn from_amps(amps: f64) -> Self {
        Self(amps)
    }

    pub const fn amps(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Current {
    /// Renders the way the instruments expect it, e.g. `2.8A`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}A", self.0)
    }
}

impl FromStr for Current {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with_unit(s, "A").map(Self)
    }
}

/// A power in watts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Power(f64);

impl Power {
    pub const fn from_watts(watts: f64) -> Self {
        Self(watts)
    }

    pub const fn watts(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Power {
    /// Renders the way the instruments expect it, e.g. `54W`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}W", self.0)
    }
}

impl FromStr for Power {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with_unit(s, "W").map(Self)
    }
}

/// A resistance in ohms.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Resistance(f64);

impl Resistance {
    pub const fn from_ohms(ohms: f64) -> Self {
        Self(ohms)
    }

    pub const fn ohms(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Resistance {
    /// Renders the way the instruments expect it, e.g. `5OHM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}OHM", self.0)
    }
}

impl FromStr for Resistance {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with_unit(s, "OHM").map(Self)
    }
}

/// Used to be less ambiguous about whether an input or output is on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Disabled.
    Off,
    /// Enabled.
    On,
}

impl From<State> for bool {
    fn from(value: State) -> Self {
        match value {
            State::Off => false,
            State::On => true,
        }
    }
}

impl From<bool> for State {
    fn from(value: bool) -> Self {
        match value {
            true => State::On,
            false => State::Off,
        }
    }
}
