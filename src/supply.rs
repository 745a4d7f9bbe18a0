//! Remote-control facade for the Elektro-Automatik PS 2000 B power supplies.
//!
//! The PS 2000 B speaks a binary protocol that is handled by a separate
//! module; this crate only captures the calling discipline that module
//! demands: remote control must be switched on before any setpoint or output
//! change and switched off again afterwards. [RemoteSession] makes that
//! bracket a scope, so the release happens on every exit path, including
//! when a command inside the bracket fails.

use log::{info, warn};

use crate::error::SupplyError;
use crate::types::{Current, Voltage};

/// Identification data reported by the supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInformation {
    pub manufacturer: heapless::String<32>,
    pub device_type: heapless::String<32>,
    pub serial_no: heapless::String<32>,
}

/// The low-level capability the binary-protocol module exposes.
///
/// Everything here is treated as opaque; the supply's own failures surface
/// through the associated error type.
pub trait SupplyPort {
    type Error: core::fmt::Debug;

    /// Whether the underlying connection is open.
    fn is_open(&self) -> bool;
    /// Query manufacturer, device type and serial number.
    fn device_information(&mut self) -> Result<DeviceInformation, Self::Error>;
    /// Switch the supply into remote-control mode.
    fn enable_remote_control(&mut self) -> Result<(), Self::Error>;
    /// Hand control back to the front panel.
    fn disable_remote_control(&mut self) -> Result<(), Self::Error>;
    /// Set the voltage level. Requires remote control.
    fn set_voltage(&mut self, voltage: Voltage) -> Result<(), Self::Error>;
    /// Set the current limit. Requires remote control.
    fn set_current(&mut self, current: Current) -> Result<(), Self::Error>;
    /// Read the present voltage level.
    fn get_voltage(&mut self) -> Result<Voltage, Self::Error>;
    /// Read the present current level.
    fn get_current(&mut self) -> Result<Current, Self::Error>;
    /// Switch the output on. Requires remote control.
    fn enable_output(&mut self) -> Result<(), Self::Error>;
    /// Switch the output off. Requires remote control.
    fn disable_output(&mut self) -> Result<(), Self::Error>;
}

/// A held remote-control bracket.
///
/// Remote control stays enabled for the lifetime of this value and is
/// switched off again when it drops. Dropping cannot report a failed
/// release, so that case is logged instead.
pub struct RemoteSession<'a, P: SupplyPort> {
    port: &'a mut P,
}

impl<'a, P: SupplyPort> RemoteSession<'a, P> {
    fn acquire(port: &'a mut P) -> Result<Self, SupplyError<P::Error>> {
        port.enable_remote_control().map_err(SupplyError::Port)?;
        Ok(Self { port })
    }

    /// Set the voltage level.
    pub fn set_voltage(&mut self, voltage: Voltage) -> Result<(), SupplyError<P::Error>> {
        self.port.set_voltage(voltage).map_err(SupplyError::Port)
    }

    /// Set the current limit.
    pub fn set_current(&mut self, current: Current) -> Result<(), SupplyError<P::Error>> {
        self.port.set_current(current).map_err(SupplyError::Port)
    }

    /// Switch the output on.
    pub fn enable_output(&mut self) -> Result<(), SupplyError<P::Error>> {
        self.port.enable_output().map_err(SupplyError::Port)
    }

    /// Switch the output off.
    pub fn disable_output(&mut self) -> Result<(), SupplyError<P::Error>> {
        self.port.disable_output().map_err(SupplyError::Port)
    }
}

impl<P: SupplyPort> Drop for RemoteSession<'_, P> {
    fn drop(&mut self) {
        if let Err(err) = self.port.disable_remote_control() {
            warn!("failed to release remote control: {:?}", err);
        }
    }
}

/// High-level wrapper around a [SupplyPort] that enforces the remote-control
/// bracketing on every mutating call.
pub struct PowerSupply<P: SupplyPort> {
    port: P,
}

impl<P: SupplyPort> PowerSupply<P> {
    /// Take ownership of an already-connected port.
    ///
    /// Fails with [SupplyError::PortUnavailable] when the underlying
    /// connection never came up, instead of carrying on against a dead
    /// device.
    pub fn open(mut port: P) -> Result<Self, SupplyError<P::Error>> {
        if !port.is_open() {
            return Err(SupplyError::PortUnavailable);
        }
        let info = port.device_information().map_err(SupplyError::Port)?;
        info!(
            "connected to {} {} ({})",
            info.manufacturer, info.device_type, info.serial_no
        );
        Ok(Self { port })
    }

    /// Release the underlying port.
    pub fn into_inner(self) -> P {
        self.port
    }

    /// Query manufacturer, device type and serial number.
    pub fn device_information(&mut self) -> Result<DeviceInformation, SupplyError<P::Error>> {
        self.port.device_information().map_err(SupplyError::Port)
    }

    /// Hold a remote-control bracket open for several commands.
    ///
    /// Useful when voltage, current and output state should change without
    /// bouncing remote control in between.
    pub fn remote(&mut self) -> Result<RemoteSession<'_, P>, SupplyError<P::Error>> {
        RemoteSession::acquire(&mut self.port)
    }

    /// Set the voltage level, bracketed by remote control.
    pub fn set_voltage(&mut self, voltage: Voltage) -> Result<(), SupplyError<P::Error>> {
        self.remote()?.set_voltage(voltage)
    }

    /// Set the current limit, bracketed by remote control.
    pub fn set_current(&mut self, current: Current) -> Result<(), SupplyError<P::Error>> {
        self.remote()?.set_current(current)
    }

    /// Read the present voltage level. Readbacks need no remote control.
    pub fn get_voltage(&mut self) -> Result<Voltage, SupplyError<P::Error>> {
        self.port.get_voltage().map_err(SupplyError::Port)
    }

    /// Read the present current level. Readbacks need no remote control.
    pub fn get_current(&mut self) -> Result<Current, SupplyError<P::Error>> {
        self.port.get_current().map_err(SupplyError::Port)
    }

    /// Enable the output, bracketed by remote control.
    pub fn enable(&mut self) -> Result<(), SupplyError<P::Error>> {
        self.remote()?.enable_output()
    }

    /// Disable the output, bracketed by remote control.
    pub fn disable(&mut self) -> Result<(), SupplyError<P::Error>> {
        self.remote()?.disable_output()
    }
}
