//! Laser on/off axis.

use embedded_hal::digital::OutputPin;

use crate::axis::{Actuator, AxisCore, Direction};
use crate::config::AxisSettings;
use crate::error::AxisError;

/// Z axis driving a laser enable pin instead of a motor.
///
/// Position bookkeeping is identical to a stepper axis, but the only
/// output is the enable pin: high while the position is below zero
/// (tool plunged into the work), low otherwise. No step delay applies.
pub struct LaserAxis<P> {
    core: AxisCore,
    pin: P,
}

impl<P: OutputPin> LaserAxis<P> {
    /// Axis at position zero; the pin is not touched until the first
    /// committed step.
    pub fn new(pin: P, settings: AxisSettings) -> Self {
        Self {
            core: AxisCore::new(settings),
            pin,
        }
    }

    fn apply(&mut self, position: i64) -> Result<(), AxisError> {
        if position < 0 {
            self.pin.set_high().map_err(|_| AxisError::Pin)
        } else {
            self.pin.set_low().map_err(|_| AxisError::Pin)
        }
    }
}

impl<P: OutputPin> Actuator for LaserAxis<P> {
    fn advance(&mut self, direction: Direction, fraction: f64) -> Result<(), AxisError> {
        if let Some(position) = self.core.accumulate(direction, fraction)? {
            self.apply(position)?;
        }
        Ok(())
    }

    fn position(&self) -> i64 {
        self.core.position()
    }

    fn float_position(&self) -> f64 {
        self.core.float_position()
    }

    fn unhold(&mut self) -> Result<(), AxisError> {
        self.pin.set_low().map_err(|_| AxisError::Pin)
    }
}
