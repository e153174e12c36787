//! Step/direction driver axis.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::axis::{Actuator, AxisCore, Direction};
use crate::config::AxisSettings;
use crate::error::AxisError;

/// Pulse width for the step pin, in microseconds.
const STEP_PULSE_US: u32 = 2;

/// Axis driven through an external step/direction driver chip.
///
/// Each committed whole step waits the configured step delay, sets the
/// direction pin if the direction changed, then emits one pulse on the
/// step pin.
pub struct StepDirAxis<S, R, D> {
    core: AxisCore,
    step: S,
    dir: R,
    delay: D,
    last_direction: Option<Direction>,
}

impl<S: OutputPin, R: OutputPin, D: DelayNs> StepDirAxis<S, R, D> {
    /// Axis at position zero.
    pub fn new(step: S, dir: R, delay: D, settings: AxisSettings) -> Self {
        Self {
            core: AxisCore::new(settings),
            step,
            dir,
            delay,
            last_direction: None,
        }
    }

    fn pulse(&mut self, direction: Direction) -> Result<(), AxisError> {
        if self.last_direction != Some(direction) {
            match direction {
                Direction::Clockwise => self.dir.set_high().map_err(|_| AxisError::Pin)?,
                Direction::CounterClockwise => self.dir.set_low().map_err(|_| AxisError::Pin)?,
            }
            self.last_direction = Some(direction);
        }
        self.step.set_high().map_err(|_| AxisError::Pin)?;
        self.delay.delay_us(STEP_PULSE_US);
        self.step.set_low().map_err(|_| AxisError::Pin)?;
        Ok(())
    }
}

impl<S: OutputPin, R: OutputPin, D: DelayNs> Actuator for StepDirAxis<S, R, D> {
    fn advance(&mut self, direction: Direction, fraction: f64) -> Result<(), AxisError> {
        if self.core.accumulate(direction, fraction)?.is_some() {
            self.delay.delay_us(self.core.step_delay_us());
            self.pulse(direction)?;
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
        // external driver holds the motor; release the step line only
        self.step.set_low().map_err(|_| AxisError::Pin)
    }
}
