//! Hardware-free axis for dry runs and tests.

use crate::axis::{Actuator, AxisCore, Direction};
use crate::config::AxisSettings;
use crate::error::AxisError;

/// Axis with full position bookkeeping but no outputs and no pacing.
///
/// Useful for dry-running programs, bounds checking a job before it
/// touches hardware, and testing.
#[derive(Debug, Clone)]
pub struct VirtualAxis {
    core: AxisCore,
    steps_taken: u64,
}

impl VirtualAxis {
    /// Axis at position zero.
    pub fn new(settings: AxisSettings) -> Self {
        Self {
            core: AxisCore::new(settings),
            steps_taken: 0,
        }
    }

    /// Total whole steps committed, regardless of direction.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }
}

impl Actuator for VirtualAxis {
    fn advance(&mut self, direction: Direction, fraction: f64) -> Result<(), AxisError> {
        if self.core.accumulate(direction, fraction)?.is_some() {
            self.steps_taken += 1;
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
        Ok(())
    }
}
