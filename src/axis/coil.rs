//! Direct coil-driven stepper axis.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::axis::{Actuator, AxisCore, Direction, PhaseTable};
use crate::config::AxisSettings;
use crate::error::AxisError;

/// Stepper axis driving `N` coil pins through a [`PhaseTable`].
///
/// Each committed whole step waits the configured step delay and then
/// writes the phase pattern for the new position to the coil pins. `N`
/// is normally 4; a smaller `N` drives a prefix of each pattern.
pub struct CoilStepper<P, D, const N: usize = 4> {
    core: AxisCore,
    pins: [P; N],
    delay: D,
    table: PhaseTable,
}

impl<P: OutputPin, D: DelayNs, const N: usize> CoilStepper<P, D, N> {
    /// Axis at position zero with coils de-energized state unknown.
    pub fn new(pins: [P; N], delay: D, settings: AxisSettings) -> Self {
        let table = settings.phase_table;
        Self {
            core: AxisCore::new(settings),
            pins,
            delay,
            table,
        }
    }

    fn energize(&mut self, position: i64) -> Result<(), AxisError> {
        let pattern = self.table.pattern(position);
        for (pin, &level) in self.pins.iter_mut().zip(pattern.iter()) {
            if level {
                pin.set_high().map_err(|_| AxisError::Pin)?;
            } else {
                pin.set_low().map_err(|_| AxisError::Pin)?;
            }
        }
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs, const N: usize> Actuator for CoilStepper<P, D, N> {
    fn advance(&mut self, direction: Direction, fraction: f64) -> Result<(), AxisError> {
        if let Some(position) = self.core.accumulate(direction, fraction)? {
            self.delay.delay_us(self.core.step_delay_us());
            self.energize(position)?;
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
        for pin in self.pins.iter_mut() {
            pin.set_low().map_err(|_| AxisError::Pin)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoundaryPolicy;
    use crate::pins::{StubDelay, StubPin};

    fn axis() -> CoilStepper<StubPin, StubDelay> {
        let settings = AxisSettings {
            min_position: -1000,
            max_position: 1000,
            boundary_policy: BoundaryPolicy::Fault,
            phase_table: PhaseTable::Mixed,
            ..AxisSettings::default()
        };
        CoilStepper::new(
            [StubPin::new(), StubPin::new(), StubPin::new(), StubPin::new()],
            StubDelay,
            settings,
        )
    }

    fn coil_state(axis: &CoilStepper<StubPin, StubDelay>) -> [bool; 4] {
        [
            axis.pins[0].is_high(),
            axis.pins[1].is_high(),
            axis.pins[2].is_high(),
            axis.pins[3].is_high(),
        ]
    }

    #[test]
    fn test_whole_step_writes_phase_pattern() {
        let mut axis = axis();
        axis.advance(Direction::Clockwise, 1.0).unwrap();
        assert_eq!(axis.position(), 1);
        assert_eq!(coil_state(&axis), PhaseTable::Mixed.pattern(1));
    }

    #[test]
    fn test_fractional_advance_leaves_coils_untouched() {
        let mut axis = axis();
        axis.advance(Direction::Clockwise, 0.5).unwrap();
        assert_eq!(axis.position(), 0);
        assert_eq!(coil_state(&axis), [false; 4]);
    }

    #[test]
    fn test_full_cycle_returns_to_first_pattern() {
        let mut axis = axis();
        for _ in 0..8 {
            axis.advance(Direction::Clockwise, 1.0).unwrap();
        }
        assert_eq!(coil_state(&axis), PhaseTable::Mixed.pattern(0));
    }

    #[test]
    fn test_unhold_releases_all_coils() {
        let mut axis = axis();
        axis.advance(Direction::Clockwise, 1.0).unwrap();
        axis.unhold().unwrap();
        assert_eq!(coil_state(&axis), [false; 4]);
        // idempotent
        axis.unhold().unwrap();
        assert_eq!(coil_state(&axis), [false; 4]);
    }
}
