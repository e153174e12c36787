//! Spindle and laser tool control.

use embedded_hal::digital::OutputPin;

use crate::axis::Direction;
use crate::error::AxisError;

/// Reported tool state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToolState {
    /// Whether the tool is currently energized.
    pub running: bool,
    /// Rotation direction of the last start command.
    pub direction: Direction,
    /// Speed of the last start or speed command, if any was given.
    pub speed: Option<f64>,
}

/// A controllable spindle-like tool.
pub trait Tool {
    /// Start the tool, optionally at a given speed.
    fn rotate(&mut self, direction: Direction, speed: Option<f64>) -> Result<(), AxisError>;

    /// Record a new speed without changing the running state.
    fn set_speed(&mut self, speed: f64);

    /// Stop and de-energize the tool.
    ///
    /// Must be idempotent; called on every shutdown path.
    fn unhold(&mut self) -> Result<(), AxisError>;

    /// Current state.
    fn state(&self) -> ToolState;
}

/// Tool with no output hardware; state changes are logged only.
///
/// Stands in for machines whose spindle is switched elsewhere, and for
/// dry runs.
#[derive(Debug, Clone, Default)]
pub struct Spindle {
    state: ToolState,
}

impl Spindle {
    /// Idle spindle.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for Spindle {
    fn rotate(&mut self, direction: Direction, speed: Option<f64>) -> Result<(), AxisError> {
        self.state.running = true;
        self.state.direction = direction;
        if speed.is_some() {
            self.state.speed = speed;
        }
        log::info!("spindle on, {:?} at {:?}", direction, self.state.speed);
        Ok(())
    }

    fn set_speed(&mut self, speed: f64) {
        self.state.speed = Some(speed);
    }

    fn unhold(&mut self) -> Result<(), AxisError> {
        if self.state.running {
            log::info!("spindle off");
        }
        self.state.running = false;
        Ok(())
    }

    fn state(&self) -> ToolState {
        self.state
    }
}

/// Laser switched by a single enable pin.
///
/// Direction and speed are recorded but do not affect the output.
pub struct LaserTool<P> {
    pin: P,
    state: ToolState,
}

impl<P: OutputPin> LaserTool<P> {
    /// Laser off; the pin is not touched until the first command.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            state: ToolState::default(),
        }
    }
}

impl<P: OutputPin> Tool for LaserTool<P> {
    fn rotate(&mut self, direction: Direction, speed: Option<f64>) -> Result<(), AxisError> {
        self.pin.set_high().map_err(|_| AxisError::Pin)?;
        self.state.running = true;
        self.state.direction = direction;
        if speed.is_some() {
            self.state.speed = speed;
        }
        Ok(())
    }

    fn set_speed(&mut self, speed: f64) {
        self.state.speed = Some(speed);
    }

    fn unhold(&mut self) -> Result<(), AxisError> {
        self.pin.set_low().map_err(|_| AxisError::Pin)?;
        self.state.running = false;
        Ok(())
    }

    fn state(&self) -> ToolState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::StubPin;

    #[test]
    fn test_spindle_remembers_speed_across_stop() {
        let mut spindle = Spindle::new();
        spindle.rotate(Direction::Clockwise, Some(1200.0)).unwrap();
        spindle.unhold().unwrap();
        spindle.rotate(Direction::Clockwise, None).unwrap();
        assert_eq!(spindle.state().speed, Some(1200.0));
        assert!(spindle.state().running);
    }

    #[test]
    fn test_laser_pin_follows_state() {
        let mut laser = LaserTool::new(StubPin::new());
        laser.rotate(Direction::Clockwise, None).unwrap();
        assert!(laser.pin.is_high());
        laser.unhold().unwrap();
        assert!(!laser.pin.is_high());
        // idempotent
        laser.unhold().unwrap();
        assert!(!laser.pin.is_high());
    }
}
