//! Axis actuator trait and shared sub-step accumulator.

use crate::config::{AxisSettings, BoundaryPolicy};
use crate::error::AxisError;

/// Direction of travel along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Positive step direction.
    #[default]
    Clockwise,
    /// Negative step direction.
    CounterClockwise,
}

impl Direction {
    /// Signed unit step for this direction.
    #[inline]
    pub fn sign(&self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// Direction matching the sign of a displacement.
    ///
    /// Zero maps to `Clockwise`; callers never advance by zero anyway.
    #[inline]
    pub fn from_sign(value: f64) -> Self {
        if value < 0.0 {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }
}

/// A single controllable axis.
///
/// Implementations accept fractional advances and emit whole steps to
/// their hardware only when the accumulated fraction crosses an integer
/// boundary.
pub trait Actuator {
    /// Advance the axis by `fraction` of a step in `direction`.
    ///
    /// `fraction` is in `(0.0, 1.0]`.
    fn advance(&mut self, direction: Direction, fraction: f64) -> Result<(), AxisError>;

    /// Current integer step position.
    fn position(&self) -> i64;

    /// Accumulated fractional position.
    ///
    /// Always within one step of [`Actuator::position`].
    fn float_position(&self) -> f64;

    /// De-energize the axis.
    ///
    /// Must be idempotent; called on every shutdown path.
    fn unhold(&mut self) -> Result<(), AxisError>;
}

/// Position bookkeeping shared by all actuator implementations.
///
/// Tracks the fractional accumulator and enforces the travel bounds
/// configured for the axis. The invariant `|float - int| < 1.0` holds
/// after every call, including boundary faults.
#[derive(Debug, Clone)]
pub struct AxisCore {
    position: i64,
    float_position: f64,
    settings: AxisSettings,
}

impl AxisCore {
    /// Core at step position zero.
    pub fn new(settings: AxisSettings) -> Self {
        Self {
            position: 0,
            float_position: 0.0,
            settings,
        }
    }

    /// Integer step position.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Fractional accumulator.
    #[inline]
    pub fn float_position(&self) -> f64 {
        self.float_position
    }

    /// Configured settings for this axis.
    #[inline]
    pub fn settings(&self) -> &AxisSettings {
        &self.settings
    }

    /// Pre-step delay in microseconds.
    #[inline]
    pub fn step_delay_us(&self) -> u32 {
        self.settings.step_delay_us
    }

    /// Accumulate a fractional advance, returning the new integer
    /// position when the accumulator crosses a whole step.
    ///
    /// A prospective step beyond the configured bounds is never taken.
    /// Under [`BoundaryPolicy::Fault`] it is reported as
    /// [`AxisError::BoundaryExceeded`]; under [`BoundaryPolicy::Ignore`]
    /// it is logged and dropped. Either way the accumulator is reset to
    /// the held integer position so repeated advances cannot creep past
    /// the bound.
    pub fn accumulate(
        &mut self,
        direction: Direction,
        fraction: f64,
    ) -> Result<Option<i64>, AxisError> {
        self.float_position += fraction * direction.sign() as f64;

        if libm::fabs(self.float_position - self.position as f64) < 1.0 {
            return Ok(None);
        }

        let prospective = self.position + direction.sign();
        if prospective < self.settings.min_position || prospective > self.settings.max_position {
            self.float_position = self.position as f64;
            return match self.settings.boundary_policy {
                BoundaryPolicy::Fault => Err(AxisError::BoundaryExceeded {
                    position: prospective,
                    min: self.settings.min_position,
                    max: self.settings.max_position,
                }),
                BoundaryPolicy::Ignore => {
                    log::warn!(
                        "axis step to {} outside [{}, {}], ignored",
                        prospective,
                        self.settings.min_position,
                        self.settings.max_position
                    );
                    Ok(None)
                }
            };
        }

        self.position = prospective;
        Ok(Some(prospective))
    }
}
