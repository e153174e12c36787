//! Builder pattern for Controller.

use embedded_hal::delay::DelayNs;

use crate::axis::Actuator;
use crate::config::SystemConfig;
use crate::error::{ConfigError, Error, Result};
use crate::kinematics::Kinematics;
use crate::observer::MotionObserver;
use crate::tool::Tool;

use super::Controller;

/// Builder for creating Controller instances.
///
/// Axes, tool and delay are supplied up front since their types carry
/// the hardware bindings; tuning comes from explicit setters or a
/// [`SystemConfig`].
pub struct ControllerBuilder<X, Y, Z, T, D, O>
where
    X: Actuator,
    Y: Actuator,
    Z: Actuator,
    T: Tool,
    D: DelayNs,
    O: MotionObserver,
{
    x: X,
    y: Y,
    z: Z,
    tool: T,
    delay: D,
    observer: O,
    resolution: f64,
    default_speed: f64,
    kinematics: Kinematics,
}

impl<X, Y, Z, T, D> ControllerBuilder<X, Y, Z, T, D, ()>
where
    X: Actuator,
    Y: Actuator,
    Z: Actuator,
    T: Tool,
    D: DelayNs,
{
    /// Builder with no observer and identity kinematics.
    pub fn new(x: X, y: Y, z: Z, tool: T, delay: D) -> Self {
        Self {
            x,
            y,
            z,
            tool,
            delay,
            observer: (),
            resolution: 1.0,
            default_speed: 1.0,
            kinematics: Kinematics::Identity,
        }
    }
}

impl<X, Y, Z, T, D, O> ControllerBuilder<X, Y, Z, T, D, O>
where
    X: Actuator,
    Y: Actuator,
    Z: Actuator,
    T: Tool,
    D: DelayNs,
    O: MotionObserver,
{
    /// Set steps per machine unit.
    pub fn resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the feed rate used before a program sets one.
    pub fn default_speed(mut self, speed: f64) -> Self {
        self.default_speed = speed;
        self
    }

    /// Set the coordinate transform.
    pub fn kinematics(mut self, kinematics: Kinematics) -> Self {
        self.kinematics = kinematics;
        self
    }

    /// Attach an observer, replacing any previous one.
    pub fn observer<O2: MotionObserver>(
        self,
        observer: O2,
    ) -> ControllerBuilder<X, Y, Z, T, D, O2> {
        ControllerBuilder {
            x: self.x,
            y: self.y,
            z: self.z,
            tool: self.tool,
            delay: self.delay,
            observer,
            resolution: self.resolution,
            default_speed: self.default_speed,
            kinematics: self.kinematics,
        }
    }

    /// Take resolution, default speed and kinematics from a
    /// configuration. Axis settings are applied when the actuators are
    /// constructed, not here.
    pub fn from_config(mut self, config: &SystemConfig) -> Self {
        self.resolution = config.resolution;
        self.default_speed = config.default_speed;
        self.kinematics = Kinematics::from_config(&config.kinematics);
        self
    }

    /// Build the Controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution or default speed is not a
    /// positive finite number.
    pub fn build(self) -> Result<Controller<X, Y, Z, T, D, O>> {
        if self.resolution <= 0.0 || !self.resolution.is_finite() {
            return Err(Error::Config(ConfigError::InvalidResolution(
                self.resolution,
            )));
        }
        if self.default_speed <= 0.0 || !self.default_speed.is_finite() {
            return Err(Error::Config(ConfigError::InvalidSpeed(self.default_speed)));
        }

        Ok(Controller::new(
            self.x,
            self.y,
            self.z,
            self.tool,
            self.delay,
            self.observer,
            self.resolution,
            self.default_speed,
            self.kinematics,
        ))
    }
}
