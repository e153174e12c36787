//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, KinematicsConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Resolution and default speed are positive
/// - All three motion axes are configured
/// - Axis bounds are ordered and step delays non-negative
/// - Anchor geometry is positive when two-anchor kinematics is selected
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    if config.resolution <= 0.0 || !config.resolution.is_finite() {
        return Err(Error::Config(ConfigError::InvalidResolution(
            config.resolution,
        )));
    }

    if config.default_speed <= 0.0 || !config.default_speed.is_finite() {
        return Err(Error::Config(ConfigError::InvalidSpeed(
            config.default_speed,
        )));
    }

    for (name, letter) in [("x", 'x'), ("y", 'y'), ("z", 'z')] {
        let axis = config
            .axis(name)
            .ok_or(Error::Config(ConfigError::AxisNotConfigured(letter)))?;
        validate_axis(axis)?;
    }

    validate_kinematics(&config.kinematics)?;

    Ok(())
}

fn validate_axis(config: &AxisConfig) -> Result<()> {
    if config.min_position >= config.max_position {
        return Err(Error::Config(ConfigError::InvalidBounds {
            min: config.min_position,
            max: config.max_position,
        }));
    }

    if config.step_delay_ms < 0.0 || !config.step_delay_ms.is_finite() {
        return Err(Error::Config(ConfigError::InvalidStepDelay(
            config.step_delay_ms,
        )));
    }

    Ok(())
}

fn validate_kinematics(config: &KinematicsConfig) -> Result<()> {
    if let KinematicsConfig::TwoAnchor {
        width,
        height,
        scale,
    } = *config
    {
        if width <= 0.0 || height <= 0.0 || scale <= 0.0 {
            return Err(Error::Config(ConfigError::InvalidAnchorGeometry {
                width,
                height,
                scale,
            }));
        }
    }

    Ok(())
}
