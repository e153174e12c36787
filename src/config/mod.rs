//! Configuration module for gcode-motion.
//!
//! Provides types for loading and validating machine configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod axis;
mod kinematics;
#[cfg(feature = "std")]
mod loader;
mod system;
mod validation;

pub use axis::{AxisConfig, AxisSettings, BoundaryPolicy};
pub use kinematics::KinematicsConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
