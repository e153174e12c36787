//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::gcode::ParsePolicy;

use super::axis::AxisConfig;
use super::kinematics::KinematicsConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Steps per work unit.
    pub resolution: f64,

    /// Feed rate used before the program sets one, in units per second.
    #[serde(default = "default_speed")]
    pub default_speed: f64,

    /// How unknown words in a program are treated.
    #[serde(default)]
    pub parse_policy: ParsePolicy,

    /// Axis configurations keyed by axis name (`x`, `y`, `z`).
    pub axes: FnvIndexMap<String<8>, AxisConfig, 4>,

    /// Coordinate transform.
    #[serde(default)]
    pub kinematics: KinematicsConfig,
}

fn default_speed() -> f64 {
    1.0
}

impl SystemConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all configured axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }
}
