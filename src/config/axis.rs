//! Per-axis configuration and types.

use serde::Deserialize;

use crate::axis::PhaseTable;

/// Policy for handling travel beyond the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Abort the program with an error.
    #[default]
    Fault,
    /// Log, drop the step and keep going.
    Ignore,
}

/// Axis configuration as written in TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Minimum position in steps.
    pub min_position: i64,

    /// Maximum position in steps.
    pub max_position: i64,

    /// What to do when a step would leave the bounds.
    #[serde(default)]
    pub boundary_policy: BoundaryPolicy,

    /// Pause before every whole step, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: f64,

    /// Coil energization sequence.
    #[serde(default)]
    pub phase_table: PhaseTable,
}

fn default_step_delay_ms() -> f64 {
    0.5
}

impl AxisConfig {
    /// Runtime settings derived from this configuration.
    pub fn settings(&self) -> AxisSettings {
        AxisSettings {
            min_position: self.min_position,
            max_position: self.max_position,
            boundary_policy: self.boundary_policy,
            step_delay_us: (self.step_delay_ms * 1000.0) as u32,
            phase_table: self.phase_table,
        }
    }
}

/// Axis settings converted for runtime use.
#[derive(Debug, Clone)]
pub struct AxisSettings {
    /// Minimum position in steps.
    pub min_position: i64,
    /// Maximum position in steps.
    pub max_position: i64,
    /// Boundary policy.
    pub boundary_policy: BoundaryPolicy,
    /// Pause before every whole step, in microseconds.
    pub step_delay_us: u32,
    /// Coil energization sequence.
    pub phase_table: PhaseTable,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            min_position: i64::MIN,
            max_position: i64::MAX,
            boundary_policy: BoundaryPolicy::default(),
            step_delay_us: 500,
            phase_table: PhaseTable::default(),
        }
    }
}
