//! Kinematics selection in configuration.

use serde::Deserialize;

/// Coordinate transform applied between work coordinates and motor
/// positions.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KinematicsConfig {
    /// Cartesian machine; work coordinates map straight to motors.
    #[default]
    Identity,
    /// Hanging plotter with two anchor points along the top edge.
    TwoAnchor {
        /// Horizontal distance between the anchors, in work units.
        width: f64,
        /// Vertical distance from the anchor line to the work origin.
        height: f64,
        /// Scale from cord length to motor steps.
        scale: f64,
    },
}
