//! Coordinate transforms between work space and motor space.

use crate::config::KinematicsConfig;
use crate::geometry::Vector3;

/// Mapping from a work-space position to per-motor positions.
///
/// The controller transforms absolute positions and differences them,
/// so nonlinear maps stay exact at every commanded point.
#[derive(Debug, Clone, PartialEq)]
pub enum Kinematics {
    /// Work coordinates are motor coordinates.
    Identity,
    /// Hanging plotter suspended from two anchors.
    TwoAnchor(TwoAnchor),
}

impl Kinematics {
    /// Build the transform selected by a configuration.
    pub fn from_config(config: &KinematicsConfig) -> Self {
        match *config {
            KinematicsConfig::Identity => Kinematics::Identity,
            KinematicsConfig::TwoAnchor {
                width,
                height,
                scale,
            } => Kinematics::TwoAnchor(TwoAnchor::new(width, height, scale)),
        }
    }

    /// Map a work-space position to motor positions.
    pub fn apply(&self, position: Vector3) -> Vector3 {
        match self {
            Kinematics::Identity => position,
            Kinematics::TwoAnchor(anchor) => anchor.apply(position),
        }
    }
}

/// Two-anchor cord geometry.
///
/// Anchors sit at `(-width/2, -height/2)` and `(width/2, -height/2)`;
/// the work origin is where both cords have their zero length
/// `sqrt((width/2)^2 + (height/2)^2)`. Motor positions are the scaled
/// change in cord length, so the origin maps to motor zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoAnchor {
    left: Vector3,
    right: Vector3,
    zero_length: f64,
    scale: f64,
}

impl TwoAnchor {
    /// Geometry from anchor spacing, drop height and step scale.
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self {
            left: Vector3::new(-half_width, -half_height, 0.0),
            right: Vector3::new(half_width, -half_height, 0.0),
            zero_length: libm::sqrt(half_width * half_width + half_height * half_height),
            scale,
        }
    }

    /// Cord-length positions for a work-space point.
    ///
    /// `x` carries the left cord, `y` the right; `z` passes through
    /// unscaled since the pen lift is not part of the cord geometry.
    pub fn apply(&self, position: Vector3) -> Vector3 {
        let a = (self.zero_length - (position - self.left).length_xy()) * self.scale;
        let b = (self.zero_length - (position - self.right).length_xy()) * self.scale;
        Vector3::new(a, b, position.z)
    }
}
