//! Geometry primitives for motion calculation.
//!
//! Provides [`Vector3`], the logical position/displacement type in machine
//! units (millimeters). All operations are pure; trigonometry goes through
//! `libm` so the type works without `std`.

use core::f64::consts::PI;
use core::ops::{Add, Mul, Sub};

use libm::{acos, atan2, cos, sin, sqrt};

/// A position or displacement in machine units.
///
/// Immutable value type; every operation returns a new vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// The origin (0, 0, 0).
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Full Euclidean length.
    #[inline]
    pub fn length(&self) -> f64 {
        sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Euclidean length of the XY projection.
    #[inline]
    pub fn length_xy(&self) -> f64 {
        sqrt(self.x * self.x + self.y * self.y)
    }

    /// Unit vector in the same direction.
    ///
    /// Returns the zero vector unchanged to avoid a division by zero.
    pub fn unit(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        Self::new(self.x / len, self.y / len, self.z / len)
    }

    /// Rotate about the Z axis by `angle` radians (counter-clockwise
    /// positive). Z component is unchanged.
    pub fn rotated_z(&self, angle: f64) -> Self {
        self.rotated_z_fast(sin(angle), cos(angle))
    }

    /// Rotate about the Z axis with precomputed `sin`/`cos` of the angle.
    ///
    /// Used in the arc inner loop where the step angle is fixed.
    #[inline]
    pub fn rotated_z_fast(&self, sin_theta: f64, cos_theta: f64) -> Self {
        Self::new(
            self.x * cos_theta - self.y * sin_theta,
            self.x * sin_theta + self.y * cos_theta,
            self.z,
        )
    }

    /// XY-plane angle of this vector, normalized to `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        let a = atan2(self.y, self.x);
        if a < 0.0 {
            a + 2.0 * PI
        } else {
            a
        }
    }

    /// Unsigned angle between this vector and `other` in the XY plane.
    pub fn angle_between(&self, other: &Self) -> f64 {
        let denominator = self.length_xy() * other.length_xy();
        if denominator == 0.0 {
            return 0.0;
        }
        let dot = self.x * other.x + self.y * other.y;
        // clamp against rounding before acos
        let cos_angle = (dot / denominator).clamp(-1.0, 1.0);
        acos(cos_angle)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
