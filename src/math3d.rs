//! 3D Math Utilities
//!
//! Vectors, axis rotations and the low-discrepancy sampling shared by the
//! shape generators.

use std::f32::consts::PI;
use std::ops::{Add, Mul, Sub};

/// Golden-angle increment used by Fibonacci sphere sampling
pub const GOLDEN_ANGLE: f32 = PI * 3.236_068; // PI * (1 + sqrt(5))

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Point on a sphere from polar angle `phi` and azimuth `theta`
    #[inline]
    pub fn from_spherical(radius: f32, phi: f32, theta: f32) -> Self {
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        Self {
            x: radius * sin_phi * cos_theta,
            y: radius * sin_phi * sin_theta,
            z: radius * cos_phi,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction.
    /// Vectors shorter than `min_len` are returned unchanged.
    #[inline]
    pub fn normalize_or_keep(&self, min_len: f32) -> Self {
        let len = self.length();
        if len > min_len {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            *self
        }
    }

    /// Approximate equality check for floating point comparison
    #[cfg(test)]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    /// Rotate around X axis
    #[inline]
    pub fn rotate_x(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Rotate around Y axis
    #[inline]
    pub fn rotate_y(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Rotate around Z axis
    #[inline]
    pub fn rotate_z(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }

    /// Apply X, then Y, then Z rotation. The order matters.
    #[inline]
    pub fn rotate_xyz(&self, rx: f32, ry: f32, rz: f32) -> Self {
        self.rotate_x(rx).rotate_y(ry).rotate_z(rz)
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// 2D Vector (screen coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[cfg(test)]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Approximate equality check for floating point comparison
    #[cfg(test)]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

/// Linear interpolation between two Vec3 points
///
/// Note: `t` is not clamped to [0, 1], allowing extrapolation.
#[inline]
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3 {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
        z: a.z + (b.z - a.z) * t,
    }
}

/// Polar and azimuth angles of sample `i` out of `count` on a Fibonacci sphere.
///
/// Returns `(phi, theta)`; `theta` is not wrapped.
#[inline]
pub fn fibonacci_angles(i: usize, count: usize) -> (f32, f32) {
    let phi = (1.0 - 2.0 * (i as f32 + 0.5) / count as f32).acos();
    let theta = GOLDEN_ANGLE * i as f32;
    (phi, theta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let composed = p.rotate_xyz(0.4, 0.7, 1.1);
        let manual = p.rotate_x(0.4).rotate_y(0.7).rotate_z(1.1);
        assert!(composed.approx_eq(&manual, 1e-6));

        // A different order gives a different point
        let reversed = p.rotate_z(1.1).rotate_y(0.7).rotate_x(0.4);
        assert!(!composed.approx_eq(&reversed, 1e-3));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let p = Vec3::new(-3.0, 4.0, 12.0);
        let r = p.rotate_xyz(2.0, -1.3, 0.25);
        assert!((r.length() - 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let r = Vec3::new(1.0, 0.0, 0.0).rotate_y(PI / 2.0);
        assert!(r.approx_eq(&Vec3::new(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn test_normalize_keeps_tiny_vectors() {
        let tiny = Vec3::new(0.0001, 0.0, 0.0);
        assert_eq!(tiny.normalize_or_keep(0.001), tiny);
        let n = Vec3::new(0.0, 3.0, 4.0).normalize_or_keep(0.001);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fibonacci_angles_span_the_sphere() {
        let (first_phi, _) = fibonacci_angles(0, 300);
        let (last_phi, _) = fibonacci_angles(299, 300);
        assert!(first_phi < 0.2);
        assert!(last_phi > PI - 0.2);
        for i in 0..300 {
            let (phi, _) = fibonacci_angles(i, 300);
            assert!(phi.is_finite());
        }
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-1.0, 0.0, 5.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert!(lerp(a, b, 1.0).approx_eq(&b, 1e-6));
        assert!(lerp(a, b, 0.5).approx_eq(&Vec3::new(0.0, 1.0, 4.0), 1e-6));
    }
}
