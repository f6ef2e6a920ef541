//! Ripple/twist distortion field
//!
//! The displacement is a pure function of a base position and time, so it is
//! recomputed every frame and never accumulates.

use crate::math3d::Vec3;

/// Below this magnitude the field is switched off
pub const DISTORTION_EPSILON: f32 = 0.001;
/// Points this close to the origin are left alone
const MIN_RADIUS: f32 = 0.1;
/// Axis perturbations shorter than this are ignored
const MIN_AXIS_LENGTH: f32 = 0.001;

/// Drag sensitivity for the amount and axis
const AMOUNT_PER_PIXEL: f32 = 0.005;
const AXIS_X_PER_PIXEL: f32 = 0.002;
const AXIS_Y_PER_PIXEL: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distortion {
    amount: f32,
    /// Unit-length wave direction
    axis: Vec3,
}

impl Default for Distortion {
    fn default() -> Self {
        Self {
            amount: 0.0,
            axis: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl Distortion {
    #[inline]
    pub fn amount(&self) -> f32 {
        self.amount
    }

    #[cfg(test)]
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.amount.abs() > DISTORTION_EPSILON
    }

    /// Apply a pointer drag of (`dx`, `dy`) pixels.
    ///
    /// The axis is re-normalized afterwards; a perturbation that would collapse
    /// it to (almost) zero length leaves the previous axis in place.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.amount += dx * AMOUNT_PER_PIXEL;

        let candidate = Vec3::new(
            self.axis.x + dy * AXIS_X_PER_PIXEL,
            self.axis.y + dx * AXIS_Y_PER_PIXEL,
            self.axis.z,
        );
        if candidate.length() > MIN_AXIS_LENGTH {
            self.axis = candidate.normalize_or_keep(MIN_AXIS_LENGTH);
        }
    }

    /// Displaced position of `base` at `time`
    pub fn displace(&self, base: Vec3, time: f32) -> Vec3 {
        let radius = base.length();
        if radius <= MIN_RADIUS {
            return base;
        }

        let wave = (radius * 0.05 + time * 2.0).sin() * self.amount;
        let twist = (radius * 0.03 + time).cos() * self.amount * 0.5;
        (base + self.axis * wave).rotate_z(twist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_stays_unit_length() {
        let mut d = Distortion::default();
        let drags = [
            (3.0, -7.0),
            (120.0, 45.0),
            (-800.0, 0.0),
            (0.0, 1000.0),
            (-1000.0, -500.0),
            (0.5, 0.25),
            (-1000.0, 0.0),
        ];
        for _ in 0..20 {
            for &(dx, dy) in &drags {
                d.drag(dx, dy);
                assert!((d.axis().length() - 1.0).abs() < 1e-4, "{:?}", d.axis());
            }
        }
    }

    #[test]
    fn test_degenerate_drag_keeps_axis() {
        let mut d = Distortion::default();
        // Pulls axis.y from 1 to exactly 0
        d.drag(-1000.0, 0.0);
        assert_eq!(d.axis(), Vec3::new(0.0, 1.0, 0.0));
        assert!((d.amount() + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_displacement_does_not_accumulate() {
        let mut d = Distortion::default();
        d.drag(40.0, 10.0);
        let base = Vec3::new(50.0, -20.0, 30.0);
        let first = d.displace(base, 1.25);
        let second = d.displace(base, 1.25);
        assert_eq!(first, second);
        assert_ne!(first, base);
    }

    #[test]
    fn test_inactive_below_epsilon() {
        let mut d = Distortion::default();
        assert!(!d.is_active());
        d.drag(0.1, 0.0);
        assert!(!d.is_active());
        d.drag(1.0, 0.0);
        assert!(d.is_active());
    }

    #[test]
    fn test_points_near_origin_are_untouched() {
        let mut d = Distortion::default();
        d.drag(100.0, 0.0);
        let base = Vec3::new(0.05, 0.0, 0.0);
        assert_eq!(d.displace(base, 3.0), base);
    }
}
