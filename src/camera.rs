//! Camera transform and perspective projection
//!
//! Points are scaled by the global shape scale, rotated about X, then Y, then
//! Z, and projected with a fixed field of view onto a viewport whose center is
//! the screen center. The camera distance shifts points away from the eye.

use crate::math3d::{Vec2, Vec3};

/// Distance from eye to projection plane
pub const FOV: f32 = 400.0;
/// Projection depth floor; keeps the divisor away from zero
pub const MIN_PROJECTION_DEPTH: f32 = 0.1;
/// Points at or beyond this depth are culled
pub const MAX_DEPTH: f32 = 2000.0;

pub const MIN_DISTANCE: f32 = 50.0;
pub const MAX_DISTANCE: f32 = 2000.0;
pub const DEFAULT_DISTANCE: f32 = 500.0;
pub const DEFAULT_ANGLE_X: f32 = 0.5;
pub const DEFAULT_ANGLE_Y: f32 = 0.3;
pub const DEFAULT_ANGLE_Z: f32 = 0.0;

/// On-screen radius bounds for particles
const MIN_SCREEN_RADIUS: f32 = 0.5;
const MAX_SCREEN_RADIUS: f32 = 10.0;

/// Orbiting camera looking at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    distance: f32,
    pub angle_x: f32,
    pub angle_y: f32,
    /// Only changed by code; input never touches it
    pub angle_z: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            angle_x: DEFAULT_ANGLE_X,
            angle_y: DEFAULT_ANGLE_Y,
            angle_z: DEFAULT_ANGLE_Z,
        }
    }
}

impl Camera {
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Set the distance, saturating at the zoom bounds
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Multiply the distance by `factor`, saturating at the zoom bounds
    pub fn zoom(&mut self, factor: f32) {
        self.set_distance(self.distance * factor);
    }

    /// Scale and rotate a world point into camera space
    #[inline]
    pub fn transform(&self, point: Vec3, shape_scale: f32) -> Vec3 {
        (point * shape_scale).rotate_xyz(self.angle_x, self.angle_y, self.angle_z)
    }

    /// Depth of a camera-space point in front of the eye
    #[inline]
    pub fn depth(&self, rotated: Vec3) -> f32 {
        rotated.z + self.distance
    }

    /// Perspective-project a camera-space point onto a `width` x `height` viewport
    #[inline]
    pub fn project(&self, rotated: Vec3, width: f32, height: f32) -> Vec2 {
        let z = self.depth(rotated).max(MIN_PROJECTION_DEPTH);
        let scale = FOV / z;
        Vec2::new(rotated.x * scale + width / 2.0, rotated.y * scale + height / 2.0)
    }
}

/// A point ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    pub depth: f32,
}

impl Projected {
    /// Perspective radius for a particle of base `size`
    #[inline]
    pub fn radius(&self, size: f32) -> f32 {
        (size * FOV / self.depth).clamp(MIN_SCREEN_RADIUS, MAX_SCREEN_RADIUS)
    }

    /// Alpha multiplier: 1.0 at the eye fading to 0.4 at the far plane
    #[inline]
    pub fn fade(&self) -> f32 {
        let depth_factor = 1.0 - self.depth / MAX_DEPTH;
        0.4 + 0.6 * depth_factor
    }
}

/// Transform and project `point`, or `None` if it falls outside the depth range
pub fn project_visible(
    camera: &Camera,
    point: Vec3,
    shape_scale: f32,
    width: f32,
    height: f32,
) -> Option<Projected> {
    let rotated = camera.transform(point, shape_scale);
    let depth = camera.depth(rotated);
    if depth <= 0.0 || depth >= MAX_DEPTH {
        return None;
    }
    Some(Projected {
        screen: camera.project(rotated, width, height),
        depth,
    })
}
