//! Particles and motion trails
//!
//! A particle keeps the position it was generated at so per-frame effects can
//! be recomputed from scratch. Trails are short-lived faded copies of particle
//! positions.

use crate::color::Rgba;
use crate::math3d::Vec3;

/// Smallest particle radius reachable through size nudges
pub const MIN_PARTICLE_SIZE: f32 = 1.0;
/// Largest particle radius reachable through size nudges
pub const MAX_PARTICLE_SIZE: f32 = 10.0;
/// Lifetime that maps to full trail opacity, whatever a trail was born with
pub const TRAIL_FADE_LIFETIME: f32 = 0.8;

/// Circular orbit state carried by orbiting particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: Vec3,
    pub radius: f32,
    pub angle: f32,
    /// Radians per second
    pub speed: f32,
}

impl Orbit {
    /// Tilt of the orbit plane, derived from the shell radius
    #[inline]
    pub fn tilt(&self) -> f32 {
        (self.radius / 60.0 - 1.0) * 0.3
    }

    /// Position on the tilted orbit at the current angle
    pub fn position(&self) -> Vec3 {
        let tilt = self.tilt();
        let (sin_a, cos_a) = self.angle.sin_cos();
        self.center
            + Vec3::new(
                self.radius * cos_a,
                self.radius * sin_a * tilt.cos(),
                self.radius * sin_a * tilt.sin(),
            )
    }
}

/// How a particle's position evolves between regenerations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Static,
    Orbiting(Orbit),
}

/// A single particle
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position, rewritten by orbit and distortion updates
    pub position: Vec3,
    /// Position at generation time; never changes afterwards
    origin: Vec3,
    pub velocity: Vec3,
    pub color: Rgba,
    pub size: f32,
    pub motion: Motion,
}

impl Particle {
    pub fn new(position: Vec3, color: Rgba, size: f32) -> Self {
        Self {
            position,
            origin: position,
            velocity: Vec3::zero(),
            color,
            size,
            motion: Motion::Static,
        }
    }

    /// Create a particle travelling on `orbit`, placed at `position`
    pub fn orbiting(position: Vec3, color: Rgba, size: f32, orbit: Orbit) -> Self {
        Self {
            motion: Motion::Orbiting(orbit),
            ..Self::new(position, color, size)
        }
    }

    /// Position the particle was generated at
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn is_orbiting(&self) -> bool {
        matches!(self.motion, Motion::Orbiting(_))
    }

    /// Speed used by the trail sampler
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Grow or shrink the base radius, clamped to the allowed range
    pub fn nudge_size(&mut self, delta: f32) {
        self.size = (self.size + delta).clamp(MIN_PARTICLE_SIZE, MAX_PARTICLE_SIZE);
    }
}

/// Faded after-image of a particle
#[derive(Debug, Clone, PartialEq)]
pub struct TrailPoint {
    pub position: Vec3,
    pub color: Rgba,
    /// Seconds left before removal
    pub lifetime: f32,
}

impl TrailPoint {
    pub fn new(position: Vec3, color: Rgba, lifetime: f32) -> Self {
        Self {
            position,
            color,
            lifetime,
        }
    }

    /// Opacity factor in [0, 1], measured against [`TRAIL_FADE_LIFETIME`]
    #[inline]
    pub fn remaining(&self) -> f32 {
        (self.lifetime / TRAIL_FADE_LIFETIME).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Color with alpha faded by remaining life
    #[inline]
    pub fn faded_color(&self) -> Rgba {
        self.color.faded(self.remaining())
    }
}

/// Unordered collection of live trail points
#[derive(Debug, Default)]
pub struct TrailBuffer {
    points: Vec<TrailPoint>,
}

impl TrailBuffer {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(1024),
        }
    }

    /// Add a trail point
    pub fn emit(&mut self, point: TrailPoint) {
        self.points.push(point);
    }

    /// Decrement every lifetime by `dt` and drop expired points
    pub fn age(&mut self, dt: f32) {
        for p in &mut self.points {
            p.lifetime -= dt;
        }

        // Order is irrelevant, so swap-remove avoids shifting the tail
        let mut i = 0;
        while i < self.points.len() {
            if self.points[i].is_alive() {
                i += 1;
            } else {
                self.points.swap_remove(i);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail(lifetime: f32) -> TrailPoint {
        TrailPoint::new(Vec3::zero(), Rgba::new(255, 255, 255, 120), lifetime)
    }

    #[test]
    fn test_trail_lifetime_decreases_by_dt() {
        let mut buffer = TrailBuffer::new();
        buffer.emit(trail(0.8));

        let mut previous = 0.8;
        for _ in 0..10 {
            buffer.age(0.016);
            let current = buffer.iter().next().map(|t| t.lifetime).unwrap();
            assert!(current < previous);
            assert!((previous - current - 0.016).abs() < 1e-5);
            previous = current;
        }
    }

    #[test]
    fn test_trail_removed_once_expired() {
        let mut buffer = TrailBuffer::new();
        buffer.emit(trail(0.05));
        buffer.emit(trail(0.8));

        buffer.age(0.03);
        assert_eq!(buffer.len(), 2);
        buffer.age(0.03);
        assert_eq!(buffer.len(), 1);
        assert!(buffer.iter().all(TrailPoint::is_alive));

        // Exactly reaching zero counts as expired
        let mut exact = TrailBuffer::new();
        exact.emit(trail(0.5));
        exact.age(0.5);
        assert!(exact.is_empty());
    }

    #[test]
    fn test_no_trail_survives_with_non_positive_lifetime() {
        let mut buffer = TrailBuffer::new();
        for i in 0..50 {
            buffer.emit(trail(0.01 * i as f32));
        }
        for _ in 0..40 {
            buffer.age(0.016);
            assert!(buffer.iter().all(|t| t.lifetime > 0.0));
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_trail_fades_with_remaining_life() {
        let mut t = trail(0.8);
        assert_eq!(t.faded_color().a, 120);
        t.lifetime = 0.4;
        assert_eq!(t.faded_color().a, 60);
    }

    #[test]
    fn test_short_trails_start_partly_faded() {
        // Fading is measured against a fixed lifetime, not the one at birth
        let short = trail(0.4);
        assert_eq!(short.faded_color().a, 60);

        let long = trail(2.0);
        assert_eq!(long.remaining(), 1.0);
        assert_eq!(long.faded_color().a, 120);

        let dead = trail(-0.1);
        assert_eq!(dead.faded_color().a, 0);
    }

    #[test]
    fn test_nudge_size_is_clamped() {
        let mut p = Particle::new(Vec3::zero(), Rgba::default(), 9.95);
        p.nudge_size(0.1);
        assert_eq!(p.size, MAX_PARTICLE_SIZE);
        p.size = 1.05;
        p.nudge_size(-0.1);
        assert_eq!(p.size, MIN_PARTICLE_SIZE);
    }

    #[test]
    fn test_orbit_tilt_follows_radius() {
        let orbit = Orbit {
            center: Vec3::zero(),
            radius: 60.0,
            angle: std::f32::consts::FRAC_PI_2,
            speed: 1.0,
        };
        // Radius 60 has no tilt, so the quarter-turn point is straight up
        assert_eq!(orbit.tilt(), 0.0);
        assert!(orbit.position().approx_eq(&Vec3::new(0.0, 60.0, 0.0), 1e-4));

        let wide = Orbit { radius: 200.0, ..orbit };
        assert!((wide.position().length() - 200.0).abs() < 1e-3);
        assert!(wide.position().z > 0.0);
    }

    #[test]
    fn test_origin_survives_position_changes() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        let mut p = Particle::new(start, Rgba::default(), 2.0);
        p.position = Vec3::new(9.0, 9.0, 9.0);
        assert_eq!(p.origin(), start);
    }
}
