//! Session state and per-frame animation
//!
//! Everything the frame loop mutates lives in one [`SessionState`]: the active
//! shape and its points, the trail buffer, the camera, the shape scale, the
//! distortion field and the animation toggles.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::camera::Camera;
use crate::distortion::Distortion;
use crate::particles::{Motion, TrailBuffer, TrailPoint};
use crate::shapes::{self, PointSet, ShapeKind, ShapeParams};

pub const MIN_SHAPE_SCALE: f32 = 0.1;
pub const MAX_SHAPE_SCALE: f32 = 5.0;
pub const DEFAULT_SHAPE_SCALE: f32 = 1.0;

/// Transition blend advance per second (a flash lasts half a second)
const TRANSITION_RATE: f32 = 2.0;
/// Camera Y rotation per second while auto-rotating
const AUTO_ROTATE_SPEED: f32 = 0.3;
/// Hue degrees per second while color cycling
const HUE_CYCLE_SPEED: f32 = 30.0;

const ORBIT_TRAIL_ALPHA: u8 = 120;
const ORBIT_TRAIL_LIFETIME: f32 = 0.8;
const VELOCITY_TRAIL_ALPHA: u8 = 60;
const VELOCITY_TRAIL_LIFETIME: f32 = 0.4;
/// Particles slower than this never leave velocity trails
const VELOCITY_TRAIL_MIN_SPEED: f32 = 0.1;
const MAX_VELOCITY_SAMPLES: usize = 10;

/// Full-screen flash played when the shape changes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transition {
    active: bool,
    progress: f32,
}

impl Transition {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Blend in [0, 1)
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    fn start(&mut self) {
        self.active = true;
        self.progress = 0.0;
    }

    fn advance(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.progress += dt * TRANSITION_RATE;
        if self.progress >= 1.0 {
            self.progress = 0.0;
            self.active = false;
        }
    }
}

pub struct SessionState {
    shape: ShapeKind,
    params: ShapeParams,
    points: PointSet,
    trails: TrailBuffer,
    pub camera: Camera,
    shape_scale: f32,
    pub distortion: Distortion,
    /// Whether positions currently hold distorted values
    distorted: bool,
    pub auto_rotate: bool,
    pub color_cycle: bool,
    hue_offset: f32,
    time: f32,
    pulse: f32,
    transition: Transition,
    rng: SmallRng,
}

impl SessionState {
    /// Start a session showing the sphere
    pub fn new(rng: SmallRng) -> Self {
        let mut state = Self {
            shape: ShapeKind::Sphere,
            params: ShapeParams::default(),
            points: PointSet::default(),
            trails: TrailBuffer::new(),
            camera: Camera::default(),
            shape_scale: DEFAULT_SHAPE_SCALE,
            distortion: Distortion::default(),
            distorted: false,
            auto_rotate: true,
            color_cycle: true,
            hue_offset: 0.0,
            time: 0.0,
            pulse: 0.5,
            transition: Transition::default(),
            rng,
        };
        state.regenerate();
        state
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn trails(&self) -> &TrailBuffer {
        &self.trails
    }

    pub fn shape_scale(&self) -> f32 {
        self.shape_scale
    }

    #[cfg(test)]
    pub fn hue_offset(&self) -> f32 {
        self.hue_offset
    }

    #[cfg(test)]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Unit-amplitude sinusoid in [0, 1]
    pub fn pulse(&self) -> f32 {
        self.pulse
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    // ========================================================================
    // Parameter changes
    // ========================================================================

    /// Replace the point set with a fresh one for the current shape and scale
    pub fn regenerate(&mut self) {
        self.points = shapes::generate(
            self.shape,
            &self.params,
            self.shape_scale,
            self.hue_offset,
            self.time,
            &mut self.rng,
        );
        self.distorted = false;
        debug!(
            "generated {}: {} structured + {} filler points",
            self.shape.name(),
            self.points.structured_count(),
            self.points.filler_count()
        );
    }

    /// Set the shape scale (saturating at its bounds) and regenerate
    pub fn set_shape_scale(&mut self, scale: f32) {
        self.shape_scale = scale.clamp(MIN_SHAPE_SCALE, MAX_SHAPE_SCALE);
        self.regenerate();
    }

    /// Multiply the shape scale by `factor` and regenerate
    pub fn scale_shape(&mut self, factor: f32) {
        self.set_shape_scale(self.shape_scale * factor);
    }

    /// Switch to the next shape and start the transition flash
    pub fn advance_shape(&mut self) {
        self.shape = self.shape.next();
        self.transition.start();
        self.regenerate();
        info!("shape: {}", self.shape.name());
    }

    /// Restore camera, distortion and scale defaults and regenerate
    pub fn reset_view(&mut self) {
        self.camera = Camera::default();
        self.distortion = Distortion::default();
        self.shape_scale = DEFAULT_SHAPE_SCALE;
        self.regenerate();
        info!("view reset");
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
        info!("auto-rotate {}", on_off(self.auto_rotate));
    }

    pub fn toggle_color_cycle(&mut self) {
        self.color_cycle = !self.color_cycle;
        info!("color cycle {}", on_off(self.color_cycle));
    }

    /// Grow or shrink every particle, each clamped to the size bounds
    pub fn nudge_particle_size(&mut self, delta: f32) {
        for p in self.points.particles_mut() {
            p.nudge_size(delta);
        }
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Advance the session by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.pulse = (self.time * 2.0).sin() * 0.5 + 0.5;
        self.transition.advance(dt);

        if self.auto_rotate {
            self.camera.angle_y += dt * AUTO_ROTATE_SPEED;
        }
        if self.color_cycle {
            // Hue wraps anyway; keeping it small preserves float precision
            self.hue_offset = (self.hue_offset + dt * HUE_CYCLE_SPEED).rem_euclid(360.0);
        }

        self.advance_orbits(dt);
        self.trails.age(dt);
        self.sample_velocity_trails();
        self.apply_distortion();
    }

    /// Move orbiting particles along their shells, leaving a trail point each
    fn advance_orbits(&mut self, dt: f32) {
        for p in self.points.particles_mut() {
            if let Motion::Orbiting(ref mut orbit) = p.motion {
                orbit.angle += dt * orbit.speed;
                p.position = orbit.position();
                self.trails.emit(TrailPoint::new(
                    p.position,
                    p.color.with_alpha(ORBIT_TRAIL_ALPHA),
                    ORBIT_TRAIL_LIFETIME,
                ));
            }
        }
    }

    /// Emit faint trails behind a few randomly chosen fast particles.
    ///
    /// Nothing drives particle velocity yet, so this only fires when velocity
    /// is set from outside.
    fn sample_velocity_trails(&mut self) {
        let count = self.points.len();
        if count <= 100 {
            return;
        }
        let samples = MAX_VELOCITY_SAMPLES.min(count / 100);
        for _ in 0..samples {
            let p = &self.points.particles()[self.rng.gen_range(0..count)];
            if p.speed() > VELOCITY_TRAIL_MIN_SPEED {
                self.trails.emit(TrailPoint::new(
                    p.position,
                    p.color.with_alpha(VELOCITY_TRAIL_ALPHA),
                    VELOCITY_TRAIL_LIFETIME,
                ));
            }
        }
    }

    /// Recompute positions from their base under the distortion field
    fn apply_distortion(&mut self) {
        if self.distortion.is_active() {
            for p in self.points.particles_mut() {
                // Orbiters distort around where their orbit put them this frame
                let base = if p.is_orbiting() { p.position } else { p.origin() };
                p.position = self.distortion.displace(base, self.time);
            }
            self.distorted = true;
        } else if self.distorted {
            for p in self.points.particles_mut() {
                if !p.is_orbiting() {
                    p.position = p.origin();
                }
            }
            self.distorted = false;
        }
    }

    /// Window title summarising the session
    pub fn status_line(&self) -> String {
        format!(
            "3D Particle Morph - {} | distance {} | scale {:.2} | distort {:.2} | rotate {} | colors {}",
            self.shape.name(),
            self.camera.distance() as i32,
            self.shape_scale,
            self.distortion.amount(),
            if self.auto_rotate { "auto" } else { "manual" },
            on_off(self.color_cycle),
        )
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
