//! Extruded 3D heart with a rejection-sampled core

use std::f32::consts::{PI, TAU};

use rand::Rng;

use super::{PointSet, Sampling};
use crate::color::hsl_to_rgba;
use crate::math3d::Vec3;
use crate::particles::Particle;

const LAYERS: usize = 12;
const POINTS_PER_LAYER: usize = 400;
const INNER_CANDIDATES: usize = 800;
/// Curve units to world units, before the shape scale
const CURVE_SCALE: f32 = 0.08;
/// Acceptance bound for the implicit heart inequality
const INSIDE_THRESHOLD: f32 = 0.15;

/// Classic parametric heart outline, in curve units (y up)
#[inline]
fn outline(u: f32) -> (f32, f32) {
    let x = 16.0 * u.sin().powi(3);
    let y = 13.0 * u.cos() - 5.0 * (2.0 * u).cos() - 2.0 * (3.0 * u).cos() - (4.0 * u).cos();
    (x, y)
}

/// Implicit heart polynomial `(x² + y² − 1)³ − x²y³`; negative inside the curve
#[inline]
fn implicit(x: f32, y: f32) -> f32 {
    let sum = x * x + y * y - 1.0;
    sum * sum * sum - x * x * y * y * y
}

pub(super) fn generate(base_scale: f32, sampling: &Sampling, rng: &mut impl Rng) -> PointSet {
    let scale = base_scale * sampling.scale;
    let half = LAYERS as f32 / 2.0;
    let mut set = PointSet::with_capacity(LAYERS * POINTS_PER_LAYER + INNER_CANDIDATES);

    for layer in 0..LAYERS {
        // -1 at the back layer, 0 in the middle
        let layer_factor = (layer as f32 - half) / half;
        let thickness = 8.0 * layer_factor * (0.7 + 0.3 * (layer as f32 * 3.0).cos());

        // Deep red in the middle layers, lighter pink towards the faces
        let red = 0.6 + 0.4 * (1.0 - layer_factor.abs());
        let pink = layer_factor.abs() * 0.6;
        let hue = 330.0 + 30.0 * layer_factor;
        let color = hsl_to_rgba(hue, 0.8, red * 0.5 + pink * 0.5)
            .with_alpha(170 + 80 * (layer % 2) as u8);

        for i in 0..POINTS_PER_LAYER {
            let u = i as f32 / POINTS_PER_LAYER as f32 * TAU;
            let (x, y) = outline(u);
            let position = Vec3::new(
                x * scale * CURVE_SCALE + 2.0 * (u * 5.0).sin(),
                -y * scale * CURVE_SCALE + 2.0 * (u * 5.0).cos(),
                thickness * (0.6 + 0.4 * (u * 3.0).sin()),
            );
            let size = 1.8 + (u * 8.0 + layer as f32 * 0.5).sin();
            set.push_structured(Particle::new(position, color, size));
        }
    }

    // Core cloud: candidates in a flattened ellipsoid, kept only inside the heart
    let inner_scale = scale * 0.6;
    for i in 0..INNER_CANDIDATES {
        let r: f32 = rng.gen();
        let theta = rng.gen::<f32>() * TAU;
        let phi = rng.gen::<f32>() * PI;
        let hue_jitter: f32 = rng.gen_range(0.0..20.0);
        let alpha = 100 + rng.gen_range(0..40u8);

        let position = Vec3::new(
            inner_scale * r * phi.sin() * theta.cos() * 0.4,
            inner_scale * r * phi.sin() * theta.sin() * 0.4,
            inner_scale * r * phi.cos() * 0.25,
        );
        let hx = position.x / (inner_scale * CURVE_SCALE);
        let hy = -position.y / (inner_scale * CURVE_SCALE);
        if implicit(hx, hy) >= INSIDE_THRESHOLD {
            continue;
        }

        let color = hsl_to_rgba(340.0 + hue_jitter, 0.7, 0.6).with_alpha(alpha);
        let size = 1.2 + 0.8 * (i as f32 * 0.05).sin();
        set.push_filler(Particle::new(position, color, size));
    }

    set
}
