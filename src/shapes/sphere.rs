//! Layered hollow sphere

use std::f32::consts::PI;

use rand::Rng;

use super::{PointSet, Sampling};
use crate::color::{hsl_to_rgba, Rgba};
use crate::math3d::{fibonacci_angles, Vec3};
use crate::particles::Particle;

const LAYERS: usize = 12;
const POINTS_PER_LAYER: usize = 300;
const CONNECTORS: usize = 800;

/// Radius of `layer` as a fraction of the outer radius (0.2 to just under 1.0)
#[inline]
fn layer_ratio(layer: usize) -> f32 {
    0.2 + (layer as f32 / LAYERS as f32) * 0.8
}

/// The sphere keeps its base radius at every shape scale; the camera's
/// projection is the only thing that enlarges it.
pub(super) fn generate(radius: f32, sampling: &Sampling, rng: &mut impl Rng) -> PointSet {
    let mut set = PointSet::with_capacity(LAYERS * POINTS_PER_LAYER + CONNECTORS);

    for layer in 0..LAYERS {
        let layer_radius = radius * layer_ratio(layer);
        for i in 0..POINTS_PER_LAYER {
            let (phi, theta) = fibonacci_angles(i, POINTS_PER_LAYER);
            let position = Vec3::from_spherical(layer_radius, phi, theta);

            let hue = layer as f32 * 30.0 + sampling.hue_offset + theta.sin() * 10.0;
            let saturation = 0.85 + 0.15 * phi.cos();
            let lightness = 0.5 + 0.3 * (layer as f32 * 1.5).sin();
            // Alternate layers are more opaque
            let alpha = 160 + 80 * (layer % 2) as u8;
            let color = hsl_to_rgba(hue, saturation, lightness).with_alpha(alpha);

            let size = 2.0 + (theta * 4.0).sin();
            set.push_structured(Particle::new(position, color, size));
        }
    }

    // Faint points threading between neighbouring layers
    for i in 0..CONNECTORS {
        let t: f32 = rng.gen();
        let layer1 = rng.gen_range(0..LAYERS);
        let layer2 = (layer1 + 1 + rng.gen_range(0..2)) % LAYERS;
        let r1 = radius * layer_ratio(layer1);
        let r2 = radius * layer_ratio(layer2);

        let phi = (1.0 - 2.0 * t).acos();
        let theta = 2.0 * PI * t * 12.0;
        let r = r1 * (1.0 - t) + r2 * t;
        let position = Vec3::from_spherical(r, phi, theta);

        let color = Rgba::new(200, 255, 255, 80 + rng.gen_range(0..40u8));
        let size = 1.0 + 0.5 * (i as f32 * 0.1).sin();
        set.push_filler(Particle::new(position, color, size));
    }

    set
}
