//! Thick figure-8 spiral built from stacked lemniscate slices

use std::f32::consts::PI;

use rand::Rng;

use super::{PointSet, Sampling};
use crate::color::{hsl_to_rgba, Rgba};
use crate::math3d::Vec3;
use crate::particles::Particle;

const SLICES: usize = 15;
const POINTS_PER_SLICE: usize = 250;
const CONNECTORS: usize = 500;
/// Distance between neighbouring slices along Z
const SLICE_SPACING: f32 = 12.0;

#[inline]
fn slice_z(slice: usize) -> f32 {
    (slice as f32 - SLICES as f32 / 2.0) * SLICE_SPACING
}

/// Lemniscate radius at `t`, or `None` where the curve is undefined
#[inline]
fn lemniscate_radius(scale: f32, t: f32, jitter: f32) -> Option<f32> {
    let radicand = 2.0 * (2.0 * t).cos() + jitter;
    (radicand >= 0.0).then(|| scale * radicand.sqrt())
}

pub(super) fn generate(base_scale: f32, sampling: &Sampling, rng: &mut impl Rng) -> PointSet {
    let scale = base_scale * sampling.scale;
    let mut set = PointSet::with_capacity(SLICES * POINTS_PER_SLICE + CONNECTORS);

    for slice in 0..SLICES {
        let z_offset = slice_z(slice);
        let thickness = 6.0 + 2.0 * (slice as f32 * PI / SLICES as f32).sin();
        let alpha = 190 - 8 * slice as u8;

        for i in 0..POINTS_PER_SLICE {
            let t = i as f32 / POINTS_PER_SLICE as f32 * 4.0 * PI;
            let Some(a) = lemniscate_radius(scale, t, 0.1 * (t * 3.0).sin()) else {
                continue;
            };

            // Offset circling the curve gives the body its thickness
            let offset_angle = t * 3.0 + slice as f32 * 0.2;
            let position = Vec3::new(
                a * t.cos() + thickness * offset_angle.cos(),
                a * t.sin() + thickness * offset_angle.sin(),
                z_offset + scale * 0.15 * (t * 4.0 + sampling.time).sin(),
            );

            let hue = t * 90.0 + slice as f32 * 20.0 + sampling.hue_offset;
            let color = hsl_to_rgba(hue, 0.95, 0.65).with_alpha(alpha);
            let size = 1.8 + 1.2 * (t * 6.0 + slice as f32 * 0.6).sin();
            set.push_structured(Particle::new(position, color, size));
        }
    }

    // Connectors bridging a slice with one of the next three
    for _ in 0..CONNECTORS {
        let t = rng.gen::<f32>() * 4.0 * PI;
        let slice1 = rng.gen_range(0..SLICES);
        let slice2 = (slice1 + 1 + rng.gen_range(0..3)) % SLICES;
        let interp: f32 = rng.gen();
        let alpha = 60 + rng.gen_range(0..40u8);
        let Some(a) = lemniscate_radius(scale, t, 0.0) else {
            continue;
        };

        let z = slice_z(slice1) * (1.0 - interp) + slice_z(slice2) * interp;
        let position = Vec3::new(a * t.cos(), a * t.sin(), z);
        set.push_filler(Particle::new(position, Rgba::new(255, 255, 200, alpha), 1.0));
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_undefined_samples_are_skipped() {
        // Around t = PI/2 the lemniscate has no real radius
        assert!(lemniscate_radius(100.0, PI / 2.0, 0.0).is_none());
        assert_eq!(lemniscate_radius(100.0, 0.0, 0.0), Some(100.0 * 2.0_f32.sqrt()));
    }

    #[test]
    fn test_structured_count_is_deterministic_and_partial() {
        let sampling = Sampling {
            scale: 1.0,
            hue_offset: 0.0,
            time: 0.0,
        };
        let a = generate(100.0, &sampling, &mut SmallRng::seed_from_u64(1));
        let b = generate(100.0, &sampling, &mut SmallRng::seed_from_u64(2));
        assert_eq!(a.structured_count(), b.structured_count());
        assert!(a.structured_count() > SLICES * POINTS_PER_SLICE / 3);
        assert!(a.structured_count() < SLICES * POINTS_PER_SLICE);
        assert!(a.filler_count() <= CONNECTORS);
    }

    #[test]
    fn test_slices_span_the_z_axis() {
        assert_eq!(slice_z(0), -90.0);
        assert_eq!(slice_z(SLICES - 1), 78.0);
    }
}
