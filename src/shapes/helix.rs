//! DNA-like double helix with bonds between the strands

use std::f32::consts::PI;

use super::{PointSet, Sampling};
use crate::color::{hsl_to_rgba, Rgba};
use crate::math3d::{lerp, Vec3};
use crate::particles::Particle;

const SAMPLES_PER_STRAND: usize = 1200;
const BONDS: usize = SAMPLES_PER_STRAND / 2;
const POINTS_PER_BOND: usize = 10;
const BASE_HEIGHT: f32 = 350.0;
/// Half-turns of each strand over the full height
const TWIST: f32 = 10.0 * PI;

const BOND_COLOR: Rgba = Rgba::new(200, 200, 200, 150);

pub(super) fn generate(base_radius: f32, sampling: &Sampling) -> PointSet {
    let radius = base_radius * sampling.scale;
    let height = BASE_HEIGHT * sampling.scale;
    let mut set = PointSet::with_capacity(SAMPLES_PER_STRAND * 2 + BONDS * POINTS_PER_BOND);

    for i in 0..SAMPLES_PER_STRAND {
        let t = i as f32 / SAMPLES_PER_STRAND as f32;
        let z = height * (t - 0.5);
        let local_radius = radius * (0.8 + 0.2 * (t * 6.0 * PI).sin());

        for strand in 0..2 {
            let angle = t * TWIST + strand as f32 * PI + (t * PI).sin() * 0.5;
            let position = Vec3::new(local_radius * angle.cos(), local_radius * angle.sin(), z);

            let base_hue = if strand == 0 { 0.0 } else { 240.0 };
            let color =
                hsl_to_rgba(base_hue + t * 60.0 + sampling.hue_offset, 0.9, 0.7).with_alpha(230);
            let size = 2.5 + 0.5 * (t * PI * 10.0).cos();
            set.push_structured(Particle::new(position, color, size));
        }
    }

    // Rungs across the axis, joining opposite points at the same height
    for i in 0..BONDS {
        let t = i as f32 / BONDS as f32;
        let z = height * (t - 0.5);
        let angle = t * TWIST;
        let start = Vec3::new(radius * angle.cos(), radius * angle.sin(), z);
        let end = Vec3::new(-start.x, -start.y, z);

        for j in 0..POINTS_PER_BOND {
            let interp = j as f32 / (POINTS_PER_BOND - 1) as f32;
            set.push_structured(Particle::new(lerp(start, end, interp), BOND_COLOR, 1.5));
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampling(scale: f32) -> Sampling {
        Sampling {
            scale,
            hue_offset: 0.0,
            time: 0.0,
        }
    }

    #[test]
    fn test_helix_has_no_random_filler() {
        let set = generate(100.0, &sampling(1.0));
        assert_eq!(set.filler_count(), 0);
        assert_eq!(set.len(), SAMPLES_PER_STRAND * 2 + BONDS * POINTS_PER_BOND);
    }

    #[test]
    fn test_bond_endpoints_are_opposite() {
        let set = generate(100.0, &sampling(1.0));
        let bonds = &set.particles()[SAMPLES_PER_STRAND * 2..];
        for rung in bonds.chunks(POINTS_PER_BOND) {
            let start = rung[0].position;
            let end = rung[POINTS_PER_BOND - 1].position;
            assert!((start.x + end.x).abs() < 1e-3);
            assert!((start.y + end.y).abs() < 1e-3);
            assert_eq!(start.z, end.z);
            // The middle of every rung crosses the axis
            let mid = lerp(start, end, 0.5);
            assert!(mid.x.abs() < 1e-3 && mid.y.abs() < 1e-3);
        }
    }

    #[test]
    fn test_height_follows_scale() {
        let set = generate(100.0, &sampling(2.0));
        let (lo, hi) = set
            .particles()
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| {
                (lo.min(p.position.z), hi.max(p.position.z))
            });
        assert!((lo + 350.0).abs() < 1e-3);
        assert!(hi < 350.0 && hi > 349.0);
    }
}
