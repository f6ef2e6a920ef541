//! Hollow wireframe cube

use std::f32::consts::PI;

use rand::Rng;

use super::{PointSet, Sampling};
use crate::color::hsl_to_rgba;
use crate::math3d::{lerp, Vec3};
use crate::particles::Particle;

const POINTS_PER_EDGE: usize = 50;
const POINTS_PER_FACE: usize = 100;

/// Unit cube corners: 0-3 on the z = -1 face, 4-7 on z = +1
const CORNERS: [(f32, f32, f32); 8] = [
    (-1.0, -1.0, -1.0),
    (1.0, -1.0, -1.0),
    (1.0, 1.0, -1.0),
    (-1.0, 1.0, -1.0),
    (-1.0, -1.0, 1.0),
    (1.0, -1.0, 1.0),
    (1.0, 1.0, 1.0),
    (-1.0, 1.0, 1.0),
];

/// All 12 edges as corner index pairs
const EDGES: [(usize, usize); 12] = [
    // z = -1 ring
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    // z = +1 ring
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    // pillars
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

#[inline]
fn corner(idx: usize, size: f32) -> Vec3 {
    let (x, y, z) = CORNERS[idx];
    Vec3::new(x, y, z) * size
}

/// Point on face `face` from coordinates `u`, `v` in [-1, 1]
fn face_point(face: usize, u: f32, v: f32, size: f32) -> Vec3 {
    let (x, y, z) = match face {
        0 => (u, v, -1.0),
        1 => (u, v, 1.0),
        2 => (u, -1.0, v),
        3 => (u, 1.0, v),
        4 => (-1.0, u, v),
        _ => (1.0, u, v),
    };
    Vec3::new(x, y, z) * size
}

pub(super) fn generate(base_size: f32, sampling: &Sampling, rng: &mut impl Rng) -> PointSet {
    let size = base_size * sampling.scale;
    let mut set = PointSet::with_capacity(EDGES.len() * POINTS_PER_EDGE + 6 * POINTS_PER_FACE);

    for (edge, &(a, b)) in EDGES.iter().enumerate() {
        let start = corner(a, size);
        let end = corner(b, size);
        let color = hsl_to_rgba(edge as f32 * 30.0 + sampling.hue_offset, 0.8, 0.6);
        for i in 0..POINTS_PER_EDGE {
            let t = i as f32 / POINTS_PER_EDGE as f32;
            let point_size = 2.0 + 0.5 * (t * PI * 4.0).sin();
            set.push_structured(Particle::new(lerp(start, end, t), color, point_size));
        }
    }

    // Faint scatter across the faces for a sense of volume
    for face in 0..6 {
        let color = hsl_to_rgba(face as f32 * 60.0 + sampling.hue_offset, 0.7, 0.5).with_alpha(80);
        for _ in 0..POINTS_PER_FACE {
            let u = 2.0 * rng.gen::<f32>() - 1.0;
            let v = 2.0 * rng.gen::<f32>() - 1.0;
            set.push_filler(Particle::new(face_point(face, u, v, size), color, 1.5));
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sampling() -> Sampling {
        Sampling {
            scale: 1.0,
            hue_offset: 0.0,
            time: 0.0,
        }
    }

    /// Number of coordinates sitting on the +/- size boundary
    fn boundary_axes(p: Vec3, size: f32) -> usize {
        [p.x, p.y, p.z]
            .iter()
            .filter(|c| (c.abs() - size).abs() < 1e-3)
            .count()
    }

    #[test]
    fn test_every_edge_joins_adjacent_corners() {
        for &(a, b) in &EDGES {
            let d = corner(a, 1.0) - corner(b, 1.0);
            assert!((d.length() - 2.0).abs() < 1e-6, "edge {}-{}", a, b);
        }
    }

    #[test]
    fn test_edge_points_lie_on_edges() {
        let mut rng = SmallRng::seed_from_u64(1);
        let set = generate(150.0, &sampling(), &mut rng);
        for p in &set.particles()[..set.structured_count()] {
            assert!(boundary_axes(p.position, 150.0) >= 2, "{:?}", p.position);
        }
    }

    #[test]
    fn test_face_points_lie_on_faces() {
        let mut rng = SmallRng::seed_from_u64(2);
        let set = generate(150.0, &sampling(), &mut rng);
        assert_eq!(set.filler_count(), 600);
        for p in &set.particles()[set.structured_count()..] {
            assert!(boundary_axes(p.position, 150.0) >= 1);
            assert!(p.position.x.abs() <= 150.0 + 1e-3);
            assert!(p.position.y.abs() <= 150.0 + 1e-3);
            assert!(p.position.z.abs() <= 150.0 + 1e-3);
            assert_eq!(p.color.a, 80);
        }
    }
}
