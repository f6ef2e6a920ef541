//! Shape generators
//!
//! Every shape is a pure function of its parameters, the global scale, the
//! current hue offset, elapsed time and an injected random source. The
//! returned [`PointSet`] lists structured points first, followed by random
//! filler that only adds visual density.

mod atomic;
mod cube;
mod figure8;
mod heart;
mod helix;
mod sphere;

use rand::Rng;

use crate::particles::Particle;

/// The six shapes, in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Cube,
    Figure8,
    Atomic,
    Heart,
    Helix,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Sphere,
        ShapeKind::Cube,
        ShapeKind::Figure8,
        ShapeKind::Atomic,
        ShapeKind::Heart,
        ShapeKind::Helix,
    ];

    /// The shape after this one, wrapping back to the first
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "3D Hollow Sphere",
            ShapeKind::Cube => "Hollow Cube",
            ShapeKind::Figure8 => "3D Figure-8 Spiral",
            ShapeKind::Atomic => "Atomic Model",
            ShapeKind::Heart => "3D Heart",
            ShapeKind::Helix => "Double Helix",
        }
    }
}

/// Base size of each shape, multiplied by the global shape scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    pub sphere_radius: f32,
    /// Half the edge length
    pub cube_size: f32,
    pub figure8_scale: f32,
    pub nucleus_size: f32,
    pub heart_scale: f32,
    pub helix_radius: f32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            sphere_radius: 120.0,
            cube_size: 150.0,
            figure8_scale: 100.0,
            nucleus_size: 40.0,
            heart_scale: 80.0,
            helix_radius: 100.0,
        }
    }
}

/// Global inputs shared by all generators for one regeneration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub scale: f32,
    pub hue_offset: f32,
    pub time: f32,
}

/// A generated shape: structured points followed by random filler
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    particles: Vec<Particle>,
    structured: usize,
}

impl PointSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            structured: 0,
        }
    }

    /// Add a point that is part of the shape's deterministic layout
    pub fn push_structured(&mut self, particle: Particle) {
        debug_assert_eq!(
            self.structured,
            self.particles.len(),
            "structured points must precede filler"
        );
        self.particles.push(particle);
        self.structured += 1;
    }

    /// Add a decorative, randomly placed point
    pub fn push_filler(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn structured_count(&self) -> usize {
        self.structured
    }

    pub fn filler_count(&self) -> usize {
        self.particles.len() - self.structured
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

/// Generate a fresh point set for `kind`
pub fn generate(
    kind: ShapeKind,
    params: &ShapeParams,
    scale: f32,
    hue_offset: f32,
    time: f32,
    rng: &mut impl Rng,
) -> PointSet {
    let sampling = Sampling {
        scale,
        hue_offset,
        time,
    };
    match kind {
        ShapeKind::Sphere => sphere::generate(params.sphere_radius, &sampling, rng),
        ShapeKind::Cube => cube::generate(params.cube_size, &sampling, rng),
        ShapeKind::Figure8 => figure8::generate(params.figure8_scale, &sampling, rng),
        ShapeKind::Atomic => atomic::generate(params.nucleus_size, &sampling),
        ShapeKind::Heart => heart::generate(params.heart_scale, &sampling, rng),
        ShapeKind::Helix => helix::generate(params.helix_radius, &sampling),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn generate_seeded(kind: ShapeKind, seed: u64) -> PointSet {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate(kind, &ShapeParams::default(), 1.0, 0.0, 0.0, &mut rng)
    }

    #[test]
    fn test_structured_counts_are_repeatable() {
        for kind in ShapeKind::ALL {
            let a = generate_seeded(kind, 1);
            let b = generate_seeded(kind, 99);
            assert!(a.structured_count() > 0, "{:?}", kind);
            assert_eq!(a.structured_count(), b.structured_count(), "{:?}", kind);
        }
    }

    #[test]
    fn test_exact_structured_counts() {
        assert_eq!(generate_seeded(ShapeKind::Sphere, 3).structured_count(), 12 * 300);
        assert_eq!(generate_seeded(ShapeKind::Cube, 3).structured_count(), 12 * 50);
        assert_eq!(generate_seeded(ShapeKind::Atomic, 3).structured_count(), 300 + 4 * 10);
        assert_eq!(generate_seeded(ShapeKind::Heart, 3).structured_count(), 12 * 400);
        assert_eq!(
            generate_seeded(ShapeKind::Helix, 3).structured_count(),
            1200 * 2 + 600 * 10
        );
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        for kind in ShapeKind::ALL {
            let a = generate_seeded(kind, 42);
            let b = generate_seeded(kind, 42);
            assert_eq!(a.len(), b.len(), "{:?}", kind);
            for (pa, pb) in a.particles().iter().zip(b.particles()) {
                assert_eq!(pa.position, pb.position);
                assert_eq!(pa.color, pb.color);
            }
        }
    }

    #[test]
    fn test_generated_points_are_finite() {
        for kind in ShapeKind::ALL {
            let set = generate_seeded(kind, 7);
            for p in set.particles() {
                let pos = p.position;
                assert!(
                    pos.x.is_finite() && pos.y.is_finite() && pos.z.is_finite(),
                    "{:?} produced {:?}",
                    kind,
                    pos
                );
                assert_eq!(p.position, p.origin());
                assert!(p.size > 0.0);
            }
        }
    }

    #[test]
    fn test_only_atomic_has_orbiters() {
        for kind in ShapeKind::ALL {
            let orbiters = generate_seeded(kind, 5)
                .particles()
                .iter()
                .filter(|p| p.is_orbiting())
                .count();
            if kind == ShapeKind::Atomic {
                assert_eq!(orbiters, 40);
            } else {
                assert_eq!(orbiters, 0, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_next_cycles_through_all_shapes() {
        let mut kind = ShapeKind::Sphere;
        for expected in ShapeKind::ALL.iter().skip(1) {
            kind = kind.next();
            assert_eq!(kind, *expected);
        }
        assert_eq!(kind.next(), ShapeKind::Sphere);
    }

    #[test]
    fn test_scale_grows_the_shape() {
        let mut rng = SmallRng::seed_from_u64(11);
        let params = ShapeParams::default();
        let small = generate(ShapeKind::Cube, &params, 1.0, 0.0, 0.0, &mut rng);
        let large = generate(ShapeKind::Cube, &params, 2.0, 0.0, 0.0, &mut rng);
        let extent = |set: &PointSet| {
            set.particles()
                .iter()
                .map(|p| p.position.x.abs())
                .fold(0.0_f32, f32::max)
        };
        assert!((extent(&large) / extent(&small) - 2.0).abs() < 1e-3);
    }
}
