//! Atomic model: pulsing nucleus with electrons on tilted orbit shells

use std::f32::consts::TAU;

use super::{PointSet, Sampling};
use crate::color::{hsl_to_rgba, Rgba};
use crate::math3d::{fibonacci_angles, Vec3};
use crate::particles::{Orbit, Particle};

const NUCLEUS_POINTS: usize = 300;
const ELECTRONS_PER_SHELL: usize = 10;

/// One orbit shell
struct Shell {
    speed: f32,
    radius: f32,
    color: Rgba,
}

const SHELLS: [Shell; 4] = [
    Shell {
        speed: 1.2,
        radius: 200.0,
        color: Rgba::new(80, 180, 255, 210),
    },
    Shell {
        speed: 0.8,
        radius: 140.0,
        color: Rgba::new(80, 255, 180, 210),
    },
    Shell {
        speed: 0.5,
        radius: 100.0,
        color: Rgba::new(255, 180, 80, 210),
    },
    Shell {
        speed: 0.3,
        radius: 60.0,
        color: Rgba::new(180, 80, 255, 210),
    },
];

pub(super) fn generate(nucleus_size: f32, sampling: &Sampling) -> PointSet {
    let nucleus_radius = nucleus_size * sampling.scale;
    let time = sampling.time;
    let mut set = PointSet::with_capacity(NUCLEUS_POINTS + SHELLS.len() * ELECTRONS_PER_SHELL);

    for i in 0..NUCLEUS_POINTS {
        let (phi, theta) = fibonacci_angles(i, NUCLEUS_POINTS);
        let r = nucleus_radius * (0.6 + 0.4 * (time + theta * 2.0).sin());
        let position = Vec3::from_spherical(r, phi, theta);

        let color = hsl_to_rgba(30.0 * theta.sin(), 0.9, 0.6).with_alpha(240);
        let size = 2.0 + 1.5 * (theta * 6.0 + time).sin();
        set.push_structured(Particle::new(position, color, size));
    }

    for (idx, shell) in SHELLS.iter().enumerate() {
        for i in 0..ELECTRONS_PER_SHELL {
            let orbit = Orbit {
                center: Vec3::zero(),
                radius: shell.radius * sampling.scale,
                angle: i as f32 / ELECTRONS_PER_SHELL as f32 * TAU + time * shell.speed,
                speed: shell.speed,
            };
            let size = 2.5 + 0.5 * idx as f32;
            set.push_structured(Particle::orbiting(orbit.position(), shell.color, size, orbit));
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Motion;

    fn sampling(time: f32) -> Sampling {
        Sampling {
            scale: 1.0,
            hue_offset: 0.0,
            time,
        }
    }

    #[test]
    fn test_electrons_sit_on_their_shell() {
        let set = generate(40.0, &sampling(0.0));
        let electrons: Vec<_> = set.particles().iter().filter(|p| p.is_orbiting()).collect();
        assert_eq!(electrons.len(), 40);
        for (n, p) in electrons.iter().enumerate() {
            let shell = &SHELLS[n / ELECTRONS_PER_SHELL];
            assert!((p.position.length() - shell.radius).abs() < 1e-2);
            assert_eq!(p.color, shell.color);
            match p.motion {
                Motion::Orbiting(orbit) => assert_eq!(orbit.speed, shell.speed),
                Motion::Static => unreachable!(),
            }
        }
    }

    #[test]
    fn test_electrons_start_where_their_orbit_places_them() {
        let scaled = Sampling {
            scale: 1.5,
            ..sampling(0.7)
        };
        let set = generate(40.0, &scaled);
        for p in set.particles().iter().filter(|p| p.is_orbiting()) {
            let Motion::Orbiting(orbit) = p.motion else {
                unreachable!()
            };
            // Tilt follows the scaled radius, exactly as in the per-frame update
            assert_eq!(p.position, orbit.position());
            assert!((orbit.tilt() - (orbit.radius / 60.0 - 1.0) * 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn test_nucleus_pulses_with_time() {
        let early = generate(40.0, &sampling(0.0));
        let later = generate(40.0, &sampling(1.0));
        let moved = early
            .particles()
            .iter()
            .zip(later.particles())
            .take(NUCLEUS_POINTS)
            .any(|(a, b)| (a.position.length() - b.position.length()).abs() > 1.0);
        assert!(moved);

        for p in &early.particles()[..NUCLEUS_POINTS] {
            let r = p.position.length();
            assert!(r >= 40.0 * 0.2 - 1e-3 && r <= 40.0 + 1e-3);
        }
    }
}
