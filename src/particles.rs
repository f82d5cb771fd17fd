//! Per-particle morph state.
//!
//! The store keeps parallel, index-aligned arrays for every ornament:
//! current position, target position, kind, color and spin. The length is
//! fixed at construction.

use crate::config::MorphConfig;
use crate::shape::{self, Shape, ShapeParams};
use glam::{Mat4, Quat, Vec3};
use rand::Rng;

/// How an ornament is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrnamentKind {
    Sphere,
    /// Drawn 1.5x larger than a sphere and tumbling about X.
    Cube,
}

/// Current and target positions for every morphing particle.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    current: Vec<Vec3>,
    target: Vec<Vec3>,
    kinds: Vec<OrnamentKind>,
    colors: Vec<Vec3>,
    spin: Vec<f32>,
    params: ShapeParams,
    ornament_size: f32,
    cube_spin: f32,
}

impl ParticleStore {
    /// Create `config.particle_count` particles at the origin.
    ///
    /// Spheres come first, then cubes. Colors are drawn from the palette.
    /// Targets start at the origin too; call
    /// [`regenerate_targets`](Self::regenerate_targets) to give them a shape.
    pub fn new<R: Rng + ?Sized>(config: &MorphConfig, rng: &mut R) -> Self {
        let count = config.particle_count;
        let spheres = config.sphere_count().min(count);

        let kinds = (0..count)
            .map(|i| {
                if i < spheres {
                    OrnamentKind::Sphere
                } else {
                    OrnamentKind::Cube
                }
            })
            .collect();

        let colors = (0..count)
            .map(|_| {
                if config.palette.is_empty() {
                    Vec3::ONE
                } else {
                    config.palette[rng.gen_range(0..config.palette.len())]
                }
            })
            .collect();

        Self {
            current: vec![Vec3::ZERO; count],
            target: vec![Vec3::ZERO; count],
            kinds,
            colors,
            spin: vec![0.0; count],
            params: ShapeParams {
                tree: config.tree,
                explode: config.explode,
            },
            ornament_size: config.ornament_size,
            cube_spin: config.cube_spin,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.target
    }

    pub fn kinds(&self) -> &[OrnamentKind] {
        &self.kinds
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn params(&self) -> &ShapeParams {
        &self.params
    }

    /// Resample every target for `shape`.
    pub fn regenerate_targets<R: Rng + ?Sized>(&mut self, shape: Shape, rng: &mut R) {
        for target in &mut self.target {
            *target = shape::sample(shape, &self.params, rng);
        }
    }

    /// Move every particle a fixed fraction of the way to its target.
    ///
    /// The approach is geometric: after `k` ticks the remaining distance is
    /// `(1 - rate)^k` of the original, so particles keep drifting without
    /// ever landing exactly.
    pub fn advance(&mut self, rate: f32) {
        for (current, target) in self.current.iter_mut().zip(&self.target) {
            *current += (*target - *current) * rate;
        }
        for (spin, kind) in self.spin.iter_mut().zip(&self.kinds) {
            if *kind == OrnamentKind::Cube {
                *spin = (*spin + self.cube_spin) % std::f32::consts::TAU;
            }
        }
    }

    /// Model matrix for particle `i`, local to the tree group.
    pub fn instance_transform(&self, i: usize) -> Mat4 {
        match self.kinds[i] {
            OrnamentKind::Sphere => Mat4::from_scale_rotation_translation(
                Vec3::splat(self.ornament_size),
                Quat::IDENTITY,
                self.current[i],
            ),
            OrnamentKind::Cube => Mat4::from_scale_rotation_translation(
                Vec3::splat(self.ornament_size * 1.5),
                Quat::from_rotation_x(self.spin[i]),
                self.current[i],
            ),
        }
    }

    /// Index range of each kind, `(spheres, cubes)`.
    pub fn split(&self) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let spheres = self
            .kinds
            .iter()
            .take_while(|k| **k == OrnamentKind::Sphere)
            .count();
        (0..spheres, spheres..self.len())
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, i: usize, position: Vec3) {
        self.current[i] = position;
    }

    #[cfg(test)]
    pub(crate) fn set_target(&mut self, i: usize, position: Vec3) {
        self.target[i] = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn store(count: usize) -> ParticleStore {
        let config = MorphConfig::default().with_particle_count(count);
        ParticleStore::new(&config, &mut SmallRng::seed_from_u64(0))
    }

    #[test]
    fn test_arrays_are_parallel() {
        let s = store(3000);
        assert_eq!(s.len(), 3000);
        assert_eq!(s.targets().len(), 3000);
        assert_eq!(s.kinds().len(), 3000);
        assert_eq!(s.colors().len(), 3000);
        let (spheres, cubes) = s.split();
        assert_eq!(spheres, 0..1800);
        assert_eq!(cubes, 1800..3000);
    }

    #[test]
    fn test_regenerate_keeps_length_and_shape() {
        let mut s = store(500);
        let mut rng = SmallRng::seed_from_u64(9);
        s.regenerate_targets(Shape::Explode, &mut rng);
        assert_eq!(s.len(), 500);
        let explode = s.params().explode;
        for t in s.targets() {
            assert!(t.length() >= explode.min_radius - 1e-3);
            assert!(t.length() <= explode.max_radius() + 1e-3);
        }
    }

    #[test]
    fn test_advance_converges_geometrically() {
        let mut s = store(1);
        s.set_current(0, Vec3::ZERO);
        s.set_target(0, Vec3::new(10.0, -4.0, 2.0));
        let rate = 0.08;
        let start = (s.targets()[0] - s.current()[0]).length();

        let mut previous = start;
        for k in 1..=50 {
            s.advance(rate);
            let gap = (s.targets()[0] - s.current()[0]).length();
            assert!(gap < previous, "gap grew at step {k}");
            assert!(gap > 0.0, "reached target at step {k}");
            let expected = start * (1.0 - rate).powi(k);
            assert!((gap - expected).abs() < 1e-3 * start);
            previous = gap;
        }
    }

    #[test]
    fn test_only_cubes_spin() {
        let mut s = store(10);
        s.advance(0.1);
        let (spheres, cubes) = s.split();
        for i in spheres {
            assert_eq!(s.spin[i], 0.0);
        }
        for i in cubes {
            assert!(s.spin[i] > 0.0);
        }
    }

    #[test]
    fn test_instance_transform_translation() {
        let mut s = store(2);
        s.set_current(0, Vec3::new(1.0, 2.0, 3.0));
        let m = s.instance_transform(0);
        assert_eq!(m.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }
}
