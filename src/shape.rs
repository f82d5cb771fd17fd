//! Target shapes and their point samplers.
//!
//! Each call draws a fresh, independent point. Nothing here is seeded from
//! the particle index, so two samples for the same particle across shape
//! changes are uncorrelated.

use crate::config::{ExplodeParams, TreeParams};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// The two spatial distributions the particle cloud morphs between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    /// A cone with its apex at the top.
    #[default]
    Tree,
    /// A thick spherical shell around the origin.
    Explode,
}

impl Shape {
    /// The other shape.
    pub fn toggled(self) -> Self {
        match self {
            Shape::Tree => Shape::Explode,
            Shape::Explode => Shape::Tree,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Tree => write!(f, "TREE"),
            Shape::Explode => write!(f, "EXPLODE"),
        }
    }
}

/// Geometry of both shapes, passed to [`sample`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapeParams {
    pub tree: TreeParams,
    pub explode: ExplodeParams,
}

/// Random point for `shape`.
pub fn sample<R: Rng + ?Sized>(shape: Shape, params: &ShapeParams, rng: &mut R) -> Vec3 {
    match shape {
        Shape::Tree => sample_tree(&params.tree, rng),
        Shape::Explode => sample_explode(&params.explode, rng),
    }
}

/// Random point inside the tree cone.
///
/// The radius bound shrinks linearly with height. Within each horizontal
/// slice the radius is `r_max * sqrt(u)` so density is uniform over the
/// disk area rather than bunched at the axis.
pub fn sample_tree<R: Rng + ?Sized>(tree: &TreeParams, rng: &mut R) -> Vec3 {
    let h: f32 = rng.gen();
    let y = h * tree.height - tree.height / 2.0;
    let r_max = tree.base_radius * (1.0 - h);
    let r = r_max * rng.gen::<f32>().sqrt();
    let theta = rng.gen_range(0.0..TAU);

    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

/// Random point in the exploded shell.
///
/// `phi = acos(2u - 1)` gives uniform coverage of the sphere surface; a
/// uniform `phi` would pile points up at the poles.
pub fn sample_explode<R: Rng + ?Sized>(explode: &ExplodeParams, rng: &mut R) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let phi = (rng.gen::<f32>() * 2.0 - 1.0).clamp(-1.0, 1.0).acos();
    let radius = explode.min_radius + rng.gen::<f32>() * explode.radius_span;

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_tree_points_inside_cone_slice() {
        let mut rng = SmallRng::seed_from_u64(7);
        let tree = TreeParams::default();
        for _ in 0..5_000 {
            let p = sample_tree(&tree, &mut rng);
            let h = (p.y + tree.height / 2.0) / tree.height;
            assert!((-EPS..=1.0 + EPS).contains(&h), "height fraction {h}");
            let radius = (p.x * p.x + p.z * p.z).sqrt();
            assert!(radius <= tree.base_radius * (1.0 - h) + EPS);
        }
    }

    #[test]
    fn test_explode_points_inside_shell() {
        let mut rng = SmallRng::seed_from_u64(11);
        let explode = ExplodeParams::default();
        for _ in 0..5_000 {
            let len = sample_explode(&explode, &mut rng).length();
            assert!(len >= explode.min_radius - EPS);
            assert!(len <= explode.max_radius() + EPS);
        }
    }

    #[test]
    fn test_explode_covers_both_hemispheres_evenly() {
        let mut rng = SmallRng::seed_from_u64(3);
        let explode = ExplodeParams::default();
        let n = 20_000;
        // Uniform on the sphere means |cos(phi)| is uniform, so about half
        // the points sit within 60 degrees of the equator.
        let near_equator = (0..n)
            .map(|_| sample_explode(&explode, &mut rng))
            .filter(|p| (p.z / p.length()).abs() < 0.5)
            .count();
        let share = near_equator as f32 / n as f32;
        assert!((share - 0.5).abs() < 0.03, "share {share}");
    }

    #[test]
    fn test_tree_disk_density_not_axis_biased() {
        let mut rng = SmallRng::seed_from_u64(5);
        let tree = TreeParams::default();
        let n = 20_000;
        // With sqrt(u), a quarter of each slice's points fall inside half its radius.
        let inner = (0..n)
            .map(|_| sample_tree(&tree, &mut rng))
            .filter(|p| {
                let h = (p.y + tree.height / 2.0) / tree.height;
                let r_max = tree.base_radius * (1.0 - h);
                r_max > 1e-3 && (p.x * p.x + p.z * p.z).sqrt() < r_max * 0.5
            })
            .count();
        let share = inner as f32 / n as f32;
        assert!((share - 0.25).abs() < 0.03, "share {share}");
    }

    #[test]
    fn test_consecutive_samples_differ() {
        let mut rng = SmallRng::seed_from_u64(1);
        let params = ShapeParams::default();
        let a = sample(Shape::Tree, &params, &mut rng);
        let b = sample(Shape::Tree, &params, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Shape::Tree.toggled(), Shape::Explode);
        assert_eq!(Shape::Explode.toggled(), Shape::Tree);
        assert_eq!(Shape::default(), Shape::Tree);
    }
}
