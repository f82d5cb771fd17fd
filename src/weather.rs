//! Falling snow.
//!
//! A fixed population independent of the morphing ornaments. Flakes fall by
//! their own per-tick velocity and respawn at the ceiling with a new random
//! X once they cross the floor.

use crate::config::SnowConfig;
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snowflake {
    pub position: Vec3,
    /// Per-tick velocity; only Y is nonzero.
    pub velocity: Vec2,
}

#[derive(Debug, Clone)]
pub struct Snowfall {
    flakes: Vec<Snowflake>,
    config: SnowConfig,
    visible: bool,
}

/// Uniform sample from `lo..hi`, or `lo` when the range is empty.
fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

impl Snowfall {
    pub fn new<R: Rng + ?Sized>(config: SnowConfig, rng: &mut R) -> Self {
        let config = config.sanitized();
        let half = config.spread / 2.0;
        let flakes = (0..config.count)
            .map(|_| Snowflake {
                position: Vec3::new(
                    sample(rng, -half, half),
                    sample(rng, config.floor, config.ceiling),
                    sample(rng, -half, half),
                ),
                velocity: Vec2::new(0.0, -sample(rng, config.min_fall, config.max_fall)),
            })
            .collect();

        Self {
            flakes,
            config,
            visible: false,
        }
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Advance one tick.
    pub fn fall<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let half = self.config.spread / 2.0;
        for flake in &mut self.flakes {
            flake.position.x += flake.velocity.x;
            flake.position.y += flake.velocity.y;
            if flake.position.y < self.config.floor {
                flake.position.y = self.config.ceiling;
                flake.position.x = sample(rng, -half, half);
            }
        }
    }

    pub fn instance_transform(&self, i: usize) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.config.flake_size),
            glam::Quat::IDENTITY,
            self.flakes[i].position,
        )
    }
}
