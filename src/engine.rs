//! The morph engine: shape changes and the per-frame tick.

use crate::config::MorphConfig;
use crate::director::{CinematicDirector, CinematicPhase};
use crate::error::SurfaceError;
use crate::particles::{OrnamentKind, ParticleStore};
use crate::scene::Scene;
use crate::shape::Shape;
use crate::surface::{InstanceLayer, RenderSurface};
use crate::tween::TweenScheduler;
use crate::weather::Snowfall;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Everything one interactive scene needs, owned in one place.
///
/// Construct one per window (or per test). All mutation goes through
/// [`set_shape`](Self::set_shape), [`tick`](Self::tick) and
/// [`resize`](Self::resize).
#[derive(Debug)]
pub struct MorphEngine {
    config: MorphConfig,
    scene: Scene,
    particles: ParticleStore,
    snow: Snowfall,
    director: CinematicDirector,
    tweens: TweenScheduler,
    shape: Shape,
    rng: SmallRng,
    regenerations: u64,
    ticks: u64,
}

impl MorphEngine {
    /// Create an engine seeded from OS entropy.
    pub fn new(config: MorphConfig, aspect: f32) -> Self {
        Self::with_rng(config, aspect, SmallRng::from_entropy())
    }

    /// Create an engine with a fixed seed.
    pub fn with_seed(config: MorphConfig, aspect: f32, seed: u64) -> Self {
        Self::with_rng(config, aspect, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: MorphConfig, aspect: f32, mut rng: SmallRng) -> Self {
        let mut particles = ParticleStore::new(&config, &mut rng);
        let mut snow = Snowfall::new(config.snow, &mut rng);
        let shape = Shape::Tree;
        particles.regenerate_targets(shape, &mut rng);
        snow.set_visible(shape == Shape::Tree);

        log::info!(
            "morph engine ready: {} ornaments, {} snowflakes",
            particles.len(),
            snow.len()
        );

        Self {
            scene: Scene::new(&config, aspect),
            director: CinematicDirector::new(config.cinematic),
            tweens: TweenScheduler::new(),
            config,
            particles,
            snow,
            shape,
            rng,
            regenerations: 1,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access, for input handling (orbit drags, zoom).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    pub fn snow(&self) -> &Snowfall {
        &self.snow
    }

    pub fn director(&self) -> &CinematicDirector {
        &self.director
    }

    pub fn tweens(&self) -> &TweenScheduler {
        &self.tweens
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn phase(&self) -> CinematicPhase {
        self.director.phase()
    }

    pub fn is_cinematic_active(&self) -> bool {
        self.director.is_active()
    }

    /// How many times targets have been generated, including at construction.
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Interpolation fraction in use this tick.
    pub fn lerp_rate(&self) -> f32 {
        if self.director.is_active() {
            self.config.cinematic_lerp_rate
        } else {
            self.config.lerp_rate
        }
    }

    /// Size the surface's instance buffers and upload ornament colors.
    pub fn attach(&self, surface: &mut dyn RenderSurface) {
        let (spheres, cubes) = self.particles.split();
        surface.allocate(InstanceLayer::Spheres, spheres.len());
        surface.allocate(InstanceLayer::Cubes, cubes.len());
        surface.allocate(InstanceLayer::Snow, self.snow.len());

        for (i, (kind, color)) in self
            .particles
            .kinds()
            .iter()
            .zip(self.particles.colors())
            .enumerate()
        {
            match kind {
                OrnamentKind::Sphere => {
                    surface.set_instance_color(InstanceLayer::Spheres, i, *color)
                }
                OrnamentKind::Cube => {
                    surface.set_instance_color(InstanceLayer::Cubes, i - spheres.len(), *color)
                }
            }
        }
        for i in 0..self.snow.len() {
            surface.set_instance_color(InstanceLayer::Snow, i, Vec3::ONE);
        }
        surface.set_layer_visible(InstanceLayer::Snow, self.snow.is_visible());
        self.write_instances(surface);
    }

    /// Switch the target shape.
    ///
    /// Returns `false` without doing anything if `shape` is already current;
    /// gesture classifiers fire every video frame, so repeats are expected.
    pub fn set_shape(&mut self, shape: Shape) -> bool {
        if shape == self.shape {
            return false;
        }
        log::info!("shape {} -> {}", self.shape, shape);
        self.shape = shape;
        self.particles.regenerate_targets(shape, &mut self.rng);
        self.regenerations += 1;

        match shape {
            Shape::Explode => self.director.reveal(&mut self.scene, &mut self.tweens),
            Shape::Tree => self.director.hide(&mut self.scene, &mut self.tweens),
        }
        true
    }

    /// Run one frame: ambient animation, tweens, interpolation, submit.
    ///
    /// `dt` is wall time in seconds and only drives tweens; the ambient and
    /// particle steps are fixed per tick. Recoverable surface errors are
    /// logged and swallowed. Only fatal ones are returned, after the
    /// particle state has already advanced.
    pub fn tick(&mut self, dt: f32, surface: &mut dyn RenderSurface) -> Result<(), SurfaceError> {
        self.ticks += 1;

        if !self.director.is_active() {
            let Scene {
                camera, controls, ..
            } = &mut self.scene;
            controls.update(camera);
        }

        self.animate_ambient(surface);

        let cues = self.tweens.advance(dt, &mut self.scene);
        self.director.update(&cues, &mut self.scene, &self.tweens);

        self.particles.advance(self.lerp_rate());
        self.write_instances(surface);

        match surface.submit(&self.scene) {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => {
                log::error!("frame submission failed: {e}");
                Err(e)
            }
            Err(e) => {
                log::warn!("frame skipped: {e}");
                Ok(())
            }
        }
    }

    /// Apply a viewport change.
    ///
    /// Zero-sized viewports (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32, surface: &mut dyn RenderSurface) {
        if width == 0 || height == 0 {
            return;
        }
        self.scene.camera.set_aspect(width as f32 / height as f32);
        surface.resize(width, height);
        self.director.on_resize(&mut self.scene, &mut self.tweens);
    }

    /// Cancel every animation and return the cinematic to idle.
    pub fn stop_animations(&mut self) {
        self.director.reset(&mut self.scene, &mut self.tweens);
        self.tweens.clear();
    }

    fn animate_ambient(&mut self, surface: &mut dyn RenderSurface) {
        let star = self.config.star;
        match self.shape {
            Shape::Tree => {
                self.scene.tree_group.rotation.y += self.config.tree_spin;

                self.snow.set_visible(true);
                self.snow.fall(&mut self.rng);

                let t = &mut self.scene.star.transform;
                t.rotation.y += star.spin;
                t.scale = t.scale.lerp(Vec3::splat(star.size), star.grow);
            }
            Shape::Explode => {
                self.snow.set_visible(false);
                let t = &mut self.scene.star.transform;
                t.scale = t.scale.lerp(Vec3::ZERO, star.shrink);
            }
        }
        surface.set_layer_visible(InstanceLayer::Snow, self.snow.is_visible());
    }

    fn write_instances(&self, surface: &mut dyn RenderSurface) {
        let (spheres, cubes) = self.particles.split();
        for i in spheres {
            surface.set_instance_transform(
                InstanceLayer::Spheres,
                i,
                self.particles.instance_transform(i),
            );
        }
        let offset = cubes.start;
        for i in cubes {
            surface.set_instance_transform(
                InstanceLayer::Cubes,
                i - offset,
                self.particles.instance_transform(i),
            );
        }
        if self.snow.is_visible() {
            for i in 0..self.snow.len() {
                surface.set_instance_transform(
                    InstanceLayer::Snow,
                    i,
                    self.snow.instance_transform(i),
                );
            }
        }
    }
}
