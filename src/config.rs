//! Engine configuration.
//!
//! Every tunable of the scene lives here. Defaults reproduce the reference
//! look: a 3000-ornament tree, a 35..60 unit burst shell, 500 snowflakes and
//! a 9x12 card framed at 1.6x.
//!
//! ```ignore
//! let config = MorphConfig::default()
//!     .with_particle_count(5_000)
//!     .with_lerp_rate(0.1);
//! let engine = MorphEngine::new(config);
//! ```

use glam::Vec3;

/// Cone parameters for the tree shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeParams {
    /// Total height; the cone spans `-height/2..height/2` on Y.
    pub height: f32,
    /// Radius of the cone base.
    pub base_radius: f32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            height: 12.0,
            base_radius: 6.0,
        }
    }
}

/// Spherical shell parameters for the exploded shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplodeParams {
    pub min_radius: f32,
    pub radius_span: f32,
}

impl ExplodeParams {
    #[inline]
    pub fn max_radius(&self) -> f32 {
        self.min_radius + self.radius_span
    }
}

impl Default for ExplodeParams {
    fn default() -> Self {
        Self {
            min_radius: 35.0,
            radius_span: 25.0,
        }
    }
}

/// Falling snow settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowConfig {
    pub count: usize,
    /// Flakes below this height respawn at `ceiling`.
    pub floor: f32,
    pub ceiling: f32,
    /// Horizontal extent; flakes spawn in `-spread/2..spread/2` on X and Z.
    pub spread: f32,
    /// Fall speed range per tick, `min_fall..max_fall`.
    pub min_fall: f32,
    pub max_fall: f32,
    pub flake_size: f32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: 500,
            floor: -10.0,
            ceiling: 20.0,
            spread: 40.0,
            min_fall: 0.05,
            max_fall: 0.1,
            flake_size: 0.08,
        }
    }
}

impl SnowConfig {
    /// Order the floor/ceiling and fall-speed bounds and make the spread non-negative.
    ///
    /// Equal bounds are kept; sampling treats an empty range as its lower bound.
    pub fn sanitized(self) -> Self {
        Self {
            floor: self.floor.min(self.ceiling),
            ceiling: self.floor.max(self.ceiling),
            spread: self.spread.abs(),
            min_fall: self.min_fall.min(self.max_fall),
            max_fall: self.min_fall.max(self.max_fall),
            ..self
        }
    }
}

/// Camera and orbit control settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Orbit auto-rotation speed; 1.0 is one revolution per minute at 60 fps.
    pub auto_rotate_speed: f32,
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 25.0),
            auto_rotate_speed: 0.5,
            damping: 0.05,
        }
    }
}

/// The topper star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarConfig {
    pub position: Vec3,
    pub size: f32,
    /// Yaw added per tick while the tree is shown.
    pub spin: f32,
    /// Per-tick fraction toward full scale while the tree is shown.
    pub grow: f32,
    /// Per-tick fraction toward zero scale while exploded.
    pub shrink: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 6.2, 0.0),
            size: 1.0,
            spin: 0.02,
            grow: 0.05,
            shrink: 0.1,
        }
    }
}

/// Card reveal and hide choreography. Durations and offsets are in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CinematicConfig {
    pub card_width: f32,
    pub card_height: f32,
    /// The card's height (or width) maps to `1/fit_factor` of the view.
    pub fit_factor: f32,
    pub rest_emissive: f32,
    pub pulse_emissive: f32,
    pub dimmer_opacity: f32,

    pub camera_duration: f32,
    pub card_offset: f32,
    pub card_duration: f32,
    pub back_overshoot: f32,
    pub pulse_duration: f32,
    pub dimmer_duration: f32,

    pub hide_card_duration: f32,
    pub hide_dimmer_duration: f32,
    pub hide_camera_duration: f32,
    pub emissive_settle_duration: f32,

    pub resize_duration: f32,
}

impl Default for CinematicConfig {
    fn default() -> Self {
        Self {
            card_width: 9.0,
            card_height: 12.0,
            fit_factor: 1.6,
            rest_emissive: 5.0,
            pulse_emissive: 15.0,
            dimmer_opacity: 0.75,

            camera_duration: 1.5,
            card_offset: 0.3,
            card_duration: 1.4,
            back_overshoot: 1.2,
            pulse_duration: 0.7,
            dimmer_duration: 1.2,

            hide_card_duration: 0.8,
            hide_dimmer_duration: 0.6,
            hide_camera_duration: 1.5,
            emissive_settle_duration: 0.5,

            resize_duration: 0.5,
        }
    }
}

impl CinematicConfig {
    /// Time from the reveal edge until every finite reveal tween is done.
    pub fn reveal_duration(&self) -> f32 {
        let card = self.card_offset + self.card_duration;
        let dimmer = self.card_offset + self.dimmer_duration;
        self.camera_duration.max(card).max(dimmer)
    }

    /// Time from the hide edge until the camera is home.
    pub fn hide_duration(&self) -> f32 {
        self.hide_camera_duration
            .max(self.hide_card_duration)
            .max(self.hide_dimmer_duration)
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct MorphConfig {
    pub particle_count: usize,
    /// Share of the particles drawn as spheres; the rest are cubes.
    pub sphere_fraction: f32,
    pub ornament_size: f32,
    pub palette: Vec<Vec3>,
    /// Per-tick interpolation fraction toward the target.
    pub lerp_rate: f32,
    /// Slower fraction used while the card is on screen.
    pub cinematic_lerp_rate: f32,
    /// Cube spin per tick, radians about X.
    pub cube_spin: f32,
    /// Tree group yaw per tick.
    pub tree_spin: f32,
    pub tree: TreeParams,
    pub explode: ExplodeParams,
    pub snow: SnowConfig,
    pub camera: CameraConfig,
    pub star: StarConfig,
    pub cinematic: CinematicConfig,
}

/// Converts a `0xRRGGBB` color to linear-ish RGB in `0..1`.
pub fn hex_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}

pub const GOLD: u32 = 0xFFD700;
pub const RED: u32 = 0xC41E3A;
pub const GREEN: u32 = 0x10A310;
pub const DARK: u32 = 0x050505;

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            particle_count: 3000,
            sphere_fraction: 0.6,
            ornament_size: 0.15,
            palette: vec![hex_color(GOLD), hex_color(RED), hex_color(GREEN)],
            lerp_rate: 0.08,
            cinematic_lerp_rate: 0.03,
            cube_spin: 0.01,
            tree_spin: 0.005,
            tree: TreeParams::default(),
            explode: ExplodeParams::default(),
            snow: SnowConfig::default(),
            camera: CameraConfig::default(),
            star: StarConfig::default(),
            cinematic: CinematicConfig::default(),
        }
    }
}

impl MorphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of morphing particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_sphere_fraction(mut self, fraction: f32) -> Self {
        self.sphere_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Set the per-tick interpolation fraction. Clamped to `0..=1`.
    pub fn with_lerp_rate(mut self, rate: f32) -> Self {
        self.lerp_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_cinematic_lerp_rate(mut self, rate: f32) -> Self {
        self.cinematic_lerp_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_palette(mut self, palette: Vec<Vec3>) -> Self {
        if !palette.is_empty() {
            self.palette = palette;
        }
        self
    }

    pub fn with_tree(mut self, tree: TreeParams) -> Self {
        self.tree = tree;
        self
    }

    pub fn with_explode(mut self, explode: ExplodeParams) -> Self {
        self.explode = explode;
        self
    }

    pub fn with_snow(mut self, snow: SnowConfig) -> Self {
        self.snow = snow.sanitized();
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_star(mut self, star: StarConfig) -> Self {
        self.star = star;
        self
    }

    pub fn with_cinematic(mut self, cinematic: CinematicConfig) -> Self {
        self.cinematic = cinematic;
        self
    }

    /// Number of particles drawn as spheres.
    pub fn sphere_count(&self) -> usize {
        (self.particle_count as f32 * self.sphere_fraction).floor() as usize
    }
}
