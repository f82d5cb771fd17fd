//! # yulemorph
//!
//! A gesture-driven particle morph: a few thousand ornaments gather into a
//! cone-shaped tree or scatter across a wide spherical shell, and scattering
//! plays a short cinematic that flies the camera to a glowing greeting card.
//!
//! ## Quick Start
//!
//! ```no_run
//! use yulemorph::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     yulemorph::run(MorphConfig::default())
//! }
//! ```
//!
//! ## Headless use
//!
//! The engine never draws by itself. It writes instance transforms into a
//! [`RenderSurface`], which makes it easy to drive without a window:
//!
//! ```
//! use yulemorph::prelude::*;
//!
//! let mut engine = MorphEngine::with_seed(MorphConfig::default(), 16.0 / 9.0, 7);
//! let mut surface = HeadlessSurface::new(1280, 720);
//! engine.attach(&mut surface);
//!
//! engine.set_shape(Shape::Explode);
//! for _ in 0..120 {
//!     engine.tick(1.0 / 60.0, &mut surface).unwrap();
//! }
//! assert_eq!(engine.phase(), CinematicPhase::Revealed);
//! ```
//!
//! ## Core Concepts
//!
//! - [`Shape`] sampling produces per-particle targets; [`ParticleStore`]
//!   eases every ornament toward its target each tick.
//! - [`CinematicDirector`] runs the reveal/hide state machine on top of a
//!   property-keyed [`TweenScheduler`].
//! - [`GestureBridge`] turns hand landmarks into shape changes, and
//!   [`Session`] ties capture, engine and surface into one lifecycle.

pub mod app;
pub mod camera;
pub mod config;
pub mod director;
pub mod easing;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod gpu;
pub mod input;
pub mod particles;
pub mod scene;
pub mod session;
pub mod shape;
pub mod surface;
pub mod time;
pub mod tween;
pub mod weather;

pub use app::run;
pub use camera::{fit_distance, OrbitControls, PerspectiveCamera};
pub use config::{
    CameraConfig, CinematicConfig, ExplodeParams, MorphConfig, SnowConfig, StarConfig,
    TreeParams,
};
pub use director::{CinematicDirector, CinematicPhase, SavedView};
pub use easing::Easing;
pub use engine::MorphEngine;
pub use error::{AppError, CaptureError, GpuError, SessionError, SurfaceError};
pub use gesture::{GestureBridge, HandFrame, Landmark};
pub use gpu::GpuSurface;
pub use glam::{Mat4, Vec2, Vec3};
pub use particles::{OrnamentKind, ParticleStore};
pub use scene::{Material, Scene, Transform};
pub use session::{AppState, CaptureSource, ChannelCapture, Session};
pub use shape::{Shape, ShapeParams};
pub use surface::{HeadlessSurface, InstanceLayer, RenderSurface};
pub use tween::{Cue, Property, Repeat, Timeline, Tween, TweenScheduler, TweenValue};
pub use weather::Snowfall;

/// Convenient imports for common usage.
///
/// ```ignore
/// use yulemorph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::MorphConfig;
    pub use crate::director::CinematicPhase;
    pub use crate::engine::MorphEngine;
    pub use crate::error::{AppError, SessionError};
    pub use crate::gesture::{GestureBridge, HandFrame};
    pub use crate::session::{AppState, CaptureSource, ChannelCapture, Session};
    pub use crate::shape::Shape;
    pub use crate::surface::{HeadlessSurface, InstanceLayer, RenderSurface};
    pub use crate::{Vec2, Vec3};
}
