//! Card reveal / hide choreography.
//!
//! The director is edge-triggered: the engine calls [`CinematicDirector::reveal`]
//! when the shape becomes EXPLODE and [`CinematicDirector::hide`] when it
//! returns to TREE. Each edge first cancels every tween the other edge may
//! have left running (the frame pulse repeats forever and would otherwise keep
//! writing the material after the card is gone), then plays its own timeline.
//!
//! Phase diagram:
//!
//! ```text
//!  Idle ──reveal──▶ Revealing ──timeline done──▶ Revealed
//!   ▲                  ▲  │                         │
//!   │               reveal hide                    hide
//!   │                  │  ▼                         │
//!   └─RestoreControls─ Hiding ◀─────────────────────┘
//! ```

use crate::camera::fit_distance;
use crate::config::CinematicConfig;
use crate::easing::Easing;
use crate::scene::Scene;
use crate::tween::{Cue, Property, Timeline, Tween, TweenScheduler};
use glam::Vec3;
use std::f32::consts::PI;

/// Every property either edge animates.
const CINEMATIC_PROPERTIES: [Property; 6] = [
    Property::CameraPosition,
    Property::ControlsTarget,
    Property::CardScale,
    Property::CardRotation,
    Property::DimmerOpacity,
    Property::FrameEmissive,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CinematicPhase {
    #[default]
    Idle,
    Revealing,
    Revealed,
    Hiding,
}

/// Camera and control state captured before the first reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedView {
    pub camera_position: Vec3,
    pub controls_target: Vec3,
    pub controls_enabled: bool,
    pub auto_rotate: bool,
}

impl SavedView {
    fn capture(scene: &Scene) -> Self {
        Self {
            camera_position: scene.camera.position,
            controls_target: scene.controls.target,
            controls_enabled: scene.controls.enabled,
            auto_rotate: scene.controls.auto_rotate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CinematicDirector {
    config: CinematicConfig,
    phase: CinematicPhase,
    saved: Option<SavedView>,
}

impl CinematicDirector {
    pub fn new(config: CinematicConfig) -> Self {
        Self {
            config,
            phase: CinematicPhase::Idle,
            saved: None,
        }
    }

    pub fn phase(&self) -> CinematicPhase {
        self.phase
    }

    /// True while the card is (being) shown.
    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            CinematicPhase::Revealing | CinematicPhase::Revealed
        )
    }

    pub fn saved_view(&self) -> Option<&SavedView> {
        self.saved.as_ref()
    }

    /// Camera distance that frames the card for the camera's current fov and aspect.
    pub fn card_distance(&self, scene: &Scene) -> f32 {
        fit_distance(
            scene.card.width,
            scene.card.height,
            scene.camera.fov,
            scene.camera.aspect,
            self.config.fit_factor,
        )
    }

    /// Start the reveal. No-op while already revealing or revealed.
    pub fn reveal(&mut self, scene: &mut Scene, tweens: &mut TweenScheduler) {
        if self.is_active() {
            return;
        }
        tweens.cancel_all_of(&CINEMATIC_PROPERTIES);

        // Coming back mid-hide keeps the pose saved before the first reveal.
        if self.phase == CinematicPhase::Idle || self.saved.is_none() {
            self.saved = Some(SavedView::capture(scene));
        }
        scene.controls.enabled = false;
        scene.controls.auto_rotate = false;

        let c = &self.config;
        let distance = self.card_distance(scene);
        log::debug!("card reveal, camera distance {distance:.3}");

        scene.card.transform.rotation = Vec3::new(0.0, PI * 2.0, PI * 0.1);

        let timeline = Timeline::new()
            .at(
                0.0,
                Tween::new(
                    Property::CameraPosition,
                    Vec3::new(0.0, 0.0, distance),
                    c.camera_duration,
                )
                .ease(Easing::Power2InOut)
                .aim_camera_at(Vec3::ZERO),
            )
            .at(
                0.0,
                Tween::new(Property::ControlsTarget, Vec3::ZERO, c.camera_duration)
                    .ease(Easing::Power2InOut),
            )
            .at(
                c.card_offset,
                Tween::new(Property::CardScale, Vec3::ONE, c.card_duration)
                    .ease(Easing::BackOut(c.back_overshoot)),
            )
            .at(
                c.card_offset,
                Tween::new(Property::CardRotation, Vec3::ZERO, c.card_duration)
                    .ease(Easing::Power3Out),
            )
            .at(
                c.card_offset,
                Tween::new(Property::FrameEmissive, c.pulse_emissive, c.pulse_duration)
                    .ease(Easing::SineInOut)
                    .yoyo_forever(),
            )
            .at(
                c.card_offset,
                Tween::new(Property::DimmerOpacity, c.dimmer_opacity, c.dimmer_duration),
            );
        tweens.play(timeline);

        self.set_phase(CinematicPhase::Revealing);
    }

    /// Start the hide. No-op unless revealing or revealed.
    pub fn hide(&mut self, scene: &mut Scene, tweens: &mut TweenScheduler) {
        if !self.is_active() {
            return;
        }
        tweens.cancel_all_of(&CINEMATIC_PROPERTIES);

        let c = &self.config;
        let saved = self.saved.unwrap_or_else(|| SavedView::capture(scene));
        let rotation = scene.card.transform.rotation;

        let timeline = Timeline::new()
            .at(
                0.0,
                Tween::new(Property::CardScale, Vec3::ZERO, c.hide_card_duration)
                    .ease(Easing::Power2In),
            )
            .at(
                0.0,
                Tween::new(
                    Property::CardRotation,
                    Vec3::new(rotation.x, -PI, rotation.z),
                    c.hide_card_duration,
                )
                .ease(Easing::Power2In),
            )
            .at(
                0.0,
                Tween::new(Property::DimmerOpacity, 0.0, c.hide_dimmer_duration),
            )
            .at(
                0.0,
                Tween::new(
                    Property::CameraPosition,
                    saved.camera_position,
                    c.hide_camera_duration,
                )
                .ease(Easing::Power2InOut)
                .on_complete(Cue::RestoreControls),
            )
            .at(
                0.0,
                Tween::new(
                    Property::ControlsTarget,
                    saved.controls_target,
                    c.hide_camera_duration,
                )
                .ease(Easing::Power2InOut),
            );
        tweens.play(timeline);

        // Settles the frame glow on its own clock, outside the hide timeline.
        tweens.start(Tween::new(
            Property::FrameEmissive,
            c.rest_emissive,
            c.emissive_settle_duration,
        ));

        self.set_phase(CinematicPhase::Hiding);
    }

    /// Keep the card framed after a viewport change without restarting the reveal.
    pub fn on_resize(&mut self, scene: &mut Scene, tweens: &mut TweenScheduler) {
        if !self.is_active() {
            return;
        }
        let distance = self.card_distance(scene);
        log::debug!("resize retarget, camera distance {distance:.3}");
        tweens.start(
            Tween::new(
                Property::CameraPosition,
                Vec3::new(0.0, 0.0, distance),
                self.config.resize_duration,
            )
            .aim_camera_at(Vec3::ZERO),
        );
    }

    /// Handle completion cues and settle `Revealing` into `Revealed`.
    pub fn update(&mut self, cues: &[Cue], scene: &mut Scene, tweens: &TweenScheduler) {
        for cue in cues {
            match cue {
                Cue::RestoreControls => {
                    if self.phase != CinematicPhase::Hiding {
                        continue;
                    }
                    let saved = self.saved.take();
                    scene.controls.enabled = saved.map_or(true, |s| s.controls_enabled);
                    scene.controls.auto_rotate = saved.map_or(true, |s| s.auto_rotate);
                    self.set_phase(CinematicPhase::Idle);
                }
            }
        }

        if self.phase == CinematicPhase::Revealing && !tweens.has_finite() {
            self.set_phase(CinematicPhase::Revealed);
        }
    }

    /// Drop every cinematic tween and return to idle, restoring controls.
    pub fn reset(&mut self, scene: &mut Scene, tweens: &mut TweenScheduler) {
        tweens.cancel_all_of(&CINEMATIC_PROPERTIES);
        if let Some(saved) = self.saved.take() {
            scene.controls.enabled = saved.controls_enabled;
            scene.controls.auto_rotate = saved.auto_rotate;
        }
        self.set_phase(CinematicPhase::Idle);
    }

    fn set_phase(&mut self, phase: CinematicPhase) {
        if self.phase != phase {
            log::debug!("cinematic {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MorphConfig;

    struct Rig {
        scene: Scene,
        tweens: TweenScheduler,
        director: CinematicDirector,
    }

    impl Rig {
        fn new() -> Self {
            let config = MorphConfig::default();
            Self {
                scene: Scene::new(&config, 16.0 / 9.0),
                tweens: TweenScheduler::new(),
                director: CinematicDirector::new(config.cinematic),
            }
        }

        fn step(&mut self, seconds: f32) {
            let steps = (seconds * 60.0).round() as usize;
            for _ in 0..steps {
                let cues = self.tweens.advance(1.0 / 60.0, &mut self.scene);
                self.director.update(&cues, &mut self.scene, &self.tweens);
            }
        }
    }

    #[test]
    fn test_reveal_disables_controls() {
        let mut rig = Rig::new();
        rig.director.reveal(&mut rig.scene, &mut rig.tweens);
        assert_eq!(rig.director.phase(), CinematicPhase::Revealing);
        assert!(!rig.scene.controls.enabled);
        assert!(!rig.scene.controls.auto_rotate);
        assert!(rig.tweens.is_repeating(Property::FrameEmissive));
    }

    #[test]
    fn test_reveal_settles_into_revealed() {
        let mut rig = Rig::new();
        rig.director.reveal(&mut rig.scene, &mut rig.tweens);
        rig.step(2.0);
        assert_eq!(rig.director.phase(), CinematicPhase::Revealed);
        assert_eq!(rig.scene.card.transform.scale, Vec3::ONE);
        assert_eq!(rig.scene.card.transform.rotation, Vec3::ZERO);
        assert!((rig.scene.card.dimmer.opacity - 0.75).abs() < 1e-6);
        let expected = rig.director.card_distance(&rig.scene);
        assert!((rig.scene.camera.position - Vec3::new(0.0, 0.0, expected)).length() < 1e-4);
        // pulse is still going
        assert!(rig.tweens.is_repeating(Property::FrameEmissive));
    }

    #[test]
    fn test_hide_restores_controls_only_on_camera_return() {
        let mut rig = Rig::new();
        rig.director.reveal(&mut rig.scene, &mut rig.tweens);
        rig.step(2.0);
        rig.director.hide(&mut rig.scene, &mut rig.tweens);
        assert!(!rig.tweens.is_repeating(Property::FrameEmissive));

        rig.step(1.0);
        assert_eq!(rig.director.phase(), CinematicPhase::Hiding);
        assert!(!rig.scene.controls.enabled);

        rig.step(0.6);
        assert_eq!(rig.director.phase(), CinematicPhase::Idle);
        assert!(rig.scene.controls.enabled);
        assert!(rig.scene.controls.auto_rotate);
        assert_eq!(rig.scene.camera.position, Vec3::new(0.0, 0.0, 25.0));
        assert_eq!(rig.scene.card.transform.scale, Vec3::ZERO);
        assert_eq!(rig.scene.card.frame.emissive_intensity, 5.0);
    }

    #[test]
    fn test_reveal_mid_hide_keeps_original_pose() {
        let mut rig = Rig::new();
        rig.director.reveal(&mut rig.scene, &mut rig.tweens);
        rig.step(1.0);
        rig.director.hide(&mut rig.scene, &mut rig.tweens);
        rig.step(0.5);
        rig.director.reveal(&mut rig.scene, &mut rig.tweens);
        let saved = rig.director.saved_view().copied();
        assert_eq!(
            saved.map(|s| s.camera_position),
            Some(Vec3::new(0.0, 0.0, 25.0))
        );
        assert!(saved.is_some_and(|s| s.controls_enabled && s.auto_rotate));
    }

    #[test]
    fn test_repeated_edges_are_noops() {
        let mut rig = Rig::new();
        rig.director.hide(&mut rig.scene, &mut rig.tweens);
        assert_eq!(rig.director.phase(), CinematicPhase::Idle);
        assert_eq!(rig.tweens.active_count(), 0);

        rig.director.reveal(&mut rig.scene, &mut rig.tweens);
        let count = rig.tweens.active_count();
        rig.step(0.2);
        rig.director.reveal(&mut rig.scene, &mut rig.tweens);
        assert_eq!(rig.tweens.active_count(), count);
    }

    #[test]
    fn test_resize_retargets_camera_only() {
        let mut rig = Rig::new();
        rig.director.reveal(&mut rig.scene, &mut rig.tweens);
        rig.step(2.0);
        rig.scene.camera.set_aspect(0.5);
        rig.director.on_resize(&mut rig.scene, &mut rig.tweens);
        assert!(rig.tweens.is_repeating(Property::FrameEmissive));
        rig.step(0.6);
        let expected = rig.director.card_distance(&rig.scene);
        assert!((rig.scene.camera.position.z - expected).abs() < 1e-3);
        assert_eq!(rig.director.phase(), CinematicPhase::Revealed);
    }

    #[test]
    fn test_resize_while_idle_does_nothing() {
        let mut rig = Rig::new();
        rig.director.on_resize(&mut rig.scene, &mut rig.tweens);
        assert_eq!(rig.tweens.active_count(), 0);
    }
}
