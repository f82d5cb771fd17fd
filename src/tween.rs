//! Property tweens and timelines.
//!
//! A [`TweenScheduler`] holds at most one active tween per [`Property`].
//! Starting a tween on a property that is already animating replaces the
//! old one in place, so two animations never write the same property.
//! Each [`advance`](TweenScheduler::advance) interpolates every active
//! entry and drops finished ones; repeating entries live until canceled.
//!
//! ```ignore
//! let timeline = Timeline::new()
//!     .at(0.0, Tween::new(Property::CardScale, Vec3::ONE, 1.4).ease(Easing::BackOut(1.2)))
//!     .at(0.3, Tween::new(Property::DimmerOpacity, 0.75, 1.2));
//! scheduler.play(timeline);
//! ```

use crate::easing::Easing;
use crate::scene::Scene;
use glam::Vec3;
use std::collections::BTreeMap;

/// Scene properties that can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    CameraPosition,
    ControlsTarget,
    CardScale,
    CardRotation,
    DimmerOpacity,
    FrameEmissive,
}

impl Property {
    pub const ALL: [Property; 6] = [
        Property::CameraPosition,
        Property::ControlsTarget,
        Property::CardScale,
        Property::CardRotation,
        Property::DimmerOpacity,
        Property::FrameEmissive,
    ];
}

/// A value written to a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Scalar(f32),
    Vector(Vec3),
}

impl TweenValue {
    /// Interpolate from `self` to `to`. `t` may leave `0..=1` for overshooting curves.
    pub fn lerp(self, to: TweenValue, t: f32) -> TweenValue {
        match (self, to) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => TweenValue::Scalar(a + (b - a) * t),
            (TweenValue::Vector(a), TweenValue::Vector(b)) => TweenValue::Vector(a + (b - a) * t),
            (_, to) => to,
        }
    }
}

impl From<f32> for TweenValue {
    fn from(v: f32) -> Self {
        TweenValue::Scalar(v)
    }
}

impl From<Vec3> for TweenValue {
    fn from(v: Vec3) -> Self {
        TweenValue::Vector(v)
    }
}

/// Repeat behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Once,
    /// Play forward, then backward, forever. Must be canceled explicitly.
    YoyoForever,
}

/// Signals emitted when a tween finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// The camera is back at its saved pose; user control may resume.
    RestoreControls,
}

/// One property animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub property: Property,
    pub to: TweenValue,
    pub duration: f32,
    pub delay: f32,
    pub easing: Easing,
    pub repeat: Repeat,
    /// Re-aim the camera at this point after every write.
    pub aim: Option<Vec3>,
    pub on_complete: Option<Cue>,
}

impl Tween {
    pub fn new(property: Property, to: impl Into<TweenValue>, duration: f32) -> Self {
        Self {
            property,
            to: to.into(),
            duration: duration.max(0.0),
            delay: 0.0,
            easing: Easing::default(),
            repeat: Repeat::Once,
            aim: None,
            on_complete: None,
        }
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn yoyo_forever(mut self) -> Self {
        self.repeat = Repeat::YoyoForever;
        self
    }

    pub fn aim_camera_at(mut self, point: Vec3) -> Self {
        self.aim = Some(point);
        self
    }

    pub fn on_complete(mut self, cue: Cue) -> Self {
        self.on_complete = Some(cue);
        self
    }
}

/// Tweens with start offsets relative to the moment the timeline is played.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<Tween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `tween` to start `offset` seconds into the timeline.
    pub fn at(mut self, offset: f32, tween: Tween) -> Self {
        let delay = tween.delay + offset.max(0.0);
        self.entries.push(tween.delay(delay));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time at which the last non-repeating entry ends.
    pub fn duration(&self) -> f32 {
        self.entries
            .iter()
            .filter(|t| t.repeat == Repeat::Once)
            .map(|t| t.delay + t.duration)
            .fold(0.0, f32::max)
    }
}

#[derive(Debug, Clone)]
struct ActiveTween {
    tween: Tween,
    /// Captured when the delay elapses, so the tween starts from whatever
    /// value the property holds at that moment.
    from: Option<TweenValue>,
    elapsed: f32,
}

/// Property-keyed set of running tweens.
#[derive(Debug, Default)]
pub struct TweenScheduler {
    active: BTreeMap<Property, ActiveTween>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween, replacing any tween already on the same property.
    pub fn start(&mut self, tween: Tween) {
        self.active.insert(
            tween.property,
            ActiveTween {
                tween,
                from: None,
                elapsed: 0.0,
            },
        );
    }

    /// Start every tween of a timeline.
    pub fn play(&mut self, timeline: Timeline) {
        for tween in timeline.entries {
            self.start(tween);
        }
    }

    /// Stop the tween on `property`, leaving the property at its current value.
    pub fn cancel(&mut self, property: Property) -> bool {
        self.active.remove(&property).is_some()
    }

    /// Stop every tween on the given properties, repeating ones included.
    pub fn cancel_all_of(&mut self, properties: &[Property]) {
        for property in properties {
            self.active.remove(property);
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_animating(&self, property: Property) -> bool {
        self.active.contains_key(&property)
    }

    /// Whether any tween on `property` repeats forever.
    pub fn is_repeating(&self, property: Property) -> bool {
        self.active
            .get(&property)
            .is_some_and(|a| a.tween.repeat == Repeat::YoyoForever)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether any tween that will finish on its own is still running.
    pub fn has_finite(&self) -> bool {
        self.active
            .values()
            .any(|a| a.tween.repeat == Repeat::Once)
    }

    /// Advance all tweens by `dt` seconds, writing into `scene`.
    ///
    /// Returns the cues of tweens that finished during this step.
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) -> Vec<Cue> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut finished = Vec::new();
        let mut cues = Vec::new();

        for (property, active) in self.active.iter_mut() {
            active.elapsed += dt;
            let tween = &active.tween;
            if active.elapsed < tween.delay {
                continue;
            }

            let from = *active
                .from
                .get_or_insert_with(|| scene.property(*property));
            let local = active.elapsed - tween.delay;

            let (progress, done) = if tween.duration <= 0.0 {
                (1.0, tween.repeat == Repeat::Once)
            } else {
                match tween.repeat {
                    Repeat::Once => {
                        let p = (local / tween.duration).min(1.0);
                        (p, p >= 1.0)
                    }
                    Repeat::YoyoForever => {
                        let cycle = (local / tween.duration).floor();
                        let p = local / tween.duration - cycle;
                        if cycle as u64 % 2 == 0 {
                            (p, false)
                        } else {
                            (1.0 - p, false)
                        }
                    }
                }
            };

            let value = if done {
                tween.to
            } else {
                from.lerp(tween.to, tween.easing.apply(progress))
            };
            scene.set_property(*property, value);
            if let Some(point) = tween.aim {
                scene.camera.look_at(point);
            }

            if done {
                finished.push(*property);
                if let Some(cue) = tween.on_complete {
                    cues.push(cue);
                }
            }
        }

        for property in finished {
            self.active.remove(&property);
        }
        cues
    }
}
