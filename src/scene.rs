//! Scene state shared by the engine, the director and the render surface.
//!
//! `Scene` owns every renderer-visible property that is not an instance
//! buffer: camera, orbit controls, the tree group, the star, the card group
//! with its frame material, and the dimmer. It is constructed explicitly and
//! passed around; there is no global scene.

use crate::camera::{OrbitControls, PerspectiveCamera};
use crate::config::MorphConfig;
use crate::tween::{Property, TweenValue};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, Euler rotation (XYZ, radians) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The subset of a surface material the cinematic animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub emissive_intensity: f32,
    pub opacity: f32,
}

/// The greeting card, its glowing frame and the dimmer behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct CardGroup {
    pub transform: Transform,
    pub width: f32,
    pub height: f32,
    pub face: Material,
    pub frame: Material,
    /// Full-screen dark plane behind the card.
    pub dimmer: Material,
}

/// The star on top of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Local to the tree group.
    pub transform: Transform,
    pub material: Material,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub background: Vec3,
    pub tree_group: Transform,
    pub star: Star,
    pub card: CardGroup,
}

impl Scene {
    pub fn new(config: &MorphConfig, aspect: f32) -> Self {
        let gold = crate::config::hex_color(crate::config::GOLD);
        let cinematic = &config.cinematic;

        let mut camera = PerspectiveCamera::new(&config.camera, aspect);
        camera.look_at(Vec3::ZERO);

        Self {
            camera,
            controls: OrbitControls::new(&config.camera),
            background: crate::config::hex_color(crate::config::DARK),
            tree_group: Transform::IDENTITY,
            star: Star {
                transform: Transform {
                    position: config.star.position,
                    rotation: Vec3::ZERO,
                    scale: Vec3::ZERO,
                },
                material: Material {
                    color: gold,
                    emissive_intensity: 1.0,
                    opacity: 1.0,
                },
            },
            card: CardGroup {
                transform: Transform {
                    scale: Vec3::ZERO,
                    ..Transform::IDENTITY
                },
                width: cinematic.card_width,
                height: cinematic.card_height,
                face: Material {
                    color: crate::config::hex_color(0xF9F9F4),
                    emissive_intensity: 0.0,
                    opacity: 1.0,
                },
                frame: Material {
                    color: gold,
                    emissive_intensity: cinematic.rest_emissive,
                    opacity: 1.0,
                },
                dimmer: Material {
                    color: Vec3::ZERO,
                    emissive_intensity: 0.0,
                    opacity: 0.0,
                },
            },
        }
    }

    /// Current value of an animatable property.
    pub fn property(&self, property: Property) -> TweenValue {
        match property {
            Property::CameraPosition => TweenValue::Vector(self.camera.position),
            Property::ControlsTarget => TweenValue::Vector(self.controls.target),
            Property::CardScale => TweenValue::Vector(self.card.transform.scale),
            Property::CardRotation => TweenValue::Vector(self.card.transform.rotation),
            Property::DimmerOpacity => TweenValue::Scalar(self.card.dimmer.opacity),
            Property::FrameEmissive => TweenValue::Scalar(self.card.frame.emissive_intensity),
        }
    }

    /// Write an animatable property. Mismatched value kinds are ignored.
    pub fn set_property(&mut self, property: Property, value: TweenValue) {
        match (property, value) {
            (Property::CameraPosition, TweenValue::Vector(v)) => self.camera.position = v,
            (Property::ControlsTarget, TweenValue::Vector(v)) => self.controls.target = v,
            (Property::CardScale, TweenValue::Vector(v)) => self.card.transform.scale = v,
            (Property::CardRotation, TweenValue::Vector(v)) => self.card.transform.rotation = v,
            (Property::DimmerOpacity, TweenValue::Scalar(v)) => {
                self.card.dimmer.opacity = v.clamp(0.0, 1.0)
            }
            (Property::FrameEmissive, TweenValue::Scalar(v)) => {
                self.card.frame.emissive_intensity = v
            }
            (property, value) => {
                log::warn!("ignoring {value:?} written to {property:?}");
            }
        }
    }

    /// World matrix of the star.
    pub fn star_matrix(&self) -> Mat4 {
        self.tree_group.matrix() * self.star.transform.matrix()
    }
}
