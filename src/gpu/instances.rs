//! CPU-side instance data and its GPU layout.

use crate::scene::{Scene, Transform};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Sprite shape selector read by the fragment shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Sprite {
    Round = 0,
    Square = 1,
    Star = 2,
    Panel = 3,
}

/// One instance as laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    /// RGB and alpha.
    pub color: [f32; 4],
    /// x: sprite, y: brightness.
    pub params: [f32; 4],
}

impl InstanceRaw {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x4,
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4
    ];

    pub fn new(model: Mat4, color: Vec3, alpha: f32, sprite: Sprite, brightness: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.extend(alpha).to_array(),
            params: [sprite as u32 as f32, brightness, 0.0, 0.0],
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-frame camera data.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
}

impl Uniforms {
    pub fn from_scene(scene: &Scene) -> Self {
        let camera_to_world = scene.camera.view_matrix().inverse();
        Self {
            view_proj: scene.camera.view_proj().to_cols_array_2d(),
            camera_right: camera_to_world.x_axis.truncate().extend(0.0).to_array(),
            camera_up: camera_to_world.y_axis.truncate().extend(0.0).to_array(),
        }
    }
}

/// Transforms and colors written through the render surface, before packing.
#[derive(Debug, Clone, Default)]
pub struct LayerData {
    pub transforms: Vec<Mat4>,
    pub colors: Vec<Vec3>,
    pub visible: bool,
}

impl LayerData {
    pub fn with_len(count: usize) -> Self {
        Self {
            transforms: vec![Mat4::IDENTITY; count],
            colors: vec![Vec3::ONE; count],
            visible: true,
        }
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Pack every instance, placing them under `parent`.
    ///
    /// Hidden layers pack to nothing.
    pub fn pack(&self, parent: Mat4, sprite: Sprite) -> Vec<InstanceRaw> {
        if !self.visible {
            return Vec::new();
        }
        self.transforms
            .iter()
            .zip(&self.colors)
            .map(|(m, c)| InstanceRaw::new(parent * *m, *c, 1.0, sprite, 1.0))
            .collect()
    }
}

/// Frame brightness at a given emissive intensity; 1.0 at rest.
pub fn frame_brightness(emissive: f32, rest: f32) -> f32 {
    if rest <= 0.0 {
        return 1.0;
    }
    0.5 + 0.5 * emissive.max(0.0) / rest
}

/// Dimmer plane edge length, in card-local units.
pub const DIMMER_SIZE: f32 = 100.0;

/// Star and card panels, star first.
///
/// Panels are ordered back to front: dimmer, frame, face. A collapsed card
/// (zero scale) packs no panels.
pub fn overlay_instances(scene: &Scene, rest_emissive: f32) -> Vec<InstanceRaw> {
    let mut out = Vec::with_capacity(4);
    let star = &scene.star;
    out.push(InstanceRaw::new(
        scene.star_matrix(),
        star.material.color,
        star.material.opacity,
        Sprite::Star,
        1.5,
    ));

    let card = &scene.card;
    if card.transform.scale.abs().max_element() <= f32::EPSILON {
        return out;
    }
    let group = card.transform.matrix();
    let panel = |z: f32, w: f32, h: f32| {
        group
            * Transform {
                position: Vec3::new(0.0, 0.0, z),
                rotation: Vec3::ZERO,
                scale: Vec3::new(w, h, 1.0),
            }
            .matrix()
    };

    if card.dimmer.opacity > 0.0 {
        out.push(InstanceRaw::new(
            panel(-1.0, DIMMER_SIZE, DIMMER_SIZE),
            card.dimmer.color,
            card.dimmer.opacity,
            Sprite::Panel,
            1.0,
        ));
    }
    out.push(InstanceRaw::new(
        panel(-0.05, card.width + 0.1, card.height + 0.1),
        card.frame.color,
        card.frame.opacity,
        Sprite::Panel,
        frame_brightness(card.frame.emissive_intensity, rest_emissive),
    ));
    out.push(InstanceRaw::new(
        panel(0.0, card.width, card.height),
        card.face.color,
        card.face.opacity,
        Sprite::Panel,
        1.0,
    ));
    out
}

/// Clear color for the scene background.
pub fn clear_color(scene: &Scene) -> wgpu::Color {
    let c: Vec4 = scene.background.extend(1.0);
    wgpu::Color {
        r: c.x as f64,
        g: c.y as f64,
        b: c.z as f64,
        a: c.w as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MorphConfig;

    fn scene() -> Scene {
        Scene::new(&MorphConfig::default(), 1.5)
    }

    #[test]
    fn test_instance_layout_size() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 96);
        assert_eq!(std::mem::size_of::<Uniforms>(), 96);
    }

    #[test]
    fn test_hidden_layer_packs_nothing() {
        let mut layer = LayerData::with_len(4);
        assert_eq!(layer.pack(Mat4::IDENTITY, Sprite::Round).len(), 4);
        layer.visible = false;
        assert!(layer.pack(Mat4::IDENTITY, Sprite::Round).is_empty());
    }

    #[test]
    fn test_pack_applies_parent() {
        let mut layer = LayerData::with_len(1);
        layer.transforms[0] = Mat4::from_translation(Vec3::X);
        let packed = layer.pack(Mat4::from_translation(Vec3::Y), Sprite::Square);
        assert_eq!(packed[0].model[3], [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(packed[0].params[0], 1.0);
    }

    #[test]
    fn test_collapsed_card_has_no_panels() {
        let overlay = overlay_instances(&scene(), 5.0);
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay[0].params[0], Sprite::Star as u32 as f32);
    }

    #[test]
    fn test_revealed_card_panels() {
        let mut scene = scene();
        scene.card.transform.scale = Vec3::ONE;
        scene.card.dimmer.opacity = 0.75;
        scene.card.frame.emissive_intensity = 15.0;
        let overlay = overlay_instances(&scene, 5.0);
        assert_eq!(overlay.len(), 4);
        // dimmer, frame, face
        assert_eq!(overlay[1].color[3], 0.75);
        assert_eq!(overlay[2].params[1], 2.0);
        assert_eq!(overlay[3].params[1], 1.0);
    }

    #[test]
    fn test_frame_brightness_at_rest() {
        assert_eq!(frame_brightness(5.0, 5.0), 1.0);
        assert_eq!(frame_brightness(-3.0, 5.0), 0.5);
        assert_eq!(frame_brightness(10.0, 0.0), 1.0);
    }
}
