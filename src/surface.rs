//! The rendering boundary.
//!
//! The engine never draws. It pushes per-instance transforms and colors into
//! a [`RenderSurface`] and hands it the [`Scene`] once per tick; how the
//! surface turns that into pixels is its own business.

use crate::error::SurfaceError;
use crate::scene::Scene;
use glam::{Mat4, Vec3};

/// Instanced populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstanceLayer {
    /// Round ornaments, local to the tree group.
    Spheres,
    /// Square ornaments, local to the tree group.
    Cubes,
    /// Snow, in world space.
    Snow,
}

impl InstanceLayer {
    pub const ALL: [InstanceLayer; 3] = [
        InstanceLayer::Spheres,
        InstanceLayer::Cubes,
        InstanceLayer::Snow,
    ];

    pub fn index(self) -> usize {
        match self {
            InstanceLayer::Spheres => 0,
            InstanceLayer::Cubes => 1,
            InstanceLayer::Snow => 2,
        }
    }
}

/// Something that can draw the scene.
pub trait RenderSurface {
    /// Size the instance storage of `layer`.
    fn allocate(&mut self, layer: InstanceLayer, count: usize);

    /// Set instance `index` of `layer` to `transform`. Out-of-range indices are ignored.
    fn set_instance_transform(&mut self, layer: InstanceLayer, index: usize, transform: Mat4);

    fn set_instance_color(&mut self, layer: InstanceLayer, index: usize, color: Vec3);

    fn set_layer_visible(&mut self, layer: InstanceLayer, visible: bool);

    /// Reconfigure the viewport.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw the frame.
    fn submit(&mut self, scene: &Scene) -> Result<(), SurfaceError>;
}

#[derive(Debug, Clone, Default)]
struct LayerRecord {
    transforms: Vec<Mat4>,
    colors: Vec<Vec3>,
    visible: bool,
}

/// A surface that only records what it was told.
///
/// Useful for running the engine without a window and for inspecting the
/// instance data it produces.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    layers: [LayerRecord; 3],
    size: (u32, u32),
    frames: u64,
    last_scene: Option<Scene>,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }

    pub fn transforms(&self, layer: InstanceLayer) -> &[Mat4] {
        &self.layers[layer.index()].transforms
    }

    pub fn colors(&self, layer: InstanceLayer) -> &[Vec3] {
        &self.layers[layer.index()].colors
    }

    pub fn is_visible(&self, layer: InstanceLayer) -> bool {
        self.layers[layer.index()].visible
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Number of frames submitted.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Scene as of the last submit.
    pub fn last_scene(&self) -> Option<&Scene> {
        self.last_scene.as_ref()
    }
}

impl RenderSurface for HeadlessSurface {
    fn allocate(&mut self, layer: InstanceLayer, count: usize) {
        let record = &mut self.layers[layer.index()];
        record.transforms = vec![Mat4::IDENTITY; count];
        record.colors = vec![Vec3::ONE; count];
        record.visible = true;
    }

    fn set_instance_transform(&mut self, layer: InstanceLayer, index: usize, transform: Mat4) {
        if let Some(slot) = self.layers[layer.index()].transforms.get_mut(index) {
            *slot = transform;
        }
    }

    fn set_instance_color(&mut self, layer: InstanceLayer, index: usize, color: Vec3) {
        if let Some(slot) = self.layers[layer.index()].colors.get_mut(index) {
            *slot = color;
        }
    }

    fn set_layer_visible(&mut self, layer: InstanceLayer, visible: bool) {
        self.layers[layer.index()].visible = visible;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn submit(&mut self, scene: &Scene) -> Result<(), SurfaceError> {
        self.frames += 1;
        self.last_scene = Some(scene.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_writes_ignored() {
        let mut surface = HeadlessSurface::new(800, 600);
        surface.allocate(InstanceLayer::Snow, 2);
        surface.set_instance_transform(InstanceLayer::Snow, 5, Mat4::ZERO);
        surface.set_instance_color(InstanceLayer::Snow, 5, Vec3::ZERO);
        assert_eq!(surface.transforms(InstanceLayer::Snow).len(), 2);
        assert!(surface
            .transforms(InstanceLayer::Snow)
            .iter()
            .all(|m| *m == Mat4::IDENTITY));
    }

    #[test]
    fn test_layer_indices_unique() {
        let mut seen = [false; 3];
        for layer in InstanceLayer::ALL {
            assert!(!seen[layer.index()]);
            seen[layer.index()] = true;
        }
    }
}
