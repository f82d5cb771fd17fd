//! Perspective camera and orbit controls.

use crate::config::CameraConfig;
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

const MIN_FOV_DEGREES: f32 = 1.0;
const MAX_FOV_DEGREES: f32 = 179.0;
const MIN_ASPECT: f32 = 0.05;
const MAX_ASPECT: f32 = 20.0;
const POLE_EPS: f32 = 1e-4;

/// Clamp a field of view (degrees) to a range the pinhole math survives.
pub fn sane_fov_degrees(fov: f32) -> f32 {
    if fov.is_finite() {
        fov.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES)
    } else {
        60.0
    }
}

/// Clamp an aspect ratio to a range the pinhole math survives.
pub fn sane_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() {
        aspect.clamp(MIN_ASPECT, MAX_ASPECT)
    } else {
        1.0
    }
}

/// Camera distance at which a `width` x `height` card fills `1/fit` of the view.
///
/// Uses the pinhole relation per axis and keeps the larger distance so the
/// card fits on both. Inputs are clamped, so the result is always finite.
pub fn fit_distance(width: f32, height: f32, fov_degrees: f32, aspect: f32, fit: f32) -> f32 {
    let half_fov = sane_fov_degrees(fov_degrees).to_radians() / 2.0;
    let aspect = sane_aspect(aspect);
    let fit = if fit.is_finite() && fit > 0.0 { fit } else { 1.0 };
    let tan = half_fov.tan();

    let dist_height = (height.abs() / fit) / tan;
    let dist_width = (width.abs() / fit) / (tan * aspect);
    dist_height.max(dist_width)
}

/// A perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Point the camera is aimed at.
    look_target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: config.position,
            fov: sane_fov_degrees(config.fov_degrees),
            aspect: sane_aspect(aspect),
            near: config.near,
            far: config.far,
            look_target: Vec3::ZERO,
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.look_target = target;
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    /// Update the aspect ratio, clamped.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sane_aspect(aspect);
    }

    pub fn view_matrix(&self) -> Mat4 {
        let up = if (self.position - self.look_target)
            .normalize_or_zero()
            .cross(Vec3::Y)
            .length_squared()
            < 1e-8
        {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(self.position, self.look_target, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit controls around a target point.
///
/// User drags queue a rotation delta which is applied over several updates
/// when damping is on. Auto-rotation spins the camera about the Y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Whether user input is accepted.
    pub enabled: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    yaw_delta: f32,
    pitch_delta: f32,
    dolly_scale: f32,
}

impl OrbitControls {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            enabled: true,
            auto_rotate: true,
            auto_rotate_speed: config.auto_rotate_speed,
            enable_damping: config.damping > 0.0,
            damping_factor: config.damping,
            target: Vec3::ZERO,
            min_distance: 1.0,
            max_distance: 200.0,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            dolly_scale: 1.0,
        }
    }

    /// Queue a rotation from a pointer drag, in radians.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        if !self.enabled {
            return;
        }
        self.yaw_delta += yaw;
        self.pitch_delta += pitch;
    }

    /// Queue a zoom. Values above 1 move the camera away.
    pub fn dolly(&mut self, scale: f32) {
        if !self.enabled || !scale.is_finite() || scale <= 0.0 {
            return;
        }
        self.dolly_scale *= scale;
    }

    /// Auto-rotation per update: `speed` revolutions per minute at 60 updates/s.
    fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }

    /// Apply queued input and auto-rotation, then aim the camera.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            camera.look_at(self.target);
            return;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.auto_rotate {
            theta -= self.auto_rotation_angle();
        }

        let (yaw, pitch) = if self.enable_damping {
            (
                self.yaw_delta * self.damping_factor,
                self.pitch_delta * self.damping_factor,
            )
        } else {
            (self.yaw_delta, self.pitch_delta)
        };
        theta += yaw;
        phi = (phi + pitch).clamp(POLE_EPS, PI - POLE_EPS);

        let radius = (radius * self.dolly_scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        camera.position = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
        camera.look_at(self.target);

        if self.enable_damping {
            self.yaw_delta *= 1.0 - self.damping_factor;
            self.pitch_delta *= 1.0 - self.damping_factor;
        } else {
            self.yaw_delta = 0.0;
            self.pitch_delta = 0.0;
        }
        self.dolly_scale = 1.0;
    }
}
