//! Error types.
//!
//! This module provides error types for capture startup, GPU initialization,
//! frame submission and the application shell.

use thiserror::Error;

/// Errors raised by a gesture capture source.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user refused camera access.
    #[error("Camera permission denied")]
    PermissionDenied,
    /// The capture device or landmark model failed to initialize.
    #[error("Capture unavailable: {0}")]
    Unavailable(String),
    /// The frame producer went away.
    #[error("Capture source disconnected")]
    Disconnected,
}

/// Errors raised while presenting a frame.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface lost")]
    Lost,
    #[error("Surface outdated")]
    Outdated,
    #[error("Timed out acquiring the next frame")]
    Timeout,
    #[error("Out of GPU memory")]
    OutOfMemory,
    #[error("Surface error: {0}")]
    Other(String),
}

impl SurfaceError {
    /// Whether the frame loop must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SurfaceError::OutOfMemory)
    }
}

impl From<wgpu::SurfaceError> for SurfaceError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost => SurfaceError::Lost,
            wgpu::SurfaceError::Outdated => SurfaceError::Outdated,
            wgpu::SurfaceError::Timeout => SurfaceError::Timeout,
            wgpu::SurfaceError::OutOfMemory => SurfaceError::OutOfMemory,
            other => SurfaceError::Other(other.to_string()),
        }
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    #[error("Surface has no supported texture format")]
    NoSurfaceFormat,
}

/// Errors surfaced by a [`Session`](crate::session::Session).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Gesture capture failed to start: {0}")]
    Capture(#[from] CaptureError),
    #[error("Frame submission failed: {0}")]
    Surface(#[from] SurfaceError),
    #[error("Session was cleaned up")]
    Closed,
}

/// Errors that can occur when running the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
