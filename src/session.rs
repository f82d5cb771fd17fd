//! UI-facing session lifecycle.
//!
//! A [`Session`] wires a gesture [`CaptureSource`], the [`GestureBridge`],
//! the [`MorphEngine`] and a [`RenderSurface`] together and exposes the
//! three calls a UI needs: [`start`](Session::start),
//! [`set_shape`](Session::set_shape) and [`cleanup`](Session::cleanup).

use crate::engine::MorphEngine;
use crate::error::{CaptureError, SessionError};
use crate::gesture::{GestureBridge, HandFrame};
use crate::shape::Shape;
use crate::surface::RenderSurface;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Where hand frames come from.
pub trait CaptureSource {
    /// Open the device. Failures are terminal for the session.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Next pending frame, without blocking.
    fn poll(&mut self) -> Option<HandFrame>;

    /// Release the device. Must tolerate repeated calls.
    fn stop(&mut self);
}

/// Capture fed through a channel, so a detector can run on another thread.
#[derive(Debug)]
pub struct ChannelCapture {
    receiver: Receiver<HandFrame>,
    running: bool,
    disconnected: bool,
}

impl ChannelCapture {
    /// A capture source and the sender that feeds it.
    pub fn new() -> (Sender<HandFrame>, Self) {
        let (sender, receiver) = mpsc::channel();
        (
            sender,
            Self {
                receiver,
                running: false,
                disconnected: false,
            },
        )
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl CaptureSource for ChannelCapture {
    fn start(&mut self) -> Result<(), CaptureError> {
        if self.disconnected {
            return Err(CaptureError::Disconnected);
        }
        self.running = true;
        Ok(())
    }

    fn poll(&mut self) -> Option<HandFrame> {
        if !self.running {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(frame) => Some(frame),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.disconnected {
                    log::warn!("hand frame producer disconnected");
                }
                self.disconnected = true;
                None
            }
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

/// Coarse session state for the UI overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Idle,
    Loading,
    Running,
    Error(String),
}

pub struct Session<C: CaptureSource, S: RenderSurface> {
    engine: MorphEngine,
    capture: C,
    bridge: GestureBridge,
    surface: Option<S>,
    state: AppState,
}

impl<C: CaptureSource, S: RenderSurface> Session<C, S> {
    pub fn new(engine: MorphEngine, capture: C, mut surface: S) -> Self {
        engine.attach(&mut surface);
        Self {
            engine,
            capture,
            bridge: GestureBridge::new(),
            surface: Some(surface),
            state: AppState::Idle,
        }
    }

    pub fn engine(&self) -> &MorphEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut MorphEngine {
        &mut self.engine
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AppState::Running
    }

    /// Begin capture and classification.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.surface.is_none() {
            return Err(SessionError::Closed);
        }
        if self.is_running() {
            return Ok(());
        }
        self.state = AppState::Loading;
        match self.capture.start() {
            Ok(()) => {
                log::info!("gesture capture started");
                self.state = AppState::Running;
                Ok(())
            }
            Err(e) => {
                log::error!("gesture capture failed: {e}");
                self.state = AppState::Error(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Change shape directly. Returns whether anything changed.
    pub fn set_shape(&mut self, shape: Shape) -> bool {
        if self.surface.is_none() {
            return false;
        }
        self.engine.set_shape(shape)
    }

    /// Drain pending hand frames into shape changes.
    ///
    /// Returns the number of shape changes applied.
    pub fn pump_gestures(&mut self) -> usize {
        if !self.is_running() {
            return 0;
        }
        let mut changes = 0;
        while let Some(frame) = self.capture.poll() {
            if let Some(shape) = self.bridge.classify(&frame) {
                if self.engine.set_shape(shape) {
                    changes += 1;
                }
            }
        }
        changes
    }

    /// Pump gestures and run one frame.
    pub fn tick(&mut self, dt: f32) -> Result<(), SessionError> {
        self.pump_gestures();
        let Some(surface) = self.surface.as_mut() else {
            return Err(SessionError::Closed);
        };
        self.engine.tick(dt, surface)?;
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(surface) = self.surface.as_mut() {
            self.engine.resize(width, height, surface);
        }
    }

    /// Release capture and the surface and stop every animation.
    ///
    /// Safe to call repeatedly and in any cinematic phase.
    pub fn cleanup(&mut self) {
        self.capture.stop();
        self.engine.stop_animations();
        if self.surface.take().is_some() {
            log::info!("session cleaned up");
        }
        self.state = AppState::Idle;
    }
}

impl<C: CaptureSource, S: RenderSurface> Drop for Session<C, S> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MorphConfig;
    use crate::surface::HeadlessSurface;

    fn session() -> (Sender<HandFrame>, Session<ChannelCapture, HeadlessSurface>) {
        let engine = MorphEngine::with_seed(MorphConfig::default().with_particle_count(100), 1.0, 1);
        let (sender, capture) = ChannelCapture::new();
        (sender, Session::new(engine, capture, HeadlessSurface::new(640, 480)))
    }

    #[test]
    fn test_frames_ignored_before_start() {
        let (sender, mut session) = session();
        sender.send(HandFrame::open_palm()).unwrap();
        assert_eq!(session.pump_gestures(), 0);
        assert_eq!(session.engine().shape(), Shape::Tree);
    }

    #[test]
    fn test_gestures_debounced() {
        let (sender, mut session) = session();
        session.start().unwrap();
        for _ in 0..5 {
            sender.send(HandFrame::open_palm()).unwrap();
        }
        assert_eq!(session.pump_gestures(), 1);
        assert_eq!(session.engine().shape(), Shape::Explode);
        assert_eq!(session.engine().regenerations(), 2);
    }

    #[test]
    fn test_disconnected_capture_fails_start() {
        let (sender, mut session) = session();
        session.start().unwrap();
        drop(sender);
        session.pump_gestures();
        session.cleanup();

        let engine = MorphEngine::with_seed(MorphConfig::default().with_particle_count(10), 1.0, 1);
        let (sender, mut capture) = ChannelCapture::new();
        drop(sender);
        capture.start().unwrap();
        capture.poll();
        let mut session = Session::new(engine, capture, HeadlessSurface::new(10, 10));
        assert!(matches!(
            session.start(),
            Err(SessionError::Capture(CaptureError::Disconnected))
        ));
        assert!(matches!(session.state(), AppState::Error(_)));
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let (_sender, mut session) = session();
        session.start().unwrap();
        session.set_shape(Shape::Explode);
        session.tick(0.2).unwrap();
        session.cleanup();
        session.cleanup();
        assert!(session.surface().is_none());
        assert_eq!(session.state(), &AppState::Idle);
        assert!(matches!(session.tick(0.1), Err(SessionError::Closed)));
        assert!(!session.set_shape(Shape::Tree));
    }
}
