//! The windowed viewer: a winit application driving a [`Session`].

use crate::config::MorphConfig;
use crate::engine::MorphEngine;
use crate::error::{AppError, SessionError};
use crate::gesture::HandFrame;
use crate::gpu::GpuSurface;
use crate::input::{Input, KeyCode, MouseButton};
use crate::session::{ChannelCapture, Session};
use crate::shape::Shape;
use crate::time::FrameClock;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Radians of orbit per dragged pixel.
const ROTATE_SPEED: f32 = 0.005;
/// Dolly factor per wheel notch.
const ZOOM_STEP: f32 = 0.95;
/// Frames are paced by the redraw requested at the end of each one, so the
/// loop sleeps between events instead of spinning.
const CONTROL_FLOW: ControlFlow = ControlFlow::Wait;

pub struct App {
    config: MorphConfig,
    window: Option<Arc<Window>>,
    session: Option<Session<ChannelCapture, GpuSurface>>,
    frames: Option<Sender<HandFrame>>,
    input: Input,
    clock: FrameClock,
    error: Option<AppError>,
}

impl App {
    pub fn new(config: MorphConfig) -> Self {
        Self {
            config,
            window: None,
            session: None,
            frames: None,
            input: Input::new(),
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title("yulemorph")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let surface = pollster::block_on(GpuSurface::new(
            window.clone(),
            self.config.cinematic.rest_emissive,
        ))?;

        let engine = MorphEngine::new(self.config.clone(), aspect);
        let (frames, capture) = ChannelCapture::new();
        let mut session = Session::new(engine, capture, surface);
        session.start()?;

        log::info!(
            "T: tree, E: explode, Space: toggle, O/F: open palm / fist, Esc: quit"
        );
        self.window = Some(window);
        self.session = Some(session);
        self.frames = Some(frames);
        self.clock = FrameClock::new();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error = Some(error);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(session) = self.session.as_mut() {
            session.cleanup();
        }
        self.frames = None;
        event_loop.exit();
    }

    fn send_frame(&self, frame: HandFrame) {
        if let Some(frames) = &self.frames {
            if frames.send(frame).is_err() {
                log::warn!("hand frame dropped: capture closed");
            }
        }
    }

    fn handle_keys(&mut self, event_loop: &ActiveEventLoop) {
        let pressed: Vec<KeyCode> = self.input.pressed_keys().collect();
        for key in pressed {
            match key {
                KeyCode::Escape => {
                    self.shutdown(event_loop);
                    return;
                }
                KeyCode::O => self.send_frame(HandFrame::open_palm()),
                KeyCode::F => self.send_frame(HandFrame::fist()),
                KeyCode::T | KeyCode::E | KeyCode::Space => {
                    let Some(session) = self.session.as_mut() else {
                        continue;
                    };
                    let shape = match key {
                        KeyCode::T => Shape::Tree,
                        KeyCode::E => Shape::Explode,
                        _ => session.engine().shape().toggled(),
                    };
                    session.set_shape(shape);
                }
                KeyCode::Other(_) => {}
            }
        }
    }

    fn handle_pointer(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let controls = &mut session.engine_mut().scene_mut().controls;

        if self.input.mouse_held(MouseButton::Left) {
            let drag = self.input.mouse_delta();
            if drag != glam::Vec2::ZERO {
                controls.rotate(-drag.x * ROTATE_SPEED, drag.y * ROTATE_SPEED);
            }
        }
        let scroll = self.input.scroll_delta();
        if scroll != 0.0 {
            controls.dolly(ZOOM_STEP.powf(scroll));
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.handle_keys(event_loop);
        self.handle_pointer();

        let dt = self.clock.tick();
        let result = match self.session.as_mut() {
            Some(session) => session.tick(dt),
            None => return,
        };
        self.input.begin_frame();

        match result {
            Ok(()) => {}
            // cleaned up by Escape during this frame
            Err(SessionError::Closed) => return,
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(session) = self.session.as_mut() {
                    session.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::Focused(true) => {
                self.clock.skip();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = self.session.as_mut() {
            session.cleanup();
        }
    }
}

/// Open a window and run the viewer until it is closed.
pub fn run(config: MorphConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(CONTROL_FLOW);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
