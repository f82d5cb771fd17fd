//! Session lifecycle through the public API.

use std::sync::mpsc::Sender;
use yulemorph::prelude::*;
use yulemorph::CaptureError;

const DT: f32 = 1.0 / 60.0;

fn session(particles: usize) -> (Sender<HandFrame>, Session<ChannelCapture, HeadlessSurface>) {
    let config = MorphConfig::default().with_particle_count(particles);
    let engine = MorphEngine::with_seed(config, 4.0 / 3.0, 99);
    let (frames, capture) = ChannelCapture::new();
    (frames, Session::new(engine, capture, HeadlessSurface::new(800, 600)))
}

/// A capture source whose device never opens.
struct DeniedCapture;

impl CaptureSource for DeniedCapture {
    fn start(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::PermissionDenied)
    }

    fn poll(&mut self) -> Option<HandFrame> {
        None
    }

    fn stop(&mut self) {}
}

#[test]
fn test_start_moves_to_running() {
    let (_frames, mut session) = session(200);
    assert_eq!(session.state(), &AppState::Idle);
    session.start().unwrap();
    assert_eq!(session.state(), &AppState::Running);
    // starting twice is harmless
    session.start().unwrap();
    assert!(session.is_running());
}

#[test]
fn test_denied_capture_is_terminal_error() {
    let engine = MorphEngine::with_seed(MorphConfig::default().with_particle_count(50), 1.0, 3);
    let mut session = Session::new(engine, DeniedCapture, HeadlessSurface::new(100, 100));
    let err = session.start().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Capture(CaptureError::PermissionDenied)
    ));
    assert_eq!(
        session.state(),
        &AppState::Error("Camera permission denied".to_string())
    );

    // the scene still renders without gestures
    session.tick(DT).unwrap();
    assert_eq!(session.surface().map(|s| s.frames()), Some(1));
}

#[test]
fn test_gesture_frames_drive_the_cinematic() {
    let (frames, mut session) = session(300);
    session.start().unwrap();

    frames.send(HandFrame::open_palm()).unwrap();
    session.tick(DT).unwrap();
    assert_eq!(session.engine().shape(), Shape::Explode);
    assert_eq!(session.engine().phase(), CinematicPhase::Revealing);

    // a half-open hand is no signal
    let mut partial = HandFrame::open_palm();
    partial.hands[0][20].y = 0.9;
    frames.send(partial).unwrap();
    frames.send(HandFrame::empty()).unwrap();
    session.tick(DT).unwrap();
    assert_eq!(session.engine().shape(), Shape::Explode);

    frames.send(HandFrame::fist()).unwrap();
    session.tick(DT).unwrap();
    assert_eq!(session.engine().shape(), Shape::Tree);
    assert_eq!(session.engine().phase(), CinematicPhase::Hiding);
}

#[test]
fn test_cleanup_mid_reveal() {
    let (frames, mut session) = session(300);
    session.start().unwrap();
    frames.send(HandFrame::open_palm()).unwrap();
    for _ in 0..30 {
        session.tick(DT).unwrap();
    }
    assert!(session.engine().is_cinematic_active());

    session.cleanup();
    assert_eq!(session.engine().tweens().active_count(), 0);
    assert_eq!(session.engine().phase(), CinematicPhase::Idle);
    assert!(session.engine().scene().controls.enabled);
    assert!(session.surface().is_none());

    // frames sent after cleanup go nowhere
    frames.send(HandFrame::fist()).unwrap();
    assert_eq!(session.pump_gestures(), 0);
    session.cleanup();
    assert!(matches!(session.start(), Err(SessionError::Closed)));
}

#[test]
fn test_resize_reaches_surface() {
    let (_frames, mut session) = session(100);
    session.resize(1920, 1080);
    assert_eq!(session.surface().map(|s| s.size()), Some((1920, 1080)));
    assert!((session.engine().scene().camera.aspect - 1920.0 / 1080.0).abs() < 1e-5);

    session.resize(0, 0);
    assert_eq!(session.surface().map(|s| s.size()), Some((1920, 1080)));
}

#[test]
fn test_snow_hidden_while_exploded() {
    let (_frames, mut session) = session(100);
    session.tick(DT).unwrap();
    let visible = |s: &Session<ChannelCapture, HeadlessSurface>| {
        s.surface().map(|surface| surface.is_visible(InstanceLayer::Snow))
    };
    assert_eq!(visible(&session), Some(true));

    session.set_shape(Shape::Explode);
    session.tick(DT).unwrap();
    assert_eq!(visible(&session), Some(false));
}
