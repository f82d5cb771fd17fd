//! Hand landmarks to shape signals.
//!
//! Landmarks follow the common 21-point hand model in normalized image
//! coordinates, with Y growing downward. A finger counts as raised when its
//! tip is above its middle (PIP) joint.

use crate::shape::Shape;
use glam::Vec3;

/// One hand keypoint.
pub type Landmark = Vec3;

/// Landmarks per hand.
pub const HAND_LANDMARKS: usize = 21;

/// `(tip, pip)` landmark indices for index, middle, ring and pinky.
const FINGERS: [(usize, usize); 4] = [(8, 6), (12, 10), (16, 14), (20, 18)];

/// Everything the landmark detector reported for one video frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandFrame {
    pub hands: Vec<Vec<Landmark>>,
}

impl HandFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(hand: Vec<Landmark>) -> Self {
        Self { hands: vec![hand] }
    }

    /// A synthetic open palm: every fingertip above its joint.
    pub fn open_palm() -> Self {
        Self::single(synthetic_hand(true))
    }

    /// A synthetic fist: every fingertip below its joint.
    pub fn fist() -> Self {
        Self::single(synthetic_hand(false))
    }
}

fn synthetic_hand(open: bool) -> Vec<Landmark> {
    let mut hand = vec![Vec3::new(0.5, 0.8, 0.0); HAND_LANDMARKS];
    for (n, (tip, pip)) in FINGERS.iter().enumerate() {
        let x = 0.35 + n as f32 * 0.1;
        hand[*pip] = Vec3::new(x, 0.5, 0.0);
        hand[*tip] = Vec3::new(x, if open { 0.3 } else { 0.6 }, 0.0);
    }
    hand
}

/// Classifies hand frames into shape signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureBridge;

impl GestureBridge {
    pub fn new() -> Self {
        Self
    }

    /// Shape signaled by the first hand in `frame`, if any.
    ///
    /// Open palm means [`Shape::Explode`], fist means [`Shape::Tree`].
    /// Partial poses, missing hands and malformed landmark sets yield `None`.
    pub fn classify(&self, frame: &HandFrame) -> Option<Shape> {
        let Some(hand) = frame.hands.first() else {
            log::trace!("no hand in frame");
            return None;
        };
        if hand.len() < HAND_LANDMARKS || hand.iter().any(|p| !p.is_finite()) {
            log::trace!("skipping malformed hand ({} landmarks)", hand.len());
            return None;
        }

        let raised = FINGERS
            .iter()
            .filter(|(tip, pip)| hand[*tip].y < hand[*pip].y)
            .count();

        match raised {
            4 => Some(Shape::Explode),
            0 => Some(Shape::Tree),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_palm_explodes() {
        assert_eq!(
            GestureBridge::new().classify(&HandFrame::open_palm()),
            Some(Shape::Explode)
        );
    }

    #[test]
    fn test_fist_is_tree() {
        assert_eq!(
            GestureBridge::new().classify(&HandFrame::fist()),
            Some(Shape::Tree)
        );
    }

    #[test]
    fn test_partial_pose_is_ignored() {
        let mut hand = synthetic_hand(true);
        // curl the ring finger
        hand[16].y = 0.7;
        assert_eq!(GestureBridge::new().classify(&HandFrame::single(hand)), None);
    }

    #[test]
    fn test_malformed_frames_are_ignored() {
        let bridge = GestureBridge::new();
        assert_eq!(bridge.classify(&HandFrame::empty()), None);
        assert_eq!(
            bridge.classify(&HandFrame::single(vec![Vec3::ZERO; 10])),
            None
        );
        let mut hand = synthetic_hand(true);
        hand[8].y = f32::NAN;
        assert_eq!(bridge.classify(&HandFrame::single(hand)), None);
    }

    #[test]
    fn test_only_first_hand_counts() {
        let frame = HandFrame {
            hands: vec![synthetic_hand(false), synthetic_hand(true)],
        };
        assert_eq!(GestureBridge::new().classify(&frame), Some(Shape::Tree));
    }
}
