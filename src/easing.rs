//! Easing curves.
//!
//! Naming follows the usual `powerN` convention where `power1` is
//! quadratic, `power2` cubic and `power3` quartic.

use std::f32::consts::PI;

/// An easing curve mapping progress `0..=1` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    Power1Out,
    Power2In,
    Power2InOut,
    Power3Out,
    /// Overshoots past 1 before settling; the value is the overshoot amount.
    BackOut(f32),
    SineInOut,
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Power1Out
    }
}

impl Easing {
    /// Eased value for `t`. Input is clamped to `0..=1`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power2In => t * t * t,
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}
