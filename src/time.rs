//! Frame timing.
//!
//! Tween timelines run on wall time, so the frame delta handed to the
//! engine is clamped: a window that stalls (dragged, minimized, debugger)
//! resumes its cinematic where it left off instead of jumping to the end.

use std::time::Instant;

/// Longest step the engine is ever asked to take, in seconds.
pub const MAX_STEP: f32 = 0.1;

/// Measures the wall time between redraws.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Seconds since the previous call, at most [`MAX_STEP`].
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if raw > MAX_STEP {
            log::debug!("frame stalled for {raw:.3}s, stepping {MAX_STEP}s");
            MAX_STEP
        } else {
            raw
        }
    }

    /// Drop the time spent since the last frame, e.g. while the window was unfocused.
    pub fn skip(&mut self) {
        self.last_frame = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_short_frame_passes_through() {
        let mut clock = FrameClock::new();
        let next = clock.last_frame + Duration::from_millis(16);
        let dt = clock.tick_at(next);
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(clock.last_frame, next);
    }

    #[test]
    fn test_stall_steps_at_most_max() {
        let mut clock = FrameClock::new();
        let later = clock.last_frame + Duration::from_secs(3);
        assert_eq!(clock.tick_at(later), MAX_STEP);
        // the following frame measures from the stalled one, not from before it
        assert!((clock.tick_at(later + Duration::from_millis(20)) - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_clock_running_backwards_is_zero() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;
        clock.tick_at(start + Duration::from_millis(50));
        assert_eq!(clock.tick_at(start), 0.0);
    }

    #[test]
    fn test_skip_resets_reference() {
        let mut clock = FrameClock::new();
        let before = clock.last_frame;
        clock.skip();
        assert!(clock.last_frame >= before);
        assert!(clock.tick() < MAX_STEP);
    }
}
