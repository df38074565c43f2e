//! Frame timing
//!
//! [`FrameClock`] tracks the frame number, elapsed time and per-frame delta
//! the animation reads. It can be stepped with a fixed delta (headless
//! playback, tests) or from the wall clock.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Timing information for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameTime {
    /// Frame number (1-indexed once the clock has ticked)
    pub frame: u64,
    /// Seconds since the clock started
    pub elapsed: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

/// Clock producing [`FrameTime`] values
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Wall-clock reference for realtime ticking
    last_instant: Option<Instant>,
    elapsed: f64,
    delta: f64,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self {
            last_instant: None,
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by a fixed delta in seconds
    pub fn tick(&mut self, delta: f64) -> FrameTime {
        self.delta = delta.max(0.0);
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.now()
    }

    /// Advance by the wall-clock time since the previous realtime tick
    ///
    /// The first realtime tick has a zero delta.
    pub fn tick_realtime(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = self
            .last_instant
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_instant = Some(now);
        self.tick(delta)
    }

    /// Timing of the most recent frame
    pub fn now(&self) -> FrameTime {
        FrameTime {
            frame: self.frame_count,
            elapsed: self.elapsed as f32,
            delta: self.delta as f32,
        }
    }

    /// Number of frames ticked so far
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Reset to time zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ticks_accumulate() {
        let mut clock = FrameClock::new();
        for _ in 0..60 {
            clock.tick(1.0 / 60.0);
        }
        let time = clock.now();
        assert_eq!(time.frame, 60);
        assert!((time.elapsed - 1.0).abs() < 1e-4);
        assert!((time.delta - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut clock = FrameClock::new();
        let time = clock.tick(-1.0);
        assert_eq!(time.delta, 0.0);
        assert_eq!(time.elapsed, 0.0);
    }

    #[test]
    fn test_first_realtime_tick_is_zero() {
        let mut clock = FrameClock::new();
        let time = clock.tick_realtime();
        assert_eq!(time.frame, 1);
        assert_eq!(time.delta, 0.0);
        assert!(clock.tick_realtime().delta >= 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.tick(0.5);
        clock.reset();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.now().elapsed, 0.0);
    }
}
