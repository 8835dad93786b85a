//! Frame timing
//!
//! The host's frame callback reports a timestamp in milliseconds with no
//! guaranteed interval. [`FrameClock`] turns those into simulation deltas.

use crate::consts::MAX_FRAME_DELTA;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA)
    }
}

impl FrameClock {
    /// Clock whose deltas never exceed `max_delta` milliseconds
    ///
    /// A negative or NaN cap is treated as 0.
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_ms: None,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Delta since the previous frame. The first frame yields 0.
    ///
    /// Timestamps that go backwards yield 0 rather than a negative step.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last).max(0.0) as f32).min(self.max_delta),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (e.g. after the host was suspended)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
