//! Frame clock
//!
//! Turns the absolute timestamps handed to a requestAnimationFrame callback
//! into per-frame elapsed times.

use crate::consts::{FRAME_MS, MAX_FRAME_MS};

#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    last_ms: Option<f64>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous frame, clamped to `[0, MAX_FRAME_MS]`.
    ///
    /// The first frame reports one nominal frame.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let elapsed = match self.last_ms {
            Some(last) => ((now_ms - last) as f32).clamp(0.0, MAX_FRAME_MS),
            None => FRAME_MS,
        };
        self.last_ms = Some(now_ms);
        elapsed
    }

    /// Forget the previous timestamp (after the page was hidden, say)
    pub fn resync(&mut self) {
        self.last_ms = None;
    }
}
