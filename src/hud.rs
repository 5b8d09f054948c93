//! HUD data for the page
//!
//! The simulation never touches the DOM; the page polls a snapshot and
//! redraws its overlay when something changed.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Overlay};

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u32,
    pub game_over: bool,
    pub paused: bool,
}

impl HudSnapshot {
    pub fn of(state: &GameState) -> Self {
        let overlay = state.overlay();
        Self {
            score: state.score.score(),
            game_over: overlay == Overlay::GameOver,
            paused: overlay == Overlay::Paused,
        }
    }

    /// Score as a distance, e.g. `0042 m`
    pub fn distance_label(&self) -> String {
        format!("{:04} m", self.score)
    }
}

/// Remembers the last snapshot handed out
#[derive(Debug, Clone, Default)]
pub struct HudTracker {
    last: Option<HudSnapshot>,
}

impl HudTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot if it differs from the previous poll
    pub fn poll(&mut self, state: &GameState) -> Option<HudSnapshot> {
        let snapshot = HudSnapshot::of(state);
        if self.last == Some(snapshot) {
            return None;
        }
        self.last = Some(snapshot);
        Some(snapshot)
    }
}
