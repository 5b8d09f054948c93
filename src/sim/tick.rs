//! Per-frame simulation entry point
//!
//! Called once per display refresh. Inputs are applied first, then one
//! physics step runs, then the score timer catches up on elapsed time. All
//! three touch the same `GameState` inside one call, so they never interleave.

use super::collision::Contact;
use super::state::GameState;

/// One-shot commands collected since the previous frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump / start / dismiss game over
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Explicit restart (any phase)
    pub reset: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        !(self.jump || self.pause || self.reset)
    }
}

/// Advance the game by one frame that took `elapsed_ms` of wall time
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) -> Option<Contact> {
    if input.reset {
        state.reset();
    }
    if input.pause {
        state.on_pause_input();
    }
    if input.jump {
        state.on_jump_input();
    }

    let contact = state.step();
    state.advance_clock(elapsed_ms);
    contact
}
