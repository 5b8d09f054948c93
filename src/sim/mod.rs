//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One physics step per frame, no variable timestep
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact, check_all, first_contact};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleSet};
pub use player::PlayerBody;
pub use score::{RepeatingTask, ScoreKeeper};
pub use state::{GamePhase, GameState, Overlay, RunState};
pub use tick::{TickInput, tick};
