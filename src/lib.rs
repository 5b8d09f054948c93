//! Jetpack Dash - a side-scrolling obstacle dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, run state)
//! - `renderer`: Point-sprite drawing contract and the WebGPU backend
//! - `platform`: Frame clock and keyboard mapping
//! - `sprite`: Sprite data, loading contract and placeholder generation
//! - `settings`: Data-driven game tuning
//! - `hud`: Score/overlay snapshot for the page

pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use hud::{HudSnapshot, HudTracker};
pub use settings::{GameConfig, Variant};

/// Frame-level timing constants
pub mod consts {
    /// Nominal display refresh period (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Longest frame the clock will report (tab switches, debugger stops)
    pub const MAX_FRAME_MS: f32 = 100.0;
    /// Screen-space size of one sprite point, in pixels
    pub const POINT_SIZE_PX: f32 = 4.0;
}
