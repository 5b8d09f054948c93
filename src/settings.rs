//! Game tuning and presets
//!
//! Every number the simulation uses lives in [`GameConfig`]. The three
//! presets reproduce the feel of the different builds of the game as data,
//! so the simulation itself has a single code path.
//!
//! Values are trusted: non-finite gravity or speeds are the caller's
//! problem and are not checked at runtime.

use serde::{Deserialize, Serialize};

use crate::sim::ObstacleKind;

/// Built-in tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Staggered obstacles, out-of-band contact ends the run
    #[default]
    Classic,
    /// Bigger sprites, low ceiling, vertical pair scrolls in lockstep
    Sandbox,
    /// Classic geometry plus vertical spacing re-rolls on recycle
    Spaced,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Sandbox => "Sandbox",
            Variant::Spaced => "Spaced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "sandbox" => Some(Variant::Sandbox),
            "spaced" => Some(Variant::Spaced),
            _ => None,
        }
    }
}

/// Closed vertical interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f32,
    pub max: f32,
}

impl Band {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Static description of one obstacle slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
    /// x at run start (and after reset)
    pub initial_x: f32,
    /// y at run start (and after reset)
    pub initial_y: f32,
    /// x assigned on recycle
    pub spawn_x: f32,
    /// Recycle once x drops to or below this
    pub recycle_x: f32,
    /// Range y is drawn from on recycle
    pub spawn_band: Band,
}

impl ObstacleSpec {
    pub const fn horizontal(initial_x: f32, spawn_x: f32, recycle_x: f32, band: Band) -> Self {
        Self {
            kind: ObstacleKind::Horizontal,
            width: 0.25,
            height: 0.06,
            initial_x,
            initial_y: 0.0,
            spawn_x,
            recycle_x,
            spawn_band: band,
        }
    }

    pub const fn vertical(initial_x: f32, spawn_x: f32, recycle_x: f32, band: Band) -> Self {
        Self {
            kind: ObstacleKind::Vertical,
            width: 0.06,
            height: 0.25,
            initial_x,
            initial_y: 0.0,
            spawn_x,
            recycle_x,
            spawn_band: band,
        }
    }

    fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Re-roll constraint applied when a vertical obstacle respawns.
///
/// Best effort only: after `max_attempts` draws the last one is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingRule {
    /// Minimum |y| distance between the two vertical obstacles
    pub min_vertical_gap: f32,
    /// Minimum |y| distance between a vertical and the horizontal obstacle
    pub min_horizontal_gap: f32,
    pub max_attempts: u32,
}

/// Complete simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    // === Player ===
    /// Added to velocity every frame (negative = down)
    pub gravity: f32,
    /// Jump velocity from low altitude
    pub jump_impulse: f32,
    /// Jump velocity once above `reduced_jump_above`
    pub reduced_jump_impulse: f32,
    pub reduced_jump_above: f32,
    pub floor_y: f32,
    pub ceiling_y: f32,
    pub player_x: f32,
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Leaving this band counts as a collision (`None` disables the check)
    pub safe_band: Option<Band>,

    // === Obstacles ===
    pub base_speed: f32,
    /// Speed added on every score tick
    pub speed_increment: f32,
    /// Horizontal first, then the two verticals
    pub obstacles: [ObstacleSpec; 3],
    pub spacing: Option<SpacingRule>,

    // === Scoring ===
    pub score_period_ms: f32,

    // === Backdrop ===
    /// Backdrop offset wraps back to zero at this x
    pub backdrop_wrap_x: f32,
    /// Distance between the two backdrop copies
    pub backdrop_span: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_variant(Variant::Classic)
    }
}

impl GameConfig {
    pub fn from_variant(variant: Variant) -> Self {
        let classic = Self {
            gravity: -0.001,
            jump_impulse: 0.03,
            reduced_jump_impulse: 0.023,
            reduced_jump_above: -0.7,
            floor_y: -0.8,
            ceiling_y: 0.93,
            player_x: -0.7,
            player_start_y: -0.8,
            player_width: 0.08,
            player_height: 0.08,
            safe_band: Some(Band::new(-0.85, 1.0)),

            base_speed: 0.015,
            speed_increment: 0.000_03,
            obstacles: [
                ObstacleSpec::horizontal(1.2, 1.5, -1.5, Band::new(-0.8, 0.8)),
                ObstacleSpec::vertical(1.8, 1.8, -1.5, Band::new(-0.8, 0.8)),
                ObstacleSpec::vertical(2.4, 2.1, -1.5, Band::new(-0.8, 0.8)),
            ],
            spacing: None,

            score_period_ms: 100.0,

            backdrop_wrap_x: -2.0,
            backdrop_span: 2.0,
        };

        match variant {
            Variant::Classic => classic,
            Variant::Sandbox => Self {
                jump_impulse: 0.03,
                reduced_jump_impulse: 0.03,
                ceiling_y: 0.5,
                player_x: 0.0,
                player_width: 0.15,
                player_height: 0.15,
                safe_band: None,
                base_speed: 0.01,
                // The second vertical starts 0.5 behind the first and travels the
                // same distance per cycle. The slots recycle independently, so
                // rounding can shift the gap by one frame of travel per recycle.
                obstacles: [
                    ObstacleSpec::horizontal(1.0, 1.4, -1.4, Band::new(-0.8, 0.4)).sized(0.4, 0.1),
                    ObstacleSpec::vertical(1.0, 1.5, -1.5, Band::new(-0.8, 0.3)).sized(0.1, 0.4),
                    ObstacleSpec::vertical(1.5, 2.0, -1.0, Band::new(-0.8, 0.3)).sized(0.1, 0.4),
                ],
                ..classic
            },
            Variant::Spaced => Self {
                base_speed: 0.01,
                obstacles: [
                    ObstacleSpec::horizontal(1.2, 1.5, -1.5, Band::new(-0.8, 0.4)),
                    ObstacleSpec::vertical(1.8, 1.8, -1.5, Band::new(-0.7, 0.3)),
                    ObstacleSpec::vertical(2.4, 2.3, -1.5, Band::new(-0.7, 0.3)),
                ],
                spacing: Some(SpacingRule {
                    min_vertical_gap: 0.8,
                    min_horizontal_gap: 0.25,
                    max_attempts: 50,
                }),
                ..classic
            },
        }
    }

    /// Parse a config document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Jump velocity for a player currently at `y`
    pub fn jump_impulse_at(&self, y: f32) -> f32 {
        if y > self.reduced_jump_above {
            self.reduced_jump_impulse
        } else {
            self.jump_impulse
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "jetpack_dash_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names_round_trip() {
        for v in [Variant::Classic, Variant::Sandbox, Variant::Spaced] {
            assert_eq!(Variant::from_str(v.as_str()), Some(v));
        }
        assert_eq!(Variant::from_str("SPACED"), Some(Variant::Spaced));
        assert_eq!(Variant::from_str("turbo"), None);
    }

    #[test]
    fn test_vertical_spawns_are_staggered() {
        for v in [Variant::Classic, Variant::Sandbox, Variant::Spaced] {
            let config = GameConfig::from_variant(v);
            let [_, a, b] = config.obstacles;
            assert_eq!(a.kind, ObstacleKind::Vertical);
            assert_eq!(b.kind, ObstacleKind::Vertical);
            assert!((a.spawn_x - b.spawn_x).abs() > 0.1, "{:?}", v);
        }
    }

    #[test]
    fn test_sandbox_verticals_share_cycle_length() {
        let config = GameConfig::from_variant(Variant::Sandbox);
        let [_, a, b] = config.obstacles;
        assert!((b.initial_x - a.initial_x - 0.5).abs() < 1e-6);
        assert!((b.spawn_x - a.spawn_x - 0.5).abs() < 1e-6);
        let cycle = |o: &ObstacleSpec| o.spawn_x - o.recycle_x;
        assert!((cycle(&a) - cycle(&b)).abs() < 1e-6);
    }

    #[test]
    fn test_jump_impulse_depends_on_height() {
        let config = GameConfig::default();
        assert_eq!(config.jump_impulse_at(-0.8), 0.03);
        assert_eq!(config.jump_impulse_at(-0.7), 0.03);
        assert_eq!(config.jump_impulse_at(0.2), 0.023);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = GameConfig::from_variant(Variant::Spaced);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(GameConfig::from_json("{\"gravity\": \"down\"}").is_err());
    }
}
