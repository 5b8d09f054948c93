//! Point sprites: data, loading contract and placeholders
//!
//! A sprite is a cloud of colored points in normalized coordinates, drawn
//! relative to an entity's position. Real artwork comes from a
//! [`SpriteSource`]; whenever that fails a generated placeholder is used
//! instead, so a missing asset never stops the game from running.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Positions in [-1, 1] and RGB colors in [0, 1], aligned 1:1
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    pub positions: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 3]>,
}

impl SpriteData {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn validate(self, name: &str) -> Result<Self, SpriteError> {
        if self.positions.len() != self.colors.len() {
            return Err(SpriteError::Malformed {
                name: name.to_string(),
                reason: format!(
                    "{} positions but {} colors",
                    self.positions.len(),
                    self.colors.len()
                ),
            });
        }
        if self.is_empty() {
            return Err(SpriteError::Empty(name.to_string()));
        }
        Ok(self)
    }
}

/// Why a sprite could not be loaded
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpriteError {
    /// No such sprite (or it could not be fetched)
    #[error("sprite '{0}' not found")]
    Missing(String),
    /// Document did not parse or was inconsistent
    #[error("sprite '{name}' is malformed: {reason}")]
    Malformed { name: String, reason: String },
    /// Parsed fine but has no points
    #[error("sprite '{0}' has no points")]
    Empty(String),
}

/// Anything that can hand out sprite point clouds by name
pub trait SpriteSource {
    fn load(&self, name: &str) -> Result<SpriteData, SpriteError>;
}

/// Sprite documents held in memory as JSON text.
///
/// The web build fetches every document up front and stores the bodies
/// here; tests insert them directly.
#[derive(Debug, Clone, Default)]
pub struct MemorySpriteSource {
    documents: HashMap<String, String>,
}

impl MemorySpriteSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_json(&mut self, name: impl Into<String>, json: impl Into<String>) {
        self.documents.insert(name.into(), json.into());
    }

    pub fn insert(&mut self, name: impl Into<String>, sprite: &SpriteData) {
        if let Ok(json) = serde_json::to_string(sprite) {
            self.documents.insert(name.into(), json);
        }
    }
}

impl SpriteSource for MemorySpriteSource {
    fn load(&self, name: &str) -> Result<SpriteData, SpriteError> {
        let json = self
            .documents
            .get(name)
            .ok_or_else(|| SpriteError::Missing(name.to_string()))?;
        let sprite: SpriteData =
            serde_json::from_str(json).map_err(|e| SpriteError::Malformed {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        sprite.validate(name)
    }
}

/// Placeholder grid description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackSpec {
    pub width: u32,
    pub height: u32,
    pub color: [f32; 3],
}

/// Span of a placeholder sprite in normalized units
const FALLBACK_SCALE: f32 = 0.1;

/// Deterministic grid of points, one every 2 units, centered on the origin
pub fn fallback_sprite(spec: &FallbackSpec) -> SpriteData {
    let mut sprite = SpriteData::default();
    let w = spec.width.max(1) as f32;
    let h = spec.height.max(1) as f32;

    for x in (0..spec.width).step_by(2) {
        for y in (0..spec.height).step_by(2) {
            let nx = (x as f32 / w) * FALLBACK_SCALE - FALLBACK_SCALE / 2.0;
            let ny = (y as f32 / h) * FALLBACK_SCALE - FALLBACK_SCALE / 2.0;
            sprite.positions.push([nx, ny]);
            sprite.colors.push(spec.color);
        }
    }
    sprite
}

/// Full-screen dark blue point field with a little per-point noise
pub fn procedural_backdrop<R: Rng>(rng: &mut R) -> SpriteData {
    let mut sprite = SpriteData::default();
    for x in (0..=550u32).step_by(6) {
        for y in (0..=540u32).step_by(6) {
            let nx = (x as f32 / 540.0) * 2.0 - 1.0;
            let ny = -((y as f32 / 540.0) * 2.0 - 1.0);
            let intensity = 0.1 + rng.random::<f32>() * 0.1;
            sprite.positions.push([nx, ny]);
            sprite.colors.push([0.0, intensity, intensity * 2.0]);
        }
    }
    sprite
}

/// Load `name`, or build the placeholder if that fails for any reason
pub fn load_or_fallback<S: SpriteSource + ?Sized>(
    source: &S,
    name: &str,
    fallback: impl FnOnce() -> SpriteData,
) -> SpriteData {
    match source.load(name) {
        Ok(sprite) => {
            log::info!("Loaded sprite '{}' ({} points)", name, sprite.len());
            sprite
        }
        Err(e) => {
            log::warn!("{}; using placeholder", e);
            fallback()
        }
    }
}

/// The sprites the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteName {
    Player,
    HorizontalObstacle,
    VerticalObstacle,
    Backdrop,
}

impl SpriteName {
    pub const ALL: [SpriteName; 4] = [
        SpriteName::Player,
        SpriteName::HorizontalObstacle,
        SpriteName::VerticalObstacle,
        SpriteName::Backdrop,
    ];

    /// Asset path, relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SpriteName::Player => "sprites/player.json",
            SpriteName::HorizontalObstacle => "sprites/horizontal_obstacle.json",
            SpriteName::VerticalObstacle => "sprites/vertical_obstacle.json",
            SpriteName::Backdrop => "sprites/backdrop.json",
        }
    }

    /// Placeholder grid for entity sprites (the backdrop is procedural)
    pub fn fallback(&self) -> Option<FallbackSpec> {
        const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
        const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
        match self {
            SpriteName::Player => Some(FallbackSpec {
                width: 20,
                height: 20,
                color: GREEN,
            }),
            SpriteName::HorizontalObstacle => Some(FallbackSpec {
                width: 40,
                height: 10,
                color: YELLOW,
            }),
            SpriteName::VerticalObstacle => Some(FallbackSpec {
                width: 10,
                height: 40,
                color: YELLOW,
            }),
            SpriteName::Backdrop => None,
        }
    }
}

/// Every sprite needed to draw a frame
#[derive(Debug, Clone, Default)]
pub struct SpriteSet {
    pub player: SpriteData,
    pub horizontal: SpriteData,
    pub vertical: SpriteData,
    pub backdrop: SpriteData,
}

impl SpriteSet {
    /// Load all sprites, substituting placeholders where needed
    pub fn load<S: SpriteSource + ?Sized, R: Rng>(source: &S, rng: &mut R) -> Self {
        let entity = |name: SpriteName| {
            load_or_fallback(source, name.path(), || {
                name.fallback()
                    .map(|spec| fallback_sprite(&spec))
                    .unwrap_or_default()
            })
        };
        let player = entity(SpriteName::Player);
        let horizontal = entity(SpriteName::HorizontalObstacle);
        let vertical = entity(SpriteName::VerticalObstacle);
        let backdrop = load_or_fallback(source, SpriteName::Backdrop.path(), || {
            procedural_backdrop(rng)
        });

        Self {
            player,
            horizontal,
            vertical,
            backdrop,
        }
    }
}
