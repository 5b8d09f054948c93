//! Scrolling obstacles and their recycle policy

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::settings::{Band, ObstacleSpec, SpacingRule};
use glam::Vec2;

/// Obstacle orientation (also picks the sprite)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Horizontal,
    Vertical,
}

/// A single obstacle, positioned by its center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn from_spec(spec: &ObstacleSpec) -> Self {
        Self {
            x: spec.initial_x,
            y: spec.initial_y,
            width: spec.width,
            height: spec.height,
            kind: spec.kind,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos(), Vec2::new(self.width, self.height))
    }
}

/// The three obstacle slots: one horizontal, two vertical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSet {
    specs: [ObstacleSpec; 3],
    spacing: Option<SpacingRule>,
    obstacles: [Obstacle; 3],
}

impl ObstacleSet {
    pub fn new(specs: [ObstacleSpec; 3], spacing: Option<SpacingRule>) -> Self {
        Self {
            obstacles: specs.each_ref().map(Obstacle::from_spec),
            specs,
            spacing,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn specs(&self) -> &[ObstacleSpec; 3] {
        &self.specs
    }

    /// Put every obstacle back at its initial position
    pub fn reset(&mut self) {
        self.obstacles = self.specs.each_ref().map(Obstacle::from_spec);
    }

    /// Scroll every obstacle left by `speed`, recycling any that leave the field.
    ///
    /// Returns the number of obstacles recycled this call.
    pub fn advance<R: Rng>(&mut self, speed: f32, rng: &mut R) -> usize {
        let mut recycled = 0;
        for i in 0..self.obstacles.len() {
            self.obstacles[i].x -= speed;
            if self.obstacles[i].x <= self.specs[i].recycle_x {
                self.respawn(i, rng);
                recycled += 1;
            }
        }
        recycled
    }

    /// Move slot `i` to its spawn x with a fresh y
    fn respawn<R: Rng>(&mut self, i: usize, rng: &mut R) {
        let spec = self.specs[i];
        let y = match (spec.kind, self.spacing) {
            (ObstacleKind::Vertical, Some(rule)) => self.spaced_y(i, &rule, rng),
            _ => draw_in(&spec.spawn_band, rng),
        };

        let obstacle = &mut self.obstacles[i];
        obstacle.x = spec.spawn_x;
        obstacle.y = y;
        log::debug!("Obstacle {} respawned at ({:.2}, {:.2})", i, obstacle.x, obstacle.y);
    }

    /// Rejection-sample a y for vertical slot `i` that keeps its distance from
    /// the other obstacles. Gives up after `max_attempts` and keeps the last draw.
    fn spaced_y<R: Rng>(&self, i: usize, rule: &SpacingRule, rng: &mut R) -> f32 {
        let band = self.specs[i].spawn_band;
        let attempts = rule.max_attempts.max(1);

        let mut y = draw_in(&band, rng);
        for attempt in 1..=attempts {
            if self.spacing_ok(i, y, rule) {
                return y;
            }
            if attempt == attempts {
                log::warn!(
                    "Obstacle {} spacing unsatisfied after {} draws, keeping y={:.2}",
                    i,
                    attempts,
                    y
                );
                break;
            }
            y = draw_in(&band, rng);
        }
        y
    }

    fn spacing_ok(&self, i: usize, y: f32, rule: &SpacingRule) -> bool {
        self.obstacles
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .all(|(_, other)| {
                let min_gap = match other.kind {
                    ObstacleKind::Vertical => rule.min_vertical_gap,
                    ObstacleKind::Horizontal => rule.min_horizontal_gap,
                };
                (other.y - y).abs() >= min_gap
            })
    }
}

fn draw_in<R: Rng>(band: &Band, rng: &mut R) -> f32 {
    rng.random_range(band.min..=band.max)
}
