//! The jetpack player: vertical motion only

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::settings::GameConfig;

/// Player body. x is fixed, y moves under gravity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    /// Set by a jump, cleared on floor contact
    pub jumping: bool,
}

impl PlayerBody {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.player_x,
            y: config.player_start_y,
            velocity: 0.0,
            width: config.player_width,
            height: config.player_height,
            jumping: false,
        }
    }

    /// Advance one frame: accelerate, move, then clamp to the floor/ceiling.
    pub fn integrate(&mut self, gravity: f32, floor_y: f32, ceiling_y: f32) {
        self.velocity += gravity;
        self.y += self.velocity;

        if self.y <= floor_y {
            self.y = floor_y;
            self.velocity = 0.0;
            self.jumping = false;
        }
        if self.y >= ceiling_y {
            self.y = ceiling_y;
            self.velocity = self.velocity.min(0.0);
        }
    }

    /// Replace the current velocity with an upward impulse
    pub fn jump(&mut self, impulse: f32) {
        self.velocity = impulse;
        self.jumping = true;
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos(), Vec2::new(self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FLOOR: f32 = -0.8;
    const CEILING: f32 = 0.93;
    const GRAVITY: f32 = -0.001;

    fn player() -> PlayerBody {
        PlayerBody::new(&GameConfig::default())
    }

    #[test]
    fn test_first_step_after_jump() {
        let mut p = player();
        p.jump(0.03);
        p.integrate(GRAVITY, FLOOR, CEILING);
        assert!((p.velocity - 0.029).abs() < 1e-6);
        assert!((p.y - -0.771).abs() < 1e-6);
        assert!(p.jumping);
    }

    #[test]
    fn test_lands_back_on_floor() {
        let mut p = player();
        p.jump(0.03);
        let mut frames = 0;
        loop {
            p.integrate(GRAVITY, FLOOR, CEILING);
            frames += 1;
            if !p.jumping {
                break;
            }
            assert!(frames < 200, "never landed");
        }
        assert_eq!(p.y, FLOOR);
        assert_eq!(p.velocity, 0.0);
    }

    #[test]
    fn test_ceiling_clamps_upward_velocity() {
        let mut p = player();
        p.y = CEILING - 0.001;
        p.jump(0.05);
        p.integrate(GRAVITY, FLOOR, CEILING);
        assert_eq!(p.y, CEILING);
        assert_eq!(p.velocity, 0.0);
        // Falling velocity survives the clamp
        p.velocity = 0.0;
        p.integrate(GRAVITY, FLOOR, CEILING);
        assert!(p.y < CEILING);
        assert!(p.velocity < 0.0);
    }

    #[test]
    fn test_bounds_are_centered() {
        let p = player();
        let b = p.bounds();
        assert!((b.min.x - (p.x - p.width / 2.0)).abs() < 1e-6);
        assert!((b.min.y - (p.y - p.height / 2.0)).abs() < 1e-6);
        assert_eq!(b.size, Vec2::new(p.width, p.height));
    }

    proptest! {
        #[test]
        fn prop_integrate_stays_in_band(
            y in FLOOR..CEILING,
            velocity in -0.2f32..0.2,
            frames in 1usize..300,
        ) {
            let mut p = player();
            p.y = y;
            p.velocity = velocity;
            for _ in 0..frames {
                p.integrate(GRAVITY, FLOOR, CEILING);
                prop_assert!(p.y >= FLOOR && p.y <= CEILING);
            }
        }
    }
}
