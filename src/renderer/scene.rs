//! Scene composition: which sprite goes where, back to front

use glam::Vec2;

use super::Renderer;
use crate::sim::{GameState, ObstacleKind};
use crate::sprite::{SpriteData, SpriteSet};

fn draw_sprite<R: Renderer + ?Sized>(renderer: &mut R, sprite: &SpriteData, offset: Vec2) {
    renderer.draw_points(&sprite.positions, &sprite.colors, offset);
}

/// Draw the current frame. The world is drawn in every phase so paused and
/// game-over screens still show where things were.
pub fn draw_scene<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState, sprites: &SpriteSet) {
    // Two backdrop copies side by side make the scroll seamless
    let backdrop = Vec2::new(state.backdrop_x, 0.0);
    draw_sprite(renderer, &sprites.backdrop, backdrop);
    draw_sprite(
        renderer,
        &sprites.backdrop,
        backdrop + Vec2::new(state.config.backdrop_span, 0.0),
    );

    for obstacle in state.obstacles.obstacles() {
        let sprite = match obstacle.kind {
            ObstacleKind::Horizontal => &sprites.horizontal,
            ObstacleKind::Vertical => &sprites.vertical,
        };
        draw_sprite(renderer, sprite, obstacle.pos());
    }

    draw_sprite(renderer, &sprites.player, state.player.pos());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    /// Records (point count, offset) per draw call
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(usize, Vec2)>,
    }

    impl Renderer for Recorder {
        fn draw_points(&mut self, positions: &[[f32; 2]], _colors: &[[f32; 3]], offset: Vec2) {
            self.calls.push((positions.len(), offset));
        }
    }

    fn sprite(points: usize) -> SpriteData {
        SpriteData {
            positions: vec![[0.0, 0.0]; points],
            colors: vec![[1.0, 1.0, 1.0]; points],
        }
    }

    fn sprites() -> SpriteSet {
        SpriteSet {
            player: sprite(1),
            horizontal: sprite(2),
            vertical: sprite(3),
            backdrop: sprite(4),
        }
    }

    #[test]
    fn test_draw_order_and_offsets() {
        let mut state = GameState::new(GameConfig::default(), 0);
        state.backdrop_x = -0.5;
        let mut recorder = Recorder::default();
        draw_scene(&mut recorder, &state, &sprites());

        let o = state.obstacles.obstacles();
        assert_eq!(
            recorder.calls,
            vec![
                (4, Vec2::new(-0.5, 0.0)),
                (4, Vec2::new(1.5, 0.0)),
                (2, o[0].pos()),
                (3, o[1].pos()),
                (3, o[2].pos()),
                (1, state.player.pos()),
            ]
        );
    }

    #[test]
    fn test_empty_sprites_still_issue_calls() {
        let state = GameState::new(GameConfig::default(), 0);
        let mut recorder = Recorder::default();
        draw_scene(&mut recorder, &state, &SpriteSet::default());
        assert_eq!(recorder.calls.len(), 6);
        assert!(recorder.calls.iter().all(|(n, _)| *n == 0));
    }
}
