//! Game state and the run lifecycle
//!
//! `GameState` owns the player, the obstacles and the score for one
//! session and decides which of them may change in the current phase.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, first_contact};
use super::obstacle::ObstacleSet;
use super::player::PlayerBody;
use super::score::ScoreKeeper;
use crate::settings::GameConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first jump
    Idle,
    /// Physics and scoring active
    Running,
    /// Everything frozen, resumable
    Paused,
    /// Run ended; only a reset leaves this phase
    GameOver,
}

/// What the presentation layer should overlay on the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    None,
    Paused,
    GameOver,
}

/// Flag view of the run, for callers that think in booleans
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub started: bool,
    pub over: bool,
    pub paused: bool,
    pub score: u32,
    pub obstacle_speed: f32,
    pub overlay: Overlay,
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the obstacle RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub player: PlayerBody,
    pub obstacles: ObstacleSet,
    pub score: ScoreKeeper,
    /// Horizontal scroll of the backdrop
    pub backdrop_x: f32,
    /// Running frames simulated since the last reset
    pub frames: u64,
    rng: Pcg32,
}

impl GameState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            player: PlayerBody::new(&config),
            obstacles: ObstacleSet::new(config.obstacles, config.spacing),
            score: ScoreKeeper::new(
                config.base_speed,
                config.speed_increment,
                config.score_period_ms,
            ),
            backdrop_x: 0.0,
            frames: 0,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            config,
        }
    }

    /// Jump key / button.
    ///
    /// After game over this only resets; the next press starts a new run.
    pub fn on_jump_input(&mut self) {
        match self.phase {
            GamePhase::GameOver => self.reset(),
            GamePhase::Idle => {
                self.phase = GamePhase::Running;
                self.score.start();
                log::info!("Run started");
                self.jump();
            }
            GamePhase::Running => self.jump(),
            // The player is frozen until resumed
            GamePhase::Paused => {}
        }
    }

    /// Pause key / button: toggles Running and Paused, ignored otherwise
    pub fn on_pause_input(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.score.stop();
                log::info!("Paused at {}", self.score.score());
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.score.start();
                log::info!("Resumed");
            }
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }

    /// Advance one frame of physics.
    ///
    /// Nothing moves outside Running, the backdrop included, so the idle
    /// screen is a still frame.
    ///
    /// Returns the contact that ended the run, if this frame ended it.
    pub fn step(&mut self) -> Option<Contact> {
        if self.phase != GamePhase::Running {
            return None;
        }
        self.frames += 1;

        let speed = self.score.speed();
        self.backdrop_x -= speed;
        if self.backdrop_x <= self.config.backdrop_wrap_x {
            self.backdrop_x = 0.0;
        }

        self.player.integrate(
            self.config.gravity,
            self.config.floor_y,
            self.config.ceiling_y,
        );
        self.obstacles.advance(speed, &mut self.rng);

        let contact = first_contact(
            &self.player,
            self.obstacles.obstacles(),
            self.config.safe_band.as_ref(),
        )?;
        self.phase = GamePhase::GameOver;
        self.score.stop();
        log::info!(
            "Game over ({:?}) at {} after {} frames",
            contact,
            self.score.score(),
            self.frames
        );
        Some(contact)
    }

    /// Let wall-clock time pass for the score timer
    pub fn advance_clock(&mut self, dt_ms: f32) {
        if self.phase == GamePhase::Running {
            self.score.advance(dt_ms);
        }
    }

    /// Back to the initial Idle state. The RNG stream carries on.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.player = PlayerBody::new(&self.config);
        self.obstacles.reset();
        self.score.reset();
        self.backdrop_x = 0.0;
        self.frames = 0;
        log::info!("Reset");
    }

    pub fn run_state(&self) -> RunState {
        RunState {
            started: matches!(self.phase, GamePhase::Running | GamePhase::Paused),
            over: self.phase == GamePhase::GameOver,
            paused: self.phase == GamePhase::Paused,
            score: self.score.score(),
            obstacle_speed: self.score.speed(),
            overlay: self.overlay(),
        }
    }

    pub fn overlay(&self) -> Overlay {
        match self.phase {
            GamePhase::Paused => Overlay::Paused,
            GamePhase::GameOver => Overlay::GameOver,
            GamePhase::Idle | GamePhase::Running => Overlay::None,
        }
    }

    fn jump(&mut self) {
        let impulse = self.config.jump_impulse_at(self.player.y);
        self.player.jump(impulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Obstacle;

    fn state() -> GameState {
        GameState::new(GameConfig::default(), 42)
    }

    fn obstacle_snapshot(state: &GameState) -> Vec<Obstacle> {
        state.obstacles.obstacles().to_vec()
    }

    #[test]
    fn test_starts_idle() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.overlay(), Overlay::None);
        let run = s.run_state();
        assert!(!run.started && !run.over && !run.paused);
        assert_eq!(run.overlay, Overlay::None);
        assert_eq!(run.score, 0);
        assert_eq!(run.obstacle_speed, s.config.base_speed);
    }

    #[test]
    fn test_step_is_noop_when_idle() {
        let mut s = state();
        let before = obstacle_snapshot(&s);
        assert_eq!(s.step(), None);
        assert_eq!(s.obstacles.obstacles(), &before[..]);
        assert_eq!(s.player.y, s.config.player_start_y);
        assert_eq!(s.frames, 0);
        assert_eq!(s.backdrop_x, 0.0);
    }

    #[test]
    fn test_first_jump_starts_run() {
        let mut s = state();
        s.on_jump_input();
        assert_eq!(s.phase, GamePhase::Running);
        assert!(s.player.velocity > 0.0);
        assert!(s.score.is_running());
    }

    #[test]
    fn test_jump_then_step_scenario() {
        let mut s = state();
        s.on_jump_input();
        assert_eq!(s.player.velocity, 0.03);
        s.step();
        assert!((s.player.velocity - 0.029).abs() < 1e-6);
        assert!((s.player.y - -0.771).abs() < 1e-6);

        let mut frames = 0;
        while s.player.jumping {
            assert_eq!(s.step(), None);
            frames += 1;
            assert!(frames < 200, "never landed");
        }
        assert_eq!(s.player.y, -0.8);
        assert_eq!(s.player.velocity, 0.0);
    }

    #[test]
    fn test_mid_air_jump_is_reduced() {
        let mut s = state();
        s.on_jump_input();
        for _ in 0..10 {
            s.step();
        }
        assert!(s.player.y > -0.7);
        s.on_jump_input();
        assert_eq!(s.player.velocity, s.config.reduced_jump_impulse);
    }

    #[test]
    fn test_pause_toggles_only_while_playing() {
        let mut s = state();
        s.on_pause_input();
        assert_eq!(s.phase, GamePhase::Idle);

        s.on_jump_input();
        s.on_pause_input();
        assert_eq!(s.phase, GamePhase::Paused);
        assert_eq!(s.overlay(), Overlay::Paused);
        assert_eq!(s.run_state().overlay, Overlay::Paused);
        assert!(s.run_state().paused);
        assert!(!s.score.is_running());

        s.on_pause_input();
        assert_eq!(s.phase, GamePhase::Running);
        assert!(s.score.is_running());
    }

    #[test]
    fn test_pause_freezes_world_and_score() {
        let mut s = state();
        s.on_jump_input();
        s.step();
        s.advance_clock(250.0);
        s.on_pause_input();

        let score = s.score.score();
        let player = s.player.clone();
        let obstacles = obstacle_snapshot(&s);
        for _ in 0..30 {
            s.step();
            s.advance_clock(16.0);
        }
        assert_eq!(s.score.score(), score);
        assert_eq!(s.player, player);
        assert_eq!(s.obstacles.obstacles(), &obstacles[..]);

        s.on_pause_input();
        s.advance_clock(16.0);
        assert_eq!(s.score.score(), score, "no catch-up on resume");
    }

    #[test]
    fn test_jump_while_paused_leaves_player_alone() {
        let mut s = state();
        s.on_jump_input();
        for _ in 0..40 {
            s.step();
        }
        assert_eq!(s.phase, GamePhase::Running);
        s.on_pause_input();

        let before = s.player.clone();
        s.on_jump_input();
        assert_eq!(s.player, before);
        assert_eq!(s.phase, GamePhase::Paused);

        s.on_pause_input();
        s.step();
        assert!(s.player.velocity < before.velocity);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut s = state();
        s.on_jump_input();
        s.player.y = 0.0;
        s.player.velocity = 0.0;
        let x = s.player.x + s.score.speed();
        s.obstacles = {
            let mut config = s.config.clone();
            config.obstacles[0].initial_x = x;
            config.obstacles[0].initial_y = 0.0;
            ObstacleSet::new(config.obstacles, config.spacing)
        };

        assert_eq!(s.step(), Some(Contact::Obstacle(0)));
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.overlay(), Overlay::GameOver);
        assert!(s.run_state().over);
        assert_eq!(s.run_state().overlay, Overlay::GameOver);

        let score = s.score.score();
        let speed = s.score.speed();
        for _ in 0..10 {
            assert_eq!(s.step(), None);
            s.advance_clock(100.0);
        }
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.score.score(), score);
        assert_eq!(s.score.speed(), speed);

        // Pause is ignored after game over
        s.on_pause_input();
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_jump_after_game_over_resets_to_idle() {
        let mut s = state();
        s.on_jump_input();
        s.phase = GamePhase::GameOver;
        s.on_jump_input();
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.player.velocity, 0.0);
        assert_eq!(s.player.y, s.config.player_start_y);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut s = state();
        s.on_jump_input();
        for _ in 0..50 {
            s.step();
            s.advance_clock(16.0);
        }
        s.phase = GamePhase::GameOver;

        s.reset();
        let once = (
            s.phase,
            s.player.clone(),
            s.obstacles.clone(),
            s.score.clone(),
            s.backdrop_x,
        );
        s.reset();
        let twice = (
            s.phase,
            s.player.clone(),
            s.obstacles.clone(),
            s.score.clone(),
            s.backdrop_x,
        );
        assert_eq!(once, twice);
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.score.score(), 0);
        assert_eq!(s.score.speed(), s.config.base_speed);
    }

    #[test]
    fn test_backdrop_scrolls_and_wraps() {
        let mut s = state();
        s.on_jump_input();
        s.backdrop_x = s.config.backdrop_wrap_x + 0.001;
        s.step();
        assert_eq!(s.backdrop_x, 0.0);
        s.step();
        assert!(s.backdrop_x < 0.0);
    }
}
