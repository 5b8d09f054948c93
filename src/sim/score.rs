//! Time-based scoring and the obstacle speed ramp

use serde::{Deserialize, Serialize};

/// A fixed-period repeating task driven by elapsed milliseconds.
///
/// Cancelling drops any partial period, so a restarted task always waits
/// a full period before firing again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatingTask {
    period_ms: f32,
    elapsed_ms: f32,
    active: bool,
}

impl RepeatingTask {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
            active: false,
        }
    }

    /// Schedule a fresh period
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.elapsed_ms = 0.0;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Let `dt_ms` pass; returns how many times the task fired
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        if !self.active || self.period_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let fired = (self.elapsed_ms / self.period_ms).floor();
        self.elapsed_ms -= fired * self.period_ms;
        fired as u32
    }
}

/// Distance score and the obstacle speed it drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    score: u32,
    speed: f32,
    base_speed: f32,
    increment: f32,
    task: RepeatingTask,
}

impl ScoreKeeper {
    pub fn new(base_speed: f32, increment: f32, period_ms: f32) -> Self {
        Self {
            score: 0,
            speed: base_speed,
            base_speed,
            increment,
            task: RepeatingTask::new(period_ms),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current obstacle scroll speed
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_running(&self) -> bool {
        self.task.is_active()
    }

    /// Begin (or resume) accrual with a fresh period
    pub fn start(&mut self) {
        self.task.start();
    }

    /// Stop accrual; score and speed are kept
    pub fn stop(&mut self) {
        self.task.cancel();
    }

    /// Back to zero score and base speed, not running
    pub fn reset(&mut self) {
        self.task.cancel();
        self.score = 0;
        self.speed = self.base_speed;
    }

    /// Apply every tick that fell due within `dt_ms`
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        let ticks = self.task.advance(dt_ms);
        for _ in 0..ticks {
            self.score = self.score.saturating_add(1);
            self.speed += self.increment;
        }
        ticks
    }
}
