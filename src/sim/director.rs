//! Run state and the stage progression state machine
//!
//! ```text
//! Idle ──start──▶ Running ──target, stage<5──▶ StageClear ──advance──▶ Running
//!                    │  └──target, stage=5──▶ GameOver(Win)
//!                    └──solid hit──────────▶ GameOver(Loss)
//! GameOver ──restart──▶ Running      GameOver ──menu──▶ Idle
//! ```
//!
//! Commands issued in the wrong phase are ignored and report `false`.

use serde::{Deserialize, Serialize};

use super::stage::{StageConfig, StageNumber};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Final stage cleared
    Win,
    /// Hit a solid obstacle
    Loss,
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Menu, nothing simulated
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Stage target reached, waiting for the advance command
    StageClear,
    /// Run ended
    GameOver(Outcome),
}

/// Score, stage and speed of the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: i64,
    pub stage: StageNumber,
    pub game_speed: f32,
    pub phase: RunPhase,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            score: 0,
            stage: StageNumber::FIRST,
            game_speed: StageNumber::FIRST.game_speed(),
            phase: RunPhase::Idle,
        }
    }
}

impl RunState {
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn config(&self) -> &'static StageConfig {
        self.stage.config()
    }

    pub fn target_score(&self) -> i64 {
        self.config().target_score
    }

    pub fn add_score(&mut self, delta: i64) {
        self.score += delta;
    }

    /// Enter `Running` on `stage`; the score is zeroed unless carried over
    pub fn begin(&mut self, stage: StageNumber, reset_score: bool) {
        if reset_score {
            self.score = 0;
        }
        self.stage = stage;
        self.game_speed = stage.game_speed();
        self.phase = RunPhase::Running;
    }

    /// Whether a start command is accepted right now
    pub fn can_start(&self) -> bool {
        self.phase == RunPhase::Idle
    }

    /// Whether a restart command is accepted right now
    pub fn can_restart(&self) -> bool {
        matches!(self.phase, RunPhase::GameOver(_))
    }

    /// Stage the next run should start on after this one ended:
    /// a win starts a new game, a loss retries the same stage
    pub fn restart_stage(&self) -> StageNumber {
        match self.phase {
            RunPhase::GameOver(Outcome::Win) => StageNumber::FIRST,
            _ => self.stage,
        }
    }

    /// Following stage when the advance command is accepted
    pub fn advance_target(&self) -> Option<StageNumber> {
        if self.phase == RunPhase::StageClear {
            self.stage.next()
        } else {
            None
        }
    }

    /// Solid collision: terminal for the run
    pub fn lose(&mut self) {
        if self.is_running() {
            self.phase = RunPhase::GameOver(Outcome::Loss);
        }
    }

    /// Compare score with the active target and leave `Running` if reached
    pub fn evaluate(&mut self) -> RunPhase {
        if self.is_running() && self.score >= self.target_score() {
            self.phase = if self.stage.is_final() {
                RunPhase::GameOver(Outcome::Win)
            } else {
                RunPhase::StageClear
            };
        }
        self.phase
    }

    /// Back to the menu from a finished run
    pub fn return_to_menu(&mut self) -> bool {
        if self.can_restart() {
            self.phase = RunPhase::Idle;
            true
        } else {
            false
        }
    }
}
