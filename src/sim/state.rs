//! World state and run commands
//!
//! Everything the simulation touches lives in one `GameState` value; there is
//! no ambient global state. Commands validate against the current phase and
//! report whether they were accepted.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Background;
use super::director::RunState;
use super::entity::{Entity, EntityKind};
use super::particle::ParticlePool;
use super::player::Player;
use super::stage::StageNumber;
use crate::consts::*;
use crate::platform::Viewport;

/// Salt separating the cosmetic RNG stream from the gameplay stream
const COSMETIC_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Something that happened during a command or tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { stage: StageNumber },
    Jumped,
    Slid,
    PickedUp { kind: EntityKind, value: i64 },
    MalwareHit { value: i64 },
    Crashed { kind: EntityKind },
    ObstaclePassed { kind: EntityKind },
    StageCleared { stage: StageNumber, score: i64 },
    RunWon { score: i64 },
    RunLost { score: i64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub viewport: Viewport,
    pub run: RunState,
    pub player: Player,
    /// Obstacles and items in spawn order
    pub entities: Vec<Entity>,
    pub background: Background,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticlePool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Spawn decisions only
    pub(crate) spawn_rng: Pcg32,
    /// Background recycling and particle spread
    pub(crate) cosmetic_rng: Pcg32,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Fresh world in the `Idle` phase, backdrop already generated for the menu
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_particle_capacity(seed, viewport, MAX_PARTICLES)
    }

    pub fn with_particle_capacity(seed: u64, viewport: Viewport, max_particles: usize) -> Self {
        let mut cosmetic_rng = Pcg32::seed_from_u64(seed ^ COSMETIC_STREAM);
        let background = Background::generate(viewport, &mut cosmetic_rng);
        Self {
            seed,
            viewport,
            run: RunState::default(),
            player: Player::new(viewport),
            entities: Vec::new(),
            background,
            particles: ParticlePool::with_capacity(max_particles),
            time_ticks: 0,
            events: Vec::new(),
            spawn_rng: Pcg32::seed_from_u64(seed),
            cosmetic_rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Empty every pool, regenerate the backdrop and put the player back at the start
    pub fn reset_stage_elements(&mut self) {
        self.entities.clear();
        self.particles.clear();
        self.background = Background::generate(self.viewport, &mut self.cosmetic_rng);
        self.player.reset(self.viewport);
    }

    fn enter_running(&mut self, stage: StageNumber, reset_score: bool) {
        self.run.begin(stage, reset_score);
        self.reset_stage_elements();
        self.events.push(GameEvent::RunStarted { stage });
        log::info!(
            "Stage {} started (score {}, target {}, speed {})",
            stage,
            self.run.score,
            self.run.target_score(),
            self.run.game_speed
        );
    }

    /// `Idle → Running` with a fresh score
    pub fn start(&mut self, stage: StageNumber) -> bool {
        if !self.run.can_start() {
            log::debug!("Start ignored in {:?}", self.run.phase);
            return false;
        }
        self.enter_running(stage, true);
        true
    }

    /// `GameOver → Running` with a fresh score
    pub fn restart(&mut self, stage: StageNumber) -> bool {
        if !self.run.can_restart() {
            log::debug!("Restart ignored in {:?}", self.run.phase);
            return false;
        }
        self.enter_running(stage, true);
        true
    }

    /// `StageClear → Running` on the next stage, score carried over
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.run.advance_target() else {
            log::debug!("Advance ignored in {:?}", self.run.phase);
            return false;
        };
        self.enter_running(next, false);
        true
    }

    /// `GameOver → Idle`
    pub fn return_to_menu(&mut self) -> bool {
        self.run.return_to_menu()
    }

    /// Jump with particles; only while running
    pub fn jump(&mut self) -> bool {
        if !self.run.is_running() || !self.player.jump() {
            return false;
        }
        let origin = self.player.feet();
        self.particles
            .emit(origin, JUMP_PARTICLE_COLOR, JUMP_PARTICLES, &mut self.cosmetic_rng);
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Slide; only while running
    pub fn slide(&mut self) -> bool {
        if !self.run.is_running() || !self.player.slide() {
            return false;
        }
        self.events.push(GameEvent::Slid);
        true
    }

    /// Damage burst at the player's centre
    pub fn emit_damage(&mut self) {
        let origin = self.player.center();
        self.particles
            .emit(origin, DAMAGE_COLOR, DAMAGE_PARTICLES, &mut self.cosmetic_rng);
    }

    /// Adopt a new viewport; ground level and bounds follow it
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.fit_to(viewport);
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
