//! Frame driver
//!
//! `SimulationClock` owns the world, the held-input flags and the effect sink.
//! The host calls `frame()` once per display refresh and forwards discrete
//! commands as they arrive. Every entry point takes `&mut self`, so a tick can
//! never start while another one is still running.

use super::director::RunPhase;
use super::stage::StageNumber;
use super::state::GameState;
use super::tick::{InputState, tick};
use crate::effects::{Effect, EffectSink, effects_for};
use crate::platform::{Viewport, orientation_supported};
use crate::render::RenderSnapshot;
use crate::settings::Settings;

/// Whether the host should keep scheduling frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Still running, request another frame
    Continue,
    /// Nothing to simulate until a command arrives
    Halted,
}

pub struct SimulationClock<S: EffectSink> {
    state: GameState,
    input: InputState,
    sink: S,
    /// Paused by the host (focus loss, pause menu)
    paused: bool,
    /// Paused by the orientation gate
    suspended: bool,
    damage_flash: bool,
}

impl<S: EffectSink> SimulationClock<S> {
    pub fn new(seed: u64, viewport: Viewport, sink: S) -> Self {
        Self::with_settings(seed, viewport, sink, &Settings::default())
    }

    /// Particle cap and damage flash follow the settings; a seed stored in the
    /// settings overrides `seed`
    pub fn with_settings(seed: u64, viewport: Viewport, sink: S, settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        log::info!(
            "Simulation clock created (seed {}, viewport {}x{})",
            seed,
            viewport.width,
            viewport.height
        );
        Self {
            state: GameState::with_particle_capacity(seed, viewport, settings.max_particles()),
            input: InputState::default(),
            sink,
            paused: false,
            suspended: !orientation_supported(viewport),
            damage_flash: settings.effective_damage_flash(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    pub fn phase(&self) -> RunPhase {
        self.state.run.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused || self.suspended
    }

    /// True while frames would advance the simulation
    pub fn wants_frames(&self) -> bool {
        self.state.run.is_running() && !self.is_paused()
    }

    // === Frame ===

    /// Run one tick if the game is running and not paused
    pub fn frame(&mut self) -> FrameStatus {
        if !self.wants_frames() {
            return FrameStatus::Halted;
        }
        let input = self.input.sample();
        let phase = tick(&mut self.state, &input);
        self.flush();
        if phase == RunPhase::Running {
            FrameStatus::Continue
        } else {
            FrameStatus::Halted
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    // === Run commands ===

    /// `Idle → Running` on `stage`
    pub fn start(&mut self, stage: StageNumber) -> bool {
        self.run_command(|state| state.start(stage))
    }

    /// `GameOver → Running` on `stage` with the score reset
    pub fn restart(&mut self, stage: StageNumber) -> bool {
        self.run_command(|state| state.restart(stage))
    }

    /// Fresh run on stage 1 from the menu or a finished run
    pub fn new_game(&mut self) -> bool {
        self.run_command(|state| {
            state.start(StageNumber::FIRST) || state.restart(StageNumber::FIRST)
        })
    }

    /// Play again after a game over
    ///
    /// After a loss this replays the lost stage. After a win there is no stage
    /// left to replay, so it behaves like `new_game` and starts on stage 1.
    pub fn retry(&mut self) -> bool {
        let stage = self.state.run.restart_stage();
        self.restart(stage)
    }

    /// `StageClear → Running` on the next stage
    pub fn advance(&mut self) -> bool {
        self.run_command(GameState::advance)
    }

    pub fn return_to_menu(&mut self) -> bool {
        let accepted = self.state.return_to_menu();
        self.flush();
        accepted
    }

    /// Commands that enter `Running` are refused while the orientation gate
    /// holds the game
    fn run_command(&mut self, command: impl FnOnce(&mut GameState) -> bool) -> bool {
        if self.suspended {
            log::debug!("Run command ignored: unsupported orientation");
            return false;
        }
        let accepted = command(&mut self.state);
        if accepted {
            self.paused = false;
        }
        self.flush();
        accepted
    }

    // === Player input ===

    pub fn jump(&mut self) -> bool {
        if self.is_paused() {
            return false;
        }
        let accepted = self.state.jump();
        self.flush();
        accepted
    }

    pub fn slide(&mut self) -> bool {
        if self.is_paused() {
            return false;
        }
        let accepted = self.state.slide();
        self.flush();
        accepted
    }

    /// Held flag, read at the next tick
    pub fn set_move_left(&mut self, held: bool) {
        self.input.move_left = held;
    }

    pub fn set_move_right(&mut self, held: bool) {
        self.input.move_right = held;
    }

    pub fn release_all(&mut self) {
        self.input.clear();
    }

    // === Host lifecycle ===

    /// Stop ticking; state is left untouched
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        let was_active = self.wants_frames();
        self.paused = true;
        if was_active {
            self.sink.trigger(Effect::PauseBgm);
            log::debug!("Paused at tick {}", self.state.time_ticks);
        }
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if self.wants_frames() {
            self.sink.trigger(Effect::PlayBgm);
            log::debug!("Resumed at tick {}", self.state.time_ticks);
        }
    }

    /// Adopt a new viewport and re-apply the orientation gate
    pub fn resize(&mut self, viewport: Viewport) {
        self.state.resize(viewport);
        self.apply_orientation(orientation_supported(viewport));
    }

    /// Suspend while the orientation is unsupported, resume once it is again
    pub fn apply_orientation(&mut self, supported: bool) {
        if self.suspended == !supported {
            return;
        }
        let was_active = self.wants_frames();
        self.suspended = !supported;
        let active = self.wants_frames();
        if was_active && !active {
            self.sink.trigger(Effect::PauseBgm);
            log::info!("Suspended: unsupported orientation");
        } else if !was_active && active {
            self.sink.trigger(Effect::PlayBgm);
            log::info!("Orientation restored, resuming");
        }
    }

    /// Deliver pending events to the sink
    fn flush(&mut self) {
        let damage_flash = self.damage_flash;
        for event in self.state.drain_events() {
            for effect in effects_for(&event) {
                if *effect == Effect::DamageFlash && !damage_flash {
                    continue;
                }
                self.sink.trigger(*effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::RecordingSink;
    use crate::sim::director::Outcome;
    use crate::sim::entity::{Entity, EntityKind};

    fn clock() -> SimulationClock<RecordingSink> {
        SimulationClock::new(21, Viewport::default(), RecordingSink::default())
    }

    #[test]
    fn test_idle_clock_halts() {
        let mut clock = clock();
        assert_eq!(clock.frame(), FrameStatus::Halted);
        assert_eq!(clock.state().time_ticks, 0);
    }

    #[test]
    fn test_start_plays_bgm_and_ticks() {
        let mut clock = clock();
        assert!(clock.start(StageNumber::FIRST));
        assert_eq!(clock.sink().effects, vec![Effect::PlayBgm]);
        assert_eq!(clock.frame(), FrameStatus::Continue);
        assert_eq!(clock.state().time_ticks, 1);
    }

    #[test]
    fn test_jump_triggers_sound_once() {
        let mut clock = clock();
        clock.start(StageNumber::FIRST);
        clock.sink_mut().take();
        assert!(clock.jump());
        assert!(clock.jump());
        assert!(!clock.jump());
        assert_eq!(clock.sink().effects, vec![Effect::JumpSound, Effect::JumpSound]);
    }

    #[test]
    fn test_pause_blocks_ticks_and_commands() {
        let mut clock = clock();
        clock.start(StageNumber::FIRST);
        clock.frame();
        let before = clock.state().player.clone();
        let ticks = clock.state().time_ticks;

        clock.pause();
        assert!(clock.is_paused());
        assert_eq!(clock.frame(), FrameStatus::Halted);
        assert!(!clock.jump());
        assert_eq!(clock.state().time_ticks, ticks);
        assert_eq!(clock.state().player, before);

        clock.resume();
        assert_eq!(clock.frame(), FrameStatus::Continue);
        assert_eq!(clock.state().time_ticks, ticks + 1);
        assert_eq!(
            clock.sink().effects,
            vec![Effect::PlayBgm, Effect::PauseBgm, Effect::PlayBgm]
        );
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut clock = clock();
        clock.start(StageNumber::FIRST);
        clock.pause();
        clock.pause();
        clock.resume();
        clock.resume();
        assert_eq!(clock.sink().count(Effect::PauseBgm), 1);
        assert_eq!(clock.sink().count(Effect::PlayBgm), 2);
    }

    #[test]
    fn test_held_input_moves_player() {
        let mut clock = clock();
        clock.start(StageNumber::FIRST);
        clock.set_move_right(true);
        for _ in 0..5 {
            clock.frame();
        }
        assert!(clock.state().player.pos.x > 100.0);
        clock.release_all();
        assert_eq!(clock.input(), InputState::default());
    }

    #[test]
    fn test_portrait_resize_suspends() {
        let mut clock = clock();
        clock.start(StageNumber::FIRST);
        clock.resize(Viewport::new(400.0, 800.0));
        assert!(clock.is_paused());
        assert_eq!(clock.frame(), FrameStatus::Halted);
        assert_eq!(clock.state().player.pos.y, 720.0);

        clock.resize(Viewport::new(800.0, 400.0));
        assert!(!clock.is_paused());
        assert_eq!(clock.frame(), FrameStatus::Continue);
    }

    #[test]
    fn test_portrait_refuses_start_until_rotated() {
        let mut clock =
            SimulationClock::new(1, Viewport::new(390.0, 844.0), RecordingSink::default());
        assert!(clock.is_paused());
        assert!(!clock.start(StageNumber::FIRST));
        assert!(!clock.new_game());
        assert_eq!(clock.phase(), RunPhase::Idle);
        assert_eq!(clock.frame(), FrameStatus::Halted);
        assert!(clock.sink().effects.is_empty());

        // Rotating back alone does not start anything
        clock.resize(Viewport::new(844.0, 390.0));
        assert!(clock.sink().effects.is_empty());

        assert!(clock.start(StageNumber::FIRST));
        assert_eq!(clock.sink().count(Effect::PlayBgm), 1);
        assert_eq!(clock.frame(), FrameStatus::Continue);
    }

    #[test]
    fn test_game_over_in_portrait_waits_for_rotation() {
        let mut clock = clock();
        clock.start(StageNumber::FIRST);
        clock.state_mut().run.lose();
        clock.resize(Viewport::new(400.0, 800.0));
        assert!(!clock.retry());
        assert_eq!(clock.phase(), RunPhase::GameOver(Outcome::Loss));

        clock.resize(Viewport::new(800.0, 400.0));
        assert!(clock.retry());
        assert_eq!(clock.sink().count(Effect::PlayBgm), 2);
    }

    #[test]
    fn test_crash_flashes_and_halts() {
        let mut clock = clock();
        clock.start(StageNumber::FIRST);
        let state = clock.state_mut();
        let id = state.next_entity_id();
        let mut e = Entity::obstacle(id, EntityKind::Box, state.viewport);
        e.pos.x = state.player.pos.x + state.run.game_speed;
        state.entities.push(e);

        assert_eq!(clock.frame(), FrameStatus::Halted);
        assert_eq!(clock.phase(), RunPhase::GameOver(Outcome::Loss));
        assert_eq!(clock.sink().count(Effect::DamageFlash), 1);
        assert_eq!(clock.sink().effects.last(), Some(&Effect::PauseBgm));

        assert!(clock.retry());
        assert_eq!(clock.phase(), RunPhase::Running);
        assert_eq!(clock.state().run.score, 0);
    }

    #[test]
    fn test_damage_flash_can_be_disabled() {
        let settings = Settings {
            damage_flash: false,
            ..Settings::default()
        };
        let mut clock =
            SimulationClock::with_settings(3, Viewport::default(), RecordingSink::default(), &settings);
        clock.start(StageNumber::FIRST);
        let state = clock.state_mut();
        let id = state.next_entity_id();
        let mut e = Entity::obstacle(id, EntityKind::Laser, state.viewport);
        e.pos.x = state.player.pos.x + state.run.game_speed;
        state.entities.push(e);

        clock.frame();
        assert_eq!(clock.phase(), RunPhase::GameOver(Outcome::Loss));
        assert_eq!(clock.sink().count(Effect::DamageFlash), 0);
    }

    #[test]
    fn test_new_game_from_menu_and_game_over() {
        let mut clock = clock();
        assert!(clock.new_game());
        assert!(!clock.new_game());
        clock.state_mut().run.lose();
        assert!(clock.new_game());
        assert_eq!(clock.state().run.stage, StageNumber::FIRST);
    }
}
