//! One simulation step per rendered frame
//!
//! Step order is fixed:
//! background → player → entities (scroll, cull, spawn) → particles →
//! collisions → stage evaluation.

use serde::{Deserialize, Serialize};

use super::collision;
use super::director::{Outcome, RunPhase};
use super::player::HorizontalInput;
use super::spawn;
use super::state::{GameEvent, GameState};

/// Continuous input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub horizontal: HorizontalInput,
}

/// Held movement flags, written by the host at any time and read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
}

impl InputState {
    /// Left wins when both directions are held
    pub fn sample(&self) -> TickInput {
        let horizontal = if self.move_left {
            HorizontalInput::Left
        } else if self.move_right {
            HorizontalInput::Right
        } else {
            HorizontalInput::None
        };
        TickInput { horizontal }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Advance the game state by one tick; returns the phase afterwards
///
/// Does nothing unless the run is in `Running`.
pub fn tick(state: &mut GameState, input: &TickInput) -> RunPhase {
    if !state.run.is_running() {
        return state.run.phase;
    }
    state.time_ticks += 1;
    let viewport = state.viewport;
    let speed = state.run.game_speed;

    state
        .background
        .update(speed, viewport, &mut state.cosmetic_rng);

    state.player.apply_horizontal_input(input.horizontal);
    state.player.tick(viewport);

    let passed =
        collision::scroll_and_cull(&mut state.entities, speed, &mut state.run, &mut state.events);
    let next_id = &mut state.next_id;
    spawn::maybe_spawn(
        state.run.config(),
        viewport,
        &mut state.entities,
        &mut state.spawn_rng,
        || {
            let id = *next_id;
            *next_id += 1;
            id
        },
    );

    state.particles.update();

    let outcome = collision::resolve(
        &state.player,
        &mut state.entities,
        &mut state.run,
        &mut state.events,
    );
    if outcome.damaged {
        state.emit_damage();
    }
    if passed > 0 || outcome.collected > 0 {
        log::debug!(
            "Tick {}: {} passed, {} collected, score {}",
            state.time_ticks,
            passed,
            outcome.collected,
            state.run.score
        );
    }

    if outcome.crashed.is_some() {
        state.run.lose();
        state.events.push(GameEvent::RunLost {
            score: state.run.score,
        });
        log::info!(
            "Run lost on stage {} with score {}",
            state.run.stage,
            state.run.score
        );
        return state.run.phase;
    }

    match state.run.evaluate() {
        RunPhase::StageClear => {
            state.events.push(GameEvent::StageCleared {
                stage: state.run.stage,
                score: state.run.score,
            });
            log::info!("Stage {} cleared with score {}", state.run.stage, state.run.score);
        }
        RunPhase::GameOver(Outcome::Win) => {
            state.events.push(GameEvent::RunWon {
                score: state.run.score,
            });
            log::info!("All stages cleared with score {}", state.run.score);
        }
        _ => {}
    }

    state.run.phase
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::Viewport;
    use crate::sim::entity::{Entity, EntityKind};
    use crate::sim::stage::StageNumber;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Viewport::default());
        state.start(StageNumber::FIRST);
        state
    }

    /// Drop an obstacle right on top of the player
    fn place_on_player(state: &mut GameState, kind: EntityKind) {
        let id = state.next_entity_id();
        let mut e = if kind.is_pickup() {
            Entity::item(id, kind, state.viewport, 0.0)
        } else {
            Entity::obstacle(id, kind, state.viewport)
        };
        // Scrolled into place during the tick
        e.pos.x = state.player.pos.x + state.run.game_speed;
        if kind.is_pickup() {
            e.pos.y = state.viewport.ground_level();
        }
        state.entities.push(e);
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut state = GameState::new(1, Viewport::default());
        assert_eq!(tick(&mut state, &TickInput::default()), RunPhase::Idle);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_input_sampling_prefers_left() {
        let both = InputState {
            move_left: true,
            move_right: true,
        };
        assert_eq!(both.sample().horizontal, HorizontalInput::Left);
        let right = InputState {
            move_left: false,
            move_right: true,
        };
        assert_eq!(right.sample().horizontal, HorizontalInput::Right);
        assert_eq!(InputState::default().sample().horizontal, HorizontalInput::None);
    }

    #[test]
    fn test_box_collision_ends_run_regardless_of_score() {
        let mut state = running(3);
        state.run.score = 150;
        place_on_player(&mut state, EntityKind::Box);

        let phase = tick(&mut state, &TickInput::default());

        assert_eq!(phase, RunPhase::GameOver(Outcome::Loss));
        assert!(state.events.contains(&GameEvent::Crashed {
            kind: EntityKind::Box
        }));
        assert!(state.events.contains(&GameEvent::RunLost { score: 150 }));
        assert_eq!(state.particles.len(), DAMAGE_PARTICLES);

        // No further ticks while the run is over
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_loss_beats_target_in_same_tick() {
        let mut state = running(3);
        state.run.score = 10_000;
        place_on_player(&mut state, EntityKind::Laser);
        assert_eq!(
            tick(&mut state, &TickInput::default()),
            RunPhase::GameOver(Outcome::Loss)
        );
    }

    #[test]
    fn test_chip_pickup_no_transition() {
        let mut state = running(4);
        place_on_player(&mut state, EntityKind::CyberChip);

        let phase = tick(&mut state, &TickInput::default());

        assert_eq!(phase, RunPhase::Running);
        assert_eq!(state.run.score, 100);
        assert!(state.entities.iter().all(|e| e.kind != EntityKind::CyberChip));
    }

    #[test]
    fn test_reaching_target_clears_stage() {
        let mut state = running(5);
        state.run.score = 195;
        let id = state.next_entity_id();
        let mut e = Entity::obstacle(id, EntityKind::Box, state.viewport);
        e.pos.x = -OFFSCREEN_MARGIN + 1.0;
        state.entities.push(e);

        let phase = tick(&mut state, &TickInput::default());

        assert_eq!(phase, RunPhase::StageClear);
        assert_eq!(state.run.score, 205);
        assert!(state.events.contains(&GameEvent::StageCleared {
            stage: StageNumber::FIRST,
            score: 205
        }));
    }

    #[test]
    fn test_final_stage_target_wins() {
        let mut state = GameState::new(6, Viewport::default());
        state.start(StageNumber::LAST);
        state.run.score = 2000;
        assert_eq!(
            tick(&mut state, &TickInput::default()),
            RunPhase::GameOver(Outcome::Win)
        );
        assert!(state.events.contains(&GameEvent::RunWon { score: 2000 }));
    }

    #[test]
    fn test_spawns_keep_minimum_gap() {
        let mut state = running(7);
        // Keep the player out of harm's way
        state.player.pos.x = 0.0;
        for _ in 0..3000 {
            state.player.pos.y = -1000.0;
            state.player.vel.y = 0.0;
            tick(&mut state, &TickInput::default());
            if !state.run.is_running() {
                break;
            }
            for pair in state.entities.windows(2) {
                assert!(pair[1].pos.x - pair[0].pos.x > SPAWN_GAP - 1e-3);
                assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut a = running(99_999);
        let mut b = running(99_999);
        let inputs = [
            TickInput {
                horizontal: HorizontalInput::Right,
            },
            TickInput::default(),
            TickInput {
                horizontal: HorizontalInput::Left,
            },
        ];
        for i in 0..600 {
            let input = inputs[i % inputs.len()];
            if i % 45 == 0 {
                a.jump();
                b.jump();
            }
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.run, b.run);
        assert_eq!(a.entities, b.entities);
        assert_eq!(a.player, b.player);
    }
}
