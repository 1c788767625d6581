//! Demo-mode driver
//!
//! Looks at the nearest solid obstacle ahead of the player and picks one
//! discrete action for this tick. Used by the headless binary and long-run
//! tests; it reads the state and never mutates it.

use super::entity::{Entity, EntityKind};
use super::state::GameState;

/// How many ticks ahead an obstacle must be before reacting
const LOOKAHEAD_TICKS: f32 = 10.0;

/// Action chosen for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Jump,
    Slide,
    Idle,
}

/// Nearest solid obstacle whose left edge is still ahead of the hitbox
fn next_obstacle(state: &GameState) -> Option<&Entity> {
    let front = state.player.hitbox().right();
    state
        .entities
        .iter()
        .filter(|e| e.kind.is_solid() && e.pos.x >= front)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
}

/// Choose an action from the current state
pub fn plan(state: &GameState) -> Plan {
    if !state.run.is_running() || state.player.is_airborne() || state.player.sliding {
        return Plan::Idle;
    }
    let Some(obstacle) = next_obstacle(state) else {
        return Plan::Idle;
    };

    let gap = obstacle.pos.x - state.player.hitbox().right();
    if gap > state.run.game_speed * LOOKAHEAD_TICKS {
        return Plan::Idle;
    }

    match obstacle.kind {
        EntityKind::Box | EntityKind::Laser => Plan::Jump,
        EntityKind::Floating => Plan::Slide,
        EntityKind::CyberChip | EntityKind::Malware => Plan::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Viewport;
    use crate::sim::stage::StageNumber;
    use crate::sim::tick::{TickInput, tick};

    fn running() -> GameState {
        let mut state = GameState::new(12, Viewport::default());
        state.start(StageNumber::FIRST);
        state
    }

    fn place(state: &mut GameState, kind: EntityKind, gap: f32) {
        let id = state.next_entity_id();
        let mut e = Entity::obstacle(id, kind, state.viewport);
        e.pos.x = state.player.hitbox().right() + gap;
        state.entities.push(e);
    }

    #[test]
    fn test_idle_on_empty_track() {
        assert_eq!(plan(&running()), Plan::Idle);
    }

    #[test]
    fn test_jumps_ground_obstacles() {
        for kind in [EntityKind::Box, EntityKind::Laser] {
            let mut state = running();
            place(&mut state, kind, 30.0);
            assert_eq!(plan(&state), Plan::Jump);
        }
    }

    #[test]
    fn test_slides_under_floating() {
        let mut state = running();
        place(&mut state, EntityKind::Floating, 20.0);
        assert_eq!(plan(&state), Plan::Slide);
    }

    #[test]
    fn test_waits_for_distant_obstacle() {
        let mut state = running();
        place(&mut state, EntityKind::Laser, 400.0);
        assert_eq!(plan(&state), Plan::Idle);
    }

    #[test]
    fn test_idle_while_airborne() {
        let mut state = running();
        place(&mut state, EntityKind::Box, 30.0);
        state.jump();
        assert_eq!(plan(&state), Plan::Idle);
    }

    #[test]
    fn test_clears_a_laser() {
        let mut state = running();
        place(&mut state, EntityKind::Laser, 200.0);
        for _ in 0..120 {
            match plan(&state) {
                Plan::Jump => {
                    state.jump();
                }
                Plan::Slide => {
                    state.slide();
                }
                Plan::Idle => {}
            }
            // Only the placed laser matters here
            state.entities.retain(|e| e.id == 1);
            tick(&mut state, &TickInput::default());
            assert!(state.run.is_running());
        }
        assert!(state.entities.iter().all(|e| e.id != 1));
        assert_eq!(state.run.score, 10);
    }
}
