//! Collision detection and response
//!
//! Everything in the world is an axis-aligned rectangle. One pass per tick:
//! pickups are consumed and scored, the first solid hit ends the pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::director::RunState;
use super::entity::{Entity, EntityKind};
use super::player::Player;
use super::state::GameEvent;
use crate::consts::OBSTACLE_PASS_SCORE;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Result of a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionOutcome {
    /// Solid obstacle the player ran into, if any
    pub crashed: Option<EntityKind>,
    /// Pickups consumed this pass
    pub collected: u32,
    /// Malware or a crash: the player should flash
    pub damaged: bool,
}

/// Test the player against every entity and apply the results
///
/// Consumed pickups are removed in the same compacting pass, so no entity is
/// skipped or visited twice. After a solid hit the remaining entities are left
/// untouched.
pub fn resolve(
    player: &Player,
    entities: &mut Vec<Entity>,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
) -> CollisionOutcome {
    let hitbox = player.hitbox();
    let mut outcome = CollisionOutcome::default();

    entities.retain(|entity| {
        if outcome.crashed.is_some() || !hitbox.overlaps(&entity.rect()) {
            return true;
        }

        match entity.kind {
            EntityKind::CyberChip => {
                run.add_score(entity.value());
                outcome.collected += 1;
                log::debug!("Picked up chip {} (+{})", entity.id, entity.value());
                events.push(GameEvent::PickedUp {
                    kind: entity.kind,
                    value: entity.value(),
                });
                false
            }
            EntityKind::Malware => {
                run.add_score(entity.value());
                outcome.collected += 1;
                outcome.damaged = true;
                log::debug!("Picked up malware {} ({})", entity.id, entity.value());
                events.push(GameEvent::MalwareHit {
                    value: entity.value(),
                });
                false
            }
            kind => {
                log::debug!("Crashed into {:?} {}", kind, entity.id);
                outcome.crashed = Some(kind);
                outcome.damaged = true;
                events.push(GameEvent::Crashed { kind });
                true
            }
        }
    });

    outcome
}

/// Scroll every entity left and drop the ones that left the screen
///
/// Solid obstacles award `OBSTACLE_PASS_SCORE` when dropped; pickups that were
/// never touched vanish without affecting the score. Returns the number of
/// obstacles passed.
pub fn scroll_and_cull(
    entities: &mut Vec<Entity>,
    speed: f32,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut passed = 0;
    entities.retain_mut(|entity| {
        entity.scroll(speed);
        if !entity.is_offscreen() {
            return true;
        }
        if entity.kind.is_solid() {
            run.add_score(OBSTACLE_PASS_SCORE);
            passed += 1;
            events.push(GameEvent::ObstaclePassed { kind: entity.kind });
        } else {
            log::trace!("Missed {:?} {}", entity.kind, entity.id);
        }
        false
    });
    passed
}
