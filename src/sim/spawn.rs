//! Procedural obstacle/item generator
//!
//! At most one entity per tick. The gate opens when the pool is empty or the
//! newest entity has moved `SPAWN_GAP` left of the right edge; each open tick
//! then rolls against the stage probabilities.

use rand::Rng;

use super::entity::{Entity, EntityKind};
use super::stage::StageConfig;
use crate::consts::{MALWARE_SHARE, SPAWN_GAP};
use crate::platform::Viewport;

/// What a single roll produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRoll {
    Obstacle(EntityKind),
    /// `lift` in `[0, 1)` sets the item's height above the base line
    Item { kind: EntityKind, lift: f32 },
}

/// True when the newest entity is far enough from the right edge
pub fn gate_open(entities: &[Entity], viewport: Viewport) -> bool {
    entities
        .last()
        .is_none_or(|newest| viewport.width - newest.pos.x > SPAWN_GAP)
}

/// Roll once against the stage table
///
/// Obstacle first; only if that misses is a second sample drawn for an item.
pub fn roll<R: Rng>(config: &StageConfig, rng: &mut R) -> Option<SpawnRoll> {
    if rng.random::<f32>() < config.obstacle_chance {
        let kind = EntityKind::OBSTACLES[rng.random_range(0..EntityKind::OBSTACLES.len())];
        return Some(SpawnRoll::Obstacle(kind));
    }

    if rng.random::<f32>() < config.item_chance && !config.unlocked_items.is_empty() {
        let kind = choose_item(config, rng);
        let lift = rng.random::<f32>();
        return Some(SpawnRoll::Item { kind, lift });
    }

    None
}

/// Malware takes `MALWARE_SHARE` of items once unlocked, chips take the rest
pub fn choose_item<R: Rng>(config: &StageConfig, rng: &mut R) -> EntityKind {
    if config.unlocks(EntityKind::Malware) && rng.random::<f32>() < MALWARE_SHARE {
        EntityKind::Malware
    } else {
        EntityKind::CyberChip
    }
}

/// Gate, roll and build; the new entity is appended to `entities`
pub fn maybe_spawn<R: Rng>(
    config: &StageConfig,
    viewport: Viewport,
    entities: &mut Vec<Entity>,
    rng: &mut R,
    id: impl FnOnce() -> u32,
) -> Option<EntityKind> {
    if !gate_open(entities, viewport) {
        return None;
    }

    let entity = match roll(config, rng)? {
        SpawnRoll::Obstacle(kind) => Entity::obstacle(id(), kind, viewport),
        SpawnRoll::Item { kind, lift } => Entity::item(id(), kind, viewport, lift),
    };
    log::trace!("Spawned {:?} {} at x={}", entity.kind, entity.id, entity.pos.x);
    let kind = entity.kind;
    entities.push(entity);
    Some(kind)
}
