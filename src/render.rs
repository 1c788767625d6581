//! Render snapshot
//!
//! The crate does not draw. Each frame the host asks for a `RenderSnapshot`,
//! a plain copy of everything visible, and paints it however it likes (the web
//! host receives it as JSON).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_COLOR;
use crate::sim::{BackdropElement, EntityKind, GameState, LayerDepth, Outcome, Rect, RunPhase};

const FLOOR_HEIGHT: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSprite {
    /// Drawn body (the lower slice while sliding)
    pub rect: Rect,
    pub color: u32,
    /// Jet flame under the sprite: airborne and not sliding
    pub jet: bool,
    pub sliding: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySprite {
    pub kind: EntityKind,
    pub rect: Rect,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub color: u32,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSprites {
    pub depth: LayerDepth,
    pub elements: Vec<BackdropElement>,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: i64,
    pub stage: u8,
    pub target: i64,
    pub phase: RunPhase,
    /// Overlay text for non-running phases
    pub banner: Option<String>,
}

/// Everything the host needs to draw one frame, back to front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub width: f32,
    pub height: f32,
    /// Top of the ground strip
    pub floor_y: f32,
    pub background: Vec<LayerSprites>,
    pub entities: Vec<EntitySprite>,
    pub player: PlayerSprite,
    pub particles: Vec<ParticleSprite>,
    pub hud: Hud,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let run = &state.run;

        let background = state
            .background
            .layers()
            .into_iter()
            .map(|layer| LayerSprites {
                depth: layer.depth,
                elements: layer.elements.clone(),
            })
            .collect();

        let entities = state
            .entities
            .iter()
            .map(|e| EntitySprite {
                kind: e.kind,
                rect: e.rect(),
                color: e.color(),
            })
            .collect();

        let particles = state
            .particles
            .iter()
            .map(|p| ParticleSprite {
                pos: p.pos,
                color: p.color,
                alpha: p.alpha(),
            })
            .collect();

        Self {
            width: state.viewport.width,
            height: state.viewport.height,
            floor_y: state.viewport.height - FLOOR_HEIGHT,
            background,
            entities,
            player: PlayerSprite {
                rect: player.body_rect(),
                color: PLAYER_COLOR,
                jet: player.is_airborne() && !player.sliding,
                sliding: player.sliding,
            },
            particles,
            hud: Hud {
                score: run.score,
                stage: run.stage.get(),
                target: run.target_score(),
                phase: run.phase,
                banner: banner(run.phase, run.stage.get()),
            },
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn banner(phase: RunPhase, stage: u8) -> Option<String> {
    match phase {
        RunPhase::Running => None,
        RunPhase::Idle => Some("NEON RUNNER".to_string()),
        RunPhase::StageClear => Some(format!("STAGE {stage} CLEAR")),
        RunPhase::GameOver(Outcome::Win) => Some("MISSION COMPLETE".to_string()),
        RunPhase::GameOver(Outcome::Loss) => Some("SYSTEM FAILURE".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Viewport;
    use crate::sim::{Entity, StageNumber};

    fn running() -> GameState {
        let mut state = GameState::new(8, Viewport::default());
        state.start(StageNumber::FIRST);
        state
    }

    #[test]
    fn test_idle_snapshot_has_menu_banner() {
        let state = GameState::new(8, Viewport::default());
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.hud.phase, RunPhase::Idle);
        assert_eq!(snap.hud.banner.as_deref(), Some("NEON RUNNER"));
        assert_eq!(snap.background.len(), 2);
        assert_eq!(snap.background[0].depth, LayerDepth::Far);
    }

    #[test]
    fn test_sliding_player_rect() {
        let mut state = running();
        state.slide();
        let snap = RenderSnapshot::capture(&state);
        assert!(snap.player.sliding);
        assert!(!snap.player.jet);
        assert_eq!(snap.player.rect.size.y, crate::consts::SLIDE_HEIGHT);
        assert_eq!(snap.player.rect.pos.y, 335.0);
    }

    #[test]
    fn test_jet_while_airborne() {
        let mut state = running();
        state.jump();
        let snap = RenderSnapshot::capture(&state);
        assert!(snap.player.jet);
        assert_eq!(snap.particles.len(), crate::consts::JUMP_PARTICLES);
        assert!(snap.particles.iter().all(|p| p.alpha == 1.0));
    }

    #[test]
    fn test_entities_and_hud() {
        let mut state = running();
        state.run.score = 120;
        let id = state.next_entity_id();
        state
            .entities
            .push(Entity::obstacle(id, EntityKind::Floating, state.viewport));
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.entities.len(), 1);
        assert_eq!(snap.entities[0].color, 0xff9900);
        assert_eq!(snap.hud.score, 120);
        assert_eq!(snap.hud.target, 200);
        assert_eq!(snap.hud.banner, None);
    }

    #[test]
    fn test_json_export() {
        let json = RenderSnapshot::capture(&running()).to_json().unwrap();
        assert!(json.contains("\"hud\""));
        assert!(json.contains("\"player\""));
    }
}
