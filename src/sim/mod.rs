//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, no wall-clock time
//! - Seeded RNG only (separate gameplay and cosmetic streams)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the `Viewport` model

pub mod autopilot;
pub mod background;
pub mod clock;
pub mod collision;
pub mod director;
pub mod entity;
pub mod particle;
pub mod player;
pub mod spawn;
pub mod stage;
pub mod state;
pub mod tick;

pub use autopilot::{Plan, plan};
pub use background::{BackdropElement, Background, BackgroundLayer, LayerDepth};
pub use clock::{FrameStatus, SimulationClock};
pub use collision::{CollisionOutcome, Rect};
pub use director::{Outcome, RunPhase, RunState};
pub use entity::{Entity, EntityKind};
pub use particle::{Particle, ParticlePool};
pub use player::{HorizontalInput, Player};
pub use stage::{STAGES, StageConfig, StageNumber};
pub use state::{GameEvent, GameState};
pub use tick::{InputState, TickInput, tick};
