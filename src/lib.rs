//! Neon Runner - A cyberpunk side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, collisions, stages)
//! - `effects`: Fire-and-forget sound/visual triggers emitted by the simulation
//! - `render`: Geometry snapshots handed to the host for drawing
//! - `platform`: Viewport model and orientation gate
//! - `settings`: Player preferences (JSON)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod effects;
pub mod error;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use effects::{Effect, EffectSink};
pub use error::{Error, Result};
pub use platform::Viewport;
pub use render::RenderSnapshot;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// All quantities are per tick (one tick per rendered frame) and in canvas pixels.
pub mod consts {
    /// Nominal tick rate, used to convert millisecond durations into ticks
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Ground level sits this far above the bottom edge of the viewport
    pub const GROUND_OFFSET: f32 = 80.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_MAX_SPEED: f32 = 6.0;
    pub const PLAYER_ACCELERATION: f32 = 0.8;
    pub const PLAYER_FRICTION: f32 = 0.85;
    pub const MAX_JUMPS: u8 = 2;
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_VELOCITY: f32 = -12.0;

    /// Slide lasts 600ms
    pub const SLIDE_TICKS: u32 = TICKS_PER_SECOND * 600 / 1000;
    pub const SLIDE_BOOST: f32 = 2.0;
    /// Sliding hitbox: lower slice of the sprite
    pub const SLIDE_OFFSET_Y: f32 = 15.0;
    pub const SLIDE_HEIGHT: f32 = 25.0;
    /// Horizontal forgiveness on each side of the player hitbox
    pub const HITBOX_INSET: f32 = 5.0;

    /// Minimum distance between the newest entity and the right edge before spawning again
    pub const SPAWN_GAP: f32 = 250.0;
    /// Entities are culled once `x + OFFSCREEN_MARGIN < 0`
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Score for every solid obstacle that scrolls past
    pub const OBSTACLE_PASS_SCORE: i64 = 10;

    /// Item defaults
    pub const ITEM_SIZE: f32 = 25.0;
    pub const CYBER_CHIP_VALUE: i64 = 100;
    pub const MALWARE_VALUE: i64 = -200;
    /// Probability of malware once it is unlocked
    pub const MALWARE_SHARE: f32 = 0.4;

    /// Game speed is `BASE_SPEED + SPEED_PER_STAGE * stage`
    pub const BASE_SPEED: f32 = 4.0;
    pub const SPEED_PER_STAGE: f32 = 0.5;

    /// Parallax factors relative to game speed
    pub const FAR_LAYER_FACTOR: f32 = 0.2;
    pub const NEAR_LAYER_FACTOR: f32 = 0.5;

    /// Particle defaults
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_SPREAD: f32 = 5.0;
    pub const JUMP_PARTICLES: usize = 5;
    pub const DAMAGE_PARTICLES: usize = 8;
    pub const MAX_PARTICLES: usize = 256;

    /// Palette (0xRRGGBB)
    pub const PLAYER_COLOR: u32 = 0x00ffff;
    pub const JUMP_PARTICLE_COLOR: u32 = 0xffffff;
    pub const DAMAGE_COLOR: u32 = 0xff3333;
}
