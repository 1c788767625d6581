//! Platform abstraction layer
//!
//! The simulation never queries the host directly. The host reports:
//! - Viewport size (at run start and on every resize)
//! - Whether the current orientation is playable

use serde::{Deserialize, Serialize};

use crate::consts::GROUND_OFFSET;

/// Widest viewport still treated as a handheld device
pub const MOBILE_MAX_WIDTH: f32 = 768.0;

/// Drawable area in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Resting y of the player's top edge
    #[inline]
    pub fn ground_level(&self) -> f32 {
        self.height - GROUND_OFFSET
    }

    /// Largest x the player's left edge may reach
    #[inline]
    pub fn max_player_x(&self, player_width: f32) -> f32 {
        (self.width - player_width).max(0.0)
    }
}

/// Portrait phones are not playable; the host pauses the tick schedule while this is false
pub fn orientation_supported(viewport: Viewport) -> bool {
    !(viewport.width < viewport.height && viewport.width <= MOBILE_MAX_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_level() {
        assert_eq!(Viewport::new(800.0, 400.0).ground_level(), 320.0);
    }

    #[test]
    fn test_orientation_gate() {
        assert!(orientation_supported(Viewport::new(800.0, 400.0)));
        assert!(!orientation_supported(Viewport::new(390.0, 844.0)));
        // Tall desktop windows are still allowed
        assert!(orientation_supported(Viewport::new(1000.0, 1200.0)));
    }
}
