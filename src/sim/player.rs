//! Player controller
//!
//! Horizontal motion is accelerate/friction, vertical motion is constant
//! gravity with a double jump. Sliding shrinks the hitbox to the lower slice
//! of the sprite for a fixed number of ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::platform::Viewport;

/// Held horizontal direction for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalInput {
    Left,
    Right,
    #[default]
    None,
}

/// The controllable runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub max_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
    /// Jumps used since last ground contact
    pub jump_count: u8,
    pub max_jumps: u8,
    /// Set by a jump, cleared on landing
    pub jumping: bool,
    pub sliding: bool,
    /// Ticks left until the slide ends
    pub slide_ticks: u32,
}

impl Player {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, viewport.ground_level()),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            max_speed: PLAYER_MAX_SPEED,
            acceleration: PLAYER_ACCELERATION,
            friction: PLAYER_FRICTION,
            jump_count: 0,
            max_jumps: MAX_JUMPS,
            jumping: false,
            sliding: false,
            slide_ticks: 0,
        }
    }

    /// Back to the start position, at rest on the ground
    pub fn reset(&mut self, viewport: Viewport) {
        *self = Self::new(viewport);
    }

    pub fn is_airborne(&self) -> bool {
        self.jumping
    }

    /// Accelerate toward the held direction, or decay toward rest
    pub fn apply_horizontal_input(&mut self, input: HorizontalInput) {
        match input {
            HorizontalInput::Left => {
                self.vel.x = (self.vel.x - self.acceleration).max(-self.max_speed);
            }
            HorizontalInput::Right => {
                self.vel.x = (self.vel.x + self.acceleration).min(self.max_speed);
            }
            HorizontalInput::None => {
                self.vel.x *= self.friction;
            }
        }
    }

    /// Integrate one tick of motion against the viewport bounds
    pub fn tick(&mut self, viewport: Viewport) {
        self.pos.x += self.vel.x;

        let max_x = viewport.max_player_x(self.size.x);
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = 0.0;
        }
        if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = 0.0;
        }

        self.vel.y += GRAVITY;
        self.pos.y += self.vel.y;

        let ground = viewport.ground_level();
        if self.pos.y >= ground {
            self.pos.y = ground;
            self.vel.y = 0.0;
            self.jumping = false;
            self.jump_count = 0;
        }

        if self.slide_ticks > 0 {
            self.slide_ticks -= 1;
            if self.slide_ticks == 0 {
                self.sliding = false;
            }
        }
    }

    pub fn can_jump(&self) -> bool {
        self.jump_count < self.max_jumps && !self.sliding
    }

    /// Returns false (and changes nothing) when the jump is not allowed
    pub fn jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.jumping = true;
        self.vel.y = JUMP_VELOCITY;
        self.jump_count += 1;
        true
    }

    pub fn can_slide(&self) -> bool {
        !self.is_airborne()
    }

    /// Start (or restart) a slide; ignored while airborne
    pub fn slide(&mut self) -> bool {
        if !self.can_slide() {
            return false;
        }
        self.sliding = true;
        self.slide_ticks = SLIDE_TICKS;
        if self.vel.x > 0.0 {
            self.vel.x += SLIDE_BOOST;
        }
        true
    }

    /// Drawn body: the lower slice while sliding
    pub fn body_rect(&self) -> Rect {
        if self.sliding {
            Rect::new(
                Vec2::new(self.pos.x, self.pos.y + SLIDE_OFFSET_Y),
                Vec2::new(self.size.x, SLIDE_HEIGHT),
            )
        } else {
            Rect::new(self.pos, self.size)
        }
    }

    /// Collision box: the body narrowed by the inset on both sides
    pub fn hitbox(&self) -> Rect {
        let body = self.body_rect();
        Rect::new(
            Vec2::new(body.pos.x + HITBOX_INSET, body.pos.y),
            Vec2::new(body.size.x - 2.0 * HITBOX_INSET, body.size.y),
        )
    }

    /// Where jump particles come from
    pub fn feet(&self) -> Vec2 {
        self.pos + Vec2::new(self.size.x / 2.0, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.body_rect().center()
    }

    /// Re-seat the player after a viewport change
    pub fn fit_to(&mut self, viewport: Viewport) {
        let max_x = viewport.max_player_x(self.size.x);
        if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = 0.0;
        }
        let ground = viewport.ground_level();
        if !self.is_airborne() || self.pos.y > ground {
            self.pos.y = ground;
            self.vel.y = 0.0;
        }
    }
}
