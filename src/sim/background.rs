//! Parallax backdrop
//!
//! Two layers scrolling at fractions of the game speed. Elements are never
//! destroyed: once off the left edge they are moved back past the right edge
//! with a fresh size and colour.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{FAR_LAYER_FACTOR, NEAR_LAYER_FACTOR};
use crate::platform::Viewport;

const FAR_COUNT: usize = 15;
const FAR_SPACING: f32 = 100.0;
const NEAR_COUNT: usize = 10;
const NEON_COLORS: [u32; 3] = [0x00ffff, 0xff00ff, 0xffff00];

/// Which layer an element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerDepth {
    /// Buildings
    Far,
    /// Neon specks
    Near,
}

impl LayerDepth {
    /// Scroll speed as a fraction of game speed
    pub fn factor(self) -> f32 {
        match self {
            LayerDepth::Far => FAR_LAYER_FACTOR,
            LayerDepth::Near => NEAR_LAYER_FACTOR,
        }
    }
}

/// One backdrop element
///
/// Buildings are rectangles anchored at their top-left corner; neon specks are
/// circles centred on `pos` with radius `size.x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackdropElement {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundLayer {
    pub depth: LayerDepth,
    pub elements: Vec<BackdropElement>,
}

impl BackgroundLayer {
    fn generate<R: Rng>(depth: LayerDepth, viewport: Viewport, rng: &mut R) -> Self {
        let elements = match depth {
            LayerDepth::Far => (0..FAR_COUNT)
                .map(|i| {
                    let width = 60.0 + rng.random::<f32>() * 60.0;
                    let height = 200.0 + rng.random::<f32>() * 200.0;
                    BackdropElement {
                        pos: Vec2::new(i as f32 * FAR_SPACING, viewport.height - height),
                        size: Vec2::new(width, height),
                        color: building_color(rng),
                    }
                })
                .collect(),
            LayerDepth::Near => (0..NEAR_COUNT)
                .map(|_| BackdropElement {
                    pos: Vec2::new(
                        rng.random::<f32>() * viewport.width * 2.0,
                        rng.random::<f32>() * (viewport.height - 100.0).max(0.0),
                    ),
                    size: Vec2::splat(neon_radius(rng)),
                    color: neon_color(rng),
                })
                .collect(),
        };
        Self { depth, elements }
    }

    /// Scroll by this layer's share of `game_speed` and recycle what left the screen
    pub fn update<R: Rng>(&mut self, game_speed: f32, viewport: Viewport, rng: &mut R) {
        let dx = game_speed * self.depth.factor();
        for el in &mut self.elements {
            el.pos.x -= dx;
            match self.depth {
                LayerDepth::Far if el.pos.x + el.size.x < 0.0 => {
                    let height = 150.0 + rng.random::<f32>() * 200.0;
                    el.pos = Vec2::new(
                        viewport.width + rng.random::<f32>() * 100.0,
                        viewport.height - height,
                    );
                    el.size.y = height;
                    el.color = building_color(rng);
                }
                LayerDepth::Near if el.pos.x < 0.0 => {
                    el.pos.x = viewport.width + rng.random::<f32>() * 200.0;
                    el.size = Vec2::splat(neon_radius(rng));
                    el.color = neon_color(rng);
                }
                _ => {}
            }
        }
    }
}

/// Both parallax layers, far first (draw order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub far: BackgroundLayer,
    pub near: BackgroundLayer,
}

impl Background {
    pub fn generate<R: Rng>(viewport: Viewport, rng: &mut R) -> Self {
        Self {
            far: BackgroundLayer::generate(LayerDepth::Far, viewport, rng),
            near: BackgroundLayer::generate(LayerDepth::Near, viewport, rng),
        }
    }

    pub fn update<R: Rng>(&mut self, game_speed: f32, viewport: Viewport, rng: &mut R) {
        self.far.update(game_speed, viewport, rng);
        self.near.update(game_speed, viewport, rng);
    }

    pub fn layers(&self) -> [&BackgroundLayer; 2] {
        [&self.far, &self.near]
    }
}

fn neon_radius<R: Rng>(rng: &mut R) -> f32 {
    2.0 + rng.random::<f32>() * 4.0
}

fn neon_color<R: Rng>(rng: &mut R) -> u32 {
    NEON_COLORS[rng.random_range(0..NEON_COLORS.len())]
}

/// Dark blue-grey: hue 200..240, saturation 40%, lightness 10..25%
fn building_color<R: Rng>(rng: &mut R) -> u32 {
    let hue = 200.0 + rng.random::<f32>() * 40.0;
    let lightness = 0.10 + rng.random::<f32>() * 0.15;
    hsl_to_rgb(hue, 0.4, lightness)
}

/// HSL (hue in degrees, s/l in 0..1) to 0xRRGGBB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> u32 {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let channel = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}
