//! Obstacles and items scrolling toward the player
//!
//! Both live in one pool so spawn order is preserved: the last element is
//! always the most recently spawned (and therefore rightmost) entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::platform::Viewport;

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// Ground crate
    Box,
    /// Tall vertical beam
    Laser,
    /// Overhead bar (slide under it)
    Floating,
    /// Score pickup
    CyberChip,
    /// Score penalty pickup
    Malware,
}

impl EntityKind {
    /// Solid obstacle kinds, in spawn-table order
    pub const OBSTACLES: [EntityKind; 3] = [EntityKind::Box, EntityKind::Laser, EntityKind::Floating];

    /// Pickups only touch the score; they never end the run
    pub fn is_pickup(self) -> bool {
        matches!(self, EntityKind::CyberChip | EntityKind::Malware)
    }

    /// Solid obstacles end the run on contact
    pub fn is_solid(self) -> bool {
        !self.is_pickup()
    }

    /// Score change when collected (0 for solids)
    pub fn value(self) -> i64 {
        match self {
            EntityKind::CyberChip => CYBER_CHIP_VALUE,
            EntityKind::Malware => MALWARE_VALUE,
            _ => 0,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            EntityKind::Box => 0xff3333,
            EntityKind::Laser => 0xff0000,
            EntityKind::Floating => 0xff9900,
            EntityKind::CyberChip => 0x00ccff,
            EntityKind::Malware => 0xff00ff,
        }
    }

    /// Fixed size of each kind
    pub fn size(self) -> Vec2 {
        match self {
            EntityKind::Box => Vec2::new(40.0, 40.0),
            EntityKind::Laser => Vec2::new(20.0, 80.0),
            EntityKind::Floating => Vec2::new(60.0, 20.0),
            EntityKind::CyberChip | EntityKind::Malware => Vec2::splat(ITEM_SIZE),
        }
    }

    /// Distance of the top edge above the bottom of the viewport (obstacles only)
    fn rise(self) -> f32 {
        match self {
            EntityKind::Box => 60.0,
            EntityKind::Laser => 110.0,
            EntityKind::Floating => 150.0,
            // Items float between 100 and 160 above the bottom, see `Entity::item`
            EntityKind::CyberChip | EntityKind::Malware => 100.0,
        }
    }
}

/// An obstacle or item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Entity {
    /// Solid obstacle at the right edge of the viewport
    pub fn obstacle(id: u32, kind: EntityKind, viewport: Viewport) -> Self {
        debug_assert!(kind.is_solid());
        Self {
            id,
            kind,
            pos: Vec2::new(viewport.width, viewport.height - kind.rise()),
            size: kind.size(),
        }
    }

    /// Pickup at the right edge; `lift` in `[0, 1)` raises it up to 60px
    pub fn item(id: u32, kind: EntityKind, viewport: Viewport, lift: f32) -> Self {
        debug_assert!(kind.is_pickup());
        Self {
            id,
            kind,
            pos: Vec2::new(viewport.width, viewport.height - kind.rise() - lift * 60.0),
            size: kind.size(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn value(&self) -> i64 {
        self.kind.value()
    }

    pub fn color(&self) -> u32 {
        self.kind.color()
    }

    /// Move left by the current game speed
    pub fn scroll(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    /// True once the entity has fully left the screen
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + OFFSCREEN_MARGIN < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_geometry() {
        let vp = Viewport::new(800.0, 400.0);
        let b = Entity::obstacle(1, EntityKind::Box, vp);
        assert_eq!(b.pos, Vec2::new(800.0, 340.0));
        assert_eq!(b.size, Vec2::new(40.0, 40.0));

        let l = Entity::obstacle(2, EntityKind::Laser, vp);
        assert_eq!(l.pos.y, 290.0);
        assert_eq!(l.size, Vec2::new(20.0, 80.0));

        let f = Entity::obstacle(3, EntityKind::Floating, vp);
        assert_eq!(f.pos.y, 250.0);
        assert_eq!(f.color(), 0xff9900);
    }

    #[test]
    fn test_item_placement_band() {
        let vp = Viewport::new(800.0, 400.0);
        let low = Entity::item(1, EntityKind::CyberChip, vp, 0.0);
        let high = Entity::item(2, EntityKind::Malware, vp, 0.999);
        assert_eq!(low.pos.y, 300.0);
        assert!(high.pos.y > 240.0 && high.pos.y < 241.0);
        assert_eq!(low.value(), 100);
        assert_eq!(high.value(), -200);
    }

    #[test]
    fn test_offscreen_margin() {
        let vp = Viewport::new(800.0, 400.0);
        let mut e = Entity::obstacle(1, EntityKind::Floating, vp);
        e.pos.x = -100.0;
        assert!(!e.is_offscreen());
        e.scroll(0.5);
        assert!(e.is_offscreen());
    }

    #[test]
    fn test_kind_classification() {
        for kind in EntityKind::OBSTACLES {
            assert!(kind.is_solid());
            assert_eq!(kind.value(), 0);
        }
        assert!(EntityKind::CyberChip.is_pickup());
        assert!(EntityKind::Malware.is_pickup());
    }
}
