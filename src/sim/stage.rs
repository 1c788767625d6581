//! Per-stage tuning table
//!
//! Five stages with strictly increasing targets. Spawn probabilities are
//! per-tick chances evaluated whenever the spawn gate is open.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use crate::consts::{BASE_SPEED, SPEED_PER_STAGE};
use crate::error::{Error, Result};

/// Immutable tuning record for one stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageConfig {
    /// Score at which the stage is cleared
    pub target_score: i64,
    /// Per-tick chance of emitting an obstacle when the spawn gate is open
    pub obstacle_chance: f32,
    /// Per-tick chance of emitting an item (only if no obstacle was emitted)
    pub item_chance: f32,
    /// Every item kind available on this stage (this stage's and all earlier unlocks)
    pub unlocked_items: &'static [EntityKind],
}

impl StageConfig {
    pub fn unlocks(&self, kind: EntityKind) -> bool {
        self.unlocked_items.contains(&kind)
    }
}

const CHIP: &[EntityKind] = &[EntityKind::CyberChip];
const CHIP_AND_MALWARE: &[EntityKind] = &[EntityKind::CyberChip, EntityKind::Malware];

/// Stage table, indexed by `stage - 1`
pub const STAGES: [StageConfig; 5] = [
    StageConfig {
        target_score: 200,
        obstacle_chance: 0.015,
        item_chance: 0.0,
        unlocked_items: &[],
    },
    StageConfig {
        target_score: 500,
        obstacle_chance: 0.02,
        item_chance: 0.01,
        unlocked_items: CHIP,
    },
    StageConfig {
        target_score: 1000,
        obstacle_chance: 0.025,
        item_chance: 0.015,
        unlocked_items: CHIP_AND_MALWARE,
    },
    StageConfig {
        target_score: 1500,
        obstacle_chance: 0.03,
        item_chance: 0.02,
        unlocked_items: CHIP_AND_MALWARE,
    },
    StageConfig {
        target_score: 2000,
        obstacle_chance: 0.035,
        item_chance: 0.025,
        unlocked_items: CHIP_AND_MALWARE,
    },
];

/// A validated stage number in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StageNumber(u8);

impl StageNumber {
    pub const FIRST: StageNumber = StageNumber(1);
    pub const LAST: StageNumber = StageNumber(STAGES.len() as u8);

    pub fn new(stage: u8) -> Result<Self> {
        if (1..=Self::LAST.0).contains(&stage) {
            Ok(Self(stage))
        } else {
            Err(Error::InvalidStage(stage))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Following stage, or `None` on the final stage
    pub fn next(self) -> Option<Self> {
        if self.is_final() {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    pub fn is_final(self) -> bool {
        self == Self::LAST
    }

    pub fn config(self) -> &'static StageConfig {
        &STAGES[usize::from(self.0 - 1)]
    }

    /// Scroll speed for this stage
    pub fn game_speed(self) -> f32 {
        BASE_SPEED + SPEED_PER_STAGE * f32::from(self.0)
    }
}

impl TryFrom<u8> for StageNumber {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<StageNumber> for u8 {
    fn from(stage: StageNumber) -> u8 {
        stage.0
    }
}

impl fmt::Display for StageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_strictly_increase() {
        for pair in STAGES.windows(2) {
            assert!(pair[0].target_score < pair[1].target_score);
        }
    }

    #[test]
    fn test_stage_number_bounds() {
        assert!(StageNumber::new(0).is_err());
        assert!(StageNumber::new(6).is_err());
        assert!(matches!(StageNumber::new(9), Err(Error::InvalidStage(9))));
        assert_eq!(StageNumber::new(5).unwrap(), StageNumber::LAST);
        assert_eq!(StageNumber::FIRST.next().map(u8::from), Some(2));
        assert_eq!(StageNumber::LAST.next(), None);
    }

    #[test]
    fn test_unlocks_are_cumulative() {
        let stage = |n| StageNumber::new(n).unwrap().config();
        assert!(stage(1).unlocked_items.is_empty());
        assert!(stage(2).unlocks(EntityKind::CyberChip));
        assert!(!stage(2).unlocks(EntityKind::Malware));
        for n in 3..=5 {
            assert!(stage(n).unlocks(EntityKind::CyberChip));
            assert!(stage(n).unlocks(EntityKind::Malware));
        }
        // Each stage keeps everything the previous one had
        for pair in STAGES.windows(2) {
            for kind in pair[0].unlocked_items {
                assert!(pair[1].unlocks(*kind));
            }
        }
    }

    #[test]
    fn test_game_speed_increases_with_stage() {
        assert_eq!(StageNumber::FIRST.game_speed(), 4.5);
        assert_eq!(StageNumber::LAST.game_speed(), 6.5);
    }

    #[test]
    fn test_stage_number_serde() {
        let stage: StageNumber = serde_json::from_str("3").unwrap();
        assert_eq!(stage.get(), 3);
        assert!(serde_json::from_str::<StageNumber>("7").is_err());
        assert_eq!(serde_json::to_string(&stage).unwrap(), "3");
    }
}
