//! Level scaling - Layer 1 of the stat system.
//!
//! Only HP, attack and defense grow with level. Each has its own per-level
//! growth and a hard multiplier cap so high levels cannot overflow combat math.
//!
//! Formulas (percent arithmetic, truncating):
//! - multiplier = min(100 + per_level × (level − 1), cap)
//! - scaled     = base × multiplier / 100

use super::block::{StatBlock, StatKind};

/// Per-stat growth curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelScaling {
    /// Percent gained per level above 1.
    pub per_level: i32,
    /// Highest multiplier in percent.
    pub cap: i32,
}

impl LevelScaling {
    pub const HP: Self = Self {
        per_level: 4,
        cap: 250,
    };
    pub const ATTACK: Self = Self {
        per_level: 3,
        cap: 500,
    };
    pub const DEFENSE: Self = Self {
        per_level: 3,
        cap: 400,
    };

    /// Growth curve for a stat, `None` when the stat ignores level.
    pub const fn for_stat(stat: StatKind) -> Option<Self> {
        match stat {
            StatKind::Hp => Some(Self::HP),
            StatKind::Attack => Some(Self::ATTACK),
            StatKind::Defense => Some(Self::DEFENSE),
            _ => None,
        }
    }

    /// Multiplier in percent at the given level.
    pub fn multiplier(&self, level: u32) -> i32 {
        let steps = i64::from(level.max(1) - 1);
        let raw = 100 + i64::from(self.per_level) * steps;
        raw.min(i64::from(self.cap)) as i32
    }

    pub fn apply(&self, base: i32, level: u32) -> i32 {
        (i64::from(base) * i64::from(self.multiplier(level)) / 100) as i32
    }
}

/// Scales a species block to a unit level.
pub fn scale_to_level(base: &StatBlock, level: u32) -> StatBlock {
    let mut scaled = *base;
    for stat in [StatKind::Hp, StatKind::Attack, StatKind::Defense] {
        if let Some(curve) = LevelScaling::for_stat(stat) {
            scaled.set(stat, curve.apply(base.get(stat), level));
        }
    }
    scaled
}
