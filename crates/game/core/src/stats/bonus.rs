//! Gear bonus accumulation.
//!
//! Every stat resolves the same way:
//!
//! ```text
//! clamp((base + Σflat) × (100 + Σpercent) / 100, bounds)
//! ```
//!
//! Main stats, substats and active set bonuses all land in the same pool, so
//! the order pieces were equipped in never changes the result.

use super::gear::{RollKind, StatRoll};

/// Running flat and percent totals for one stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GearBonus {
    pub flat: i32,
    /// Summed, never compounded (two +50% rolls are +100%).
    pub percent: i32,
}

impl GearBonus {
    pub const fn new(flat: i32, percent: i32) -> Self {
        Self { flat, percent }
    }

    pub fn is_empty(&self) -> bool {
        self.flat == 0 && self.percent == 0
    }

    pub fn add(&mut self, kind: RollKind, value: i32) {
        match kind {
            RollKind::Flat => self.flat = self.flat.saturating_add(value),
            RollKind::Percent => self.percent = self.percent.saturating_add(value),
        }
    }

    pub fn add_roll(&mut self, roll: &StatRoll) {
        self.add(roll.kind, roll.value);
    }

    /// # Formula
    ///
    /// ```text
    /// clamp((base + flat) × max(0, 100 + percent) / 100, min, max)
    /// ```
    pub fn apply(&self, base: i32, bounds: StatBounds) -> i32 {
        let raised = i64::from(base) + i64::from(self.flat);
        let scale = (100 + i64::from(self.percent)).max(0);
        (raised * scale / 100).clamp(i64::from(bounds.min), i64::from(bounds.max)) as i32
    }
}

/// Legal range of one stat after gear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// A living unit never has a zero maximum.
    pub const HP: Self = Self {
        min: 1,
        max: 999_999,
    };

    pub const COMBAT: Self = Self { min: 0, max: 99_999 };

    /// Crit rate, accuracy and evasion.
    pub const PERCENT: Self = Self { min: 0, max: 100 };

    /// Crit damage multiplier, in percent.
    pub const CRIT_DAMAGE: Self = Self {
        min: 100,
        max: 1000,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKind;

    const WIDE: StatBounds = StatBounds {
        min: 0,
        max: 10_000,
    };

    #[test]
    fn flat_lands_before_percent() {
        let bonus = GearBonus::new(20, 50);
        assert_eq!(bonus.apply(80, WIDE), 150);
    }

    #[test]
    fn percent_rolls_add_up() {
        let mut bonus = GearBonus::default();
        bonus.add_roll(&StatRoll::percent(StatKind::Attack, 50));
        bonus.add_roll(&StatRoll::percent(StatKind::Attack, 50));
        assert_eq!(bonus, GearBonus::new(0, 100));
        assert_eq!(bonus.apply(100, WIDE), 200);
    }

    #[test]
    fn results_stay_within_bounds() {
        let bonus = GearBonus::new(-500, -300);
        assert_eq!(bonus.apply(10, WIDE), 0);
        assert_eq!(bonus.apply(10, StatBounds::HP), 1);
        assert_eq!(GearBonus::new(0, 900).apply(50, StatBounds::PERCENT), 100);
    }
}
