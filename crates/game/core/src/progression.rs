//! Experience curves and level-up math.
//!
//! Everything here is a pure function of its inputs. A unit's `(level, exp)`
//! pair depends only on the total experience it has received since level 1,
//! never on whether that experience came from battles, fodder or potions, or
//! how it was split.

use strum::{Display, EnumIter};

use crate::unit::Rarity;

/// Premium currency granted per account level-up.
pub const GEMS_PER_PLAYER_LEVEL: u32 = 20;

/// Experience required to advance from `level` to `level + 1`.
///
/// Formula: 100 + (level − 1) × 50
pub const fn xp_needed(level: u32) -> u32 {
    let level = if level == 0 { 1 } else { level };
    100 + (level - 1) * 50
}

/// Result of feeding experience into the level-up loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelProgress {
    pub level: u32,
    pub exp: u32,
    pub levels_gained: u32,
}

/// Adds `gain` to `(level, exp)` and resolves level-ups.
///
/// Repeatedly subtracts the current level's requirement while the remaining
/// experience still covers it.
pub fn apply_experience(level: u32, exp: u32, gain: u32) -> LevelProgress {
    let mut level = level.max(1);
    let mut remaining = u64::from(exp) + u64::from(gain);
    let mut levels_gained = 0;

    while remaining >= u64::from(xp_needed(level)) {
        remaining -= u64::from(xp_needed(level));
        level += 1;
        levels_gained += 1;
    }

    LevelProgress {
        level,
        exp: remaining as u32,
        levels_gained,
    }
}

/// Total experience a unit at `(level, exp)` has received since level 1.
pub fn lifetime_experience(level: u32, exp: u32) -> u64 {
    (1..level.max(1)).map(|l| u64::from(xp_needed(l))).sum::<u64>() + u64::from(exp)
}

/// Consumable experience potions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PotionSize {
    #[strum(serialize = "Small XP Pot")]
    Small,
    #[strum(serialize = "Medium XP Pot")]
    Medium,
    #[strum(serialize = "Large XP Pot")]
    Large,
}

impl PotionSize {
    pub const fn experience(self) -> u32 {
        match self {
            PotionSize::Small => 10,
            PotionSize::Medium => 20,
            PotionSize::Large => 50,
        }
    }
}

/// Experience granted by sacrificing a unit of the given rarity.
pub const fn fodder_value(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 10,
        Rarity::Rare => 30,
        Rarity::Epic => 100,
        Rarity::Legendary => 300,
    }
}

/// Cash cost of a fodder upgrade.
///
/// Formula: 100 + 50 × base_level + Σ(50 + fodder_value)
pub fn fodder_upgrade_cost(base_level: u32, fodder: &[Rarity]) -> u64 {
    let per_fodder: u64 = fodder
        .iter()
        .map(|r| 50 + u64::from(fodder_value(*r)))
        .sum();
    100 + 50 * u64::from(base_level) + per_fodder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_grows_by_fifty_per_level() {
        assert_eq!(xp_needed(1), 100);
        assert_eq!(xp_needed(2), 150);
        assert_eq!(xp_needed(10), 550);
    }

    #[test]
    fn exact_requirement_levels_up_with_zero_left() {
        let progress = apply_experience(1, 0, 100);
        assert_eq!(progress, LevelProgress { level: 2, exp: 0, levels_gained: 1 });
    }

    #[test]
    fn multiple_levels_resolve_in_one_call() {
        // 100 + 150 + 200 = 450 → level 4 with 10 left over.
        let progress = apply_experience(1, 0, 460);
        assert_eq!(progress.level, 4);
        assert_eq!(progress.exp, 10);
        assert_eq!(progress.levels_gained, 3);
    }

    #[test]
    fn split_gains_match_a_single_gain() {
        let single = apply_experience(1, 0, 1_337);

        // battle reward, then fodder, then potions
        let a = apply_experience(1, 0, 95);
        let b = apply_experience(a.level, a.exp, 300 + 30);
        let c = apply_experience(b.level, b.exp, 1_337 - 95 - 330);

        assert_eq!((single.level, single.exp), (c.level, c.exp));
        assert_eq!(lifetime_experience(c.level, c.exp), 1_337);
    }

    #[test]
    fn fodder_cost_matches_table() {
        let cost = fodder_upgrade_cost(3, &[Rarity::Common, Rarity::Epic]);
        assert_eq!(cost, 100 + 150 + 60 + 150);
    }
}
