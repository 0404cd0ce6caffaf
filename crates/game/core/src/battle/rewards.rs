//! Victory rewards.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::encounter::{EncounterMode, EncounterPlan};
use crate::progression::{LevelProgress, PotionSize};
use crate::stats::{GearCategory, GearId, GearPiece, GearSet, StatKind, StatRoll};
use crate::unit::{Unit, UnitId};

/// A gear piece that dropped but has not been minted into a session yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GearDrop {
    pub category: GearCategory,
    pub set: GearSet,
    pub level: u32,
    pub main: StatRoll,
}

impl GearDrop {
    pub fn into_piece(self, id: GearId) -> GearPiece {
        GearPiece::new(id, self.category, self.set, self.main).with_level(self.level)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemDrop {
    Potion(PotionSize),
    Gear(GearDrop),
}

impl core::fmt::Display for ItemDrop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ItemDrop::Potion(size) => write!(f, "{size}"),
            ItemDrop::Gear(gear) => write!(f, "{} {} (Lv.{})", gear.set, gear.category, gear.level),
        }
    }
}

/// Currency and items earned by a won encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRewards {
    /// Experience granted to every team unit, and to the player.
    pub experience: u32,
    pub cash: u64,
    pub gems: u32,
    pub drops: Vec<ItemDrop>,
}

/// What a won encounter hands to the reward sink.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    pub plan: EncounterPlan,
    pub rewards: BattleRewards,
    /// Team units with experience already applied.
    pub units: Vec<Unit>,
    pub level_ups: Vec<(UnitId, LevelProgress)>,
    pub rounds: u32,
}

/// Receives the report of a won encounter.
pub trait RewardSink {
    fn deliver(&mut self, report: &BattleReport);
}

/// Reward formulas. World, stage and floor are 1-based.
pub struct RewardTable;

impl RewardTable {
    pub const FIRST_CLEAR_GEMS: u32 = 20;

    /// # Formula
    ///
    /// ```text
    /// campaign: 50 + 20(world−1) + 10(stage−1) + 10(waves−1)
    /// dungeon:  50 + 10·floor
    /// ```
    pub fn experience(plan: &EncounterPlan) -> u32 {
        match plan.mode {
            EncounterMode::Campaign { world, stage } => {
                50 + 20 * world.saturating_sub(1)
                    + 10 * stage.saturating_sub(1)
                    + 10 * plan.waves.saturating_sub(1)
            }
            EncounterMode::Dungeon { floor } => 50 + 10 * floor,
        }
    }

    /// # Formula
    ///
    /// ```text
    /// campaign: 100 + 50(world−1) + 20(stage−1)
    /// dungeon:  100 + 20·floor
    /// ```
    pub fn cash(plan: &EncounterPlan) -> u64 {
        let cash = match plan.mode {
            EncounterMode::Campaign { world, stage } => {
                100 + 50 * world.saturating_sub(1) + 20 * stage.saturating_sub(1)
            }
            EncounterMode::Dungeon { floor } => 100 + 20 * floor,
        };
        u64::from(cash)
    }

    /// Boss bonus (`10 + 5·world`, dungeon `floor / 2`) plus the first clear bonus.
    pub fn gems(plan: &EncounterPlan) -> u32 {
        let boss = match (plan.boss, plan.mode) {
            (false, _) => 0,
            (true, EncounterMode::Campaign { world, .. }) => 10 + 5 * world,
            (true, EncounterMode::Dungeon { floor }) => floor / 2,
        };
        let first = if plan.first_clear {
            Self::FIRST_CLEAR_GEMS
        } else {
            0
        };
        boss + first
    }

    /// Potions from one cleared wave.
    ///
    /// One roll in 1..=100 is checked against every threshold, so a low roll
    /// can yield several potions.
    pub fn roll_potions(level: u32, rng: &mut dyn RngCore) -> Vec<PotionSize> {
        let roll = rng.gen_range(1..=100u32);
        [
            (PotionSize::Small, (10 + level).min(50)),
            (PotionSize::Medium, (5 + level / 2).min(30)),
            (PotionSize::Large, (2 + level / 4).min(15)),
        ]
        .into_iter()
        .filter(|(_, threshold)| roll <= *threshold)
        .map(|(size, _)| size)
        .collect()
    }

    /// A random piece scaled to the encounter's difficulty.
    pub fn roll_gear(plan: &EncounterPlan, rng: &mut dyn RngCore) -> GearDrop {
        const CATEGORIES: [GearCategory; 3] =
            [GearCategory::Weapon, GearCategory::Armor, GearCategory::Charm];
        const SETS: [GearSet; 8] = [
            GearSet::Vigor,
            GearSet::Fury,
            GearSet::Guard,
            GearSet::Focus,
            GearSet::Shade,
            GearSet::Blade,
            GearSet::Swift,
            GearSet::Carnage,
        ];

        let category = *CATEGORIES.choose(rng).unwrap_or(&GearCategory::Weapon);
        let set = *SETS.choose(rng).unwrap_or(&GearSet::Vigor);
        let main = match category {
            GearCategory::Weapon => StatRoll::percent(StatKind::Attack, rng.gen_range(8..=15)),
            GearCategory::Armor if rng.gen_bool(0.5) => {
                StatRoll::percent(StatKind::Defense, rng.gen_range(8..=15))
            }
            GearCategory::Armor => StatRoll::percent(StatKind::Hp, rng.gen_range(8..=15)),
            GearCategory::Charm => StatRoll::flat(StatKind::CritRate, rng.gen_range(4..=8)),
        };
        let level = 1 + plan.mode.drop_level() / 5;

        GearDrop {
            category,
            set,
            level: level.min(GearPiece::MAX_LEVEL),
            main,
        }
    }

    /// Full reward for a won encounter.
    pub fn compute(plan: &EncounterPlan, waves_cleared: u32, rng: &mut dyn RngCore) -> BattleRewards {
        let mut drops = Vec::new();
        for _ in 0..waves_cleared {
            drops.extend(
                Self::roll_potions(plan.mode.drop_level(), rng)
                    .into_iter()
                    .map(ItemDrop::Potion),
            );
        }
        if plan.boss {
            drops.push(ItemDrop::Gear(Self::roll_gear(plan, rng)));
        }

        BattleRewards {
            experience: Self::experience(plan),
            cash: Self::cash(plan),
            gems: Self::gems(plan),
            drops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn campaign_rewards_grow_with_world_and_stage() {
        let first = EncounterPlan::campaign(1, 1);
        assert_eq!(RewardTable::experience(&first), 70);
        assert_eq!(RewardTable::cash(&first), 100);
        assert_eq!(RewardTable::gems(&first), 0);

        let later = EncounterPlan::campaign(3, 10).with_first_clear(true);
        assert_eq!(RewardTable::experience(&later), 50 + 40 + 90 + 20);
        assert_eq!(RewardTable::cash(&later), 100 + 100 + 180);
        assert_eq!(RewardTable::gems(&later), 25 + 20);
    }

    #[test]
    fn dungeon_rewards_use_floor() {
        let plan = EncounterPlan::dungeon(10);
        assert_eq!(RewardTable::experience(&plan), 150);
        assert_eq!(RewardTable::cash(&plan), 300);
        assert_eq!(RewardTable::gems(&plan), 5);
    }

    #[test]
    fn only_boss_encounters_drop_gear() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let plain = RewardTable::compute(&EncounterPlan::campaign(1, 3), 3, &mut rng);
        assert!(!plain.drops.iter().any(|d| matches!(d, ItemDrop::Gear(_))));

        let boss = RewardTable::compute(&EncounterPlan::campaign(1, 10), 3, &mut rng);
        assert_eq!(
            boss.drops.iter().filter(|d| matches!(d, ItemDrop::Gear(_))).count(),
            1
        );
    }

    #[test]
    fn potion_thresholds_are_capped() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut large = 0;
        for _ in 0..2_000 {
            let pots = RewardTable::roll_potions(1_000, &mut rng);
            // every large drop implies the medium and small thresholds passed too
            if pots.contains(&PotionSize::Large) {
                large += 1;
                assert_eq!(pots.len(), 3);
            }
        }
        assert!(large > 0 && large < 2_000 * 25 / 100);
    }
}
