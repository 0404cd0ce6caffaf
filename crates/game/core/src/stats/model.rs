//! Effective stats - Layer 2 of the stat system.
//!
//! `StatModel::compute` turns a persistent [`Unit`] into the numbers combat
//! uses. It never looks at battle state; temporary buffs are folded in later
//! by the effect ledger.
//!
//! ```text
//! species base → level scaling → gear flat pass → gear % pass → clamp
//!                                   ↑ set bonuses join both pools
//! ```

use strum::IntoEnumIterator;

use super::block::{StatBlock, StatKind};
use super::bonus::GearBonus;
use super::gear::{GearSet, Loadout, StatRoll};
use super::scaling::scale_to_level;
use crate::unit::Unit;

/// Per-stat gear totals collected from pieces and sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatBonuses {
    totals: [GearBonus; 8],
}

impl StatBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_roll(&mut self, roll: StatRoll) {
        self.totals[roll.stat as usize].add_roll(&roll);
    }

    pub fn get(&self, stat: StatKind) -> GearBonus {
        self.totals[stat as usize]
    }

    /// Collects every scaled roll of the loadout plus active set bonuses.
    pub fn from_loadout(loadout: &Loadout) -> (Self, Vec<GearSet>) {
        let mut bonuses = Self::new();
        for piece in loadout.pieces() {
            for roll in piece.scaled_rolls() {
                bonuses.add_roll(roll);
            }
        }
        let sets = loadout.active_sets();
        for set in &sets {
            bonuses.add_roll(set.definition().bonus);
        }
        (bonuses, sets)
    }
}

/// How one stat was assembled, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatLine {
    pub stat: StatKind,
    /// Value after level scaling, before gear.
    pub base: i32,
    pub flat: i32,
    pub percent: i32,
    pub total: i32,
}

/// Flat vs. percent contributions and active set names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBreakdown {
    pub lines: Vec<StatLine>,
    pub active_sets: Vec<GearSet>,
}

impl StatBreakdown {
    pub fn line(&self, stat: StatKind) -> Option<&StatLine> {
        self.lines.iter().find(|l| l.stat == stat)
    }
}

/// Final resolved combat stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub values: StatBlock,
    pub breakdown: StatBreakdown,
}

impl EffectiveStats {
    pub fn get(&self, stat: StatKind) -> i32 {
        self.values.get(stat)
    }

    /// Wraps an already-scaled block (generated enemies) with an empty breakdown.
    pub fn from_block(block: &StatBlock) -> Self {
        Self::resolve(block, &StatBonuses::new())
    }

    fn resolve(base: &StatBlock, bonuses: &StatBonuses) -> Self {
        let mut values = *base;
        let lines = StatKind::iter()
            .map(|stat| {
                let bonus = bonuses.get(stat);
                let total = bonus.apply(base.get(stat), stat.bounds());
                values.set(stat, total);
                StatLine {
                    stat,
                    base: base.get(stat),
                    flat: bonus.flat,
                    percent: bonus.percent,
                    total,
                }
            })
            .collect();

        Self {
            values,
            breakdown: StatBreakdown {
                lines,
                active_sets: Vec::new(),
            },
        }
    }
}

/// Computes a unit's effective combat stats.
pub struct StatModel;

impl StatModel {
    /// Resolves species base, level, crit growth, gear and sets into final stats.
    pub fn compute(unit: &Unit) -> EffectiveStats {
        let mut base = scale_to_level(&unit.species.base, unit.level);
        if let Some(growth) = unit.species.crit_growth {
            let base_crit = unit.species.base.crit_rate;
            base.crit_rate = growth.at_skill_level(base_crit, unit.skill_level);
        }

        let (bonuses, sets) = StatBonuses::from_loadout(&unit.loadout);
        let mut stats = EffectiveStats::resolve(&base, &bonuses);
        stats.breakdown.active_sets = sets;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityId;
    use crate::stats::gear::{GearCategory, GearId, GearPiece, GearSlot};
    use crate::unit::{CritGrowth, Rarity, Species, Unit, UnitId};

    fn species(base: StatBlock) -> Species {
        Species::new("test", "Test Subject", Rarity::Rare, base)
    }

    #[test]
    fn unequipped_level_one_unit_matches_species() {
        let unit = Unit::summon(UnitId(1), species(StatBlock::new(90, 25, 5, 30)));
        let stats = StatModel::compute(&unit);
        assert_eq!(stats.values, StatBlock::new(90, 25, 5, 30));
        assert!(stats.breakdown.active_sets.is_empty());
    }

    #[test]
    fn flat_pass_runs_before_percent_pass() {
        let mut unit = Unit::summon(UnitId(1), species(StatBlock::new(100, 80, 10, 20)));
        let weapon = GearPiece::new(
            GearId(1),
            GearCategory::Weapon,
            GearSet::Blade,
            StatRoll::flat(StatKind::Attack, 20),
        )
        .with_secondary(StatRoll::percent(StatKind::Attack, 50));
        unit.loadout.equip(GearSlot::Weapon, weapon).unwrap();

        let stats = StatModel::compute(&unit);
        assert_eq!(stats.values.attack, 150);
        let line = stats.breakdown.line(StatKind::Attack).unwrap();
        assert_eq!((line.base, line.flat, line.percent), (80, 20, 50));
    }

    #[test]
    fn active_sets_feed_bonus_pools() {
        let mut unit = Unit::summon(UnitId(1), species(StatBlock::new(100, 10, 100, 20)));
        for (id, slot, category) in [
            (1, GearSlot::Armor, GearCategory::Armor),
            (2, GearSlot::RelicI, GearCategory::Charm),
        ] {
            let piece = GearPiece::new(
                GearId(id),
                category,
                GearSet::Guard,
                StatRoll::flat(StatKind::Hp, 0),
            );
            unit.loadout.equip(slot, piece).unwrap();
        }

        let stats = StatModel::compute(&unit);
        assert_eq!(stats.values.defense, 115);
        assert_eq!(stats.breakdown.active_sets, vec![GearSet::Guard]);
    }

    #[test]
    fn crit_rate_is_clamped_to_percent_range() {
        let mut unit = Unit::summon(UnitId(1), species(StatBlock::new(100, 10, 10, 20).with_crit_rate(70)));
        let charm = GearPiece::new(
            GearId(3),
            GearCategory::Charm,
            GearSet::Blade,
            StatRoll::flat(StatKind::CritRate, 60),
        );
        unit.loadout.equip(GearSlot::Charm, charm).unwrap();

        assert_eq!(StatModel::compute(&unit).values.crit_rate, 100);
    }

    fn jeff() -> Species {
        let mut jeff = species(StatBlock::new(90, 25, 5, 30).with_crit_rate(30))
            .with_skill(AbilityId::KillerBurst);
        jeff.crit_growth = Some(CritGrowth {
            per_level: 10,
            cap: 80,
        });
        jeff
    }

    #[test]
    fn crit_growth_follows_skill_level_with_cap() {
        let mut unit = Unit::summon(UnitId(1), jeff());
        assert_eq!(StatModel::compute(&unit).values.crit_rate, 30);
        unit.skill_level = 3;
        assert_eq!(StatModel::compute(&unit).values.crit_rate, 50);
        unit.skill_level = 5;
        assert_eq!(StatModel::compute(&unit).values.crit_rate, 70);

        let mut capped = jeff();
        capped.crit_growth = Some(CritGrowth {
            per_level: 20,
            cap: 80,
        });
        let mut unit = Unit::summon(UnitId(2), capped);
        unit.skill_level = 5;
        assert_eq!(StatModel::compute(&unit).values.crit_rate, 80);
    }

    #[test]
    fn unit_level_leaves_crit_rate_alone() {
        let mut unit = Unit::summon(UnitId(1), jeff());
        unit.level = 30;
        unit.skill_level = 1;
        assert_eq!(StatModel::compute(&unit).values.crit_rate, 30);

        let mut skillless = jeff();
        skillless.skill = None;
        let mut unit = Unit::summon(UnitId(2), skillless);
        unit.level = 5;
        assert_eq!(unit.skill_level, 0);
        assert_eq!(StatModel::compute(&unit).values.crit_rate, 30);
    }
}
