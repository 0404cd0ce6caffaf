//! Persistent units and generated enemies.
//!
//! A [`Unit`] is owned by the player and outlives encounters. An
//! [`EnemySpec`] is produced by wave generation and discarded with the
//! encounter. Both are wrapped by `battle::BattleUnit` while fighting.

mod enemy;
mod species;

pub use enemy::EnemySpec;
pub use species::{CritGrowth, Rarity, Species};

use crate::config::BattleConfig;
use crate::progression::{LevelProgress, apply_experience};
use crate::stats::{EffectiveStats, Loadout, StatModel};

/// Session-unique identifier for a player unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u64);

impl core::fmt::Display for UnitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A player-owned combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub uid: UnitId,
    pub species: Species,
    pub level: u32,
    pub exp: u32,
    /// 0 when the species has no skill, otherwise 1..=5.
    pub skill_level: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loadout: Loadout,
}

impl Unit {
    /// A freshly summoned unit: level 1, no experience, skill level 1 if any.
    pub fn summon(uid: UnitId, species: Species) -> Self {
        let skill_level = u8::from(species.skill.is_some());
        Self {
            uid,
            species,
            level: 1,
            exp: 0,
            skill_level,
            loadout: Loadout::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.species.name
    }

    pub fn has_skill(&self) -> bool {
        self.species.skill.is_some() && self.skill_level > 0
    }

    pub fn stats(&self) -> EffectiveStats {
        StatModel::compute(self)
    }

    /// Adds experience and resolves level-ups in place.
    pub fn gain_experience(&mut self, amount: u32) -> LevelProgress {
        let progress = apply_experience(self.level, self.exp, amount);
        self.level = progress.level;
        self.exp = progress.exp;
        progress
    }

    /// Raises the skill level, capped at the maximum. Returns levels applied.
    pub fn raise_skill(&mut self, levels: u8) -> u8 {
        if self.species.skill.is_none() {
            return 0;
        }
        let before = self.skill_level;
        self.skill_level = before
            .saturating_add(levels)
            .min(BattleConfig::MAX_SKILL_LEVEL);
        self.skill_level - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityId;
    use crate::stats::StatBlock;

    fn slender() -> Species {
        Species::new("slender", "Slender", Rarity::Legendary, StatBlock::new(150, 20, 10, 25))
            .with_skill(AbilityId::FacelessTerror)
    }

    #[test]
    fn summon_starts_at_level_one() {
        let unit = Unit::summon(UnitId(4), slender());
        assert_eq!((unit.level, unit.exp, unit.skill_level), (1, 0, 1));
        assert!(unit.has_skill());
    }

    #[test]
    fn skill_level_caps_at_five() {
        let mut unit = Unit::summon(UnitId(4), slender());
        assert_eq!(unit.raise_skill(3), 3);
        assert_eq!(unit.raise_skill(3), 1);
        assert_eq!(unit.skill_level, 5);
    }

    #[test]
    fn skillless_species_never_gain_skill_levels() {
        let zombie = Species::new("zombie", "Zombie", Rarity::Common, StatBlock::new(50, 5, 2, 10));
        let mut unit = Unit::summon(UnitId(1), zombie);
        assert_eq!(unit.raise_skill(2), 0);
        assert!(!unit.has_skill());
    }

    #[test]
    fn experience_updates_level_in_place() {
        let mut unit = Unit::summon(UnitId(4), slender());
        let progress = unit.gain_experience(260);
        assert_eq!(progress.levels_gained, 2);
        assert_eq!((unit.level, unit.exp), (3, 10));
    }
}
