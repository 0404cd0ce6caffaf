use crate::ability::AbilityId;
use crate::passive::PassiveId;
use crate::stats::StatBlock;

use super::{Rarity, Species};

/// A generated adversary with fully scaled stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpec {
    pub name: String,
    pub species_id: String,
    pub rarity: Rarity,
    pub stats: StatBlock,
    pub skill: Option<AbilityId>,
    pub skill_level: u8,
    pub passive: Option<PassiveId>,
    pub boss: bool,
}

impl EnemySpec {
    /// Builds an enemy from a species template and already scaled stats.
    ///
    /// Elite species bring their skill at level 1. Crit growth follows that
    /// skill level, the same way it does for player units.
    pub fn from_species(species: &Species, mut stats: StatBlock) -> Self {
        let skill = species.skill.filter(|_| species.rarity.is_elite());
        let skill_level = u8::from(skill.is_some());
        if let Some(growth) = species.crit_growth {
            stats.crit_rate = growth.at_skill_level(species.base.crit_rate, skill_level);
        }
        Self {
            name: species.name.clone(),
            species_id: species.id.clone(),
            rarity: species.rarity,
            stats,
            skill,
            skill_level,
            passive: species.passive,
            boss: false,
        }
    }

    pub fn as_boss(mut self) -> Self {
        self.boss = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::CritGrowth;

    #[test]
    fn scaled_stats_never_raise_grown_crit() {
        let mut jeff = Species::new(
            "jeff",
            "Jeff the Killer",
            Rarity::Epic,
            StatBlock::new(90, 25, 5, 30).with_crit_rate(30),
        )
        .with_skill(AbilityId::KillerBurst);
        jeff.crit_growth = Some(CritGrowth {
            per_level: 10,
            cap: 80,
        });

        let scaled = StatBlock::new(400, 60, 20, 36).with_crit_rate(75);
        let enemy = EnemySpec::from_species(&jeff, scaled);
        assert_eq!(enemy.skill_level, 1);
        assert_eq!(enemy.stats.crit_rate, 30);
        assert_eq!(enemy.stats.hp, 400);
    }
}
