//! Species templates: the static identity every unit and enemy is built from.

use strum::{Display, EnumIter};

use crate::ability::AbilityId;
use crate::passive::PassiveId;
use crate::stats::StatBlock;

/// Rarity tier of a species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Epic and Legendary species are the ones with skills and boss duty.
    pub const fn is_elite(self) -> bool {
        matches!(self, Rarity::Epic | Rarity::Legendary)
    }
}

/// Linear crit-rate growth with a ceiling, for species whose crit rate
/// follows their skill level. Unit level never feeds into it.
///
/// Formula: min(base + per_level × (skill_level − 1), cap)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CritGrowth {
    pub per_level: i32,
    pub cap: i32,
}

impl CritGrowth {
    /// Skill level 0 counts as 1.
    pub fn at_skill_level(&self, base: i32, skill_level: u8) -> i32 {
        let steps = i32::from(skill_level.max(1)) - 1;
        base.saturating_add(self.per_level.saturating_mul(steps))
            .min(self.cap)
    }
}

/// A species template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Species {
    /// Stable key, e.g. `"slender"`.
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub base: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill: Option<AbilityId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_growth: Option<CritGrowth>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Species {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rarity: Rarity,
        base: StatBlock,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity,
            base,
            skill: None,
            passive: None,
            crit_growth: None,
            description: String::new(),
        }
    }

    pub fn with_skill(mut self, skill: AbilityId) -> Self {
        self.skill = Some(skill);
        self
    }

    pub fn with_passive(mut self, passive: PassiveId) -> Self {
        self.passive = Some(passive);
        self
    }
}
