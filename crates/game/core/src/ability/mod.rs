//! Active skills.
//!
//! Every skill is a small [`Ability`] implementation registered under its
//! [`AbilityId`]. Cost and target rule are fixed per ability; skill level
//! (1..=5) scales magnitudes linearly and unlocks bonus clauses at 3 and 5.

mod context;
mod hex;
mod offense;
mod support;

use std::collections::BTreeMap;

use strum::{Display, EnumIter, IntoEnumIterator};

pub use context::SkillContext;
pub use hex::{AnalogDistortion, FacelessTerror, MothmansOmen};
pub use offense::{BloodySmile, KillerBurst, NightAmbush};
pub use support::{IndestructibleRegeneration, JoyfulRegeneration, MirrorCurse};

use crate::battle::BattleEvent;

/// Skill identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AbilityId {
    #[strum(serialize = "Joyful Regeneration")]
    JoyfulRegeneration,
    #[strum(serialize = "Killer Burst")]
    KillerBurst,
    #[strum(serialize = "Bloody Smile")]
    BloodySmile,
    #[strum(serialize = "Mothman's Omen")]
    MothmansOmen,
    #[strum(serialize = "Mirror Curse")]
    MirrorCurse,
    #[strum(serialize = "Night Ambush")]
    NightAmbush,
    #[strum(serialize = "Faceless Terror")]
    FacelessTerror,
    #[strum(serialize = "Analog Distortion")]
    AnalogDistortion,
    #[strum(serialize = "Indestructible Regeneration")]
    IndestructibleRegeneration,
}

/// Who a skill lands on. Fixed per ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRule {
    SelfOnly,
    AllAllies,
    AllEnemies,
    /// The caller names one living, selectable enemy.
    ChosenEnemy,
    /// The skill picks enemies itself using default targeting.
    RandomEnemy,
}

impl TargetRule {
    pub const fn requires_target(self) -> bool {
        matches!(self, TargetRule::ChosenEnemy)
    }
}

/// A skill implementation.
pub trait Ability: Send + Sync {
    fn id(&self) -> AbilityId;

    /// SP spent on use. Independent of skill level.
    fn cost(&self) -> u32;

    fn target(&self) -> TargetRule;

    /// Applies the skill. Cost has already been paid and the target validated.
    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent>;
}

/// Lookup table from id to implementation.
pub struct AbilityRegistry {
    abilities: BTreeMap<AbilityId, Box<dyn Ability>>,
}

impl AbilityRegistry {
    pub fn empty() -> Self {
        Self {
            abilities: BTreeMap::new(),
        }
    }

    /// Every built-in skill.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(JoyfulRegeneration));
        registry.register(Box::new(KillerBurst));
        registry.register(Box::new(BloodySmile));
        registry.register(Box::new(MothmansOmen));
        registry.register(Box::new(MirrorCurse));
        registry.register(Box::new(NightAmbush));
        registry.register(Box::new(FacelessTerror));
        registry.register(Box::new(AnalogDistortion));
        registry.register(Box::new(IndestructibleRegeneration));
        registry
    }

    pub fn register(&mut self, ability: Box<dyn Ability>) {
        self.abilities.insert(ability.id(), ability);
    }

    pub fn get(&self, id: AbilityId) -> Option<&dyn Ability> {
        self.abilities.get(&id).map(|a| a.as_ref())
    }

    /// Ids without an implementation.
    pub fn missing(&self) -> Vec<AbilityId> {
        AbilityId::iter()
            .filter(|id| !self.abilities.contains_key(id))
            .collect()
    }
}

impl Default for AbilityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl core::fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.abilities.keys()).finish()
    }
}
