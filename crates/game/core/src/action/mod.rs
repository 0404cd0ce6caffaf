//! Player and enemy actions.
//!
//! [`ActionResolver`] validates an [`Action`] against the battle state and,
//! only if it is legal, applies it. Skills dispatch through the ability
//! registry; basic attacks run every participant's passive hooks.

mod ai;
mod error;
mod resolver;

pub use ai::{ActionPolicy, EnemyAi};
pub use error::ActionError;
pub use resolver::ActionResolver;

use crate::battle::CombatantId;

/// What a combatant does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Basic attack on an opposing unit.
    Attack { target: CombatantId },
    /// The actor's skill. `target` only for chosen-enemy skills.
    Skill { target: Option<CombatantId> },
    /// Halve incoming attack damage until the actor's next turn.
    Defend,
}

impl Action {
    pub const fn attack(target: CombatantId) -> Self {
        Action::Attack { target }
    }

    pub const fn skill() -> Self {
        Action::Skill { target: None }
    }

    pub const fn skill_on(target: CombatantId) -> Self {
        Action::Skill {
            target: Some(target),
        }
    }
}
