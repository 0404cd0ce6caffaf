//! Target selection rules shared by the enemy AI, random-target skills and
//! explicit player choices.
//!
//! - A living taunter that is not untargetable is always chosen.
//! - Untargetable (ghost) units are skipped unless nothing else is alive on
//!   their side.

use rand::RngCore;
use rand::seq::SliceRandom;

use crate::battle::{BattleState, BattleUnit, CombatantId, Side};

/// Picks a default target on `side`.
///
/// Returns `None` only when `side` has no living units.
pub fn default_target(state: &BattleState, side: Side, rng: &mut dyn RngCore) -> Option<CombatantId> {
    let living: Vec<&BattleUnit> = state.living(side).collect();

    let taunters: Vec<CombatantId> = living
        .iter()
        .filter(|u| u.effects.has_taunt() && !u.effects.is_untargetable())
        .map(|u| u.id)
        .collect();
    if let Some(id) = taunters.choose(rng) {
        return Some(*id);
    }

    let visible: Vec<CombatantId> = living
        .iter()
        .filter(|u| !u.effects.is_untargetable())
        .map(|u| u.id)
        .collect();
    if let Some(id) = visible.choose(rng) {
        return Some(*id);
    }

    living.choose(rng).map(|u| u.id)
}

/// Whether `target` may be chosen explicitly by a player.
///
/// Taunt does not bind players; ghosts are off limits unless last alive.
pub fn is_selectable(state: &BattleState, target: CombatantId) -> bool {
    let Some(unit) = state.get(target) else {
        return false;
    };
    if !unit.is_alive() {
        return false;
    }
    !unit.effects.is_untargetable() || state.living(target.side).count() == 1
}
