//! Strike resolution.

use rand::RngCore;

use super::damage::{apply_defending, calculate_damage};
use super::hit::{check_crit, check_hit};
use crate::battle::{BattleUnit, StrikeOutcome};
use crate::config::BattleConfig;

/// How a strike is rolled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrikeMode {
    /// Skip the hit roll.
    pub sure_hit: bool,
    /// Skip the crit roll and crit.
    pub forced_crit: bool,
}

impl StrikeMode {
    pub const BASIC: Self = Self {
        sure_hit: false,
        forced_crit: false,
    };

    pub const FORCED_CRIT: Self = Self {
        sure_hit: true,
        forced_crit: true,
    };
}

/// Resolve one strike from `attacker` on `defender` without mutating either.
///
/// # Arguments
///
/// * `attacker` - Striking combatant, read through its effective stats
/// * `defender` - Struck combatant; its `defending` flag halves damage
/// * `mode` - Roll overrides for skills
/// * `config` - Crit rule and minimum hit chance
///
/// # Returns
///
/// [`StrikeOutcome::Missed`] or the damage to apply, never below 1.
pub fn resolve_strike(
    attacker: &BattleUnit,
    defender: &BattleUnit,
    mode: StrikeMode,
    config: &BattleConfig,
    rng: &mut dyn RngCore,
) -> StrikeOutcome {
    // 1. Hit roll
    if !mode.sure_hit
        && !check_hit(
            rng,
            attacker.effective_accuracy(),
            defender.effective_evasion(),
            config.min_hit_chance,
        )
    {
        return StrikeOutcome::Missed;
    }

    // 2. Crit roll
    let critical = mode.forced_crit || check_crit(rng, attacker.effective_crit_rate());

    // 3. Damage
    let raw = calculate_damage(
        attacker.effective_attack(),
        defender.effective_defense(),
        attacker.effective_crit_damage(),
        critical,
        config.crit_rule,
    );

    StrikeOutcome::Hit {
        damage: apply_defending(raw, defender.defending),
        critical,
        defended: defender.defending,
    }
}
