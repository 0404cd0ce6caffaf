//! Debuff skills.

use super::{Ability, AbilityId, SkillContext, TargetRule};
use crate::battle::BattleEvent;
use crate::effects::StatusEffect;
use crate::stats::StatKind;

// ============================================================================
// Mothman
// ============================================================================

/// Weakens and blinds every enemy.
///
/// ```text
/// ATK        −(15 + 8·lv)%, 2 + lv turns
/// ACC        −10·lv, same duration
/// lv ≥ 3     SPD −30%, same duration
/// lv 5       drain 20 SP from each enemy
/// ```
pub struct MothmansOmen;

impl Ability for MothmansOmen {
    fn id(&self) -> AbilityId {
        AbilityId::MothmansOmen
    }

    fn cost(&self) -> u32 {
        30
    }

    fn target(&self) -> TargetRule {
        TargetRule::AllEnemies
    }

    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent> {
        let lv = ctx.lv();
        let turns = (2 + lv) as u32;
        let source = ctx.actor_name();

        for enemy in ctx.enemies() {
            ctx.apply(enemy, StatusEffect::debuff(StatKind::Attack, 15 + 8 * lv, turns, &source));
            ctx.apply(enemy, StatusEffect::flat_debuff(StatKind::Accuracy, 10 * lv, turns, &source));
            if ctx.level >= 3 {
                ctx.apply(enemy, StatusEffect::debuff(StatKind::Speed, 30, turns, &source));
            }
            if ctx.level >= 5 {
                ctx.drain_sp(enemy, 20);
            }
        }
        ctx.finish()
    }
}

// ============================================================================
// Slender
// ============================================================================

/// Unavoidable terror: heavy debuffs and Eight Pages stacks on every enemy.
///
/// ```text
/// ATK, DEF   −(20 + 8·lv)%, 4 turns (never misses)
/// pages      lv stacks per enemy
/// lv ≥ 3     enemies holding 4+ pages lose 20 SP
/// lv 5       party ATK +15%, 3 turns
/// ```
pub struct FacelessTerror;

impl FacelessTerror {
    const SP_DRAIN_PAGES: u32 = 4;
}

impl Ability for FacelessTerror {
    fn id(&self) -> AbilityId {
        AbilityId::FacelessTerror
    }

    fn cost(&self) -> u32 {
        45
    }

    fn target(&self) -> TargetRule {
        TargetRule::AllEnemies
    }

    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent> {
        let lv = ctx.lv();
        let source = ctx.actor_name();

        for enemy in ctx.enemies() {
            ctx.apply(enemy, StatusEffect::debuff(StatKind::Attack, 20 + 8 * lv, 4, &source));
            ctx.apply(enemy, StatusEffect::debuff(StatKind::Defense, 20 + 8 * lv, 4, &source));
            ctx.apply(enemy, StatusEffect::page(&source).with_stacks(lv as u32));
            if ctx.level >= 3 && ctx.page_stacks(enemy) >= Self::SP_DRAIN_PAGES {
                ctx.drain_sp(enemy, 20);
            }
        }

        if ctx.level >= 5 {
            for ally in ctx.allies() {
                ctx.apply(ally, StatusEffect::buff(StatKind::Attack, 15, 3, &source));
            }
        }
        ctx.finish()
    }
}

// ============================================================================
// Iris
// ============================================================================

/// Shreds defense, burns a slice of max HP and feeds the party SP.
///
/// ```text
/// DEF        −(30 + 15·lv)%, 4 turns
/// damage     10·lv% of each enemy's max HP
/// SP         party +(8 + 4·lv)
/// lv ≥ 3     party EVA +15, 3 turns
/// ```
pub struct AnalogDistortion;

impl Ability for AnalogDistortion {
    fn id(&self) -> AbilityId {
        AbilityId::AnalogDistortion
    }

    fn cost(&self) -> u32 {
        40
    }

    fn target(&self) -> TargetRule {
        TargetRule::AllEnemies
    }

    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent> {
        let lv = ctx.lv();
        let source = ctx.actor_name();

        for enemy in ctx.enemies() {
            ctx.apply(enemy, StatusEffect::debuff(StatKind::Defense, 30 + 15 * lv, 4, &source));
            let max_hp = ctx.state.get(enemy).map_or(0, |u| u.hp.maximum);
            ctx.damage(enemy, (max_hp * 10 * lv as u32 / 100).max(1));
        }

        for ally in ctx.allies() {
            ctx.gain_sp(ally, (8 + 4 * lv) as u32);
            if ctx.level >= 3 {
                ctx.apply(ally, StatusEffect::flat_buff(StatKind::Evasion, 15, 3, &source));
            }
        }
        ctx.finish()
    }
}
