//! Party support skills.

use super::{Ability, AbilityId, SkillContext, TargetRule};
use crate::battle::BattleEvent;
use crate::effects::StatusEffect;
use crate::stats::StatKind;

// ============================================================================
// SCP-999
// ============================================================================

/// Party regeneration with attack and defense up.
///
/// ```text
/// regen      (8 + 4·lv)% max HP per turn, 3 + lv turns
/// ATK, DEF   +(10 + 5·lv)%, same duration
/// lv ≥ 3     cleanse harmful effects
/// lv 5       heal boost +25%
/// ```
pub struct JoyfulRegeneration;

impl Ability for JoyfulRegeneration {
    fn id(&self) -> AbilityId {
        AbilityId::JoyfulRegeneration
    }

    fn cost(&self) -> u32 {
        40
    }

    fn target(&self) -> TargetRule {
        TargetRule::AllAllies
    }

    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent> {
        let lv = ctx.lv();
        let turns = (3 + lv) as u32;
        let source = ctx.actor_name();

        for ally in ctx.allies() {
            if ctx.level >= 3 {
                if let Some(unit) = ctx.state.get_mut(ally) {
                    let name = unit.name().to_owned();
                    let cleansed = unit.effects.remove_debuffs();
                    ctx.record_effects(&name, cleansed);
                }
            }
            ctx.apply(ally, StatusEffect::regeneration(8 + 4 * lv, turns, &source));
            ctx.apply(ally, StatusEffect::buff(StatKind::Attack, 10 + 5 * lv, turns, &source));
            ctx.apply(ally, StatusEffect::buff(StatKind::Defense, 10 + 5 * lv, turns, &source));
            if ctx.level >= 5 {
                ctx.apply(ally, StatusEffect::heal_boost(25, turns, &source));
            }
        }
        ctx.finish()
    }
}

// ============================================================================
// Bloody Mary
// ============================================================================

/// Party damage reflection.
///
/// ```text
/// reflect    (15 + 10·lv)% of incoming attack damage, 2 + lv turns
/// lv 5       party regeneration 5%, same duration
/// ```
pub struct MirrorCurse;

impl Ability for MirrorCurse {
    fn id(&self) -> AbilityId {
        AbilityId::MirrorCurse
    }

    fn cost(&self) -> u32 {
        40
    }

    fn target(&self) -> TargetRule {
        TargetRule::AllAllies
    }

    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent> {
        let lv = ctx.lv();
        let turns = (2 + lv) as u32;
        let source = ctx.actor_name();

        for ally in ctx.allies() {
            ctx.apply(ally, StatusEffect::reflect(15 + 10 * lv, turns, &source));
            if ctx.level >= 5 {
                ctx.apply(ally, StatusEffect::regeneration(5, turns, &source));
            }
        }
        ctx.finish()
    }
}

// ============================================================================
// SCP-682
// ============================================================================

/// Self heal-over-time, stacking defense and taunt.
///
/// ```text
/// heal       (30 + 15·lv)% max HP spread over 3 turns
/// DEF        +(8 + 4·lv)% persistent, stacks per use
/// taunt      2 + lv turns
/// lv 5       ATK +20% for the taunt duration
/// ```
pub struct IndestructibleRegeneration;

impl IndestructibleRegeneration {
    const HEAL_TURNS: u32 = 3;
}

impl Ability for IndestructibleRegeneration {
    fn id(&self) -> AbilityId {
        AbilityId::IndestructibleRegeneration
    }

    fn cost(&self) -> u32 {
        60
    }

    fn target(&self) -> TargetRule {
        TargetRule::SelfOnly
    }

    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent> {
        let lv = ctx.lv();
        let actor = ctx.actor;
        let source = ctx.actor_name();
        let taunt_turns = (2 + lv) as u32;

        let max_hp = ctx.state.get(actor).map_or(0, |u| u.hp.maximum);
        let total = max_hp * (30 + 15 * lv) as u32 / 100;
        let per_turn = (total / Self::HEAL_TURNS).max(1) as i32;

        ctx.apply(actor, StatusEffect::heal_over_time(per_turn, Self::HEAL_TURNS, &source));
        // keyed on the skill so it never merges with the hide passive
        ctx.apply(
            actor,
            StatusEffect::buff(StatKind::Defense, 8 + 4 * lv, 0, self.id().to_string()).persistent(),
        );
        ctx.apply(actor, StatusEffect::taunt(taunt_turns, &source));
        if ctx.level >= 5 {
            ctx.apply(actor, StatusEffect::buff(StatKind::Attack, 20, taunt_turns, &source));
        }
        ctx.finish()
    }
}
