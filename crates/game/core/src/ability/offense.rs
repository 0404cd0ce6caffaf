//! Damage-dealing skills.

use super::{Ability, AbilityId, SkillContext, TargetRule};
use crate::battle::{BattleEvent, CombatantId};
use crate::combat::{StrikeMode, apply_defending, resolve_strike, roll_percent, scaled_damage};
use crate::effects::StatusEffect;
use crate::stats::StatKind;

// ============================================================================
// Jeff the Killer
// ============================================================================

/// Forced-crit strike with bleed, party haste and self ghost.
///
/// ```text
/// strike     guaranteed critical hit on the chosen enemy
/// bleed      (10 + 5·lv)% ATK per turn, 4 turns
/// SPD        party +(15 + 5·lv)%, 3 turns
/// ghost      self, 3 turns
/// lv ≥ 3     refund the SP cost on a kill
/// lv 5       on a kill, persistent ATK +10% (stacks)
/// ```
pub struct KillerBurst;

impl Ability for KillerBurst {
    fn id(&self) -> AbilityId {
        AbilityId::KillerBurst
    }

    fn cost(&self) -> u32 {
        50
    }

    fn target(&self) -> TargetRule {
        TargetRule::ChosenEnemy
    }

    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent> {
        let lv = ctx.lv();
        let actor = ctx.actor;
        let source = ctx.actor_name();
        let Some(target) = ctx.target.filter(|t| ctx.is_alive(*t)) else {
            return ctx.finish();
        };

        let outcome = match (ctx.state.get(actor), ctx.state.get(target)) {
            (Some(a), Some(d)) => {
                resolve_strike(a, d, StrikeMode::FORCED_CRIT, ctx.config, &mut *ctx.rng)
            }
            _ => return ctx.finish(),
        };
        let (_, killed) = ctx.damage(target, outcome.damage());

        ctx.apply(target, StatusEffect::bleed(ctx.attack_share(10 + 5 * lv), 4, &source));
        for ally in ctx.allies() {
            ctx.apply(ally, StatusEffect::buff(StatKind::Speed, 15 + 5 * lv, 3, &source));
        }
        ctx.apply(actor, StatusEffect::ghost(3, &source));

        if killed && ctx.level >= 3 {
            ctx.gain_sp(actor, self.cost());
        }
        if killed && ctx.level >= 5 {
            ctx.apply(
                actor,
                StatusEffect::buff(StatKind::Attack, 10, 0, self.id().to_string()).persistent(),
            );
        }
        ctx.finish()
    }
}

// ============================================================================
// Kuchisake-onna
// ============================================================================

/// Party-wide bleed with crit up and a chance to frighten.
///
/// ```text
/// bleed      every enemy, (8 + 3·lv)% ATK per turn, 4 turns
/// CRIT       party +(25 + 15·lv), 3 turns
/// fear       15·lv% chance per enemy, 2 turns
/// lv ≥ 3     party CRIT DMG +50, 3 turns
/// lv 5       the highest-attack enemy is always frightened
/// ```
pub struct BloodySmile;

impl Ability for BloodySmile {
    fn id(&self) -> AbilityId {
        AbilityId::BloodySmile
    }

    fn cost(&self) -> u32 {
        35
    }

    fn target(&self) -> TargetRule {
        TargetRule::AllEnemies
    }

    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent> {
        let lv = ctx.lv();
        let source = ctx.actor_name();
        let bleed = ctx.attack_share(8 + 3 * lv);
        let enemies = ctx.enemies();

        let strongest: Option<CombatantId> = if ctx.level >= 5 {
            enemies
                .iter()
                .copied()
                .max_by_key(|id| ctx.state.get(*id).map_or(0, |u| u.effective_attack()))
        } else {
            None
        };

        for enemy in enemies {
            ctx.apply(enemy, StatusEffect::bleed(bleed, 4, &source));
            let frightened =
                Some(enemy) == strongest || roll_percent(&mut *ctx.rng, (15 * lv) as u32);
            if frightened {
                ctx.apply(enemy, StatusEffect::fear(2, &source));
            }
        }

        for ally in ctx.allies() {
            ctx.apply(ally, StatusEffect::flat_buff(StatKind::CritRate, 25 + 15 * lv, 3, &source));
            if ctx.level >= 3 {
                ctx.apply(ally, StatusEffect::flat_buff(StatKind::CritDamage, 50, 3, &source));
            }
        }
        ctx.finish()
    }
}

// ============================================================================
// The Rake
// ============================================================================

/// Several hits on randomly chosen enemies, each leaving a bleed.
///
/// ```text
/// hits       2 + lv/2, each on a default-targeted enemy
/// damage     max(1, ATK × (40 + 10·lv)% − DEF), halved if defending
/// bleed      (12 + 4·lv)% ATK per turn, 5 turns
/// ghost      self, lv turns
/// lv 5       +25% damage per kill for the remaining hits
/// ```
pub struct NightAmbush;

impl Ability for NightAmbush {
    fn id(&self) -> AbilityId {
        AbilityId::NightAmbush
    }

    fn cost(&self) -> u32 {
        50
    }

    fn target(&self) -> TargetRule {
        TargetRule::RandomEnemy
    }

    fn apply(&self, ctx: &mut SkillContext<'_>) -> Vec<BattleEvent> {
        let lv = ctx.lv();
        let actor = ctx.actor;
        let source = ctx.actor_name();
        let hits = 2 + lv / 2;
        let bleed = ctx.attack_share(12 + 4 * lv);
        let mut percent = 40 + 10 * lv;

        for _ in 0..hits {
            let Some(target) = ctx.random_enemy() else {
                break;
            };
            let Some(defender) = ctx.state.get(target) else {
                break;
            };
            let raw = scaled_damage(
                ctx.actor_stat(StatKind::Attack),
                percent,
                defender.effective_defense(),
            );
            let amount = apply_defending(raw, defender.defending);

            let (_, killed) = ctx.damage(target, amount);
            ctx.apply(target, StatusEffect::bleed(bleed, 5, &source));
            if killed && ctx.level >= 5 {
                percent += percent / 4;
            }
        }

        ctx.apply(actor, StatusEffect::ghost(lv as u32, &source));
        ctx.finish()
    }
}
