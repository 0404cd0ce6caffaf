use super::{AttackPattern, HookContext, PassiveHook, PassiveId, StrikeReport, StrikeRole};
use crate::battle::StrikeOutcome;
use crate::combat::roll_percent;
use crate::effects::{EffectKind, StatusEffect};
use crate::stats::StatKind;

/// Slender: whoever trades blows with the owner gains a page.
pub struct EightPages;

impl PassiveHook for EightPages {
    fn id(&self) -> PassiveId {
        PassiveId::EightPages
    }

    fn after_strike(&self, ctx: &mut HookContext<'_>, strike: &StrikeReport, role: StrikeRole) {
        let other = strike.other(role);
        let source = ctx.owner_name();
        ctx.apply(other, StatusEffect::page(&source));
        let victim = ctx.state.name_of(other);
        ctx.triggered(self.id(), format!("{victim} finds a page"));
    }
}

/// Bloody Mary: drinks from bleeding attackers and may bleed them.
pub struct MirrorBleed;

impl MirrorBleed {
    const LIFESTEAL_PERCENT: u32 = 50;
    const BLEED_CHANCE: u32 = 50;
    const BLEED_PERCENT: i32 = 10;
    const BLEED_TURNS: u32 = 3;
}

impl PassiveHook for MirrorBleed {
    fn id(&self) -> PassiveId {
        PassiveId::MirrorBleed
    }

    fn after_strike(&self, ctx: &mut HookContext<'_>, strike: &StrikeReport, role: StrikeRole) {
        let StrikeOutcome::Hit { damage, .. } = strike.outcome else {
            return;
        };
        if role != StrikeRole::Defender {
            return;
        }
        let owner = ctx.owner;
        let source = ctx.owner_name();

        let attacker_bleeding = ctx
            .state
            .get(strike.attacker)
            .is_some_and(|u| u.effects.is_bleeding());
        if attacker_bleeding {
            let healed = ctx.heal(owner, damage * Self::LIFESTEAL_PERCENT / 100, &source);
            if healed > 0 {
                ctx.triggered(self.id(), format!("drinks {healed} HP from the bleeding attacker"));
            }
        }

        if roll_percent(&mut *ctx.rng, Self::BLEED_CHANCE) {
            let attack = ctx.state.get(owner).map_or(0, |u| u.effective_attack());
            let per_turn = (attack * Self::BLEED_PERCENT / 100).max(1);
            ctx.apply(
                strike.attacker,
                StatusEffect::bleed(per_turn, Self::BLEED_TURNS, &source),
            );
            ctx.triggered(self.id(), "the mirror bleeds back");
        }
    }
}

/// SCP-682: every hit taken hardens the hide. No stack limit.
pub struct AdaptiveHide;

impl AdaptiveHide {
    const DEFENSE_PERCENT: i32 = 5;
}

impl PassiveHook for AdaptiveHide {
    fn id(&self) -> PassiveId {
        PassiveId::AdaptiveHide
    }

    fn after_strike(&self, ctx: &mut HookContext<'_>, strike: &StrikeReport, role: StrikeRole) {
        if role != StrikeRole::Defender || strike.outcome == StrikeOutcome::Missed {
            return;
        }
        let owner = ctx.owner;
        let source = ctx.owner_name();
        ctx.apply(
            owner,
            StatusEffect::buff(StatKind::Defense, Self::DEFENSE_PERCENT, 0, source).persistent(),
        );
        ctx.triggered(self.id(), "adapts to the blow");
    }
}

/// Jeff the Killer: vanishes at the start of battle and after every crit.
pub struct GhostStep;

impl GhostStep {
    const GHOST_TURNS: u32 = 3;

    fn vanish(&self, ctx: &mut HookContext<'_>) {
        let owner = ctx.owner;
        let source = ctx.owner_name();
        ctx.apply(owner, StatusEffect::ghost(Self::GHOST_TURNS, source));
        ctx.triggered(self.id(), "fades into the shadows");
    }
}

impl PassiveHook for GhostStep {
    fn id(&self) -> PassiveId {
        PassiveId::GhostStep
    }

    fn on_battle_start(&self, ctx: &mut HookContext<'_>) {
        self.vanish(ctx);
    }

    fn after_strike(&self, ctx: &mut HookContext<'_>, strike: &StrikeReport, role: StrikeRole) {
        if role == StrikeRole::Attacker && strike.outcome.is_critical() {
            self.vanish(ctx);
        }
    }
}

/// Vampire: heals a share of damage dealt.
pub struct Lifedrain;

impl Lifedrain {
    const PERCENT: u32 = 10;
}

impl PassiveHook for Lifedrain {
    fn id(&self) -> PassiveId {
        PassiveId::Lifedrain
    }

    fn after_strike(&self, ctx: &mut HookContext<'_>, strike: &StrikeReport, role: StrikeRole) {
        if role != StrikeRole::Attacker {
            return;
        }
        let amount = strike.outcome.damage() * Self::PERCENT / 100;
        if amount == 0 {
            return;
        }
        let owner = ctx.owner;
        let source = ctx.owner_name();
        if ctx.heal(owner, amount, &source) > 0 {
            ctx.triggered(self.id(), "drains life");
        }
    }
}

/// Werewolf: attacks harder while below half HP.
pub struct Frenzy;

impl Frenzy {
    const SOURCE: &'static str = "Frenzy";
    const ATTACK_PERCENT: i32 = 5;
    const THRESHOLD_PERCENT: u32 = 50;
}

impl PassiveHook for Frenzy {
    fn id(&self) -> PassiveId {
        PassiveId::Frenzy
    }

    fn before_attack(&self, ctx: &mut HookContext<'_>) {
        let owner = ctx.owner;
        let Some(unit) = ctx.state.get_mut(owner) else {
            return;
        };
        unit.effects.remove(EffectKind::Buff, Self::SOURCE);
        if !unit.hp.below_percent(Self::THRESHOLD_PERCENT) {
            return;
        }
        ctx.apply(
            owner,
            StatusEffect::buff(StatKind::Attack, Self::ATTACK_PERCENT, 1, Self::SOURCE),
        );
        ctx.triggered(self.id(), "is driven into a frenzy");
    }
}

/// Iris: basic attacks sweep every opponent and may slow them.
pub struct Prism;

impl Prism {
    const SLOW_CHANCE: u32 = 40;
    const SLOW_PERCENT: i32 = 20;
    const SLOW_TURNS: u32 = 2;
}

impl PassiveHook for Prism {
    fn id(&self) -> PassiveId {
        PassiveId::Prism
    }

    fn attack_pattern(&self) -> AttackPattern {
        AttackPattern::AllOpponents
    }

    fn after_strike(&self, ctx: &mut HookContext<'_>, strike: &StrikeReport, role: StrikeRole) {
        if role != StrikeRole::Attacker || strike.outcome == StrikeOutcome::Missed {
            return;
        }
        if roll_percent(&mut *ctx.rng, Self::SLOW_CHANCE) {
            let source = ctx.owner_name();
            ctx.apply(
                strike.defender,
                StatusEffect::debuff(StatKind::Speed, Self::SLOW_PERCENT, Self::SLOW_TURNS, source),
            );
        }
    }
}
