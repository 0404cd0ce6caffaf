use rand::RngCore;

use crate::battle::{BattleEvent, BattleState, CombatantId};
use crate::combat::default_target;
use crate::config::BattleConfig;
use crate::effects::{EffectEvent, StatusEffect};
use crate::stats::StatKind;

/// Everything a skill may read or mutate while resolving.
///
/// Helpers record their own log lines; implementations return them with
/// [`SkillContext::finish`].
pub struct SkillContext<'a> {
    pub actor: CombatantId,
    /// Chosen target for [`super::TargetRule::ChosenEnemy`] skills.
    pub target: Option<CombatantId>,
    /// 1..=5.
    pub level: u8,
    pub state: &'a mut BattleState,
    pub rng: &'a mut dyn RngCore,
    pub config: &'a BattleConfig,
    log: Vec<BattleEvent>,
}

impl<'a> SkillContext<'a> {
    pub fn new(
        actor: CombatantId,
        target: Option<CombatantId>,
        level: u8,
        state: &'a mut BattleState,
        rng: &'a mut dyn RngCore,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            actor,
            target,
            level: level.clamp(1, BattleConfig::MAX_SKILL_LEVEL),
            state,
            rng,
            config,
            log: Vec::new(),
        }
    }

    /// Skill level as a multiplier.
    pub fn lv(&self) -> i32 {
        i32::from(self.level)
    }

    pub fn finish(&mut self) -> Vec<BattleEvent> {
        core::mem::take(&mut self.log)
    }

    pub fn record(&mut self, event: BattleEvent) {
        self.log.push(event);
    }

    /// Records a batch of ledger events for one bearer.
    pub fn record_effects(&mut self, target: &str, events: Vec<EffectEvent>) {
        self.log.extend(BattleEvent::effects(target, events));
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn actor_name(&self) -> String {
        self.state.name_of(self.actor)
    }

    pub fn actor_stat(&self, stat: StatKind) -> i32 {
        self.state.get(self.actor).map_or(0, |u| u.effective(stat))
    }

    /// `percent` of the actor's effective attack, at least 1.
    pub fn attack_share(&self, percent: i32) -> i32 {
        (self.actor_stat(StatKind::Attack) * percent / 100).max(1)
    }

    /// Living units on the actor's side, the actor included.
    pub fn allies(&self) -> Vec<CombatantId> {
        self.state.living_ids(self.actor.side)
    }

    /// Living units on the opposing side, ghosts included.
    pub fn enemies(&self) -> Vec<CombatantId> {
        self.state.living_ids(self.actor.side.opponent())
    }

    /// An opposing unit picked by default targeting rules.
    pub fn random_enemy(&mut self) -> Option<CombatantId> {
        default_target(&*self.state, self.actor.side.opponent(), &mut *self.rng)
    }

    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.state.is_alive(id)
    }

    pub fn page_stacks(&self, id: CombatantId) -> u32 {
        self.state.get(id).map_or(0, |u| u.effects.page_stacks())
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Adds an effect to a living unit.
    pub fn apply(&mut self, target: CombatantId, effect: StatusEffect) {
        let Some(unit) = self.state.get_mut(target) else {
            return;
        };
        if !unit.is_alive() {
            return;
        }
        let name = unit.name().to_owned();
        let events = unit.effects.add(effect);
        self.record_effects(&name, events);
    }

    /// Removes HP from a living unit. Returns `(dealt, killed)`.
    pub fn damage(&mut self, target: CombatantId, amount: u32) -> (u32, bool) {
        let actor = self.actor_name();
        let Some(unit) = self.state.get_mut(target) else {
            return (0, false);
        };
        if !unit.is_alive() {
            return (0, false);
        }
        let dealt = unit.take_damage(amount);
        let killed = !unit.is_alive();
        let name = unit.name().to_owned();

        self.log.push(BattleEvent::SkillDamage {
            actor,
            target: name.clone(),
            amount: dealt,
        });
        if killed {
            self.log.push(BattleEvent::Defeated { name });
        }
        (dealt, killed)
    }

    pub fn heal(&mut self, target: CombatantId, amount: u32) -> u32 {
        let source = self.actor_name();
        let Some(unit) = self.state.get_mut(target) else {
            return 0;
        };
        let healed = unit.heal(amount);
        if healed > 0 {
            let name = unit.name().to_owned();
            self.log.push(BattleEvent::Healed {
                target: name,
                amount: healed,
                source,
            });
        }
        healed
    }

    pub fn gain_sp(&mut self, target: CombatantId, amount: u32) -> u32 {
        let Some(unit) = self.state.get_mut(target) else {
            return 0;
        };
        let gained = unit.gain_sp(amount);
        if gained > 0 {
            self.log.push(BattleEvent::SpChanged {
                target: unit.name().to_owned(),
                delta: gained as i32,
                current: unit.sp.current,
            });
        }
        gained
    }

    pub fn drain_sp(&mut self, target: CombatantId, amount: u32) -> u32 {
        let Some(unit) = self.state.get_mut(target) else {
            return 0;
        };
        let drained = unit.drain_sp(amount);
        if drained > 0 {
            self.log.push(BattleEvent::SpChanged {
                target: unit.name().to_owned(),
                delta: -(drained as i32),
                current: unit.sp.current,
            });
        }
        drained
    }
}
