use rand::RngCore;

use super::{Action, ActionError};
use crate::ability::{Ability, AbilityRegistry, SkillContext, TargetRule};
use crate::battle::{BattleEvent, BattleState, BattleUnit, CombatantId, StrikeOutcome};
use crate::combat::{StrikeMode, is_selectable, resolve_strike};
use crate::config::BattleConfig;
use crate::passive::{AttackPattern, PassiveRegistry, StrikeReport};

/// Validates and applies actions.
///
/// Owns the skill and passive registries so the controller never looks at
/// species names.
#[derive(Debug, Default)]
pub struct ActionResolver {
    abilities: AbilityRegistry,
    passives: PassiveRegistry,
    config: BattleConfig,
}

impl ActionResolver {
    pub fn new(config: BattleConfig) -> Self {
        Self {
            abilities: AbilityRegistry::builtin(),
            passives: PassiveRegistry::builtin(),
            config,
        }
    }

    pub fn with_registries(
        config: BattleConfig,
        abilities: AbilityRegistry,
        passives: PassiveRegistry,
    ) -> Self {
        Self {
            abilities,
            passives,
            config,
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn abilities(&self) -> &AbilityRegistry {
        &self.abilities
    }

    pub fn passives(&self) -> &PassiveRegistry {
        &self.passives
    }

    /// The skill implementation `unit` would use, if any.
    pub fn ability_of(&self, unit: &BattleUnit) -> Option<&dyn Ability> {
        self.abilities.get(unit.skill()?)
    }

    /// Whether `actor` could use its skill right now (SP, fear, registry).
    pub fn can_use_skill(&self, state: &BattleState, actor: CombatantId) -> bool {
        state
            .get(actor)
            .is_some_and(|unit| self.check_skill(unit).is_ok())
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Checks `action` for `actor` without touching state.
    pub fn validate(
        &self,
        state: &BattleState,
        actor: CombatantId,
        action: &Action,
    ) -> Result<(), ActionError> {
        let unit = state
            .get(actor)
            .filter(|u| u.is_alive())
            .ok_or(ActionError::ActorUnavailable(actor))?;

        match *action {
            Action::Attack { target } => self.check_opponent(state, actor, target),
            Action::Defend => Ok(()),
            Action::Skill { target } => {
                let ability = self.check_skill(unit)?;
                match (ability.target(), target) {
                    (TargetRule::ChosenEnemy, None) => Err(ActionError::TargetRequired),
                    (TargetRule::ChosenEnemy, Some(target)) => {
                        self.check_opponent(state, actor, target)
                    }
                    (_, Some(_)) => Err(ActionError::TargetNotAllowed),
                    (_, None) => Ok(()),
                }
            }
        }
    }

    fn check_skill(&self, unit: &BattleUnit) -> Result<&dyn Ability, ActionError> {
        let ability = self.ability_of(unit).ok_or(ActionError::NoSkill)?;
        if unit.effects.is_feared() {
            return Err(ActionError::SkillSealed);
        }
        let (need, have) = (ability.cost(), unit.sp.current);
        if have < need {
            return Err(ActionError::InsufficientResources { need, have });
        }
        Ok(ability)
    }

    fn check_opponent(
        &self,
        state: &BattleState,
        actor: CombatantId,
        target: CombatantId,
    ) -> Result<(), ActionError> {
        if target.side == actor.side {
            return Err(ActionError::InvalidTarget(target));
        }
        let unit = state.get(target).ok_or(ActionError::InvalidTarget(target))?;
        if !unit.is_alive() {
            return Err(ActionError::TargetDefeated(target));
        }
        if !is_selectable(state, target) {
            return Err(ActionError::TargetUntargetable(target));
        }
        Ok(())
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Validates and then applies `action`.
    pub fn resolve(
        &self,
        state: &mut BattleState,
        actor: CombatantId,
        action: Action,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<BattleEvent>, ActionError> {
        self.validate(state, actor, &action)?;

        let events = match action {
            Action::Attack { target } => self.attack(state, actor, target, rng),
            Action::Skill { target } => self.skill(state, actor, target, rng),
            Action::Defend => self.defend(state, actor),
        };
        Ok(events)
    }

    /// Passives that fire when the encounter starts.
    pub fn battle_start(
        &self,
        state: &mut BattleState,
        actor: CombatantId,
        rng: &mut dyn RngCore,
    ) -> Vec<BattleEvent> {
        self.passives.battle_start(state, actor, rng)
    }

    fn attack(
        &self,
        state: &mut BattleState,
        actor: CombatantId,
        target: CombatantId,
        rng: &mut dyn RngCore,
    ) -> Vec<BattleEvent> {
        let mut events = self.passives.before_attack(state, actor, rng);

        let targets = match self.passives.attack_pattern(state, actor) {
            AttackPattern::Single => vec![target],
            AttackPattern::AllOpponents => state.living_ids(target.side),
        };

        for defender in targets {
            if !state.is_alive(actor) {
                break;
            }
            let outcome = match (state.get(actor), state.get(defender)) {
                (Some(a), Some(d)) if d.is_alive() => {
                    resolve_strike(a, d, StrikeMode::BASIC, &self.config, rng)
                }
                _ => continue,
            };
            events.extend(self.land_strike(state, actor, defender, outcome));

            let report = StrikeReport {
                attacker: actor,
                defender,
                outcome,
            };
            events.extend(self.passives.after_strike(state, &report, rng));
        }

        if let Some(unit) = state.get_mut(actor).filter(|u| u.is_alive()) {
            let gained = unit.gain_sp(self.config.attack_sp_gain);
            if gained > 0 {
                events.push(BattleEvent::SpChanged {
                    target: unit.name().to_owned(),
                    delta: gained as i32,
                    current: unit.sp.current,
                });
            }
        }
        events
    }

    /// Applies a rolled strike: damage, defeat, reflect.
    fn land_strike(
        &self,
        state: &mut BattleState,
        actor: CombatantId,
        defender: CombatantId,
        outcome: StrikeOutcome,
    ) -> Vec<BattleEvent> {
        let Some((attacker, target)) = state.pair_mut(actor, defender) else {
            return Vec::new();
        };
        let mut events = vec![BattleEvent::Attacked {
            attacker: attacker.name().to_owned(),
            target: target.name().to_owned(),
            outcome,
        }];

        let StrikeOutcome::Hit { damage, .. } = outcome else {
            return events;
        };
        target.take_damage(damage);
        if !target.is_alive() {
            events.push(BattleEvent::Defeated {
                name: target.name().to_owned(),
            });
        }

        let reflected = damage * target.effects.reflect_percent() / 100;
        if reflected > 0 && attacker.is_alive() {
            let amount = attacker.take_damage(reflected);
            events.push(BattleEvent::Reflected {
                reflector: target.name().to_owned(),
                attacker: attacker.name().to_owned(),
                amount,
            });
            if !attacker.is_alive() {
                events.push(BattleEvent::Defeated {
                    name: attacker.name().to_owned(),
                });
            }
        }
        events
    }

    fn skill(
        &self,
        state: &mut BattleState,
        actor: CombatantId,
        target: Option<CombatantId>,
        rng: &mut dyn RngCore,
    ) -> Vec<BattleEvent> {
        let Some(unit) = state.get_mut(actor) else {
            return Vec::new();
        };
        let Some(ability) = self.ability_of(unit) else {
            return Vec::new();
        };
        let level = unit.skill_level();
        unit.drain_sp(ability.cost());

        let mut events = vec![BattleEvent::SkillUsed {
            actor: unit.name().to_owned(),
            skill: ability.id().to_string(),
            level,
            cost: ability.cost(),
        }];

        let mut ctx = SkillContext::new(actor, target, level, state, rng, &self.config);
        events.extend(ability.apply(&mut ctx));
        events
    }

    fn defend(&self, state: &mut BattleState, actor: CombatantId) -> Vec<BattleEvent> {
        let Some(unit) = state.get_mut(actor) else {
            return Vec::new();
        };
        unit.defending = true;
        let gained = unit.gain_sp(self.config.defend_sp_gain);
        vec![BattleEvent::Defended {
            actor: unit.name().to_owned(),
            sp_gained: gained,
        }]
    }
}
