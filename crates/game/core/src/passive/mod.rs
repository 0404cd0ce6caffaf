//! Species passives.
//!
//! Passives are hooks keyed by [`PassiveId`] and invoked uniformly around
//! every basic attack for both participants, whichever side they are on.
//! The action resolver never checks species names.

mod hooks;

use std::collections::BTreeMap;

use rand::RngCore;
use strum::{Display, EnumIter, IntoEnumIterator};

pub use hooks::{AdaptiveHide, EightPages, Frenzy, GhostStep, Lifedrain, MirrorBleed, Prism};

use crate::battle::{BattleEvent, BattleState, CombatantId, StrikeOutcome};
use crate::effects::StatusEffect;

/// Passive identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PassiveId {
    #[strum(serialize = "Eight Pages")]
    EightPages,
    #[strum(serialize = "Mirror Bleed")]
    MirrorBleed,
    #[strum(serialize = "Adaptive Hide")]
    AdaptiveHide,
    #[strum(serialize = "Ghost Step")]
    GhostStep,
    Lifedrain,
    Frenzy,
    Prism,
}

/// Which participant of a strike a hook is running for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeRole {
    Attacker,
    Defender,
}

/// Whom a basic attack hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttackPattern {
    #[default]
    Single,
    AllOpponents,
}

/// One resolved basic strike, already applied to HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrikeReport {
    pub attacker: CombatantId,
    pub defender: CombatantId,
    pub outcome: StrikeOutcome,
}

impl StrikeReport {
    /// The participant opposite to `role`.
    pub fn other(&self, role: StrikeRole) -> CombatantId {
        match role {
            StrikeRole::Attacker => self.defender,
            StrikeRole::Defender => self.attacker,
        }
    }
}

/// State handed to a passive hook.
pub struct HookContext<'a> {
    pub owner: CombatantId,
    pub state: &'a mut BattleState,
    pub rng: &'a mut dyn RngCore,
    log: Vec<BattleEvent>,
}

impl<'a> HookContext<'a> {
    pub fn new(owner: CombatantId, state: &'a mut BattleState, rng: &'a mut dyn RngCore) -> Self {
        Self {
            owner,
            state,
            rng,
            log: Vec::new(),
        }
    }

    pub fn owner_name(&self) -> String {
        self.state.name_of(self.owner)
    }

    /// Logs the passive firing.
    pub fn triggered(&mut self, passive: PassiveId, detail: impl Into<String>) {
        let owner = self.owner_name();
        self.log.push(BattleEvent::PassiveTriggered {
            owner,
            passive: passive.to_string(),
            detail: detail.into(),
        });
    }

    pub fn apply(&mut self, target: CombatantId, effect: StatusEffect) {
        let Some(unit) = self.state.get_mut(target) else {
            return;
        };
        if !unit.is_alive() {
            return;
        }
        let name = unit.name().to_owned();
        let events = unit.effects.add(effect);
        self.log.extend(BattleEvent::effects(&name, events));
    }

    pub fn heal(&mut self, target: CombatantId, amount: u32, source: &str) -> u32 {
        let Some(unit) = self.state.get_mut(target) else {
            return 0;
        };
        let healed = unit.heal(amount);
        if healed > 0 {
            self.log.push(BattleEvent::Healed {
                target: unit.name().to_owned(),
                amount: healed,
                source: source.to_owned(),
            });
        }
        healed
    }

    fn finish(self) -> Vec<BattleEvent> {
        self.log
    }
}

/// A passive implementation. Every hook defaults to doing nothing.
pub trait PassiveHook: Send + Sync {
    fn id(&self) -> PassiveId;

    /// Once per encounter, at the owner's first turn.
    fn on_battle_start(&self, _ctx: &mut HookContext<'_>) {}

    /// Before the owner resolves a basic attack.
    fn before_attack(&self, _ctx: &mut HookContext<'_>) {}

    /// After a basic strike the owner took part in, on either side.
    fn after_strike(&self, _ctx: &mut HookContext<'_>, _strike: &StrikeReport, _role: StrikeRole) {}

    fn attack_pattern(&self) -> AttackPattern {
        AttackPattern::Single
    }
}

/// Lookup table from id to hook, plus the dispatch helpers the resolver uses.
pub struct PassiveRegistry {
    hooks: BTreeMap<PassiveId, Box<dyn PassiveHook>>,
}

impl PassiveRegistry {
    pub fn empty() -> Self {
        Self {
            hooks: BTreeMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(EightPages));
        registry.register(Box::new(MirrorBleed));
        registry.register(Box::new(AdaptiveHide));
        registry.register(Box::new(GhostStep));
        registry.register(Box::new(Lifedrain));
        registry.register(Box::new(Frenzy));
        registry.register(Box::new(Prism));
        registry
    }

    pub fn register(&mut self, hook: Box<dyn PassiveHook>) {
        self.hooks.insert(hook.id(), hook);
    }

    pub fn get(&self, id: PassiveId) -> Option<&dyn PassiveHook> {
        self.hooks.get(&id).map(|h| h.as_ref())
    }

    pub fn missing(&self) -> Vec<PassiveId> {
        PassiveId::iter()
            .filter(|id| !self.hooks.contains_key(id))
            .collect()
    }

    fn hook_for(&self, state: &BattleState, id: CombatantId) -> Option<&dyn PassiveHook> {
        let unit = state.get(id).filter(|u| u.is_alive())?;
        self.get(unit.passive()?)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    pub fn battle_start(
        &self,
        state: &mut BattleState,
        owner: CombatantId,
        rng: &mut dyn RngCore,
    ) -> Vec<BattleEvent> {
        let Some(hook) = self.hook_for(state, owner) else {
            return Vec::new();
        };
        let mut ctx = HookContext::new(owner, state, rng);
        hook.on_battle_start(&mut ctx);
        ctx.finish()
    }

    pub fn before_attack(
        &self,
        state: &mut BattleState,
        attacker: CombatantId,
        rng: &mut dyn RngCore,
    ) -> Vec<BattleEvent> {
        let Some(hook) = self.hook_for(state, attacker) else {
            return Vec::new();
        };
        let mut ctx = HookContext::new(attacker, state, rng);
        hook.before_attack(&mut ctx);
        ctx.finish()
    }

    /// Runs the attacker's hook, then the defender's.
    pub fn after_strike(
        &self,
        state: &mut BattleState,
        strike: &StrikeReport,
        rng: &mut dyn RngCore,
    ) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        for (owner, role) in [
            (strike.attacker, StrikeRole::Attacker),
            (strike.defender, StrikeRole::Defender),
        ] {
            let Some(hook) = self.hook_for(state, owner) else {
                continue;
            };
            let mut ctx = HookContext::new(owner, state, &mut *rng);
            hook.after_strike(&mut ctx, strike, role);
            events.extend(ctx.finish());
        }
        events
    }

    pub fn attack_pattern(&self, state: &BattleState, attacker: CombatantId) -> AttackPattern {
        self.hook_for(state, attacker)
            .map_or(AttackPattern::Single, |hook| hook.attack_pattern())
    }
}

impl Default for PassiveRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl core::fmt::Debug for PassiveRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.hooks.keys()).finish()
    }
}
