//! Encounter state machine.
//!
//! ```text
//! WaveSetup ──▶ RoundLoop ──enemies wiped──▶ WaveCleared ──more waves──▶ WaveSetup
//!                  │                              │ last wave
//!                  │ team wiped / round limit     ▼
//!                  ▼                          BattleWon
//!              BattleLost          (retreat from any live phase ──▶ Retreated)
//! ```
//!
//! The controller is stepped synchronously. Each [`BattleController::poll`]
//! advances by one observable step and suspends with
//! [`Poll::AwaitingAction`] whenever a player unit is up.

use std::collections::BTreeSet;

use rand::RngCore;

use super::encounter::{EncounterPlan, WaveSource};
use super::error::BattleError;
use super::event::{BattleEvent, DefeatReason};
use super::rewards::{BattleReport, RewardSink, RewardTable};
use super::snapshot::BattleSnapshot;
use super::state::BattleState;
use super::unit::{CombatantId, Side, UnitKind};
use crate::action::{Action, ActionError, ActionPolicy, ActionResolver, EnemyAi};
use crate::config::BattleConfig;
use crate::turn::TurnScheduler;
use crate::unit::Unit;

/// Encounter lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    #[default]
    WaveSetup,
    RoundLoop,
    WaveCleared,
    BattleWon,
    BattleLost,
    Retreated,
}

impl BattlePhase {
    pub const fn is_finished(self) -> bool {
        matches!(
            self,
            BattlePhase::BattleWon | BattlePhase::BattleLost | BattlePhase::Retreated
        )
    }
}

/// How an encounter ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Won(BattleReport),
    Lost {
        reason: DefeatReason,
        waves_cleared: u32,
        rounds: u32,
    },
    Retreated {
        waves_cleared: u32,
    },
}

impl BattleOutcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, BattleOutcome::Won(_))
    }

    pub fn report(&self) -> Option<&BattleReport> {
        match self {
            BattleOutcome::Won(report) => Some(report),
            _ => None,
        }
    }

    /// Hands the report to `sink` on a win. Returns whether anything was
    /// delivered.
    pub fn deliver(&self, sink: &mut dyn RewardSink) -> bool {
        match self.report() {
            Some(report) => {
                sink.deliver(report);
                true
            }
            None => false,
        }
    }
}

/// Result of one [`BattleController::poll`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Poll {
    /// A player unit must act through [`BattleController::act`].
    AwaitingAction(CombatantId),
    /// One step ran; events are waiting in the log.
    Progressed,
    Finished(BattleOutcome),
}

/// Drives one encounter from the first wave to a result.
#[derive(Debug)]
pub struct BattleController {
    plan: EncounterPlan,
    resolver: ActionResolver,
    enemy_ai: EnemyAi,
    state: BattleState,
    scheduler: TurnScheduler,
    phase: BattlePhase,
    /// 1-based; 0 until the first wave is loaded.
    wave: u32,
    waves_cleared: u32,
    total_rounds: u32,
    pending: Option<CombatantId>,
    /// Combatants whose battle-start passives already ran.
    started: BTreeSet<CombatantId>,
    events: Vec<BattleEvent>,
    outcome: Option<BattleOutcome>,
}

impl BattleController {
    pub fn new(team: Vec<Unit>, plan: EncounterPlan, config: BattleConfig) -> Result<Self, BattleError> {
        Self::with_resolver(team, plan, ActionResolver::new(config))
    }

    /// Uses custom ability and passive registries.
    pub fn with_resolver(
        team: Vec<Unit>,
        plan: EncounterPlan,
        resolver: ActionResolver,
    ) -> Result<Self, BattleError> {
        if plan.waves == 0 {
            return Err(BattleError::NoWaves);
        }
        let state = BattleState::new(team, resolver.config())?;
        let enemy_ai = EnemyAi::new(resolver.config().enemy_skill_chance);

        Ok(Self {
            plan,
            resolver,
            enemy_ai,
            state,
            scheduler: TurnScheduler::new(),
            phase: BattlePhase::WaveSetup,
            wave: 0,
            waves_cleared: 0,
            total_rounds: 0,
            pending: None,
            started: BTreeSet::new(),
            events: Vec::new(),
            outcome: None,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn plan(&self) -> &EncounterPlan {
        &self.plan
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn resolver(&self) -> &ActionResolver {
        &self.resolver
    }

    /// The player unit waiting for [`act`](Self::act).
    pub fn pending(&self) -> Option<CombatantId> {
        self.pending
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    /// Takes every event logged since the last drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot::capture(
            &self.state,
            self.resolver.abilities(),
            self.wave,
            self.plan.waves,
            self.scheduler.round(),
            self.pending,
        )
    }

    // ========================================================================
    // Stepping
    // ========================================================================

    /// Advances the encounter by one step.
    ///
    /// While a player unit is pending this keeps returning
    /// [`Poll::AwaitingAction`] without touching state.
    pub fn poll(&mut self, waves: &mut dyn WaveSource, rng: &mut dyn RngCore) -> Result<Poll, BattleError> {
        if let Some(outcome) = &self.outcome {
            return Ok(Poll::Finished(outcome.clone()));
        }
        if let Some(actor) = self.pending {
            return Ok(Poll::AwaitingAction(actor));
        }

        match self.phase {
            BattlePhase::WaveSetup => {
                self.setup_wave(waves, rng)?;
                Ok(Poll::Progressed)
            }
            BattlePhase::RoundLoop => Ok(self.step_turn(rng)),
            BattlePhase::WaveCleared => {
                self.clear_wave(rng);
                Ok(Poll::Progressed)
            }
            BattlePhase::BattleWon | BattlePhase::BattleLost | BattlePhase::Retreated => {
                // outcome is always set when a terminal phase is entered
                Ok(Poll::Progressed)
            }
        }
    }

    /// Completes the pending player turn.
    ///
    /// A rejected action leaves the turn pending and the state untouched.
    pub fn act(&mut self, action: Action, rng: &mut dyn RngCore) -> Result<(), ActionError> {
        if self.phase.is_finished() {
            return Err(ActionError::BattleOver);
        }
        let actor = self.pending.ok_or(ActionError::NotAwaitingAction)?;

        let events = self.resolver.resolve(&mut self.state, actor, action, rng)?;
        self.events.extend(events);
        self.pending = None;
        self.end_turn(actor);
        Ok(())
    }

    /// Completes the pending player turn, defending when `action` is rejected.
    ///
    /// The replacement is recorded as [`BattleEvent::ActionReplaced`] and the
    /// rejection is handed back.
    pub fn act_or_defend(
        &mut self,
        action: Action,
        rng: &mut dyn RngCore,
    ) -> Result<Option<ActionError>, ActionError> {
        let rejected = match self.act(action, &mut *rng) {
            Ok(()) => return Ok(None),
            Err(err @ (ActionError::BattleOver | ActionError::NotAwaitingAction)) => return Err(err),
            Err(err) => err,
        };

        if let Some(actor) = self.pending {
            self.events.push(BattleEvent::ActionReplaced {
                actor: self.state.name_of(actor),
                reason: rejected.to_string(),
            });
        }
        self.act(Action::Defend, rng)?;
        Ok(Some(rejected))
    }

    /// Abandons the encounter. No rewards.
    pub fn retreat(&mut self) -> Result<(), ActionError> {
        if self.phase.is_finished() {
            return Err(ActionError::BattleOver);
        }
        self.pending = None;
        self.phase = BattlePhase::Retreated;
        self.events.push(BattleEvent::Retreated);
        self.outcome = Some(BattleOutcome::Retreated {
            waves_cleared: self.waves_cleared,
        });
        Ok(())
    }

    /// Runs to completion, asking `policy` for every player turn.
    ///
    /// An action the policy gets wrong is replaced by defending.
    pub fn run_with(
        &mut self,
        policy: &mut dyn ActionPolicy,
        waves: &mut dyn WaveSource,
        rng: &mut dyn RngCore,
    ) -> Result<BattleOutcome, BattleError> {
        loop {
            match self.poll(waves, rng)? {
                Poll::Finished(outcome) => return Ok(outcome),
                Poll::Progressed => {}
                Poll::AwaitingAction(actor) => {
                    let view = self.snapshot();
                    let action = policy.choose(&view, actor, rng);
                    self.act_or_defend(action, rng)?;
                }
            }
        }
    }

    // ========================================================================
    // Phases
    // ========================================================================

    fn setup_wave(&mut self, waves: &mut dyn WaveSource, rng: &mut dyn RngCore) -> Result<(), BattleError> {
        let ctx = self.plan.difficulty(self.wave);
        let specs = waves.generate(&ctx, rng);
        self.state.load_wave(specs, self.resolver.config())?;

        self.wave += 1;
        self.scheduler.reset();
        self.started.retain(|id| id.side == Side::Ally);
        self.events.push(BattleEvent::WaveStarted {
            wave: self.wave,
            total: self.plan.waves,
            enemies: self.state.enemies.iter().map(|u| u.name().to_owned()).collect(),
        });
        self.phase = BattlePhase::RoundLoop;
        Ok(())
    }

    fn step_turn(&mut self, rng: &mut dyn RngCore) -> Poll {
        let state = &self.state;
        let Some(actor) = self.scheduler.advance(|id| state.is_alive(id)) else {
            self.start_round();
            return Poll::Progressed;
        };

        self.begin_turn(actor, rng);
        if !self.state.is_alive(actor) {
            self.check_end();
            return Poll::Progressed;
        }

        let stunned = self
            .state
            .get(actor)
            .is_some_and(|unit| unit.effects.is_stunned());
        if stunned {
            self.events.push(BattleEvent::TurnSkipped {
                actor: self.state.name_of(actor),
            });
            self.end_turn(actor);
            return Poll::Progressed;
        }

        if actor.side == Side::Ally {
            self.pending = Some(actor);
            return Poll::AwaitingAction(actor);
        }

        let action = self.enemy_ai.choose(&self.resolver, &self.state, actor, rng);
        let events = self.resolve_or_defend(actor, action, rng);
        self.events.extend(events);
        self.end_turn(actor);
        Poll::Progressed
    }

    /// Resolves an AI-chosen action, defending when it is rejected. Every
    /// rejection is recorded in the returned events.
    fn resolve_or_defend(
        &mut self,
        actor: CombatantId,
        action: Action,
        rng: &mut dyn RngCore,
    ) -> Vec<BattleEvent> {
        let rejected = match self.resolver.resolve(&mut self.state, actor, action, &mut *rng) {
            Ok(events) => return events,
            Err(err) => err,
        };

        let name = self.state.name_of(actor);
        let mut events = vec![BattleEvent::ActionReplaced {
            actor: name.clone(),
            reason: rejected.to_string(),
        }];
        match self.resolver.resolve(&mut self.state, actor, Action::Defend, rng) {
            Ok(defended) => events.extend(defended),
            Err(err) => events.push(BattleEvent::TurnLost {
                actor: name,
                reason: err.to_string(),
            }),
        }
        events
    }

    fn start_round(&mut self) {
        if self.scheduler.round() >= self.resolver.config().round_limit {
            self.lose(DefeatReason::RoundLimit);
            return;
        }

        let table = self.state.speed_table();
        if self.scheduler.build_order(&table).is_err() {
            self.events.push(BattleEvent::TurnOrderRebuilt);
            self.check_end();
            return;
        }
        self.total_rounds += 1;
        self.events.push(BattleEvent::RoundStarted {
            round: self.scheduler.round(),
        });
    }

    /// Turn start: defending ends, SP regenerates, first-turn passives fire.
    fn begin_turn(&mut self, actor: CombatantId, rng: &mut dyn RngCore) {
        let regen = self.resolver.config().sp_regen_per_turn;
        let Some(unit) = self.state.get_mut(actor) else {
            return;
        };
        unit.defending = false;
        unit.gain_sp(regen);
        self.events.push(BattleEvent::TurnStarted {
            actor: unit.name().to_owned(),
            hp: unit.hp.current,
            max_hp: unit.hp.maximum,
            sp: unit.sp.current,
        });

        if self.started.insert(actor) {
            let events = self.resolver.battle_start(&mut self.state, actor, rng);
            self.events.extend(events);
        }
    }

    /// Turn end: the actor's effects tick once, then end conditions.
    fn end_turn(&mut self, actor: CombatantId) {
        if let Some(unit) = self.state.get_mut(actor).filter(|u| u.is_alive()) {
            let ticked = unit.effects.tick(&mut unit.hp);
            let name = unit.name().to_owned();
            let died = !unit.is_alive();
            self.events.extend(BattleEvent::effects(&name, ticked));
            if died {
                self.events.push(BattleEvent::Defeated { name });
            }
        }
        self.check_end();
    }

    fn check_end(&mut self) {
        if self.state.is_wiped(Side::Ally) {
            self.lose(DefeatReason::TeamWiped);
        } else if self.state.is_wiped(Side::Enemy) {
            self.phase = BattlePhase::WaveCleared;
        }
    }

    fn clear_wave(&mut self, rng: &mut dyn RngCore) {
        self.waves_cleared += 1;
        self.scheduler.reset();
        self.events.push(BattleEvent::WaveCleared { wave: self.wave });

        if self.wave >= self.plan.waves {
            self.win(rng);
            return;
        }

        let config = self.resolver.config();
        let (heal_percent, sp_restore) = (config.wave_heal_percent, config.wave_sp_restore);
        for unit in self.state.allies.iter_mut().filter(|u| u.is_alive()) {
            unit.defending = false;
            let healed = unit.heal(unit.hp.percent_of_max(heal_percent));
            if healed > 0 {
                self.events.push(BattleEvent::Healed {
                    target: unit.name().to_owned(),
                    amount: healed,
                    source: "wave rest".to_owned(),
                });
            }
            let restored = unit.gain_sp(sp_restore);
            if restored > 0 {
                self.events.push(BattleEvent::SpChanged {
                    target: unit.name().to_owned(),
                    delta: restored as i32,
                    current: unit.sp.current,
                });
            }
        }
        self.phase = BattlePhase::WaveSetup;
    }

    fn win(&mut self, rng: &mut dyn RngCore) {
        let rewards = RewardTable::compute(&self.plan, self.waves_cleared, rng);

        let mut units = Vec::with_capacity(self.state.allies.len());
        let mut level_ups = Vec::new();
        for ally in &self.state.allies {
            let UnitKind::Player(unit) = &ally.kind else {
                continue;
            };
            let mut unit = unit.clone();
            let progress = unit.gain_experience(rewards.experience);
            if progress.levels_gained > 0 {
                level_ups.push((unit.uid, progress));
            }
            units.push(unit);
        }

        self.phase = BattlePhase::BattleWon;
        self.events.push(BattleEvent::Victory);
        self.outcome = Some(BattleOutcome::Won(BattleReport {
            plan: self.plan,
            rewards,
            units,
            level_ups,
            rounds: self.total_rounds,
        }));
    }

    fn lose(&mut self, reason: DefeatReason) {
        self.pending = None;
        self.phase = BattlePhase::BattleLost;
        self.events.push(BattleEvent::Defeat { reason });
        self.outcome = Some(BattleOutcome::Lost {
            reason,
            waves_cleared: self.waves_cleared,
            rounds: self.total_rounds,
        });
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::battle::FixedWaves;
    use crate::effects::StatusEffect;
    use crate::stats::StatBlock;
    use crate::unit::{EnemySpec, Rarity, Species, UnitId};

    fn hero(block: StatBlock) -> Unit {
        Unit::summon(UnitId(1), Species::new("hero", "Hero", Rarity::Rare, block))
    }

    fn foe(name: &str, block: StatBlock) -> EnemySpec {
        EnemySpec::from_species(&Species::new(name, name, Rarity::Common, block), block)
    }

    fn attack_first_enemy(view: &BattleSnapshot, actor: CombatantId, _rng: &mut dyn RngCore) -> Action {
        view.opponents_of(actor)
            .next()
            .map_or(Action::Defend, |target| Action::attack(target.id))
    }

    #[test]
    fn one_on_one_is_won_in_two_hits() {
        let plan = EncounterPlan::dungeon(1);
        let mut battle =
            BattleController::new(vec![hero(StatBlock::new(100, 25, 5, 20))], plan, BattleConfig::default())
                .unwrap();
        let mut waves = FixedWaves::single(vec![foe("Zombie", StatBlock::new(40, 5, 5, 10))]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let outcome = battle
            .run_with(&mut attack_first_enemy, &mut waves, &mut rng)
            .unwrap();

        let events = battle.drain_events();
        let hits: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                BattleEvent::Attacked { attacker, outcome, .. } if attacker == "Hero" => {
                    Some(outcome.damage())
                }
                _ => None,
            })
            .collect();
        assert_eq!(hits, vec![20, 20]);
        assert!(outcome.is_victory());
        assert_eq!(battle.phase(), BattlePhase::BattleWon);

        let report = outcome.report().unwrap();
        assert_eq!(report.rewards.experience, 60);
        assert_eq!(report.units[0].exp, 60);
    }

    #[test]
    fn faster_unit_acts_first() {
        let plan = EncounterPlan::dungeon(1);
        let mut battle =
            BattleController::new(vec![hero(StatBlock::new(100, 25, 5, 10))], plan, BattleConfig::default())
                .unwrap();
        let mut waves = FixedWaves::single(vec![foe("Zombie", StatBlock::new(400, 5, 5, 30))]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        while battle.poll(&mut waves, &mut rng).unwrap() != Poll::AwaitingAction(CombatantId::ally(0)) {}
        let events = battle.drain_events();
        let first_turn = events
            .iter()
            .find_map(|e| match e {
                BattleEvent::TurnStarted { actor, .. } => Some(actor.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_turn, "Zombie");
    }

    #[test]
    fn rejected_actions_keep_the_turn() {
        let plan = EncounterPlan::dungeon(1);
        let mut battle =
            BattleController::new(vec![hero(StatBlock::new(100, 25, 5, 20))], plan, BattleConfig::default())
                .unwrap();
        let mut waves = FixedWaves::single(vec![foe("Zombie", StatBlock::new(40, 5, 5, 10))]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let hero_id = CombatantId::ally(0);
        while battle.poll(&mut waves, &mut rng).unwrap() != Poll::AwaitingAction(hero_id) {}
        let before = battle.state().clone();

        let err = battle.act(Action::attack(hero_id), &mut rng).unwrap_err();
        assert_eq!(err, ActionError::InvalidTarget(hero_id));
        assert_eq!(battle.pending(), Some(hero_id));
        assert_eq!(battle.state(), &before);
        assert_eq!(battle.poll(&mut waves, &mut rng).unwrap(), Poll::AwaitingAction(hero_id));
    }

    /// Hands out `fumbles` self-targeted attacks before playing properly.
    struct Fumbling {
        fumbles: u32,
    }

    impl ActionPolicy for Fumbling {
        fn choose(&mut self, view: &BattleSnapshot, actor: CombatantId, rng: &mut dyn RngCore) -> Action {
            if self.fumbles > 0 {
                self.fumbles -= 1;
                return Action::attack(actor);
            }
            attack_first_enemy(view, actor, rng)
        }
    }

    #[test]
    fn rejected_policy_actions_are_logged_before_defending() {
        let plan = EncounterPlan::dungeon(1);
        let mut battle =
            BattleController::new(vec![hero(StatBlock::new(100, 25, 5, 20))], plan, BattleConfig::default())
                .unwrap();
        let mut waves = FixedWaves::single(vec![foe("Zombie", StatBlock::new(40, 5, 5, 10))]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let outcome = battle
            .run_with(&mut Fumbling { fumbles: 1 }, &mut waves, &mut rng)
            .unwrap();
        assert!(outcome.is_victory());

        let events = battle.drain_events();
        let replaced = events
            .iter()
            .position(|e| {
                *e == BattleEvent::ActionReplaced {
                    actor: "Hero".into(),
                    reason: ActionError::InvalidTarget(CombatantId::ally(0)).to_string(),
                }
            })
            .unwrap();
        assert!(matches!(&events[replaced + 1], BattleEvent::Defended { actor, .. } if actor == "Hero"));
    }

    #[test]
    fn rejected_enemy_actions_fall_back_with_a_record() {
        let plan = EncounterPlan::dungeon(1);
        let mut battle =
            BattleController::new(vec![hero(StatBlock::new(100, 25, 5, 20))], plan, BattleConfig::default())
                .unwrap();
        let mut waves = FixedWaves::single(vec![foe("Zombie", StatBlock::new(400, 5, 5, 10))]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        while battle.poll(&mut waves, &mut rng).unwrap() != Poll::AwaitingAction(CombatantId::ally(0)) {}

        let zombie = CombatantId::enemy(0);
        let events = battle.resolve_or_defend(zombie, Action::attack(zombie), &mut rng);
        assert_eq!(
            events[0],
            BattleEvent::ActionReplaced {
                actor: "Zombie".into(),
                reason: ActionError::InvalidTarget(zombie).to_string(),
            }
        );
        assert!(matches!(&events[1], BattleEvent::Defended { actor, .. } if actor == "Zombie"));
        assert!(battle.state().enemies[0].defending);

        battle.state.enemies[0].take_damage(10_000);
        let events = battle.resolve_or_defend(zombie, Action::Defend, &mut rng);
        let reason = ActionError::ActorUnavailable(zombie).to_string();
        assert_eq!(
            events,
            vec![
                BattleEvent::ActionReplaced {
                    actor: "Zombie".into(),
                    reason: reason.clone(),
                },
                BattleEvent::TurnLost {
                    actor: "Zombie".into(),
                    reason,
                },
            ]
        );
    }

    #[test]
    fn stunned_units_lose_their_turn_but_still_tick() {
        let plan = EncounterPlan::dungeon(1);
        let mut battle =
            BattleController::new(vec![hero(StatBlock::new(100, 25, 5, 20))], plan, BattleConfig::default())
                .unwrap();
        let mut waves = FixedWaves::single(vec![foe("Zombie", StatBlock::new(400, 5, 5, 10))]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        battle.poll(&mut waves, &mut rng).unwrap();
        battle.state.allies[0].effects.add(StatusEffect::stun(1, "Slender"));
        // round start, then the stunned hero's turn
        battle.poll(&mut waves, &mut rng).unwrap();
        assert_eq!(battle.poll(&mut waves, &mut rng).unwrap(), Poll::Progressed);

        let events = battle.drain_events();
        assert!(events.contains(&BattleEvent::TurnSkipped { actor: "Hero".into() }));
        assert!(!battle.state().allies[0].effects.is_stunned());
    }

    #[test]
    fn waves_rest_the_team_in_between() {
        let plan = EncounterPlan::campaign(1, 1).with_waves(2);
        let mut battle =
            BattleController::new(vec![hero(StatBlock::new(100, 60, 5, 20))], plan, BattleConfig::default())
                .unwrap();
        let mut waves = FixedWaves::new([
            vec![foe("Ghoul", StatBlock::new(30, 25, 0, 30))],
            vec![foe("Wraith", StatBlock::new(30, 25, 0, 30))],
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let outcome = battle
            .run_with(&mut attack_first_enemy, &mut waves, &mut rng)
            .unwrap();
        assert!(outcome.is_victory());

        let events = battle.drain_events();
        assert!(events.contains(&BattleEvent::WaveCleared { wave: 1 }));
        assert!(events.iter().any(|e| matches!(
            e,
            BattleEvent::Healed { source, .. } if source == "wave rest"
        )));
        assert!(events.contains(&BattleEvent::WaveCleared { wave: 2 }));
    }

    #[test]
    fn hopeless_stalemate_hits_the_round_limit() {
        let config = BattleConfig {
            round_limit: 3,
            ..BattleConfig::default()
        };
        let mut battle =
            BattleController::new(vec![hero(StatBlock::new(100, 5, 500, 20))], EncounterPlan::dungeon(1), config)
                .unwrap();
        let mut waves = FixedWaves::single(vec![foe("Golem", StatBlock::new(900, 5, 500, 10))]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut defend = |_: &BattleSnapshot, _: CombatantId, _: &mut dyn RngCore| Action::Defend;
        let outcome = battle.run_with(&mut defend, &mut waves, &mut rng).unwrap();
        assert_eq!(
            outcome,
            BattleOutcome::Lost {
                reason: DefeatReason::RoundLimit,
                waves_cleared: 0,
                rounds: 3,
            }
        );
    }

    #[test]
    fn retreat_ends_without_rewards() {
        struct Tally(u32);
        impl RewardSink for Tally {
            fn deliver(&mut self, _report: &BattleReport) {
                self.0 += 1;
            }
        }

        let mut battle = BattleController::new(
            vec![hero(StatBlock::new(100, 25, 5, 20))],
            EncounterPlan::dungeon(1),
            BattleConfig::default(),
        )
        .unwrap();
        let mut waves = FixedWaves::single(vec![foe("Zombie", StatBlock::new(40, 5, 5, 10))]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        battle.poll(&mut waves, &mut rng).unwrap();
        battle.retreat().unwrap();
        assert_eq!(battle.retreat(), Err(ActionError::BattleOver));

        let Poll::Finished(outcome) = battle.poll(&mut waves, &mut rng).unwrap() else {
            panic!("retreat should finish the battle");
        };
        let mut sink = Tally(0);
        assert!(!outcome.deliver(&mut sink));
        assert_eq!(sink.0, 0);
    }

    #[test]
    fn empty_plans_and_waves_are_errors() {
        let team = vec![hero(StatBlock::new(100, 25, 5, 20))];
        let plan = EncounterPlan::dungeon(1).with_waves(0);
        assert_eq!(
            BattleController::new(team.clone(), plan, BattleConfig::default()).unwrap_err(),
            BattleError::NoWaves
        );

        let mut battle = BattleController::new(team, EncounterPlan::dungeon(1), BattleConfig::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            battle.poll(&mut FixedWaves::default(), &mut rng),
            Err(BattleError::EmptyWave)
        );
    }
}
