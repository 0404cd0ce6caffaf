//! One running encounter.
//!
//! [`BattleRunner`] owns the controller and its wave source, and wraps every
//! step in a `battle` tracing span. Clients either step it themselves
//! (interactive play) or hand it an [`ActionPolicy`] and let [`BattleRunner::run`]
//! drive it to the end.

use rand::RngCore;
use tracing::{Span, debug, info, info_span, warn};

use dread_core::{
    Action, ActionError, ActionPolicy, BattleController, BattleEvent, BattleOutcome, BattlePhase,
    BattleSnapshot, CombatantId, EncounterMode, EncounterPlan, GameError, Poll,
};

use crate::error::Result;
use crate::waves::RosterWaves;

#[derive(Debug)]
pub struct BattleRunner {
    controller: BattleController,
    waves: RosterWaves,
    span: Span,
}

impl BattleRunner {
    pub fn new(controller: BattleController, waves: RosterWaves) -> Self {
        let plan = *controller.plan();
        let span = match plan.mode {
            EncounterMode::Campaign { world, stage } => {
                info_span!("battle", mode = "campaign", world, stage, boss = plan.boss)
            }
            EncounterMode::Dungeon { floor } => {
                info_span!("battle", mode = "dungeon", floor, boss = plan.boss)
            }
        };
        Self {
            controller,
            waves,
            span,
        }
    }

    pub fn plan(&self) -> &EncounterPlan {
        self.controller.plan()
    }

    pub fn phase(&self) -> BattlePhase {
        self.controller.phase()
    }

    pub fn pending(&self) -> Option<CombatantId> {
        self.controller.pending()
    }

    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.controller.outcome()
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        self.controller.snapshot()
    }

    /// Advances one step.
    pub fn poll(&mut self, rng: &mut dyn RngCore) -> Result<Poll> {
        let _guard = self.span.enter();
        let poll = self.controller.poll(&mut self.waves, rng)?;
        if let Poll::Finished(outcome) = &poll {
            log_outcome(outcome);
        }
        Ok(poll)
    }

    /// Completes the pending player turn. Rejections leave the turn pending.
    pub fn act(&mut self, action: Action, rng: &mut dyn RngCore) -> std::result::Result<(), ActionError> {
        let _guard = self.span.enter();
        self.controller.act(action, rng).inspect_err(|err| {
            debug!(
                target: "runtime::battle",
                ?action,
                code = err.error_code(),
                severity = err.severity().as_str(),
                %err,
                "action rejected"
            );
        })
    }

    pub fn retreat(&mut self) -> std::result::Result<(), ActionError> {
        let _guard = self.span.enter();
        self.controller.retreat()?;
        info!(target: "runtime::battle", "retreated");
        Ok(())
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        let _guard = self.span.enter();
        let events = self.controller.drain_events();
        for event in &events {
            debug!(target: "runtime::battle", "{event}");
        }
        events
    }

    /// Runs to completion with `policy` choosing for the player.
    ///
    /// `observer` sees every event as it happens. An action the policy gets
    /// wrong is logged and replaced by defending.
    pub fn run(
        &mut self,
        policy: &mut dyn ActionPolicy,
        rng: &mut dyn RngCore,
        observer: &mut dyn FnMut(&BattleEvent),
    ) -> Result<BattleOutcome> {
        loop {
            let poll = self.poll(rng)?;
            for event in self.drain_events() {
                observer(&event);
            }

            match poll {
                Poll::Finished(outcome) => return Ok(outcome),
                Poll::Progressed => {}
                Poll::AwaitingAction(actor) => {
                    let view = self.snapshot();
                    let action = policy.choose(&view, actor, rng);
                    let _guard = self.span.enter();
                    if let Some(err) = self.controller.act_or_defend(action, rng)? {
                        warn!(
                            target: "runtime::battle",
                            %actor,
                            ?action,
                            code = err.error_code(),
                            %err,
                            "illegal action from policy, defending"
                        );
                    }
                }
            }
        }
    }
}

fn log_outcome(outcome: &BattleOutcome) {
    match outcome {
        BattleOutcome::Won(report) => info!(
            target: "runtime::battle",
            rounds = report.rounds,
            experience = report.rewards.experience,
            cash = report.rewards.cash,
            gems = report.rewards.gems,
            drops = report.rewards.drops.len(),
            "victory"
        ),
        BattleOutcome::Lost {
            reason,
            waves_cleared,
            rounds,
        } => info!(target: "runtime::battle", ?reason, waves_cleared, rounds, "defeat"),
        BattleOutcome::Retreated { waves_cleared } => {
            info!(target: "runtime::battle", waves_cleared, "encounter abandoned")
        }
    }
}
