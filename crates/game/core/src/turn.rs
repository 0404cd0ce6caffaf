//! Round-based turn scheduling.
//!
//! Each round the controller hands the scheduler every living combatant with
//! its current effective speed. The scheduler orders them fastest first and
//! yields them one at a time, skipping anyone who died since the order was
//! built. The order is rebuilt every round so speed changes and deaths take
//! effect immediately.
//!
//! ```text
//! Idle ──build_order──▶ OrderBuilt ──advance──▶ Acting ──advance──▶ Acting …
//!   ▲                                                     │ queue empty
//!   └────────────── advance ◀── RoundComplete ◀───────────┘
//! ```

use std::collections::VecDeque;

use crate::battle::CombatantId;
use crate::error::{ErrorSeverity, GameError};

/// Errors that can occur during turn operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no living combatants to order")]
    NoLivingCombatants,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLivingCombatants => "TURN_NO_LIVING_COMBATANTS",
        }
    }
}

/// Scheduler lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchedulerState {
    #[default]
    Idle,
    OrderBuilt,
    Acting,
    RoundComplete,
}

/// Speed-ordered queue of combatants for the current round.
#[derive(Clone, Debug, Default)]
pub struct TurnScheduler {
    state: SchedulerState,
    queue: VecDeque<CombatantId>,
    current: Option<CombatantId>,
    round: u32,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Rounds built since the last reset.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Combatant currently acting, if any.
    pub fn current(&self) -> Option<CombatantId> {
        self.current
    }

    /// Combatants still waiting this round, in order.
    pub fn pending(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.queue.iter().copied()
    }

    /// Orders `living` by descending speed for a new round.
    ///
    /// Ties keep their input order.
    pub fn build_order(&mut self, living: &[(CombatantId, i32)]) -> Result<(), TurnError> {
        if living.is_empty() {
            self.queue.clear();
            self.current = None;
            self.state = SchedulerState::Idle;
            return Err(TurnError::NoLivingCombatants);
        }

        let mut ordered = living.to_vec();
        ordered.sort_by_key(|(_, speed)| core::cmp::Reverse(*speed));

        self.queue = ordered.into_iter().map(|(id, _)| id).collect();
        self.current = None;
        self.round += 1;
        self.state = SchedulerState::OrderBuilt;
        Ok(())
    }

    /// Yields the next living combatant of the round.
    ///
    /// Returns `None` once the round is exhausted (state becomes
    /// `RoundComplete`) and on the following call (state returns to `Idle`).
    pub fn advance(&mut self, is_alive: impl Fn(CombatantId) -> bool) -> Option<CombatantId> {
        match self.state {
            SchedulerState::Idle => return None,
            SchedulerState::RoundComplete => {
                self.state = SchedulerState::Idle;
                return None;
            }
            SchedulerState::OrderBuilt | SchedulerState::Acting => {}
        }

        while let Some(next) = self.queue.pop_front() {
            if is_alive(next) {
                self.current = Some(next);
                self.state = SchedulerState::Acting;
                return Some(next);
            }
        }

        self.current = None;
        self.state = SchedulerState::RoundComplete;
        None
    }

    /// Drops the current order (wave change).
    pub fn reset(&mut self) {
        self.queue.clear();
        self.current = None;
        self.round = 0;
        self.state = SchedulerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::Side;

    fn ally(slot: u8) -> CombatantId {
        CombatantId::new(Side::Ally, slot)
    }

    fn enemy(slot: u8) -> CombatantId {
        CombatantId::new(Side::Enemy, slot)
    }

    #[test]
    fn orders_by_descending_speed() {
        let mut scheduler = TurnScheduler::new();
        scheduler
            .build_order(&[(ally(0), 30), (ally(1), 10), (enemy(0), 20)])
            .unwrap();

        let order: Vec<_> = core::iter::from_fn(|| scheduler.advance(|_| true)).collect();
        assert_eq!(order, vec![ally(0), enemy(0), ally(1)]);
        assert_eq!(scheduler.state(), SchedulerState::RoundComplete);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut scheduler = TurnScheduler::new();
        scheduler
            .build_order(&[(enemy(2), 15), (ally(0), 15), (enemy(0), 15)])
            .unwrap();
        let order: Vec<_> = core::iter::from_fn(|| scheduler.advance(|_| true)).collect();
        assert_eq!(order, vec![enemy(2), ally(0), enemy(0)]);
    }

    #[test]
    fn dead_combatants_are_skipped_mid_round() {
        let mut scheduler = TurnScheduler::new();
        scheduler
            .build_order(&[(ally(0), 30), (ally(1), 10), (enemy(0), 20)])
            .unwrap();

        assert_eq!(scheduler.advance(|_| true), Some(ally(0)));
        // enemy(0) died during ally(0)'s action
        let dead = enemy(0);
        assert_eq!(scheduler.advance(|id| id != dead), Some(ally(1)));
    }

    #[test]
    fn rebuild_excludes_combatant_that_died() {
        let mut scheduler = TurnScheduler::new();
        scheduler
            .build_order(&[(ally(0), 30), (ally(1), 10), (enemy(0), 20)])
            .unwrap();
        while scheduler.advance(|_| true).is_some() {}

        scheduler.build_order(&[(ally(1), 10), (enemy(0), 20)]).unwrap();
        let order: Vec<_> = core::iter::from_fn(|| scheduler.advance(|_| true)).collect();
        assert_eq!(order, vec![enemy(0), ally(1)]);
        assert_eq!(scheduler.round(), 2);
    }

    #[test]
    fn state_machine_walks_through_a_round() {
        let mut scheduler = TurnScheduler::new();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.advance(|_| true), None);

        scheduler.build_order(&[(ally(0), 5)]).unwrap();
        assert_eq!(scheduler.state(), SchedulerState::OrderBuilt);
        scheduler.advance(|_| true);
        assert_eq!(scheduler.state(), SchedulerState::Acting);
        assert_eq!(scheduler.advance(|_| true), None);
        assert_eq!(scheduler.state(), SchedulerState::RoundComplete);
        assert_eq!(scheduler.advance(|_| true), None);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn empty_order_is_reported() {
        let mut scheduler = TurnScheduler::new();
        assert_eq!(scheduler.build_order(&[]), Err(TurnError::NoLivingCombatants));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }
}
