//! Encounters: combatants, the field, the controller and what it reports.
//!
//! [`BattleController`] owns a [`BattleState`] for one encounter and steps it
//! wave by wave. Clients read [`BattleEvent`]s and [`BattleSnapshot`]s; they
//! never mutate the state directly.

mod controller;
mod encounter;
mod error;
mod event;
mod rewards;
mod snapshot;
mod state;
mod unit;

pub use controller::{BattleController, BattleOutcome, BattlePhase, Poll};
pub use encounter::{DifficultyContext, EncounterMode, EncounterPlan, FixedWaves, WaveSource};
pub use error::BattleError;
pub use event::{BattleEvent, DefeatReason, StrikeOutcome};
pub use rewards::{BattleReport, BattleRewards, GearDrop, ItemDrop, RewardSink, RewardTable};
pub use snapshot::{BattleSnapshot, UnitSnapshot};
pub use state::{BattleState, Team, Wave};
pub use unit::{BattleUnit, CombatantId, Side, UnitKind};
