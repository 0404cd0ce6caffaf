//! Deterministic combat rules and data types shared across clients.
//!
//! `dread-core` defines the canonical battle layer (stats, status effects,
//! turn order, actions, encounters) and exposes pure APIs that the runtime
//! and the CLI build on. All battle mutation flows through
//! [`battle::BattleController`]; randomness is always injected.
pub mod ability;
pub mod action;
pub mod battle;
pub mod combat;
pub mod config;
pub mod effects;
pub mod error;
pub mod passive;
pub mod progression;
pub mod stats;
pub mod turn;
pub mod unit;

pub use ability::{Ability, AbilityId, AbilityRegistry, SkillContext, TargetRule};
pub use action::{Action, ActionError, ActionPolicy, ActionResolver, EnemyAi};
pub use battle::{
    BattleController, BattleError, BattleEvent, BattleOutcome, BattlePhase, BattleReport,
    BattleRewards, BattleSnapshot, BattleState, BattleUnit, CombatantId, DefeatReason,
    DifficultyContext, EncounterMode, EncounterPlan, FixedWaves, GearDrop, ItemDrop, Poll,
    RewardSink, RewardTable, Side, StrikeOutcome, UnitSnapshot, WaveSource,
};
pub use config::{BattleConfig, CritRule};
pub use effects::{EffectEvent, EffectKind, EffectLedger, StatusEffect};
pub use error::{ErrorSeverity, GameError};
pub use passive::{PassiveHook, PassiveId, PassiveRegistry};
pub use progression::{
    GEMS_PER_PLAYER_LEVEL, LevelProgress, PotionSize, apply_experience, fodder_upgrade_cost,
    fodder_value, lifetime_experience, xp_needed,
};
pub use stats::{
    EffectiveStats, GearCategory, GearId, GearPiece, GearSet, GearSlot, Loadout, LoadoutError,
    ResourceMeter, StatBlock, StatKind, StatModel, StatRoll,
};
pub use turn::{SchedulerState, TurnError, TurnScheduler};
pub use unit::{CritGrowth, EnemySpec, Rarity, Species, Unit, UnitId};
