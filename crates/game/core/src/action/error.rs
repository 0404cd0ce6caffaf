//! Action validation errors.
//!
//! Every variant is raised before any state is touched, so a rejected action
//! never consumes the turn.

use crate::battle::CombatantId;
use crate::error::{ErrorSeverity, GameError};

/// Errors that reject a chosen action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Target is unknown or on the wrong side.
    #[error("{0} is not a valid target")]
    InvalidTarget(CombatantId),

    #[error("{0} is already defeated")]
    TargetDefeated(CombatantId),

    /// Ghosted target while other units on its side still live.
    #[error("{0} cannot be targeted right now")]
    TargetUntargetable(CombatantId),

    #[error("this skill needs a target")]
    TargetRequired,

    /// The skill picks its own targets.
    #[error("this skill does not take a target")]
    TargetNotAllowed,

    #[error("not enough SP: need {need}, have {have}")]
    InsufficientResources { need: u32, have: u32 },

    #[error("no usable skill")]
    NoSkill,

    /// Fear blocks skills.
    #[error("too frightened to use a skill")]
    SkillSealed,

    #[error("acting combatant {0} is missing or defeated")]
    ActorUnavailable(CombatantId),

    #[error("no player unit is waiting for an action")]
    NotAwaitingAction,

    #[error("the battle is over")]
    BattleOver,
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTarget(_)
            | Self::TargetDefeated(_)
            | Self::TargetRequired
            | Self::TargetNotAllowed
            | Self::NoSkill => ErrorSeverity::Validation,
            Self::TargetUntargetable(_)
            | Self::InsufficientResources { .. }
            | Self::SkillSealed
            | Self::NotAwaitingAction
            | Self::BattleOver => ErrorSeverity::Recoverable,
            Self::ActorUnavailable(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTarget(_) => "ACTION_INVALID_TARGET",
            Self::TargetDefeated(_) => "ACTION_TARGET_DEFEATED",
            Self::TargetUntargetable(_) => "ACTION_TARGET_UNTARGETABLE",
            Self::TargetRequired => "ACTION_TARGET_REQUIRED",
            Self::TargetNotAllowed => "ACTION_TARGET_NOT_ALLOWED",
            Self::InsufficientResources { .. } => "ACTION_INSUFFICIENT_RESOURCES",
            Self::NoSkill => "ACTION_NO_SKILL",
            Self::SkillSealed => "ACTION_SKILL_SEALED",
            Self::ActorUnavailable(_) => "ACTION_ACTOR_UNAVAILABLE",
            Self::NotAwaitingAction => "ACTION_NOT_AWAITING",
            Self::BattleOver => "ACTION_BATTLE_OVER",
        }
    }
}
