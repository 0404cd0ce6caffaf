use crate::action::ActionError;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while setting up an encounter or a wave.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("a battle needs at least one unit")]
    EmptyTeam,

    #[error("team has {got} units, at most {max} may fight")]
    TeamTooLarge { max: usize, got: usize },

    #[error("wave source produced no enemies")]
    EmptyWave,

    #[error("wave has {got} enemies, at most {max} fit on the field")]
    WaveTooLarge { max: usize, got: usize },

    #[error("encounter plan has no waves")]
    NoWaves,

    /// An automated policy kept choosing illegal actions.
    #[error("automated action rejected: {0}")]
    Action(#[from] ActionError),
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyTeam | Self::TeamTooLarge { .. } => ErrorSeverity::Validation,
            Self::EmptyWave | Self::WaveTooLarge { .. } | Self::NoWaves | Self::Action(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTeam => "BATTLE_EMPTY_TEAM",
            Self::TeamTooLarge { .. } => "BATTLE_TEAM_TOO_LARGE",
            Self::EmptyWave => "BATTLE_EMPTY_WAVE",
            Self::WaveTooLarge { .. } => "BATTLE_WAVE_TOO_LARGE",
            Self::NoWaves => "BATTLE_NO_WAVES",
            Self::Action(_) => "BATTLE_ACTION_REJECTED",
        }
    }
}
