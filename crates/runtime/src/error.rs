//! Error types surfaced by the runtime API.
//!
//! [`SessionError`] covers bookkeeping on the player's collection;
//! [`RuntimeError`] wraps it together with battle failures so callers can
//! bubble everything up with one `?`.

use thiserror::Error;

use dread_core::{
    ActionError, BattleError, ErrorSeverity, GameError, GearId, LoadoutError, PotionSize, UnitId,
};

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Failures of session operations. None of them mutate the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unit {0} is not in the collection")]
    UnknownUnit(UnitId),

    #[error("gear {0:?} is not in the gear pool")]
    UnknownGear(GearId),

    #[error("unknown species {0:?}")]
    UnknownSpecies(String),

    #[error("a team needs 1 to {max} units, got {got}")]
    TeamSize { max: usize, got: usize },

    #[error("unit {0} appears more than once")]
    DuplicateUnit(UnitId),

    #[error("world {world} stage {stage} does not exist")]
    UnknownStage { world: u32, stage: u32 },

    #[error("world {world} stage {stage} is still locked")]
    StageLocked { world: u32, stage: u32 },

    #[error("dungeon floors range from 1 to {max}, got {floor}")]
    InvalidFloor { floor: u32, max: u32 },

    #[error("not enough cash: need {need}, have {have}")]
    NotEnoughCash { need: u64, have: u64 },

    #[error("not enough {size}: need {need}, have {have}")]
    NotEnoughPotions { size: PotionSize, need: u32, have: u32 },

    #[error("no fodder selected")]
    NoFodder,

    #[error("unit {0} cannot be its own fodder")]
    FodderIsBase(UnitId),

    #[error(transparent)]
    Loadout(#[from] LoadoutError),

    #[error("malformed save data: {0}")]
    Malformed(String),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Malformed(_) => ErrorSeverity::Internal,
            Self::Loadout(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => "SESSION_UNKNOWN_UNIT",
            Self::UnknownGear(_) => "SESSION_UNKNOWN_GEAR",
            Self::UnknownSpecies(_) => "SESSION_UNKNOWN_SPECIES",
            Self::TeamSize { .. } => "SESSION_TEAM_SIZE",
            Self::DuplicateUnit(_) => "SESSION_DUPLICATE_UNIT",
            Self::UnknownStage { .. } => "SESSION_UNKNOWN_STAGE",
            Self::StageLocked { .. } => "SESSION_STAGE_LOCKED",
            Self::InvalidFloor { .. } => "SESSION_INVALID_FLOOR",
            Self::NotEnoughCash { .. } => "SESSION_NOT_ENOUGH_CASH",
            Self::NotEnoughPotions { .. } => "SESSION_NOT_ENOUGH_POTIONS",
            Self::NoFodder => "SESSION_NO_FODDER",
            Self::FodderIsBase(_) => "SESSION_FODDER_IS_BASE",
            Self::Loadout(err) => err.error_code(),
            Self::Malformed(_) => "SESSION_MALFORMED",
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Malformed(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Action(#[from] ActionError),

    /// The encounter was asked to conclude before it finished.
    #[error("the encounter is still running")]
    EncounterRunning,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Session(err) => err.severity(),
            Self::Battle(err) => err.severity(),
            Self::Action(err) => err.severity(),
            Self::EncounterRunning => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Session(err) => err.error_code(),
            Self::Battle(err) => err.error_code(),
            Self::Action(err) => err.error_code(),
            Self::EncounterRunning => "RUNTIME_ENCOUNTER_RUNNING",
        }
    }
}
