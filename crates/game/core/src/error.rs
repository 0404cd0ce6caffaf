//! Common error infrastructure for dread-core.
//!
//! Domain-specific errors (`ActionError`, `TurnError`, `LoadoutError`) live
//! next to the operations they validate and implement [`GameError`] so callers
//! can pick a recovery strategy without matching on every variant.
//!
//! Nothing in the combat core is fatal: every failure either rejects an action
//! before state is touched or degrades to a numeric clamp.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with the same or an alternative choice.
    ///
    /// Examples: not enough SP for a skill, target is currently untargetable
    Recoverable,

    /// Validation error - invalid input, re-prompt before retrying.
    ///
    /// Examples: target does not exist, target already defeated
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: acting combatant missing from the battle state
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the caller may simply choose again.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all dread-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
