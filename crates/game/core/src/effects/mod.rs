//! Status effects and the per-combatant ledger that owns them.
//!
//! The ledger knows nothing about targeting or turn order. Ghost and taunt
//! are exposed as flags; `combat::targeting` decides what they mean.

mod effect;
mod ledger;

pub use effect::{Duration, EffectKind, Magnitude, StatusEffect};
pub use ledger::{EffectEvent, EffectLedger, PAGE_DEBUFF_PERCENT, PAGE_STUN_TURNS, PAGE_THRESHOLD};
