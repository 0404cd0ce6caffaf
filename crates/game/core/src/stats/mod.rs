//! Layered stat system.
//!
//! ```text
//! Layer 1: species base × level scaling  (scaling.rs)
//! Layer 2: + gear and set bonuses        (model.rs, totals in bonus.rs)
//! ```
//!
//! Battle-time buffs and debuffs are not part of this module; they are read
//! from the effect ledger on top of [`EffectiveStats`].

pub mod block;
pub mod bonus;
pub mod gear;
pub mod model;
pub mod resources;
pub mod scaling;

pub use block::{StatBlock, StatKind};
pub use bonus::{GearBonus, StatBounds};
pub use gear::{
    GearCategory, GearId, GearPiece, GearSet, GearSlot, Loadout, LoadoutError, RollKind,
    SetDefinition, StatRoll,
};
pub use model::{EffectiveStats, StatBonuses, StatBreakdown, StatLine, StatModel};
pub use resources::ResourceMeter;
pub use scaling::{LevelScaling, scale_to_level};
