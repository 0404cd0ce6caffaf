//! Combat math.
//!
//! Pure functions over effective stats: hit and crit rolls, damage, strike
//! resolution and target selection. Nothing here mutates a combatant.

pub mod damage;
pub mod hit;
pub mod result;
pub mod targeting;

pub use damage::{apply_defending, calculate_damage, scaled_damage};
pub use hit::{calculate_hit_chance, check_crit, check_hit, roll_percent};
pub use result::{StrikeMode, resolve_strike};
pub use targeting::{default_target, is_selectable};
