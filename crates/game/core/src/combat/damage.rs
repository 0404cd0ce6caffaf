//! Damage calculation and application.

use crate::config::CritRule;

/// Calculate damage from a single strike.
///
/// # Formula
///
/// ```text
/// normal:   max(1, attack − defense)
/// critical: max(1, attack × crit_damage / 100)   (CritRule::StatDriven)
///           max(1, attack × 2)                   (CritRule::Double)
/// ```
///
/// A critical hit replaces the subtractive formula, so defense does not
/// reduce it.
///
/// # Arguments
///
/// * `attack` - Attacker's effective attack
/// * `defense` - Defender's effective defense
/// * `crit_damage` - Attacker's crit damage multiplier in percent
/// * `is_critical` - Whether this is a critical hit
/// * `rule` - Which crit formula applies
///
/// # Returns
///
/// Final damage value, never less than 1
pub fn calculate_damage(
    attack: i32,
    defense: i32,
    crit_damage: i32,
    is_critical: bool,
    rule: CritRule,
) -> u32 {
    let attack = i64::from(attack.max(0));
    let raw = if is_critical {
        match rule {
            CritRule::StatDriven => attack * i64::from(crit_damage.max(100)) / 100,
            CritRule::Double => attack * 2,
        }
    } else {
        attack - i64::from(defense.max(0))
    };

    raw.clamp(1, i64::from(u32::MAX)) as u32
}

/// Halve incoming damage for a defending target, never below 1.
pub fn apply_defending(damage: u32, defending: bool) -> u32 {
    if defending {
        (damage / 2).max(1)
    } else {
        damage
    }
}

/// Damage scaled by a percentage of attack, reduced by defense, never below 1.
///
/// Used by skills that hit for "N% ATK".
pub fn scaled_damage(attack: i32, percent: i32, defense: i32) -> u32 {
    let scaled = i64::from(attack.max(0)) * i64::from(percent.max(0)) / 100;
    (scaled - i64::from(defense.max(0))).clamp(1, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_never_below_one() {
        assert_eq!(calculate_damage(5, 500, 150, false, CritRule::StatDriven), 1);
        assert_eq!(calculate_damage(0, 0, 150, true, CritRule::StatDriven), 1);
        assert_eq!(calculate_damage(-20, 3, 150, false, CritRule::Double), 1);
        assert_eq!(scaled_damage(10, 10, 99), 1);
    }

    #[test]
    fn normal_hit_subtracts_defense() {
        assert_eq!(calculate_damage(25, 5, 150, false, CritRule::StatDriven), 20);
    }

    #[test]
    fn crit_uses_multiplier_instead_of_defense() {
        assert_eq!(calculate_damage(40, 30, 150, true, CritRule::StatDriven), 60);
        assert_eq!(calculate_damage(40, 30, 150, true, CritRule::Double), 80);
    }

    #[test]
    fn defending_halves() {
        assert_eq!(apply_defending(20, true), 10);
        assert_eq!(apply_defending(1, true), 1);
        assert_eq!(apply_defending(20, false), 20);
    }
}
