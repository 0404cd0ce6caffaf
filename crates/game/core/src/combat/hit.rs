//! Hit chance and critical rolls.

use rand::{Rng, RngCore};

/// Calculate hit chance based on accuracy vs evasion.
///
/// # Formula
///
/// ```text
/// hit_chance = clamp(accuracy − evasion, min_hit, 100)
/// ```
pub fn calculate_hit_chance(accuracy: i32, evasion: i32, min_hit: u32) -> u32 {
    let min = min_hit.min(100) as i32;
    (accuracy - evasion).clamp(min, 100) as u32
}

/// Rolls a uniform 1..=100 against `chance_percent`.
///
/// A chance of 0 never succeeds; 100 always does.
pub fn roll_percent(rng: &mut dyn RngCore, chance_percent: u32) -> bool {
    if chance_percent == 0 {
        return false;
    }
    rng.gen_range(1..=100u32) <= chance_percent.min(100)
}

/// Check if an attack hits.
pub fn check_hit(rng: &mut dyn RngCore, accuracy: i32, evasion: i32, min_hit: u32) -> bool {
    roll_percent(rng, calculate_hit_chance(accuracy, evasion, min_hit))
}

/// Check if a strike is critical. The rate is clamped to [0, 100] first.
pub fn check_crit(rng: &mut dyn RngCore, crit_rate: i32) -> bool {
    roll_percent(rng, crit_rate.clamp(0, 100) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn hit_chance_is_bounded() {
        assert_eq!(calculate_hit_chance(100, 0, 10), 100);
        assert_eq!(calculate_hit_chance(150, 0, 10), 100);
        assert_eq!(calculate_hit_chance(20, 90, 10), 10);
        assert_eq!(calculate_hit_chance(100, 25, 10), 75);
    }

    #[test]
    fn zero_and_full_chances_are_certain() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(!check_crit(&mut rng, 0));
            assert!(!check_crit(&mut rng, -40));
            assert!(check_crit(&mut rng, 100));
            assert!(check_crit(&mut rng, 250));
            assert!(check_hit(&mut rng, 100, 0, 10));
        }
    }
}
