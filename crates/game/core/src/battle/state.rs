use arrayvec::ArrayVec;

use super::error::BattleError;
use super::unit::{BattleUnit, CombatantId, Side};
use crate::config::BattleConfig;
use crate::unit::{EnemySpec, Unit};

pub type Team = ArrayVec<BattleUnit, { BattleConfig::MAX_TEAM_SIZE }>;
pub type Wave = ArrayVec<BattleUnit, { BattleConfig::MAX_WAVE_SIZE }>;

/// Everyone on the field for the current wave.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BattleState {
    pub allies: Team,
    pub enemies: Wave,
}

impl BattleState {
    /// Wraps the player's team. Enemies arrive with [`BattleState::load_wave`].
    pub fn new(team: Vec<Unit>, config: &BattleConfig) -> Result<Self, BattleError> {
        if team.is_empty() {
            return Err(BattleError::EmptyTeam);
        }
        if team.len() > BattleConfig::MAX_TEAM_SIZE {
            return Err(BattleError::TeamTooLarge {
                max: BattleConfig::MAX_TEAM_SIZE,
                got: team.len(),
            });
        }

        let allies = team
            .into_iter()
            .enumerate()
            .map(|(slot, unit)| BattleUnit::player(CombatantId::ally(slot as u8), unit, config))
            .collect();

        Ok(Self {
            allies,
            enemies: Wave::new(),
        })
    }

    /// Replaces the enemy side with a freshly generated wave.
    pub fn load_wave(&mut self, specs: Vec<EnemySpec>, config: &BattleConfig) -> Result<(), BattleError> {
        if specs.is_empty() {
            return Err(BattleError::EmptyWave);
        }
        if specs.len() > BattleConfig::MAX_WAVE_SIZE {
            return Err(BattleError::WaveTooLarge {
                max: BattleConfig::MAX_WAVE_SIZE,
                got: specs.len(),
            });
        }

        self.enemies = specs
            .into_iter()
            .enumerate()
            .map(|(slot, spec)| BattleUnit::enemy(CombatantId::enemy(slot as u8), spec, config))
            .collect();
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn side(&self, side: Side) -> &[BattleUnit] {
        match side {
            Side::Ally => &self.allies,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut [BattleUnit] {
        match side {
            Side::Ally => &mut self.allies,
            Side::Enemy => &mut self.enemies,
        }
    }

    pub fn get(&self, id: CombatantId) -> Option<&BattleUnit> {
        self.side(id.side).get(id.index())
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut BattleUnit> {
        self.side_mut(id.side).get_mut(id.index())
    }

    /// Two distinct combatants borrowed mutably at once.
    ///
    /// Returns `None` if either id is unknown or both are the same.
    pub fn pair_mut(
        &mut self,
        a: CombatantId,
        b: CombatantId,
    ) -> Option<(&mut BattleUnit, &mut BattleUnit)> {
        if a == b {
            return None;
        }

        if a.side != b.side {
            let (allies, enemies) = (&mut self.allies, &mut self.enemies);
            let (ally_id, enemy_id) = if a.side == Side::Ally { (a, b) } else { (b, a) };
            let ally = allies.get_mut(ally_id.index())?;
            let enemy = enemies.get_mut(enemy_id.index())?;
            return Some(if a.side == Side::Ally {
                (ally, enemy)
            } else {
                (enemy, ally)
            });
        }

        let units = self.side_mut(a.side);
        let (lo, hi) = (a.index().min(b.index()), a.index().max(b.index()));
        if hi >= units.len() {
            return None;
        }
        let (left, right) = units.split_at_mut(hi);
        let (first, second) = (&mut left[lo], &mut right[0]);
        Some(if a.index() < b.index() {
            (first, second)
        } else {
            (second, first)
        })
    }

    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(BattleUnit::is_alive)
    }

    // ========================================================================
    // Living sets
    // ========================================================================

    pub fn living(&self, side: Side) -> impl Iterator<Item = &BattleUnit> {
        self.side(side).iter().filter(|u| u.is_alive())
    }

    pub fn living_ids(&self, side: Side) -> Vec<CombatantId> {
        self.living(side).map(|u| u.id).collect()
    }

    pub fn is_wiped(&self, side: Side) -> bool {
        self.living(side).next().is_none()
    }

    /// Every living combatant with its current effective speed, allies first.
    pub fn speed_table(&self) -> Vec<(CombatantId, i32)> {
        self.living(Side::Ally)
            .chain(self.living(Side::Enemy))
            .map(|u| (u.id, u.effective_speed()))
            .collect()
    }

    /// Iterates both sides, allies first.
    pub fn all(&self) -> impl Iterator<Item = &BattleUnit> {
        self.allies.iter().chain(self.enemies.iter())
    }

    pub fn name_of(&self, id: CombatantId) -> String {
        self.get(id).map(|u| u.name().to_owned()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatBlock;
    use crate::unit::{Rarity, Species, UnitId};

    fn team(n: usize) -> Vec<Unit> {
        (0..n)
            .map(|i| {
                let species = Species::new("zombie", "Zombie", Rarity::Common, StatBlock::new(50, 5, 2, 10));
                Unit::summon(UnitId(i as u64), species)
            })
            .collect()
    }

    fn enemy(speed: i32) -> EnemySpec {
        let species = Species::new("ghoul", "Ghoul", Rarity::Common, StatBlock::new(50, 5, 2, 11));
        EnemySpec::from_species(&species, StatBlock::new(50, 5, 2, speed))
    }

    #[test]
    fn team_size_is_enforced() {
        let config = BattleConfig::default();
        assert_eq!(BattleState::new(Vec::new(), &config), Err(BattleError::EmptyTeam));
        assert_eq!(
            BattleState::new(team(5), &config),
            Err(BattleError::TeamTooLarge { max: 4, got: 5 })
        );
        assert!(BattleState::new(team(4), &config).is_ok());
    }

    #[test]
    fn pair_mut_handles_both_orderings() {
        let config = BattleConfig::default();
        let mut state = BattleState::new(team(3), &config).unwrap();
        state.load_wave(vec![enemy(10), enemy(12)], &config).unwrap();

        let (a, b) = state.pair_mut(CombatantId::ally(2), CombatantId::ally(0)).unwrap();
        assert_eq!((a.id, b.id), (CombatantId::ally(2), CombatantId::ally(0)));

        let (e, a) = state.pair_mut(CombatantId::enemy(1), CombatantId::ally(1)).unwrap();
        assert_eq!((e.id, a.id), (CombatantId::enemy(1), CombatantId::ally(1)));

        assert!(state.pair_mut(CombatantId::ally(1), CombatantId::ally(1)).is_none());
        assert!(state.pair_mut(CombatantId::ally(1), CombatantId::enemy(5)).is_none());
    }

    #[test]
    fn speed_table_skips_the_dead() {
        let config = BattleConfig::default();
        let mut state = BattleState::new(team(2), &config).unwrap();
        state.load_wave(vec![enemy(20)], &config).unwrap();
        state.allies[1].take_damage(999);

        let table = state.speed_table();
        assert_eq!(table, vec![(CombatantId::ally(0), 10), (CombatantId::enemy(0), 20)]);
        assert!(!state.is_wiped(Side::Ally));
    }
}
