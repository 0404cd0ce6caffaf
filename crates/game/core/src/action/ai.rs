//! Action choice for combatants nobody is controlling.

use rand::RngCore;

use super::{Action, ActionResolver};
use crate::ability::TargetRule;
use crate::battle::{BattleSnapshot, BattleState, CombatantId};
use crate::combat::{default_target, roll_percent};

/// Picks actions from a read-only view of the field.
///
/// Implemented by player-side automation (auto battle, scripted tests).
/// The returned action is still validated by the resolver.
pub trait ActionPolicy {
    fn choose(&mut self, view: &BattleSnapshot, actor: CombatantId, rng: &mut dyn RngCore) -> Action;
}

impl<F> ActionPolicy for F
where
    F: FnMut(&BattleSnapshot, CombatantId, &mut dyn RngCore) -> Action,
{
    fn choose(&mut self, view: &BattleSnapshot, actor: CombatantId, rng: &mut dyn RngCore) -> Action {
        self(view, actor, rng)
    }
}

/// Enemy behaviour: occasionally the skill, otherwise a basic attack on the
/// default target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyAi {
    skill_chance: u32,
}

impl EnemyAi {
    pub fn new(skill_chance: u32) -> Self {
        Self {
            skill_chance: skill_chance.min(100),
        }
    }

    pub fn skill_chance(&self) -> u32 {
        self.skill_chance
    }

    /// Chooses an action for `actor`.
    ///
    /// The skill roll only happens when the skill is usable, so a broke or
    /// frightened enemy always attacks. Defends only if the opposing side is
    /// empty, which the controller never lets happen mid-round.
    pub fn choose(
        &self,
        resolver: &ActionResolver,
        state: &BattleState,
        actor: CombatantId,
        rng: &mut dyn RngCore,
    ) -> Action {
        let opponents = actor.side.opponent();

        if resolver.can_use_skill(state, actor) && roll_percent(rng, self.skill_chance) {
            let rule = state
                .get(actor)
                .and_then(|unit| resolver.ability_of(unit))
                .map(|ability| ability.target());
            match rule {
                Some(TargetRule::ChosenEnemy) => {
                    if let Some(target) = default_target(state, opponents, rng) {
                        return Action::skill_on(target);
                    }
                }
                Some(_) => return Action::skill(),
                None => {}
            }
        }

        match default_target(state, opponents, rng) {
            Some(target) => Action::attack(target),
            None => Action::Defend,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::ability::AbilityId;
    use crate::config::BattleConfig;
    use crate::effects::StatusEffect;
    use crate::stats::StatBlock;
    use crate::unit::{EnemySpec, Rarity, Species, Unit, UnitId};

    fn field(skill: AbilityId) -> BattleState {
        let config = BattleConfig::default();
        let team = (0..3)
            .map(|i| {
                let species = Species::new("a", format!("Ally {i}"), Rarity::Common, StatBlock::new(80, 10, 5, 10));
                Unit::summon(UnitId(i), species)
            })
            .collect();
        let mut state = BattleState::new(team, &config).unwrap();
        let boss = Species::new("b", "Boss", Rarity::Legendary, StatBlock::new(300, 30, 10, 20)).with_skill(skill);
        state
            .load_wave(vec![EnemySpec::from_species(&boss, boss.base).as_boss()], &config)
            .unwrap();
        state
    }

    const BOSS: CombatantId = CombatantId::enemy(0);

    #[test]
    fn zero_chance_always_attacks() {
        let resolver = ActionResolver::default();
        let state = field(AbilityId::MothmansOmen);
        let ai = EnemyAi::new(0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..200 {
            let action = ai.choose(&resolver, &state, BOSS, &mut rng);
            assert!(matches!(action, Action::Attack { target } if target.side == crate::battle::Side::Ally));
        }
    }

    #[test]
    fn certain_chance_uses_affordable_skill() {
        let resolver = ActionResolver::default();
        let state = field(AbilityId::MothmansOmen);
        let ai = EnemyAi::new(100);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        assert_eq!(ai.choose(&resolver, &state, BOSS, &mut rng), Action::skill());
    }

    #[test]
    fn chosen_enemy_skills_get_a_target() {
        let resolver = ActionResolver::default();
        let state = field(AbilityId::KillerBurst);
        let ai = EnemyAi::new(100);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let action = ai.choose(&resolver, &state, BOSS, &mut rng);
        assert!(matches!(action, Action::Skill { target: Some(t) } if state.is_alive(t)));
        assert!(resolver.validate(&state, BOSS, &action).is_ok());
    }

    #[test]
    fn fear_falls_back_to_attack() {
        let resolver = ActionResolver::default();
        let mut state = field(AbilityId::MothmansOmen);
        state.enemies[0].effects.add(StatusEffect::fear(2, "Kuchisake-onna"));
        let ai = EnemyAi::new(100);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        assert!(matches!(ai.choose(&resolver, &state, BOSS, &mut rng), Action::Attack { .. }));
    }

    #[test]
    fn taunters_draw_every_attack() {
        let resolver = ActionResolver::default();
        let mut state = field(AbilityId::MothmansOmen);
        state.allies[2].effects.add(StatusEffect::taunt(2, "SCP-682"));
        let ai = EnemyAi::new(0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..100 {
            assert_eq!(
                ai.choose(&resolver, &state, BOSS, &mut rng),
                Action::attack(CombatantId::ally(2))
            );
        }
    }
}
