//! Automated play for the player side.

use rand::RngCore;

use dread_core::{Action, ActionPolicy, BattleSnapshot, CombatantId, TargetRule, UnitSnapshot};

/// Auto-battle policy.
///
/// Casts the skill whenever it is ready, otherwise attacks the selectable
/// enemy with the least HP. Defends only when nothing can be selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoPolicy {
    use_skills: bool,
}

impl AutoPolicy {
    pub fn new() -> Self {
        Self { use_skills: true }
    }

    /// Basic attacks only.
    pub fn attacks_only() -> Self {
        Self { use_skills: false }
    }

    /// Living opponent with the lowest HP that a player may pick.
    ///
    /// Ghosts are skipped unless they are the last one standing.
    pub fn weakest_target(view: &BattleSnapshot, actor: CombatantId) -> Option<CombatantId> {
        let living: Vec<&UnitSnapshot> = view.opponents_of(actor).collect();
        let last_alive = living.len() == 1;
        living
            .into_iter()
            .filter(|u| last_alive || !u.untargetable)
            .min_by_key(|u| (u.hp, u.id))
            .map(|u| u.id)
    }
}

impl Default for AutoPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionPolicy for AutoPolicy {
    fn choose(&mut self, view: &BattleSnapshot, actor: CombatantId, _rng: &mut dyn RngCore) -> Action {
        let target = Self::weakest_target(view, actor);

        if self.use_skills {
            if let Some(me) = view.unit(actor).filter(|u| u.skill_ready) {
                match (me.skill_target, target) {
                    (Some(TargetRule::ChosenEnemy), Some(target)) => return Action::skill_on(target),
                    (Some(TargetRule::ChosenEnemy), None) | (None, _) => {}
                    (Some(_), _) => return Action::skill(),
                }
            }
        }

        match target {
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
    use dread_core::AbilityId;

    fn unit(id: CombatantId, hp: u32) -> UnitSnapshot {
        UnitSnapshot {
            id,
            name: format!("{id}"),
            hp,
            max_hp: 100,
            sp: 0,
            max_sp: 150,
            attack: 10,
            defense: 5,
            speed: 10,
            crit_rate: 0,
            defending: false,
            untargetable: false,
            boss: false,
            skill: None,
            skill_level: 0,
            skill_cost: None,
            skill_target: None,
            skill_ready: false,
            effects: Vec::new(),
        }
    }

    fn view(enemies: Vec<UnitSnapshot>) -> BattleSnapshot {
        BattleSnapshot {
            wave: 1,
            total_waves: 1,
            round: 1,
            awaiting: Some(CombatantId::ally(0)),
            allies: vec![unit(CombatantId::ally(0), 100)],
            enemies,
        }
    }

    #[test]
    fn attacks_the_weakest_visible_enemy() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ghost = unit(CombatantId::enemy(1), 5);
        ghost.untargetable = true;
        let field = view(vec![
            unit(CombatantId::enemy(0), 40),
            ghost,
            unit(CombatantId::enemy(2), 20),
            unit(CombatantId::enemy(3), 0),
        ]);

        let action = AutoPolicy::new().choose(&field, CombatantId::ally(0), &mut rng);
        assert_eq!(action, Action::attack(CombatantId::enemy(2)));
    }

    #[test]
    fn last_ghost_standing_is_fair_game() {
        let mut ghost = unit(CombatantId::enemy(1), 5);
        ghost.untargetable = true;
        let field = view(vec![unit(CombatantId::enemy(0), 0), ghost]);

        assert_eq!(
            AutoPolicy::weakest_target(&field, CombatantId::ally(0)),
            Some(CombatantId::enemy(1))
        );
    }

    #[test]
    fn ready_skills_are_cast() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut field = view(vec![unit(CombatantId::enemy(0), 40)]);
        let me = &mut field.allies[0];
        me.skill = Some(AbilityId::KillerBurst);
        me.skill_target = Some(TargetRule::ChosenEnemy);
        me.skill_ready = true;

        let action = AutoPolicy::new().choose(&field, CombatantId::ally(0), &mut rng);
        assert_eq!(action, Action::skill_on(CombatantId::enemy(0)));

        field.allies[0].skill_target = Some(TargetRule::AllEnemies);
        let action = AutoPolicy::new().choose(&field, CombatantId::ally(0), &mut rng);
        assert_eq!(action, Action::skill());

        let action = AutoPolicy::attacks_only().choose(&field, CombatantId::ally(0), &mut rng);
        assert_eq!(action, Action::attack(CombatantId::enemy(0)));
    }

    #[test]
    fn defends_with_nothing_to_hit() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut a = unit(CombatantId::enemy(0), 10);
        let mut b = unit(CombatantId::enemy(1), 10);
        a.untargetable = true;
        b.untargetable = true;
        let field = view(vec![a, b]);

        let action = AutoPolicy::new().choose(&field, CombatantId::ally(0), &mut rng);
        assert_eq!(action, Action::Defend);
    }
}
