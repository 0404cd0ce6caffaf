use super::state::BattleState;
use super::unit::{BattleUnit, CombatantId};
use crate::ability::{AbilityId, AbilityRegistry, TargetRule};

/// Read-only view of one combatant for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSnapshot {
    pub id: CombatantId,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub sp: u32,
    pub max_sp: u32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub crit_rate: i32,
    pub defending: bool,
    /// Ghosted; only selectable as the last unit alive on its side.
    pub untargetable: bool,
    pub boss: bool,
    pub skill: Option<AbilityId>,
    pub skill_level: u8,
    /// SP cost of the skill, when the unit has a registered one.
    pub skill_cost: Option<u32>,
    pub skill_target: Option<TargetRule>,
    /// Alive, not feared and holding enough SP.
    pub skill_ready: bool,
    pub effects: Vec<String>,
}

impl UnitSnapshot {
    pub fn of(unit: &BattleUnit, abilities: &AbilityRegistry) -> Self {
        let ability = unit.skill().and_then(|id| abilities.get(id));
        let skill_cost = ability.map(|ability| ability.cost());
        let skill_ready = unit.is_alive()
            && !unit.effects.is_feared()
            && skill_cost.is_some_and(|cost| unit.sp.current >= cost);
        Self {
            id: unit.id,
            name: unit.name().to_owned(),
            hp: unit.hp.current,
            max_hp: unit.hp.maximum,
            sp: unit.sp.current,
            max_sp: unit.sp.maximum,
            attack: unit.effective_attack(),
            defense: unit.effective_defense(),
            speed: unit.effective_speed(),
            crit_rate: unit.effective_crit_rate(),
            defending: unit.defending,
            untargetable: unit.effects.is_untargetable(),
            boss: unit.is_boss(),
            skill: unit.skill(),
            skill_level: unit.skill_level(),
            skill_cost,
            skill_target: ability.map(|ability| ability.target()),
            skill_ready,
            effects: unit.effects.iter().filter(|e| !e.from_counter).map(|e| e.label()).collect(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Read-only view of the whole field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub wave: u32,
    pub total_waves: u32,
    pub round: u32,
    pub awaiting: Option<CombatantId>,
    pub allies: Vec<UnitSnapshot>,
    pub enemies: Vec<UnitSnapshot>,
}

impl BattleSnapshot {
    pub fn capture(
        state: &BattleState,
        abilities: &AbilityRegistry,
        wave: u32,
        total_waves: u32,
        round: u32,
        awaiting: Option<CombatantId>,
    ) -> Self {
        Self {
            wave,
            total_waves,
            round,
            awaiting,
            allies: state.allies.iter().map(|u| UnitSnapshot::of(u, abilities)).collect(),
            enemies: state.enemies.iter().map(|u| UnitSnapshot::of(u, abilities)).collect(),
        }
    }

    pub fn unit(&self, id: CombatantId) -> Option<&UnitSnapshot> {
        self.allies
            .iter()
            .chain(self.enemies.iter())
            .find(|u| u.id == id)
    }

    /// Living units on the side opposing `id`.
    pub fn opponents_of(&self, id: CombatantId) -> impl Iterator<Item = &UnitSnapshot> {
        let list = match id.side {
            super::Side::Ally => &self.enemies,
            super::Side::Enemy => &self.allies,
        };
        list.iter().filter(|u| u.is_alive())
    }
}
