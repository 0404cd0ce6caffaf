//! Per-encounter combatant wrapper.

use crate::ability::AbilityId;
use crate::config::BattleConfig;
use crate::effects::EffectLedger;
use crate::passive::PassiveId;
use crate::stats::{EffectiveStats, ResourceMeter, StatBlock, StatKind};
use crate::unit::{EnemySpec, Unit};

/// Which side of the field a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Position of a combatant within the encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId {
    pub side: Side,
    pub slot: u8,
}

impl CombatantId {
    pub const fn new(side: Side, slot: u8) -> Self {
        Self { side, slot }
    }

    pub const fn ally(slot: u8) -> Self {
        Self::new(Side::Ally, slot)
    }

    pub const fn enemy(slot: u8) -> Self {
        Self::new(Side::Enemy, slot)
    }

    pub const fn index(self) -> usize {
        self.slot as usize
    }
}

impl core::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let prefix = match self.side {
            Side::Ally => 'A',
            Side::Enemy => 'E',
        };
        write!(f, "{prefix}{}", self.slot + 1)
    }
}

/// What a combatant was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    Player(Unit),
    Enemy(EnemySpec),
}

/// A combatant inside one encounter.
///
/// Stats are resolved once when the encounter starts. Everything that
/// changes during the fight (HP, SP, defending, effects) lives here and is
/// discarded with the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleUnit {
    pub id: CombatantId,
    pub kind: UnitKind,
    stats: EffectiveStats,
    pub hp: ResourceMeter,
    pub sp: ResourceMeter,
    pub defending: bool,
    pub effects: EffectLedger,
}

impl BattleUnit {
    pub fn player(id: CombatantId, unit: Unit, config: &BattleConfig) -> Self {
        let stats = unit.stats();
        Self::build(id, UnitKind::Player(unit), stats, config)
    }

    pub fn enemy(id: CombatantId, spec: EnemySpec, config: &BattleConfig) -> Self {
        let stats = EffectiveStats::from_block(&spec.stats);
        Self::build(id, UnitKind::Enemy(spec), stats, config)
    }

    fn build(id: CombatantId, kind: UnitKind, stats: EffectiveStats, config: &BattleConfig) -> Self {
        let max_hp = stats.values.hp.max(1) as u32;
        Self {
            id,
            kind,
            stats,
            hp: ResourceMeter::full(max_hp),
            sp: ResourceMeter::new(config.starting_sp, config.max_sp),
            defending: false,
            effects: EffectLedger::new(),
        }
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub fn name(&self) -> &str {
        match &self.kind {
            UnitKind::Player(unit) => unit.name(),
            UnitKind::Enemy(spec) => &spec.name,
        }
    }

    pub fn skill(&self) -> Option<AbilityId> {
        match &self.kind {
            UnitKind::Player(unit) => unit.species.skill.filter(|_| unit.skill_level > 0),
            UnitKind::Enemy(spec) => spec.skill.filter(|_| spec.skill_level > 0),
        }
    }

    pub fn skill_level(&self) -> u8 {
        match &self.kind {
            UnitKind::Player(unit) => unit.skill_level,
            UnitKind::Enemy(spec) => spec.skill_level,
        }
    }

    pub fn passive(&self) -> Option<PassiveId> {
        match &self.kind {
            UnitKind::Player(unit) => unit.species.passive,
            UnitKind::Enemy(spec) => spec.passive,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(&self.kind, UnitKind::Enemy(spec) if spec.boss)
    }

    pub fn unit(&self) -> Option<&Unit> {
        match &self.kind {
            UnitKind::Player(unit) => Some(unit),
            UnitKind::Enemy(_) => None,
        }
    }

    // ========================================================================
    // Stats
    // ========================================================================

    /// Stats resolved at encounter start, before effects.
    pub fn base_stats(&self) -> &StatBlock {
        &self.stats.values
    }

    pub fn breakdown(&self) -> &EffectiveStats {
        &self.stats
    }

    /// A stat after active effects, floored at zero.
    pub fn effective(&self, stat: StatKind) -> i32 {
        self.effects.effective(stat, self.stats.get(stat))
    }

    pub fn effective_attack(&self) -> i32 {
        self.effective(StatKind::Attack)
    }

    pub fn effective_defense(&self) -> i32 {
        self.effective(StatKind::Defense)
    }

    pub fn effective_speed(&self) -> i32 {
        self.effective(StatKind::Speed)
    }

    /// Crit rate after effects, clamped to [0, 100].
    pub fn effective_crit_rate(&self) -> i32 {
        self.effective(StatKind::CritRate).clamp(0, 100)
    }

    pub fn effective_crit_damage(&self) -> i32 {
        self.effective(StatKind::CritDamage).max(100)
    }

    pub fn effective_accuracy(&self) -> i32 {
        self.effective(StatKind::Accuracy).clamp(0, 100)
    }

    pub fn effective_evasion(&self) -> i32 {
        self.effective(StatKind::Evasion).clamp(0, 100)
    }

    // ========================================================================
    // Vitals
    // ========================================================================

    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    /// Applies damage, returning what was actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hp.drain(amount)
    }

    /// Heals, raised by any active heal boost. Returns HP actually restored.
    ///
    /// Defeated units cannot be healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let boosted = amount * (100 + self.effects.heal_boost_percent()) / 100;
        self.hp.fill(boosted)
    }

    pub fn gain_sp(&mut self, amount: u32) -> u32 {
        self.sp.fill(amount)
    }

    pub fn drain_sp(&mut self, amount: u32) -> u32 {
        self.sp.drain(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::StatusEffect;
    use crate::unit::{Rarity, Species, UnitId};

    fn unit(base: StatBlock) -> BattleUnit {
        let species = Species::new("t", "Tester", Rarity::Rare, base);
        BattleUnit::player(
            CombatantId::ally(0),
            Unit::summon(UnitId(1), species),
            &BattleConfig::default(),
        )
    }

    #[test]
    fn starts_full_with_configured_sp() {
        let u = unit(StatBlock::new(90, 25, 5, 30));
        assert_eq!((u.hp.current, u.hp.maximum), (90, 90));
        assert_eq!((u.sp.current, u.sp.maximum), (100, 150));
    }

    #[test]
    fn crit_rate_stays_within_percent_bounds() {
        let mut u = unit(StatBlock::new(90, 25, 5, 30).with_crit_rate(50));
        u.effects.add(StatusEffect::flat_buff(StatKind::CritRate, 100, 3, "Kuchisake-onna"));
        u.effects.add(StatusEffect::flat_buff(StatKind::CritRate, 85, 3, "Jeff"));
        assert_eq!(u.effective_crit_rate(), 100);

        let mut v = unit(StatBlock::new(90, 25, 5, 30));
        v.effects.add(StatusEffect::flat_debuff(StatKind::CritRate, 40, 3, "Mothman"));
        assert_eq!(v.effective_crit_rate(), 0);
    }

    #[test]
    fn healing_clamps_and_skips_the_dead() {
        let mut u = unit(StatBlock::new(100, 10, 10, 10));
        u.take_damage(30);
        assert_eq!(u.heal(500), 30);
        u.take_damage(1_000);
        assert!(!u.is_alive());
        assert_eq!(u.heal(50), 0);
    }

    #[test]
    fn ids_render_one_based() {
        assert_eq!(CombatantId::ally(0).to_string(), "A1");
        assert_eq!(CombatantId::enemy(2).to_string(), "E3");
    }
}
