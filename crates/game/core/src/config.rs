/// How a critical hit converts attack into damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CritRule {
    /// `attack × crit_damage / 100`, using the attacker's crit damage stat.
    #[default]
    StatDriven,

    /// Flat `attack × 2` regardless of the crit damage stat.
    ///
    /// Reduced rule set kept for the simpler edition of the game.
    Double,
}

/// Battle tuning constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// SP every combatant starts an encounter with.
    pub starting_sp: u32,
    /// Upper bound of the SP pool.
    pub max_sp: u32,
    /// SP gained at the start of each of the combatant's turns.
    pub sp_regen_per_turn: u32,
    /// SP gained after a basic attack.
    pub attack_sp_gain: u32,
    /// SP gained by defending. Always larger than `attack_sp_gain`.
    pub defend_sp_gain: u32,
    /// Percent of max HP restored to living allies between waves.
    pub wave_heal_percent: u32,
    /// SP restored to living allies between waves.
    pub wave_sp_restore: u32,
    /// Percent chance an enemy uses its skill when it can afford it.
    pub enemy_skill_chance: u32,
    /// Rounds a single wave may last before the encounter counts as lost.
    pub round_limit: u32,
    /// Lowest hit chance an attack can have, in percent.
    pub min_hit_chance: u32,
    pub crit_rule: CritRule,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of player units in one encounter.
    pub const MAX_TEAM_SIZE: usize = 4;
    /// Maximum number of enemies in one wave.
    pub const MAX_WAVE_SIZE: usize = 6;
    /// Maximum number of simultaneous effects on one combatant.
    pub const MAX_STATUS_EFFECTS: usize = 24;
    /// Maximum number of secondary rolls on a gear piece.
    pub const MAX_SECONDARY_ROLLS: usize = 4;
    /// Highest skill level.
    pub const MAX_SKILL_LEVEL: u8 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_SP: u32 = 100;
    pub const DEFAULT_MAX_SP: u32 = 150;
    pub const DEFAULT_SP_REGEN: u32 = 10;
    pub const DEFAULT_ATTACK_SP_GAIN: u32 = 5;
    pub const DEFAULT_DEFEND_SP_GAIN: u32 = 10;
    pub const DEFAULT_WAVE_HEAL_PERCENT: u32 = 20;
    pub const DEFAULT_WAVE_SP_RESTORE: u32 = 30;
    pub const DEFAULT_ENEMY_SKILL_CHANCE: u32 = 15;
    pub const DEFAULT_ROUND_LIMIT: u32 = 200;
    pub const DEFAULT_MIN_HIT_CHANCE: u32 = 10;

    pub fn new() -> Self {
        Self {
            starting_sp: Self::DEFAULT_STARTING_SP,
            max_sp: Self::DEFAULT_MAX_SP,
            sp_regen_per_turn: Self::DEFAULT_SP_REGEN,
            attack_sp_gain: Self::DEFAULT_ATTACK_SP_GAIN,
            defend_sp_gain: Self::DEFAULT_DEFEND_SP_GAIN,
            wave_heal_percent: Self::DEFAULT_WAVE_HEAL_PERCENT,
            wave_sp_restore: Self::DEFAULT_WAVE_SP_RESTORE,
            enemy_skill_chance: Self::DEFAULT_ENEMY_SKILL_CHANCE,
            round_limit: Self::DEFAULT_ROUND_LIMIT,
            min_hit_chance: Self::DEFAULT_MIN_HIT_CHANCE,
            crit_rule: CritRule::StatDriven,
        }
    }

    /// Same tuning with the flat ×2 crit rule.
    pub fn simple_edition() -> Self {
        Self {
            crit_rule: CritRule::Double,
            ..Self::new()
        }
    }

    pub fn with_crit_rule(mut self, crit_rule: CritRule) -> Self {
        self.crit_rule = crit_rule;
        self
    }

    pub fn with_enemy_skill_chance(mut self, percent: u32) -> Self {
        self.enemy_skill_chance = percent.min(100);
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
