//! Runtime configuration.

use dread_core::BattleConfig;

/// Settings shared by the session and every encounter it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    /// Largest team a player may field (never above the core limit).
    pub max_team_size: usize,
    /// Deepest selectable dungeon floor.
    pub max_dungeon_floor: u32,
    pub starting_cash: u64,
    pub starting_gems: u32,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_DUNGEON_FLOOR: u32 = 100;
    pub const DEFAULT_STARTING_CASH: u64 = 500;
    pub const DEFAULT_STARTING_GEMS: u32 = 100;

    pub fn builder() -> RuntimeConfigBuilder {
        RuntimeConfigBuilder::default()
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            max_team_size: BattleConfig::MAX_TEAM_SIZE,
            max_dungeon_floor: Self::DEFAULT_MAX_DUNGEON_FLOOR,
            starting_cash: Self::DEFAULT_STARTING_CASH,
            starting_gems: Self::DEFAULT_STARTING_GEMS,
        }
    }
}

/// Builder for [`RuntimeConfig`].
#[derive(Debug, Default)]
pub struct RuntimeConfigBuilder {
    config: RuntimeConfig,
}

impl RuntimeConfigBuilder {
    pub fn battle(mut self, battle: BattleConfig) -> Self {
        self.config.battle = battle;
        self
    }

    pub fn max_team_size(mut self, size: usize) -> Self {
        self.config.max_team_size = size.clamp(1, BattleConfig::MAX_TEAM_SIZE);
        self
    }

    pub fn max_dungeon_floor(mut self, floor: u32) -> Self {
        self.config.max_dungeon_floor = floor.max(1);
        self
    }

    pub fn starting_cash(mut self, cash: u64) -> Self {
        self.config.starting_cash = cash;
        self
    }

    pub fn starting_gems(mut self, gems: u32) -> Self {
        self.config.starting_gems = gems;
        self
    }

    pub fn build(self) -> RuntimeConfig {
        self.config
    }
}
