//! Encounter shape and the wave source seam.

use std::collections::VecDeque;

use rand::RngCore;

use crate::unit::EnemySpec;

/// Where the encounter takes place. World, stage and floor are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterMode {
    Campaign { world: u32, stage: u32 },
    Dungeon { floor: u32 },
}

impl EncounterMode {
    /// Difficulty number used for drop chances: the stage or the floor.
    pub fn drop_level(self) -> u32 {
        match self {
            EncounterMode::Campaign { stage, .. } => stage,
            EncounterMode::Dungeon { floor } => floor,
        }
    }
}

/// Static description of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterPlan {
    pub mode: EncounterMode,
    pub waves: u32,
    /// The final wave is a boss wave.
    pub boss: bool,
    /// First time this stage is cleared; adds a gem bonus.
    pub first_clear: bool,
}

impl EncounterPlan {
    pub const CAMPAIGN_WAVES: u32 = 3;
    pub const BOSS_INTERVAL: u32 = 10;

    /// Three waves; every tenth stage ends with a boss.
    pub fn campaign(world: u32, stage: u32) -> Self {
        let stage = stage.max(1);
        Self {
            mode: EncounterMode::Campaign {
                world: world.max(1),
                stage,
            },
            waves: Self::CAMPAIGN_WAVES,
            boss: stage % Self::BOSS_INTERVAL == 0,
            first_clear: false,
        }
    }

    /// A single wave; every tenth floor is a boss floor.
    pub fn dungeon(floor: u32) -> Self {
        let floor = floor.max(1);
        Self {
            mode: EncounterMode::Dungeon { floor },
            waves: 1,
            boss: floor % Self::BOSS_INTERVAL == 0,
            first_clear: false,
        }
    }

    pub fn with_waves(mut self, waves: u32) -> Self {
        self.waves = waves;
        self
    }

    pub fn with_first_clear(mut self, first_clear: bool) -> Self {
        self.first_clear = first_clear;
        self
    }

    /// Context handed to the wave source for the 0-based `wave` index.
    pub fn difficulty(&self, wave: u32) -> DifficultyContext {
        DifficultyContext {
            mode: self.mode,
            wave,
            total_waves: self.waves,
            boss_wave: self.boss && wave + 1 == self.waves,
        }
    }
}

/// Everything a wave source needs to scale a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyContext {
    pub mode: EncounterMode,
    /// 0-based wave index.
    pub wave: u32,
    pub total_waves: u32,
    pub boss_wave: bool,
}

/// Produces the enemies of each wave.
pub trait WaveSource {
    fn generate(&mut self, ctx: &DifficultyContext, rng: &mut dyn RngCore) -> Vec<EnemySpec>;
}

impl<F> WaveSource for F
where
    F: FnMut(&DifficultyContext, &mut dyn RngCore) -> Vec<EnemySpec>,
{
    fn generate(&mut self, ctx: &DifficultyContext, rng: &mut dyn RngCore) -> Vec<EnemySpec> {
        self(ctx, rng)
    }
}

/// Pre-built waves handed out in order. Empty once exhausted.
#[derive(Clone, Debug, Default)]
pub struct FixedWaves {
    waves: VecDeque<Vec<EnemySpec>>,
}

impl FixedWaves {
    pub fn new(waves: impl IntoIterator<Item = Vec<EnemySpec>>) -> Self {
        Self {
            waves: waves.into_iter().collect(),
        }
    }

    pub fn single(wave: Vec<EnemySpec>) -> Self {
        Self::new([wave])
    }
}

impl WaveSource for FixedWaves {
    fn generate(&mut self, _ctx: &DifficultyContext, _rng: &mut dyn RngCore) -> Vec<EnemySpec> {
        self.waves.pop_front().unwrap_or_default()
    }
}
