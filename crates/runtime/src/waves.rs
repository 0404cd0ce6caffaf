//! Wave generation from the species roster.
//!
//! Enemy stats come from the encounter position, not from the species base
//! stats; species only contribute speed, crit rate, skill and passive.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use dread_content::Roster;
use dread_core::{DifficultyContext, EncounterMode, EnemySpec, Rarity, Species, StatBlock, WaveSource};

/// Picks enemies for campaign stages and dungeon floors.
#[derive(Debug, Clone)]
pub struct RosterWaves {
    grunts: Vec<Species>,
    elites: Vec<Species>,
}

impl RosterWaves {
    pub fn new(roster: &Roster) -> Self {
        Self {
            grunts: roster.grunts().into_iter().cloned().collect(),
            elites: roster.bosses().into_iter().cloned().collect(),
        }
    }

    fn pick(&self, boss: bool, rng: &mut dyn RngCore) -> Option<&Species> {
        let pool = if boss { &self.elites } else { &self.grunts };
        pool.choose(rng)
    }
}

impl WaveSource for RosterWaves {
    fn generate(&mut self, ctx: &DifficultyContext, rng: &mut dyn RngCore) -> Vec<EnemySpec> {
        let boss = ctx.boss_wave;
        let count = match ctx.mode {
            _ if boss => 1,
            EncounterMode::Campaign { .. } => rng.gen_range(2..=4),
            EncounterMode::Dungeon { .. } => rng.gen_range(3..=5),
        };

        let mut wave = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(species) = self.pick(boss, rng) else {
                break;
            };
            let stats = match ctx.mode {
                EncounterMode::Campaign { world, stage } => {
                    campaign_stats(species, world, stage, ctx.wave, boss)
                }
                EncounterMode::Dungeon { floor } => dungeon_stats(species, floor, boss),
            };
            let enemy = EnemySpec::from_species(species, stats);
            wave.push(if boss { enemy.as_boss() } else { enemy });
        }
        wave
    }
}

// ============================================================================
// Stat formulas
// ============================================================================

/// Position-derived stats before any boss or rarity multiplier.
///
/// # Formula
///
/// With 0-based world `w`, stage `s` and wave `p`:
/// - HP: 40 + 30w + 10s + 10p
/// - ATK: 5 + 5w + 2s + 2p
/// - DEF: 2 + 2w + s + p
fn position_stats(world_index: u32, stage_index: u32, wave: u32) -> (i32, i32, i32) {
    let (w, s, p) = (world_index as i32, stage_index as i32, wave as i32);
    (
        40 + 30 * w + 10 * s + 10 * p,
        5 + 5 * w + 2 * s + 2 * p,
        2 + 2 * w + s + p,
    )
}

/// Stats of a single enemy at a position.
///
/// Bosses get 2.5× HP, 2× ATK/DEF and 1.2× their species speed. Regular
/// enemies run at 1.1× species speed; Rare ones get 1.2× HP/ATK/DEF.
fn enemy_stats(species: &Species, world_index: u32, stage_index: u32, wave: u32, boss: bool) -> StatBlock {
    let (hp, attack, defense) = position_stats(world_index, stage_index, wave);
    let speed = species.base.speed;

    let stats = if boss {
        StatBlock::new(hp * 5 / 2, attack * 2, defense * 2, speed * 12 / 10)
    } else if species.rarity == Rarity::Rare {
        StatBlock::new(hp * 12 / 10, attack * 12 / 10, defense * 12 / 10, speed * 11 / 10)
    } else {
        StatBlock::new(hp, attack, defense, speed * 11 / 10)
    };
    stats.with_crit_rate(species.base.crit_rate).clamped()
}

/// Campaign enemy for 1-based `world` and `stage` and 0-based `wave`.
pub fn campaign_stats(species: &Species, world: u32, stage: u32, wave: u32, boss: bool) -> StatBlock {
    enemy_stats(
        species,
        world.saturating_sub(1),
        stage.saturating_sub(1),
        wave,
        boss,
    )
}

/// Dungeon enemy for 1-based `floor`.
///
/// Each band of twenty floors counts as one world, the floor itself as the
/// stage. On top of that every stat gets a floor multiplier:
/// HP ×(1.5 + 0.05f), ATK ×(1.3 + 0.03f), DEF ×(1.2 + 0.02f), SPD ×(1.1 + 0.01f).
pub fn dungeon_stats(species: &Species, floor: u32, boss: bool) -> StatBlock {
    let base = enemy_stats(species, floor / 20, floor, 0, boss);
    let f = floor as i32;

    let mut stats = base;
    stats.hp = base.hp * (150 + 5 * f) / 100;
    stats.attack = base.attack * (130 + 3 * f) / 100;
    stats.defense = base.defense * (120 + 2 * f) / 100;
    stats.speed = base.speed * (110 + f) / 100;
    stats.clamped()
}
