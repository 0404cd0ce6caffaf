//! Everything the player owns between encounters.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use dread_content::WorldMap;
use dread_core::{
    GEMS_PER_PLAYER_LEVEL, GearDrop, GearId, GearPiece, GearSlot, LevelProgress, PotionSize,
    Species, Unit, UnitId, apply_experience, fodder_upgrade_cost, fodder_value,
};

use crate::config::RuntimeConfig;
use crate::error::SessionError;

/// XP potions on hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotionStock {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl PotionStock {
    pub fn get(&self, size: PotionSize) -> u32 {
        match size {
            PotionSize::Small => self.small,
            PotionSize::Medium => self.medium,
            PotionSize::Large => self.large,
        }
    }

    fn slot(&mut self, size: PotionSize) -> &mut u32 {
        match size {
            PotionSize::Small => &mut self.small,
            PotionSize::Medium => &mut self.medium,
            PotionSize::Large => &mut self.large,
        }
    }

    pub fn add(&mut self, size: PotionSize, count: u32) {
        let slot = self.slot(size);
        *slot = slot.saturating_add(count);
    }

    pub fn take(&mut self, size: PotionSize, count: u32) -> Result<(), SessionError> {
        let have = self.get(size);
        if have < count {
            return Err(SessionError::NotEnoughPotions {
                size,
                need: count,
                have,
            });
        }
        *self.slot(size) -= count;
        Ok(())
    }
}

/// Which campaign stages are open and which were cleared.
///
/// `unlocked[w]` is the highest open stage of world `w + 1`; 0 means the
/// world is still locked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignProgress {
    pub stages_per_world: u32,
    pub unlocked: Vec<u32>,
    pub cleared: BTreeSet<(u32, u32)>,
}

impl CampaignProgress {
    /// Only the first stage of the first world is open.
    pub fn new(map: &WorldMap) -> Self {
        let mut unlocked = vec![0; map.world_count() as usize];
        if let Some(first) = unlocked.first_mut() {
            *first = 1;
        }
        Self {
            stages_per_world: map.stages_per_world,
            unlocked,
            cleared: BTreeSet::new(),
        }
    }

    pub fn is_unlocked(&self, world: u32, stage: u32) -> bool {
        let Some(index) = world.checked_sub(1) else {
            return false;
        };
        stage >= 1
            && self
                .unlocked
                .get(index as usize)
                .is_some_and(|highest| stage <= *highest)
    }

    pub fn is_cleared(&self, world: u32, stage: u32) -> bool {
        self.cleared.contains(&(world, stage))
    }

    /// Marks a stage cleared and opens the one after it.
    ///
    /// Returns the newly reachable stage, if clearing opened one.
    pub fn record_clear(&mut self, world: u32, stage: u32) -> Option<(u32, u32)> {
        self.cleared.insert((world, stage));

        let next = if stage < self.stages_per_world {
            (world, stage + 1)
        } else if (world as usize) < self.unlocked.len() {
            (world + 1, 1)
        } else {
            return None;
        };

        let highest = self.unlocked.get_mut(next.0 as usize - 1)?;
        if *highest >= next.1 {
            return None;
        }
        *highest = next.1;
        Some(next)
    }
}

/// Account level-ups produced by one experience grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerLevelUp {
    pub levels: u32,
    pub gems: u32,
}

/// Result of a fodder upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FodderReport {
    pub cost: u64,
    pub experience: u32,
    pub progress: LevelProgress,
    pub skill_levels: u8,
}

/// The player's collection, currencies and progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub units: Vec<Unit>,
    /// Gear nobody has equipped.
    pub gear: Vec<GearPiece>,
    pub cash: u64,
    pub gems: u32,
    pub potions: PotionStock,
    pub level: u32,
    pub xp: u32,
    pub progress: CampaignProgress,
    pub best_floor: u32,
    next_unit: u64,
    next_gear: u64,
}

impl PlayerState {
    pub fn new(config: &RuntimeConfig, map: &WorldMap) -> Self {
        Self {
            units: Vec::new(),
            gear: Vec::new(),
            cash: config.starting_cash,
            gems: config.starting_gems,
            potions: PotionStock::default(),
            level: 1,
            xp: 0,
            progress: CampaignProgress::new(map),
            best_floor: 0,
            next_unit: 1,
            next_gear: 1,
        }
    }

    // ========================================================================
    // Units
    // ========================================================================

    /// Adds a freshly summoned unit.
    pub fn add_unit(&mut self, species: Species) -> UnitId {
        let uid = UnitId(self.next_unit);
        self.next_unit += 1;
        self.units.push(Unit::summon(uid, species));
        uid
    }

    pub fn unit(&self, uid: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.uid == uid)
    }

    pub fn unit_mut(&mut self, uid: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.uid == uid)
    }

    fn require_unit(&self, uid: UnitId) -> Result<&Unit, SessionError> {
        self.unit(uid).ok_or(SessionError::UnknownUnit(uid))
    }

    /// Copies of the units that will fight, in the given order.
    pub fn team(&self, ids: &[UnitId], max: usize) -> Result<Vec<Unit>, SessionError> {
        if ids.is_empty() || ids.len() > max {
            return Err(SessionError::TeamSize { max, got: ids.len() });
        }
        let mut seen = HashSet::new();
        ids.iter()
            .map(|&uid| {
                if !seen.insert(uid) {
                    return Err(SessionError::DuplicateUnit(uid));
                }
                self.require_unit(uid).cloned()
            })
            .collect()
    }

    /// Sacrifices `fodder` to level up `base`.
    ///
    /// Fodder experience is summed by rarity. Each Epic or Legendary fodder
    /// of the base's own species also raises its skill level by one. Gear
    /// worn by fodder returns to the pool.
    pub fn fodder_upgrade(&mut self, base: UnitId, fodder: &[UnitId]) -> Result<FodderReport, SessionError> {
        if fodder.is_empty() {
            return Err(SessionError::NoFodder);
        }
        let base_unit = self.require_unit(base)?;
        let mut seen = HashSet::new();
        let mut rarities = Vec::with_capacity(fodder.len());
        let mut skill_levels = 0u8;
        for &uid in fodder {
            if uid == base {
                return Err(SessionError::FodderIsBase(uid));
            }
            if !seen.insert(uid) {
                return Err(SessionError::DuplicateUnit(uid));
            }
            let unit = self.require_unit(uid)?;
            rarities.push(unit.species.rarity);
            if unit.species.id == base_unit.species.id && unit.species.rarity.is_elite() {
                skill_levels = skill_levels.saturating_add(1);
            }
        }

        let cost = fodder_upgrade_cost(base_unit.level, &rarities);
        if self.cash < cost {
            return Err(SessionError::NotEnoughCash {
                need: cost,
                have: self.cash,
            });
        }

        self.cash -= cost;
        let experience: u32 = rarities.iter().map(|r| fodder_value(*r)).sum();
        let mut removed = Vec::new();
        self.units.retain_mut(|unit| {
            if seen.contains(&unit.uid) {
                removed.extend(unit.loadout.strip());
                false
            } else {
                true
            }
        });
        self.gear.extend(removed);

        let unit = self.unit_mut(base).ok_or(SessionError::UnknownUnit(base))?;
        let progress = unit.gain_experience(experience);
        let skill_levels = unit.raise_skill(skill_levels);

        Ok(FodderReport {
            cost,
            experience,
            progress,
            skill_levels,
        })
    }

    /// Feeds `count` potions of one size to a unit.
    pub fn use_potions(&mut self, uid: UnitId, size: PotionSize, count: u32) -> Result<LevelProgress, SessionError> {
        self.require_unit(uid)?;
        self.potions.take(size, count)?;
        let unit = self.unit_mut(uid).ok_or(SessionError::UnknownUnit(uid))?;
        Ok(unit.gain_experience(size.experience() * count))
    }

    // ========================================================================
    // Gear
    // ========================================================================

    /// Mints a dropped piece into the pool.
    pub fn add_gear(&mut self, drop: GearDrop) -> GearId {
        let id = GearId(self.next_gear);
        self.next_gear += 1;
        self.gear.push(drop.into_piece(id));
        id
    }

    /// Moves a pooled piece onto a unit. The previous occupant of the slot
    /// goes back to the pool and its id is returned.
    pub fn equip(&mut self, uid: UnitId, gear: GearId, slot: GearSlot) -> Result<Option<GearId>, SessionError> {
        let index = self
            .gear
            .iter()
            .position(|p| p.id == gear)
            .ok_or(SessionError::UnknownGear(gear))?;
        let unit = self
            .units
            .iter_mut()
            .find(|u| u.uid == uid)
            .ok_or(SessionError::UnknownUnit(uid))?;

        let evicted = unit.loadout.equip(slot, self.gear[index].clone())?;
        self.gear.swap_remove(index);

        let evicted_id = evicted.as_ref().map(|p| p.id);
        self.gear.extend(evicted);
        Ok(evicted_id)
    }

    pub fn unequip(&mut self, uid: UnitId, slot: GearSlot) -> Result<Option<GearId>, SessionError> {
        let unit = self.unit_mut(uid).ok_or(SessionError::UnknownUnit(uid))?;
        let piece = unit.loadout.unequip(slot);
        let id = piece.as_ref().map(|p| p.id);
        self.gear.extend(piece);
        Ok(id)
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// Adds account experience. Each level gained pays out gems.
    pub fn grant_player_xp(&mut self, amount: u32) -> PlayerLevelUp {
        let progress = apply_experience(self.level, self.xp, amount);
        self.level = progress.level;
        self.xp = progress.exp;

        let gems = progress.levels_gained * GEMS_PER_PLAYER_LEVEL;
        self.gems = self.gems.saturating_add(gems);
        PlayerLevelUp {
            levels: progress.levels_gained,
            gems,
        }
    }

    // ========================================================================
    // Export
    // ========================================================================

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }
}
