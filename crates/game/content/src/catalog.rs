//! In-memory content catalogs.

use dread_core::{Rarity, Species};

/// Every species the game knows, in roster order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    pub species: Vec<Species>,
}

impl Roster {
    pub fn new(species: Vec<Species>) -> Self {
        Self { species }
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Looks a species up by its stable key.
    pub fn get(&self, id: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.id == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn by_name(&self, name: &str) -> Option<&Species> {
        self.species
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn of_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &Species> {
        self.species.iter().filter(move |s| s.rarity == rarity)
    }

    /// Species that show up as regular wave enemies (Common and Rare).
    pub fn grunts(&self) -> Vec<&Species> {
        self.species
            .iter()
            .filter(|s| !s.rarity.is_elite())
            .collect()
    }

    /// Species eligible for boss duty (Epic and Legendary).
    pub fn bosses(&self) -> Vec<&Species> {
        self.species
            .iter()
            .filter(|s| s.rarity.is_elite())
            .collect()
    }
}

/// One campaign world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldInfo {
    pub name: String,
}

/// Campaign layout: worlds in unlock order, each with the same number of
/// stages. World and stage numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldMap {
    pub stages_per_world: u32,
    pub worlds: Vec<WorldInfo>,
}

impl WorldMap {
    pub fn world_count(&self) -> u32 {
        self.worlds.len() as u32
    }

    pub fn name(&self, world: u32) -> Option<&str> {
        let index = world.checked_sub(1)? as usize;
        self.worlds.get(index).map(|w| w.name.as_str())
    }

    pub fn contains(&self, world: u32, stage: u32) -> bool {
        (1..=self.world_count()).contains(&world) && (1..=self.stages_per_world).contains(&stage)
    }

    /// The stage unlocked by clearing `(world, stage)`.
    ///
    /// The last stage of a world opens the next world; the very last stage
    /// opens nothing.
    pub fn next_stage(&self, world: u32, stage: u32) -> Option<(u32, u32)> {
        if !self.contains(world, stage) {
            return None;
        }
        if stage < self.stages_per_world {
            Some((world, stage + 1))
        } else if world < self.world_count() {
            Some((world + 1, 1))
        } else {
            None
        }
    }
}
