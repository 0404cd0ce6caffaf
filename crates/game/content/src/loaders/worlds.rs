//! Campaign world loader.

use std::path::Path;

use anyhow::{Context, ensure};

use crate::catalog::WorldMap;
use crate::loaders::{LoadResult, read_file};

const BUILTIN: &str = include_str!("../../data/worlds.ron");

/// Loader for the campaign layout from RON files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<WorldMap> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<WorldMap> {
        let map: WorldMap = ron::from_str(content).context("Failed to parse worlds RON")?;
        ensure!(!map.worlds.is_empty(), "world map has no worlds");
        ensure!(map.stages_per_world > 0, "worlds need at least one stage");
        Ok(map)
    }

    pub fn builtin() -> LoadResult<WorldMap> {
        Self::parse(BUILTIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_five_worlds_of_twenty_stages() {
        let map = WorldLoader::builtin().unwrap();
        assert_eq!(map.world_count(), 5);
        assert_eq!(map.stages_per_world, 20);
        assert_eq!(map.name(5), Some("Nightmare Realm"));
    }

    #[test]
    fn empty_maps_are_rejected() {
        assert!(WorldLoader::parse("(stages_per_world: 20, worlds: [])").is_err());
    }
}
