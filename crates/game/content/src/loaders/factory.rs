//! Content factory for assembling every catalog.

use std::path::{Path, PathBuf};

use dread_core::BattleConfig;

use crate::catalog::{Roster, WorldMap};
use crate::loaders::{ConfigLoader, LoadResult, SpeciesLoader, WorldLoader};

/// Everything the runtime needs from static content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
    pub config: BattleConfig,
    pub roster: Roster,
    pub worlds: WorldMap,
}

/// Content factory that loads game content from an optional data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── species.ron
/// └── worlds.ron
/// ```
///
/// Any file missing from the directory falls back to the embedded copy.
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    /// Creates a factory that reads overrides from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Creates a factory that only uses the embedded content.
    pub fn builtin() -> Self {
        Self { data_dir: None }
    }

    fn override_path(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.as_ref()?.join(file);
        path.is_file().then_some(path)
    }

    /// Load battle tuning from `battle.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        match self.override_path("battle.toml") {
            Some(path) => ConfigLoader::load(&path),
            None => ConfigLoader::builtin(),
        }
    }

    /// Load the species roster from `species.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        match self.override_path("species.ron") {
            Some(path) => SpeciesLoader::load(&path),
            None => SpeciesLoader::builtin(),
        }
    }

    /// Load the campaign layout from `worlds.ron`.
    pub fn load_worlds(&self) -> LoadResult<WorldMap> {
        match self.override_path("worlds.ron") {
            Some(path) => WorldLoader::load(&path),
            None => WorldLoader::builtin(),
        }
    }

    pub fn load(&self) -> LoadResult<Content> {
        Ok(Content {
            config: self.load_config()?,
            roster: self.load_roster()?,
            worlds: self.load_worlds()?,
        })
    }

    /// Returns the data directory path, if any.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Some(Path::new("/tmp/data")));
        assert_eq!(ContentFactory::builtin().data_dir(), None);
    }

    #[test]
    fn overrides_replace_only_present_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("battle.toml"), "enemy_skill_chance = 40\n").unwrap();

        let content = ContentFactory::new(dir.path()).load().unwrap();
        assert_eq!(content.config.enemy_skill_chance, 40);
        assert_eq!(content.roster, SpeciesLoader::builtin().unwrap());
        assert_eq!(content.worlds.world_count(), 5);
    }

    #[test]
    fn broken_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("worlds.ron"), "not ron").unwrap();
        assert!(ContentFactory::new(dir.path()).load_worlds().is_err());
    }
}
