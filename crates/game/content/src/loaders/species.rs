//! Species roster loader.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, ensure};

use crate::catalog::Roster;
use crate::loaders::{LoadResult, read_file};

const BUILTIN: &str = include_str!("../../data/species.ron");

/// Loader for the species roster from RON files.
///
/// File format: `(species: [ (id: "...", name: "...", rarity: Common, base: (...)), ... ])`
pub struct SpeciesLoader;

impl SpeciesLoader {
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses and validates a roster.
    ///
    /// Ids must be unique and every species needs positive HP.
    pub fn parse(content: &str) -> LoadResult<Roster> {
        let roster: Roster = ron::from_str(content).context("Failed to parse species RON")?;

        let mut seen = HashSet::new();
        for species in &roster.species {
            ensure!(seen.insert(species.id.as_str()), "duplicate species id {:?}", species.id);
            ensure!(species.base.hp > 0, "species {:?} has no HP", species.id);
        }
        Ok(roster)
    }

    /// The roster shipped with the game.
    pub fn builtin() -> LoadResult<Roster> {
        Self::parse(BUILTIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dread_core::{AbilityId, PassiveId, Rarity};

    #[test]
    fn builtin_roster_is_complete() {
        let roster = SpeciesLoader::builtin().unwrap();
        assert_eq!(roster.len(), 19);
        assert_eq!(roster.of_rarity(Rarity::Legendary).count(), 4);

        let jeff = roster.get("jeff_the_killer").unwrap();
        assert_eq!(jeff.skill, Some(AbilityId::KillerBurst));
        assert_eq!(jeff.passive, Some(PassiveId::GhostStep));
        assert_eq!(jeff.base.crit_rate, 30);
        assert_eq!(jeff.base.crit_damage, 150);
        assert_eq!(jeff.crit_growth.map(|g| g.cap), Some(80));

        // every elite carries a skill
        assert!(roster.bosses().iter().all(|s| s.skill.is_some()));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let ron = r#"(species: [
            (id: "zombie", name: "Zombie", rarity: Common, base: (hp: 50)),
            (id: "zombie", name: "Zombie Again", rarity: Common, base: (hp: 50)),
        ])"#;
        let err = SpeciesLoader::parse(ron).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("species.ron");
        std::fs::write(&path, "(species: [ (id: \"x\" ").unwrap();

        let err = SpeciesLoader::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("species.ron"));
    }
}
