//! Battle configuration loader.

use std::path::Path;

use anyhow::Context;
use dread_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

const BUILTIN: &str = include_str!("../../data/battle.toml");

/// Loader for battle tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing BattleConfig
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig =
            toml::from_str(content).context("Failed to parse battle config TOML")?;
        Ok(config)
    }

    /// The tuning shipped with the game.
    pub fn builtin() -> LoadResult<BattleConfig> {
        Self::parse(BUILTIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dread_core::CritRule;

    #[test]
    fn builtin_matches_defaults() {
        assert_eq!(ConfigLoader::builtin().unwrap(), BattleConfig::default());
    }

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::parse("round_limit = 50\ncrit_rule = \"double\"\n").unwrap();
        assert_eq!(config.round_limit, 50);
        assert_eq!(config.crit_rule, CritRule::Double);
        assert_eq!(config.defend_sp_gain, BattleConfig::DEFAULT_DEFEND_SP_GAIN);
    }

    #[test]
    fn unknown_crit_rule_is_rejected() {
        assert!(ConfigLoader::parse("crit_rule = \"triple\"").is_err());
    }
}
