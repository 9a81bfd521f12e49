//! Battle configuration loader.

use std::path::Path;

use anyhow::Context;

use game_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub(crate) fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate().context("invalid battle config")?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ConfigError;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), BattleConfig::default());
    }

    #[test]
    fn nested_tables_override_selectively() {
        let config = ConfigLoader::parse(
            r#"
            flee_chance = 0.25
            permadeath = false

            [pacing]
            letters_per_second = 0

            [experience]
            player_kill = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.flee_chance, 0.25);
        assert!(!config.permadeath);
        assert_eq!(config.pacing.letters_per_second, 0);
        assert_eq!(config.pacing.post_delay_ms, 2000);
        assert_eq!(config.experience.player_kill, 0.5);
        assert_eq!(config.experience.player_attack, 0.05);
    }

    #[test]
    fn inverted_roll_range_is_rejected() {
        let err = ConfigLoader::parse("roll_min = 1.2\nroll_max = 0.9").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::RollRange { .. })
        ));
    }

    #[test]
    fn nan_flee_chance_is_rejected() {
        let err = ConfigLoader::parse("flee_chance = nan").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::FleeChance(_))
        ));
    }

    #[test]
    fn nan_roll_bound_is_rejected() {
        assert!(ConfigLoader::parse("roll_max = nan").is_err());
    }
}
