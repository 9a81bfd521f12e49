//! Player and enemy template loader.

use std::path::Path;

use game_core::{EnemyTemplate, PlayerTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Actor catalog structure for RON files.
///
/// ```ron
/// (
///     player: (name: "Wanderer", items: ["Rusty Dagger", "Herb"]),
///     enemies: [
///         (name: "Kappa", kind: Yokai, stats: (max_hp: 30, attack: 2, defense: 2, speed: 1)),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorCatalog {
    #[serde(default)]
    pub player: PlayerTemplate,
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for actor templates from RON files.
pub struct ActorLoader;

impl ActorLoader {
    pub fn load(path: &Path) -> LoadResult<ActorCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub(crate) fn parse(content: &str) -> LoadResult<ActorCatalog> {
        let catalog: ActorCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor catalog RON: {}", e))?;

        if catalog.enemies.is_empty() {
            anyhow::bail!("Actor catalog defines no enemies");
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{BaseStats, EnemyKind, Level};

    #[test]
    fn player_defaults_when_omitted() {
        let catalog = ActorLoader::parse(
            r#"(enemies: [(name: "Oni", kind: Demon, stats: (max_hp: 40, attack: 4, defense: 2, speed: 2))])"#,
        )
        .unwrap();

        assert_eq!(catalog.player, PlayerTemplate::default());
        assert_eq!(catalog.enemies[0].kind, EnemyKind::Demon);
        assert_eq!(catalog.enemies[0].stats, BaseStats::new(40, 4, 2, 2));
    }

    #[test]
    fn player_level_accepts_debug() {
        let catalog = ActorLoader::parse(
            r#"(
                player: (name: "Tester", level: Debug, items: ["Dagger"]),
                enemies: [(name: "Kappa", kind: Yokai, stats: (max_hp: 30, attack: 2, defense: 2, speed: 1))],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.player.level, Level::Debug);
        assert_eq!(catalog.player.items, vec!["Dagger".to_string()]);
        // Omitted stats fall back to the player's defaults.
        assert_eq!(catalog.player.stats, BaseStats::PLAYER);
    }

    #[test]
    fn empty_enemy_list_is_rejected() {
        assert!(ActorLoader::parse("(enemies: [])").is_err());
    }
}
