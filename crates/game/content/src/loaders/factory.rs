//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use game_core::{BattleConfig, Item};
use tracing::info;

use crate::catalog::Catalog;
use crate::loaders::{ActorCatalog, ActorLoader, ConfigLoader, ItemLoader, LoadResult};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── items.ron
/// └── actors.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            info!(path = %path.display(), "no battle config; using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<Item>> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load player and enemy templates from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<ActorCatalog> {
        let path = self.data_dir.join("actors.ron");
        ActorLoader::load(&path)
    }

    /// Load items and actors and check they can back a battle.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let items = self.load_items()?;
        let actors = self.load_actors()?;
        let catalog = Catalog::new(items, actors.player, actors.enemies);
        catalog.validate()?;

        info!(
            items = catalog.items().len(),
            enemies = catalog.enemies().len(),
            "content catalog loaded"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
