//! In-memory content catalog.
//!
//! Owns every authored item and combatant template and answers the lookups a
//! battle needs: starting items by name, a random item of a given kind, and a
//! random enemy template.

use game_core::{BattleRng, EnemyTemplate, Item, ItemKind, PlayerTemplate};
use tracing::warn;

/// Content that cannot back a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no enemy templates")]
    NoEnemies,

    #[error("catalog has no {0} items")]
    NoItemsOfKind(ItemKind),
}

/// Authored items and templates for one game.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<Item>,
    player: PlayerTemplate,
    enemies: Vec<EnemyTemplate>,
}

impl Catalog {
    pub fn new(items: Vec<Item>, player: PlayerTemplate, enemies: Vec<EnemyTemplate>) -> Self {
        Self {
            items,
            player,
            enemies,
        }
    }

    /// Checks that a battle can always be set up from this catalog.
    ///
    /// Every enemy draws one item of each kind, so each kind needs at least one entry.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.enemies.is_empty() {
            return Err(CatalogError::NoEnemies);
        }
        for kind in [ItemKind::Recovery, ItemKind::Defense, ItemKind::Attack] {
            if !self.items.iter().any(|item| item.kind() == kind) {
                return Err(CatalogError::NoItemsOfKind(kind));
            }
        }
        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn player(&self) -> &PlayerTemplate {
        &self.player
    }

    pub fn enemies(&self) -> &[EnemyTemplate] {
        &self.enemies
    }

    /// Looks up an item by exact name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Resolves the player's starting item names. Unknown names are skipped with a warning.
    pub fn starting_items(&self) -> Vec<Item> {
        self.player
            .items
            .iter()
            .filter_map(|name| {
                let item = self.item(name).cloned();
                if item.is_none() {
                    warn!(item = %name, "unknown starting item; skipping");
                }
                item
            })
            .collect()
    }

    /// Fresh copy of a random item of `kind`.
    pub fn random_item<R: BattleRng + ?Sized>(&self, kind: ItemKind, rng: &mut R) -> Option<Item> {
        let candidates: Vec<&Item> = self.items.iter().filter(|item| item.kind() == kind).collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.pick(candidates.len())].clone())
    }

    pub fn random_enemy<R: BattleRng + ?Sized>(&self, rng: &mut R) -> Option<&EnemyTemplate> {
        if self.enemies.is_empty() {
            return None;
        }
        self.enemies.get(rng.pick(self.enemies.len()))
    }
}
