//! Combatant templates.

use crate::state::types::{ItemKind, Level};
use crate::stats::BaseStats;

/// Enemy family. Decides which item kind fills an enemy's fourth slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyKind {
    Yokai,
    Demon,
    Gremlin,
    Possessed,
}

impl EnemyKind {
    /// Preferred item kind, or `None` when the family has no preference.
    pub fn preferred_item(self) -> Option<ItemKind> {
        match self {
            EnemyKind::Gremlin => Some(ItemKind::Recovery),
            EnemyKind::Demon => Some(ItemKind::Attack),
            EnemyKind::Possessed => Some(ItemKind::Defense),
            EnemyKind::Yokai => None,
        }
    }
}

/// Authored enemy definition. A battle spawns a fresh enemy from it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: EnemyKind,
    pub stats: BaseStats,
}

impl EnemyTemplate {
    pub fn new(name: impl Into<String>, kind: EnemyKind, stats: BaseStats) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            stats,
        }
    }
}

/// Authored player definition, used once at game start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: Level,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: BaseStats,
    /// Names of starting items, looked up in the item catalog.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<String>,
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            level: Level::FIRST,
            stats: BaseStats::PLAYER,
            items: Vec::new(),
        }
    }
}
