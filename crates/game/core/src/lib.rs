//! Deterministic battle rules and data types shared across the workspace.
//!
//! `game-core` defines combatants, items, inventories, damage formulas and
//! turn order as pure APIs. The runtime drives them from its battle state
//! machine, and the content crate builds them from authored data.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use combat::{RollRange, Side, TurnOrder, calculate_damage, determine_first_turn, scale};
pub use config::{BattleConfig, ConfigError, ExperienceTable, TextPacing};
pub use env::{BattleRng, EnemyKind, EnemyTemplate, FixedRng, PcgRng, PlayerTemplate};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    BattleOutcome, BattleState, CombatError, Combatant, CombatantKind, CombatantRecord,
    INVENTORY_SLOTS, Inventory, InventoryError, Item, ItemKind, Level, Modifier, Potency,
    SlotList, Uses,
};
pub use stats::{BaseStats, StatBlock};
