//! Battle state representation.
//!
//! Combatants, their inventories and items, plus the phase/outcome enums the
//! runtime's state machine moves through. Nothing here performs I/O; the
//! runtime owns the combatants and mutates them between suspension points.
pub mod battle;
pub mod types;

pub use battle::{BattleOutcome, BattleState};
pub use types::{
    Combatant, CombatantKind, CombatantRecord, CombatError, INVENTORY_SLOTS, Inventory,
    InventoryError, Item, ItemKind, Level, Modifier, Potency, SlotList, Uses,
};
