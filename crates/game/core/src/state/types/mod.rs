pub mod actor;
pub mod item;
pub mod level;

pub use actor::{
    Combatant, CombatantKind, CombatantRecord, CombatError, INVENTORY_SLOTS, Inventory,
    InventoryError, SlotList,
};
pub use item::{Item, ItemKind, Modifier, Potency, Uses};
pub use level::Level;
