//! Fixed-capacity item slots owned by a combatant.

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::types::{Item, ItemKind};

/// Number of inventory slots.
pub const INVENTORY_SLOTS: usize = BattleConfig::INVENTORY_SLOTS;

/// Snapshot of every slot, empty slots included.
pub type SlotList = [Option<Item>; INVENTORY_SLOTS];

/// Rejected inventory operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory is full")]
    Full,

    #[error("slot {index} is out of range")]
    SlotOutOfRange { index: usize },

    #[error("slot {index} is empty")]
    EmptySlot { index: usize },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Full => ErrorSeverity::Recoverable,
            Self::EmptySlot { .. } => ErrorSeverity::Validation,
            // Slots come from a clamped cursor or an occupied index.
            Self::SlotOutOfRange { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full => "INVENTORY_FULL",
            Self::SlotOutOfRange { .. } => "SLOT_OUT_OF_RANGE",
            Self::EmptySlot { .. } => "EMPTY_SLOT",
        }
    }
}

/// Ordered, fixed-size collection of [`INVENTORY_SLOTS`] slots.
///
/// A slot is either empty or holds one item. The number of slots never
/// changes; only their occupancy does.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    slots: SlotList,
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an inventory from `items`, keeping the first [`INVENTORY_SLOTS`].
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut inventory = Self::empty();
        inventory.set_items(items);
        inventory
    }

    /// Replaces every slot: the first [`INVENTORY_SLOTS`] items are kept in
    /// order, the rest are dropped, and remaining slots are left empty.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item>) {
        self.slots = Default::default();
        let mut dropped = 0usize;
        for (index, item) in items.into_iter().enumerate() {
            match self.slots.get_mut(index) {
                Some(slot) => *slot = Some(item),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!(dropped, "inventory initialized past capacity; extra items dropped");
        }
        debug!(occupied = self.occupied(), "inventory initialized");
    }

    /// Places `item` in the first empty slot and returns its index.
    ///
    /// A full inventory is a normal state, so a rejected add is only logged.
    pub fn add(&mut self, item: Item) -> Result<usize, InventoryError> {
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                debug!(item = %item, slot = index, "added item to inventory");
                self.slots[index] = Some(item);
                Ok(index)
            }
            None => {
                warn!(item = %item, "inventory is full; cannot add item");
                Err(InventoryError::Full)
            }
        }
    }

    /// Clears the slot at `index`, returning its previous item.
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Puts `item` at `index` regardless of occupancy, returning the previous item.
    pub fn replace(&mut self, index: usize, item: Item) -> Result<Option<Item>, InventoryError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::SlotOutOfRange { index })?;
        Ok(slot.replace(item))
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Copy of every slot.
    pub fn items(&self) -> SlotList {
        self.slots.clone()
    }

    pub fn slots(&self) -> &SlotList {
        &self.slots
    }

    /// Occupied slots with their indices.
    pub fn occupied_slots(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (index, item)))
    }

    /// Indices of occupied slots holding a `kind` item.
    pub fn slots_of_kind(&self, kind: ItemKind) -> ArrayVec<usize, INVENTORY_SLOTS> {
        self.occupied_slots()
            .filter(|(_, item)| item.kind() == kind)
            .map(|(index, _)| index)
            .collect()
    }

    /// Indices of every occupied slot.
    pub fn occupied_indices(&self) -> ArrayVec<usize, INVENTORY_SLOTS> {
        self.occupied_slots().map(|(index, _)| index).collect()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Removes every exhausted item, returning how many were cleared.
    pub fn purge_exhausted(&mut self) -> usize {
        let mut purged = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(Item::is_exhausted) {
                *slot = None;
                purged += 1;
            }
        }
        purged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::Uses;

    fn potion(name: &str) -> Item {
        Item::recovery(name, 10, Uses::Limited(1))
    }

    #[test]
    fn add_fills_first_empty_slot() {
        let mut inventory = Inventory::with_items([potion("a"), potion("b")]);
        inventory.remove(0);

        assert_eq!(inventory.add(potion("c")), Ok(0));
        assert_eq!(inventory.add(potion("d")), Ok(2));
        assert_eq!(inventory.get(0).map(|item| item.name.as_str()), Some("c"));
    }

    #[test]
    fn add_to_full_inventory_is_rejected() {
        let mut inventory = Inventory::with_items((0..4).map(|i| potion(&i.to_string())));
        assert!(inventory.is_full());
        assert_eq!(inventory.add(potion("extra")), Err(InventoryError::Full));
        assert_eq!(inventory.occupied(), INVENTORY_SLOTS);
    }

    #[test]
    fn set_items_truncates_and_pads() {
        let inventory = Inventory::with_items((0..6).map(|i| potion(&i.to_string())));
        assert_eq!(inventory.occupied(), INVENTORY_SLOTS);
        assert_eq!(inventory.get(3).map(|item| item.name.as_str()), Some("3"));

        let sparse = Inventory::with_items([potion("only")]);
        assert_eq!(sparse.occupied(), 1);
        assert!(!sparse.is_full());
        assert!(!sparse.is_empty());
    }

    #[test]
    fn replace_keeps_slot_count() {
        let mut inventory = Inventory::with_items((0..4).map(|i| potion(&i.to_string())));
        let previous = inventory.replace(2, potion("new")).unwrap();

        assert_eq!(previous.map(|item| item.name), Some("2".to_string()));
        assert_eq!(inventory.occupied(), INVENTORY_SLOTS);
        assert_eq!(inventory.get(2).map(|item| item.name.as_str()), Some("new"));
    }

    #[test]
    fn replace_out_of_range_is_rejected() {
        let mut inventory = Inventory::empty();
        assert_eq!(
            inventory.replace(INVENTORY_SLOTS, potion("x")),
            Err(InventoryError::SlotOutOfRange { index: INVENTORY_SLOTS })
        );
    }

    #[test]
    fn empty_and_full_track_occupancy() {
        let mut inventory = Inventory::empty();
        assert!(inventory.is_empty());
        assert!(!inventory.is_full());

        inventory.add(potion("a")).unwrap();
        assert!(!inventory.is_empty());

        inventory.remove(0);
        assert!(inventory.is_empty());
        assert_eq!(inventory.remove(0), None);
    }

    #[test]
    fn slots_of_kind_filters_by_kind() {
        let inventory = Inventory::with_items([
            Item::attack("Sword", 5, Uses::Unlimited),
            potion("a"),
            Item::defense("Shield", 2, Uses::Unlimited),
            potion("b"),
        ]);

        assert_eq!(inventory.slots_of_kind(ItemKind::Recovery).as_slice(), &[1, 3]);
        assert_eq!(inventory.slots_of_kind(ItemKind::Attack).as_slice(), &[0]);
        assert_eq!(inventory.occupied_indices().len(), 4);
    }

    #[test]
    fn purge_removes_exhausted_items() {
        let mut spent = potion("spent");
        spent.use_once();
        let mut inventory = Inventory::with_items([spent, potion("fresh")]);

        assert_eq!(inventory.purge_exhausted(), 1);
        assert!(inventory.get(0).is_none());
        assert!(inventory.get(1).is_some());
    }
}
