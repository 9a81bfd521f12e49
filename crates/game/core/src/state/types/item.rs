//! Consumable battle items.
//!
//! Attack, defense and recovery items share one struct and differ only in
//! [`ItemKind`], which selects the effect formula and the UI label.

use core::fmt;

use crate::config::BattleConfig;
use crate::state::types::Level;

/// Effect category of an item. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Attack,
    Defense,
    Recovery,
}

/// Scaled effect magnitude of an item at a given level.
///
/// `Absolute` stands for the maximal effect: lethal damage, a full heal, or
/// [`BattleConfig::ABSOLUTE_DEFENSE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Finite(u32),
    Absolute,
}

/// Unscaled strength of an item as authored in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Potency {
    /// Base magnitude; grows by [`BattleConfig::ITEM_GROWTH_PER_LEVEL`] per level.
    Base(u32),
    /// Always applies the maximal effect.
    Absolute,
}

/// Remaining uses of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Uses {
    Limited(u32),
    Unlimited,
}

/// A consumable item held in an inventory slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    kind: ItemKind,
    potency: Potency,
    uses: Uses,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind, potency: Potency, uses: Uses) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            potency,
            uses,
        }
    }

    pub fn attack(name: impl Into<String>, base: u32, uses: Uses) -> Self {
        Self::new(name, ItemKind::Attack, Potency::Base(base), uses)
    }

    pub fn defense(name: impl Into<String>, base: u32, uses: Uses) -> Self {
        Self::new(name, ItemKind::Defense, Potency::Base(base), uses)
    }

    pub fn recovery(name: impl Into<String>, base: u32, uses: Uses) -> Self {
        Self::new(name, ItemKind::Recovery, Potency::Base(base), uses)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn potency(&self) -> Potency {
        self.potency
    }

    pub fn uses(&self) -> Uses {
        self.uses
    }

    /// Effect magnitude when used by a combatant of `level`.
    ///
    /// `base + level * 2`, or [`Modifier::Absolute`] for absolute items and
    /// debug-level users.
    pub fn modifier(&self, level: Level) -> Modifier {
        match (self.potency, level) {
            (Potency::Absolute, _) | (_, Level::Debug) => Modifier::Absolute,
            (Potency::Base(base), Level::Rank(rank)) => Modifier::Finite(
                base.saturating_add(rank.saturating_mul(BattleConfig::ITEM_GROWTH_PER_LEVEL)),
            ),
        }
    }

    /// Human-readable effect description, e.g. `ATK (-12 HP)`.
    pub fn type_label(&self, level: Level) -> String {
        let modifier = self.modifier(level);
        match (self.kind, modifier) {
            (ItemKind::Attack, Modifier::Absolute) => "ATK (\u{221e} HP)".to_string(),
            (ItemKind::Attack, Modifier::Finite(n)) => format!("ATK (-{n} HP)"),
            (ItemKind::Defense, Modifier::Absolute) => "DEF (\u{221e} DEF)".to_string(),
            (ItemKind::Defense, Modifier::Finite(n)) => format!("DEF (+{n} DEF)"),
            (ItemKind::Recovery, Modifier::Absolute) => "HEAL (\u{221e} HP)".to_string(),
            (ItemKind::Recovery, Modifier::Finite(n)) => format!("HEAL (+{n} HP)"),
        }
    }

    /// Remaining-uses label, e.g. `3 USES`.
    pub fn uses_label(&self) -> String {
        match self.uses {
            Uses::Limited(n) => format!("{n} USES"),
            Uses::Unlimited => "\u{221e} USES".to_string(),
        }
    }

    /// Consumes one use. Returns true iff the item is now exhausted.
    pub fn use_once(&mut self) -> bool {
        match &mut self.uses {
            Uses::Limited(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            Uses::Unlimited => false,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.uses, Uses::Limited(0))
    }

    /// Makes the item unlimited. Applied to a debug-level player's items.
    pub fn make_unlimited(&mut self) {
        self.uses = Uses::Unlimited;
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_scales_with_level() {
        let dagger = Item::attack("Dagger", 10, Uses::Limited(3));
        assert_eq!(dagger.modifier(Level::new(1)), Modifier::Finite(12));
        assert_eq!(dagger.modifier(Level::new(4)), Modifier::Finite(18));
    }

    #[test]
    fn debug_level_and_absolute_potency_are_absolute() {
        let dagger = Item::attack("Dagger", 10, Uses::Limited(3));
        assert_eq!(dagger.modifier(Level::Debug), Modifier::Absolute);

        let elixir = Item::new("Elixir", ItemKind::Recovery, Potency::Absolute, Uses::Limited(1));
        assert_eq!(elixir.modifier(Level::new(2)), Modifier::Absolute);
    }

    #[test]
    fn labels_follow_kind() {
        let level = Level::new(1);
        assert_eq!(Item::attack("a", 10, Uses::Unlimited).type_label(level), "ATK (-12 HP)");
        assert_eq!(Item::defense("d", 3, Uses::Unlimited).type_label(level), "DEF (+5 DEF)");
        assert_eq!(Item::recovery("r", 20, Uses::Unlimited).type_label(level), "HEAL (+22 HP)");
        assert_eq!(
            Item::recovery("r", 20, Uses::Unlimited).type_label(Level::Debug),
            "HEAL (\u{221e} HP)"
        );
    }

    #[test]
    fn use_once_reports_exhaustion() {
        let mut potion = Item::recovery("Potion", 10, Uses::Limited(2));
        assert!(!potion.use_once());
        assert_eq!(potion.uses_label(), "1 USES");
        assert!(potion.use_once());
        assert!(potion.is_exhausted());
    }

    #[test]
    fn unlimited_items_never_exhaust() {
        let mut staff = Item::attack("Staff", 1, Uses::Unlimited);
        for _ in 0..100 {
            assert!(!staff.use_once());
        }
        assert_eq!(staff.uses_label(), "\u{221e} USES");
    }
}
