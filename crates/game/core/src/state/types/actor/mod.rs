//! Combatants: the player and enemies.
//!
//! This module contains everything a combatant owns:
//! - Combatant: stats, HP, experience, defense bonuses
//! - Inventory: fixed item slots
//!
//! # Invariants
//!
//! - `hp` is always in `0..=max_hp`; `hp == 0` means defeated
//! - Level-derived stats are recomputed, never stored independently of `level`
//! - Additive defense (`defense_bonus`, `fortified`) survives level changes

pub mod inventory;

use tracing::{debug, info};

pub use inventory::{INVENTORY_SLOTS, Inventory, InventoryError, SlotList};

use crate::combat::{RollRange, calculate_damage, scale};
use crate::config::BattleConfig;
use crate::env::{BattleRng, EnemyKind, EnemyTemplate, PlayerTemplate};
use crate::error::{ErrorSeverity, GameError};
use crate::state::types::{Item, Level, Modifier};
use crate::stats::{BaseStats, StatBlock};

/// Which side a combatant was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantKind {
    Player,
    Enemy(EnemyKind),
}

/// Rejected combatant operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("{name} is defeated and cannot act")]
    Defeated { name: String },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Defeated { .. } => ErrorSeverity::Validation,
            Self::Inventory(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Defeated { .. } => "COMBATANT_DEFEATED",
            Self::Inventory(e) => e.error_code(),
        }
    }
}

/// A participant in a battle.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    name: String,
    kind: CombatantKind,
    base: BaseStats,
    level: Level,
    stats: StatBlock,
    hp: u32,
    experience: f32,
    defense_bonus: u32,
    fortified: bool,
    inventory: Inventory,
}

impl Combatant {
    /// Creates a combatant at full HP.
    pub fn new(
        name: impl Into<String>,
        kind: CombatantKind,
        base: BaseStats,
        level: Level,
        items: impl IntoIterator<Item = Item>,
    ) -> Self {
        let stats = StatBlock::at_level(&base, level, Self::hp_bonus_for(kind));
        let mut inventory = Inventory::with_items(items);
        if level.is_debug() {
            for slot in 0..INVENTORY_SLOTS {
                if let Some(item) = inventory.get_mut(slot) {
                    item.make_unlimited();
                }
            }
        }

        Self {
            name: name.into(),
            kind,
            base,
            level,
            stats,
            hp: stats.max_hp,
            experience: 0.0,
            defense_bonus: 0,
            fortified: false,
            inventory,
        }
    }

    /// Builds the player from its template and resolved starting items.
    pub fn player(template: &PlayerTemplate, items: impl IntoIterator<Item = Item>) -> Self {
        Self::new(
            template.name.clone(),
            CombatantKind::Player,
            template.stats,
            template.level,
            items,
        )
    }

    /// Spawns an enemy at `level`.
    pub fn enemy(
        template: &EnemyTemplate,
        level: Level,
        items: impl IntoIterator<Item = Item>,
    ) -> Self {
        Self::new(
            template.name.clone(),
            CombatantKind::Enemy(template.kind),
            template.stats,
            level,
            items,
        )
    }

    fn hp_bonus_for(kind: CombatantKind) -> u32 {
        match kind {
            CombatantKind::Player => 0,
            CombatantKind::Enemy(_) => BattleConfig::ENEMY_HP_BONUS,
        }
    }

    // ===== accessors =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CombatantKind {
        self.kind
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CombatantKind::Player)
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    pub fn attack(&self) -> u32 {
        self.stats.attack
    }

    /// Total defense: level baseline plus additive bonuses.
    pub fn defense(&self) -> u32 {
        if self.fortified {
            BattleConfig::ABSOLUTE_DEFENSE
        } else {
            self.stats.defense.saturating_add(self.defense_bonus)
        }
    }

    /// Defense derived from the level alone.
    pub fn base_defense(&self) -> u32 {
        self.stats.defense
    }

    pub fn defense_bonus(&self) -> u32 {
        self.defense_bonus
    }

    pub fn is_fortified(&self) -> bool {
        self.fortified
    }

    pub fn speed(&self) -> u32 {
        self.stats.speed
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn experience(&self) -> f32 {
        self.experience
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    // ===== health =====

    /// Clamps and stores HP. Returns true if the combatant is now defeated.
    fn set_hp(&mut self, hp: u32) -> bool {
        self.hp = hp.min(self.max_hp());
        if self.hp == 0 {
            info!(combatant = %self.name, "combatant has died");
            return true;
        }
        false
    }

    /// Applies an attack item used by `attacker`. Returns true if this hit defeated the combatant.
    ///
    /// Already-defeated and debug-level combatants are left untouched.
    pub fn take_damage<R: BattleRng + ?Sized>(
        &mut self,
        item: &Item,
        attacker: &Combatant,
        range: RollRange,
        rng: &mut R,
    ) -> bool {
        if self.level.is_debug() {
            debug!(combatant = %self.name, "debug level; taking no damage");
            return false;
        }
        if self.is_defeated() {
            debug!(combatant = %self.name, "already defeated; ignoring damage");
            return false;
        }

        let roll = range.draw(rng);
        match item.modifier(attacker.level) {
            Modifier::Absolute => {
                debug!(item = %item, "item dealt lethal damage");
                self.set_hp(0)
            }
            Modifier::Finite(power) => {
                let damage = calculate_damage(power, attacker.attack(), roll, self.defense());
                debug!(
                    combatant = %self.name,
                    attacker = %attacker.name,
                    item = %item,
                    power,
                    roll,
                    damage,
                    "taking damage"
                );
                self.set_hp(self.hp.saturating_sub(damage))
            }
        }
    }

    /// Restores HP. Returns the amount actually healed.
    pub fn heal<R: BattleRng + ?Sized>(
        &mut self,
        modifier: Modifier,
        range: RollRange,
        rng: &mut R,
    ) -> u32 {
        let before = self.hp;
        match modifier {
            Modifier::Absolute => self.hp = self.max_hp(),
            Modifier::Finite(amount) => {
                let roll = range.draw(rng);
                let total = scale(amount, roll);
                self.hp = self.hp.saturating_add(total).min(self.max_hp());
            }
        }
        self.hp - before
    }

    /// Raises defense. Returns the new total defense.
    pub fn add_defense<R: BattleRng + ?Sized>(
        &mut self,
        modifier: Modifier,
        range: RollRange,
        rng: &mut R,
    ) -> u32 {
        match modifier {
            Modifier::Absolute => {
                debug!(combatant = %self.name, "defense set to absolute");
                self.fortified = true;
            }
            Modifier::Finite(amount) => {
                let roll = range.draw(rng);
                self.defense_bonus = self.defense_bonus.saturating_add(scale(amount, roll));
            }
        }
        self.defense()
    }

    // ===== progression =====

    /// Adds experience. Returns true if the combatant leveled up.
    ///
    /// The accumulator resets to zero exactly when the level increments.
    pub fn gain_experience(&mut self, exp: f32) -> bool {
        if self.level.is_debug() {
            return false;
        }
        self.experience += exp.max(0.0);
        if self.experience >= 1.0 {
            self.level_up();
            self.experience = 0.0;
            return true;
        }
        false
    }

    /// Advances one level, recomputes derived stats and heals to full.
    pub fn level_up(&mut self) {
        self.set_level(self.level.next());
        info!(combatant = %self.name, level = %self.level, "leveled up");
    }

    /// Sets the level, recomputes derived stats and heals to full.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
        self.stats = StatBlock::at_level(&self.base, level, Self::hp_bonus_for(self.kind));
        self.hp = self.stats.max_hp;
    }

    // ===== items =====

    /// Consumes one use of the item in `slot` and returns it as it was used.
    ///
    /// An item that runs out is removed from the slot. Debug-level combatants
    /// never consume uses.
    pub fn use_item(&mut self, slot: usize) -> Result<Item, CombatError> {
        if self.is_defeated() {
            return Err(CombatError::Defeated {
                name: self.name.clone(),
            });
        }
        if slot >= INVENTORY_SLOTS {
            return Err(InventoryError::SlotOutOfRange { index: slot }.into());
        }

        let debug_level = self.level.is_debug();
        let item = self
            .inventory
            .get_mut(slot)
            .ok_or(InventoryError::EmptySlot { index: slot })?;

        if debug_level {
            item.make_unlimited();
            return Ok(item.clone());
        }
        if item.is_exhausted() {
            self.inventory.remove(slot);
            return Err(InventoryError::EmptySlot { index: slot }.into());
        }

        let used = item.clone();
        if item.use_once() {
            debug!(combatant = %self.name, item = %used, slot, "item used up; removing");
            self.inventory.remove(slot);
        }
        Ok(used)
    }

    // ===== persistence =====

    /// Captures the state that is not derivable from the level.
    pub fn record(&self) -> CombatantRecord {
        CombatantRecord {
            name: self.name.clone(),
            level: self.level,
            hp: self.hp,
            experience: self.experience,
            defense_bonus: self.defense_bonus,
            fortified: self.fortified,
            inventory: self.inventory.clone(),
        }
    }

    /// Rebuilds a combatant from a record. Level-derived stats are recomputed.
    pub fn restore(record: CombatantRecord, kind: CombatantKind, base: BaseStats) -> Self {
        let stats = StatBlock::at_level(&base, record.level, Self::hp_bonus_for(kind));
        Self {
            name: record.name,
            kind,
            base,
            level: record.level,
            stats,
            hp: record.hp.min(stats.max_hp),
            experience: record.experience,
            defense_bonus: record.defense_bonus,
            fortified: record.fortified,
            inventory: record.inventory,
        }
    }
}

/// Persistable subset of a [`Combatant`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRecord {
    pub name: String,
    pub level: Level,
    pub hp: u32,
    pub experience: f32,
    pub defense_bonus: u32,
    pub fortified: bool,
    pub inventory: Inventory,
}
