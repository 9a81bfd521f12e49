//! Base and derived stat blocks.

use crate::config::BattleConfig;
use crate::state::types::Level;

/// Level-1 stats authored for a combatant template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Starting stats of the player.
    pub const PLAYER: BaseStats = BaseStats {
        max_hp: 100,
        attack: 1,
        defense: 1,
        speed: 1,
    };

    pub const fn new(max_hp: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            max_hp,
            attack,
            defense,
            speed,
        }
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::PLAYER
    }
}

/// Stats at a specific level. Never stored; always recomputed from [`BaseStats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl StatBlock {
    /// Computes stats for `level`, adding `hp_bonus` to max HP.
    ///
    /// Formula: `base + (level - 1) * 5` for every stat.
    pub fn at_level(base: &BaseStats, level: Level, hp_bonus: u32) -> Self {
        let Level::Rank(rank) = level else {
            return Self::debug();
        };
        let growth = rank
            .saturating_sub(1)
            .saturating_mul(BattleConfig::STAT_GROWTH_PER_LEVEL);

        Self {
            max_hp: base
                .max_hp
                .saturating_add(growth)
                .saturating_add(hp_bonus)
                .max(1),
            attack: base.attack.saturating_add(growth),
            defense: base.defense.saturating_add(growth),
            speed: base.speed.saturating_add(growth),
        }
    }

    /// Stats of a debug-level combatant.
    pub const fn debug() -> Self {
        Self {
            max_hp: BattleConfig::DEBUG_STAT,
            attack: BattleConfig::DEBUG_STAT,
            defense: BattleConfig::DEBUG_STAT,
            speed: BattleConfig::DEBUG_STAT,
        }
    }
}
