//! HP-threshold goal selection for enemies.

use game_core::{BattleRng, Combatant};

/// What the enemy wants to achieve this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    /// Use a recovery item.
    Recover,
    /// Use a defense item.
    Fortify,
    /// Use an attack item.
    Strike,
}

/// Picks a [`Goal`] from the enemy's remaining HP.
///
/// | HP              | goal                                         |
/// |-----------------|----------------------------------------------|
/// | `<= max / 4`    | Recover                                      |
/// | `<= max / 3`    | Recover, or Strike on a coin flip if armed   |
/// | `<= max / 2`    | Fortify, or Strike on a coin flip if armed   |
/// | otherwise       | Strike                                       |
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalSelector;

impl GoalSelector {
    pub fn select<R: BattleRng + ?Sized>(enemy: &Combatant, has_attack: bool, rng: &mut R) -> Goal {
        Self::select_for(enemy.hp(), enemy.max_hp(), has_attack, rng)
    }

    /// Thresholds use integer division, matching the HUD's whole-number HP.
    pub fn select_for<R: BattleRng + ?Sized>(
        hp: u32,
        max_hp: u32,
        has_attack: bool,
        rng: &mut R,
    ) -> Goal {
        if hp <= max_hp / 4 {
            Goal::Recover
        } else if hp <= max_hp / 3 {
            Self::or_strike(Goal::Recover, has_attack, rng)
        } else if hp <= max_hp / 2 {
            Self::or_strike(Goal::Fortify, has_attack, rng)
        } else {
            Goal::Strike
        }
    }

    fn or_strike<R: BattleRng + ?Sized>(goal: Goal, has_attack: bool, rng: &mut R) -> Goal {
        if has_attack && rng.chance(0.5) {
            Goal::Strike
        } else {
            goal
        }
    }
}
