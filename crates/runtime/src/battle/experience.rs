//! Experience awarded per move.

use game_core::{ExperienceTable, ItemKind};

/// Narrated and silent player awards for one player move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerAward {
    pub announced: f32,
    /// Applied before the effect, without narration.
    pub silent: f32,
}

pub fn player_award(table: &ExperienceTable, kind: ItemKind, killed: bool) -> PlayerAward {
    let (bonus, silent) = match kind {
        ItemKind::Attack => {
            let kill = if killed { table.player_kill } else { 0.0 };
            (table.player_attack + kill, 0.0)
        }
        ItemKind::Recovery => (table.player_recovery, table.player_recovery_silent),
        ItemKind::Defense => (table.player_defense, table.player_defense_silent),
    };
    PlayerAward {
        announced: table.player_base + bonus,
        silent,
    }
}

/// `(enemy, player)` awards for one enemy turn; `None` when the enemy used nothing.
pub fn enemy_turn_award(table: &ExperienceTable, kind: Option<ItemKind>) -> (f32, f32) {
    match kind {
        None => (table.enemy_base, table.witness_base),
        Some(ItemKind::Attack) => (table.enemy_base + table.enemy_attack, table.witness_attack),
        Some(ItemKind::Recovery) => {
            (table.enemy_base + table.enemy_recovery, table.witness_recovery)
        }
        Some(ItemKind::Defense) => (table.enemy_base + table.enemy_defense, table.witness_defense),
    }
}

/// Whole-percent rendering used in narration, e.g. `0.08` -> `8`.
pub fn as_percent(amount: f32) -> String {
    format!("{:.0}", amount * 100.0)
}
