//! Event payloads published by the battle engine.

use serde::{Deserialize, Serialize};

use game_core::{BattleOutcome, BattleState, Level, Side};

/// Lifecycle and progression events of a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    Started {
        enemy: String,
        enemy_level: Level,
    },
    StateChanged {
        from: BattleState,
        to: BattleState,
    },
    LeveledUp {
        side: Side,
        level: Level,
    },
    /// Emitted exactly once per battle.
    Over {
        outcome: BattleOutcome,
    },
}

/// A line of narration, mirrored from the presenter for log consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationEvent {
    pub text: String,
}
