//! Turn order.

use crate::state::types::Combatant;

/// One of the two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Returns true when the player acts first: `player.speed >= enemy.speed`.
pub fn determine_first_turn(player: &Combatant, enemy: &Combatant) -> bool {
    player.speed() >= enemy.speed()
}

/// Who acts first in the current round. Priority flips after every full round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnOrder {
    player_first: bool,
}

impl TurnOrder {
    pub fn new(player: &Combatant, enemy: &Combatant) -> Self {
        Self {
            player_first: determine_first_turn(player, enemy),
        }
    }

    pub const fn with_player_first(player_first: bool) -> Self {
        Self { player_first }
    }

    pub fn player_first(&self) -> bool {
        self.player_first
    }

    pub fn first(&self) -> Side {
        if self.player_first {
            Side::Player
        } else {
            Side::Enemy
        }
    }

    pub fn second(&self) -> Side {
        self.first().opponent()
    }

    /// Ends a round: whoever went second goes first next time.
    pub fn flip(&mut self) {
        self.player_first = !self.player_first;
    }
}
