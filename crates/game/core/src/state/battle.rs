//! Battle phase and terminal outcome.

use core::fmt;

/// Phase of a running battle.
///
/// Initial phase is [`BattleState::Start`]; [`BattleState::End`] is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleState {
    #[default]
    Start,
    /// Waiting for Fight or Run.
    PlayerAction,
    /// Waiting for the player to pick an item.
    PlayerMove,
    EnemyMove,
    /// Post-victory drop offer.
    ItemSelection,
    /// Post-victory drop with a full inventory: pick a slot to overwrite.
    RewardSelection,
    /// Transitional; input is ignored.
    Busy,
    End,
}

impl BattleState {
    pub const fn as_str(self) -> &'static str {
        match self {
            BattleState::Start => "START",
            BattleState::PlayerAction => "PLAYER_ACTION",
            BattleState::PlayerMove => "PLAYER_MOVE",
            BattleState::EnemyMove => "ENEMY_MOVE",
            BattleState::ItemSelection => "ITEM_SELECTION",
            BattleState::RewardSelection => "REWARD_SELECTION",
            BattleState::Busy => "BUSY",
            BattleState::End => "END",
        }
    }

    /// True for phases that consume directional/confirm input.
    pub const fn accepts_input(self) -> bool {
        matches!(
            self,
            BattleState::PlayerAction | BattleState::PlayerMove | BattleState::RewardSelection
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, BattleState::End)
    }
}

impl fmt::Display for BattleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// The player ran away, or neither side had anything left to use.
    Fled,
}

impl BattleOutcome {
    /// Collapses the outcome into the win/lose flag older hosts expect.
    pub const fn player_won(self) -> bool {
        matches!(self, BattleOutcome::Victory)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BattleOutcome::Victory => "victory",
            BattleOutcome::Defeat => "defeat",
            BattleOutcome::Fled => "fled",
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn only_end_is_terminal() {
        let terminal: Vec<_> = BattleState::iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![BattleState::End]);
    }

    #[test]
    fn only_victory_counts_as_a_win() {
        assert!(BattleOutcome::Victory.player_won());
        assert!(!BattleOutcome::Defeat.player_won());
        assert!(!BattleOutcome::Fled.player_won());
    }
}
