//! Combat resolution.
//!
//! Pure arithmetic shared by [`Combatant`](crate::Combatant): damage,
//! healing and defense scaling, plus turn-order rules.
//!
//! # Core Functions
//!
//! - `calculate_damage`: item power + attack, scaled by the roll, minus defense
//! - `scale`: floor of an amount times the roll
//! - `determine_first_turn`: speed comparison, ties to the player

pub mod damage;
pub mod turns;

pub use damage::{RollRange, calculate_damage, scale};
pub use turns::{Side, TurnOrder, determine_first_turn};
