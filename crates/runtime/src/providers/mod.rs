//! Provider implementations: enemy AI, randomness and combatant supply.

pub mod ai;
pub mod rng;
pub mod roster;

pub use ai::{EnemyPolicy, ThresholdPolicy, choose_enemy_item};
pub use rng::StdBattleRng;
pub use roster::CatalogRoster;
