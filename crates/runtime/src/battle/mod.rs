//! The battle state machine and its building blocks.
//!
//! - [`engine`] hosts [`BattleEngine`] and its builder
//! - [`selection`] handles cursor movement in the action menu and item grid
//! - [`experience`] maps moves to experience awards
//! - `script` is the internal step queue the engine executes
pub mod engine;
pub mod experience;
pub mod selection;

mod script;

pub use engine::{BattleEngine, BattleEngineBuilder, Prompt, StepResult};
pub use experience::{PlayerAward, as_percent, enemy_turn_award, player_award};
pub use selection::{ActionChoice, ActionMenu, ItemGrid};
