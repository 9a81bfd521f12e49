//! Topic-based event bus for battle events.
//!
//! The engine publishes lifecycle changes and narration here; hosts and tests
//! subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{BattleEvent, NarrationEvent};
