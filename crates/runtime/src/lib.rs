//! Runtime orchestration for turn-based battles.
//!
//! This crate wires the combat rules from `game-core` and the content catalog
//! from `game-content` into a running battle. Consumers build a
//! [`BattleEngine`] from a presenter, an input source and a combatant
//! provider, then tick it directly or hand it to [`BattleDriver`].
//!
//! Modules are organized by responsibility:
//! - [`battle`] hosts the state machine and its builder
//! - [`runtime`] provides the async tick driver
//! - [`api`] exposes the seams downstream clients implement
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] supplies default collaborators (catalog roster, enemy AI, randomness)
pub mod api;
pub mod battle;
pub mod events;
pub mod providers;
pub mod runtime;

pub use api::{
    BattleError, ChannelInput, CollaboratorKind, CombatantProvider, HudView, InputEvent,
    InputSource, NoInput, Presenter, Result, ScriptedInput, SelectorKind,
};
pub use battle::{ActionChoice, BattleEngine, BattleEngineBuilder, Prompt, StepResult};
pub use events::{BattleEvent, Event, EventBus, NarrationEvent, Topic};
pub use providers::{CatalogRoster, EnemyPolicy, StdBattleRng, ThresholdPolicy, choose_enemy_item};
pub use runtime::{BattleDriver, DriverConfig};
