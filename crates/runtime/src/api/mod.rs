//! Public runtime API surface.
//!
//! This module gathers the seams a host implements (presentation, input,
//! combatant supply) and the error type the engine reports through.

pub mod errors;
pub mod input;
pub mod presenter;
pub mod providers;

pub use errors::{BattleError, CollaboratorKind, Result, report};
pub use input::{ChannelInput, InputEvent, InputSource, NoInput, ScriptedInput};
pub use presenter::{HudView, Presenter, SelectorKind};
pub use providers::CombatantProvider;
