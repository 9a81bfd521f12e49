//! Terminal host for the battle engine.
//!
//! The binary is the composition root: it loads content, builds a
//! [`runtime::BattleEngine`] from a stdout presenter and a stdin input source,
//! and hands it to a [`GameController`] that keeps starting encounters.
//!
//! - [`config`] reads environment overrides
//! - [`logging`] installs the file subscriber
//! - [`terminal`] renders the battle as plain lines
//! - [`keyboard`] turns typed keys into input events
//! - [`controller`] sequences battles
pub mod config;
pub mod controller;
pub mod keyboard;
pub mod logging;
pub mod terminal;

pub use config::ClientConfig;
pub use controller::{GameController, SessionSummary};
pub use keyboard::{KeyAction, map_key, map_line, spawn_stdin_reader};
pub use terminal::TerminalPresenter;
