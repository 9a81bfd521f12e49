//! Level-derived combat stats.
//!
//! Every stat is recomputed from the combatant's base stats and [`Level`]:
//! `base + (level - 1) * 5`. Enemies also get a flat max HP bonus. A debug
//! level pins every stat to [`BattleConfig::DEBUG_STAT`].
//!
//! [`Level`]: crate::state::Level
//! [`BattleConfig::DEBUG_STAT`]: crate::config::BattleConfig::DEBUG_STAT

pub mod derived;

pub use derived::{BaseStats, StatBlock};
