//! Read-only inputs the battle rules consume.
//!
//! Combatant templates describe what can be spawned; [`BattleRng`] supplies
//! every random draw. Neither is part of battle state.
mod rng;
mod templates;

pub use rng::{BattleRng, FixedRng, PcgRng};
pub use templates::{EnemyKind, EnemyTemplate, PlayerTemplate};
