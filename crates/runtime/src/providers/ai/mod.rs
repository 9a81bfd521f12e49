//! Enemy decision-making.
//!
//! Enemies pick an item in two steps:
//!
//! 1. **Goal selection**: remaining HP decides whether to recover, fortify or
//!    strike, with a coin flip toward striking in the middle bands.
//! 2. **Slot selection**: a random slot holding the goal's item kind, falling
//!    back through Recovery, Defense, Attack and finally any occupied slot.
//!
//! # Core Components
//!
//! - [`EnemyPolicy`]: seam the engine calls each enemy turn
//! - [`ThresholdPolicy`]: default policy built on [`choose_enemy_item`]
//! - [`GoalSelector`]: HP-threshold goal picker

pub mod goal;
pub mod policy;

pub use goal::{Goal, GoalSelector};
pub use policy::{EnemyPolicy, ThresholdPolicy, choose_enemy_item};
