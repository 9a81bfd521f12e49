//! Abstraction for sourcing the combatants of a battle.
//!
//! The player persists across battles, so the provider owns it and lends it
//! to the engine. Enemies are spawned fresh per battle and owned by the engine
//! until the battle ends.
use game_core::{BattleRng, Combatant, Level};

pub trait CombatantProvider: Send {
    fn player(&self) -> &Combatant;

    fn player_mut(&mut self) -> &mut Combatant;

    /// Spawns an enemy scaled to `player_level`, or `None` if no template is available.
    fn spawn_enemy(&mut self, player_level: Level, rng: &mut dyn BattleRng) -> Option<Combatant>;
}
