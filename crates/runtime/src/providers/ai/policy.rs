//! Enemy item selection.

use arrayvec::ArrayVec;
use tracing::debug;

use game_core::{BattleRng, Combatant, INVENTORY_SLOTS, ItemKind};

use super::goal::{Goal, GoalSelector};

/// Decides which inventory slot an enemy uses on its turn.
pub trait EnemyPolicy: Send {
    /// Returns the slot to use, or `None` when the enemy has nothing usable.
    fn choose(&self, enemy: &Combatant, rng: &mut dyn BattleRng) -> Option<usize>;
}

/// Default policy: HP-threshold goals with a fixed fallback order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdPolicy;

impl EnemyPolicy for ThresholdPolicy {
    fn choose(&self, enemy: &Combatant, rng: &mut dyn BattleRng) -> Option<usize> {
        choose_enemy_item(enemy, rng)
    }
}

/// Picks a slot for `enemy`.
///
/// The goal's item kind is tried first. If the enemy holds none of that kind,
/// the fallback order is Recovery, Defense, Attack, then any occupied slot.
pub fn choose_enemy_item<R: BattleRng + ?Sized>(enemy: &Combatant, rng: &mut R) -> Option<usize> {
    let inventory = enemy.inventory();
    let recovery = inventory.slots_of_kind(ItemKind::Recovery);
    let defense = inventory.slots_of_kind(ItemKind::Defense);
    let attack = inventory.slots_of_kind(ItemKind::Attack);

    let goal = GoalSelector::select(enemy, !attack.is_empty(), rng);
    let preferred = match goal {
        Goal::Recover => &recovery,
        Goal::Fortify => &defense,
        Goal::Strike => &attack,
    };
    debug!(enemy = %enemy.name(), hp = enemy.hp(), ?goal, "enemy goal selected");

    if let Some(slot) = pick(preferred, rng) {
        return Some(slot);
    }

    let any = inventory.occupied_indices();
    [&recovery, &defense, &attack, &any]
        .into_iter()
        .find_map(|candidates| pick(candidates, rng))
}

fn pick<R: BattleRng + ?Sized>(
    candidates: &ArrayVec<usize, INVENTORY_SLOTS>,
    rng: &mut R,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get(rng.pick(candidates.len())).copied()
}
