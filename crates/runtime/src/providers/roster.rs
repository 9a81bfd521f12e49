//! Catalog-backed combatant provider.

use strum::IntoEnumIterator;
use tracing::{debug, info};

use game_content::Catalog;
use game_core::{BattleRng, Combatant, ItemKind, Level};

use crate::api::CombatantProvider;

/// Owns the persistent player and spawns enemies from a content [`Catalog`].
pub struct CatalogRoster {
    catalog: Catalog,
    player: Combatant,
}

impl CatalogRoster {
    /// Builds the player from the catalog's template and starting items.
    pub fn new(catalog: Catalog) -> Self {
        let player = Combatant::player(catalog.player(), catalog.starting_items());
        Self { catalog, player }
    }

    /// Uses an already-built player, e.g. one restored from a record.
    pub fn with_player(catalog: Catalog, player: Combatant) -> Self {
        Self { catalog, player }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Enemy level for a player of `player_level`.
    ///
    /// Uniform in `[max(1, level - 1), level + 1]`; a debug player faces level 1.
    pub fn enemy_level(player_level: Level, rng: &mut dyn BattleRng) -> Level {
        match player_level {
            Level::Debug => Level::FIRST,
            Level::Rank(rank) => {
                let low = rank.saturating_sub(1).max(1);
                let high = rank.saturating_add(1);
                Level::new(rng.range(low, high))
            }
        }
    }

    /// One random item of each kind, then a fourth of the enemy kind's preferred
    /// kind (a random kind when it has none).
    fn enemy_items(preferred: Option<ItemKind>, rng: &mut dyn BattleRng) -> Vec<ItemKind> {
        let fourth = preferred.unwrap_or_else(|| {
            let kinds: Vec<ItemKind> = ItemKind::iter().collect();
            kinds[rng.pick(kinds.len())]
        });
        vec![ItemKind::Recovery, ItemKind::Defense, ItemKind::Attack, fourth]
    }
}

impl CombatantProvider for CatalogRoster {
    fn player(&self) -> &Combatant {
        &self.player
    }

    fn player_mut(&mut self) -> &mut Combatant {
        &mut self.player
    }

    fn spawn_enemy(&mut self, player_level: Level, rng: &mut dyn BattleRng) -> Option<Combatant> {
        let template = self.catalog.random_enemy(rng)?.clone();
        let level = Self::enemy_level(player_level, rng);
        let items: Vec<_> = Self::enemy_items(template.kind.preferred_item(), rng)
            .into_iter()
            .filter_map(|kind| self.catalog.random_item(kind, rng))
            .collect();

        debug!(
            enemy = %template.name,
            kind = %template.kind,
            items = items.len(),
            "enemy inventory rolled"
        );
        info!(enemy = %template.name, %level, "enemy spawned");
        Some(Combatant::enemy(&template, level, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        BaseStats, EnemyKind, EnemyTemplate, FixedRng, Item, PcgRng, PlayerTemplate, Uses,
    };

    fn catalog(kind: EnemyKind) -> Catalog {
        Catalog::new(
            vec![
                Item::attack("Dagger", 10, Uses::Limited(3)),
                Item::defense("Buckler", 3, Uses::Limited(2)),
                Item::recovery("Herb", 12, Uses::Limited(1)),
            ],
            PlayerTemplate {
                items: vec!["Dagger".into()],
                ..PlayerTemplate::default()
            },
            vec![EnemyTemplate::new("Foe", kind, BaseStats::new(30, 2, 2, 1))],
        )
    }

    #[test]
    fn player_starts_with_catalog_items() {
        let roster = CatalogRoster::new(catalog(EnemyKind::Demon));
        assert_eq!(roster.player().inventory().occupied(), 1);
        assert_eq!(roster.player().name(), "Player");
    }

    #[test]
    fn enemy_fourth_item_follows_kind() {
        let mut roster = CatalogRoster::new(catalog(EnemyKind::Gremlin));
        let enemy = roster
            .spawn_enemy(Level::FIRST, &mut FixedRng::neutral())
            .unwrap();

        let kinds: Vec<ItemKind> = enemy.inventory().occupied_slots().map(|(_, i)| i.kind()).collect();
        assert_eq!(
            kinds,
            vec![ItemKind::Recovery, ItemKind::Defense, ItemKind::Attack, ItemKind::Recovery]
        );
    }

    #[test]
    fn enemy_level_stays_near_player() {
        let mut rng = PcgRng::seeded(3);
        for _ in 0..200 {
            let level = CatalogRoster::enemy_level(Level::new(5), &mut rng);
            let rank = level.rank().unwrap();
            assert!((4..=6).contains(&rank));

            let low = CatalogRoster::enemy_level(Level::FIRST, &mut rng);
            assert!((1..=2).contains(&low.rank().unwrap()));
        }
        assert_eq!(CatalogRoster::enemy_level(Level::Debug, &mut rng), Level::FIRST);
    }

    #[test]
    fn yokai_fill_the_fourth_slot() {
        let mut roster = CatalogRoster::new(catalog(EnemyKind::Yokai));
        let enemy = roster.spawn_enemy(Level::new(2), &mut PcgRng::seeded(8)).unwrap();
        assert!(enemy.inventory().is_full());
    }
}
