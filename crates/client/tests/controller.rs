use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use dungeon_client::{GameController, TerminalPresenter};
use game_content::Catalog;
use game_core::{
    BaseStats, BattleConfig, EnemyKind, EnemyTemplate, FixedRng, Item, PlayerTemplate, Uses,
};
use runtime::{BattleDriver, BattleEngine, CatalogRoster, InputEvent, InputSource, NoInput};

struct AlwaysConfirm;

impl InputSource for AlwaysConfirm {
    fn poll(&mut self) -> Option<InputEvent> {
        Some(InputEvent::Confirm)
    }
}

fn catalog(player_stats: BaseStats, enemy_stats: BaseStats) -> Catalog {
    Catalog::new(
        vec![
            Item::attack("Greatsword", 200, Uses::Unlimited),
            Item::defense("Buckler", 3, Uses::Limited(2)),
            Item::recovery("Herb", 12, Uses::Limited(1)),
        ],
        PlayerTemplate {
            stats: player_stats,
            items: vec!["Greatsword".into()],
            ..PlayerTemplate::default()
        },
        vec![EnemyTemplate::new("Oni", EnemyKind::Demon, enemy_stats)],
    )
}

fn driver(catalog: Catalog, input: impl InputSource + 'static) -> BattleDriver {
    let engine = BattleEngine::builder()
        .config(BattleConfig::instant())
        .presenter(TerminalPresenter::new(Vec::new()))
        .input(input)
        .provider(CatalogRoster::new(catalog))
        .rng(FixedRng::neutral())
        .build()
        .unwrap();
    BattleDriver::new(engine)
}

#[tokio::test(start_paused = true)]
async fn stops_after_battle_limit() {
    let catalog = catalog(BaseStats::new(100, 10, 5, 50), BaseStats::new(20, 1, 1, 1));
    let mut controller = GameController::new(driver(catalog, AlwaysConfirm), Arc::new(Notify::new()))
        .with_pause_between(Duration::from_millis(10))
        .with_battle_limit(2);

    let summary = controller.run().await.unwrap();

    assert_eq!(summary.victories, 2);
    assert_eq!(summary.battles(), 2);
    assert!(!summary.terminated);
}

#[tokio::test(start_paused = true)]
async fn permadeath_ends_the_session() {
    // The oni is faster and one-shots the player.
    let catalog = catalog(BaseStats::new(10, 1, 1, 1), BaseStats::new(50, 80, 1, 20));
    let mut controller = GameController::new(driver(catalog, AlwaysConfirm), Arc::new(Notify::new()));

    let summary = controller.run().await.unwrap();

    assert_eq!(summary.defeats, 1);
    assert!(summary.terminated);
}

#[tokio::test(start_paused = true)]
async fn quit_interrupts_a_waiting_battle() {
    let catalog = catalog(BaseStats::new(100, 10, 5, 50), BaseStats::new(20, 1, 1, 1));
    let quit = Arc::new(Notify::new());
    let mut controller = GameController::new(driver(catalog, NoInput), Arc::clone(&quit));

    let notifier = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        quit.notify_one();
    });

    let summary = controller.run().await.unwrap();
    notifier.await.unwrap();

    assert_eq!(summary.battles(), 0);
    assert!(controller.driver().engine().is_in_progress());
}
