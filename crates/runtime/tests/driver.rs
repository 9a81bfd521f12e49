use std::sync::{Arc, Mutex};
use std::time::Duration;

use game_content::Catalog;
use game_core::{
    BaseStats, BattleConfig, BattleOutcome, EnemyKind, EnemyTemplate, FixedRng, Item,
    PlayerTemplate, Uses,
};
use runtime::{
    BattleDriver, BattleEngine, CatalogRoster, DriverConfig, InputEvent, InputSource, Presenter,
    SelectorKind, StepResult,
};

/// Confirms whatever is asked.
struct AlwaysConfirm;

impl InputSource for AlwaysConfirm {
    fn poll(&mut self) -> Option<InputEvent> {
        Some(InputEvent::Confirm)
    }
}

#[derive(Clone, Default)]
struct Transcript(Arc<Mutex<Vec<String>>>);

impl Presenter for Transcript {
    fn show_text(&mut self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }

    fn set_highlighted(&mut self, _selector: SelectorKind, _index: usize) {}

    fn toggle_selector(&mut self, _selector: SelectorKind, _visible: bool) {}

    fn set_item_labels(&mut self, _labels: &[String]) {}

    fn set_item_detail(&mut self, _type_label: &str, _uses_label: &str) {}

    fn set_action_labels(&mut self, _first: &str, _second: &str) {}
}

fn catalog() -> Catalog {
    Catalog::new(
        vec![
            Item::attack("Greatsword", 200, Uses::Unlimited),
            Item::defense("Buckler", 3, Uses::Limited(2)),
            Item::recovery("Herb", 12, Uses::Limited(1)),
        ],
        PlayerTemplate {
            name: "Ayame".into(),
            stats: BaseStats::new(100, 10, 5, 50),
            items: vec!["Greatsword".into()],
            ..PlayerTemplate::default()
        },
        vec![EnemyTemplate::new(
            "Kappa",
            EnemyKind::Yokai,
            BaseStats::new(20, 1, 1, 1),
        )],
    )
}

fn engine(config: BattleConfig, transcript: Transcript) -> BattleEngine {
    BattleEngine::builder()
        .config(config)
        .presenter(transcript)
        .input(AlwaysConfirm)
        .provider(CatalogRoster::new(catalog()))
        .rng(FixedRng::neutral())
        .build()
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn driver_runs_battle_to_completion() {
    let transcript = Transcript::default();
    let mut driver = BattleDriver::new(engine(BattleConfig::default(), transcript.clone()));

    let started = tokio::time::Instant::now();
    let step = driver.run_battle().await.unwrap();

    assert_eq!(
        step,
        StepResult::Finished {
            outcome: BattleOutcome::Victory,
            terminate: false
        }
    );
    // Every line is held for at least the post delay.
    let lines = transcript.0.lock().unwrap().len() as u32;
    assert!(started.elapsed() >= Duration::from_secs(2) * lines);
    assert!(!driver.engine().is_in_progress());
}

#[tokio::test(start_paused = true)]
async fn driver_plays_consecutive_battles() {
    let transcript = Transcript::default();
    let mut driver = BattleDriver::with_config(
        engine(BattleConfig::instant(), transcript),
        DriverConfig::with_tick_rate(30),
    );

    for _ in 0..3 {
        let step = driver.run_battle().await.unwrap();
        assert_eq!(driver.engine().last_outcome(), Some(BattleOutcome::Victory));
        assert!(step.is_finished());
    }

    let inventory = driver.engine().player().inventory();
    assert!(inventory.occupied() > 1);
}

#[tokio::test(start_paused = true)]
async fn idle_driver_returns_immediately() {
    let mut driver = BattleDriver::new(engine(BattleConfig::instant(), Transcript::default()));
    assert_eq!(driver.run_until_finished().await, StepResult::Idle);
}

#[test]
fn tick_rate_defaults_when_zero() {
    let config = DriverConfig::with_tick_rate(0);
    assert_eq!(config.tick_interval, DriverConfig::default().tick_interval);
    assert_eq!(
        DriverConfig::with_tick_rate(10).tick_interval,
        Duration::from_millis(100)
    );
}
