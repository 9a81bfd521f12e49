//! Dungeon battle client binary.
//!
//! # Architecture
//!
//! 1. Configuration from `.env` and the process environment
//! 2. Content (items, actors, tunables) from the data directory
//! 3. BattleEngine wired to stdout, stdin and a catalog roster
//! 4. GameController loop until defeat, quit, or end of input
//!
//! # Examples
//!
//! ```bash
//! BATTLE_SEED=7 BATTLE_TEXT_SPEED=0 cargo run -p dungeon-client
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Notify;

use dungeon_client::{ClientConfig, GameController, TerminalPresenter, logging, spawn_stdin_reader};
use game_content::ContentFactory;
use runtime::{BattleDriver, BattleEngine, CatalogRoster, ChannelInput, StdBattleRng};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.session_id.as_deref())?;

    let data_dir = config.resolve_data_dir();
    tracing::info!(data_dir = %data_dir.display(), "loading content");
    let factory = ContentFactory::new(&data_dir);
    let mut battle_config = factory
        .load_config()
        .with_context(|| format!("failed to load battle config from {}", data_dir.display()))?;
    config.apply(&mut battle_config);
    let catalog = factory
        .load_catalog()
        .with_context(|| format!("failed to load content from {}", data_dir.display()))?;

    let mut roster = CatalogRoster::new(catalog);
    if let Some(level) = config.player_level {
        tracing::info!(%level, "starting level overridden");
        runtime::CombatantProvider::player_mut(&mut roster).set_level(level);
    }

    let rng = match config.seed {
        Some(seed) => {
            tracing::info!(seed, "seeded battle rng");
            StdBattleRng::seeded(seed)
        }
        None => StdBattleRng::from_entropy(),
    };

    let (events, input) = ChannelInput::channel();
    let quit = Arc::new(Notify::new());
    spawn_stdin_reader(events, Arc::clone(&quit));

    let engine = BattleEngine::builder()
        .config(battle_config)
        .presenter(TerminalPresenter::stdout())
        .input(input)
        .provider(roster)
        .rng(rng)
        .build()?;

    println!("w/s/a/d to move, Enter or space to confirm, q to quit.");
    let summary = GameController::new(BattleDriver::new(engine), quit)
        .run()
        .await?;

    println!(
        "Battles: {}  Won: {}  Lost: {}  Fled: {}",
        summary.battles(),
        summary.victories,
        summary.defeats,
        summary.escapes
    );
    tracing::info!("client shutdown complete");

    if summary.terminated {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
