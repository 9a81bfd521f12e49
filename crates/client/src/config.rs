//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use game_core::{BattleConfig, Level};

/// Settings the terminal client reads at startup.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Directory holding `items.ron`, `actors.ron` and `battle.toml`.
    pub data_dir: Option<PathBuf>,
    /// Seed for reproducible battles. Entropy when unset.
    pub seed: Option<u64>,
    /// Typewriter speed override in letters per second; 0 prints instantly.
    pub text_speed: Option<u32>,
    /// Starting level override; `-1` selects the debug level.
    pub player_level: Option<Level>,
    pub session_id: Option<String>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Content directory (default: `./data`, then the platform data dir)
    /// - `BATTLE_SEED` - RNG seed (default: entropy)
    /// - `BATTLE_TEXT_SPEED` - Letters per second (default: from `battle.toml`)
    /// - `BATTLE_PLAYER_LEVEL` - Starting level, `-1` for debug (default: from `actors.ron`)
    /// - `BATTLE_SESSION_ID` - Session identifier for log files (default: auto-generated)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("BATTLE_DATA_DIR").ok().map(PathBuf::from),
            seed: read_env::<u64>("BATTLE_SEED"),
            text_speed: read_env::<u32>("BATTLE_TEXT_SPEED"),
            player_level: read_env::<i32>("BATTLE_PLAYER_LEVEL").map(Level::from_raw),
            session_id: env::var("BATTLE_SESSION_ID").ok(),
        }
    }

    /// Content directory to load from.
    ///
    /// An explicit setting wins. Otherwise `./data` when it exists, then the
    /// platform data directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        let local = PathBuf::from("data");
        if local.is_dir() {
            return local;
        }
        directories::ProjectDirs::from("", "", "dungeon")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or(local)
    }

    /// Applies the overrides that live in [`BattleConfig`].
    pub fn apply(&self, config: &mut BattleConfig) {
        if let Some(speed) = self.text_speed {
            config.pacing.letters_per_second = speed;
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
