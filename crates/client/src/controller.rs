//! Game controller: starts battles one after another until the session ends.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Notify;
use tracing::info;

use game_core::BattleOutcome;
use runtime::{BattleDriver, StepResult};

/// Tally of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub victories: u32,
    pub defeats: u32,
    pub escapes: u32,
    /// Set when the last battle asked the host to shut down.
    pub terminated: bool,
}

impl SessionSummary {
    pub fn battles(&self) -> u32 {
        self.victories + self.defeats + self.escapes
    }

    fn record(&mut self, outcome: BattleOutcome) {
        match outcome {
            BattleOutcome::Victory => self.victories += 1,
            BattleOutcome::Defeat => self.defeats += 1,
            BattleOutcome::Fled => self.escapes += 1,
        }
    }
}

/// Runs encounters back to back.
///
/// A session ends when a battle asks to terminate (defeat under permadeath),
/// when `quit` is notified, or after the optional battle limit.
pub struct GameController {
    driver: BattleDriver,
    quit: Arc<Notify>,
    pause_between: Duration,
    battle_limit: Option<u32>,
}

impl GameController {
    pub fn new(driver: BattleDriver, quit: Arc<Notify>) -> Self {
        Self {
            driver,
            quit,
            pause_between: Duration::from_secs(1),
            battle_limit: None,
        }
    }

    #[must_use]
    pub fn with_pause_between(mut self, pause: Duration) -> Self {
        self.pause_between = pause;
        self
    }

    #[must_use]
    pub fn with_battle_limit(mut self, limit: u32) -> Self {
        self.battle_limit = Some(limit);
        self
    }

    pub fn driver(&self) -> &BattleDriver {
        &self.driver
    }

    pub async fn run(&mut self) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        loop {
            if self
                .battle_limit
                .is_some_and(|limit| summary.battles() >= limit)
            {
                info!(battles = summary.battles(), "battle limit reached");
                break;
            }

            let step = tokio::select! {
                step = self.driver.run_battle() => step?,
                () = self.quit.notified() => {
                    info!("quit requested");
                    break;
                }
            };

            let StepResult::Finished { outcome, terminate } = step else {
                continue;
            };
            summary.record(outcome);
            info!(%outcome, battles = summary.battles(), "encounter finished");

            if terminate {
                summary.terminated = true;
                break;
            }
            if outcome == BattleOutcome::Defeat {
                // Without permadeath the player wakes up at full health.
                let player = self.driver.engine_mut().player_mut();
                let level = player.level();
                player.set_level(level);
            }

            tokio::select! {
                () = tokio::time::sleep(self.pause_between) => {}
                () = self.quit.notified() => {
                    info!("quit requested");
                    break;
                }
            }
        }

        info!(
            victories = summary.victories,
            defeats = summary.defeats,
            escapes = summary.escapes,
            "session over"
        );
        Ok(summary)
    }
}
