//! Async driver around the battle engine.
//!
//! [`BattleEngine`] is a synchronous state machine. [`BattleDriver`] owns one
//! and ticks it from a tokio interval, so hosts can simply `await` the end of
//! a battle instead of running their own frame loop.

use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::api::Result;
use crate::battle::{BattleEngine, StepResult};

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Wall time between engine ticks.
    pub tick_interval: Duration,
}

impl DriverConfig {
    pub const DEFAULT_TICK_RATE_HZ: u32 = 60;

    /// Ticks `hz` times per second. Zero falls back to the default rate.
    pub fn with_tick_rate(hz: u32) -> Self {
        let hz = if hz == 0 { Self::DEFAULT_TICK_RATE_HZ } else { hz };
        Self {
            tick_interval: Duration::from_secs(1) / hz,
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::with_tick_rate(Self::DEFAULT_TICK_RATE_HZ)
    }
}

/// Runs battles on a fixed tick.
pub struct BattleDriver {
    engine: BattleEngine,
    config: DriverConfig,
}

impl BattleDriver {
    pub fn new(engine: BattleEngine) -> Self {
        Self::with_config(engine, DriverConfig::default())
    }

    pub fn with_config(engine: BattleEngine, config: DriverConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut BattleEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> BattleEngine {
        self.engine
    }

    /// Starts a battle and ticks until it finishes.
    ///
    /// Returns the final [`StepResult::Finished`].
    pub async fn run_battle(&mut self) -> Result<StepResult> {
        self.engine.start_battle()?;
        Ok(self.run_until_finished().await)
    }

    /// Ticks the running battle until it finishes. Returns immediately with
    /// [`StepResult::Idle`] when no battle is running.
    pub async fn run_until_finished(&mut self) -> StepResult {
        if !self.engine.is_in_progress() {
            return StepResult::Idle;
        }

        let mut interval = time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();
        let mut ticks = 0u64;

        loop {
            let now = interval.tick().await;
            let dt = now.saturating_duration_since(last);
            last = now;
            ticks += 1;

            let step = self.engine.tick(dt);
            if step.is_finished() {
                info!(ticks, ?step, "battle driver finished");
                return step;
            }
            if ticks % 600 == 0 {
                debug!(ticks, state = %self.engine.state(), "battle still running");
            }
        }
    }
}
