//! Battle configuration constants and tunable parameters.

use core::time::Duration;

use crate::error::{ErrorSeverity, GameError};

/// Rejected battle configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("roll range {min}..={max} must be finite, non-negative and ordered")]
    RollRange { min: f32, max: f32 },

    #[error("flee_chance must be within 0..=1, got {0}")]
    FleeChance(f32),

    #[error("victory_heal_divisor must be positive")]
    VictoryHealDivisor,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RollRange { .. } => "INVALID_ROLL_RANGE",
            Self::FleeChance(_) => "INVALID_FLEE_CHANCE",
            Self::VictoryHealDivisor => "INVALID_HEAL_DIVISOR",
        }
    }
}

/// Battle configuration constants and tunable parameters.
///
/// Compile-time constants shape the data model (inventory capacity, sentinel
/// stat values). Runtime-tunable fields can be overridden from a TOML file via
/// the content loaders; any key left out falls back to [`BattleConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Lower bound of the random variance applied to damage, heals and defense.
    pub roll_min: f32,
    /// Upper bound of the random variance applied to damage, heals and defense.
    pub roll_max: f32,
    /// Probability that a Run attempt succeeds.
    pub flee_chance: f32,
    /// Fraction of max HP restored to the player after a victory.
    pub victory_heal_divisor: u32,
    /// Seconds the player has to pick a slot to overwrite before the drop is discarded.
    pub reward_timeout_secs: u64,
    /// When set, a defeat asks the host process to terminate.
    pub permadeath: bool,
    pub pacing: TextPacing,
    pub experience: ExperienceTable,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of fixed inventory slots per combatant.
    pub const INVENTORY_SLOTS: usize = 4;
    /// Defense assigned by an absolute defense item.
    pub const ABSOLUTE_DEFENSE: u32 = 9999;
    /// Every stat of a debug-level combatant.
    pub const DEBUG_STAT: u32 = 9999;
    /// Stat growth per level above 1.
    pub const STAT_GROWTH_PER_LEVEL: u32 = 5;
    /// Flat max HP bonus granted to enemies.
    pub const ENEMY_HP_BONUS: u32 = 10;
    /// Item magnitude growth per level.
    pub const ITEM_GROWTH_PER_LEVEL: u32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROLL_MIN: f32 = 0.85;
    pub const DEFAULT_ROLL_MAX: f32 = 1.15;
    pub const DEFAULT_FLEE_CHANCE: f32 = 0.5;
    pub const DEFAULT_VICTORY_HEAL_DIVISOR: u32 = 3;
    pub const DEFAULT_REWARD_TIMEOUT_SECS: u64 = 30;

    pub fn new() -> Self {
        Self {
            roll_min: Self::DEFAULT_ROLL_MIN,
            roll_max: Self::DEFAULT_ROLL_MAX,
            flee_chance: Self::DEFAULT_FLEE_CHANCE,
            victory_heal_divisor: Self::DEFAULT_VICTORY_HEAL_DIVISOR,
            reward_timeout_secs: Self::DEFAULT_REWARD_TIMEOUT_SECS,
            permadeath: true,
            pacing: TextPacing::default(),
            experience: ExperienceTable::default(),
        }
    }

    /// Checks the tunables every random draw and heal depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.roll_min, self.roll_max);
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
            return Err(ConfigError::RollRange { min, max });
        }
        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&self.flee_chance) {
            return Err(ConfigError::FleeChance(self.flee_chance));
        }
        if self.victory_heal_divisor == 0 {
            return Err(ConfigError::VictoryHealDivisor);
        }
        Ok(())
    }

    pub fn reward_timeout(&self) -> Duration {
        Duration::from_secs(self.reward_timeout_secs)
    }

    /// Returns a copy with instant text and no delays. Useful for tests and headless hosts.
    pub fn instant() -> Self {
        Self {
            pacing: TextPacing::instant(),
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How long narration keeps the engine suspended.
///
/// A line of text is "typed out" at `letters_per_second` and then held for
/// `post_delay_ms`. `dialog_delay_ms` is the short pause between beats of a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextPacing {
    /// Zero disables the typewriter delay entirely.
    pub letters_per_second: u32,
    pub post_delay_ms: u64,
    pub dialog_delay_ms: u64,
}

impl TextPacing {
    pub const fn instant() -> Self {
        Self {
            letters_per_second: 0,
            post_delay_ms: 0,
            dialog_delay_ms: 0,
        }
    }

    /// Total time a line stays on screen before the engine resumes.
    pub fn typing_duration(&self, text: &str) -> Duration {
        let typing = if self.letters_per_second == 0 {
            Duration::ZERO
        } else {
            let letters = text.chars().count() as u64;
            Duration::from_millis(letters * 1000 / u64::from(self.letters_per_second))
        };
        typing + Duration::from_millis(self.post_delay_ms)
    }

    pub fn dialog_delay(&self) -> Duration {
        Duration::from_millis(self.dialog_delay_ms)
    }
}

impl Default for TextPacing {
    fn default() -> Self {
        Self {
            letters_per_second: 30,
            post_delay_ms: 2000,
            dialog_delay_ms: 500,
        }
    }
}

/// Experience awarded per action.
///
/// Player awards are split into a base amount that every move earns plus a
/// per-kind bonus. Recovery and defense moves also grant a silent bonus that
/// is applied immediately without narration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperienceTable {
    pub player_base: f32,
    pub player_attack: f32,
    pub player_kill: f32,
    pub player_recovery: f32,
    pub player_recovery_silent: f32,
    pub player_defense: f32,
    pub player_defense_silent: f32,

    pub enemy_base: f32,
    pub enemy_attack: f32,
    pub enemy_recovery: f32,
    pub enemy_defense: f32,

    /// Player award for sitting through an enemy turn that used nothing.
    /// The per-kind values replace it when the enemy did use an item.
    pub witness_base: f32,
    pub witness_attack: f32,
    pub witness_recovery: f32,
    pub witness_defense: f32,
}

impl Default for ExperienceTable {
    fn default() -> Self {
        Self {
            player_base: 0.03,
            player_attack: 0.05,
            player_kill: 0.1,
            player_recovery: 0.03,
            player_recovery_silent: 0.3,
            player_defense: 0.04,
            player_defense_silent: 0.4,

            enemy_base: 0.02,
            enemy_attack: 0.03,
            enemy_recovery: 0.02,
            enemy_defense: 0.04,

            witness_base: 0.01,
            witness_attack: 0.03,
            witness_recovery: 0.02,
            witness_defense: 0.02,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_duration_counts_letters_and_post_delay() {
        let pacing = TextPacing {
            letters_per_second: 10,
            post_delay_ms: 2000,
            dialog_delay_ms: 500,
        };
        assert_eq!(pacing.typing_duration("abcde"), Duration::from_millis(2500));
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(BattleConfig::default().validate(), Ok(()));
        assert_eq!(BattleConfig::instant().validate(), Ok(()));
    }

    #[test]
    fn broken_roll_ranges_are_rejected() {
        for (roll_min, roll_max) in [(1.2, 0.9), (-0.5, 1.0), (f32::NAN, 1.0), (0.9, f32::INFINITY)] {
            let config = BattleConfig {
                roll_min,
                roll_max,
                ..BattleConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::RollRange { .. })),
                "{roll_min}..={roll_max}"
            );
        }
    }

    #[test]
    fn flee_chance_must_be_a_probability() {
        for flee_chance in [f32::NAN, -0.1, 1.5] {
            let config = BattleConfig {
                flee_chance,
                ..BattleConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.error_code(), "INVALID_FLEE_CHANCE");
            assert_eq!(err.severity(), ErrorSeverity::Fatal);
        }
    }

    #[test]
    fn instant_pacing_never_suspends() {
        let pacing = TextPacing::instant();
        assert_eq!(pacing.typing_duration("a long line"), Duration::ZERO);
        assert_eq!(pacing.dialog_delay(), Duration::ZERO);
    }
}
