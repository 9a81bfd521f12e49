//! Damage calculation.

use crate::config::BattleConfig;
use crate::env::BattleRng;

/// Range of the random variance factor applied to every effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollRange {
    pub min: f32,
    pub max: f32,
}

impl RollRange {
    pub const DEFAULT: RollRange = RollRange {
        min: BattleConfig::DEFAULT_ROLL_MIN,
        max: BattleConfig::DEFAULT_ROLL_MAX,
    };

    /// Draws one variance factor.
    pub fn draw<R: BattleRng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.variance(self.min, self.max)
    }
}

impl Default for RollRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<&BattleConfig> for RollRange {
    fn from(config: &BattleConfig) -> Self {
        Self {
            min: config.roll_min,
            max: config.roll_max,
        }
    }
}

/// Calculate damage dealt by an attack item.
///
/// # Formula
///
/// ```text
/// raw_damage   = floor((item_power + attack) * roll)
/// final_damage = max(0, raw_damage - defense)
/// ```
///
/// The order matters: the roll scales item power and attack together, the
/// result is floored, and only then is defense subtracted.
pub fn calculate_damage(item_power: u32, attack: u32, roll: f32, defense: u32) -> u32 {
    let raw = scale(item_power.saturating_add(attack), roll);
    raw.saturating_sub(defense)
}

/// `floor(amount * roll)`, never negative.
pub fn scale(amount: u32, roll: f32) -> u32 {
    let scaled = (amount as f32 * roll).floor();
    if scaled <= 0.0 { 0 } else { scaled as u32 }
}
