// Startup configuration and validation

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("boss_alertness must be between 0 and 100, got {0}")]
    AlertnessOutOfRange(i64),

    #[error("boss_alertness_cooldown must be greater than 0, got {0}")]
    NonPositiveCooldown(i64),
}

/// Validated startup parameters for the break server.
///
/// Constructed once before any state or background task exists; a validation
/// failure here is fatal and aborts startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChillConfig {
    /// Probability in [0, 1] that a break raises the boss alert level.
    pub alert_probability: f64,
    /// Interval between automatic boss alert decrements.
    pub alert_cooldown: Duration,
}

impl ChillConfig {
    /// Build a config from the raw command-line values: an alertness
    /// percentage in [0, 100] and a cooldown in whole seconds (> 0).
    pub fn new(boss_alertness: i64, boss_alertness_cooldown: i64) -> Result<Self, ConfigError> {
        if !(0..=100).contains(&boss_alertness) {
            return Err(ConfigError::AlertnessOutOfRange(boss_alertness));
        }
        if boss_alertness_cooldown <= 0 {
            return Err(ConfigError::NonPositiveCooldown(boss_alertness_cooldown));
        }

        Ok(Self {
            alert_probability: boss_alertness as f64 / 100.0,
            alert_cooldown: Duration::from_secs(boss_alertness_cooldown as u64),
        })
    }
}
