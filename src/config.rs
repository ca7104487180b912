//! Session configuration
//!
//! Applied only at reset; immutable while a run is in progress. All numeric
//! input is clamped into range rather than rejected (out-of-range values
//! saturate to the nearest bound).

use serde::{Deserialize, Serialize};

use crate::consts::SEEK_STEP_SCALE;
use crate::ms_to_ticks;

/// Bounds for the user-tunable fields
pub const NUM_ENEMIES_MIN: i64 = 0;
pub const NUM_ENEMIES_MAX: i64 = 5;
pub const SPEED_FACTOR_MIN: i64 = 1;
pub const SPEED_FACTOR_MAX: i64 = 3;
pub const START_LIFE_MIN: i64 = 1;
pub const START_LIFE_MAX: i64 = 5;

/// Unvalidated configuration values as read from an input surface.
///
/// Drivers map unparseable or absent fields to `i64::MIN`, so malformed
/// input saturates to the range minimum like any other out-of-range value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawConfig {
    pub num_enemies: i64,
    pub speed_factor: i64,
    pub start_life: i64,
}

impl RawConfig {
    pub fn new(num_enemies: Option<i64>, speed_factor: Option<i64>, start_life: Option<i64>) -> Self {
        Self {
            num_enemies: num_enemies.unwrap_or(i64::MIN),
            speed_factor: speed_factor.unwrap_or(i64::MIN),
            start_life: start_life.unwrap_or(i64::MIN),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Obstacles placed on reset (0-5)
    pub num_enemies: u32,
    /// Obstacle speed multiplier (1-3)
    pub speed_factor: u32,
    /// Life count at the start of a run (1-5)
    pub start_life: u32,
    /// Base obstacle speed, scaled by `speed_factor` each tick
    pub base_speed: f32,
    /// Damage-suppression window after a hit, in milliseconds
    pub invulnerability_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_enemies: 1,
            speed_factor: 1,
            start_life: 3,
            base_speed: 10.0,
            invulnerability_ms: 1000,
        }
    }
}

impl Config {
    /// Clamp raw input into a valid configuration, keeping the non-tunable
    /// fields (`base_speed`, `invulnerability_ms`) from `self`.
    pub fn clamped(&self, raw: &RawConfig) -> Self {
        Self {
            num_enemies: raw.num_enemies.clamp(NUM_ENEMIES_MIN, NUM_ENEMIES_MAX) as u32,
            speed_factor: raw.speed_factor.clamp(SPEED_FACTOR_MIN, SPEED_FACTOR_MAX) as u32,
            start_life: raw.start_life.clamp(START_LIFE_MIN, START_LIFE_MAX) as u32,
            ..*self
        }
    }

    /// Distance an obstacle covers toward the player per tick
    pub fn seek_step(&self) -> f32 {
        self.speed_factor as f32 * self.base_speed * SEEK_STEP_SCALE
    }

    /// Damage-suppression window in ticks
    pub fn invulnerability_ticks(&self) -> u32 {
        ms_to_ticks(self.invulnerability_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.num_enemies, 1);
        assert_eq!(config.speed_factor, 1);
        assert_eq!(config.start_life, 3);
        assert_eq!(config.invulnerability_ticks(), 60);
    }

    #[test]
    fn test_clamps_out_of_range_input() {
        let raw = RawConfig {
            num_enemies: 99,
            speed_factor: -5,
            start_life: 0,
        };
        let config = Config::default().clamped(&raw);
        assert_eq!(config.num_enemies, 5);
        assert_eq!(config.speed_factor, 1);
        assert_eq!(config.start_life, 1);
    }

    #[test]
    fn test_in_range_input_passes_through() {
        let raw = RawConfig {
            num_enemies: 3,
            speed_factor: 2,
            start_life: 4,
        };
        let config = Config::default().clamped(&raw);
        assert_eq!(config.num_enemies, 3);
        assert_eq!(config.speed_factor, 2);
        assert_eq!(config.start_life, 4);
    }

    #[test]
    fn test_unparseable_input_saturates_to_minimum() {
        let raw = RawConfig::new(None, None, None);
        let config = Config::default().clamped(&raw);
        assert_eq!(config.num_enemies, 0);
        assert_eq!(config.speed_factor, 1);
        assert_eq!(config.start_life, 1);
    }

    #[test]
    fn test_clamping_preserves_fixed_fields() {
        let raw = RawConfig::new(Some(2), Some(3), Some(5));
        let config = Config::default().clamped(&raw);
        assert_eq!(config.base_speed, 10.0);
        assert_eq!(config.invulnerability_ms, 1000);
    }

    #[test]
    fn test_seek_step() {
        let mut config = Config::default();
        assert_eq!(config.seek_step(), 1.0);
        config.speed_factor = 3;
        assert_eq!(config.seek_step(), 3.0);
    }

    proptest! {
        #[test]
        fn clamped_config_is_always_in_range(
            num_enemies in any::<i64>(),
            speed_factor in any::<i64>(),
            start_life in any::<i64>(),
        ) {
            let raw = RawConfig { num_enemies, speed_factor, start_life };
            let config = Config::default().clamped(&raw);
            prop_assert!(config.num_enemies <= 5);
            prop_assert!((1..=3).contains(&config.speed_factor));
            prop_assert!((1..=5).contains(&config.start_life));
        }
    }
}
