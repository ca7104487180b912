//! Astro Dodge - a meteor-dodging survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, session state)
//! - `config`: Clamped session configuration
//! - `view`: Render sink boundary (snapshots consumed by a display layer)

pub mod config;
pub mod sim;
pub mod view;

pub use config::{Config, RawConfig};
pub use sim::{Session, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate, matched to the display refresh cadence
    pub const TICK_HZ: u32 = 60;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// Sprite side lengths (all entities are square)
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const OBSTACLE_LARGE_SIZE: f32 = 40.0;
    pub const OBSTACLE_SMALL_SIZE: f32 = 25.0;
    pub const PICKUP_SIZE: f32 = 30.0;

    /// Minimum desired distance between two obstacles before repulsion applies
    pub const SEPARATION_DISTANCE: f32 = 70.0;
    /// Fraction of the repulsion delta applied per tick
    pub const SEPARATION_STRENGTH: f32 = 0.1;
    /// Fraction of `speed_factor * base_speed` an obstacle covers per tick
    pub const SEEK_STEP_SCALE: f32 = 0.1;

    /// Probability that a spawned obstacle is the small class
    pub const SMALL_SPAWN_CHANCE: f64 = 0.7;

    /// Cadence of the periodic generators and the score counter
    pub const OBSTACLE_SPAWN_MS: u32 = 1000;
    pub const PICKUP_SPAWN_MS: u32 = 10_000;
    pub const SCORE_TICK_MS: u32 = 1000;

    /// Overlap factors for the two collision classes
    pub const OBSTACLE_HIT_FACTOR: f32 = 0.8;
    pub const PICKUP_GRAB_FACTOR: f32 = 0.9;
}

/// Convert a millisecond duration to whole simulation ticks (at least 1)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u32 {
    (ms * consts::TICK_HZ / 1000).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_ticks() {
        assert_eq!(ms_to_ticks(1000), 60);
        assert_eq!(ms_to_ticks(10_000), 600);
        // Sub-tick durations still take a full tick
        assert_eq!(ms_to_ticks(1), 1);
    }
}
