//! Tunable timings and starting values for a simulation.

use std::time::Duration;

use maze_chase_system_mode_timer::{millis, ModeConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timer periods, pause lengths and mode durations used by the world.
///
/// Every duration is (de)serialised as whole milliseconds and missing fields
/// fall back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Interval between player steps.
    #[serde(with = "millis")]
    pub player_step: Duration,
    /// Interval between ghost steps.
    #[serde(with = "millis")]
    pub ghost_step: Duration,
    /// Interval at which the scatter/chase clock advances.
    #[serde(with = "millis")]
    pub mode_clock: Duration,
    /// Interval at which the frightened countdown advances.
    #[serde(with = "millis")]
    pub frightened_clock: Duration,
    /// Pause after losing a life.
    #[serde(with = "millis")]
    pub death_pause: Duration,
    /// Pause after clearing a level.
    #[serde(with = "millis")]
    pub level_pause: Duration,
    /// Lives at the start of a game.
    pub starting_lives: u32,
    /// Scatter, chase and frightened durations.
    pub modes: ModeConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            player_step: Duration::from_millis(180),
            ghost_step: Duration::from_millis(200),
            mode_clock: Duration::from_millis(500),
            frightened_clock: Duration::from_millis(100),
            death_pause: Duration::from_millis(1_500),
            level_pause: Duration::from_millis(2_000),
            starting_lives: 3,
            modes: ModeConfig::default(),
        }
    }
}

/// Reasons a configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A timer or pause would never advance the simulation.
    #[error("`{name}` must be longer than zero milliseconds")]
    ZeroDuration {
        /// Name of the offending field.
        name: &'static str,
    },
    /// The game would be over before it started.
    #[error("`starting_lives` must be at least one")]
    NoLives,
}

impl SimulationConfig {
    /// Checks that every duration is positive and at least one life is granted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("player_step", self.player_step),
            ("ghost_step", self.ghost_step),
            ("mode_clock", self.mode_clock),
            ("frightened_clock", self.frightened_clock),
            ("death_pause", self.death_pause),
            ("level_pause", self.level_pause),
            ("modes.scatter", self.modes.scatter),
            ("modes.chase", self.modes.chase),
            ("modes.frightened", self.modes.frightened),
        ];
        if let Some(&(name, _)) = durations.iter().find(|(_, value)| value.is_zero()) {
            return Err(ConfigError::ZeroDuration { name });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }
}
