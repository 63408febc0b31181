#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-layer ghost mode clock.
//!
//! The outer layer alternates the global mode between scatter and chase on
//! fixed durations. The inner layer is the frightened window opened by a
//! power pellet; while it is open every ghost carries the frightened
//! override. Expiry reverts ghosts to whatever the global mode is at that
//! instant, which callers read from [`ModeTimer::global_mode`] rather than
//! caching it when the window opened.

use std::time::Duration;

use maze_chase_core::GlobalMode;
use serde::{Deserialize, Serialize};

/// Durations driving both layers of the mode clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Length of each scatter phase.
    #[serde(with = "millis")]
    pub scatter: Duration,
    /// Length of each chase phase.
    #[serde(with = "millis")]
    pub chase: Duration,
    /// Length of the frightened window opened by a power pellet.
    #[serde(with = "millis")]
    pub frightened: Duration,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            scatter: Duration::from_millis(7_000),
            chase: Duration::from_millis(20_000),
            frightened: Duration::from_millis(6_000),
        }
    }
}

/// Observable state of the mode clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeState {
    /// Current global mode.
    pub global_mode: GlobalMode,
    /// Time spent in the current global phase.
    pub global_elapsed: Duration,
    /// Time left in the frightened window; zero when inactive.
    pub frightened_remaining: Duration,
    /// Ghosts eaten since the frightened window was last (re)opened.
    pub eaten_streak: u32,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            global_mode: GlobalMode::Scatter,
            global_elapsed: Duration::ZERO,
            frightened_remaining: Duration::ZERO,
            eaten_streak: 0,
        }
    }
}

/// Outcome of advancing the frightened countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Countdown {
    /// No frightened window is open.
    Inactive,
    /// The window is still open.
    Running,
    /// The window closed during this step.
    Expired,
}

/// Scatter/chase alternator with the frightened overlay.
#[derive(Clone, Debug)]
pub struct ModeTimer {
    config: ModeConfig,
    state: ModeState,
}

impl ModeTimer {
    /// Creates a clock starting in scatter with no frightened window.
    #[must_use]
    pub fn new(config: ModeConfig) -> Self {
        Self {
            config,
            state: ModeState::default(),
        }
    }

    /// Durations the clock was configured with.
    #[must_use]
    pub const fn config(&self) -> &ModeConfig {
        &self.config
    }

    /// Snapshot of the current clock state.
    #[must_use]
    pub const fn state(&self) -> ModeState {
        self.state
    }

    /// Live global mode.
    #[must_use]
    pub const fn global_mode(&self) -> GlobalMode {
        self.state.global_mode
    }

    /// Reports whether the frightened window is open.
    #[must_use]
    pub fn is_frightened(&self) -> bool {
        !self.state.frightened_remaining.is_zero()
    }

    /// Returns the clock to scatter with zero elapsed time and no window.
    pub fn reset(&mut self) {
        self.state = ModeState::default();
    }

    /// Advances the outer layer, returning the new mode when it flips.
    ///
    /// The phase clock restarts from zero on each flip.
    pub fn advance_global(&mut self, dt: Duration) -> Option<GlobalMode> {
        self.state.global_elapsed = self.state.global_elapsed.saturating_add(dt);
        let phase_length = match self.state.global_mode {
            GlobalMode::Scatter => self.config.scatter,
            GlobalMode::Chase => self.config.chase,
        };
        if self.state.global_elapsed < phase_length {
            return None;
        }

        self.state.global_mode = self.state.global_mode.toggled();
        self.state.global_elapsed = Duration::ZERO;
        Some(self.state.global_mode)
    }

    /// Opens (or refreshes) the frightened window and resets the eaten streak.
    ///
    /// A refresh replaces the remaining time; it never stacks.
    pub fn trigger_frightened(&mut self) {
        self.state.frightened_remaining = self.config.frightened;
        self.state.eaten_streak = 0;
    }

    /// Advances the inner layer by `dt`.
    pub fn count_down(&mut self, dt: Duration) -> Countdown {
        if self.state.frightened_remaining.is_zero() {
            return Countdown::Inactive;
        }

        self.state.frightened_remaining = self.state.frightened_remaining.saturating_sub(dt);
        if self.state.frightened_remaining.is_zero() {
            Countdown::Expired
        } else {
            Countdown::Running
        }
    }

    /// Closes the frightened window immediately and clears the streak.
    pub fn end_frightened(&mut self) {
        self.state.frightened_remaining = Duration::ZERO;
        self.state.eaten_streak = 0;
    }

    /// Records an eaten ghost and returns its one-based streak index.
    pub fn record_ghost_eaten(&mut self) -> u32 {
        self.state.eaten_streak = self.state.eaten_streak.saturating_add(1);
        self.state.eaten_streak
    }
}

impl Default for ModeTimer {
    fn default() -> Self {
        Self::new(ModeConfig::default())
    }
}

/// Serialises durations as whole milliseconds.
pub mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes the duration as an integer number of milliseconds.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    /// Reads an integer number of milliseconds.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
