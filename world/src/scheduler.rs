//! Named, cancellable timers driven by the host clock.

use std::time::Duration;

/// Timers owned by the world, listed in the order they fire when due together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum TimerId {
    PlayerStep,
    ModeClock,
    FrightenedClock,
    GhostStep,
    Resume,
}

impl TimerId {
    const ALL: [TimerId; 5] = [
        TimerId::PlayerStep,
        TimerId::ModeClock,
        TimerId::FrightenedClock,
        TimerId::GhostStep,
        TimerId::Resume,
    ];

    const fn index(self) -> usize {
        match self {
            Self::PlayerStep => 0,
            Self::ModeClock => 1,
            Self::FrightenedClock => 2,
            Self::GhostStep => 3,
            Self::Resume => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Timer {
    period: Duration,
    elapsed: Duration,
    armed: bool,
    repeating: bool,
}

impl Timer {
    fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }
}

/// Single-threaded scheduler; every timer advances by the same host time.
#[derive(Clone, Debug, Default)]
pub(crate) struct Scheduler {
    timers: [Timer; 5],
}

impl Scheduler {
    /// Arms a timer with zero elapsed time, replacing any previous schedule.
    pub(crate) fn arm(&mut self, id: TimerId, period: Duration, repeating: bool) {
        self.timers[id.index()] = Timer {
            period,
            elapsed: Duration::ZERO,
            armed: true,
            repeating,
        };
    }

    pub(crate) fn cancel(&mut self, id: TimerId) {
        self.timers[id.index()].armed = false;
    }

    /// Disarms every timer in one call.
    pub(crate) fn cancel_all(&mut self) {
        for timer in &mut self.timers {
            timer.armed = false;
        }
    }

    pub(crate) fn is_armed(&self, id: TimerId) -> bool {
        self.timers[id.index()].armed
    }

    /// Earliest armed timer and the time left until it fires.
    ///
    /// Ties resolve to the first timer in firing priority order.
    pub(crate) fn next_due(&self) -> Option<(TimerId, Duration)> {
        TimerId::ALL
            .into_iter()
            .filter(|id| self.is_armed(*id))
            .map(|id| (id, self.timers[id.index()].remaining()))
            .fold(None, |best, candidate| match best {
                Some((_, wait)) if wait <= candidate.1 => best,
                _ => Some(candidate),
            })
    }

    /// Accumulates elapsed time on every armed timer.
    pub(crate) fn advance(&mut self, dt: Duration) {
        for timer in self.timers.iter_mut().filter(|timer| timer.armed) {
            timer.elapsed = timer.elapsed.saturating_add(dt);
        }
    }

    /// Consumes one firing of a due timer, restarting or disarming it.
    pub(crate) fn complete(&mut self, id: TimerId) {
        let timer = &mut self.timers[id.index()];
        if timer.repeating {
            timer.elapsed = timer.elapsed.saturating_sub(timer.period);
        } else {
            timer.armed = false;
        }
    }
}
