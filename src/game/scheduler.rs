use std::time::{Duration, Instant};

use super::config::Difficulty;

/// Turns continuously advancing wall-clock time into discrete simulation steps.
///
/// The caller polls as often as it likes (typically once per rendered frame);
/// a step fires when at least one tick interval has passed since the last
/// one. At most one step fires per poll, so a stalled loop makes the
/// simulation lag behind wall-clock time instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl TickScheduler {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_interval(difficulty.tick_interval())
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Pick a new rate and restart the count from `now`
    pub fn reset(&mut self, difficulty: Difficulty, now: Instant) {
        self.interval = difficulty.tick_interval();
        self.last_fired = Some(now);
    }

    /// Returns true when a simulation step is due, and marks it as taken
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_fired else {
            self.last_fired = Some(now);
            return false;
        };

        if now.saturating_duration_since(last) >= self.interval {
            self.last_fired = Some(now);
            true
        } else {
            false
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
