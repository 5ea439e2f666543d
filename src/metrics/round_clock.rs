use std::time::{Duration, Instant};

/// Survival time of a round, not counting time spent paused
#[derive(Debug, Clone)]
pub struct RoundClock {
    start_time: Instant,
    paused_total: Duration,
    paused_since: Option<Instant>,
}

impl RoundClock {
    pub fn start(now: Instant) -> Self {
        Self {
            start_time: now,
            paused_total: Duration::ZERO,
            paused_since: None,
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_since.is_none() {
            self.paused_since = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += now.saturating_duration_since(since);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_since.is_some()
    }

    /// Time played up to `now`; frozen while paused
    pub fn elapsed(&self, now: Instant) -> Duration {
        let until = self.paused_since.unwrap_or(now);
        until
            .saturating_duration_since(self.start_time)
            .saturating_sub(self.paused_total)
    }
}

/// Format a duration as `MM:SS`
pub fn format_time(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
