use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed waiting window advanced by frame deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwellTimer {
    #[serde(with = "crate::serde_secs")]
    elapsed: Duration,
    #[serde(with = "crate::serde_secs")]
    limit: Duration,
}

impl DwellTimer {
    pub fn new(limit: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            limit,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed)
    }

    pub fn is_up(&self) -> bool {
        self.elapsed >= self.limit
    }

    /// Advances the timer and reports whether the window is over.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_up() {
            self.elapsed = self.elapsed.saturating_add(dt).min(self.limit);
        }
        self.is_up()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_reports_up_at_or_past_limit() {
        let mut t = DwellTimer::new(Duration::from_secs(1));
        assert!(!t.is_up());
        assert_eq!(t.remaining(), Duration::from_secs(1));

        assert!(!t.tick(Duration::from_millis(600)));
        assert!(t.tick(Duration::from_millis(600)));
        assert_eq!(t.remaining(), Duration::ZERO);

        // Once up, it stays up and doesn't keep accumulating.
        assert!(t.tick(Duration::from_secs(5)));
        assert_eq!(t.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn zero_length_window_is_up_immediately() {
        let t = DwellTimer::new(Duration::ZERO);
        assert!(t.is_up());
    }

    #[test]
    fn reset_clears_elapsed() {
        let mut t = DwellTimer::new(Duration::from_secs(1));
        t.tick(Duration::from_millis(500));
        t.reset();
        assert_eq!(t.elapsed(), Duration::ZERO);
        assert!(!t.is_up());
    }
}
