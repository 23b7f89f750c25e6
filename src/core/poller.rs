//! Fixed-period status poll timer.
//!
//! The front-end loop asks [`StatusPoller::due`] on every pass; the poller
//! answers `true` at most once per period. No backoff and no jitter: a missed
//! tick just waits for the next one.

use std::time::{Duration, Instant};

pub const STATUS_POLL_PERIOD: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct StatusPoller {
    period: Duration,
    next_due: Instant,
}

impl StatusPoller {
    /// First fire is one period after `now`.
    pub fn new(now: Instant) -> Self {
        Self::with_period(now, STATUS_POLL_PERIOD)
    }

    pub fn with_period(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// True if a tick has elapsed since the last `true`. Late calls never
    /// produce a burst of catch-up ticks.
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }

    /// Time left until the next tick (zero if overdue).
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_period() {
        let start = Instant::now();
        let mut poller = StatusPoller::new(start);
        assert!(!poller.due(start));
        assert!(!poller.due(start + Duration::from_secs(9)));
        assert_eq!(poller.remaining(start), STATUS_POLL_PERIOD);
    }

    #[test]
    fn test_fires_once_per_period() {
        let start = Instant::now();
        let mut poller = StatusPoller::new(start);
        let t1 = start + Duration::from_secs(10);
        assert!(poller.due(t1));
        assert!(!poller.due(t1));
        assert!(!poller.due(start + Duration::from_secs(19)));
        assert!(poller.due(start + Duration::from_secs(20)));
    }

    #[test]
    fn test_long_stall_does_not_burst() {
        let start = Instant::now();
        let mut poller = StatusPoller::new(start);
        let late = start + Duration::from_secs(95);
        assert!(poller.due(late));
        assert!(!poller.due(late));
        assert_eq!(poller.remaining(late), STATUS_POLL_PERIOD);
    }
}
