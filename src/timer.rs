//! src/timer.rs
//!
//! Periodic ticker polled by the event loop.
//!
//! A late poll fires once and reschedules from the poll time, so missed
//! ticks are dropped rather than replayed.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    /// First firing is one interval after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    /// Cancel the pending firing and start over with a new interval.
    pub fn restart(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next = now + interval;
    }

    /// True when a firing is due; the next one is scheduled one interval from `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.interval;
        true
    }

    /// Time left before the next firing.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut t = Ticker::new(100 * MS, t0);
        assert!(!t.fire(t0));
        assert!(!t.fire(t0 + 99 * MS));
        assert!(t.fire(t0 + 100 * MS));
        assert!(!t.fire(t0 + 150 * MS));
        assert!(t.fire(t0 + 200 * MS));
    }

    #[test]
    fn missed_ticks_are_not_coalesced() {
        let t0 = Instant::now();
        let mut t = Ticker::new(100 * MS, t0);
        // poll far too late: one firing, then a full interval from the poll
        assert!(t.fire(t0 + 1_000 * MS));
        assert!(!t.fire(t0 + 1_050 * MS));
        assert_eq!(t.remaining(t0 + 1_050 * MS), 50 * MS);
    }

    #[test]
    fn restart_reschedules_from_now() {
        let t0 = Instant::now();
        let mut t = Ticker::new(500 * MS, t0);
        t.restart(50 * MS, t0 + 10 * MS);
        assert_eq!(t.interval(), 50 * MS);
        assert!(!t.fire(t0 + 59 * MS));
        assert!(t.fire(t0 + 60 * MS));
    }

    #[test]
    fn remaining_saturates() {
        let t0 = Instant::now();
        let t = Ticker::new(10 * MS, t0);
        assert_eq!(t.remaining(t0 + 20 * MS), Duration::ZERO);
    }
}
