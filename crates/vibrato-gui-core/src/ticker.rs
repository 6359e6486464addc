//! Fixed-rate ticks evaluated against a caller-supplied clock.
//!
//! egui has no timers. Each periodic job owns a [`Ticker`] and asks it on
//! every frame whether its period has elapsed; the host then schedules the
//! next frame with [`Ticker::time_until_due`].

use std::time::{Duration, Instant};

/// Fires at most once per interval.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    /// Slowest accepted rate; anything lower is raised to this.
    const MIN_HZ: f32 = 0.01;

    /// Ticker firing `hz` times per second. The first poll always fires.
    pub fn from_hz(hz: f32) -> Self {
        let hz = if hz.is_finite() { hz.max(Self::MIN_HZ) } else { Self::MIN_HZ };
        Self::from_interval(Duration::from_secs_f32(1.0 / hz))
    }

    /// Ticker with an explicit interval.
    pub fn from_interval(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    /// Tick period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if a tick is due at `now`, and schedules the next one.
    ///
    /// Missed ticks are dropped rather than replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(due) if now < due => false,
            Some(due) => {
                let next = due + self.interval;
                self.next = Some(if next <= now { now + self.interval } else { next });
                true
            }
            None => {
                self.next = Some(now + self.interval);
                true
            }
        }
    }

    /// Make the next poll fire immediately.
    pub fn reset(&mut self) {
        self.next = None;
    }

    /// Time left until the next tick, zero if already due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next.map_or(Duration::ZERO, |due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_fires() {
        let mut t = Ticker::from_hz(8.0);
        assert!(t.poll(Instant::now()));
    }

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut t = Ticker::from_hz(4.0);
        assert!(t.poll(start));
        assert!(!t.poll(start + Duration::from_millis(100)));
        assert!(!t.poll(start + Duration::from_millis(249)));
        assert!(t.poll(start + Duration::from_millis(250)));
        assert!(!t.poll(start + Duration::from_millis(260)));
    }

    #[test]
    fn missed_ticks_are_not_replayed() {
        let start = Instant::now();
        let mut t = Ticker::from_hz(10.0);
        assert!(t.poll(start));
        let late = start + Duration::from_secs(5);
        assert!(t.poll(late));
        assert!(!t.poll(late + Duration::from_millis(10)));
    }

    #[test]
    fn reset_fires_next_poll() {
        let start = Instant::now();
        let mut t = Ticker::from_hz(1.0);
        assert!(t.poll(start));
        t.reset();
        assert!(t.poll(start));
    }

    #[test]
    fn nonsense_rates_are_bounded() {
        assert_eq!(Ticker::from_hz(0.0).interval(), Duration::from_secs(100));
        assert_eq!(Ticker::from_hz(f32::NAN).interval(), Duration::from_secs(100));
    }

    #[test]
    fn time_until_due() {
        let start = Instant::now();
        let mut t = Ticker::from_hz(10.0);
        assert_eq!(t.time_until_due(start), Duration::ZERO);
        t.poll(start);
        assert_eq!(t.time_until_due(start + Duration::from_millis(40)), Duration::from_millis(60));
    }
}
