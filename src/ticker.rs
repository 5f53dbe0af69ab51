//! Fixed-rate tick scheduling.
//!
//! A [`Ticker`] never reads the clock itself: every method takes the current
//! time as an argument, so game logic driven by it can be exercised in tests
//! without waiting for real time to pass.
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    /// When the next tick is due, or `None` if the ticker has been cancelled
    next_tick: Option<Instant>,
}

impl Ticker {
    /// Create a new, unarmed ticker that fires once every `period`
    pub(crate) fn new(period: Duration) -> Ticker {
        Ticker {
            period,
            next_tick: None,
        }
    }

    /// Arm the ticker so that its first tick falls one period after `now`.
    /// Restarting an armed ticker discards the pending tick.
    pub(crate) fn start(&mut self, now: Instant) {
        self.next_tick = Some(now + self.period);
    }

    /// Disarm the ticker.  No further ticks fire until it is started again.
    pub(crate) fn cancel(&mut self) {
        self.next_tick = None;
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Return how long to wait from `now` until the next tick, or `None` if
    /// the ticker is not armed
    pub(crate) fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|when| when.saturating_duration_since(now))
    }

    /// If a tick is due at `now`, schedule the one after it and return
    /// `true`.
    ///
    /// The next tick is normally one period after the one that just fired;
    /// if the caller has fallen a whole period or more behind, it is instead
    /// placed one period after `now` so that missed ticks are dropped rather
    /// than delivered in a burst.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        let Some(when) = self.next_tick else {
            return false;
        };
        if now < when {
            return false;
        }
        let mut next = when + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.next_tick = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(150);

    #[test]
    fn unarmed() {
        let now = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        assert!(!ticker.is_armed());
        assert_eq!(ticker.timeout(now), None);
        assert!(!ticker.poll(now + PERIOD * 10));
    }

    #[test]
    fn fires_once_per_period() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(t0);
        assert!(ticker.is_armed());
        assert_eq!(ticker.timeout(t0), Some(PERIOD));
        assert_eq!(
            ticker.timeout(t0 + Duration::from_millis(100)),
            Some(Duration::from_millis(50))
        );
        assert!(!ticker.poll(t0 + Duration::from_millis(149)));
        assert!(ticker.poll(t0 + PERIOD));
        assert!(!ticker.poll(t0 + PERIOD));
        assert_eq!(ticker.timeout(t0 + PERIOD), Some(PERIOD));
        assert!(ticker.poll(t0 + Duration::from_millis(310)));
        assert_eq!(
            ticker.timeout(t0 + Duration::from_millis(310)),
            Some(Duration::from_millis(140))
        );
    }

    #[test]
    fn overdue_timeout_is_zero() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(t0);
        assert_eq!(ticker.timeout(t0 + PERIOD * 3), Some(Duration::ZERO));
    }

    #[test]
    fn drops_missed_ticks() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(t0);
        let late = t0 + Duration::from_millis(1000);
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.timeout(late), Some(PERIOD));
    }

    #[test]
    fn cancel() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(t0);
        ticker.cancel();
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(t0 + PERIOD));
        ticker.start(t0 + PERIOD);
        assert!(!ticker.poll(t0 + PERIOD));
        assert!(ticker.poll(t0 + PERIOD * 2));
    }
}
