//! Repeating deadline driven by the event loop.

use std::time::{Duration, Instant};

/// A repeating timer with no thread of its own.
///
/// The event loop asks [`Ticker::timeout`] how long it may block, then calls
/// [`Ticker::poll`] to learn whether a period has elapsed.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Start firing every period from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    /// Stop firing. Returns whether the ticker was armed.
    pub fn cancel(&mut self) -> bool {
        self.next.take().is_some()
    }

    /// Whether a deadline has passed. Missed periods collapse into one fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(next) = self.next else {
            return false;
        };
        if now < next {
            return false;
        }
        let mut following = next + self.period;
        while following <= now {
            following += self.period;
        }
        self.next = Some(following);
        true
    }

    /// How long the caller may wait before the next deadline, at most `idle`.
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next {
            Some(next) => next.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(10);

    #[test]
    fn test_unarmed_never_fires() {
        let mut ticker = Ticker::new(PERIOD);
        let now = Instant::now();
        assert!(!ticker.poll(now + Duration::from_secs(5)));
        assert_eq!(ticker.timeout(now, Duration::from_millis(250)), Duration::from_millis(250));
    }

    #[test]
    fn test_fires_each_period() {
        let mut ticker = Ticker::new(PERIOD);
        let start = Instant::now();
        ticker.arm(start);
        assert!(!ticker.poll(start + Duration::from_millis(9)));
        assert!(ticker.poll(start + Duration::from_millis(10)));
        assert!(!ticker.poll(start + Duration::from_millis(15)));
        assert!(ticker.poll(start + Duration::from_millis(20)));
    }

    #[test]
    fn test_missed_periods_collapse() {
        let mut ticker = Ticker::new(PERIOD);
        let start = Instant::now();
        ticker.arm(start);
        assert!(ticker.poll(start + Duration::from_millis(95)));
        assert!(!ticker.poll(start + Duration::from_millis(99)));
        assert!(ticker.poll(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_cancel_once() {
        let mut ticker = Ticker::new(PERIOD);
        ticker.arm(Instant::now());
        assert!(ticker.cancel());
        assert!(!ticker.cancel());
        assert!(!ticker.is_armed());
    }

    #[test]
    fn test_timeout_until_deadline() {
        let mut ticker = Ticker::new(PERIOD);
        let start = Instant::now();
        ticker.arm(start);
        let wait = ticker.timeout(start + Duration::from_millis(4), Duration::from_millis(250));
        assert_eq!(wait, Duration::from_millis(6));
        let overdue = ticker.timeout(start + Duration::from_millis(40), Duration::from_millis(250));
        assert_eq!(overdue, Duration::ZERO);
    }

    #[test]
    fn test_zero_period_clamped() {
        let ticker = Ticker::new(Duration::ZERO);
        assert_eq!(ticker.period(), Duration::from_millis(1));
    }
}
