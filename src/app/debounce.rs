//! Rearming debounce timer for text search input.
//!
//! [`Debouncer`] holds the most recent value together with a deadline. Every
//! [`push`](Debouncer::push) replaces the value and moves the deadline to
//! `now + window`, so a burst of input collapses to one effective call carrying
//! the last value, fired once the input has been quiet for the whole window.
//!
//! The timer is driven by the caller: the runtime sleeps until
//! [`deadline`](Debouncer::deadline) and then polls with the current instant.
//! Keeping time outside the type makes the behavior deterministic in tests.

use std::time::{Duration, Instant};

/// Quiescence window applied to search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Last-write-wins debounce timer.
///
/// # Example
///
/// ```rust
/// use pixgrid::app::Debouncer;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut debounce = Debouncer::new(Duration::from_millis(400));
///
/// debounce.push("ca", start);
/// debounce.push("cat", start + Duration::from_millis(300));
///
/// assert_eq!(debounce.poll(start + Duration::from_millis(600)), None);
/// assert_eq!(debounce.poll(start + Duration::from_millis(700)), Some("cat"));
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Records `value` and rearms the deadline to `now + window`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.window, value));
    }

    /// Instant at which the pending value becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now >= deadline => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }

    /// Drops the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_once_after_quiet_window() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(SEARCH_DEBOUNCE);
        debounce.push("dog".to_string(), t0);

        assert_eq!(debounce.poll(t0 + ms(399)), None);
        assert_eq!(debounce.poll(t0 + ms(400)), Some("dog".to_string()));
        assert_eq!(debounce.poll(t0 + ms(800)), None);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn each_push_rearms_and_keeps_latest() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(SEARCH_DEBOUNCE);
        debounce.push("m", t0);
        debounce.push("mo", t0 + ms(200));
        debounce.push("moo", t0 + ms(350));

        assert_eq!(debounce.deadline(), Some(t0 + ms(750)));
        assert_eq!(debounce.poll(t0 + ms(700)), None);
        assert_eq!(debounce.poll(t0 + ms(750)), Some("moo"));
    }

    #[test]
    fn cancel_discards_pending_value() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(10));
        debounce.push(1, t0);
        assert_eq!(debounce.cancel(), Some(1));
        assert_eq!(debounce.poll(t0 + ms(20)), None);
        assert_eq!(debounce.deadline(), None);
    }
}
