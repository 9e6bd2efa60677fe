use std::time::{Duration, Instant};

/// A value-carrying debouncer: holds one pending value and commits it after
/// a period of inactivity. Submitting again before the delay elapses
/// supersedes the pending value and restarts the clock.
///
/// Poll-based, no timers or threads: the owner calls [`Debouncer::poll`]
/// from its event loop and acts when a value commits.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    /// Queue a value, superseding any value still pending.
    pub fn submit(&mut self, value: T) {
        self.pending = Some((value, Instant::now()));
    }

    /// Commit the pending value if its delay has elapsed.
    pub fn poll(&mut self) -> Option<T> {
        match &self.pending {
            Some((_, since)) if since.elapsed() >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Commit the pending value immediately, ignoring the delay.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time until the pending value commits; `None` when nothing is pending.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, since)| self.delay.saturating_sub(since.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_commits_on_next_poll() {
        let mut debouncer = Debouncer::from_millis(0);
        debouncer.submit("bolt");
        assert_eq!(debouncer.poll(), Some("bolt"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(), None);
    }

    #[test]
    fn later_submit_supersedes_pending_value() {
        let mut debouncer = Debouncer::from_millis(0);
        debouncer.submit("bol");
        debouncer.submit("bolt");
        assert_eq!(debouncer.poll(), Some("bolt"));
        assert_eq!(debouncer.poll(), None);
    }

    #[test]
    fn poll_before_delay_returns_nothing() {
        let mut debouncer = Debouncer::from_millis(60_000);
        debouncer.submit("bolt");
        assert_eq!(debouncer.poll(), None);
        assert!(debouncer.is_pending());
        assert!(debouncer.time_remaining().unwrap() > Duration::from_secs(1));
    }

    #[test]
    fn flush_ignores_the_delay() {
        let mut debouncer = Debouncer::from_millis(60_000);
        debouncer.submit("bolt");
        assert_eq!(debouncer.flush(), Some("bolt"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_discards_the_pending_value() {
        let mut debouncer = Debouncer::from_millis(0);
        debouncer.submit("bolt");
        debouncer.cancel();
        assert_eq!(debouncer.poll(), None);
        assert_eq!(debouncer.time_remaining(), None);
    }
}
