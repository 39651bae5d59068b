use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::data::DEFAULT_RETRY_DELAY;

/// Retry delay shared by every call going through one proxy.
///
/// The remote API's quota belongs to the credential, not to a single call,
/// so a delay learned from one response applies to all later retries of the
/// same proxy. Concurrent updates resolve as last write wins.
#[derive(Debug)]
pub struct RetryState {
    default: Duration,
    /// Most recent server-suggested delay in nanoseconds, 0 when none seen.
    suggested_nanos: AtomicU64,
}

impl RetryState {
    /// A zero `default` falls back to [`DEFAULT_RETRY_DELAY`].
    pub fn new(default: Duration) -> Self {
        let default = if default.is_zero() {
            DEFAULT_RETRY_DELAY
        } else {
            default
        };
        Self {
            default,
            suggested_nanos: AtomicU64::new(0),
        }
    }

    /// Record a server-suggested delay. Zero is ignored.
    pub fn observe(&self, delay: Duration) {
        let nanos = u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX);
        if nanos > 0 {
            self.suggested_nanos.store(nanos, Ordering::Release);
        }
    }

    pub fn suggested(&self) -> Option<Duration> {
        match self.suggested_nanos.load(Ordering::Acquire) {
            0 => None,
            nanos => Some(Duration::from_nanos(nanos)),
        }
    }

    /// Current delay: the latest server guidance, else the configured default.
    pub fn current(&self) -> Duration {
        self.suggested().unwrap_or(self.default)
    }

    /// Delay to wait before a retry, given a per-call fallback that replaces
    /// the configured default.
    pub fn resolve(&self, fallback: Option<Duration>) -> Duration {
        self.suggested()
            .or(fallback.filter(|d| !d.is_zero()))
            .unwrap_or(self.default)
    }
}

impl Default for RetryState {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_starts_at_default() {
        let state = RetryState::new(Duration::from_secs(2));
        assert_eq!(state.current(), Duration::from_secs(2));
        assert_eq!(state.suggested(), None);
    }

    #[test]
    fn test_zero_default_falls_back() {
        let state = RetryState::new(Duration::ZERO);
        assert_eq!(state.current(), DEFAULT_RETRY_DELAY);
    }

    #[test]
    fn test_observe_last_write_wins() {
        let state = RetryState::default();
        state.observe(Duration::from_secs(3600));
        state.observe(Duration::from_millis(1500));
        assert_eq!(state.current(), Duration::from_millis(1500));

        state.observe(Duration::ZERO);
        assert_eq!(state.current(), Duration::from_millis(1500));
    }

    #[test]
    fn test_resolve_precedence() {
        let state = RetryState::new(Duration::from_secs(60));
        assert_eq!(state.resolve(None), Duration::from_secs(60));
        assert_eq!(
            state.resolve(Some(Duration::from_secs(2))),
            Duration::from_secs(2)
        );
        assert_eq!(state.resolve(Some(Duration::ZERO)), Duration::from_secs(60));

        state.observe(Duration::from_secs(5));
        assert_eq!(
            state.resolve(Some(Duration::from_secs(2))),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_observe_saturates_huge_delays() {
        let state = RetryState::default();
        state.observe(Duration::MAX);
        assert_eq!(state.current(), Duration::from_nanos(u64::MAX));
    }

    #[test]
    fn test_concurrent_observers() {
        let state = Arc::new(RetryState::default());
        let handles: Vec<_> = (1..=8u64)
            .map(|secs| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || state.observe(Duration::from_secs(secs)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let current = state.current();
        assert!(current >= Duration::from_secs(1) && current <= Duration::from_secs(8));
    }
}
