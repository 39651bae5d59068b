use std::time::Duration;

/// Optional ceiling on how long a single logical call may keep retrying.
///
/// Both limits are unset by default, which keeps the retry strategy
/// unbounded: a quota that never recovers keeps the call pending forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryBudget {
    /// Maximum number of retries after the initial attempt.
    pub max_attempts: Option<u32>,

    /// Maximum cumulative time spent waiting between attempts.
    pub max_wait: Option<Duration>,
}

impl RetryBudget {
    pub fn new(max_attempts: Option<u32>, max_wait: Option<Duration>) -> Self {
        Self {
            max_attempts,
            max_wait,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none() && self.max_wait.is_none()
    }

    /// Whether retry number `attempt` (1-based) may go ahead when the total
    /// wait, including the one about to start, would be `waited`.
    pub fn permits(&self, attempt: u32, waited: Duration) -> bool {
        let attempts_ok = self.max_attempts.is_none_or(|max| attempt <= max);
        let wait_ok = self.max_wait.is_none_or(|max| waited <= max);
        attempts_ok && wait_ok
    }
}
