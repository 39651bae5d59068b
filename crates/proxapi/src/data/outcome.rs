use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::delay_from_secs;

/// Quota information an adapter reports alongside every response.
///
/// This is the `status` half of the adapter contract: `quota` must always be
/// set, `retry_delay` only when the remote API says how long to wait.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuotaStatus {
    /// The call failed because of rate or usage limiting.
    pub quota: bool,

    /// Server-suggested wait before the next attempt, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_delay: Option<f64>,
}

impl QuotaStatus {
    /// A response that was not rate limited.
    pub fn ok() -> Self {
        Self::default()
    }

    /// A response rejected by the rate limiter.
    pub fn exceeded() -> Self {
        Self {
            quota: true,
            retry_delay: None,
        }
    }

    #[must_use]
    pub fn retry_delay(mut self, secs: f64) -> Self {
        self.retry_delay = Some(secs);
        self
    }
}

/// Normalized result of one adapter invocation.
///
/// Produced by the adapter on every call and consumed immediately by the
/// proxy. Quota exhaustion never reaches the caller as a value: the proxy
/// turns it into a retry or into [`Error::RateLimitExceeded`](crate::Error::RateLimitExceeded).
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome<T, E> {
    /// The remote call succeeded. A suggested delay may still be attached and
    /// is adopted by the proxy before the payload is returned.
    Success {
        payload: T,
        retry_delay: Option<Duration>,
    },

    /// A failure unrelated to quota. Passed through to the caller unchanged.
    HardError(E),

    /// The remote API rejected the call because the quota is exhausted.
    QuotaExceeded { retry_delay: Option<Duration> },
}

impl<T, E> CallOutcome<T, E> {
    pub fn success(payload: T) -> Self {
        CallOutcome::Success {
            payload,
            retry_delay: None,
        }
    }

    pub fn hard_error(error: E) -> Self {
        CallOutcome::HardError(error)
    }

    pub fn quota_exceeded() -> Self {
        CallOutcome::QuotaExceeded { retry_delay: None }
    }

    /// Attach a server-suggested delay. Has no effect on [`CallOutcome::HardError`].
    #[must_use]
    pub fn with_retry_delay(self, delay: Duration) -> Self {
        let delay = Some(delay).filter(|d| !d.is_zero());
        match self {
            CallOutcome::Success { payload, .. } => CallOutcome::Success {
                payload,
                retry_delay: delay,
            },
            CallOutcome::QuotaExceeded { .. } => CallOutcome::QuotaExceeded { retry_delay: delay },
            hard @ CallOutcome::HardError(_) => hard,
        }
    }

    /// Build an outcome from the `(error, data, status)` triple of the
    /// callback-style adapter contract.
    ///
    /// An error takes precedence over the quota flag. Suggested delays that
    /// are not strictly positive are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use proxapi::{CallOutcome, QuotaStatus};
    ///
    /// let outcome: CallOutcome<&str, String> =
    ///     CallOutcome::from_parts(Ok("page"), QuotaStatus::exceeded().retry_delay(900.0));
    /// assert_eq!(
    ///     outcome,
    ///     CallOutcome::QuotaExceeded { retry_delay: Some(Duration::from_secs(900)) }
    /// );
    /// ```
    pub fn from_parts(result: Result<T, E>, status: QuotaStatus) -> Self {
        let retry_delay = status.retry_delay.and_then(delay_from_secs);
        match result {
            Err(error) => CallOutcome::HardError(error),
            Ok(_) if status.quota => CallOutcome::QuotaExceeded { retry_delay },
            Ok(payload) => CallOutcome::Success {
                payload,
                retry_delay,
            },
        }
    }

    /// The delay suggested by the server, if any.
    pub fn suggested_delay(&self) -> Option<Duration> {
        match self {
            CallOutcome::Success { retry_delay, .. } | CallOutcome::QuotaExceeded { retry_delay } => {
                *retry_delay
            }
            CallOutcome::HardError(_) => None,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, CallOutcome::QuotaExceeded { .. })
    }
}
