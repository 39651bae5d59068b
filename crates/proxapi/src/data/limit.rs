use std::time::Duration;

use serde::Serialize;

/// Snapshot of what the proxy currently knows about the remote API's limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitInfo {
    /// Wait applied before the next retry.
    #[serde(rename = "delay_seconds", with = "super::secs")]
    pub retry_delay: Duration,
}

impl LimitInfo {
    pub fn delay_seconds(&self) -> f64 {
        self.retry_delay.as_secs_f64()
    }
}
