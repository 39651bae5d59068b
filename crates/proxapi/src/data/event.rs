use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::core::ceil_seconds;

/// Callback receiving proxy events. Purely informational: nothing the
/// callback does changes how the call proceeds.
pub type EventCallback = Arc<dyn Fn(&ProxyEvent) + Send + Sync>;

/// Something worth telling the caller about while a call is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProxyEvent {
    /// A quota signal was received and the call will be retried after `delay`.
    Retrying {
        /// Retry number for this logical call, starting at 1.
        attempt: u32,
        delay: Duration,
    },
}

impl ProxyEvent {
    /// Stable event name.
    pub fn name(&self) -> &'static str {
        match self {
            ProxyEvent::Retrying { .. } => "retrying",
        }
    }

    /// Human readable message.
    pub fn message(&self) -> String {
        match self {
            ProxyEvent::Retrying { delay, .. } => format!(
                "Rate limit reached. Retrying in {} seconds",
                ceil_seconds(*delay)
            ),
        }
    }
}

impl fmt::Display for ProxyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
