use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::event::{EventCallback, ProxyEvent};
use super::strategy::Strategy;
use crate::core::{RetryBudget, delay_from_secs};
use crate::error::ConfigError;

/// Retry delay used until the remote API suggests one.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Instance-wide settings of a [`Proxy`](crate::Proxy).
///
/// Every field has a default, so a settings file only needs the keys it
/// changes. Durations are written in seconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use proxapi::{ProxySettings, Strategy};
///
/// let settings = ProxySettings::from_toml_str(r#"
///     strategy = "retry"
///     retry_delay = 2
/// "#).unwrap();
///
/// assert_eq!(settings.strategy, Strategy::Retry);
/// assert_eq!(settings.retry_delay, Duration::from_secs(2));
/// assert_eq!(settings.max_attempts, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProxySettings {
    /// What to do on a quota signal.
    ///
    /// Default: [`Strategy::Abort`]
    pub strategy: Strategy,

    /// Wait before retrying when the server gave no guidance. Always > 0.
    ///
    /// Default: 60 seconds
    #[serde(with = "super::secs")]
    pub retry_delay: Duration,

    /// Maximum number of retries per call.
    ///
    /// Default: None (retry until the quota recovers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    /// Maximum cumulative wait per call.
    ///
    /// Default: None
    #[serde(with = "super::secs::option", skip_serializing_if = "Option::is_none")]
    pub max_wait: Option<Duration>,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            retry_delay: DEFAULT_RETRY_DELAY,
            max_attempts: None,
            max_wait: None,
        }
    }
}

impl ProxySettings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the default retry delay. A zero duration is ignored.
    #[must_use]
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        if !retry_delay.is_zero() {
            self.retry_delay = retry_delay;
        }
        self
    }

    /// Set the default retry delay in seconds. Non-positive values are ignored.
    #[must_use]
    pub fn retry_delay_secs(self, secs: f64) -> Self {
        match delay_from_secs(secs) {
            Some(delay) => self.retry_delay(delay),
            None => self,
        }
    }

    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    #[must_use]
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }
}

/// Per-call overrides. Anything left unset falls back to the proxy's
/// [`ProxySettings`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use proxapi::{CallOptions, Strategy};
///
/// let options = CallOptions::default()
///     .strategy(Strategy::Retry)
///     .on_event(Arc::new(|event| println!("{}: {}", event.name(), event.message())));
/// ```
#[derive(Clone, Default)]
pub struct CallOptions {
    pub strategy: Option<Strategy>,

    /// Wait used in place of the instance default. A delay suggested by the
    /// server still takes precedence.
    pub retry_delay: Option<Duration>,

    pub max_attempts: Option<u32>,

    pub max_wait: Option<Duration>,

    /// Invoked once per retry attempt.
    pub on_event: Option<EventCallback>,
}

impl fmt::Debug for CallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("strategy", &self.strategy)
            .field("retry_delay", &self.retry_delay)
            .field("max_attempts", &self.max_attempts)
            .field("max_wait", &self.max_wait)
            .field("on_event", &self.on_event.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}

impl CallOptions {
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// A zero duration is ignored.
    #[must_use]
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = Some(retry_delay).filter(|d| !d.is_zero());
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    #[must_use]
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    #[must_use]
    pub fn on_event(mut self, on_event: EventCallback) -> Self {
        self.on_event = Some(on_event);
        self
    }

    pub(crate) fn resolve_strategy(&self, settings: &ProxySettings) -> Strategy {
        self.strategy.unwrap_or(settings.strategy)
    }

    pub(crate) fn resolve_budget(&self, settings: &ProxySettings) -> RetryBudget {
        RetryBudget::new(
            self.max_attempts.or(settings.max_attempts),
            self.max_wait.or(settings.max_wait),
        )
    }

    pub(crate) fn emit(&self, event: &ProxyEvent) {
        if let Some(ref callback) = self.on_event {
            callback(event);
        }
    }
}
