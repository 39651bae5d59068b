//! Error types for proxapi.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single proxied call.
///
/// `E` is the adapter's own error type.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// A failure reported by the adapter, passed through verbatim.
    #[error("{0}")]
    Adapter(#[source] E),

    /// The quota is exhausted and the strategy is [`Strategy::Abort`](crate::Strategy::Abort).
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The quota stayed exhausted past the configured retry ceiling.
    #[error("Rate limit still exceeded after {attempts} retries ({waited:?} waited)")]
    RetryBudgetExhausted { attempts: u32, waited: Duration },
}

impl<E> Error<E> {
    /// Whether this failure was synthesized by the proxy because of a quota
    /// signal, as opposed to coming from the adapter.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Error::RateLimitExceeded | Error::RetryBudgetExhausted { .. }
        )
    }

    pub fn adapter_error(&self) -> Option<&E> {
        match self {
            Error::Adapter(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_adapter_error(self) -> Option<E> {
        match self {
            Error::Adapter(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;

/// A paginated session that stopped on a failed call.
///
/// Carries the items aggregated before the failure so callers can decide
/// whether a partial result is still useful.
#[derive(Debug, Error)]
#[error("pagination stopped after {pages} pages: {source}")]
pub struct PaginationError<I, E> {
    #[source]
    pub source: Error<E>,
    pub collected: Vec<I>,
    pub pages: usize,
}

impl<I, E> PaginationError<I, E> {
    pub fn into_parts(self) -> (Error<E>, Vec<I>) {
        (self.source, self.collected)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown strategy '{0}' (expected 'retry' or 'abort')")]
    UnknownStrategy(String),
}
