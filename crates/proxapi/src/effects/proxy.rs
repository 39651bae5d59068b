use std::time::Duration;

use crate::data::{CallOptions, CallOutcome, LimitInfo, ProxyEvent, ProxySettings, Strategy};
use crate::effects::adapter::Adapter;
use crate::effects::paginate::Paginate;
use crate::effects::state::RetryState;
use crate::error::{Error, PaginationError, Result};

/// Quota-aware proxy around a single [`Adapter`].
///
/// Every call goes through the adapter; quota signals are resolved according
/// to the [`Strategy`] in effect and never reach the caller as a value. The
/// proxy is meant to be shared (`&Proxy` or `Arc<Proxy>`) by all callers
/// using the same credential, since they share one retry delay.
pub struct Proxy<A: Adapter> {
    adapter: A,
    settings: ProxySettings,
    state: RetryState,
}

impl<A: Adapter> Proxy<A> {
    pub fn new(adapter: A, settings: ProxySettings) -> Self {
        let state = RetryState::new(settings.retry_delay);
        Self {
            adapter,
            settings,
            state,
        }
    }

    /// Proxy with [`ProxySettings::default`].
    pub fn with_defaults(adapter: A) -> Self {
        Self::new(adapter, ProxySettings::default())
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn settings(&self) -> &ProxySettings {
        &self.settings
    }

    /// Current retry delay: the latest server guidance, or the configured
    /// default if the server never suggested one.
    pub fn limit_info(&self) -> LimitInfo {
        LimitInfo {
            retry_delay: self.state.current(),
        }
    }

    /// Call the adapter with the instance settings.
    pub async fn call(&self, params: &A::Params) -> Result<A::Output, A::Error> {
        self.call_with(params, &CallOptions::default()).await
    }

    /// Call the adapter, applying `options` over the instance settings.
    ///
    /// - A hard error is returned immediately as [`Error::Adapter`].
    /// - A suggested delay on any non-error outcome updates the shared retry
    ///   delay, whatever the strategy.
    /// - On a quota signal with [`Strategy::Retry`], emits
    ///   [`ProxyEvent::Retrying`], waits, and calls again with the same
    ///   parameters until a non-quota outcome arrives or the retry budget is
    ///   spent.
    /// - On a quota signal with [`Strategy::Abort`], fails with
    ///   [`Error::RateLimitExceeded`].
    ///
    /// No timeout is applied to the adapter. Dropping the returned future
    /// abandons any pending retry.
    pub async fn call_with(
        &self,
        params: &A::Params,
        options: &CallOptions,
    ) -> Result<A::Output, A::Error> {
        let strategy = options.resolve_strategy(&self.settings);
        let budget = options.resolve_budget(&self.settings);
        let mut attempt = 0u32;
        let mut waited = Duration::ZERO;

        loop {
            let retry_delay = match self.adapter.translate(params).await {
                CallOutcome::HardError(error) => return Err(Error::Adapter(error)),
                CallOutcome::Success {
                    payload,
                    retry_delay,
                } => {
                    self.adopt(retry_delay);
                    return Ok(payload);
                }
                CallOutcome::QuotaExceeded { retry_delay } => retry_delay,
            };
            self.adopt(retry_delay);

            if strategy == Strategy::Abort {
                tracing::debug!(attempt, "rate limit reached, aborting");
                return Err(Error::RateLimitExceeded);
            }

            let delay = self.state.resolve(options.retry_delay);
            let next_attempt = attempt.saturating_add(1);
            let next_waited = waited.saturating_add(delay);
            if !budget.permits(next_attempt, next_waited) {
                tracing::warn!(
                    attempts = attempt,
                    waited_secs = waited.as_secs_f64(),
                    "retry budget exhausted"
                );
                return Err(Error::RetryBudgetExhausted {
                    attempts: attempt,
                    waited,
                });
            }
            attempt = next_attempt;

            let event = ProxyEvent::Retrying { attempt, delay };
            tracing::warn!(attempt, delay_secs = delay.as_secs_f64(), "{}", event.message());
            options.emit(&event);

            tokio::time::sleep(delay).await;
            waited = next_waited;
        }
    }

    /// Drive repeated calls until `pager` reports the last page.
    ///
    /// Each successful page is folded into the result with
    /// [`Paginate::aggregate`]; if it is not the last one, the next call uses
    /// [`Paginate::next_params`]. Retries happen inside each call and are
    /// visible only through `options.on_event`.
    ///
    /// A failed call ends the session immediately. The returned
    /// [`PaginationError`] carries the items collected up to that point.
    pub async fn call_until<G>(
        &self,
        params: A::Params,
        options: &CallOptions,
        pager: &G,
    ) -> std::result::Result<Vec<G::Item>, PaginationError<G::Item, A::Error>>
    where
        G: Paginate<A::Params, A::Output>,
    {
        let mut params = params;
        let mut collected = Vec::new();
        let mut pages = 0usize;

        loop {
            let page = match self.call_with(&params, options).await {
                Ok(page) => page,
                Err(source) => {
                    tracing::debug!(pages, error = %source, "pagination stopped");
                    return Err(PaginationError {
                        source,
                        collected,
                        pages,
                    });
                }
            };
            pages += 1;

            let next = if pager.is_complete(&page) {
                None
            } else {
                Some(pager.next_params(&page, &params))
            };
            collected = pager.aggregate(collected, page);
            tracing::trace!(pages, collected = collected.len(), "page aggregated");

            match next {
                Some(next) => params = next,
                None => return Ok(collected),
            }
        }
    }

    fn adopt(&self, retry_delay: Option<Duration>) {
        if let Some(delay) = retry_delay {
            tracing::debug!(delay_secs = delay.as_secs_f64(), "retry delay updated");
            self.state.observe(delay);
        }
    }
}
