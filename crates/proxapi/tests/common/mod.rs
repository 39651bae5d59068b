//! A public API mock with a fixed quota per time window.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use proxapi::{Adapter, CallOutcome, QuotaStatus};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub name: String,
    pub page: i64,
}

impl PageRequest {
    pub fn new(name: &str, page: i64) -> Self {
        Self {
            name: name.to_string(),
            page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    /// Index of the next page, -1 on the last one.
    pub nextpage: i64,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockError {
    #[error("Limit reached")]
    LimitReached { resets_in: Duration },

    #[error("{0} not found")]
    NotFound(String),
}

struct Window {
    started: Instant,
    calls: usize,
}

pub struct MockApi {
    limit: usize,
    window: Duration,
    state: Mutex<Window>,
    infos: HashMap<&'static str, Vec<&'static str>>,
    served: AtomicUsize,
    rejected: AtomicUsize,
}

impl MockApi {
    /// `limit` calls are answered per `window`; the rest are rejected.
    pub fn new(limit: usize, window: Duration) -> Self {
        let infos = HashMap::from([
            ("john", vec!["a", "b", "c", "d"]),
            ("toto", vec!["x", "y", "z"]),
        ]);
        Self {
            limit,
            window,
            state: Mutex::new(Window {
                started: Instant::now(),
                calls: 0,
            }),
            infos,
            served: AtomicUsize::new(0),
            rejected: AtomicUsize::new(0),
        }
    }

    pub fn get(&self, name: &str, page: i64) -> Result<PageData, MockError> {
        {
            let mut window = self.state.lock().unwrap();
            let now = Instant::now();
            if now.duration_since(window.started) >= self.window {
                window.started = now;
                window.calls = 0;
            }
            window.calls += 1;
            if window.calls > self.limit {
                self.rejected.fetch_add(1, Ordering::SeqCst);
                let resets_in = self.window - now.duration_since(window.started);
                return Err(MockError::LimitReached { resets_in });
            }
        }
        self.served.fetch_add(1, Ordering::SeqCst);

        let infos = self
            .infos
            .get(name)
            .ok_or_else(|| MockError::NotFound(name.to_string()))?;
        let index = usize::try_from(page).map_err(|_| MockError::NotFound(name.to_string()))?;
        let info = infos
            .get(index)
            .ok_or_else(|| MockError::NotFound(format!("{name} page {page}")))?;
        let nextpage = if index + 1 >= infos.len() {
            -1
        } else {
            page + 1
        };

        Ok(PageData {
            nextpage,
            info: info.to_string(),
        })
    }

    pub fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }

    pub fn rejected(&self) -> usize {
        self.rejected.load(Ordering::SeqCst)
    }
}

/// Adapter translating [`MockApi`] responses into proxy outcomes.
pub struct MockAdapter {
    pub api: MockApi,
    /// Report the time left in the current window as the retry delay.
    pub suggest_reset: bool,
}

impl MockAdapter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            api: MockApi::new(limit, window),
            suggest_reset: false,
        }
    }

    pub fn suggest_reset(mut self) -> Self {
        self.suggest_reset = true;
        self
    }
}

impl Adapter for MockAdapter {
    type Params = PageRequest;
    type Output = PageData;
    type Error = MockError;

    async fn translate(&self, params: &PageRequest) -> CallOutcome<PageData, MockError> {
        tokio::task::yield_now().await;
        match self.api.get(&params.name, params.page) {
            Err(MockError::LimitReached { resets_in }) => {
                let mut status = QuotaStatus::exceeded();
                if self.suggest_reset {
                    status = status.retry_delay(resets_in.as_secs_f64());
                }
                CallOutcome::from_parts(Ok(PageData::default_page()), status)
            }
            result => CallOutcome::from_parts(result, QuotaStatus::ok()),
        }
    }
}

impl PageData {
    fn default_page() -> Self {
        Self {
            nextpage: -1,
            info: String::new(),
        }
    }
}
