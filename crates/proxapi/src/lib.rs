//! Quota-aware call proxy for rate-limited remote APIs.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Configuration and value types
//! - [`core`] - Pure transformations
//! - [`effects`] - The adapter seam and the proxy driving it
//!
//! The proxy knows nothing about any particular API. An [`Adapter`] performs
//! the remote call and classifies the response as a payload, a hard error,
//! or a quota signal. The [`Proxy`] turns quota signals into a wait-and-retry
//! loop or an explicit [`Error::RateLimitExceeded`], and [`Proxy::call_until`]
//! drives paginated sessions on top of it.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use proxapi::{CallOutcome, FnAdapter, Proxy, ProxySettings, QuotaStatus, Strategy};
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
//! # rt.block_on(async {
//! let adapter = FnAdapter::new(|name: String| async move {
//!     // Call the remote API here and classify its response.
//!     CallOutcome::<_, std::io::Error>::from_parts(Ok(format!("hello {name}")), QuotaStatus::ok())
//! });
//!
//! let proxy = Proxy::new(
//!     adapter,
//!     ProxySettings::default()
//!         .strategy(Strategy::Retry)
//!         .retry_delay(Duration::from_secs(2)),
//! );
//!
//! let greeting = proxy.call(&"john".to_string()).await.unwrap();
//! assert_eq!(greeting, "hello john");
//! assert_eq!(proxy.limit_info().delay_seconds(), 2.0);
//! # });
//! # }
//! ```

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use data::{
    CallOptions, CallOutcome, DEFAULT_RETRY_DELAY, EventCallback, LimitInfo, ProxyEvent,
    ProxySettings, QuotaStatus, Strategy,
};
pub use effects::{Adapter, FnAdapter, Paginate, PaginateFn, Proxy, RetryState};
pub use error::{ConfigError, Error, PaginationError, Result};
