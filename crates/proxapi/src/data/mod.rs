//! Data layer: configuration and value types shared by the proxy and its adapters.

mod event;
mod limit;
mod options;
mod outcome;
mod secs;
mod strategy;

pub use event::{EventCallback, ProxyEvent};
pub use limit::LimitInfo;
pub use options::{CallOptions, DEFAULT_RETRY_DELAY, ProxySettings};
pub use outcome::{CallOutcome, QuotaStatus};
pub use strategy::Strategy;
