//! # proxapi-http
//!
//! [`HttpAdapter`] plugs any JSON-over-HTTP API into a [`proxapi::Proxy`].
//! HTTP 429 responses become quota signals, and `Retry-After` or
//! `X-RateLimit-Reset` headers become the suggested retry delay.
//!
//! The header logic in [`headers`] is pure and usable on its own.

mod adapter;
mod error;
pub mod headers;

pub use adapter::HttpAdapter;
pub use error::HttpError;
pub use headers::{is_quota_status, retry_delay_from_headers};
