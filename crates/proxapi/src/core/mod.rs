//! Pure transformations used by the proxy.
//!
//! Nothing in here sleeps, locks, or calls an adapter.

mod budget;
mod delay;

pub use budget::RetryBudget;
pub use delay::{ceil_seconds, delay_from_secs};
