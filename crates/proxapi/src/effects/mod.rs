//! Effects layer: the adapter seam, the shared retry state, and the proxy
//! that drives them.

mod adapter;
mod paginate;
mod proxy;
mod state;

pub use adapter::{Adapter, FnAdapter};
pub use paginate::{Paginate, PaginateFn};
pub use proxy::Proxy;
pub use state::RetryState;
