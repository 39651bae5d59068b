use std::future::Future;
use std::marker::PhantomData;

use crate::data::CallOutcome;

/// Translation layer between the proxy and one specific remote API.
///
/// An adapter performs the remote call with the given parameters and
/// classifies the response: a payload, a hard error, or a quota signal. It
/// knows nothing about retries; the proxy decides what to do with the
/// outcome. The returned future resolves exactly once per invocation.
///
/// # Implementations
///
/// - [`FnAdapter`]: wraps an async closure
/// - `proxapi_http::HttpAdapter`: maps HTTP 429 responses and rate-limit headers
pub trait Adapter: Send + Sync {
    /// Request parameters, opaque to the proxy.
    type Params: Send + Sync;

    /// Successful response payload.
    type Output: Send;

    /// Failures unrelated to quota.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Call the remote API once and classify the response.
    fn translate(
        &self,
        params: &Self::Params,
    ) -> impl Future<Output = CallOutcome<Self::Output, Self::Error>> + Send;
}

/// Adapter built from a closure returning a future.
///
/// Parameters are cloned for every attempt, so retries see exactly the
/// parameters of the original call.
///
/// # Examples
///
/// ```
/// use proxapi::{CallOutcome, FnAdapter, QuotaStatus};
///
/// #[derive(Clone)]
/// struct Page(u32);
///
/// let adapter = FnAdapter::new(|page: Page| async move {
///     CallOutcome::<_, std::io::Error>::from_parts(Ok(page.0 * 10), QuotaStatus::ok())
/// });
/// # drop(adapter);
/// ```
pub struct FnAdapter<F, P> {
    f: F,
    _params: PhantomData<fn(P)>,
}

impl<F, P> FnAdapter<F, P> {
    pub fn new<Fut>(f: F) -> Self
    where
        F: Fn(P) -> Fut,
    {
        Self {
            f,
            _params: PhantomData,
        }
    }
}

impl<F, P, Fut, T, E> Adapter for FnAdapter<F, P>
where
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = CallOutcome<T, E>> + Send,
    P: Clone + Send + Sync,
    T: Send,
    E: std::error::Error + Send + Sync + 'static,
{
    type Params = P;
    type Output = T;
    type Error = E;

    fn translate(&self, params: &P) -> impl Future<Output = CallOutcome<T, E>> + Send {
        (self.f)(params.clone())
    }
}
