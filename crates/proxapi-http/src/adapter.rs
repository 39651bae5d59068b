use std::fmt;
use std::marker::PhantomData;
use std::time::SystemTime;

use proxapi::{Adapter, CallOutcome};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::headers::{is_quota_status, retry_delay_from_headers};

/// Adapter over a JSON HTTP API.
///
/// `build` turns call parameters into a request on the shared client. The
/// response is classified as follows:
///
/// - 429: quota exceeded, with the delay read from `Retry-After` or a reset header
/// - other non-2xx: [`HttpError::Status`] carrying the response body
/// - 2xx: the body decoded as JSON into `T`
///
/// # Examples
///
/// ```no_run
/// use proxapi::{Proxy, ProxySettings, Strategy};
/// use proxapi_http::HttpAdapter;
///
/// #[derive(serde::Deserialize)]
/// struct Repo {
///     stargazers_count: u64,
/// }
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let adapter = HttpAdapter::new(reqwest::Client::new(), |client: &reqwest::Client, name: &String| {
///     client.get(format!("https://api.github.com/repos/{name}"))
/// });
/// let proxy = Proxy::new(adapter, ProxySettings::default().strategy(Strategy::Retry));
///
/// let repo: Repo = proxy.call(&"rust-lang/rust".to_string()).await?;
/// println!("{}", repo.stargazers_count);
/// # Ok(())
/// # }
/// ```
pub struct HttpAdapter<P, T, F> {
    client: Client,
    build: F,
    _types: PhantomData<fn(&P) -> T>,
}

impl<P, T, F> HttpAdapter<P, T, F>
where
    F: Fn(&Client, &P) -> RequestBuilder,
{
    pub fn new(client: Client, build: F) -> Self {
        Self {
            client,
            build,
            _types: PhantomData,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl<P, T, F> fmt::Debug for HttpAdapter<P, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAdapter")
            .field("client", &self.client)
            .field("build", &"<fn>")
            .finish()
    }
}

impl<P, T, F> Adapter for HttpAdapter<P, T, F>
where
    F: Fn(&Client, &P) -> RequestBuilder + Send + Sync,
    P: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Params = P;
    type Output = T;
    type Error = HttpError;

    async fn translate(&self, params: &P) -> CallOutcome<T, HttpError> {
        let response = match (self.build)(&self.client, params).send().await {
            Ok(response) => response,
            Err(e) => return CallOutcome::hard_error(HttpError::Transport(e)),
        };

        let status = response.status();
        if is_quota_status(status.as_u16()) {
            let delay = retry_delay_from_headers(response.headers(), SystemTime::now());
            tracing::debug!(url = %response.url(), ?delay, "quota response");
            let outcome = CallOutcome::quota_exceeded();
            return match delay {
                Some(delay) => outcome.with_retry_delay(delay),
                None => outcome,
            };
        }

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(%status, error = %e, "failed to read error body");
                    format!("<unreadable body: {e}>")
                }
            };
            return CallOutcome::hard_error(HttpError::Status {
                status: status.as_u16(),
                body,
            });
        }

        match response.json::<T>().await {
            Ok(payload) => CallOutcome::success(payload),
            Err(e) => CallOutcome::hard_error(HttpError::Decode(e)),
        }
    }
}
