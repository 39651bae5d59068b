//! Reading rate-limit guidance out of HTTP responses.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use proxapi::core::delay_from_secs;
use reqwest::header::{HeaderMap, RETRY_AFTER};

/// Epoch-seconds headers announcing when the current rate-limit window ends.
const RESET_HEADERS: [&str; 2] = ["x-rate-limit-reset", "x-ratelimit-reset"];

/// Whether an HTTP status means the request was rejected by a rate limiter.
pub fn is_quota_status(status: u16) -> bool {
    status == 429
}

/// Suggested wait before the next request, relative to `now`.
///
/// `Retry-After` wins when present, either as delta seconds or as an HTTP
/// date. When it is missing or unusable, the first reset header holding an
/// epoch timestamp in the future is used. Returns `None` when no header gives
/// a positive delay.
pub fn retry_delay_from_headers(headers: &HeaderMap, now: SystemTime) -> Option<Duration> {
    let retry_after = headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| parse_retry_after(value.trim(), now));
    if retry_after.is_some() {
        return retry_after;
    }

    let now_secs = now.duration_since(UNIX_EPOCH).ok()?.as_secs_f64();
    RESET_HEADERS.iter().find_map(|name| {
        let reset = headers.get(*name)?.to_str().ok()?.trim().parse::<f64>().ok()?;
        delay_from_secs(reset - now_secs)
    })
}

fn parse_retry_after(value: &str, now: SystemTime) -> Option<Duration> {
    if let Ok(secs) = value.parse::<f64>() {
        return delay_from_secs(secs);
    }
    let date = httpdate::parse_http_date(value).ok()?;
    date.duration_since(now).ok().filter(|d| !d.is_zero())
}
