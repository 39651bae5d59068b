use std::time::Duration;

/// Convert a server-suggested delay in seconds into a [`Duration`].
///
/// Returns `None` for values the proxy must not adopt: NaN, infinities,
/// zero, negative numbers, and values too large for a `Duration`. Fractional
/// seconds are kept.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use proxapi::core::delay_from_secs;
///
/// assert_eq!(delay_from_secs(2.5), Some(Duration::from_millis(2500)));
/// assert_eq!(delay_from_secs(0.0), None);
/// assert_eq!(delay_from_secs(-3.0), None);
/// ```
pub fn delay_from_secs(secs: f64) -> Option<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|delay| !delay.is_zero())
}

/// Whole seconds of `delay`, rounded up.
///
/// This is the figure shown to users in retry notifications.
pub fn ceil_seconds(delay: Duration) -> u64 {
    let whole = delay.as_secs();
    if delay.subsec_nanos() > 0 {
        whole.saturating_add(1)
    } else {
        whole
    }
}
