//! Error types for proxapi-http.

use thiserror::Error;

/// Hard failures of an HTTP call. Quota responses never become an `HttpError`.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl HttpError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Transport(e) | HttpError::Decode(e) => e.status().map(|s| s.as_u16()),
        }
    }
}
