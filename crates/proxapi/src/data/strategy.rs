use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// What the proxy does when the remote API reports an exhausted quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Wait for the current retry delay, then call the adapter again with the
    /// same parameters. Repeats until a non-quota outcome is observed.
    Retry,

    /// Fail the call with [`Error::RateLimitExceeded`](crate::Error::RateLimitExceeded).
    #[default]
    Abort,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Retry => "retry",
            Strategy::Abort => "abort",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retry" => Ok(Strategy::Retry),
            "abort" => Ok(Strategy::Abort),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Strategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}
