//! Serde helpers for durations written as (fractional) seconds.

use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::core::delay_from_secs;

pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(delay.as_secs_f64())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    delay_from_secs(secs)
        .ok_or_else(|| D::Error::custom(format!("delay must be a positive number of seconds, got {secs}")))
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        delay: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match delay {
            Some(delay) => super::serialize(delay, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        match Option::<f64>::deserialize(deserializer)? {
            Some(secs) => delay_from_secs(secs).map(Some).ok_or_else(|| {
                D::Error::custom(format!("delay must be a positive number of seconds, got {secs}"))
            }),
            None => Ok(None),
        }
    }
}
