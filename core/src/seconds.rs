//! Serde adapter that stores a [`Duration`] as fractional seconds.

use std::time::Duration;

use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

/// Serializes the duration as an `f32` number of seconds.
pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f32(duration.as_secs_f32())
}

/// Deserializes a non-negative, finite number of seconds.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f32::deserialize(deserializer)?;
    Duration::try_from_secs_f32(secs)
        .map_err(|error| D::Error::custom(format!("invalid duration {secs}: {error}")))
}
