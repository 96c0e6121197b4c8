//! `#[serde(with = "bankline_bootstrap::duration_serde")]` for
//! `std::time::Duration` written in humantime form (`"2s"`, `"150ms"`).

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer, de};

/// # Errors
/// Propagates the serializer's error.
pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&humantime::format_duration(*value))
}

/// # Errors
/// Fails on strings humantime cannot parse.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(raw.trim()).map_err(|e| de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
