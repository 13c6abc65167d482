//! Best-effort field decoding for the JSON configuration format
//!
//! Follows the same rules as column decoding: a field that does not decode
//! keeps its default and the rest of the document is still read. Use with
//! `#[serde(default, deserialize_with = "...")]`.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::constants::defaults;

/// Any field type; undecodable values (unknown enum text, wrong JSON type) give the default
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        log::debug!("Keeping default value; {}", e);
        T::default()
    }))
}

/// A JSON number or a numeric string; anything else gives 0
pub fn number_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(number.unwrap_or_else(|| {
        log::debug!("Keeping default value; {} is not a number", value);
        0.0
    }))
}

/// Like the `port` column, an unusable port falls back to the MQTT default
pub fn port_or_default<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let port = match &value {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(port.unwrap_or_else(|| {
        log::warn!("Invalid MQTT port {}; using {}", value, defaults::MQTT_PORT);
        defaults::MQTT_PORT
    }))
}
