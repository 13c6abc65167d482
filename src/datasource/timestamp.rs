//! Timestamp derivation for acquired readings

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimestampError {
    #[error("no timestamp supplied for timestamp type {0:?}")]
    Missing(TimestampType),
    #[error("invalid epoch timestamp '{0}'")]
    Epoch(String),
    #[error("invalid ISO 8601 timestamp '{raw}': {reason}")]
    Iso8601 { raw: String, reason: String },
    #[error("unknown time zone '{0}'")]
    TimeZone(String),
    #[error("local time '{0}' is ambiguous or does not exist in its time zone")]
    AmbiguousLocalTime(String),
    #[error("poll time {0} ms is outside the supported date range")]
    PollTime(i64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimestampType {
    #[default]
    #[serde(rename = "polltime")]
    PollTime,
    #[serde(rename = "epochMillis")]
    EpochMillis,
    #[serde(rename = "epochSeconds")]
    EpochSeconds,
    #[serde(rename = "iso8601_zoned")]
    Iso8601Zoned,
    #[serde(rename = "iso8601_offset")]
    Iso8601Offset,
}

pub(crate) const TIMESTAMP_TYPES: &[(&str, TimestampType)] = &[
    ("polltime", TimestampType::PollTime),
    ("epochMillis", TimestampType::EpochMillis),
    ("epochSeconds", TimestampType::EpochSeconds),
    ("iso8601_zoned", TimestampType::Iso8601Zoned),
    ("iso8601_offset", TimestampType::Iso8601Offset),
];

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

impl TimestampType {
    /// Work out when a reading was taken.
    ///
    /// `raw` is the value extracted by the datasource's timestamp expression;
    /// it is ignored for [`TimestampType::PollTime`].
    pub fn resolve(
        self,
        raw: Option<&str>,
        poll_time: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, TimestampError> {
        if self == TimestampType::PollTime {
            return Ok(poll_time);
        }
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(TimestampError::Missing(self))?;

        match self {
            TimestampType::PollTime => Ok(poll_time),
            TimestampType::EpochMillis => parse_epoch(raw).and_then(|ms| {
                DateTime::from_timestamp_millis(ms).ok_or(TimestampError::Epoch(raw.to_string()))
            }),
            TimestampType::EpochSeconds => parse_epoch(raw).and_then(|s| {
                DateTime::from_timestamp(s, 0).ok_or(TimestampError::Epoch(raw.to_string()))
            }),
            TimestampType::Iso8601Offset => parse_offset(raw).map(|dt| dt.with_timezone(&Utc)),
            TimestampType::Iso8601Zoned => parse_zoned(raw),
        }
    }
}

fn parse_epoch(raw: &str) -> Result<i64, TimestampError> {
    raw.parse::<i64>()
        .map_err(|_| TimestampError::Epoch(raw.to_string()))
}

fn parse_offset(raw: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| TimestampError::Iso8601 {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

/// `2024-03-01T10:00:00[Europe/Stockholm]` or `2024-03-01T10:00:00+01:00[Europe/Stockholm]`
fn parse_zoned(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let Some((datetime, zone)) = raw.strip_suffix(']').and_then(|s| s.split_once('[')) else {
        // Without a zone suffix the best we can do is an offset timestamp
        return parse_offset(raw).map(|dt| dt.with_timezone(&Utc));
    };

    let tz: Tz = zone
        .parse()
        .map_err(|_| TimestampError::TimeZone(zone.to_string()))?;

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(datetime) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(datetime, LOCAL_FORMAT).map_err(|e| {
        TimestampError::Iso8601 {
            raw: raw.to_string(),
            reason: e.to_string(),
        }
    })?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(TimestampError::AmbiguousLocalTime(raw.to_string()))
}
