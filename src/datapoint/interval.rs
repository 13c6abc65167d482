use std::time::Duration;

use serde::{Deserialize, Serialize};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// How often a datapoint is polled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollInterval {
    #[default]
    OneMinute,
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
    TwentyMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    ThreeHours,
    SixHours,
    TwelveHours,
    OneDay,
    Weekly,
    Monthly,
}

pub(crate) const POLL_INTERVALS: &[(&str, PollInterval)] = &[
    ("one_minute", PollInterval::OneMinute),
    ("five_minutes", PollInterval::FiveMinutes),
    ("ten_minutes", PollInterval::TenMinutes),
    ("fifteen_minutes", PollInterval::FifteenMinutes),
    ("twenty_minutes", PollInterval::TwentyMinutes),
    ("thirty_minutes", PollInterval::ThirtyMinutes),
    ("one_hour", PollInterval::OneHour),
    ("two_hours", PollInterval::TwoHours),
    ("three_hours", PollInterval::ThreeHours),
    ("six_hours", PollInterval::SixHours),
    ("twelve_hours", PollInterval::TwelveHours),
    ("one_day", PollInterval::OneDay),
    ("weekly", PollInterval::Weekly),
    ("monthly", PollInterval::Monthly),
];

impl PollInterval {
    /// Nominal period; a month counts as 30 days
    pub fn as_duration(&self) -> Duration {
        let secs = match self {
            PollInterval::OneMinute => MINUTE,
            PollInterval::FiveMinutes => 5 * MINUTE,
            PollInterval::TenMinutes => 10 * MINUTE,
            PollInterval::FifteenMinutes => 15 * MINUTE,
            PollInterval::TwentyMinutes => 20 * MINUTE,
            PollInterval::ThirtyMinutes => 30 * MINUTE,
            PollInterval::OneHour => HOUR,
            PollInterval::TwoHours => 2 * HOUR,
            PollInterval::ThreeHours => 3 * HOUR,
            PollInterval::SixHours => 6 * HOUR,
            PollInterval::TwelveHours => 12 * HOUR,
            PollInterval::OneDay => DAY,
            PollInterval::Weekly => 7 * DAY,
            PollInterval::Monthly => 30 * DAY,
        };
        Duration::from_secs(secs)
    }
}

/// Retention class for stored readings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeToLive {
    /// 3 months
    #[default]
    A,
    /// 6 months
    B,
    /// 1 year
    C,
    /// 2 years
    D,
    /// 3 years
    E,
    /// 4 years
    F,
    /// 5 years
    G,
    /// Forever
    H,
}

pub(crate) const TIME_TO_LIVE: &[(&str, TimeToLive)] = &[
    ("a", TimeToLive::A),
    ("b", TimeToLive::B),
    ("c", TimeToLive::C),
    ("d", TimeToLive::D),
    ("e", TimeToLive::E),
    ("f", TimeToLive::F),
    ("g", TimeToLive::G),
    ("h", TimeToLive::H),
];

impl TimeToLive {
    /// How long readings are kept; `None` means forever
    pub fn retention(&self) -> Option<Duration> {
        let days = match self {
            TimeToLive::A => 91,
            TimeToLive::B => 182,
            TimeToLive::C => 365,
            TimeToLive::D => 2 * 365,
            TimeToLive::E => 3 * 365,
            TimeToLive::F => 4 * 365 + 1,
            TimeToLive::G => 5 * 365 + 1,
            TimeToLive::H => return None,
        };
        Some(Duration::from_secs(days * DAY))
    }
}
