use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in time, in seconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RawTime", into = "i64")]
pub struct Time(pub i64);

pub const HOUR: i64 = 3600;

/// Timestamps come either as integer seconds or as text from the flight feed.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTime {
    Seconds(i64),
    Text(String),
}

impl Time {
    pub fn parse(text: &str) -> Result<Time, String> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Time(dt.timestamp()));
        }
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|naive| Time(naive.and_utc().timestamp()))
            .ok_or_else(|| format!("unrecognised timestamp '{}'", text))
    }

    /// `None` when the result would not fit in an `i64`.
    pub fn checked_add(self, secs: i64) -> Option<Time> {
        self.0.checked_add(secs).map(Time)
    }

    /// Whole-hour distance formatted to one decimal place, e.g. `2.0`.
    pub fn hours_between(from: Time, to: Time) -> String {
        format!("{:.1}", (to - from) as f64 / HOUR as f64)
    }
}

impl TryFrom<RawTime> for Time {
    type Error = String;

    fn try_from(raw: RawTime) -> Result<Self, Self::Error> {
        match raw {
            RawTime::Seconds(secs) => Ok(Time(secs)),
            RawTime::Text(text) => Time::parse(&text),
        }
    }
}

impl From<Time> for i64 {
    fn from(time: Time) -> Self {
        time.0
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match DateTime::from_timestamp(self.0, 0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            None => write!(f, "@{}", self.0),
        }
    }
}

impl Add<i64> for Time {
    type Output = Self;

    fn add(self, rhs: i64) -> Self::Output {
        Time(self.0.saturating_add(rhs))
    }
}

/// Seconds elapsed between two instants.
impl Sub<Time> for Time {
    type Output = i64;

    fn sub(self, rhs: Time) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}
