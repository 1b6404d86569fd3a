//! Wall-clock time of day used by shift records.
//!
//! Serialized as `HH:MM`, stored as minutes since midnight so span
//! arithmetic stays integral.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MINUTES_PER_HOUR: i32 = 60;

/// Time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShiftTime(u16);

impl ShiftTime {
    /// Builds a time from constant parts.
    ///
    /// # Panics
    /// Panics when `hour > 23` or `minute > 59`; meant for literals.
    pub const fn hm(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self(hour * 60 + minute)
    }

    /// Builds a time from hour/minute parts; `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self::from)
    }

    /// Minutes elapsed since midnight.
    pub fn minutes(self) -> i32 {
        i32::from(self.0)
    }

    /// Signed minutes from `self` to `later`.
    pub fn minutes_until(self, later: ShiftTime) -> i32 {
        later.minutes() - self.minutes()
    }
}

impl From<NaiveTime> for ShiftTime {
    fn from(value: NaiveTime) -> Self {
        // hour <= 23 and minute <= 59, so the sum fits in u16.
        Self((value.hour() * 60 + value.minute()) as u16)
    }
}

impl FromStr for ShiftTime {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .map(Self::from)
            .map_err(|err| format!("invalid time `{value}`, expected HH:MM: {err}"))
    }
}

impl Display for ShiftTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let minutes = self.minutes();
        write!(
            f,
            "{:02}:{:02}",
            minutes / MINUTES_PER_HOUR,
            minutes % MINUTES_PER_HOUR
        )
    }
}

impl Serialize for ShiftTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShiftTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::ShiftTime;

    #[test]
    fn parses_and_formats_hh_mm() {
        let time: ShiftTime = "09:05".parse().unwrap();
        assert_eq!(time.minutes(), 9 * 60 + 5);
        assert_eq!(time.to_string(), "09:05");

        let short: ShiftTime = "7:30".parse().unwrap();
        assert_eq!(short.to_string(), "07:30");
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!("24:00".parse::<ShiftTime>().is_err());
        assert!("12:60".parse::<ShiftTime>().is_err());
        assert!("noon".parse::<ShiftTime>().is_err());
        assert!(ShiftTime::from_hm(25, 0).is_none());
    }

    #[test]
    fn minutes_until_is_signed() {
        let start = ShiftTime::from_hm(9, 0).unwrap();
        let end = ShiftTime::from_hm(18, 30).unwrap();
        assert_eq!(start.minutes_until(end), 570);
        assert_eq!(end.minutes_until(start), -570);
    }

    #[test]
    fn serializes_as_string() {
        let time = ShiftTime::from_hm(13, 0).unwrap();
        assert_eq!(serde_json::to_value(time).unwrap(), "13:00");
        let decoded: ShiftTime = serde_json::from_str("\"14:15\"").unwrap();
        assert_eq!(decoded, ShiftTime::from_hm(14, 15).unwrap());
    }
}
