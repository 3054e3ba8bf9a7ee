//! Weekly opening-hours tables.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// A wall-clock time of day at minute resolution, `00:00` through `24:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build from hours and minutes. `24:00` is the only value past 23:59.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        let valid = (hour < 24 && minute < 60) || (hour == 24 && minute == 0);
        valid.then_some(Self(hour * 60 + minute))
    }

    pub fn minute_of_day(&self) -> u16 {
        self.0
    }

    /// This time of day on `date`. `24:00` lands on the next midnight, so it
    /// is `None` on the last representable date.
    pub fn on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        date.and_time(chrono::NaiveTime::MIN)
            .checked_add_signed(Duration::minutes(i64::from(self.0)))
    }
}

impl FromStr for ClockTime {
    type Err = PlannerError;

    /// Strict `HH:MM`: exactly two digits, a colon, two digits.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(PlannerError::InvalidClockTime(s.to_string()));
        }
        let digit = |i: usize| u16::from(bytes[i] - b'0');
        let hour = digit(0) * 10 + digit(1);
        let minute = digit(3) * 10 + digit(4);
        Self::from_hm(hour, minute).ok_or_else(|| PlannerError::InvalidClockTime(s.to_string()))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = PlannerError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// One opening range within a day.
///
/// When `end < start` the range runs past midnight into the following day.
/// `end == start` is an empty range and never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeInterval {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Parse `"HH:MM"` bounds.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidClockTime` if either bound is malformed.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Opening intervals for each weekday, in the caller's listed order.
///
/// Missing keys deserialize as closed all day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklySchedule {
    pub sun: Vec<TimeInterval>,
    pub mon: Vec<TimeInterval>,
    pub tue: Vec<TimeInterval>,
    pub wed: Vec<TimeInterval>,
    pub thu: Vec<TimeInterval>,
    pub fri: Vec<TimeInterval>,
    pub sat: Vec<TimeInterval>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one weekday's list.
    #[must_use]
    pub fn with_day(mut self, day: Weekday, intervals: Vec<TimeInterval>) -> Self {
        *self.day_mut(day) = intervals;
        self
    }

    pub fn day(&self, day: Weekday) -> &[TimeInterval] {
        match day {
            Weekday::Sun => &self.sun,
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut Vec<TimeInterval> {
        match day {
            Weekday::Sun => &mut self.sun,
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
        }
    }

    /// True when every day is closed.
    pub fn is_empty(&self) -> bool {
        [
            &self.sun, &self.mon, &self.tue, &self.wed, &self.thu, &self.fri, &self.sat,
        ]
        .iter()
        .all(|d| d.is_empty())
    }

    /// Parse the stored JSON mapping (`{"mon":[{"start":"09:00","end":"17:00"}], ...}`).
    ///
    /// # Errors
    /// Returns `PlannerError::Json` for malformed JSON or `HH:MM` values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_parses_strictly() {
        assert_eq!("09:30".parse::<ClockTime>().unwrap().minute_of_day(), 570);
        assert_eq!("24:00".parse::<ClockTime>().unwrap().minute_of_day(), 1440);
        for bad in ["9:30", "09:3", "09-30", "24:01", "12:60", " 09:30", "ab:cd", "09:300"] {
            assert!(bad.parse::<ClockTime>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn clock_time_displays_zero_padded() {
        assert_eq!(ClockTime::from_hm(7, 5).unwrap().to_string(), "07:05");
    }

    #[test]
    fn end_of_day_rolls_to_next_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let t: ClockTime = "24:00".parse().unwrap();
        assert_eq!(
            t.on(date),
            NaiveDate::from_ymd_opt(2026, 1, 6)
                .unwrap()
                .and_hms_opt(0, 0, 0)
        );
        assert_eq!(t.on(NaiveDate::MAX), None);
    }

    #[test]
    fn overnight_detection() {
        assert!(TimeInterval::parse("22:00", "02:00").unwrap().is_overnight());
        assert!(!TimeInterval::parse("09:00", "17:00").unwrap().is_overnight());
        assert!(!TimeInterval::parse("09:00", "09:00").unwrap().is_overnight());
    }

    #[test]
    fn missing_days_deserialize_empty() {
        let schedule =
            WeeklySchedule::from_json(r#"{"mon":[{"start":"09:00","end":"17:00"}]}"#).unwrap();
        assert_eq!(schedule.day(Weekday::Mon).len(), 1);
        assert!(schedule.day(Weekday::Sun).is_empty());
        assert!(!schedule.is_empty());
    }

    #[test]
    fn malformed_interval_is_rejected_on_load() {
        assert!(WeeklySchedule::from_json(r#"{"mon":[{"start":"9:00","end":"17:00"}]}"#).is_err());
    }
}
