//! Opening-hours availability -- open/closed status at an instant, and the
//! next opening within a bounded look-ahead.
//!
//! Intervals are checked in the order the schedule lists them and the first
//! match wins. Intervals within a day are assumed not to overlap.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::policy::OvernightPolicy;
use crate::schedule::WeeklySchedule;

/// Open/closed status of a place at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityStatus {
    pub open: bool,
    /// When the matching interval ends. Only set while open.
    #[serde(default, with = "crate::local::serde_minutes_opt")]
    pub closes_at: Option<NaiveDateTime>,
}

impl AvailabilityStatus {
    pub fn closed() -> Self {
        Self {
            open: false,
            closes_at: None,
        }
    }

    pub fn open_until(closes_at: NaiveDateTime) -> Self {
        Self {
            open: true,
            closes_at: Some(closes_at),
        }
    }
}

/// Status at `now`, consulting only `now`'s own weekday list.
pub fn status_now(schedule: &WeeklySchedule, now: NaiveDateTime) -> AvailabilityStatus {
    status_now_with(schedule, now, OvernightPolicy::CurrentDayOnly)
}

/// Status at `now` under an explicit overnight policy.
pub fn status_now_with(
    schedule: &WeeklySchedule,
    now: NaiveDateTime,
    policy: OvernightPolicy,
) -> AvailabilityStatus {
    let minute = minute_of_day(now);
    let today = now.date();

    for interval in schedule.day(now.weekday()) {
        let s = interval.start.minute_of_day();
        let e = interval.end.minute_of_day();

        if e >= s {
            if s <= minute && minute < e {
                if let Some(closes_at) = interval.end.on(today) {
                    return AvailabilityStatus::open_until(closes_at);
                }
            }
        } else if minute >= s || minute < e {
            // Early-morning tail closes today; evening head closes tomorrow.
            let close_day = if minute < e {
                Some(today)
            } else {
                today.succ_opt()
            };
            if let Some(closes_at) = close_day.and_then(|day| interval.end.on(day)) {
                return AvailabilityStatus::open_until(closes_at);
            }
        }
    }

    if policy == OvernightPolicy::IncludePreviousDay {
        let yesterday = now.weekday().pred();
        let tail = schedule
            .day(yesterday)
            .iter()
            .filter(|i| i.is_overnight())
            .find(|i| minute < i.end.minute_of_day());
        if let Some(closes_at) = tail.and_then(|i| i.end.on(today)) {
            return AvailabilityStatus::open_until(closes_at);
        }
    }

    AvailabilityStatus::closed()
}

/// Next opening instant after `now` that is no later than `now + horizon_hours`.
///
/// Only today and tomorrow are searched, in list order within each day; the
/// first qualifying start is returned even if a later-listed interval opens
/// sooner. Today's intervals that already started are skipped. A negative or
/// NaN horizon finds nothing.
pub fn next_open_within(
    schedule: &WeeklySchedule,
    horizon_hours: f64,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let limit = add_hours(now, horizon_hours);

    let mut day = now.date();
    for offset in 0..=1 {
        if offset > 0 {
            day = day.succ_opt()?;
        }
        let found = schedule
            .day(day.weekday())
            .iter()
            .filter_map(|interval| interval.start.on(day))
            .filter(|candidate| offset > 0 || *candidate > now)
            .find(|candidate| *candidate <= limit);
        if found.is_some() {
            return found;
        }
    }
    None
}

fn minute_of_day(dt: NaiveDateTime) -> u16 {
    // hour < 24 and minute < 60, so this always fits.
    (dt.hour() * 60 + dt.minute()) as u16
}

/// `now + hours`, saturating at the largest representable instant.
pub(crate) fn add_hours(now: NaiveDateTime, hours: f64) -> NaiveDateTime {
    // `as` saturates; NaN becomes 0.
    let seconds = (hours * 3600.0) as i64;
    Duration::try_seconds(seconds)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(if seconds < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}
