//! Occurrence generation -- expands an event definition into concrete instances
//! inside a half-open window.
//!
//! The anchor (weekday, day-of-month, month/day, time of day) always comes from
//! the event's own start. Arithmetic is on naive calendar fields, so an event at
//! 18:00 stays at 18:00 in every generated occurrence.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Upper bound on weekly steps emitted by one call.
pub const WEEKLY_STEP_CAP: usize = 1000;

/// Upper bound on calendar months (or years) visited by one call.
pub const CALENDAR_STEP_CAP: usize = 200;

/// Recurrence cadence. The anchor is implied by the event start.
///
/// Parsing is case-insensitive and treats an empty string as `None`, both
/// through [`FromStr`] and through serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Recurrence {
    #[default]
    None,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Recurrence::None),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            "yearly" => Ok(Recurrence::Yearly),
            other => Err(PlannerError::InvalidRecurrence(other.to_string())),
        }
    }
}

impl TryFrom<String> for Recurrence {
    type Error = PlannerError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Recurrence> for String {
    fn from(r: Recurrence) -> Self {
        r.as_str().to_string()
    }
}

/// The anchor occurrence of an event plus its cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDefinition {
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub recurrence: Recurrence,
}

impl EventDefinition {
    /// Build a definition, checking that `end` (when given) is after `start`.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidEvent` if `end <= start`.
    pub fn new(
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        recurrence: Recurrence,
    ) -> Result<Self> {
        if let Some(end) = end {
            if end <= start {
                return Err(PlannerError::InvalidEvent(format!(
                    "end {} is not after start {}",
                    end, start
                )));
            }
        }
        Ok(Self {
            start,
            end,
            recurrence,
        })
    }

    /// Length of every occurrence, if the event has an end.
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }
}

/// One concrete instance of an event. Serializes as local `YYYY-MM-DDTHH:MM` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    #[serde(with = "crate::local::serde_minutes")]
    pub start: NaiveDateTime,
    #[serde(default, with = "crate::local::serde_minutes_opt")]
    pub end: Option<NaiveDateTime>,
}

/// Result of expanding one event over a window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    /// Occurrences in ascending start order.
    pub occurrences: Vec<Occurrence>,
    /// Set when the step cap stopped iteration before the window was exhausted.
    /// The occurrences are then a correct prefix, not the full answer.
    pub truncated: bool,
}

impl Expansion {
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

impl IntoIterator for Expansion {
    type Item = Occurrence;
    type IntoIter = std::vec::IntoIter<Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.occurrences.into_iter()
    }
}

/// Expand `event` into every occurrence whose start lies in `[window_start, window_end)`.
///
/// Never fails: an inverted window, or an event entirely outside it, yields an
/// empty expansion. No occurrence ever starts before `event.start`.
pub fn generate_occurrences(
    event: &EventDefinition,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Expansion {
    if window_start > window_end {
        return Expansion::default();
    }

    let mut sink = Sink {
        event,
        window_start,
        window_end,
        out: Vec::new(),
    };

    let truncated = match event.recurrence {
        Recurrence::None => {
            sink.push(event.start);
            false
        }
        Recurrence::Weekly => expand_weekly(&mut sink),
        Recurrence::Monthly => expand_monthly(&mut sink),
        Recurrence::Yearly => expand_yearly(&mut sink),
    };

    if truncated {
        tracing::debug!(
            recurrence = %event.recurrence,
            anchor = %event.start,
            emitted = sink.out.len(),
            "occurrence step cap reached, result truncated"
        );
    }

    Expansion {
        occurrences: sink.out,
        truncated,
    }
}

/// Collects candidates that pass the window and anchor checks.
struct Sink<'a> {
    event: &'a EventDefinition,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
    out: Vec<Occurrence>,
}

impl Sink<'_> {
    fn push(&mut self, start: NaiveDateTime) {
        if start < self.event.start || start < self.window_start || start >= self.window_end {
            return;
        }
        let end = self
            .event
            .duration()
            .and_then(|d| start.checked_add_signed(d));
        self.out.push(Occurrence { start, end });
    }
}

/// Returns `true` if the cap stopped iteration early.
fn expand_weekly(sink: &mut Sink<'_>) -> bool {
    let step = Duration::weeks(1);
    let mut cur = sink.event.start;

    if cur < sink.window_start {
        let behind = (sink.window_start - cur).num_seconds();
        let k = behind / step.num_seconds();
        cur = match Duration::try_weeks(k).and_then(|d| cur.checked_add_signed(d)) {
            Some(dt) => dt,
            None => return false,
        };
        while cur < sink.window_start {
            cur = match cur.checked_add_signed(step) {
                Some(dt) => dt,
                None => return false,
            };
        }
    }

    let mut steps = 0;
    while cur < sink.window_end {
        if steps == WEEKLY_STEP_CAP {
            return true;
        }
        steps += 1;
        sink.push(cur);
        cur = match cur.checked_add_signed(step) {
            Some(dt) => dt,
            None => return false,
        };
    }
    false
}

fn expand_monthly(sink: &mut Sink<'_>) -> bool {
    let anchor = sink.event.start;
    let (mut year, mut month) = (sink.window_start.year(), sink.window_start.month());
    if (year, month) < (anchor.year(), anchor.month()) {
        year = anchor.year();
        month = anchor.month();
    }

    for _ in 0..CALENDAR_STEP_CAP {
        if let Some(date) = clamped_date(year, month, anchor.day()) {
            sink.push(date.and_time(anchor.time()));
        }

        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
        if reached_end(year, month, sink.window_end) {
            return false;
        }
    }
    true
}

fn expand_yearly(sink: &mut Sink<'_>) -> bool {
    let anchor = sink.event.start;
    let mut year = sink.window_start.year().max(anchor.year());

    for _ in 0..CALENDAR_STEP_CAP {
        // A Feb 29 anchor clamps to Feb 28 in common years, never to Mar 1.
        if let Some(date) = clamped_date(year, anchor.month(), anchor.day()) {
            sink.push(date.and_time(anchor.time()));
        }

        year += 1;
        if reached_end(year, 1, sink.window_end) {
            return false;
        }
    }
    true
}

/// The `day`-th of the month, or the month's last day if it is shorter.
fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day.min(last))
}

/// Number of days in a month, `None` outside chrono's representable range.
pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

/// Whether midnight on the first of the given month is at or past `window_end`.
/// Months beyond chrono's range count as reached.
fn reached_end(year: i32, month: u32, window_end: NaiveDateTime) -> bool {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first.and_time(chrono::NaiveTime::MIN) >= window_end,
        None => true,
    }
}
