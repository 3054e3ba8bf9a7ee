//! Policies for overnight opening intervals.

use serde::{Deserialize, Serialize};

/// How an overnight interval listed under one weekday is seen from the next.
///
/// A `22:00-02:00` range under Monday also covers Tuesday 00:00-02:00. Stored
/// schedules are not consistent about repeating that tail under Tuesday, so
/// the lookup is a caller choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OvernightPolicy {
    /// Only the current weekday's list is consulted. A tail past midnight is
    /// reported only if the schedule repeats it under the next day.
    #[default]
    CurrentDayOnly,
    /// After the current day's list, the previous weekday's overnight
    /// intervals are checked for an early-morning tail covering `now`.
    IncludePreviousDay,
}
