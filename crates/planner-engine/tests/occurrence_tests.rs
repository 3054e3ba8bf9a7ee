//! Tests for occurrence generation across the four cadences.

use chrono::{NaiveDate, NaiveDateTime};
use planner_engine::occurrence::{CALENDAR_STEP_CAP, WEEKLY_STEP_CAP};
use planner_engine::{generate_occurrences, EventDefinition, Recurrence};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    at(y, m, d, 0, 0)
}

fn event(start: NaiveDateTime, end: Option<NaiveDateTime>, recurrence: Recurrence) -> EventDefinition {
    EventDefinition::new(start, end, recurrence).expect("valid event")
}

fn starts(def: &EventDefinition, ws: NaiveDateTime, we: NaiveDateTime) -> Vec<NaiveDateTime> {
    generate_occurrences(def, ws, we)
        .occurrences
        .iter()
        .map(|o| o.start)
        .collect()
}

// ---------------------------------------------------------------------------
// None
// ---------------------------------------------------------------------------

#[test]
fn one_off_inside_window_is_emitted_once() {
    let def = event(at(2026, 3, 14, 20, 0), Some(at(2026, 3, 14, 22, 30)), Recurrence::None);
    let result = generate_occurrences(&def, day(2026, 3, 1), day(2026, 4, 1));

    assert_eq!(result.len(), 1);
    assert_eq!(result.occurrences[0].start, at(2026, 3, 14, 20, 0));
    assert_eq!(result.occurrences[0].end, Some(at(2026, 3, 14, 22, 30)));
    assert!(!result.truncated);
}

#[test]
fn one_off_window_is_half_open() {
    let start = at(2026, 3, 14, 20, 0);
    let def = event(start, None, Recurrence::None);

    assert_eq!(starts(&def, start, day(2026, 4, 1)), vec![start]);
    assert!(starts(&def, day(2026, 3, 1), start).is_empty());
}

#[test]
fn one_off_outside_window_is_empty() {
    let def = event(at(2026, 5, 1, 9, 0), None, Recurrence::None);
    assert!(generate_occurrences(&def, day(2026, 3, 1), day(2026, 4, 1)).is_empty());
}

// ---------------------------------------------------------------------------
// Weekly
// ---------------------------------------------------------------------------

#[test]
fn weekly_monday_evenings_in_january() {
    // 2026-01-05 is a Monday.
    let def = event(at(2026, 1, 5, 18, 0), None, Recurrence::Weekly);
    assert_eq!(
        starts(&def, day(2026, 1, 1), day(2026, 2, 1)),
        vec![
            at(2026, 1, 5, 18, 0),
            at(2026, 1, 12, 18, 0),
            at(2026, 1, 19, 18, 0),
            at(2026, 1, 26, 18, 0),
        ]
    );
}

#[test]
fn weekly_fast_forwards_from_old_anchor() {
    let def = event(at(2020, 1, 6, 18, 0), Some(at(2020, 1, 6, 20, 0)), Recurrence::Weekly);
    let result = generate_occurrences(&def, day(2026, 1, 1), day(2026, 1, 15));

    assert_eq!(
        result.occurrences.iter().map(|o| o.start).collect::<Vec<_>>(),
        vec![at(2026, 1, 5, 18, 0), at(2026, 1, 12, 18, 0)]
    );
    assert_eq!(result.occurrences[0].end, Some(at(2026, 1, 5, 20, 0)));
    assert!(!result.truncated);
}

#[test]
fn weekly_candidate_exactly_at_window_start_is_included() {
    let def = event(at(2026, 1, 5, 18, 0), None, Recurrence::Weekly);
    let ws = at(2026, 1, 12, 18, 0);
    assert_eq!(starts(&def, ws, at(2026, 1, 13, 0, 0)), vec![ws]);
}

#[test]
fn weekly_anchor_after_window_is_empty() {
    let def = event(at(2026, 6, 1, 18, 0), None, Recurrence::Weekly);
    assert!(starts(&def, day(2026, 1, 1), day(2026, 2, 1)).is_empty());
}

#[test]
fn weekly_hits_step_cap_on_huge_window() {
    let def = event(at(2000, 1, 3, 9, 0), None, Recurrence::Weekly);
    let result = generate_occurrences(&def, day(2000, 1, 1), day(2100, 1, 1));

    assert_eq!(result.len(), WEEKLY_STEP_CAP);
    assert!(result.truncated);
    assert_eq!(result.occurrences[0].start, at(2000, 1, 3, 9, 0));
}

#[test]
fn weekly_exactly_cap_occurrences_is_not_truncated() {
    let anchor = at(2000, 1, 3, 9, 0);
    let def = event(anchor, None, Recurrence::Weekly);
    // Window ends right after the 1000th occurrence.
    let last = anchor + chrono::Duration::weeks(WEEKLY_STEP_CAP as i64 - 1);
    let result = generate_occurrences(&def, anchor, last + chrono::Duration::minutes(1));

    assert_eq!(result.len(), WEEKLY_STEP_CAP);
    assert!(!result.truncated);
}

// ---------------------------------------------------------------------------
// Monthly
// ---------------------------------------------------------------------------

#[test]
fn monthly_day_31_clamps_to_short_months() {
    let def = event(at(2026, 1, 31, 10, 0), None, Recurrence::Monthly);
    assert_eq!(
        starts(&def, day(2026, 1, 1), day(2026, 5, 1)),
        vec![
            at(2026, 1, 31, 10, 0),
            at(2026, 2, 28, 10, 0),
            at(2026, 3, 31, 10, 0),
            at(2026, 4, 30, 10, 0),
        ]
    );
}

#[test]
fn monthly_clamps_to_leap_february() {
    let def = event(at(2024, 1, 30, 8, 15), None, Recurrence::Monthly);
    assert_eq!(
        starts(&def, day(2024, 2, 1), day(2024, 3, 1)),
        vec![at(2024, 2, 29, 8, 15)]
    );
}

#[test]
fn monthly_rolls_over_year_end() {
    let def = event(at(2025, 11, 15, 19, 30), None, Recurrence::Monthly);
    assert_eq!(
        starts(&def, day(2025, 12, 1), day(2026, 3, 1)),
        vec![
            at(2025, 12, 15, 19, 30),
            at(2026, 1, 15, 19, 30),
            at(2026, 2, 15, 19, 30),
        ]
    );
}

#[test]
fn monthly_never_emits_before_anchor_in_anchor_month() {
    // Window starts in the anchor's month, before the anchor.
    let def = event(at(2026, 3, 20, 12, 0), None, Recurrence::Monthly);
    assert_eq!(
        starts(&def, day(2026, 3, 1), day(2026, 4, 30)),
        vec![at(2026, 3, 20, 12, 0), at(2026, 4, 20, 12, 0)]
    );
}

#[test]
fn monthly_window_before_anchor_month_is_empty() {
    let def = event(at(2026, 6, 10, 12, 0), None, Recurrence::Monthly);
    assert!(starts(&def, day(2026, 1, 1), day(2026, 6, 1)).is_empty());
}

#[test]
fn monthly_preserves_duration() {
    let def = event(at(2026, 1, 31, 23, 0), Some(at(2026, 2, 1, 1, 30)), Recurrence::Monthly);
    let result = generate_occurrences(&def, day(2026, 2, 1), day(2026, 3, 1));

    assert_eq!(result.len(), 1);
    assert_eq!(result.occurrences[0].start, at(2026, 2, 28, 23, 0));
    assert_eq!(result.occurrences[0].end, Some(at(2026, 3, 1, 1, 30)));
}

#[test]
fn monthly_hits_step_cap_on_huge_window() {
    let def = event(at(2000, 1, 1, 9, 0), None, Recurrence::Monthly);
    let result = generate_occurrences(&def, day(2000, 1, 1), day(2200, 1, 1));

    assert_eq!(result.len(), CALENDAR_STEP_CAP);
    assert!(result.truncated);
}

// ---------------------------------------------------------------------------
// Yearly
// ---------------------------------------------------------------------------

#[test]
fn yearly_leap_day_falls_back_to_feb_28() {
    let def = event(at(2024, 2, 29, 9, 0), None, Recurrence::Yearly);
    assert_eq!(
        starts(&def, day(2024, 1, 1), day(2028, 1, 1)),
        vec![
            at(2024, 2, 29, 9, 0),
            at(2025, 2, 28, 9, 0),
            at(2026, 2, 28, 9, 0),
            at(2027, 2, 28, 9, 0),
        ]
    );
}

#[test]
fn yearly_leap_day_returns_in_next_leap_year() {
    let def = event(at(2024, 2, 29, 9, 0), None, Recurrence::Yearly);
    assert_eq!(
        starts(&def, day(2028, 1, 1), day(2029, 1, 1)),
        vec![at(2028, 2, 29, 9, 0)]
    );
}

#[test]
fn yearly_birthday_from_old_anchor() {
    let def = event(at(1990, 7, 4, 0, 0), None, Recurrence::Yearly);
    assert_eq!(
        starts(&def, day(2026, 1, 1), day(2028, 1, 1)),
        vec![day(2026, 7, 4), day(2027, 7, 4)]
    );
}

#[test]
fn yearly_window_before_anchor_year_is_empty() {
    let def = event(at(2030, 1, 1, 0, 0), None, Recurrence::Yearly);
    assert!(starts(&def, day(2026, 1, 1), day(2029, 12, 31)).is_empty());
}

#[test]
fn yearly_hits_step_cap_on_huge_window() {
    let def = event(at(1900, 5, 1, 9, 0), None, Recurrence::Yearly);
    let result = generate_occurrences(&def, day(1900, 1, 1), day(2200, 1, 1));

    assert_eq!(result.len(), CALENDAR_STEP_CAP);
    assert!(result.truncated);
    assert_eq!(result.occurrences.last().unwrap().start, at(2099, 5, 1, 9, 0));
}

// ---------------------------------------------------------------------------
// Window edge cases
// ---------------------------------------------------------------------------

#[test]
fn inverted_window_is_empty_for_every_cadence() {
    for recurrence in [
        Recurrence::None,
        Recurrence::Weekly,
        Recurrence::Monthly,
        Recurrence::Yearly,
    ] {
        let def = event(at(2026, 1, 5, 18, 0), None, recurrence);
        let result = generate_occurrences(&def, day(2026, 2, 1), day(2026, 1, 1));
        assert!(result.is_empty(), "{recurrence} should be empty");
        assert!(!result.truncated);
    }
}

#[test]
fn empty_window_is_empty() {
    let def = event(at(2026, 1, 5, 18, 0), None, Recurrence::Weekly);
    let ws = at(2026, 1, 5, 18, 0);
    assert!(generate_occurrences(&def, ws, ws).is_empty());
}
