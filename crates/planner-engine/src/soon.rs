//! "Coming up" views over stored records: upcoming event occurrences and the
//! open/closed overview of places, each annotated with distance from an origin.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::availability::{add_hours, next_open_within, status_now_with};
use crate::geo::GeoPoint;
use crate::occurrence::{generate_occurrences, Occurrence};
use crate::policy::OvernightPolicy;
use crate::records::{EventRecord, PlaceRecord};

/// One occurrence of a stored event inside the look-ahead window.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingOccurrence<'a> {
    pub event: &'a EventRecord,
    pub occurrence: Occurrence,
    /// Name of the linked place, if `placeId` resolved.
    pub place_name: Option<&'a str>,
    pub distance_km: Option<f64>,
    /// The event's expansion hit its step cap.
    pub truncated: bool,
}

/// Open/closed state of a place at the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum PlaceState {
    Open {
        #[serde(with = "crate::local::serde_minutes")]
        closes_at: NaiveDateTime,
    },
    OpensAt {
        #[serde(with = "crate::local::serde_minutes")]
        at: NaiveDateTime,
    },
    Closed,
    HoursNotSet,
}

impl PlaceState {
    pub fn is_open(&self) -> bool {
        matches!(self, PlaceState::Open { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOverview<'a> {
    pub place: &'a PlaceRecord,
    pub state: PlaceState,
    pub distance_km: Option<f64>,
}

/// Every occurrence of `events` starting in `[now, now + window_hours)`,
/// ordered by start.
///
/// Coordinates come from the linked place when `placeId` resolves, otherwise
/// from the event itself. Events with malformed timestamps are skipped.
pub fn upcoming_events<'a>(
    events: &'a [EventRecord],
    places: &'a [PlaceRecord],
    now: NaiveDateTime,
    window_hours: f64,
    origin: Option<GeoPoint>,
) -> Vec<UpcomingOccurrence<'a>> {
    let window_end = add_hours(now, window_hours);
    let mut rows = Vec::new();

    for event in events {
        let definition = match event.definition() {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(
                    event_id = %event.id,
                    error = %e,
                    "skipping event with invalid timestamps"
                );
                continue;
            }
        };

        let place = event
            .place_id
            .as_deref()
            .and_then(|id| places.iter().find(|p| p.id == id));
        let location = match place {
            Some(p) => p.location(),
            None => event.location(),
        };
        let distance_km = origin.zip(location).map(|(o, l)| o.distance_km(&l));

        let expansion = generate_occurrences(&definition, now, window_end);
        let truncated = expansion.truncated;
        rows.extend(expansion.into_iter().map(|occurrence| UpcomingOccurrence {
            event,
            occurrence,
            place_name: place.map(|p| p.name.as_str()),
            distance_km,
            truncated,
        }));
    }

    rows.sort_by_key(|row| row.occurrence.start);
    rows
}

/// Status of every place at `now`, open places first, then nearest first.
///
/// Closed places get their next opening within `horizon_hours` when there is one.
pub fn places_overview(
    places: &[PlaceRecord],
    now: NaiveDateTime,
    horizon_hours: f64,
    origin: Option<GeoPoint>,
    policy: OvernightPolicy,
) -> Vec<PlaceOverview<'_>> {
    let mut rows: Vec<PlaceOverview<'_>> = places
        .iter()
        .map(|place| {
            let state = place_state(place, now, horizon_hours, policy);
            let distance_km = origin
                .zip(place.location())
                .map(|(o, l)| o.distance_km(&l));
            PlaceOverview {
                place,
                state,
                distance_km,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.state
            .is_open()
            .cmp(&a.state.is_open())
            .then_with(|| compare_distance(a.distance_km, b.distance_km))
    });
    rows
}

/// State of one place at `now`; closed places look ahead `horizon_hours`
/// for their next opening.
pub fn place_state(
    place: &PlaceRecord,
    now: NaiveDateTime,
    horizon_hours: f64,
    policy: OvernightPolicy,
) -> PlaceState {
    let Some(schedule) = &place.opening_hours else {
        return PlaceState::HoursNotSet;
    };
    let status = status_now_with(schedule, now, policy);
    match (status.open, status.closes_at) {
        (true, Some(closes_at)) => PlaceState::Open { closes_at },
        _ => match next_open_within(schedule, horizon_hours, now) {
            Some(at) => PlaceState::OpensAt { at },
            None => PlaceState::Closed,
        },
    }
}

/// Known distances ascending, unknown last.
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
