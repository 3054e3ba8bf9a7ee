//! # planner-engine
//!
//! Temporal core of a local-first places/events planner.
//!
//! Expands recurring event definitions into concrete occurrences, and answers
//! "is this place open now, and when does it open next" from a weekly
//! opening-hours table. All values are naive local wall-clock times; nothing
//! here touches time zones, storage, or the network.
//!
//! ## Modules
//!
//! - [`occurrence`] — event definition + window → concrete occurrences
//! - [`availability`] — open/closed status and next opening for a schedule
//! - [`schedule`] — clock times, intervals, and the weekly table
//! - [`policy`] — how overnight intervals declared on the previous day are treated
//! - [`geo`] — great-circle distance
//! - [`records`] — stored place/event shapes and data-entry parsing
//! - [`soon`] — "coming up" views combining the above
//! - [`local`] — fixed-width local timestamp parsing and formatting
//! - [`error`] — Error types

pub mod availability;
pub mod error;
pub mod geo;
pub mod local;
pub mod occurrence;
pub mod policy;
pub mod records;
pub mod schedule;
pub mod soon;

pub use availability::{next_open_within, status_now, status_now_with, AvailabilityStatus};
pub use error::PlannerError;
pub use geo::{distance_km, GeoPoint};
pub use occurrence::{generate_occurrences, EventDefinition, Expansion, Occurrence, Recurrence};
pub use policy::OvernightPolicy;
pub use records::{parse_hours_line, EventRecord, PlaceRecord};
pub use schedule::{ClockTime, TimeInterval, WeeklySchedule};
pub use soon::{
    place_state, places_overview, upcoming_events, PlaceOverview, PlaceState, UpcomingOccurrence,
};
