//! Stored place and event shapes, as the surrounding app persists them.
//!
//! Field names follow the store (`startLocal`, `openingHours`, ...). Only the
//! fields the engine and its views read are modelled; unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PlannerError, Result};
use crate::geo::GeoPoint;
use crate::local::parse_local;
use crate::occurrence::{EventDefinition, Recurrence};
use crate::schedule::{TimeInterval, WeeklySchedule};

/// An event as stored. Timestamps stay textual until [`EventRecord::definition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start_local: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_local: Option<String>,
    #[serde(default, deserialize_with = "recurrence_or_none")]
    pub recurrence: Recurrence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl EventRecord {
    /// Parse the stored timestamps into an [`EventDefinition`].
    ///
    /// An empty `endLocal` counts as absent.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidDateTime` for malformed timestamps and
    /// `PlannerError::InvalidEvent` if the end is not after the start.
    pub fn definition(&self) -> Result<EventDefinition> {
        let start = parse_local(&self.start_local)?;
        let end = match self.end_local.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_local(raw)?),
            _ => None,
        };
        EventDefinition::new(start, end, self.recurrence)
    }

    pub fn location(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.lat?, self.lon?))
    }

    /// Parse a JSON array of stored events.
    ///
    /// # Errors
    /// Returns `PlannerError::Json` if the input is not an array of event objects.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `null` reads as no recurrence, like a missing field.
fn recurrence_or_none<'de, D>(d: D) -> std::result::Result<Recurrence, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Recurrence>::deserialize(d)?.unwrap_or_default())
}

/// A place as stored. `openingHours` absent means hours were never entered,
/// which is different from a schedule that is closed every day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<WeeklySchedule>,
}

impl PlaceRecord {
    pub fn location(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.lat?, self.lon?))
    }

    /// Parse a JSON array of stored places.
    ///
    /// # Errors
    /// Returns `PlannerError::Json` if the input is malformed, including any
    /// opening interval that is not `HH:MM`.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse one day's opening hours as typed on the edit form:
/// `"09:00-12:00, 13:00-18:00"`. Blank input means closed.
///
/// # Errors
/// Returns `PlannerError::InvalidInterval` for any segment that is not
/// `HH:MM-HH:MM` (whitespace around the dash allowed).
pub fn parse_hours_line(line: &str) -> Result<Vec<TimeInterval>> {
    line.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (start, end) = part
                .split_once('-')
                .ok_or_else(|| PlannerError::InvalidInterval(part.to_string()))?;
            TimeInterval::parse(start.trim(), end.trim())
                .map_err(|_| PlannerError::InvalidInterval(part.to_string()))
        })
        .collect()
}
