//! User settings, loaded from a TOML file.

use std::path::Path;

use anyhow::{Context, Result};
use planner_engine::{GeoPoint, OvernightPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const EVENTS_HOURS_RANGE: (f64, f64) = (1.0, 336.0);
const PLACES_HOURS_RANGE: (f64, f64) = (1.0, 24.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display language tag (`en`, `ro`, `de`).
    pub language: String,
    /// Look-ahead for upcoming events, in hours.
    pub soon_events_hours: f64,
    /// Look-ahead for the next place opening, in hours.
    pub soon_places_hours: f64,
    /// Fixed origin for distances when no location is given on the command line.
    pub manual_lat: Option<f64>,
    pub manual_lon: Option<f64>,
    pub overnight_policy: OvernightPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            soon_events_hours: 48.0,
            soon_places_hours: 8.0,
            manual_lat: None,
            manual_lon: None,
            overnight_policy: OvernightPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given or the file
    /// does not exist. The result is always validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) if path.exists() => {
                debug!(?path, "Loading settings");
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read settings: {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("failed to parse settings: {}", path.display()))?
            }
            Some(path) => {
                debug!(?path, "Settings file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        Ok(settings.validate())
    }

    /// Clamp look-ahead horizons into the ranges the app offers. Non-finite
    /// values fall back to the defaults.
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();
        self.soon_events_hours = clamp_hours(
            "soon_events_hours",
            self.soon_events_hours,
            defaults.soon_events_hours,
            EVENTS_HOURS_RANGE,
        );
        self.soon_places_hours = clamp_hours(
            "soon_places_hours",
            self.soon_places_hours,
            defaults.soon_places_hours,
            PLACES_HOURS_RANGE,
        );
        if self.language.trim().is_empty() {
            self.language = defaults.language;
        }
        self
    }

    pub fn origin(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.manual_lat?, self.manual_lon?))
    }
}

fn clamp_hours(field: &str, value: f64, default: f64, (min, max): (f64, f64)) -> f64 {
    if !value.is_finite() {
        warn!(field, value, default, "Non-finite horizon, using default");
        return default;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(field, value, clamped, "Horizon out of range, clamped");
    }
    clamped
}
