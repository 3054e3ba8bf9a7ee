//! Naive local timestamps in the stored `YYYY-MM-DDTHH:MM` form.
//!
//! Stored values are fixed-width so they sort lexically. Parsing also accepts
//! a trailing `:SS` (dropped, the engine works in whole minutes) and a bare
//! `YYYY-MM-DD` (midnight), which is how window bounds are usually written.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::error::{PlannerError, Result};

/// Format used when writing a local timestamp.
pub const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

const LOCAL_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a local timestamp, truncated to the minute.
///
/// # Errors
/// Returns `PlannerError::InvalidDateTime` if `s` matches none of the accepted forms.
pub fn parse_local(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    let parsed = NaiveDateTime::parse_from_str(s, LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, LOCAL_FORMAT_SECONDS))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|e| PlannerError::InvalidDateTime(format!("'{}': {}", s, e)))?;
    Ok(truncate_to_minute(parsed))
}

/// Format a local timestamp as `YYYY-MM-DDTHH:MM`.
pub fn format_local(dt: &NaiveDateTime) -> String {
    dt.format(LOCAL_FORMAT).to_string()
}

/// Drop seconds and sub-second precision.
pub fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// Serde adapter for a required local timestamp field.
pub mod serde_minutes {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_local(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_local(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for an optional local timestamp field. Empty strings read as `None`.
pub mod serde_minutes_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_some(&super::format_local(dt)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.trim().is_empty() => super::parse_local(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
