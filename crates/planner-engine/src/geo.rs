//! Great-circle distance between coordinates.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        distance_km(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Haversine distance in kilometres. Inputs are not range-checked.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero() {
        assert_eq!(distance_km(44.4268, 26.1025, 44.4268, 26.1025), 0.0);
    }

    #[test]
    fn bucharest_to_cluj() {
        // Roughly 324 km as the crow flies.
        let d = distance_km(44.4268, 26.1025, 46.7712, 23.6236);
        assert!((d - 324.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn quarter_meridian() {
        let d = GeoPoint::new(0.0, 0.0).distance_km(&GeoPoint::new(90.0, 0.0));
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM / 2.0;
        assert!((d - expected).abs() < 1e-6);
    }
}
