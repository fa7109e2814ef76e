//! Domain types shared by the locator, search, and saved-list crates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Display address used when a place carries no structured address tags.
pub const ADDRESS_NOT_AVAILABLE: &str = "Address not available";

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting values outside the valid WGS84 range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLatitude`] or [`CoreError::InvalidLongitude`]
    /// when a component is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// A coordinate stamped with the epoch-millisecond time it was acquired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedCoordinate {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub timestamp: i64,
}

impl CachedCoordinate {
    #[must_use]
    pub fn new(coordinate: Coordinate, timestamp: i64) -> Self {
        Self {
            coordinate,
            timestamp,
        }
    }

    /// `true` while `0 <= now_ms - timestamp < ttl_ms`. A timestamp ahead of
    /// `now_ms` is stale.
    #[must_use]
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        let age = now_ms.saturating_sub(self.timestamp);
        (0..ttl_ms).contains(&age)
    }
}

/// A place reduced to the uniform shape the presentation layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCafe {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl NormalizedCafe {
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.tag("phone").or_else(|| self.tag("contact:phone"))
    }

    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.tag("website").or_else(|| self.tag("contact:website"))
    }

    #[must_use]
    pub fn opening_hours(&self) -> Option<&str> {
        self.tag("opening_hours")
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// A café the user explicitly kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCafe {
    #[serde(flatten)]
    pub cafe: NormalizedCafe,
    pub saved_at: DateTime<Utc>,
}

impl SavedCafe {
    #[must_use]
    pub fn new(cafe: NormalizedCafe, saved_at: DateTime<Utc>) -> Self {
        Self { cafe, saved_at }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.cafe.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe_with_tags(tags: &[(&str, &str)]) -> NormalizedCafe {
        NormalizedCafe {
            id: "1".to_owned(),
            name: "Blue Cup".to_owned(),
            address: "12 Main St".to_owned(),
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            lat: Some(51.5),
            lon: Some(-0.12),
        }
    }

    #[test]
    fn coordinate_accepts_valid_range() {
        let c = Coordinate::new(-90.0, 180.0).unwrap();
        assert!((c.latitude + 90.0).abs() < f64::EPSILON);
        assert!((c.longitude - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn coordinate_rejects_out_of_range_latitude() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(CoreError::InvalidLatitude(91.0))
        );
    }

    #[test]
    fn coordinate_rejects_nan_longitude() {
        assert!(matches!(
            Coordinate::new(0.0, f64::NAN),
            Err(CoreError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn cached_coordinate_freshness_boundary() {
        let cached = CachedCoordinate::new(Coordinate::new(1.0, 2.0).unwrap(), 1_000);
        assert!(cached.is_fresh(1_000 + 599_999, 600_000));
        assert!(!cached.is_fresh(1_000 + 600_000, 600_000));
    }

    #[test]
    fn cached_coordinate_from_the_future_is_stale() {
        let cached = CachedCoordinate::new(Coordinate::new(1.0, 2.0).unwrap(), 10_000);
        assert!(cached.is_fresh(10_000, 600_000));
        assert!(!cached.is_fresh(9_999, 600_000));
        assert!(!CachedCoordinate::new(cached.coordinate, i64::MAX).is_fresh(0, 600_000));
        assert!(!CachedCoordinate::new(cached.coordinate, i64::MIN).is_fresh(0, i64::MAX));
    }

    #[test]
    fn cached_coordinate_serializes_flat() {
        let cached = CachedCoordinate::new(Coordinate::new(1.5, 2.5).unwrap(), 42);
        let json = serde_json::to_value(cached).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"latitude": 1.5, "longitude": 2.5, "timestamp": 42})
        );
    }

    #[test]
    fn contact_tags_fall_back_to_contact_namespace() {
        let cafe = cafe_with_tags(&[
            ("contact:phone", "+44 20 0000"),
            ("website", "https://bluecup.example"),
            ("opening_hours", "  "),
        ]);
        assert_eq!(cafe.phone(), Some("+44 20 0000"));
        assert_eq!(cafe.website(), Some("https://bluecup.example"));
        assert_eq!(cafe.opening_hours(), None);
    }

    #[test]
    fn saved_cafe_round_trips_through_json() {
        let saved = SavedCafe::new(
            cafe_with_tags(&[("phone", "123")]),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        );
        let json = serde_json::to_string(&saved).unwrap();
        let back: SavedCafe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, saved);
        assert_eq!(back.id(), "1");
    }
}
