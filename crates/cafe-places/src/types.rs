//! Wire types for the Overpass API and the query handed to a places source.

use std::collections::BTreeMap;

use cafe_core::Coordinate;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level Overpass JSON envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<PlaceRecord>,
    /// Set by Overpass when the query hit a runtime error or timeout.
    #[serde(default)]
    pub remark: Option<String>,
}

/// A raw place element. Only `id` is guaranteed; everything else is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// `node`, `way`, or `relation`.
    #[serde(rename = "type", default)]
    pub element_type: String,
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Present on ways and relations when queried with `out center`.
    #[serde(default)]
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl PlaceRecord {
    /// Node position, or the computed center for ways and relations.
    #[must_use]
    pub fn position(&self) -> (Option<f64>, Option<f64>) {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => (Some(lat), Some(lon)),
            (_, _, Some(center)) => (Some(center.lat), Some(center.lon)),
            (lat, lon, None) => (lat, lon),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Str(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}

/// OSM tag filter selecting the kind of place to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: String,
    pub value: String,
}

impl Category {
    #[must_use]
    pub fn cafe() -> Self {
        Self {
            key: "amenity".to_owned(),
            value: "cafe".to_owned(),
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::cafe()
    }
}

/// One places lookup: everything tagged `category` within `radius_m` of `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesQuery {
    pub center: Coordinate,
    pub radius_m: u32,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_node_with_numeric_id() {
        let record: PlaceRecord = serde_json::from_value(serde_json::json!({
            "type": "node",
            "id": 123,
            "lat": 51.5,
            "lon": -0.1,
            "tags": {"name": "Blue Cup", "amenity": "cafe"}
        }))
        .unwrap();

        assert_eq!(record.id, "123");
        assert_eq!(record.element_type, "node");
        assert_eq!(record.position(), (Some(51.5), Some(-0.1)));
        assert_eq!(record.tags.get("name").map(String::as_str), Some("Blue Cup"));
    }

    #[test]
    fn parses_way_with_center_and_string_id() {
        let record: PlaceRecord = serde_json::from_value(serde_json::json!({
            "type": "way",
            "id": "w-9",
            "center": {"lat": 10.0, "lon": 20.0}
        }))
        .unwrap();

        assert_eq!(record.id, "w-9");
        assert!(record.tags.is_empty());
        assert_eq!(record.position(), (Some(10.0), Some(20.0)));
    }

    #[test]
    fn missing_position_stays_none() {
        let record: PlaceRecord =
            serde_json::from_value(serde_json::json!({"id": 1, "tags": {}})).unwrap();
        assert_eq!(record.position(), (None, None));
    }

    #[test]
    fn response_without_elements_is_empty() {
        let response: OverpassResponse =
            serde_json::from_value(serde_json::json!({"version": 0.6})).unwrap();
        assert!(response.elements.is_empty());
        assert!(response.remark.is_none());
    }
}
